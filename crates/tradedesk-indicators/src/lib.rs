//! Technical indicators for the trading console.
//!
//! This crate computes the indicators shown next to a quote:
//! - Moving averages (SMA with warm-up, first-close seeded EMA)
//! - Momentum (RSI over the same warm-up window)
//! - Volume (cumulative VWAP from the start of the series)
//!
//! [`IndicatorEngine`] runs all of them over a bar series and reports the
//! values of the last bar. Inputs are never modified.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod volume;

pub use engine::{compute_indicators, IndicatorColumns, IndicatorEngine, IndicatorSnapshot};
pub use momentum::Rsi;
pub use moving_average::{Ema, Sma};
pub use volume::Vwap;

/// Default lookback used by the console.
pub const DEFAULT_PERIOD: usize = 14;

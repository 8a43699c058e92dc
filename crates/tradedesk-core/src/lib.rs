//! Core types and traits for the trading console.
//!
//! This crate provides the foundational building blocks including:
//! - Instrument descriptors and resolved contracts
//! - Quotes, bars and bar series
//! - Orders, trades and positions
//! - Quarterly futures expiration arithmetic
//! - The broker session boundary and the indicator trait

pub mod error;
pub mod expiration;
pub mod traits;
pub mod types;

pub use error::{
    ConsoleError, ConsoleResult, HistoryError, OrderError, QuoteError, QuoteFailure,
    ResolutionError, SessionError,
};
pub use expiration::{next_quarterly_expiration, QUARTERLY_MONTHS};
pub use traits::*;
pub use types::*;

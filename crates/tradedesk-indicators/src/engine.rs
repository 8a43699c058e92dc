//! Runs every indicator over a bar series.

use serde::{Deserialize, Serialize};
use tradedesk_core::traits::{BarIndicator, Indicator};
use tradedesk_core::types::{Bar, BarSeries};

use crate::{Ema, Rsi, Sma, Vwap, DEFAULT_PERIOD};

/// Indicator values for one bar. `None` means undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub vwap: Option<f64>,
    pub rsi: Option<f64>,
}

impl IndicatorSnapshot {
    /// Snapshot of an invalid series: every value undefined.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// Per-bar indicator values, aligned with the input bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColumns {
    pub sma: Vec<f64>,
    pub ema: Vec<f64>,
    pub vwap: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl IndicatorColumns {
    pub fn len(&self) -> usize {
        self.sma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma.is_empty()
    }

    /// Values at bar `index`.
    pub fn snapshot_at(&self, index: usize) -> Option<IndicatorSnapshot> {
        Some(IndicatorSnapshot {
            sma: Some(*self.sma.get(index)?),
            ema: Some(*self.ema.get(index)?),
            vwap: *self.vwap.get(index)?,
            rsi: *self.rsi.get(index)?,
        })
    }

    /// Values at the last bar.
    pub fn last(&self) -> Option<IndicatorSnapshot> {
        self.len().checked_sub(1).and_then(|i| self.snapshot_at(i))
    }
}

/// Computes SMA, EMA, VWAP and RSI.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    sma: Sma,
    ema: Ema,
    rsi: Rsi,
    vwap: Vwap,
}

impl IndicatorEngine {
    /// Create an engine using `period` for SMA, EMA and RSI.
    pub fn new(period: usize) -> Self {
        Self {
            sma: Sma::new(period),
            ema: Ema::new(period),
            rsi: Rsi::new(period),
            vwap: Vwap::new(),
        }
    }

    pub fn period(&self) -> usize {
        self.sma.period()
    }

    /// Full per-bar columns, or `None` if the bars are empty or carry a
    /// non-finite close.
    pub fn columns(&self, bars: &[Bar]) -> Option<IndicatorColumns> {
        if bars.is_empty() || bars.iter().any(|b| !b.close.is_finite()) {
            return None;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        Some(IndicatorColumns {
            sma: self.sma.calculate(&closes),
            ema: self.ema.calculate(&closes),
            vwap: self.vwap.calculate_bars(bars),
            rsi: self.rsi.calculate(&closes),
        })
    }

    /// Indicator values at the last bar of `bars`.
    pub fn compute_bars(&self, bars: &[Bar]) -> IndicatorSnapshot {
        self.columns(bars)
            .and_then(|columns| columns.last())
            .unwrap_or_else(IndicatorSnapshot::empty)
    }

    /// Indicator values at the last bar of the series.
    pub fn compute(&self, series: &BarSeries) -> IndicatorSnapshot {
        self.compute_bars(series.bars())
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

/// Compute the default 14-period snapshot for a series.
pub fn compute_indicators(series: &BarSeries) -> IndicatorSnapshot {
    IndicatorEngine::default().compute(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedesk_core::types::BarSize;

    fn series(closes: &[f64], volumes: &[u64]) -> BarSeries {
        let bars = closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&c, &v))| Bar::new(i as i64 * 60_000, c, c, c, c, v))
            .collect();
        BarSeries::new("TEST", BarSize::Minute1, bars).unwrap()
    }

    #[test]
    fn test_three_bar_snapshot() {
        let series = series(&[10.0, 12.0, 11.0], &[100, 100, 100]);
        let snapshot = compute_indicators(&series);

        let k = 2.0 / 15.0;
        let ema1 = 10.0 + (12.0 - 10.0) * k;
        let ema2 = 11.0 * k + ema1 * (1.0 - k);

        assert!((snapshot.vwap.unwrap() - 11.0).abs() < 1e-10);
        assert!((snapshot.sma.unwrap() - 11.0).abs() < 1e-10);
        assert!((snapshot.ema.unwrap() - ema2).abs() < 1e-12);
        assert!((snapshot.rsi.unwrap() - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
    }

    #[test]
    fn test_rising_series_has_undefined_rsi() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let volumes = vec![10; 40];
        let snapshot = compute_indicators(&series(&closes, &volumes));

        assert_eq!(snapshot.rsi, None);
        assert!(snapshot.sma.unwrap().is_finite());
        assert!(snapshot.ema.unwrap().is_finite());
        assert!(snapshot.vwap.unwrap().is_finite());
    }

    #[test]
    fn test_sma_uses_trailing_window_after_warm_up() {
        let closes: Vec<f64> = (1..=20).map(f64::from).collect();
        let snapshot = compute_indicators(&series(&closes, &vec![1; 20]));

        // mean of 7..=20
        assert!((snapshot.sma.unwrap() - 13.5).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_bars_give_empty_snapshot() {
        let engine = IndicatorEngine::default();
        assert!(engine.compute_bars(&[]).is_empty());

        let bars = vec![Bar::new(0, 1.0, 1.0, 1.0, f64::NAN, 10)];
        assert!(engine.compute_bars(&bars).is_empty());
        assert!(engine.columns(&bars).is_none());
    }

    #[test]
    fn test_input_is_left_untouched() {
        let series = series(&[10.0, 12.0, 11.0], &[100, 200, 300]);
        let before = series.clone();
        let engine = IndicatorEngine::new(2);

        let columns = engine.columns(series.bars()).unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(series, before);
        assert_eq!(columns.last(), Some(engine.compute(&series)));
    }
}

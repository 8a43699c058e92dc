//! Volume-weighted indicators.

use tradedesk_core::traits::BarIndicator;
use tradedesk_core::types::Bar;

/// Cumulative Volume-Weighted Average Price.
///
/// `sum(close * volume) / sum(volume)` from the first bar of the series
/// through each bar. Undefined while no volume has traded.
#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Vwap {
    pub fn new() -> Self {
        Self
    }
}

impl BarIndicator for Vwap {
    type Output = Option<f64>;

    fn calculate_bars(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let mut price_volume = 0.0;
        let mut volume = 0.0;

        bars.iter()
            .map(|bar| {
                let v = bar.volume as f64;
                price_volume += bar.close * v;
                volume += v;
                (volume > 0.0).then(|| price_volume / volume)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "VWAP"
    }
}

//! Momentum indicators.

use tradedesk_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Gains and losses are averaged with the same warm-up window as [`Sma`]:
/// the first price contributes a zero change, and until `period` changes are
/// available the mean runs over all changes so far. The value is undefined
/// when the average loss is zero.
///
/// [`Sma`]: crate::Sma
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Price changes, with a zero change for the first point.
    fn changes(data: &[f64]) -> Vec<f64> {
        std::iter::once(0.0)
            .chain(data.windows(2).map(|w| w[1] - w[0]))
            .take(data.len())
            .collect()
    }
}

impl Indicator for Rsi {
    type Output = Option<f64>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let changes = Self::changes(data);
        let gains: Vec<f64> = changes.iter().map(|&c| c.max(0.0)).collect();
        let losses: Vec<f64> = changes.iter().map(|&c| (-c).max(0.0)).collect();

        (0..changes.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(self.period);
                let window = (i + 1 - start) as f64;
                // Summed per window so a loss-free window is exactly zero.
                let avg_gain = gains[start..=i].iter().sum::<f64>() / window;
                let avg_loss = losses[start..=i].iter().sum::<f64>() / window;

                if avg_loss == 0.0 {
                    None
                } else {
                    Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

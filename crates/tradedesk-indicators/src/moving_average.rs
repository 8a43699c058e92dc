//! Moving average indicators.

use tradedesk_core::traits::Indicator;

/// Simple Moving Average (SMA) with warm-up.
///
/// Before `period` values are available the mean is taken over however many
/// values exist so far, so every input gets an output.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(data.len());
        let mut sum = 0.0;

        for (i, &value) in data.iter().enumerate() {
            sum += value;
            if i >= self.period {
                sum -= data[i - self.period];
            }
            let window = (i + 1).min(self.period);
            result.push(sum / window as f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the first value, then `ema = price * k + ema * (1 - k)` with
/// `k = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Get the smoothing factor.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let Some((&first, rest)) = data.split_first() else {
            return vec![];
        };

        let mut result = Vec::with_capacity(data.len());
        let mut ema = first;
        let one_minus_mult = 1.0 - self.multiplier;
        result.push(ema);

        for &price in rest {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

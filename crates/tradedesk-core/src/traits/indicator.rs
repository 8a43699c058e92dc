//! Indicator trait definitions.

use crate::types::Bar;

/// Trait for technical indicators over a single price column.
///
/// Unlike a strict windowed indicator, implementations produce exactly one
/// output per input so that the last output always describes the last bar.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically close prices)
    ///
    /// # Returns
    /// A vector with one value per input point
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the lookback period.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Indicator that needs whole bars (e.g. volume-weighted measures).
pub trait BarIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values, one per bar.
    fn calculate_bars(&self, bars: &[Bar]) -> Vec<Self::Output>;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

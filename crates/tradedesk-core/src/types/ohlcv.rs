//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BarSize;
use crate::error::HistoryError;

/// Compact OHLCV bar.
/// Uses f64 prices for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: u64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// A bar as reported by the broker, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl From<Bar> for BarRecord {
    fn from(bar: Bar) -> Self {
        Self {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: Some(bar.close),
            volume: Some(bar.volume),
        }
    }
}

/// Non-empty, time-ordered bar series for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Granularity of the bars
    pub bar_size: BarSize,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series from complete bars, sorting them by timestamp.
    pub fn new(
        symbol: impl Into<String>,
        bar_size: BarSize,
        mut bars: Vec<Bar>,
    ) -> Result<Self, HistoryError> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(HistoryError::Empty(symbol));
        }
        bars.sort_by_key(|b| b.timestamp);
        Ok(Self {
            symbol,
            bar_size,
            bars,
        })
    }

    /// Validate broker records: every bar must carry a close and a volume.
    pub fn from_records(
        symbol: impl Into<String>,
        bar_size: BarSize,
        records: Vec<BarRecord>,
    ) -> Result<Self, HistoryError> {
        let symbol = symbol.into();
        if records.is_empty() {
            return Err(HistoryError::Empty(symbol));
        }

        let bars = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let close = record
                    .close
                    .filter(|c| c.is_finite())
                    .ok_or(HistoryError::MissingField { index, field: "close" })?;
                let volume = record
                    .volume
                    .ok_or(HistoryError::MissingField { index, field: "volume" })?;
                Ok(Bar::new(
                    record.timestamp,
                    record.open,
                    record.high,
                    record.low,
                    close,
                    volume,
                ))
            })
            .collect::<Result<Vec<_>, HistoryError>>()?;

        Self::new(symbol, bar_size, bars)
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for slice-like ergonomics.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

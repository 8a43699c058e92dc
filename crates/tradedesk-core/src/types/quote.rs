//! Quote snapshots.

use serde::{Deserialize, Serialize};

/// Raw bid/ask/last snapshot as reported by the feed.
///
/// Zero, negative or non-finite prices are normalized to "unavailable".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    bid: Option<f64>,
    ask: Option<f64>,
    last: Option<f64>,
}

fn normalize(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite() && *p > 0.0)
}

impl QuoteSnapshot {
    /// Build a snapshot from feed values.
    pub fn from_feed(bid: Option<f64>, ask: Option<f64>, last: Option<f64>) -> Self {
        Self {
            bid: normalize(bid),
            ask: normalize(ask),
            last: normalize(last),
        }
    }

    pub fn bid(&self) -> Option<f64> {
        self.bid
    }

    pub fn ask(&self) -> Option<f64> {
        self.ask
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }

    /// Names of the fields that are unavailable.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [("bid", self.bid), ("ask", self.ask), ("last", self.last)]
            .into_iter()
            .filter(|(_, price)| price.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    /// Convert into a complete quote, if every field is present.
    pub fn complete(&self) -> Option<Quote> {
        Some(Quote {
            bid: self.bid?,
            ask: self.ask?,
            last: self.last?,
        })
    }
}

/// A complete quote with all three prices populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Best bid price
    pub bid: f64,
    /// Best ask price
    pub ask: f64,
    /// Last traded price
    pub last: f64,
}

impl Quote {
    /// Get the mid price.
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Get the spread.
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// Get the spread as a percentage of the mid price.
    pub fn spread_percent(&self) -> f64 {
        (self.spread() / self.mid()) * 100.0
    }
}

impl From<Quote> for QuoteSnapshot {
    fn from(quote: Quote) -> Self {
        QuoteSnapshot::from_feed(Some(quote.bid), Some(quote.ask), Some(quote.last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_normalization() {
        let snapshot = QuoteSnapshot::from_feed(Some(0.0), Some(-1.0), Some(f64::NAN));
        assert_eq!(snapshot.missing_fields(), vec!["bid", "ask", "last"]);
        assert!(snapshot.complete().is_none());

        let partial = QuoteSnapshot::from_feed(Some(99.5), None, Some(100.0));
        assert_eq!(partial.missing_fields(), vec!["ask"]);
    }

    #[test]
    fn test_complete_quote() {
        let snapshot = QuoteSnapshot::from_feed(Some(149.95), Some(150.05), Some(150.0));
        let quote = snapshot.complete().unwrap();

        assert!((quote.mid() - 150.0).abs() < 0.001);
        assert!((quote.spread() - 0.10).abs() < 0.001);
        assert!((quote.spread_percent() - 0.0667).abs() < 0.01);
    }
}

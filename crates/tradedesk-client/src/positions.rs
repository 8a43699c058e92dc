//! Open position summary.

use std::sync::Arc;
use tracing::{debug, warn};
use tradedesk_core::error::SessionError;
use tradedesk_core::traits::BrokerSession;
use tradedesk_core::types::{InstrumentKind, InstrumentSpec, Position, PositionSummary};

use crate::{ContractResolver, QuoteService};

/// Joins broker positions with live prices.
///
/// A position whose contract cannot be resolved is left out of the summary.
/// A position whose quote cannot be fetched is kept without a price.
pub struct PositionAggregator {
    session: Arc<dyn BrokerSession>,
    resolver: ContractResolver,
    quotes: QuoteService,
}

impl PositionAggregator {
    /// Create an aggregator. Contract caching is never used here.
    pub fn new(session: Arc<dyn BrokerSession>, resolver: &ContractResolver, quotes: QuoteService) -> Self {
        Self {
            session,
            resolver: resolver.without_cache(),
            quotes,
        }
    }

    /// List open positions with their last price.
    ///
    /// # Errors
    /// Only when the broker cannot list positions at all
    pub async fn list_positions(&self) -> Result<PositionSummary, SessionError> {
        let held = self.session.list_open_positions().await?;
        if held.is_empty() {
            return Ok(PositionSummary::NoPositions);
        }

        let mut rows = Vec::with_capacity(held.len());
        for position in held {
            let kind = InstrumentKind::from_sec_type(&position.sec_type);
            let spec = InstrumentSpec::new(kind, position.symbol.as_str(), position.contract_month, 0);

            let contract = match self.resolver.resolve(&spec).await {
                Ok(contract) => contract,
                Err(err) => {
                    warn!("Skipping position {}: {}", position.label(), err);
                    continue;
                }
            };

            let current_price = match self.quotes.fetch_quote(&contract).await {
                Ok(quote) => Some(quote.last),
                Err(err) => {
                    warn!("No price for position {}: {}", position.label(), err);
                    None
                }
            };

            rows.push(Position {
                contract_label: position.label(),
                quantity: position.quantity,
                average_cost: position.average_cost,
                current_price,
            });
        }

        debug!("Summarized {} position(s)", rows.len());
        Ok(PositionSummary::Held(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{complete_quote, equity, future, ScriptedSession};
    use crate::RetryPolicy;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use tradedesk_core::types::{BrokerPosition, ContractMonth};

    fn held(symbol: &str, local: &str, sec_type: &str, month: Option<&str>, qty: Decimal) -> BrokerPosition {
        BrokerPosition {
            symbol: symbol.to_string(),
            local_symbol: local.to_string(),
            sec_type: sec_type.to_string(),
            contract_month: month.map(|m| m.parse::<ContractMonth>().unwrap()),
            quantity: qty,
            average_cost: dec!(100.25),
        }
    }

    fn aggregator(session: Arc<ScriptedSession>) -> PositionAggregator {
        let resolver = ContractResolver::new(session.clone());
        let quotes = QuoteService::with_policy(session.clone(), RetryPolicy::new(2, Duration::from_millis(10)));
        PositionAggregator::new(session, &resolver, quotes)
    }

    #[tokio::test]
    async fn test_no_positions() {
        let session = Arc::new(ScriptedSession::new());
        let summary = aggregator(session).list_positions().await.unwrap();

        assert_eq!(summary, PositionSummary::NoPositions);
        assert_eq!(summary.to_string(), "No positions currently held.");
    }

    #[tokio::test]
    async fn test_unresolvable_position_is_dropped() {
        let session = Arc::new(
            ScriptedSession::new()
                .with_listing(equity("AAPL", 1))
                .with_listing(future("ES", "ESZ4", "202412", 2))
                .with_position(held("AAPL", "AAPL", "STK", None, dec!(10)))
                .with_position(held("DELISTED", "DELISTED", "STK", None, dec!(5)))
                .with_position(held("ES", "ESZ4", "FUT", Some("202412"), dec!(-2)))
                .with_fallback_quote(complete_quote(99.0, 101.0, 100.0)),
        );
        let summary = aggregator(session).list_positions().await.unwrap();

        let labels: Vec<&str> = summary.positions().iter().map(|p| p.contract_label.as_str()).collect();
        assert_eq!(labels, vec!["AAPL (STK)", "ESZ4 (FUT)"]);

        let es = &summary.positions()[1];
        assert_eq!(es.quantity, dec!(-2));
        assert!(es.is_short());
        assert_eq!(es.current_price, Some(100.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unpriced_position_is_kept() {
        let session = Arc::new(
            ScriptedSession::new()
                .with_listing(equity("AAPL", 1))
                .with_position(held("AAPL", "AAPL", "STK", None, dec!(10))),
        );
        let summary = aggregator(session).list_positions().await.unwrap();

        assert_eq!(summary.positions().len(), 1);
        assert_eq!(summary.positions()[0].current_price, None);
    }

    #[tokio::test]
    async fn test_all_positions_unresolvable() {
        let session = Arc::new(ScriptedSession::new().with_position(held("XYZ", "XYZ", "STK", None, dec!(1))));
        let summary = aggregator(session).list_positions().await.unwrap();

        assert_eq!(summary, PositionSummary::Held(Vec::new()));
    }
}

//! Market order submission.

use std::sync::Arc;
use tracing::{info, warn};
use tradedesk_core::error::OrderError;
use tradedesk_core::traits::BrokerSession;
use tradedesk_core::types::{MarketOrder, ResolvedContract, Trade};

/// Validates and submits market orders. Fills are not tracked.
#[derive(Clone)]
pub struct OrderGateway {
    session: Arc<dyn BrokerSession>,
}

impl OrderGateway {
    pub fn new(session: Arc<dyn BrokerSession>) -> Self {
        Self { session }
    }

    /// Validate `side` and `quantity`, then submit.
    ///
    /// Nothing reaches the broker when validation fails.
    pub async fn submit(
        &self,
        contract: &ResolvedContract,
        side: &str,
        quantity: i64,
    ) -> Result<Trade, OrderError> {
        let order = MarketOrder::parse(contract.clone(), side, quantity)?;
        self.submit_order(&order).await
    }

    /// Submit an already validated order.
    pub async fn submit_order(&self, order: &MarketOrder) -> Result<Trade, OrderError> {
        match self.session.submit_market_order(order).await {
            Ok(trade) => {
                info!(
                    "Order submitted: {} {} {} ({}) id {}",
                    order.side(),
                    order.quantity(),
                    order.contract().label(),
                    trade.status,
                    trade.order_id
                );
                Ok(trade)
            }
            Err(err) => {
                warn!("Order for {} failed: {}", order.contract().label(), err);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{equity, ScriptedSession};
    use tradedesk_core::error::SessionError;
    use tradedesk_core::types::{Side, TradeStatus};

    #[tokio::test]
    async fn test_submit_buy() {
        let session = Arc::new(ScriptedSession::new());
        let gateway = OrderGateway::new(session.clone());

        let trade = gateway.submit(&equity("AAPL", 1), "buy", 10).await.unwrap();
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.quantity, 10);
        assert_eq!(trade.status, TradeStatus::PreSubmitted);
        assert_eq!(session.calls.total(), 1);
    }

    #[tokio::test]
    async fn test_invalid_orders_never_reach_broker() {
        let session = Arc::new(ScriptedSession::new());
        let gateway = OrderGateway::new(session.clone());
        let contract = equity("AAPL", 1);

        assert_eq!(
            gateway.submit(&contract, "BUY", 0).await.unwrap_err(),
            OrderError::InvalidQuantity(0)
        );
        assert_eq!(
            gateway.submit(&contract, "SELL", -5).await.unwrap_err(),
            OrderError::InvalidQuantity(-5)
        );
        assert_eq!(
            gateway.submit(&contract, "HOLD", 10).await.unwrap_err(),
            OrderError::InvalidSide("HOLD".to_string())
        );
        assert_eq!(session.calls.total(), 0);
    }

    #[tokio::test]
    async fn test_broker_rejection() {
        let session = Arc::new(
            ScriptedSession::new().with_order_error(SessionError::Rejected("insufficient margin".into())),
        );
        let err = OrderGateway::new(session)
            .submit(&equity("AAPL", 1), "SELL", 3)
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::Rejected("insufficient margin".to_string()));
    }
}

//! One-at-a-time access to a broker session.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::warn;
use tradedesk_core::error::SessionError;
use tradedesk_core::traits::{BrokerSession, MarketDataMode};
use tradedesk_core::types::{
    BarRecord, BrokerPosition, ContractDescriptor, HistoryRequest, MarketOrder, QuoteSnapshot,
    ResolvedContract, Trade,
};

/// Wraps a session so that at most one request is in flight, and bounds each
/// request with a wall-clock timeout.
///
/// The timeout starts once the request holds the session, so time spent
/// queueing behind other callers does not count against it.
pub struct SerializedSession<S: ?Sized> {
    gate: Mutex<()>,
    timeout: Duration,
    inner: Arc<S>,
}

impl<S: BrokerSession + ?Sized> SerializedSession<S> {
    pub fn new(inner: Arc<S>, timeout: Duration) -> Self {
        Self {
            gate: Mutex::new(()),
            timeout,
            inner,
        }
    }

    pub fn inner(&self) -> &Arc<S> {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn call<T, F>(&self, operation: &str, request: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>> + Send,
    {
        let _turn = self.gate.lock().await;
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} on {} timed out after {:?}", operation, self.inner.name(), self.timeout);
                Err(SessionError::Timeout {
                    millis: self.timeout.as_millis() as u64,
                })
            }
        }
    }
}

#[async_trait]
impl<S: BrokerSession + ?Sized> BrokerSession for SerializedSession<S> {
    async fn set_market_data_mode(&self, mode: MarketDataMode) -> Result<(), SessionError> {
        self.call("set_market_data_mode", self.inner.set_market_data_mode(mode)).await
    }

    async fn qualify(
        &self,
        descriptor: &ContractDescriptor,
    ) -> Result<Vec<ResolvedContract>, SessionError> {
        self.call("qualify", self.inner.qualify(descriptor)).await
    }

    async fn request_quote_snapshot(
        &self,
        contract: &ResolvedContract,
    ) -> Result<QuoteSnapshot, SessionError> {
        self.call("request_quote_snapshot", self.inner.request_quote_snapshot(contract)).await
    }

    async fn request_bars(
        &self,
        contract: &ResolvedContract,
        request: &HistoryRequest,
    ) -> Result<Vec<BarRecord>, SessionError> {
        self.call("request_bars", self.inner.request_bars(contract, request)).await
    }

    async fn list_open_positions(&self) -> Result<Vec<BrokerPosition>, SessionError> {
        self.call("list_open_positions", self.inner.list_open_positions()).await
    }

    async fn submit_market_order(&self, order: &MarketOrder) -> Result<Trade, SessionError> {
        self.call("submit_market_order", self.inner.submit_market_order(order)).await
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        self.call("disconnect", self.inner.disconnect()).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{equity, ScriptedSession};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers quote requests slowly and records peak concurrency.
    #[derive(Default)]
    struct SlowSession {
        delay: Duration,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl BrokerSession for SlowSession {
        async fn set_market_data_mode(&self, _mode: MarketDataMode) -> Result<(), SessionError> {
            Ok(())
        }

        async fn qualify(&self, _d: &ContractDescriptor) -> Result<Vec<ResolvedContract>, SessionError> {
            Ok(Vec::new())
        }

        async fn request_quote_snapshot(&self, _c: &ResolvedContract) -> Result<QuoteSnapshot, SessionError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(QuoteSnapshot::default())
        }

        async fn request_bars(
            &self,
            _c: &ResolvedContract,
            _r: &HistoryRequest,
        ) -> Result<Vec<BarRecord>, SessionError> {
            Ok(Vec::new())
        }

        async fn list_open_positions(&self) -> Result<Vec<BrokerPosition>, SessionError> {
            Ok(Vec::new())
        }

        async fn submit_market_order(&self, _o: &MarketOrder) -> Result<Trade, SessionError> {
            Err(SessionError::Rejected("read-only".into()))
        }

        async fn disconnect(&self) -> Result<(), SessionError> {
            Ok(())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_do_not_overlap() {
        let slow = Arc::new(SlowSession {
            delay: Duration::from_millis(100),
            ..Default::default()
        });
        let session = Arc::new(SerializedSession::new(slow.clone(), Duration::from_secs(1)));
        let contract = equity("AAPL", 1);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = session.clone();
                let contract = contract.clone();
                tokio::spawn(async move { session.request_quote_snapshot(&contract).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(slow.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let slow = Arc::new(SlowSession {
            delay: Duration::from_secs(30),
            ..Default::default()
        });
        let session = SerializedSession::new(slow, Duration::from_secs(10));

        let err = session.request_quote_snapshot(&equity("AAPL", 1)).await.unwrap_err();
        assert_eq!(err, SessionError::Timeout { millis: 10_000 });
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_passes_through() {
        let inner = Arc::new(ScriptedSession::new().with_listing(equity("AAPL", 7)));
        let session: Arc<dyn BrokerSession> = Arc::new(SerializedSession::new(inner.clone(), Duration::from_secs(1)));

        session.set_market_data_mode(MarketDataMode::Delayed).await.unwrap();
        let descriptor = ContractDescriptor {
            kind: tradedesk_core::types::InstrumentKind::Equity,
            symbol: "AAPL".into(),
            exchange: "SMART".into(),
            currency: "USD".into(),
            contract_month: None,
        };
        assert_eq!(session.qualify(&descriptor).await.unwrap().len(), 1);
        assert_eq!(session.name(), "scripted");
        assert_eq!(inner.modes(), vec![MarketDataMode::Delayed]);
    }
}

//! Historical bars.

use std::sync::Arc;
use tracing::debug;
use tradedesk_core::error::HistoryError;
use tradedesk_core::traits::BrokerSession;
use tradedesk_core::types::{BarSeries, HistoryRequest, ResolvedContract};

/// Fetches bar series in a single attempt.
#[derive(Clone)]
pub struct HistoryService {
    session: Arc<dyn BrokerSession>,
    defaults: HistoryRequest,
}

impl HistoryService {
    pub fn new(session: Arc<dyn BrokerSession>) -> Self {
        Self::with_defaults(session, HistoryRequest::default())
    }

    pub fn with_defaults(session: Arc<dyn BrokerSession>, defaults: HistoryRequest) -> Self {
        Self { session, defaults }
    }

    pub fn defaults(&self) -> &HistoryRequest {
        &self.defaults
    }

    /// Fetch bars using the configured window and bar size.
    pub async fn fetch_default(&self, contract: &ResolvedContract) -> Result<BarSeries, HistoryError> {
        self.fetch(contract, &self.defaults).await
    }

    /// Fetch bars for `request`.
    ///
    /// Fails when the broker returns nothing or a bar lacks a close or
    /// volume. Not retried.
    pub async fn fetch(
        &self,
        contract: &ResolvedContract,
        request: &HistoryRequest,
    ) -> Result<BarSeries, HistoryError> {
        let records = self.session.request_bars(contract, request).await?;
        debug!(
            "Received {} bars for {} ({}, {}, {})",
            records.len(),
            contract.local_symbol,
            request.window,
            request.bar_size,
            request.what_to_show
        );
        BarSeries::from_records(contract.local_symbol.clone(), request.bar_size, records)
    }
}

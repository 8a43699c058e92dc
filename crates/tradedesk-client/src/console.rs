//! Trading console facade over one broker session.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tradedesk_core::error::{HistoryError, OrderError, QuoteError, ResolutionError, SessionError};
use tradedesk_core::traits::{BrokerSession, ConnectParams, Connector, MarketDataMode};
use tradedesk_core::types::{
    BarSeries, HistoryRequest, InstrumentSpec, PositionSummary, Quote, ResolvedContract, Trade,
};
use tradedesk_indicators::{IndicatorEngine, IndicatorSnapshot, DEFAULT_PERIOD};

use crate::{
    ContractCache, ContractResolver, HistoryService, OrderGateway, PositionAggregator,
    QuoteService, RetryPolicy, RoutingConfig, SerializedSession,
};

/// Console settings.
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub market_data_mode: MarketDataMode,
    pub request_timeout: Duration,
    pub routing: RoutingConfig,
    pub retry: RetryPolicy,
    pub history: HistoryRequest,
    pub indicator_period: usize,
    pub cache_contracts: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            market_data_mode: MarketDataMode::Delayed,
            request_timeout: Duration::from_secs(10),
            routing: RoutingConfig::default(),
            retry: RetryPolicy::default(),
            history: HistoryRequest::default(),
            indicator_period: DEFAULT_PERIOD,
            cache_contracts: false,
        }
    }
}

/// Every console operation against a single shared session.
pub struct TradingConsole {
    session: Arc<dyn BrokerSession>,
    resolver: ContractResolver,
    quotes: QuoteService,
    history: HistoryService,
    positions: PositionAggregator,
    orders: OrderGateway,
    engine: IndicatorEngine,
}

impl TradingConsole {
    /// Connect, serialize access to the session and select the market data mode.
    pub async fn connect(
        connector: &dyn Connector,
        params: &ConnectParams,
        options: ConsoleOptions,
    ) -> Result<Self, SessionError> {
        let raw = connector.connect(params).await?;
        let session: Arc<dyn BrokerSession> =
            Arc::new(SerializedSession::new(raw, options.request_timeout));

        if let Err(err) = session.set_market_data_mode(options.market_data_mode).await {
            if let Err(disconnect_err) = session.disconnect().await {
                warn!("Disconnect after failed setup also failed: {}", disconnect_err);
            }
            return Err(err);
        }
        info!(
            "Connected to {} at {} ({} market data)",
            session.name(),
            params,
            options.market_data_mode
        );

        Ok(Self::with_session(session, options))
    }

    /// Build the console over an already configured session.
    pub fn with_session(session: Arc<dyn BrokerSession>, options: ConsoleOptions) -> Self {
        let mut resolver = ContractResolver::new(session.clone()).with_routing(options.routing);
        if options.cache_contracts {
            resolver = resolver.with_cache(Arc::new(ContractCache::new()));
        }
        let quotes = QuoteService::with_policy(session.clone(), options.retry);

        Self {
            positions: PositionAggregator::new(session.clone(), &resolver, quotes.clone()),
            history: HistoryService::with_defaults(session.clone(), options.history),
            orders: OrderGateway::new(session.clone()),
            engine: IndicatorEngine::new(options.indicator_period),
            resolver,
            quotes,
            session,
        }
    }

    pub fn session(&self) -> &Arc<dyn BrokerSession> {
        &self.session
    }

    pub async fn validate(&self, kind: &str, symbol: &str) -> (bool, String) {
        self.resolver.validate(kind, symbol).await
    }

    pub async fn resolve(&self, spec: &InstrumentSpec) -> Result<ResolvedContract, ResolutionError> {
        self.resolver.resolve(spec).await
    }

    pub async fn resolve_input(
        &self,
        kind: &str,
        symbol: &str,
        expiration: Option<&str>,
        quarter_offset: u32,
    ) -> Result<ResolvedContract, ResolutionError> {
        self.resolver.resolve_input(kind, symbol, expiration, quarter_offset).await
    }

    pub async fn quote(&self, contract: &ResolvedContract) -> Result<Quote, QuoteError> {
        self.quotes.fetch_quote(contract).await
    }

    /// Fetch history with the configured defaults.
    pub async fn history(&self, contract: &ResolvedContract) -> Result<BarSeries, HistoryError> {
        self.history.fetch_default(contract).await
    }

    pub fn history_defaults(&self) -> &HistoryRequest {
        self.history.defaults()
    }

    pub async fn history_with(
        &self,
        contract: &ResolvedContract,
        request: &HistoryRequest,
    ) -> Result<BarSeries, HistoryError> {
        self.history.fetch(contract, request).await
    }

    pub fn indicators(&self, series: &BarSeries) -> IndicatorSnapshot {
        self.engine.compute(series)
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    pub async fn positions(&self) -> Result<PositionSummary, SessionError> {
        self.positions.list_positions().await
    }

    pub async fn submit_order(
        &self,
        contract: &ResolvedContract,
        side: &str,
        quantity: i64,
    ) -> Result<Trade, OrderError> {
        self.orders.submit(contract, side, quantity).await
    }

    pub async fn disconnect(&self) -> Result<(), SessionError> {
        self.session.disconnect().await?;
        info!("Disconnected from {}", self.session.name());
        Ok(())
    }
}

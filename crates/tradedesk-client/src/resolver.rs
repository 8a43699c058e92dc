//! Contract resolution against the broker's symbology.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use tradedesk_core::error::ResolutionError;
use tradedesk_core::expiration::next_quarterly_expiration;
use tradedesk_core::traits::BrokerSession;
use tradedesk_core::types::{ContractDescriptor, InstrumentKind, InstrumentSpec, ResolvedContract};

use crate::ContractCache;

/// Exchange and currency used when building descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub equity_exchange: String,
    pub future_exchange: String,
    pub currency: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            equity_exchange: "SMART".to_string(),
            future_exchange: "CME".to_string(),
            currency: "USD".to_string(),
        }
    }
}

/// Turns instrument specs into qualified broker contracts.
#[derive(Clone)]
pub struct ContractResolver {
    session: Arc<dyn BrokerSession>,
    routing: RoutingConfig,
    cache: Option<Arc<ContractCache>>,
}

impl ContractResolver {
    pub fn new(session: Arc<dyn BrokerSession>) -> Self {
        Self {
            session,
            routing: RoutingConfig::default(),
            cache: None,
        }
    }

    pub fn with_routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = routing;
        self
    }

    /// Serve repeated lookups from `cache`.
    pub fn with_cache(mut self, cache: Arc<ContractCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Same resolver, always asking the broker.
    pub fn without_cache(&self) -> Self {
        Self {
            cache: None,
            ..self.clone()
        }
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Build the descriptor for `spec` as of `today`.
    ///
    /// Futures without an explicit expiration get the quarterly month
    /// `spec.quarter_offset()` quarters past the front month.
    pub fn descriptor(&self, spec: &InstrumentSpec, today: NaiveDate) -> ContractDescriptor {
        match spec.kind() {
            InstrumentKind::Equity => ContractDescriptor {
                kind: InstrumentKind::Equity,
                symbol: spec.symbol().to_string(),
                exchange: self.routing.equity_exchange.clone(),
                currency: self.routing.currency.clone(),
                contract_month: None,
            },
            InstrumentKind::Future => ContractDescriptor {
                kind: InstrumentKind::Future,
                symbol: spec.symbol().to_string(),
                exchange: self.routing.future_exchange.clone(),
                currency: self.routing.currency.clone(),
                contract_month: Some(
                    spec.expiration()
                        .unwrap_or_else(|| next_quarterly_expiration(today, spec.quarter_offset())),
                ),
            },
        }
    }

    /// Resolve `spec` using the local calendar date.
    pub async fn resolve(&self, spec: &InstrumentSpec) -> Result<ResolvedContract, ResolutionError> {
        self.resolve_on(spec, Local::now().date_naive()).await
    }

    /// Resolve `spec` as of `today`.
    pub async fn resolve_on(
        &self,
        spec: &InstrumentSpec,
        today: NaiveDate,
    ) -> Result<ResolvedContract, ResolutionError> {
        if spec.symbol().is_empty() {
            return Err(ResolutionError::EmptySymbol);
        }

        let descriptor = self.descriptor(spec, today);
        if let Some(contract) = self.cache.as_ref().and_then(|c| c.get(&descriptor)) {
            debug!("Contract cache hit for {}", spec);
            return Ok(contract);
        }

        let candidates = self.session.qualify(&descriptor).await?;
        let contract = candidates
            .into_iter()
            .next()
            .ok_or_else(|| ResolutionError::NotFound {
                symbol: spec.symbol().to_string(),
                kind: spec.kind().to_string().to_lowercase(),
            })?;

        debug!("Resolved {} to {} (conId {})", spec, contract.label(), contract.con_id);
        if let Some(cache) = &self.cache {
            cache.put(descriptor, contract.clone());
        }
        Ok(contract)
    }

    /// Parse free-form console input and resolve it.
    pub async fn resolve_input(
        &self,
        kind: &str,
        symbol: &str,
        expiration: Option<&str>,
        quarter_offset: u32,
    ) -> Result<ResolvedContract, ResolutionError> {
        let spec = InstrumentSpec::parse(kind, symbol, expiration, quarter_offset)?;
        self.resolve(&spec).await
    }

    /// Check that `symbol` names a tradable instrument of `kind`.
    ///
    /// Empty and non-alphanumeric symbols are rejected without a broker
    /// round trip. The reason is empty when the symbol is valid.
    pub async fn validate(&self, kind: &str, symbol: &str) -> (bool, String) {
        if symbol.trim().is_empty() {
            return (false, ResolutionError::EmptySymbol.to_string());
        }
        if !symbol.chars().all(char::is_alphanumeric) {
            return (false, ResolutionError::NonAlphanumeric(symbol.to_string()).to_string());
        }

        match self.resolve_input(kind, symbol, None, 0).await {
            Ok(_) => (true, String::new()),
            Err(err @ ResolutionError::NotFound { .. }) => (false, err.to_string()),
            Err(err) if err.is_input_error() => (false, format!("Invalid input: {}", err)),
            Err(err) => {
                warn!("Validation of {} failed: {}", symbol, err);
                (false, format!("Failed to validate {}: {}", symbol, err))
            }
        }
    }
}

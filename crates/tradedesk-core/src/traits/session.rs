//! Broker session trait definition.

use crate::error::SessionError;
use crate::types::{
    BarRecord, BrokerPosition, ContractDescriptor, HistoryRequest, MarketOrder, QuoteSnapshot,
    ResolvedContract, Trade,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Market data subscription mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarketDataMode {
    /// Real-time streaming data
    Live,
    /// Last recorded data when the market is closed
    Frozen,
    /// Delayed data, no subscription needed
    #[default]
    Delayed,
    /// Delayed data frozen at the close
    DelayedFrozen,
}

impl MarketDataMode {
    /// Numeric code used by the broker protocol.
    pub fn code(&self) -> i32 {
        match self {
            MarketDataMode::Live => 1,
            MarketDataMode::Frozen => 2,
            MarketDataMode::Delayed => 3,
            MarketDataMode::DelayedFrozen => 4,
        }
    }
}

impl fmt::Display for MarketDataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketDataMode::Live => "live",
            MarketDataMode::Frozen => "frozen",
            MarketDataMode::Delayed => "delayed",
            MarketDataMode::DelayedFrozen => "delayed_frozen",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MarketDataMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" | "realtime" | "1" => Ok(MarketDataMode::Live),
            "frozen" | "2" => Ok(MarketDataMode::Frozen),
            "delayed" | "3" => Ok(MarketDataMode::Delayed),
            "delayed_frozen" | "delayed-frozen" | "4" => Ok(MarketDataMode::DelayedFrozen),
            _ => Err(format!("Invalid market data mode: {}", s)),
        }
    }
}

/// Where and as whom to connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub client_id: i32,
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7497,
            client_id: 1,
        }
    }
}

impl fmt::Display for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} (client {})", self.host, self.port, self.client_id)
    }
}

/// A connected broker session.
///
/// Implementations handle exactly one logical conversation at a time; wrap
/// them in a serializing adapter when sharing across tasks.
#[async_trait]
pub trait BrokerSession: Send + Sync {
    /// Select live, frozen or delayed market data.
    async fn set_market_data_mode(&self, mode: MarketDataMode) -> Result<(), SessionError>;

    /// Qualify a descriptor against live symbology.
    ///
    /// # Returns
    /// Every matching contract; empty when nothing matches
    async fn qualify(
        &self,
        descriptor: &ContractDescriptor,
    ) -> Result<Vec<ResolvedContract>, SessionError>;

    /// Request a one-shot bid/ask/last snapshot.
    async fn request_quote_snapshot(
        &self,
        contract: &ResolvedContract,
    ) -> Result<QuoteSnapshot, SessionError>;

    /// Request historical bars ordered from oldest to newest.
    async fn request_bars(
        &self,
        contract: &ResolvedContract,
        request: &HistoryRequest,
    ) -> Result<Vec<BarRecord>, SessionError>;

    /// List open positions of the account.
    async fn list_open_positions(&self) -> Result<Vec<BrokerPosition>, SessionError>;

    /// Submit a market order.
    ///
    /// # Returns
    /// The trade with whatever status the broker reports at submission
    async fn submit_market_order(&self, order: &MarketOrder) -> Result<Trade, SessionError>;

    /// Close the connection. Further requests fail with `NotConnected`.
    async fn disconnect(&self) -> Result<(), SessionError>;

    /// Get the session name.
    fn name(&self) -> &str;
}

/// Opens broker sessions.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn BrokerSession>, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_mode_codes() {
        assert_eq!(MarketDataMode::Live.code(), 1);
        assert_eq!(MarketDataMode::Delayed.code(), 3);
        assert_eq!(MarketDataMode::default(), MarketDataMode::Delayed);
        assert_eq!("delayed-frozen".parse::<MarketDataMode>().unwrap().code(), 4);
        assert!("turbo".parse::<MarketDataMode>().is_err());
    }

    #[test]
    fn test_connect_params_default() {
        let params = ConnectParams::default();
        assert_eq!(params.to_string(), "127.0.0.1:7497 (client 1)");
    }
}

//! Configuration structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tradedesk_core::traits::{ConnectParams, MarketDataMode};
use tradedesk_core::types::{BarSize, ContractMonth, HistoryRequest, HistoryWindow, WhatToShow};

use crate::ValidationError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub routing: RoutingSettings,
    #[serde(default)]
    pub quotes: QuoteSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub paper: PaperSettings,
}

impl AppConfig {
    /// Reject settings no session could work with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.connection.host.trim().is_empty() {
            return Err(ValidationError::invalid("connection.host", "must not be empty"));
        }
        if self.connection.port == 0 {
            return Err(ValidationError::invalid("connection.port", "must be non-zero"));
        }
        if self.connection.request_timeout_secs == 0 {
            return Err(ValidationError::invalid("connection.request_timeout_secs", "must be positive"));
        }
        if self.quotes.max_attempts == 0 {
            return Err(ValidationError::invalid("quotes.max_attempts", "at least one attempt is required"));
        }
        if self.indicators.period == 0 {
            return Err(ValidationError::invalid("indicators.period", "must be positive"));
        }
        for (field, value) in [
            ("routing.equity_exchange", &self.routing.equity_exchange),
            ("routing.future_exchange", &self.routing.future_exchange),
            ("routing.currency", &self.routing.currency),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::invalid(field, "must not be empty"));
            }
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ValidationError::invalid(
                "logging.format",
                format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            ));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "tradedesk".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Broker connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub client_id: i32,
    pub market_data_mode: MarketDataMode,
    /// Upper bound on any single session request
    pub request_timeout_secs: u64,
}

impl ConnectionConfig {
    pub fn params(&self) -> ConnectParams {
        ConnectParams {
            host: self.host.clone(),
            port: self.port,
            client_id: self.client_id,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        let params = ConnectParams::default();
        Self {
            host: params.host,
            port: params.port,
            client_id: params.client_id,
            market_data_mode: MarketDataMode::Delayed,
            request_timeout_secs: 10,
        }
    }
}

/// Exchange and currency conventions for descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    pub equity_exchange: String,
    pub future_exchange: String,
    pub currency: String,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            equity_exchange: "SMART".to_string(),
            future_exchange: "CME".to_string(),
            currency: "USD".to_string(),
        }
    }
}

/// Quote retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
}

impl QuoteSettings {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
        }
    }
}

/// Default historical request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub duration: HistoryWindow,
    pub bar_size: BarSize,
    pub rth_only: bool,
    pub what_to_show: WhatToShow,
}

impl HistorySettings {
    pub fn request(&self) -> HistoryRequest {
        HistoryRequest {
            window: self.duration,
            bar_size: self.bar_size,
            rth_only: self.rth_only,
            what_to_show: self.what_to_show,
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        let request = HistoryRequest::default();
        Self {
            duration: request.window,
            bar_size: request.bar_size,
            rth_only: request.rth_only,
            what_to_show: request.what_to_show,
        }
    }
}

/// Indicator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Caching settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheSettings {
    /// Cache qualified contracts for repeated lookups
    pub contracts: bool,
}

/// Seed data for the paper session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PaperSettings {
    pub equities: Vec<PaperListing>,
    /// Futures roots; every contract month qualifies
    pub futures: Vec<PaperListing>,
    pub positions: Vec<PaperPosition>,
    /// Directory holding `{SYMBOL}.csv` bar files
    pub bars_dir: Option<String>,
}

/// A listed instrument with its quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperListing {
    pub symbol: String,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub last: Option<f64>,
}

/// An open position held in the paper account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperPosition {
    pub symbol: String,
    /// Defaults to `symbol`
    pub local_symbol: Option<String>,
    #[serde(default = "default_sec_type")]
    pub sec_type: String,
    pub contract_month: Option<ContractMonth>,
    pub quantity: Decimal,
    pub average_cost: Decimal,
}

fn default_sec_type() -> String {
    "STK".to_string()
}

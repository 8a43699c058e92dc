//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CacheSettings, ConnectionConfig, HistorySettings, IndicatorSettings,
    LoggingConfig, PaperListing, PaperPosition, PaperSettings, QuoteSettings, RoutingSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Settings that parse but make no sense.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Load configuration from file and environment.
///
/// Environment variables override the file, e.g.
/// `TRADEDESK__CONNECTION__PORT=4002`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(Some(path))
}

/// Load configuration from an optional file, falling back to defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build(path.filter(|p| p.exists()))
}

fn build(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("TRADEDESK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

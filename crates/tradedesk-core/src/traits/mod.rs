//! Core traits for the trading console.

mod indicator;
mod session;

pub use indicator::{BarIndicator, Indicator};
pub use session::{BrokerSession, ConnectParams, Connector, MarketDataMode};

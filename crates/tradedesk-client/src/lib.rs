//! Broker session client.
//!
//! Every service takes the broker session as an explicit `Arc<dyn BrokerSession>`
//! so that tests and the paper session can stand in for a live connection.

mod cache;
mod console;
mod history;
mod orders;
mod paper;
mod positions;
mod quote;
mod resolver;
mod serialized;

#[cfg(test)]
mod testing;

pub use cache::ContractCache;
pub use console::{ConsoleOptions, TradingConsole};
pub use history::HistoryService;
pub use orders::OrderGateway;
pub use paper::{PaperConnector, PaperSession};
pub use positions::PositionAggregator;
pub use quote::{QuoteService, RetryPolicy};
pub use resolver::{ContractResolver, RoutingConfig};
pub use serialized::SerializedSession;

//! Logging and plain-text reports for the console.

mod logging;
pub mod report;

pub use logging::setup_logging;

//! Error types for the trading console.
//!
//! Every operation returns its own error kind. All of them are terminal to the
//! operation but leave the broker session usable.

use thiserror::Error;

/// Top-level console error.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Contract error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Market data error: {0}")]
    Quote(#[from] QuoteError),

    #[error("Historical data error: {0}")]
    History(#[from] HistoryError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

/// Errors raised by the broker session itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Not connected to the broker")]
    NotConnected,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out after {millis} ms")]
    Timeout { millis: u64 },

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("API error: {0}")]
    Api(String),
}

impl SessionError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SessionError::Connection(_) | SessionError::Timeout { .. }
        )
    }
}

/// Instrument construction or symbology lookup failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("Invalid ticker type '{0}'. Choose 'Stock' or 'Future'.")]
    UnsupportedKind(String),

    #[error("Ticker symbol cannot be empty.")]
    EmptySymbol,

    #[error("Ticker symbol '{0}' must be alphanumeric.")]
    NonAlphanumeric(String),

    #[error("Invalid expiration '{0}': expected YYYYMM")]
    InvalidExpiration(String),

    #[error("No valid contract found for {symbol} as a {kind}.")]
    NotFound { symbol: String, kind: String },

    #[error("Failed to qualify contract: {0}")]
    Session(#[from] SessionError),
}

impl ResolutionError {
    /// Whether the failure came from the user's input rather than the broker.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ResolutionError::UnsupportedKind(_)
                | ResolutionError::EmptySymbol
                | ResolutionError::NonAlphanumeric(_)
                | ResolutionError::InvalidExpiration(_)
        )
    }
}

/// Why a single quote attempt failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteFailure {
    #[error("Incomplete market data (missing {})", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    #[error("{0}")]
    Session(#[from] SessionError),
}

/// Quote unreachable after all retry attempts.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to fetch market data for {symbol} after {attempts} attempt(s): {reason}")]
pub struct QuoteError {
    pub symbol: String,
    pub attempts: u32,
    pub reason: QuoteFailure,
}

/// Malformed or empty bar series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error("Historical data for {0} is empty")]
    Empty(String),

    #[error("Historical data is incomplete: bar {index} has no {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("Historical data request failed: {0}")]
    Session(#[from] SessionError),
}

/// Invalid order parameters or broker rejection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid quantity {0}: must be a positive integer")]
    InvalidQuantity(i64),

    #[error("Invalid action '{0}': must be BUY or SELL")]
    InvalidSide(String),

    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("Failed to place order: {0}")]
    Session(SessionError),
}

impl From<SessionError> for OrderError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Rejected(reason) => OrderError::Rejected(reason),
            other => OrderError::Session(other),
        }
    }
}

/// Result type alias for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_error_message() {
        let err = QuoteError {
            symbol: "AAPL".to_string(),
            attempts: 3,
            reason: QuoteFailure::Incomplete {
                missing: vec!["bid", "last"],
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch market data for AAPL after 3 attempt(s): Incomplete market data (missing bid, last)"
        );
    }

    #[test]
    fn test_order_error_from_session() {
        let rejected: OrderError = SessionError::Rejected("margin".into()).into();
        assert_eq!(rejected, OrderError::Rejected("margin".into()));

        let timeout: OrderError = SessionError::Timeout { millis: 500 }.into();
        assert!(matches!(timeout, OrderError::Session(SessionError::Timeout { .. })));
    }

    #[test]
    fn test_input_errors_are_distinguished() {
        assert!(ResolutionError::EmptySymbol.is_input_error());
        assert!(!ResolutionError::Session(SessionError::NotConnected).is_input_error());
        assert!(SessionError::Timeout { millis: 1 }.is_transient());
        assert!(!SessionError::Rejected("no".into()).is_transient());
    }
}

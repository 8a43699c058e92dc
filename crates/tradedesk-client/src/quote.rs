//! Quote snapshots with retry.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use tradedesk_core::error::{QuoteError, QuoteFailure};
use tradedesk_core::traits::BrokerSession;
use tradedesk_core::types::{Quote, ResolvedContract};

/// Exponential backoff between quote attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Sleep after the first failed attempt
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Sleep after failed attempt `attempt` (0-based): `initial_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Fetches complete bid/ask/last quotes.
#[derive(Clone)]
pub struct QuoteService {
    session: Arc<dyn BrokerSession>,
    policy: RetryPolicy,
}

impl QuoteService {
    pub fn new(session: Arc<dyn BrokerSession>) -> Self {
        Self::with_policy(session, RetryPolicy::default())
    }

    pub fn with_policy(session: Arc<dyn BrokerSession>, policy: RetryPolicy) -> Self {
        Self { session, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch a quote, retrying incomplete snapshots and session failures.
    ///
    /// # Returns
    /// A quote with bid, ask and last all present
    ///
    /// # Errors
    /// [`QuoteError`] carrying the reason of the last attempt once
    /// `max_attempts` attempts have failed
    pub async fn fetch_quote(&self, contract: &ResolvedContract) -> Result<Quote, QuoteError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let failure = match self.session.request_quote_snapshot(contract).await {
                Ok(snapshot) => match snapshot.complete() {
                    Some(quote) => {
                        debug!("Quote for {} on attempt {}: {:?}", contract.local_symbol, attempt + 1, quote);
                        return Ok(quote);
                    }
                    None => QuoteFailure::Incomplete {
                        missing: snapshot.missing_fields(),
                    },
                },
                Err(err) => QuoteFailure::Session(err),
            };

            attempt += 1;
            if attempt >= attempts {
                warn!("Giving up on quote for {} after {} attempt(s): {}", contract.local_symbol, attempt, failure);
                return Err(QuoteError {
                    symbol: contract.local_symbol.clone(),
                    attempts: attempt,
                    reason: failure,
                });
            }

            let delay = self.policy.delay_for(attempt - 1);
            debug!(
                "Quote attempt {}/{} for {} failed ({}), retrying in {:?}",
                attempt, attempts, contract.local_symbol, failure, delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

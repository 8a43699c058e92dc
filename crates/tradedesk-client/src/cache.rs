//! Contract caching.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tradedesk_core::types::{ContractDescriptor, ResolvedContract};

/// In-memory cache of qualified contracts.
///
/// Keyed by the descriptor sent to the broker, so a futures spec without an
/// explicit expiration maps to a new entry once the front month rolls.
#[derive(Debug, Default)]
pub struct ContractCache {
    entries: Mutex<HashMap<ContractDescriptor, ResolvedContract>>,
}

impl ContractCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ContractDescriptor, ResolvedContract>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a cached contract.
    pub fn get(&self, descriptor: &ContractDescriptor) -> Option<ResolvedContract> {
        self.entries().get(descriptor).cloned()
    }

    /// Store a qualified contract.
    pub fn put(&self, descriptor: ContractDescriptor, contract: ResolvedContract) {
        self.entries().insert(descriptor, contract);
    }

    /// Clear entries for a symbol.
    pub fn clear(&self, symbol: &str) {
        self.entries().retain(|k, _| k.symbol != symbol);
    }

    /// Clear all cached contracts.
    pub fn clear_all(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::equity;
    use tradedesk_core::types::InstrumentKind;

    fn descriptor(symbol: &str) -> ContractDescriptor {
        ContractDescriptor {
            kind: InstrumentKind::Equity,
            symbol: symbol.to_string(),
            exchange: "SMART".to_string(),
            currency: "USD".to_string(),
            contract_month: None,
        }
    }

    #[test]
    fn test_put_get_clear() {
        let cache = ContractCache::new();
        cache.put(descriptor("AAPL"), equity("AAPL", 1));
        cache.put(descriptor("MSFT"), equity("MSFT", 2));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&descriptor("AAPL")).unwrap().con_id, 1);

        cache.clear("AAPL");
        assert!(cache.get(&descriptor("AAPL")).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear_all();
        assert!(cache.is_empty());
    }
}

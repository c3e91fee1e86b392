use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use coinboard_market_data::{Snapshot, VsCurrency};

/// Latest snapshot per display currency.
///
/// Holds at most one entry per key; a write always replaces the previous
/// snapshot whole. Freshness is the caller's decision: `get` returns whatever
/// is stored. Entries are never evicted, the key space is the currency
/// allow-list.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: RwLock<HashMap<VsCurrency, Snapshot>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored snapshot for `vs`, fresh or not.
    pub fn get(&self, vs: VsCurrency) -> Option<Snapshot> {
        // Entries are replaced whole, so a poisoned map is still consistent
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&vs).cloned()
    }

    /// Store `snapshot` for `vs`, replacing any previous entry.
    pub fn put(&self, vs: VsCurrency, snapshot: Snapshot) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(vs, snapshot);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

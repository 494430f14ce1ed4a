// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 cashier-rs contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Bounded result cache with insertion-order eviction.
//!
//! Keys are (change amount, currency code); values are denomination-count
//! snapshots. Once capacity is reached, the oldest-inserted entry is
//! evicted. Eviction is insertion-order, not LRU: a hit does not refresh an
//! entry's position, so which keys survive under load is reproducible from
//! the insertion sequence alone.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

type CacheKey = (i64, String);
type CountSnapshot = Vec<(String, u64)>;

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<CacheKey, CountSnapshot>,
    /// Keys in insertion order; front is the eviction candidate.
    order: VecDeque<CacheKey>,
}

/// Fixed-capacity map from (change, currency code) to count snapshots.
///
/// The map and its insertion-order queue live behind a single mutex, so
/// check-then-insert is atomic with respect to concurrent callers sharing
/// one instance. Inserting an already-present key keeps the existing
/// snapshot: a cached answer never changes.
#[derive(Debug)]
pub struct ChangeCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl ChangeCache {
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero disables storage entirely.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            capacity,
        }
    }

    /// Returns a copy of the cached snapshot for the key, if present.
    pub fn get(&self, change: i64, currency_code: &str) -> Option<CountSnapshot> {
        let inner = self.inner.lock();
        inner
            .entries
            .get(&(change, currency_code.to_string()))
            .cloned()
    }

    /// Stores a snapshot, evicting the oldest-inserted entry when full.
    ///
    /// First write wins: if the key is already present the stored snapshot
    /// is kept and the new one discarded.
    pub fn insert(&self, change: i64, currency_code: &str, counts: CountSnapshot) {
        if self.capacity == 0 {
            return;
        }

        let key = (change, currency_code.to_string());
        let mut inner = self.inner.lock();
        if inner.entries.contains_key(&key) {
            return;
        }

        if inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(key, counts);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}

impl Default for ChangeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str, count: u64) -> CountSnapshot {
        vec![(name.to_string(), count)]
    }

    #[test]
    fn get_returns_inserted_snapshot() {
        let cache = ChangeCache::new();
        cache.insert(88, "USD", snapshot("quarter", 3));

        assert_eq!(cache.get(88, "USD"), Some(snapshot("quarter", 3)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn miss_on_unknown_key_and_different_currency() {
        let cache = ChangeCache::new();
        cache.insert(88, "USD", snapshot("quarter", 3));

        assert_eq!(cache.get(89, "USD"), None);
        assert_eq!(cache.get(88, "EUR"), None);
    }

    #[test]
    fn evicts_oldest_inserted_entry() {
        let cache = ChangeCache::with_capacity(2);
        cache.insert(1, "USD", snapshot("penny", 1));
        cache.insert(2, "USD", snapshot("penny", 2));
        cache.insert(3, "USD", snapshot("penny", 3));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1, "USD"), None);
        assert!(cache.get(2, "USD").is_some());
        assert!(cache.get(3, "USD").is_some());
    }

    #[test]
    fn eviction_ignores_access_order() {
        let cache = ChangeCache::with_capacity(2);
        cache.insert(1, "USD", snapshot("penny", 1));
        cache.insert(2, "USD", snapshot("penny", 2));

        // Touch the older entry; insertion order still decides eviction.
        assert!(cache.get(1, "USD").is_some());
        cache.insert(3, "USD", snapshot("penny", 3));

        assert_eq!(cache.get(1, "USD"), None);
        assert!(cache.get(2, "USD").is_some());
    }

    #[test]
    fn first_write_wins_on_duplicate_key() {
        let cache = ChangeCache::new();
        cache.insert(88, "USD", snapshot("quarter", 3));
        cache.insert(88, "USD", snapshot("penny", 88));

        assert_eq!(cache.get(88, "USD"), Some(snapshot("quarter", 3)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let cache = ChangeCache::with_capacity(0);
        cache.insert(88, "USD", snapshot("quarter", 3));

        assert_eq!(cache.get(88, "USD"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ChangeCache::new();
        cache.insert(1, "USD", snapshot("penny", 1));
        cache.insert(2, "USD", snapshot("penny", 2));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), ChangeCache::DEFAULT_CAPACITY);

        // Reusable after clearing.
        cache.insert(3, "USD", snapshot("penny", 3));
        assert_eq!(cache.len(), 1);
    }
}

// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::borrow::Borrow;
use std::hash::Hash;

use dashmap::DashMap;

pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Memoizes lookups over immutable data.
///
/// Eviction: once `capacity` entries are held, the next insertion flushes
/// the whole cache first. A capacity of zero disables caching. Values must
/// be a pure function of the key, so two threads racing on the same key
/// may both compute it and the later insert simply wins.
pub struct LookupCache<K: Eq + Hash, V> {
    entries: DashMap<K, V>,
    capacity: usize,
}

impl<K: Eq + Hash, V: Copy> LookupCache<K, V> {
    pub fn new(capacity: usize) -> LookupCache<K, V> {
        LookupCache {
            entries: DashMap::new(),
            capacity,
        }
    }

    pub fn get_or_insert_with<Q, F>(&self, key: &Q, compute: F) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce() -> V,
    {
        if let Some(cached) = self.entries.get(key) {
            return *cached.value();
        }
        // No shard lock is held while computing
        let value = compute();
        if self.capacity > 0 {
            if self.entries.len() >= self.capacity {
                self.entries.clear();
            }
            self.entries.insert(key.to_owned(), value);
        }
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

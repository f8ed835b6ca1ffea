// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Adaptive Replacement Cache
//!
//! A fixed-capacity map that balances recency against frequency. It keeps four
//! LRU-ordered lists:
//!
//! - `t1`: resident entries seen once recently
//! - `t2`: resident entries seen at least twice
//! - `b1`, `b2`: keys recently evicted from `t1` / `t2` (no values)
//!
//! A put that hits a ghost list moves the target size `p` of `t1`: towards
//! recency on a `b1` hit, towards frequency on a `b2` hit. Evictions take from
//! whichever resident list is over its target. Resident entries never exceed
//! the capacity `c`; `t1 + b1` never exceeds `c` and all four lists together
//! never exceed `2c`.
//!
//! This type is not synchronized; wrap it in a lock to share it.

use std::hash::Hash;

use lru::LruCache;

use crate::errors::CacheError;

/// Adaptive Replacement Cache over keys `K` and values `V`
///
/// # Examples
///
/// ```rust
/// use blocktext::cache::ArcCache;
///
/// let mut cache = ArcCache::new(2).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
///
/// // A second access promotes 1 to the frequency list
/// assert_eq!(cache.get(&1), Some(&"a"));
///
/// // Capacity is full: the once-seen entry 2 is evicted, 1 survives
/// assert_eq!(cache.put(3, "c"), Some(2));
/// assert!(cache.contains(&1));
/// ```
pub struct ArcCache<K, V> {
    capacity: usize,
    /// Target size of `t1`
    p: usize,
    t1: LruCache<K, V>,
    t2: LruCache<K, V>,
    b1: LruCache<K, ()>,
    b2: LruCache<K, ()>,
}

impl<K: Hash + Eq + Clone, V> ArcCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity { capacity });
        }

        // Lists grow on demand; a large capacity must not preallocate
        Ok(Self {
            capacity,
            p: 0,
            t1: LruCache::unbounded(),
            t2: LruCache::unbounded(),
            b1: LruCache::unbounded(),
            b2: LruCache::unbounded(),
        })
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    /// Returns `true` if no entry is resident
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current target size of the recency list
    pub fn target_recency(&self) -> usize {
        self.p
    }

    /// Sizes of the recency list, the frequency list and the two ghost lists
    pub fn list_lengths(&self) -> ListLengths {
        ListLengths {
            recent: self.t1.len(),
            frequent: self.t2.len(),
            recent_ghosts: self.b1.len(),
            frequent_ghosts: self.b2.len(),
        }
    }

    /// Returns `true` if `key` is resident, without counting an access
    pub fn contains(&self, key: &K) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    /// Returns the value for `key` without counting an access
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.t1.peek(key).or_else(|| self.t2.peek(key))
    }

    /// Looks up `key`, counting an access
    ///
    /// A hit in the recency list promotes the entry to the frequency list; a
    /// hit in the frequency list moves it to the front.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if let Some(value) = self.t1.pop(key) {
            self.t2.put(key.clone(), value);
            return self.t2.peek(key);
        }
        self.t2.get(key)
    }

    /// Inserts or updates `key`, returning the key evicted to make room
    ///
    /// Updating a resident key counts as an access. Inserting a key found in
    /// a ghost list adapts the recency target and places the entry in the
    /// frequency list.
    pub fn put(&mut self, key: K, value: V) -> Option<K> {
        if self.t1.pop(&key).is_some() || self.t2.contains(&key) {
            self.t2.put(key, value);
            return None;
        }

        if self.b1.contains(&key) {
            let delta = ghost_ratio(self.b2.len(), self.b1.len());
            self.p = (self.p + delta).min(self.capacity);
            let evicted = self.replace(false);
            self.b1.pop(&key);
            self.t2.put(key, value);
            return evicted;
        }

        if self.b2.contains(&key) {
            let delta = ghost_ratio(self.b1.len(), self.b2.len());
            self.p = self.p.saturating_sub(delta);
            let evicted = self.replace(true);
            self.b2.pop(&key);
            self.t2.put(key, value);
            return evicted;
        }

        let evicted = if self.t1.len() + self.b1.len() >= self.capacity {
            if self.t1.len() < self.capacity {
                self.b1.pop_lru();
                self.replace(false)
            } else {
                // t1 alone fills the cache: its oldest key is not worth a ghost
                self.t1.pop_lru().map(|(k, _)| k)
            }
        } else {
            let directory = self.len() + self.b1.len() + self.b2.len();
            if directory >= 2 * self.capacity {
                self.b2.pop_lru();
            }
            self.replace(false)
        };

        self.t1.put(key, value);
        evicted
    }

    /// Drops every entry and ghost and resets the recency target
    pub fn clear(&mut self) {
        self.p = 0;
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
    }

    /// Evicts one resident entry into its ghost list if the cache is full
    ///
    /// `incoming_in_b2` breaks the tie when `t1` sits exactly on target.
    fn replace(&mut self, incoming_in_b2: bool) -> Option<K> {
        if self.len() < self.capacity {
            return None;
        }

        let t1_len = self.t1.len();
        let from_t1 = self.t2.is_empty()
            || (t1_len > 0 && (t1_len > self.p || (incoming_in_b2 && t1_len == self.p)));

        if from_t1 {
            let (key, _) = self.t1.pop_lru()?;
            self.b1.put(key.clone(), ());
            Some(key)
        } else {
            let (key, _) = self.t2.pop_lru()?;
            self.b2.put(key.clone(), ());
            Some(key)
        }
    }
}

/// How far to move `p` on a ghost hit: the size ratio of the other ghost
/// list to the one that was hit, at least 1.
fn ghost_ratio(other: usize, hit: usize) -> usize {
    if hit == 0 {
        1
    } else {
        (other / hit).max(1)
    }
}

/// Snapshot of the four ARC list sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListLengths {
    /// Resident entries seen once (`t1`)
    pub recent: usize,
    /// Resident entries seen more than once (`t2`)
    pub frequent: usize,
    /// Ghost keys evicted from `t1` (`b1`)
    pub recent_ghosts: usize,
    /// Ghost keys evicted from `t2` (`b2`)
    pub frequent_ghosts: usize,
}

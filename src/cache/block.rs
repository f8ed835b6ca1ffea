// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory block text cache with adaptive replacement

use alloy_primitives::BlockNumber;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::{ArcCache, BlockTextCache, CacheStats};
use crate::errors::CacheError;
use crate::types::page::SerializedBlock;

/// Internal state guarded by the cache lock
struct ArcBlockCacheState {
    entries: ArcCache<BlockNumber, SerializedBlock>,
    stats: CacheStats,
}

impl ArcBlockCacheState {
    fn refresh_sizes(&mut self) {
        self.stats.entries = self.entries.len();
        self.stats.target_recency = self.entries.target_recency();
    }
}

/// Bounded, thread-safe block text cache using ARC replacement
///
/// One mutex guards the whole ARC structure. Every operation is O(1), so
/// requests contend only briefly.
///
/// # Examples
///
/// ```rust
/// use blocktext::cache::{ArcBlockCache, BlockTextCache};
/// use blocktext::SerializedBlock;
///
/// let cache = ArcBlockCache::new(1024).unwrap();
/// cache.put(7, SerializedBlock::from(r#"{"BlockNum":7,"Text":[]}"#));
///
/// assert!(cache.get(7).is_some());
/// assert!(cache.get(8).is_none());
/// assert_eq!(cache.stats().hits, 1);
/// ```
pub struct ArcBlockCache {
    state: Mutex<ArcBlockCacheState>,
}

impl ArcBlockCache {
    /// Creates a cache holding at most `capacity` blocks
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        let entries = ArcCache::new(capacity)?;
        Ok(Self {
            state: Mutex::new(ArcBlockCacheState {
                entries,
                stats: CacheStats {
                    capacity,
                    ..CacheStats::default()
                },
            }),
        })
    }

    /// Returns `true` if `block_number` is resident, without counting an access
    pub fn contains(&self, block_number: BlockNumber) -> bool {
        self.state.lock().entries.contains(&block_number)
    }
}

impl BlockTextCache for ArcBlockCache {
    fn get(&self, block_number: BlockNumber) -> Option<SerializedBlock> {
        let mut state = self.state.lock();

        let result = state.entries.get(&block_number).cloned();
        if result.is_some() {
            state.stats.hits += 1;
            trace!(block_number, "Cache hit");
        } else {
            state.stats.misses += 1;
            trace!(block_number, "Cache miss");
        }
        state.refresh_sizes();

        result
    }

    fn put(&self, block_number: BlockNumber, value: SerializedBlock) {
        let mut state = self.state.lock();

        if let Some(evicted) = state.entries.put(block_number, value) {
            state.stats.evictions += 1;
            debug!(block_number, evicted, "Evicted cache entry");
        }
        state.refresh_sizes();
    }

    fn stats(&self) -> CacheStats {
        self.state.lock().stats.clone()
    }

    fn name(&self) -> &'static str {
        "ArcBlockCache"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(block_number: BlockNumber) -> SerializedBlock {
        SerializedBlock::from(format!(r#"{{"BlockNum":{block_number},"Text":[]}}"#))
    }

    #[test]
    fn test_zero_capacity_is_fatal() {
        assert!(matches!(
            ArcBlockCache::new(0),
            Err(CacheError::InvalidCapacity { capacity: 0 })
        ));
    }

    #[test]
    fn test_basic_operations() {
        let cache = ArcBlockCache::new(16).unwrap();

        // Cache miss initially
        assert!(cache.get(1).is_none());

        cache.put(1, entry(1));
        assert_eq!(cache.get(1), Some(entry(1)));

        // Stats should show 1 hit, 1 miss
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.capacity, 16);
    }

    #[test]
    fn test_reinsert_is_idempotent() {
        let cache = ArcBlockCache::new(4).unwrap();
        cache.put(3, entry(3));
        cache.put(3, entry(3));

        assert_eq!(cache.get(3), Some(entry(3)));
        assert_eq!(cache.stats().entries, 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_capacity_one_evicts_older_block() {
        let cache = ArcBlockCache::new(1).unwrap();
        cache.put(1, entry(1));
        cache.put(2, entry(2));

        assert!(cache.get(1).is_none());
        assert_eq!(cache.get(2), Some(entry(2)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_contains_does_not_count() {
        let cache = ArcBlockCache::new(2).unwrap();
        cache.put(5, entry(5));

        assert!(cache.contains(5));
        assert!(!cache.contains(6));

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = std::sync::Arc::new(ArcBlockCache::new(64).unwrap());

        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for n in 0..200u64 {
                        let block = (n * 8 + t) % 100;
                        if cache.get(block).is_none() {
                            cache.put(block, entry(block));
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert!(stats.entries <= 64);
        assert_eq!(stats.hits + stats.misses, 8 * 200);

        // Whatever survived must carry the value written for that block
        for block in 0..100u64 {
            if let Some(value) = cache.get(block) {
                assert_eq!(value, entry(block));
            }
        }
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache backends for per-block text results
//!
//! The scanner stores each block's serialized result under its block number so
//! that overlapping page requests don't re-read the chain.
//!
//! - [`ArcBlockCache`]: bounded in-memory cache with adaptive replacement (default)
//! - [`NoOpCache`]: disables caching entirely (for testing or specific use cases)
//!
//! The replacement policy itself lives in [`ArcCache`], which knows nothing
//! about blocks and can be used and tested on its own.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blocktext::cache::{ArcBlockCache, NoOpCache};
//! use blocktext::BlockScanner;
//! use std::sync::Arc;
//!
//! // Bounded adaptive cache
//! let cache = ArcBlockCache::new(1_000_000)?;
//! let scanner = BlockScanner::new(source, Arc::new(cache));
//!
//! // No cache (always fetch)
//! let scanner = BlockScanner::new(source, Arc::new(NoOpCache));
//! ```

use std::fmt;

use alloy_primitives::BlockNumber;
use serde::{Deserialize, Serialize};

use crate::types::page::SerializedBlock;

mod arc;
mod block;
mod noop;

pub use arc::{ArcCache, ListLengths};
pub use block::ArcBlockCache;
pub use noop::NoOpCache;

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found)
    pub misses: u64,
    /// Number of entries evicted by the replacement policy
    pub evictions: u64,
    /// Current number of resident entries
    pub entries: usize,
    /// Maximum number of resident entries
    pub capacity: usize,
    /// Current ARC target size for the recency list
    pub target_recency: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, entries={}/{}, p={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.entries,
            self.capacity,
            self.target_recency,
            self.hit_rate()
        )
    }
}

/// Trait for block text cache backends
///
/// Maps a block number to that block's serialized text result. Values are
/// only ever written after a successful extraction, and writing the same block
/// twice stores an equal value.
///
/// # Thread Safety
///
/// Implementations are shared across concurrent requests and must synchronize
/// internally. Operations are brief, so a plain mutex is enough.
pub trait BlockTextCache: Send + Sync {
    /// Retrieves the cached result for `block_number`, counting an access
    fn get(&self, block_number: BlockNumber) -> Option<SerializedBlock>;

    /// Stores the result for `block_number`
    ///
    /// If the cache is full, this may evict another entry.
    fn put(&self, block_number: BlockNumber, value: SerializedBlock);

    /// Returns current cache statistics
    fn stats(&self) -> CacheStats;

    /// Returns a human-readable name for this cache backend
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &'static str;
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! No-operation cache that disables caching entirely

use alloy_primitives::BlockNumber;

use super::{BlockTextCache, CacheStats};
use crate::types::page::SerializedBlock;

/// A no-operation cache that disables caching entirely
///
/// This cache backend always misses and ignores writes, so every scan reads
/// every block from the chain.
///
/// # Examples
///
/// ```rust,ignore
/// use blocktext::cache::NoOpCache;
/// use blocktext::BlockScanner;
/// use std::sync::Arc;
///
/// let scanner = BlockScanner::new(source, Arc::new(NoOpCache));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

impl BlockTextCache for NoOpCache {
    fn get(&self, _block_number: BlockNumber) -> Option<SerializedBlock> {
        None
    }

    fn put(&self, _block_number: BlockNumber, _value: SerializedBlock) {}

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn name(&self) -> &'static str {
        "NoOpCache"
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the block text cache.

/// Errors raised while building a block text cache.
///
/// Cache reads and writes never fail; only construction can.
///
/// # Examples
///
/// ```rust
/// use blocktext::{ArcBlockCache, CacheError};
///
/// match ArcBlockCache::new(0) {
///     Err(CacheError::InvalidCapacity { capacity }) => assert_eq!(capacity, 0),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The configured capacity cannot hold any entry.
    #[error("Invalid cache capacity {capacity}: must be at least 1")]
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
    },
}

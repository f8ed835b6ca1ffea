// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Page assembly over consecutive blocks
//!
//! [`BlockScanner`] walks block numbers upward from a starting block. It
//! serves each block from the result cache when it can, and otherwise fetches
//! the block, extracts its text and caches the result. Blocks without text are
//! skipped and never cached. The walk ends when the page is full, when a block
//! cannot be fetched, or when the caller cancels.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use blocktext::{ArcBlockCache, BlockScanner};
//!
//! let scanner = BlockScanner::new(source, Arc::new(ArcBlockCache::new(1024)?));
//! let page = scanner.scan(46214, 100).await;
//! println!("{}", page.to_json());
//! ```

use std::sync::Arc;

use alloy_primitives::BlockNumber;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn, Instrument};

use crate::cache::BlockTextCache;
use crate::chain::ChainSource;
use crate::errors::ScanError;
use crate::extract::TextExtractor;
use crate::spans;
use crate::types::page::{Page, SerializedBlock};

/// Upper bound on the entries preallocated for one page
const MAX_PREALLOCATED_ENTRIES: usize = 1024;

/// Walks blocks, extracts their text and assembles pages
pub struct BlockScanner<S> {
    source: S,
    cache: Arc<dyn BlockTextCache>,
    extractor: TextExtractor,
}

impl<S: ChainSource> BlockScanner<S> {
    /// Creates a scanner reading from `source` with the standard blacklist
    pub fn new(source: S, cache: Arc<dyn BlockTextCache>) -> Self {
        Self::with_extractor(source, cache, TextExtractor::default())
    }

    /// Creates a scanner with a custom extractor
    pub fn with_extractor(
        source: S,
        cache: Arc<dyn BlockTextCache>,
        extractor: TextExtractor,
    ) -> Self {
        debug!(
            source = source.name(),
            cache = cache.name(),
            "Created block scanner"
        );
        Self {
            source,
            cache,
            extractor,
        }
    }

    /// The result cache shared by every scan
    pub fn cache(&self) -> &Arc<dyn BlockTextCache> {
        &self.cache
    }

    /// The chain this scanner reads from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collects up to `count` non-empty blocks starting at `start`
    ///
    /// Never fails: a block that cannot be fetched ends the walk and the page
    /// holds whatever was gathered before it.
    pub async fn scan(&self, start: BlockNumber, count: usize) -> Page {
        self.scan_until_cancelled(start, count, &CancellationToken::new())
            .await
    }

    /// Like [`scan`](Self::scan), but stops as soon as `shutdown` fires
    ///
    /// An in-flight fetch is abandoned on cancellation and its block is not
    /// cached.
    pub async fn scan_until_cancelled(
        &self,
        start: BlockNumber,
        count: usize,
        shutdown: &CancellationToken,
    ) -> Page {
        let span = spans::scan(start, count);

        let (page, next_block) = self
            .walk(start, count, shutdown)
            .instrument(span.clone())
            .await;

        span.record("returned", page.len());
        if let Some(next) = next_block {
            span.record("next_block", next);
        }

        page
    }

    /// Returns the page and the first block number not examined
    async fn walk(
        &self,
        start: BlockNumber,
        count: usize,
        shutdown: &CancellationToken,
    ) -> (Page, Option<BlockNumber>) {
        let mut page = Page::with_capacity(count.min(MAX_PREALLOCATED_ENTRIES));
        let mut cursor = Some(start);

        while page.len() < count {
            let Some(block_number) = cursor else {
                debug!("Reached the highest block number");
                break;
            };
            if shutdown.is_cancelled() {
                debug!(block_number, "Scan cancelled");
                break;
            }

            if let Some(entry) = self.cache.get(block_number) {
                trace!(block_number, "Serving block from cache");
                page.push(entry);
                cursor = block_number.checked_add(1);
                continue;
            }

            let loaded = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!(block_number, "Scan cancelled during fetch");
                    break;
                }
                loaded = self.load_block(block_number) => loaded,
            };

            match loaded {
                Ok(Some(entry)) => page.push(entry),
                Ok(None) => trace!(block_number, "No text in block"),
                Err(ScanError::Rpc(e)) if e.is_not_found() => {
                    debug!(block_number, "Block not available, ending scan");
                    break;
                }
                Err(e @ ScanError::Rpc(_)) => {
                    warn!(block_number, error = %e, "Block fetch failed, ending scan");
                    break;
                }
                Err(e) => {
                    error!(block_number, error = %e, "Failed to index block, ending scan");
                    break;
                }
            }
            cursor = block_number.checked_add(1);
        }

        (page, cursor)
    }

    /// Fetches, extracts and caches one block
    ///
    /// Returns `Ok(None)` for a block without text.
    async fn load_block(
        &self,
        block_number: BlockNumber,
    ) -> Result<Option<SerializedBlock>, ScanError> {
        let block = self.source.fetch_block(block_number).await?;

        let Some(result) = self.extractor.extract_block(&block) else {
            return Ok(None);
        };

        let entry = result.to_serialized()?;
        self.cache.put(block_number, entry.clone());

        debug!(
            block_number,
            records = result.records.len(),
            "Indexed block"
        );
        Ok(Some(entry))
    }
}

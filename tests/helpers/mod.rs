// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for blocktext integration tests
//!
//! Provides an in-memory chain so scans can be tested without a node.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use alloy_primitives::{BlockNumber, Bytes, TxHash, B256, U256};
use async_trait::async_trait;
use blocktext::{ChainBlock, ChainSource, ChainTransaction, RpcError};

/// Mock ChainSource backed by a map of blocks
///
/// Blocks not in the map are reported as not found. Every call to
/// `fetch_block` is counted per block number.
///
/// # Example
///
/// ```rust,ignore
/// let chain = MockChainSource::new()
///     .with_payloads(10, &[b"hello"])
///     .with_payloads(11, &[b""])
///     .with_failure(12);
///
/// let scanner = BlockScanner::new(Arc::new(chain), cache);
/// ```
#[derive(Default)]
pub struct MockChainSource {
    blocks: BTreeMap<BlockNumber, ChainBlock>,
    failing: HashSet<BlockNumber>,
    stalled: HashSet<BlockNumber>,
    fetches: Mutex<HashMap<BlockNumber, usize>>,
}

impl MockChainSource {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add block `number` with one transaction per payload, in order
    pub fn with_payloads(mut self, number: BlockNumber, payloads: &[&[u8]]) -> Self {
        let transactions = payloads
            .iter()
            .enumerate()
            .map(|(index, payload)| ChainTransaction {
                hash: tx_hash(number, index),
                input: Bytes::copy_from_slice(payload),
            })
            .collect();
        self.blocks.insert(
            number,
            ChainBlock {
                number,
                transactions,
            },
        );
        self
    }

    /// Add block `number` with a single text transaction
    pub fn with_text(self, number: BlockNumber, text: &str) -> Self {
        self.with_payloads(number, &[text.as_bytes()])
    }

    /// Add block `number` with no transactions
    pub fn with_empty_block(mut self, number: BlockNumber) -> Self {
        self.blocks.insert(
            number,
            ChainBlock {
                number,
                transactions: Vec::new(),
            },
        );
        self
    }

    /// Make fetching `number` fail with a transport error
    pub fn with_failure(mut self, number: BlockNumber) -> Self {
        self.failing.insert(number);
        self
    }

    /// Make fetching `number` never complete
    pub fn with_stall(mut self, number: BlockNumber) -> Self {
        self.stalled.insert(number);
        self
    }

    /// How many times `number` has been fetched
    pub fn fetch_count(&self, number: BlockNumber) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(&number)
            .copied()
            .unwrap_or(0)
    }

    /// Total fetches across all block numbers
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ChainSource for MockChainSource {
    async fn fetch_block(&self, number: BlockNumber) -> Result<ChainBlock, RpcError> {
        *self.fetches.lock().unwrap().entry(number).or_default() += 1;

        if self.stalled.contains(&number) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(&number) {
            return Err(RpcError::get_block_failed(
                number,
                std::io::Error::other("connection reset"),
            ));
        }

        self.blocks
            .get(&number)
            .cloned()
            .ok_or(RpcError::BlockNotFound {
                block_number: number,
            })
    }

    fn name(&self) -> &'static str {
        "MockChainSource"
    }
}

/// Deterministic, unique hash for the `index`-th transaction of a block
pub fn tx_hash(block: BlockNumber, index: usize) -> TxHash {
    B256::from(U256::from(block) << 32 | U256::from(index))
}

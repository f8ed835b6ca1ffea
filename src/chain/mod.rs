// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only access to chain blocks
//!
//! The scanner only needs one capability from the node: fetch a block by its
//! number. [`ChainSource`] captures exactly that, so the scanner can run
//! against a JSON-RPC node ([`ProviderChainSource`]) or an in-memory chain in
//! tests.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blocktext::chain::{create_http_provider, ProviderChainSource};
//! use blocktext::ProviderConfig;
//!
//! let provider = create_http_provider(ProviderConfig::new("http://localhost:8545"))?;
//! let source = ProviderChainSource::new(provider);
//! let block = source.fetch_block(46214).await?;
//! println!("{} transactions", block.transactions.len());
//! ```

use alloy_primitives::{BlockNumber, Bytes, TxHash};
use async_trait::async_trait;

use crate::errors::RpcError;

mod head;
mod provider;

pub use head::{ChainHead, HeadWatcher};
pub use provider::{create_http_provider, ProviderChainSource, ProviderConfig};

/// One transaction, reduced to what extraction needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTransaction {
    /// Transaction hash
    pub hash: TxHash,
    /// Raw calldata
    pub input: Bytes,
}

/// A block and its transactions, in block order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainBlock {
    /// Block height
    pub number: BlockNumber,
    /// Transactions in the order they appear in the block
    pub transactions: Vec<ChainTransaction>,
}

/// Read-only "fetch block by number" capability
///
/// # Thread Safety
///
/// Implementations are shared across concurrent scans and must tolerate
/// concurrent reads.
///
/// # Errors
///
/// Return [`RpcError::BlockNotFound`] when the block does not exist (yet), and
/// [`RpcError::GetBlockFailed`] when the read itself failed. The scanner
/// stops on either.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Fetches the block at `number` with its transactions
    async fn fetch_block(&self, number: BlockNumber) -> Result<ChainBlock, RpcError>;

    /// Returns a human-readable name for this source
    ///
    /// Used for logging.
    fn name(&self) -> &'static str {
        "ChainSource"
    }
}

#[async_trait]
impl<S: ChainSource + ?Sized> ChainSource for std::sync::Arc<S> {
    async fn fetch_block(&self, number: BlockNumber) -> Result<ChainBlock, RpcError> {
        (**self).fetch_block(number).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

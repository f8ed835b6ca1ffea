// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for chain source operations.
//!
//! These errors describe why a block could not be read from the node. The
//! scanner treats every variant as the end of the walk for the current page.

/// Errors that can occur while reading blocks from the chain.
///
/// # Examples
///
/// ```rust
/// use blocktext::RpcError;
///
/// let error = RpcError::BlockNotFound { block_number: 19_000_000 };
/// assert_eq!(error.to_string(), "Block not found: 19000000");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The node returned no block at the requested height.
    ///
    /// Usually the block has not been produced yet, or the node has not
    /// synced that far.
    #[error("Block not found: {block_number}")]
    BlockNotFound {
        /// The block number that wasn't found
        block_number: u64,
    },

    /// The block request itself failed.
    ///
    /// This is different from `BlockNotFound`: the node may well have the
    /// block, but the call did not complete (network error, timeout, bad
    /// response).
    #[error("Failed to fetch block {block_number}")]
    GetBlockFailed {
        /// The block number we tried to fetch
        block_number: u64,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to read the current chain height.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured RPC URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block_number: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }

    /// Returns `true` when the node answered but had no such block.
    ///
    /// Callers use this to tell "reached the chain tip" apart from a failed
    /// read when logging; the scanner stops on both.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RpcError::BlockNotFound { .. })
    }
}

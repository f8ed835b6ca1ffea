// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for block scanning.
//!
//! A scan never returns these to its caller. They end the walk early and are
//! logged, and the caller sees a shorter page.

use super::RpcError;

/// Reasons a scan stopped before filling its page.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The next block could not be read from the chain.
    #[error("Chain read failed: {0}")]
    Rpc(#[from] RpcError),

    /// A block's extraction result could not be serialized.
    #[error("Failed to serialize text for block {block_number}")]
    Serialization {
        /// The block whose result failed to serialize
        block_number: u64,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Create a `Serialization` error for a block.
    pub fn serialization(block_number: u64, source: serde_json::Error) -> Self {
        ScanError::Serialization {
            block_number,
            source,
        }
    }
}

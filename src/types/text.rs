// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Extracted text records and per-block results
//!
//! Field names on the wire are fixed (`BlockNum`, `Text`, `Txn`) because the
//! browsing page reads them directly.

use alloy_primitives::{BlockNumber, TxHash};
use serde::{Deserialize, Serialize};

use super::page::SerializedBlock;
use crate::errors::ScanError;

/// Printable text recovered from a single transaction's payload
///
/// The text is never empty; transactions without surviving text produce no
/// record at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    /// The filtered, printable payload text
    #[serde(rename = "Text")]
    pub text: String,
    /// Hash of the transaction the text came from
    #[serde(rename = "Txn")]
    pub txn: TxHash,
}

impl TextRecord {
    pub(crate) fn new(text: String, txn: TxHash) -> Self {
        Self { text, txn }
    }
}

/// All text records found in one block, in transaction order
///
/// Only built for blocks where at least one transaction yielded text.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::B256;
/// use blocktext::{BlockTextResult, TextRecord};
///
/// let result = BlockTextResult::new(
///     5,
///     vec![TextRecord { text: "gm".to_string(), txn: B256::ZERO }],
/// );
/// let json = result.to_serialized().unwrap();
/// assert!(json.as_str().starts_with(r#"{"BlockNum":5,"Text":[{"Text":"gm","Txn":"0x"#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTextResult {
    /// Height of the block
    #[serde(rename = "BlockNum")]
    pub block_number: BlockNumber,
    /// Records in the order their transactions appear in the block
    #[serde(rename = "Text")]
    pub records: Vec<TextRecord>,
}

impl BlockTextResult {
    /// Creates a result for `block_number` from its records
    pub fn new(block_number: BlockNumber, records: Vec<TextRecord>) -> Self {
        Self {
            block_number,
            records,
        }
    }

    /// Renders this result into its cached wire form
    pub fn to_serialized(&self) -> Result<SerializedBlock, ScanError> {
        serde_json::to_string(self)
            .map(SerializedBlock::from)
            .map_err(|e| ScanError::serialization(self.block_number, e))
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Text extraction from transaction payloads
//!
//! Payload bytes are decoded as UTF-8 one code point at a time. Invalid
//! sequences become U+FFFD and decoding carries on, so extraction always
//! terminates. Only printable, non-blacklisted code points survive.
//!
//! # Examples
//!
//! ```rust
//! use alloy_primitives::B256;
//! use blocktext::TextExtractor;
//!
//! let extractor = TextExtractor::default();
//!
//! let record = extractor.extract(B256::ZERO, b"hello \x00world").unwrap();
//! assert_eq!(record.text, "hello world");
//!
//! assert!(extractor.extract(B256::ZERO, &[0xa9, 0x05, 0x9c, 0xbb]).is_none());
//! ```

use alloy_primitives::TxHash;

use crate::chain::ChainBlock;
use crate::types::text::{BlockTextResult, TextRecord};

mod blacklist;

pub use blacklist::{is_printable, GlyphBlacklist};

/// Pulls printable text out of transaction payloads
#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    blacklist: GlyphBlacklist,
}

impl TextExtractor {
    /// Creates an extractor that filters with `blacklist`
    pub fn new(blacklist: GlyphBlacklist) -> Self {
        Self { blacklist }
    }

    /// The blacklist this extractor filters with
    pub fn blacklist(&self) -> &GlyphBlacklist {
        &self.blacklist
    }

    /// Filters `payload` down to its printable text
    ///
    /// The result may be empty.
    pub fn filter_text(&self, payload: &[u8]) -> String {
        decode_lossy(payload)
            .filter(|&c| self.blacklist.admits(c))
            .collect()
    }

    /// Extracts one transaction's text, if any survives filtering
    pub fn extract(&self, txn: TxHash, payload: &[u8]) -> Option<TextRecord> {
        let text = self.filter_text(payload);
        (!text.is_empty()).then(|| TextRecord::new(text, txn))
    }

    /// Extracts every transaction in `block`, keeping transaction order
    ///
    /// Returns `None` when no transaction in the block yields text.
    pub fn extract_block(&self, block: &ChainBlock) -> Option<BlockTextResult> {
        let records: Vec<TextRecord> = block
            .transactions
            .iter()
            .filter_map(|tx| self.extract(tx.hash, &tx.input))
            .collect();

        (!records.is_empty()).then(|| BlockTextResult::new(block.number, records))
    }
}

/// Decodes `payload` as UTF-8, yielding U+FFFD for each invalid run
fn decode_lossy(payload: &[u8]) -> impl Iterator<Item = char> + '_ {
    payload.utf8_chunks().flat_map(|chunk| {
        let invalid = (!chunk.invalid().is_empty()).then_some(char::REPLACEMENT_CHARACTER);
        chunk.valid().chars().chain(invalid)
    })
}

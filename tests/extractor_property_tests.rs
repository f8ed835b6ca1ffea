// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for text extraction
//!
//! These tests use proptest to check that extraction terminates on arbitrary
//! payloads and that whatever survives is printable and not blacklisted.

use alloy_primitives::B256;
use blocktext::extract::is_printable;
use blocktext::{GlyphBlacklist, TextExtractor};
use proptest::prelude::*;

// Payloads mixing valid text with arbitrary bytes
fn arb_payload() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..256),
        ".{0,64}".prop_map(String::into_bytes),
        (".{0,32}", prop::collection::vec(any::<u8>(), 0..32), ".{0,32}").prop_map(
            |(head, noise, tail)| {
                let mut bytes = head.into_bytes();
                bytes.extend(noise);
                bytes.extend(tail.into_bytes());
                bytes
            }
        ),
    ]
}

proptest! {
    /// Property: Output is either absent or non-empty
    #[test]
    fn prop_record_text_is_never_empty(payload in arb_payload()) {
        let extractor = TextExtractor::default();
        if let Some(record) = extractor.extract(B256::ZERO, &payload) {
            prop_assert!(!record.text.is_empty());
        }
    }

    /// Property: Every surviving character is printable and not blacklisted
    #[test]
    fn prop_output_is_printable_and_allowed(payload in arb_payload()) {
        let extractor = TextExtractor::default();
        let blacklist = GlyphBlacklist::standard();

        for c in extractor.filter_text(&payload).chars() {
            prop_assert!(is_printable(c), "{c:?} is not printable");
            prop_assert!(!blacklist.contains(c), "{c:?} is blacklisted");
        }
    }

    /// Property: Filtering is idempotent
    #[test]
    fn prop_filter_is_idempotent(payload in arb_payload()) {
        let extractor = TextExtractor::default();
        let once = extractor.filter_text(&payload);
        let twice = extractor.filter_text(once.as_bytes());
        prop_assert_eq!(once, twice);
    }

    /// Property: Output never has more characters than the payload has bytes
    #[test]
    fn prop_output_no_longer_than_payload(payload in arb_payload()) {
        let extractor = TextExtractor::default();
        prop_assert!(extractor.filter_text(&payload).chars().count() <= payload.len());
    }

    /// Property: Printable ASCII passes through unchanged
    #[test]
    fn prop_printable_ascii_survives(text in "[ -~]{1,64}") {
        let extractor = TextExtractor::default();
        let record = extractor.extract(B256::ZERO, text.as_bytes());
        prop_assert_eq!(record.map(|r| r.text), Some(text));
    }

    /// Property: Stray continuation bytes between two texts are dropped
    #[test]
    fn prop_invalid_bytes_are_dropped(
        head in "[a-z]{1,16}",
        tail in "[a-z]{1,16}",
        noise in prop::collection::vec(0x80u8..=0xbf, 1..8),
    ) {
        let extractor = TextExtractor::default();
        let mut payload = head.clone().into_bytes();
        payload.extend(noise);
        payload.extend(tail.as_bytes());

        prop_assert_eq!(extractor.filter_text(&payload), format!("{head}{tail}"));
    }
}

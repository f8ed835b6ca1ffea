// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for block scanning
//!
//! These tests drive `BlockScanner` against an in-memory chain and check the
//! page contents, cache population and fetch behavior.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use blocktext::{
    ArcBlockCache, BlockScanner, BlockTextCache, BlockTextResult, NoOpCache, SerializedBlock,
};
use helpers::{tx_hash, MockChainSource};
use tokio_util::sync::CancellationToken;

fn scanner_with_capacity(
    chain: MockChainSource,
    capacity: usize,
) -> (Arc<MockChainSource>, BlockScanner<Arc<MockChainSource>>) {
    let chain = Arc::new(chain);
    let cache = Arc::new(ArcBlockCache::new(capacity).unwrap());
    (chain.clone(), BlockScanner::new(chain, cache))
}

fn decode(entry: &SerializedBlock) -> BlockTextResult {
    serde_json::from_str(entry.as_str()).unwrap()
}

/// Test the payload filtering scenario: NUL dropped, empty payload skipped
#[tokio::test]
async fn test_block_with_text_and_empty_payload() {
    let chain = MockChainSource::new().with_payloads(5, &[b"hello \x00world", b""]);
    let (_, scanner) = scanner_with_capacity(chain, 16);

    let page = scanner.scan(5, 1).await;
    assert_eq!(page.len(), 1);

    let result = decode(&page.entries()[0]);
    assert_eq!(result.block_number, 5);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].text, "hello world");
    assert_eq!(result.records[0].txn, tx_hash(5, 0));
}

/// Test the wire format of a page
#[tokio::test]
async fn test_page_json_format() {
    let chain = MockChainSource::new().with_text(1, "gm");
    let (_, scanner) = scanner_with_capacity(chain, 16);

    let json = scanner.scan(1, 1).await.to_json();
    let expected = format!(
        r#"[{{"BlockNum":1,"Text":[{{"Text":"gm","Txn":"{}"}}]}}]"#,
        tx_hash(1, 0)
    );
    assert_eq!(json, expected);
}

/// Test that a missing block ends the scan with what was gathered
#[tokio::test]
async fn test_scan_stops_at_first_missing_block() {
    let chain = MockChainSource::new()
        .with_text(10, "ten")
        .with_text(11, "eleven")
        .with_text(13, "thirteen");
    let (chain, scanner) = scanner_with_capacity(chain, 16);

    let page = scanner.scan(10, 5).await;

    assert_eq!(page.len(), 2);
    assert_eq!(decode(&page.entries()[1]).block_number, 11);
    assert_eq!(chain.fetch_count(12), 1);
    assert_eq!(chain.fetch_count(13), 0, "scan must not look past the gap");
}

/// Test that a transport error is terminal, like a missing block
#[tokio::test]
async fn test_scan_stops_at_rpc_failure() {
    let chain = MockChainSource::new()
        .with_text(0, "zero")
        .with_failure(1)
        .with_text(2, "two");
    let (chain, scanner) = scanner_with_capacity(chain, 16);

    let page = scanner.scan(0, 10).await;

    assert_eq!(page.len(), 1);
    assert_eq!(chain.fetch_count(2), 0);
    assert!(scanner.cache().get(1).is_none());
}

/// Test that a missing start block yields an empty page
#[tokio::test]
async fn test_missing_start_block_returns_empty_page() {
    let (_, scanner) = scanner_with_capacity(MockChainSource::new(), 16);

    let page = scanner.scan(1_000_000, 100).await;
    assert!(page.is_empty());
    assert_eq!(page.to_json(), "[]");
}

/// Test that a zero count fetches nothing
#[tokio::test]
async fn test_zero_count_fetches_nothing() {
    let chain = MockChainSource::new().with_text(0, "zero");
    let (chain, scanner) = scanner_with_capacity(chain, 16);

    assert_eq!(scanner.scan(0, 0).await.to_json(), "[]");
    assert_eq!(chain.total_fetches(), 0);
}

/// Test that empty blocks are skipped, not shown, and never cached
#[tokio::test]
async fn test_empty_blocks_are_skipped_and_not_cached() {
    let chain = MockChainSource::new()
        .with_text(1, "one")
        .with_empty_block(2)
        .with_payloads(3, &[b"\x01\x02\xff"])
        .with_text(4, "four");
    let (chain, scanner) = scanner_with_capacity(chain, 16);

    let page = scanner.scan(1, 2).await;
    let blocks: Vec<u64> = page.entries().iter().map(|e| decode(e).block_number).collect();
    assert_eq!(blocks, vec![1, 4]);

    assert!(scanner.cache().get(2).is_none());
    assert!(scanner.cache().get(3).is_none());

    // Empty blocks are read again on the next scan
    scanner.scan(1, 2).await;
    assert_eq!(chain.fetch_count(2), 2);
    assert_eq!(chain.fetch_count(1), 1);
}

/// Test that repeated scans are byte-identical and served from cache
#[tokio::test]
async fn test_repeated_scan_is_identical_and_cached() {
    let chain = MockChainSource::new()
        .with_text(7, "seven")
        .with_text(8, "eight")
        .with_text(9, "nine");
    let (chain, scanner) = scanner_with_capacity(chain, 16);

    let first = scanner.scan(7, 3).await;
    let fetches_after_first = chain.total_fetches();
    let second = scanner.scan(7, 3).await;

    assert_eq!(first.to_json(), second.to_json());
    assert_eq!(chain.total_fetches(), fetches_after_first);
    assert_eq!(scanner.cache().stats().hits, 3);
}

/// Test that an overlapping scan only fetches the new blocks
#[tokio::test]
async fn test_overlapping_scan_fetches_only_new_blocks() {
    let mut chain = MockChainSource::new();
    for n in 0..6 {
        chain = chain.with_text(n, &format!("block {n}"));
    }
    let (chain, scanner) = scanner_with_capacity(chain, 16);

    scanner.scan(0, 4).await;
    let page = scanner.scan(2, 4).await;

    assert_eq!(page.len(), 4);
    for n in 0..6 {
        assert_eq!(chain.fetch_count(n), 1, "block {n} fetched more than once");
    }
}

/// Test that block numbers on a page are strictly increasing
#[tokio::test]
async fn test_page_block_numbers_strictly_increase() {
    let mut chain = MockChainSource::new();
    for n in 0..40u64 {
        chain = if n % 3 == 0 {
            chain.with_empty_block(n)
        } else {
            chain.with_text(n, "x")
        };
    }
    let (_, scanner) = scanner_with_capacity(chain, 8);

    let page = scanner.scan(0, 20).await;
    let blocks: Vec<u64> = page.entries().iter().map(|e| decode(e).block_number).collect();

    assert_eq!(blocks.len(), 20);
    assert!(blocks.windows(2).all(|w| w[0] < w[1]));
}

/// Test the capacity-one scenario: the later block evicts the earlier
#[tokio::test]
async fn test_capacity_one_keeps_latest_block() {
    let chain = MockChainSource::new().with_text(1, "one").with_text(2, "two");
    let (_, scanner) = scanner_with_capacity(chain, 1);

    scanner.scan(1, 2).await;

    assert!(scanner.cache().get(1).is_none());
    assert!(scanner.cache().get(2).is_some());
}

/// Test that transaction order is preserved within a block
#[tokio::test]
async fn test_records_keep_transaction_order() {
    let chain = MockChainSource::new().with_payloads(3, &[b"first", b"\x00", b"third"]);
    let (_, scanner) = scanner_with_capacity(chain, 4);

    let result = decode(&scanner.scan(3, 1).await.entries()[0]);
    let texts: Vec<&str> = result.records.iter().map(|r| r.text.as_str()).collect();

    assert_eq!(texts, vec!["first", "third"]);
    assert_eq!(result.records[1].txn, tx_hash(3, 2));
}

/// Test that cancellation interrupts an in-flight fetch
#[tokio::test]
async fn test_cancellation_interrupts_stalled_fetch() {
    let chain = MockChainSource::new()
        .with_text(0, "zero")
        .with_stall(1);
    let (_, scanner) = scanner_with_capacity(chain, 4);
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        })
    };

    let page = tokio::time::timeout(
        Duration::from_secs(5),
        scanner.scan_until_cancelled(0, 10, &token),
    )
    .await
    .expect("scan should stop once cancelled");

    canceller.await.unwrap();
    assert_eq!(page.len(), 1);
    assert!(scanner.cache().get(1).is_none());
}

/// Test that scanning works with caching disabled
#[tokio::test]
async fn test_noop_cache_always_fetches() {
    let chain = Arc::new(MockChainSource::new().with_text(0, "zero"));
    let scanner = BlockScanner::new(chain.clone(), Arc::new(NoOpCache));

    scanner.scan(0, 1).await;
    scanner.scan(0, 1).await;

    assert_eq!(chain.fetch_count(0), 2);
}

/// Test that concurrent scans of the same range agree
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scans_agree() {
    let mut chain = MockChainSource::new();
    for n in 0..50u64 {
        chain = chain.with_text(n, &format!("payload {n}"));
    }
    let (_, scanner) = scanner_with_capacity(chain, 64);
    let scanner = Arc::new(scanner);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let scanner = scanner.clone();
            tokio::spawn(async move { scanner.scan(0, 50).await.to_json() })
        })
        .collect();

    let mut pages = Vec::new();
    for handle in handles {
        pages.push(handle.await.unwrap());
    }

    assert!(pages.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(scanner.cache().stats().entries, 50);
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for blocktext operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> T {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param))
//!     .await
//! }
//! ```

use alloy_primitives::BlockNumber;
use tracing::{Level, Span};

/// Create span for scanning one page of blocks.
///
/// Parent: http_request span (or None when called directly)
/// Children: fetch_block spans (one per cache miss)
#[inline]
pub(crate) fn scan(start_block: BlockNumber, count: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "blocktext.scan",
        start_block = start_block,
        count = count,
        returned = tracing::field::Empty,
        next_block = tracing::field::Empty,
    )
}

/// Create span for fetching a single block from the node.
///
/// Parent: scan span
/// Children: rpc_call span from the transport logging layer
#[inline]
pub(crate) fn fetch_block(block_number: BlockNumber) -> Span {
    tracing::debug_span!("blocktext.fetch_block", block_number = block_number)
}

/// Create span for one inbound HTTP request.
///
/// Parent: None (root span for this request)
/// Children: scan span
#[inline]
pub(crate) fn http_request(method: &str, uri: &str, from: &str) -> Span {
    tracing::info_span!(
        "blocktext.http_request",
        method = %method,
        uri = %uri,
        from = %from,
    )
}

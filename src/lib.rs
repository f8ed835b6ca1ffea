// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Human-readable text hidden in EVM transaction payloads
//!
//! `blocktext` walks blocks of an EVM chain, keeps the printable part of each
//! transaction's calldata and serves the results page by page. Per-block
//! results are kept in a bounded adaptive replacement cache so overlapping
//! page requests do not re-read the chain.
//!
//! The pipeline:
//!
//! - [`TextExtractor`] turns payload bytes into filtered printable text
//! - [`BlockScanner`] walks block numbers, consults the cache and fetches
//!   from a [`ChainSource`] on a miss
//! - [`ArcBlockCache`] stores serialized per-block results
//! - [`Page::to_json`] renders a page for the wire
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use blocktext::{create_http_provider, ArcBlockCache, BlockScanner, ProviderChainSource, ProviderConfig};
//!
//! let provider = create_http_provider(ProviderConfig::new("http://localhost:8545"))?;
//! let scanner = BlockScanner::new(
//!     ProviderChainSource::new(provider),
//!     Arc::new(ArcBlockCache::new(1 << 20)?),
//! );
//!
//! let page = scanner.scan(46214, 100).await;
//! println!("{}", page.to_json());
//! ```

pub mod api;
pub mod bootstrap;
pub mod cache;
pub mod chain;
pub mod config;
pub mod errors;
pub mod extract;
mod scanner;
mod spans;
pub mod transport;
pub mod types;

pub use cache::{ArcBlockCache, BlockTextCache, CacheStats, NoOpCache};
pub use chain::{
    create_http_provider, ChainBlock, ChainSource, ChainTransaction, ProviderChainSource,
    ProviderConfig,
};
pub use config::{BlocktextConfig, BlocktextConfigBuilder};
pub use errors::{BlocktextError, CacheError, ConfigError, QueryError, RpcError, ScanError};
pub use extract::{GlyphBlacklist, TextExtractor};
pub use scanner::BlockScanner;
pub use types::page::{Page, SerializedBlock};
pub use types::text::{BlockTextResult, TextRecord};

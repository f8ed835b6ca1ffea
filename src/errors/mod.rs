// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the blocktext library.
//!
//! Each concern has its own error type:
//! - [`CacheError`] - Cache construction failures
//! - [`ConfigError`] - Configuration loading and validation
//! - [`QueryError`] - Malformed HTTP query parameters
//! - [`RpcError`] - Chain source failures
//! - [`ScanError`] - Reasons a scan ended early (logged, never returned)
//!
//! [`BlocktextError`] wraps all of them so that startup code can use `?`
//! across module boundaries.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blocktext::{ArcBlockCache, BlocktextConfig, BlocktextError};
//!
//! fn build() -> Result<ArcBlockCache, BlocktextError> {
//!     let config = BlocktextConfig::from_env()?;
//!     let cache = ArcBlockCache::new(config.cache_capacity)?;
//!     Ok(cache)
//! }
//! ```

mod cache;
mod config;
mod query;
mod rpc;
mod scan;

pub use cache::CacheError;
pub use config::ConfigError;
pub use query::QueryError;
pub use rpc::RpcError;
pub use scan::ScanError;

/// Unified error type for all blocktext operations.
#[derive(Debug, thiserror::Error)]
pub enum BlocktextError {
    /// Error building the result cache.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error loading configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error talking to the chain.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error during a scan.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Defaults and environment variable names
//!
//! Centralizes the service's magic numbers so the builder, the environment
//! loader and the tests agree on them.

use std::time::Duration;

use alloy_primitives::BlockNumber;

/// JSON-RPC endpoint of a local node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Address the HTTP server binds to
pub const DEFAULT_LISTEN_ADDR: &str = "localhost:80";

/// Number of non-empty blocks returned per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Maximum number of cached block results (10 × 1024 × 1024)
pub const DEFAULT_CACHE_CAPACITY: usize = 10 * 1024 * 1024;

/// Block the home page starts browsing from
pub const DEFAULT_HOME_BLOCK: BlockNumber = 46214;

/// How often the head watcher polls for a new chain head
pub const DEFAULT_HEAD_POLL_INTERVAL: Duration = Duration::from_secs(12);

/// Deadline for assembling one `/text` page
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable names read by [`BlocktextConfig::from_env`](super::BlocktextConfig::from_env)
pub mod env {
    /// JSON-RPC endpoint URL
    pub const RPC_URL: &str = "BLOCKTEXT_RPC_URL";
    /// HTTP listen address (`host:port`)
    pub const LISTEN_ADDR: &str = "BLOCKTEXT_LISTEN_ADDR";
    /// Page size
    pub const PAGE_SIZE: &str = "BLOCKTEXT_PAGE_SIZE";
    /// Cache capacity in entries
    pub const CACHE_SIZE: &str = "BLOCKTEXT_CACHE_SIZE";
    /// Home page start block
    pub const HOME_BLOCK: &str = "BLOCKTEXT_HOME_BLOCK";
    /// Path of a file to append logs to
    pub const LOG_FILE: &str = "BLOCKTEXT_LOG_FILE";
    /// Emit JSON log lines when `true`
    pub const LOG_JSON: &str = "BLOCKTEXT_LOG_JSON";
    /// Seconds a `/text` request may spend scanning
    pub const REQUEST_TIMEOUT_SECS: &str = "BLOCKTEXT_REQUEST_TIMEOUT_SECS";
    /// Maximum RPC requests per second (0 disables limiting)
    pub const RPC_RATE_LIMIT: &str = "BLOCKTEXT_RPC_RATE_LIMIT";
}

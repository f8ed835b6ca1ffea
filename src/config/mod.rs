// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the blocktext service
//!
//! Controls which node is queried, where the HTTP server listens, how large
//! pages and the result cache are, and how logs are emitted.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use blocktext::BlocktextConfig;
//!
//! // Local node on :8545, server on localhost:80, pages of 100 blocks
//! let config = BlocktextConfig::default();
//! assert_eq!(config.page_size, 100);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use blocktext::BlocktextConfigBuilder;
//!
//! let config = BlocktextConfigBuilder::new()
//!     .rpc_url("https://eth.example.org")
//!     .listen_addr("0.0.0.0:8080")
//!     .page_size(25)
//!     .rate_limit_per_second(10)
//!     .build();
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! use blocktext::BlocktextConfig;
//!
//! // Reads `.env` first, then BLOCKTEXT_* variables
//! let config = BlocktextConfig::from_env()?;
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::BlockNumber;

use crate::chain::ProviderConfig;
use crate::errors::ConfigError;

pub mod constants;

use constants::env;

/// Configuration for the blocktext service
///
/// Use [`BlocktextConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct BlocktextConfig {
    /// JSON-RPC endpoint of the node
    /// Default: `http://localhost:8545`
    pub rpc_url: String,

    /// Address the HTTP server binds to
    /// Default: `localhost:80`
    pub listen_addr: String,

    /// Maximum number of non-empty blocks per page
    /// Default: 100
    pub page_size: usize,

    /// Maximum number of cached block results
    /// Default: 10 485 760
    pub cache_capacity: usize,

    /// Block the home page starts from
    /// Default: 46214
    pub home_block: BlockNumber,

    /// How often the head watcher polls the node
    /// Default: 12 seconds
    pub head_poll_interval: Duration,

    /// Time a `/text` request may spend scanning before the partial page is
    /// returned
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Maximum RPC requests per second
    /// Default: None (no limit)
    pub rate_limit_per_second: Option<u32>,

    /// File to append logs to instead of stdout
    /// Default: None
    pub log_file: Option<PathBuf>,

    /// Emit JSON log lines
    /// Default: false
    pub json_logs: bool,
}

impl Default for BlocktextConfig {
    fn default() -> Self {
        Self {
            rpc_url: constants::DEFAULT_RPC_URL.to_string(),
            listen_addr: constants::DEFAULT_LISTEN_ADDR.to_string(),
            page_size: constants::DEFAULT_PAGE_SIZE,
            cache_capacity: constants::DEFAULT_CACHE_CAPACITY,
            home_block: constants::DEFAULT_HOME_BLOCK,
            head_poll_interval: constants::DEFAULT_HEAD_POLL_INTERVAL,
            request_timeout: constants::DEFAULT_REQUEST_TIMEOUT,
            rate_limit_per_second: None,
            log_file: None,
            json_logs: false,
        }
    }
}

impl BlocktextConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Unset variables keep their defaults. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the resulting
    /// configuration is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Example
    ///
    /// ```rust
    /// use blocktext::BlocktextConfig;
    /// use std::collections::HashMap;
    ///
    /// let vars = HashMap::from([("BLOCKTEXT_PAGE_SIZE", "10")]);
    /// let config = BlocktextConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.page_size, 10);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = BlocktextConfigBuilder::new();

        if let Some(url) = lookup(env::RPC_URL) {
            builder = builder.rpc_url(url);
        }
        if let Some(addr) = lookup(env::LISTEN_ADDR) {
            builder = builder.listen_addr(addr);
        }
        if let Some(size) = parse_var(&lookup, env::PAGE_SIZE)? {
            builder = builder.page_size(size);
        }
        if let Some(capacity) = parse_var(&lookup, env::CACHE_SIZE)? {
            builder = builder.cache_capacity(capacity);
        }
        if let Some(block) = parse_var(&lookup, env::HOME_BLOCK)? {
            builder = builder.home_block(block);
        }
        if let Some(secs) = parse_var(&lookup, env::REQUEST_TIMEOUT_SECS)? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(path) = lookup(env::LOG_FILE).filter(|p| !p.is_empty()) {
            builder = builder.log_file(path);
        }
        if let Some(raw) = lookup(env::LOG_JSON) {
            builder = builder.json_logs(parse_bool(env::LOG_JSON, &raw)?);
        }
        if let Some(rate) = parse_var::<u32, _>(&lookup, env::RPC_RATE_LIMIT)? {
            // 0 means unlimited
            if rate > 0 {
                builder = builder.rate_limit_per_second(rate);
            }
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be served
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] for a zero page size, cache
    /// capacity or request timeout, or an empty listen address, and
    /// [`ConfigError::InvalidValue`] for an unparseable RPC URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::invalid_setting(
                env::PAGE_SIZE,
                "page size must be positive",
            ));
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::invalid_setting(
                env::CACHE_SIZE,
                "cache capacity must be positive",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::invalid_setting(
                env::REQUEST_TIMEOUT_SECS,
                "request timeout must be positive",
            ));
        }
        if self.listen_addr.trim().is_empty() {
            return Err(ConfigError::invalid_setting(
                env::LISTEN_ADDR,
                "listen address must not be empty",
            ));
        }
        url::Url::parse(&self.rpc_url)
            .map_err(|e| ConfigError::invalid_value(env::RPC_URL, self.rpc_url.as_str(), e))?;
        Ok(())
    }

    /// Provider settings derived from this configuration
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(self.rpc_url.clone()).with_rate_limit_opt(self.rate_limit_per_second)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::invalid_value(key, raw, e)),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::invalid_value(
            key,
            raw,
            "expected true or false",
        )),
    }
}

/// Builder for [`BlocktextConfig`]
///
/// # Example
///
/// ```rust
/// use blocktext::BlocktextConfigBuilder;
///
/// let config = BlocktextConfigBuilder::new()
///     .cache_capacity(4096)
///     .home_block(1)
///     .build();
///
/// assert_eq!(config.cache_capacity, 4096);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlocktextConfigBuilder {
    config: BlocktextConfig,
}

impl BlocktextConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node's JSON-RPC URL
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.rpc_url = url.into();
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the number of non-empty blocks per page
    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the result cache capacity
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Set the home page start block
    pub fn home_block(mut self, block: BlockNumber) -> Self {
        self.config.home_block = block;
        self
    }

    /// Set the head watcher poll interval
    pub fn head_poll_interval(mut self, interval: Duration) -> Self {
        self.config.head_poll_interval = interval;
        self
    }

    /// Set the deadline for one `/text` request
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Limit RPC requests per second
    pub fn rate_limit_per_second(mut self, requests: u32) -> Self {
        self.config.rate_limit_per_second = Some(requests);
        self
    }

    /// Append logs to `path` instead of stdout
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = Some(path.into());
        self
    }

    /// Emit JSON log lines
    pub fn json_logs(mut self, enabled: bool) -> Self {
        self.config.json_logs = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> BlocktextConfig {
        self.config
    }
}

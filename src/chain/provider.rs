// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! JSON-RPC chain source backed by an Alloy provider

use std::future::IntoFuture;

use alloy_consensus::Transaction as _;
use alloy_network::TransactionResponse as _;
use alloy_primitives::BlockNumber;
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_rpc_client::ClientBuilder;
use alloy_rpc_types::BlockNumberOrTag;
use async_trait::async_trait;
use tracing::{debug, Instrument};

use super::{ChainBlock, ChainSource, ChainTransaction};
use crate::errors::RpcError;
use crate::spans;
use crate::transport::{LoggingLayer, RateLimitLayer};

/// Connection settings for the node's JSON-RPC endpoint
///
/// # Examples
///
/// ```rust
/// use blocktext::ProviderConfig;
///
/// let config = ProviderConfig::new("http://localhost:8545").with_rate_limit(20);
/// assert_eq!(config.rate_limit_per_second, Some(20));
/// ```
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Maximum requests per second sent to the node, if limited
    pub rate_limit_per_second: Option<u32>,
    /// Log request/response payloads at trace level
    pub log_payloads: bool,
}

impl ProviderConfig {
    /// Create a configuration for `url` with no rate limit
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rate_limit_per_second: None,
            log_payloads: false,
        }
    }

    /// Limit requests to the node to `requests_per_second`
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit_per_second = Some(requests_per_second);
        self
    }

    /// Set or clear the rate limit
    #[must_use]
    pub fn with_rate_limit_opt(mut self, requests_per_second: Option<u32>) -> Self {
        self.rate_limit_per_second = requests_per_second;
        self
    }

    /// Log full request and response payloads
    #[must_use]
    pub fn with_payload_logging(mut self) -> Self {
        self.log_payloads = true;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(crate::config::constants::DEFAULT_RPC_URL)
    }
}

/// Create an HTTP provider for the node
///
/// Every request passes through a [`LoggingLayer`] and a [`RateLimitLayer`]
/// (which is a pass-through when no limit is configured).
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<RootProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    let logging = if config.log_payloads {
        LoggingLayer::new().verbose()
    } else {
        LoggingLayer::new()
    };

    let client = ClientBuilder::default()
        .layer(logging)
        .layer(RateLimitLayer::from_rate(config.rate_limit_per_second))
        .http(url);

    // No fillers: this provider only reads
    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_client(client))
}

/// [`ChainSource`] that reads full blocks over JSON-RPC
#[derive(Debug, Clone)]
pub struct ProviderChainSource<P> {
    provider: P,
}

impl<P: Provider> ProviderChainSource<P> {
    /// Wrap `provider` as a chain source
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: Provider> ChainSource for ProviderChainSource<P> {
    async fn fetch_block(&self, number: BlockNumber) -> Result<ChainBlock, RpcError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .full()
            .into_future()
            .instrument(spans::fetch_block(number))
            .await
            .map_err(|e| RpcError::get_block_failed(number, e))?
            .ok_or(RpcError::BlockNotFound {
                block_number: number,
            })?;

        let transactions: Vec<ChainTransaction> = block
            .transactions
            .txns()
            .map(|tx| ChainTransaction {
                hash: tx.tx_hash(),
                input: tx.input().clone(),
            })
            .collect();

        debug!(
            block_number = number,
            transactions = transactions.len(),
            "Fetched block"
        );

        Ok(ChainBlock {
            number,
            transactions,
        })
    }

    fn name(&self) -> &'static str {
        "ProviderChainSource"
    }
}

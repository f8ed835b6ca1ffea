// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for RPC rate limiting configuration
//!
//! These tests validate that the rate limit read from the environment reaches
//! the provider configuration and the transport layer.

use std::collections::HashMap;
use std::time::Duration;

use blocktext::transport::RateLimitLayer;
use blocktext::{create_http_provider, BlocktextConfig, BlocktextConfigBuilder, ProviderConfig};

fn config_from(vars: &[(&str, &str)]) -> BlocktextConfig {
    let vars: HashMap<&str, &str> = vars.iter().copied().collect();
    BlocktextConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

/// Test that the default configuration does not limit RPC traffic
#[test]
fn test_default_config_is_unlimited() {
    let provider = BlocktextConfig::default().to_provider_config();

    assert_eq!(provider.rate_limit_per_second, None);
    assert_eq!(
        RateLimitLayer::from_rate(provider.rate_limit_per_second).interval(),
        None
    );
}

/// Test that a rate from the environment becomes request spacing
#[test]
fn test_env_rate_limit_reaches_transport() {
    let config = config_from(&[("BLOCKTEXT_RPC_RATE_LIMIT", "20")]);
    let provider = config.to_provider_config();

    assert_eq!(provider.rate_limit_per_second, Some(20));
    assert_eq!(
        RateLimitLayer::from_rate(provider.rate_limit_per_second).interval(),
        Some(Duration::from_millis(50))
    );
}

/// Test that an unparseable rate is a configuration error
#[test]
fn test_invalid_rate_limit_rejected() {
    let result = BlocktextConfig::from_lookup(|key| {
        (key == "BLOCKTEXT_RPC_RATE_LIMIT").then(|| "fast".to_string())
    });
    assert!(result.is_err());
}

/// Test that the builder and provider config agree
#[test]
fn test_builder_rate_limit_matches_provider_config() {
    let config = BlocktextConfigBuilder::new()
        .rpc_url("http://127.0.0.1:8545")
        .rate_limit_per_second(4)
        .build();

    let expected = ProviderConfig::new("http://127.0.0.1:8545").with_rate_limit(4);
    let actual = config.to_provider_config();

    assert_eq!(actual.url, expected.url);
    assert_eq!(actual.rate_limit_per_second, expected.rate_limit_per_second);
}

/// Test that a provider can be built with and without a limit
#[tokio::test]
async fn test_provider_construction() {
    assert!(create_http_provider(ProviderConfig::new("http://127.0.0.1:8545")).is_ok());
    assert!(
        create_http_provider(ProviderConfig::new("http://127.0.0.1:8545").with_rate_limit(10))
            .is_ok()
    );
    assert!(create_http_provider(ProviderConfig::new("not a url")).is_err());
}

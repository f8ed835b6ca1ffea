// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Service wiring for the `blocktext` binary

use std::fs::OpenOptions;
use std::sync::Arc;

use alloy_provider::RootProvider;
use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::api::{self, AppState};
use crate::cache::{ArcBlockCache, BlockTextCache};
use crate::chain::{create_http_provider, HeadWatcher, ProviderChainSource};
use crate::config::BlocktextConfig;
use crate::errors::BlocktextError;
use crate::scanner::BlockScanner;

/// Installs the global tracing subscriber
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Logs go to
/// `config.log_file` (appended) when set, otherwise to stdout.
pub fn init_tracing(config: &BlocktextConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.log_file.is_none())
        .with_writer(writer);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

/// Main entry point for the application.
///
/// Serves until Ctrl-C, then stops accepting requests, cancels running scans
/// and waits for the head watcher to exit.
pub async fn run(config: BlocktextConfig) -> anyhow::Result<()> {
    let (cache, provider) = build_backends(&config)?;

    info!(
        rpc_url = %config.rpc_url,
        listen_addr = %config.listen_addr,
        page_size = config.page_size,
        cache_capacity = config.cache_capacity,
        home_block = config.home_block,
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        "Starting blocktext"
    );
    let scanner = Arc::new(BlockScanner::new(
        ProviderChainSource::new(provider.clone()),
        cache.clone(),
    ));

    let shutdown = CancellationToken::new();

    let watcher = HeadWatcher::new(provider, config.head_poll_interval);
    let head = watcher.head();
    let watcher_task = tokio::spawn(watcher.run(shutdown.clone()));

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    let state = AppState {
        scanner,
        page_size: config.page_size,
        home_block: config.home_block,
        request_timeout: config.request_timeout,
        shutdown: shutdown.clone(),
    };
    let served = api::serve(listener, api::router(state), shutdown.clone()).await;

    shutdown.cancel();
    if let Err(e) = watcher_task.await {
        warn!(error = %e, "Chain head watcher did not stop cleanly");
    }

    info!(
        stats = %cache.stats(),
        last_head = ?head.latest(),
        "Final cache statistics"
    );

    served.context("HTTP server failed")
}

/// Validates `config` and builds the result cache and the node provider
///
/// Fails before anything is served on an unusable configuration.
fn build_backends(
    config: &BlocktextConfig,
) -> Result<(Arc<dyn BlockTextCache>, RootProvider), BlocktextError> {
    config.validate()?;

    let cache: Arc<dyn BlockTextCache> = Arc::new(ArcBlockCache::new(config.cache_capacity)?);
    let provider = create_http_provider(config.to_provider_config())?;

    Ok((cache, provider))
}

async fn cancel_on_ctrl_c(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl-C");
            return;
        }
    }
    shutdown.cancel();
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain head tracking
//!
//! Polls the node for its latest block number and logs each advance while the
//! server runs. The scanner never consults the head; it keeps walking until a
//! fetch fails.

use std::time::Duration;

use alloy_primitives::BlockNumber;
use alloy_provider::Provider;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::RpcError;

/// Polls the node for new chain heads
///
/// # Examples
///
/// ```rust,ignore
/// use blocktext::chain::HeadWatcher;
/// use tokio_util::sync::CancellationToken;
/// use std::time::Duration;
///
/// let watcher = HeadWatcher::new(provider, Duration::from_secs(12));
/// let head = watcher.head();
/// let shutdown = CancellationToken::new();
/// tokio::spawn(watcher.run(shutdown.clone()));
///
/// // Later
/// println!("latest block: {:?}", head.latest());
/// ```
pub struct HeadWatcher<P> {
    provider: P,
    interval: Duration,
    head: watch::Sender<Option<BlockNumber>>,
}

/// Last chain head seen by a [`HeadWatcher`]
///
/// Clones observe the same value. Stays readable after the watcher exits.
#[derive(Debug, Clone)]
pub struct ChainHead(watch::Receiver<Option<BlockNumber>>);

impl ChainHead {
    /// The latest block number, or `None` before the first successful poll
    pub fn latest(&self) -> Option<BlockNumber> {
        *self.0.borrow()
    }
}

impl<P: Provider> HeadWatcher<P> {
    /// Create a watcher polling `provider` every `interval`
    pub fn new(provider: P, interval: Duration) -> Self {
        let (head, _) = watch::channel(None);
        Self {
            provider,
            interval,
            head,
        }
    }

    /// Handle to the most recently observed head
    pub fn head(&self) -> ChainHead {
        ChainHead(self.head.subscribe())
    }

    /// Reads the node's current block number once
    pub async fn poll(&self) -> Result<BlockNumber, RpcError> {
        let number = self
            .provider
            .get_block_number()
            .await
            .map_err(RpcError::get_block_number_failed)?;

        let mut advanced = false;
        self.head.send_modify(|head| {
            advanced = head.is_none_or(|previous| number > previous);
            *head = Some(number);
        });

        if advanced {
            info!(block_number = number, "Chain head advanced");
        } else {
            debug!(block_number = number, "Chain head unchanged");
        }
        Ok(number)
    }

    /// Polls until `shutdown` is cancelled
    ///
    /// Poll failures are logged and retried on the next tick.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(interval_ms = self.interval.as_millis() as u64, "Watching chain head");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Stopping chain head watcher");
                    return;
                }
                _ = ticker.tick() => {}
            }

            if let Err(e) = self.poll().await {
                warn!(error = %e, "Failed to poll chain head");
            }
        }
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based rate limiting layer for the node's JSON-RPC transport.
//!
//! A scan can fetch hundreds of consecutive blocks for one page. Spacing the
//! requests keeps a shared or hosted node from throttling the server.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use parking_lot::Mutex;
use tokio::time::Instant;
use tower::Layer;

/// A Tower layer that spaces requests evenly.
///
/// Requests are assigned consecutive time slots `interval` apart and wait
/// until their slot begins. There are no bursts: with a limit of 10 per
/// second, requests start at least 100ms apart.
///
/// A layer built without a rate passes every request straight through.
///
/// # Example
///
/// ```rust
/// use blocktext::transport::RateLimitLayer;
/// use std::time::Duration;
///
/// let layer = RateLimitLayer::per_second(10);
/// assert_eq!(layer.interval(), Some(Duration::from_millis(100)));
///
/// assert_eq!(RateLimitLayer::from_rate(None).interval(), None);
/// ```
#[derive(Clone, Debug)]
pub struct RateLimitLayer {
    pacer: Option<Arc<Pacer>>,
}

impl RateLimitLayer {
    /// Allow at most `requests` per second.
    ///
    /// A rate of zero disables limiting.
    pub fn per_second(requests: u32) -> Self {
        Self::from_rate(Some(requests))
    }

    /// Allow at most one request per `interval`.
    pub fn with_min_delay(interval: Duration) -> Self {
        Self {
            pacer: Some(Arc::new(Pacer::new(interval))),
        }
    }

    /// Limit to `requests` per second, or pass through when `None` or zero.
    pub fn from_rate(requests: Option<u32>) -> Self {
        match requests.filter(|r| *r > 0) {
            Some(r) => Self::with_min_delay(Duration::from_secs(1) / r),
            None => Self { pacer: None },
        }
    }

    /// The enforced spacing between requests, if any.
    pub fn interval(&self) -> Option<Duration> {
        self.pacer.as_ref().map(|p| p.interval)
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RateLimitService {
            service,
            pacer: self.pacer.clone(),
        }
    }
}

/// Hands out request start times.
#[derive(Debug)]
struct Pacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Reserves the next slot and returns how long to wait for it.
    fn reserve(&self) -> Duration {
        let now = Instant::now();
        let mut next_slot = self.next_slot.lock();
        let slot = match *next_slot {
            Some(slot) if slot > now => slot,
            _ => now,
        };
        *next_slot = Some(slot + self.interval);
        slot.saturating_duration_since(now)
    }
}

/// A Tower service that delays requests to their reserved slot.
#[derive(Clone, Debug)]
pub struct RateLimitService<S> {
    service: S,
    pacer: Option<Arc<Pacer>>,
}

impl<S, Request> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let wait = self.pacer.as_ref().map(|p| p.reserve());
        let mut service = self.service.clone();

        Box::pin(async move {
            if let Some(wait) = wait.filter(|w| !w.is_zero()) {
                tokio::time::sleep(wait).await;
            }
            service.call(request).await
        })
    }
}

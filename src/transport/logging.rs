// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for the node's JSON-RPC transport.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

/// A Tower layer that records every RPC call.
///
/// Each call gets a `blocktext.rpc_call` span carrying the method name. Timing
/// is logged at debug level and failures at warn level. In verbose mode the
/// full request and response packets are logged at trace level.
///
/// # Example
///
/// ```rust,ignore
/// use blocktext::transport::LoggingLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::new())
///     .http(rpc_url);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingLayer {
    verbose: bool,
}

impl LoggingLayer {
    /// Log method names, timing and errors only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log request and response payloads.
    ///
    /// Full blocks are large; use for debugging only.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            verbose: self.verbose,
        }
    }
}

/// A Tower service that logs RPC requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    verbose: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let verbose = self.verbose;
        let method = method_name(&request);
        let span = tracing::debug_span!("blocktext.rpc_call", method = %method);

        if verbose {
            trace!(parent: &span, request = ?request, "RPC request");
        }
        let call = self.service.call(request);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = call.await;
                let elapsed_ms = start.elapsed().as_millis() as u64;

                match &result {
                    Ok(response) if verbose => {
                        trace!(response = ?response, elapsed_ms, "RPC response");
                    }
                    Ok(_) => debug!(elapsed_ms, "RPC response"),
                    Err(e) => warn!(error = %e, elapsed_ms, "RPC call failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// The JSON-RPC method name of a request packet.
fn method_name(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}

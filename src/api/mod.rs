// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP interface
//!
//! | Route     | Response                                            |
//! |-----------|-----------------------------------------------------|
//! | `/text`   | JSON page of block texts from `?blocknum` (default 0) |
//! | `/`       | browsing page starting at the home block            |
//! | `/start`  | browsing page starting at `?blocknum` (default 0)   |
//! | `/health` | `ok`                                                |
//!
//! A `blocknum` that is repeated or not a non-negative integer is answered
//! with `400 Bad Request`. A `/text` scan that outlives the request timeout is
//! cut short and answered with the blocks gathered so far. Every request is
//! logged with its remote address.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy_primitives::BlockNumber;
use axum::extract::{ConnectInfo, RawQuery, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Instrument};

use crate::chain::ChainSource;
use crate::errors::QueryError;
use crate::scanner::BlockScanner;
use crate::spans;

mod page;

/// Query parameter naming the first block of a page
pub const BLOCKNUM_PARAM: &str = "blocknum";

/// Shared state for HTTP handlers
pub struct AppState<S> {
    /// Scanner behind `/text`
    pub scanner: Arc<BlockScanner<S>>,
    /// Non-empty blocks per `/text` response
    pub page_size: usize,
    /// Start block of `/`
    pub home_block: BlockNumber,
    /// Scanning deadline for one `/text` request
    pub request_timeout: Duration,
    /// Fires on server shutdown to cut running scans short
    pub shutdown: CancellationToken,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            scanner: self.scanner.clone(),
            page_size: self.page_size,
            home_block: self.home_block,
            request_timeout: self.request_timeout,
            shutdown: self.shutdown.clone(),
        }
    }
}

/// Builds the router for all routes
pub fn router<S>(state: AppState<S>) -> Router
where
    S: ChainSource + 'static,
{
    Router::new()
        .route("/", get(home::<S>))
        .route("/start", get(start::<S>))
        .route("/text", get(text::<S>))
        .route("/health", get(health))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Serves `router` on `listener` until `shutdown` fires
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;

    info!(address = %addr, "Starting server");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { shutdown.cancelled().await })
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Reads the single optional `blocknum` value from a raw query string
///
/// # Examples
///
/// ```rust
/// use blocktext::api::parse_blocknum;
///
/// assert_eq!(parse_blocknum(None), Ok(0));
/// assert_eq!(parse_blocknum(Some("blocknum=46214")), Ok(46214));
/// assert!(parse_blocknum(Some("blocknum=1&blocknum=2")).is_err());
/// assert!(parse_blocknum(Some("blocknum=-1")).is_err());
/// ```
pub fn parse_blocknum(query: Option<&str>) -> Result<BlockNumber, QueryError> {
    let values: Vec<String> = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(key, _)| key == BLOCKNUM_PARAM)
        .map(|(_, value)| value.into_owned())
        .collect();

    match values.as_slice() {
        [] => Ok(0),
        // Digits only: `u64::from_str` would also take a leading '+'
        [value] => value
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| value.parse().ok())
            .flatten()
            .ok_or_else(|| QueryError::NotABlockNumber {
                param: BLOCKNUM_PARAM,
                value: value.clone(),
            }),
        _ => Err(QueryError::Repeated {
            param: BLOCKNUM_PARAM,
            count: values.len(),
        }),
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

async fn text<S: ChainSource>(
    State(state): State<AppState<S>>,
    RawQuery(query): RawQuery,
) -> Result<Response, QueryError> {
    let start = parse_blocknum(query.as_deref())?;

    // Cancelled by the deadline or by server shutdown
    let cutoff = state.shutdown.child_token();
    let scan = state
        .scanner
        .scan_until_cancelled(start, state.page_size, &cutoff);
    tokio::pin!(scan);

    let page = tokio::select! {
        page = &mut scan => page,
        _ = tokio::time::sleep(state.request_timeout) => {
            warn!(
                start_block = start,
                timeout_ms = state.request_timeout.as_millis() as u64,
                "Request deadline reached, returning partial page"
            );
            cutoff.cancel();
            scan.await
        }
    };

    info!(
        start_block = start,
        returned = page.len(),
        "Finished processing"
    );

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        page.to_json(),
    )
        .into_response())
}

async fn home<S>(State(state): State<AppState<S>>) -> Html<String> {
    Html(page::render(state.home_block))
}

async fn start<S>(RawQuery(query): RawQuery) -> Result<Html<String>, QueryError> {
    let start = parse_blocknum(query.as_deref())?;
    Ok(Html(page::render(start)))
}

async fn health() -> &'static str {
    "ok"
}

async fn log_request(request: Request, next: Next) -> Response {
    let from = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = spans::http_request(method.as_str(), &uri.to_string(), &from);

    async move {
        info!("Processing request");
        let started = Instant::now();

        let response = next.run(request).await;

        info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
        response
    }
    .instrument(span)
    .await
}

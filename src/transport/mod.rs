// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for the Alloy provider.
//!
//! Tower middleware wrapped around the node's JSON-RPC client:
//!
//! - [`LoggingLayer`] records method, timing and failures of every call
//! - [`RateLimitLayer`] spaces requests so long scans don't flood the node
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blocktext::transport::{LoggingLayer, RateLimitLayer};
//! use alloy_rpc_client::ClientBuilder;
//! use alloy_provider::ProviderBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::new())
//!     .layer(RateLimitLayer::per_second(25))
//!     .http(rpc_url);
//!
//! let provider = ProviderBuilder::new()
//!     .disable_recommended_fillers()
//!     .connect_client(client);
//! ```

mod logging;
mod rate_limit;

pub use logging::{LoggingLayer, LoggingService};
pub use rate_limit::{RateLimitLayer, RateLimitService};

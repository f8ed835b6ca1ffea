// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for HTTP query parameters.

/// Errors produced while parsing the `blocknum` query parameter.
///
/// The HTTP layer answers all of these with `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The parameter appeared more than once.
    #[error("{param} given {count} times")]
    Repeated {
        /// Parameter name
        param: &'static str,
        /// How many times it appeared
        count: usize,
    },

    /// The parameter is not a non-negative 64-bit integer.
    #[error("{param} is not a block number: {value:?}")]
    NotABlockNumber {
        /// Parameter name
        param: &'static str,
        /// The rejected value
        value: String,
    },
}

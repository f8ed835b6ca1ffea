// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for loading and validating configuration.

/// Errors that can occur while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Name of the environment variable
        key: &'static str,
        /// The raw value that was rejected
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A setting is syntactically valid but unusable.
    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting {
        /// Name of the setting
        key: &'static str,
        /// Why it is unusable
        reason: String,
    },
}

impl ConfigError {
    /// Create an `InvalidValue` error for an environment variable.
    pub fn invalid_value(
        key: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an `InvalidSetting` error.
    pub fn invalid_setting(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidSetting {
            key,
            reason: reason.into(),
        }
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across blocktext.
//!
//! - Text records and per-block extraction results
//! - Serialized cache values and pages

pub mod page;
pub mod text;

// Note: Public types are re-exported from lib.rs, not here

// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for filter input.

use thiserror::Error;

use crate::catalog::FilterField;

/// Rejected filter input.
///
/// The draft's text-entry operations turn these into "no change"; they are surfaced only
/// by the lower-level parsing helpers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The id is not part of the field's catalog.
    #[error("unknown {field} id `{id}`")]
    UnknownMember {
        /// Field that was looked up.
        field: FilterField,
        /// Offending id.
        id: String,
    },
    /// Numeric input could not be read as a number.
    #[error("`{input}` is not a number")]
    NotANumber {
        /// Raw input.
        input: String,
    },
}

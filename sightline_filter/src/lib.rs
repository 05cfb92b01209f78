// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Filter: search filter criteria with clamped, immutable drafts.
//!
//! - [`FilterOptions`]: the immutable snapshot handed to the host when filters are applied.
//!   Sets of [`ContentType`], [`Genre`] and [`ReleaseStatus`] (empty = no restriction), a
//!   [`YearRange`] and a [`RatingRange`].
//! - [`FilterDraft`]: the working copy edited inside the filter popup. Every edit returns a
//!   new draft; ranges are clamped against the scale and against the opposite bound, so no
//!   sequence of edits can produce an inverted or out-of-range filter.
//!
//! ## Example
//!
//! ```
//! use sightline_filter::{ContentType, Edge, FilterDraft, ReleaseStatus};
//!
//! let draft = FilterDraft::new(2024)
//!     .toggle_member(ContentType::Movie)
//!     .set_year_bound(Edge::Min, 2000)
//!     .set_year_bound(Edge::Max, 2010)
//!     .set_rating_bound(Edge::Min, 5.0)
//!     .set_rating_bound(Edge::Max, 8.0)
//!     .toggle_member(ReleaseStatus::Released);
//!
//! // A min edit above the current max is pulled down to it; max is not raised.
//! let clamped = draft.set_year_bound(Edge::Min, 2030);
//! assert_eq!(clamped.options().years.min(), 2010);
//! assert_eq!(clamped.options().years.max(), 2010);
//!
//! let applied = draft.apply();
//! assert!(applied.content_types.contains(&ContentType::Movie));
//! assert_eq!(applied.ratings.max(), 8.0);
//!
//! // Reset returns to defaults: [1990, current year], [0, 10], empty sets.
//! assert!(draft.reset().is_default());
//! ```

mod catalog;
mod draft;
mod error;
mod options;

pub use catalog::{ContentType, FilterField, Genre, Member, ReleaseStatus};
pub use draft::{FilterDraft, parse_rating, parse_year};
pub use error::FilterError;
pub use options::{
    DEFAULT_YEAR_MIN, Edge, FilterOptions, RATING_MAX, RatingRange, YEAR_FLOOR, YearBounds,
    YearRange,
};

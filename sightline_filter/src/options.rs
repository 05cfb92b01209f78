// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applied filter snapshots and their range types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{ContentType, Genre, ReleaseStatus};

/// Lowest year any year bound may take.
pub const YEAR_FLOOR: i32 = 1900;
/// Lower year bound of a fresh draft.
pub const DEFAULT_YEAR_MIN: i32 = 1990;
/// Highest rating.
pub const RATING_MAX: f64 = 10.0;

const RATING_MAX_TENTHS: u8 = 100;

/// Which end of a range an edit targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The lower bound.
    Min,
    /// The upper bound.
    Max,
}

/// Limits for year ranges: `[floor, current_year]`, plus the default lower bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct YearBounds {
    /// Earliest selectable year.
    pub floor: i32,
    /// Latest selectable year.
    pub current_year: i32,
    /// Lower bound of a fresh draft.
    pub default_min: i32,
}

impl YearBounds {
    /// Standard bounds for the given current year.
    pub const fn new(current_year: i32) -> Self {
        Self {
            floor: YEAR_FLOOR,
            current_year,
            default_min: DEFAULT_YEAR_MIN,
        }
    }

    /// Clamp a year into `[floor, current_year]`.
    ///
    /// A misconfigured `current_year` before `floor` collapses the range to `floor`.
    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.floor, self.current_year.max(self.floor))
    }

    /// Default range of a fresh draft.
    pub fn default_range(&self) -> YearRange {
        YearRange {
            min: self.clamp(self.default_min),
            max: self.clamp(self.current_year),
        }
    }
}

/// Inclusive year range with `min <= max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[i32; 2]", from = "[i32; 2]")]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they are inverted.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Lower bound.
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound.
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Set one bound, clamping `value` into `bounds` and then against the opposite bound.
    ///
    /// The opposite bound never moves.
    #[must_use]
    pub fn with_edge(self, edge: Edge, value: i32, bounds: &YearBounds) -> Self {
        let value = bounds.clamp(value);
        match edge {
            Edge::Min => Self {
                min: value.min(self.max),
                max: self.max,
            },
            Edge::Max => Self {
                min: self.min,
                max: value.max(self.min),
            },
        }
    }

    /// Clamp both ends into `bounds`.
    ///
    /// Deserialized ranges are only sorted, because the bounds are not known while decoding.
    #[must_use]
    pub fn clamped(self, bounds: &YearBounds) -> Self {
        Self::new(bounds.clamp(self.min), bounds.clamp(self.max))
    }

    /// Whether `year` lies in the range.
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl From<[i32; 2]> for YearRange {
    fn from([a, b]: [i32; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<YearRange> for [i32; 2] {
    fn from(range: YearRange) -> Self {
        [range.min, range.max]
    }
}

/// Inclusive rating range over `[0, 10]` with `min <= max`.
///
/// Ratings are held in tenths so that repeated 0.1 steps never accumulate binary
/// floating-point error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct RatingRange {
    min_tenths: u8,
    max_tenths: u8,
}

impl RatingRange {
    /// The unrestricted range `[0, 10]`.
    pub const FULL: Self = Self {
        min_tenths: 0,
        max_tenths: RATING_MAX_TENTHS,
    };

    /// Build a range from two ratings, clamping into `[0, 10]` and swapping if inverted.
    ///
    /// Non-finite values are treated as the nearest end of the scale (NaN as 0).
    pub fn new(a: f64, b: f64) -> Self {
        let a = to_tenths(a).unwrap_or(0);
        let b = to_tenths(b).unwrap_or(0);
        Self {
            min_tenths: a.min(b),
            max_tenths: a.max(b),
        }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        f64::from(self.min_tenths) / 10.0
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        f64::from(self.max_tenths) / 10.0
    }

    /// Lower bound in tenths of a point.
    pub const fn min_tenths(&self) -> u8 {
        self.min_tenths
    }

    /// Upper bound in tenths of a point.
    pub const fn max_tenths(&self) -> u8 {
        self.max_tenths
    }

    /// Set one bound, rounding to tenths, clamping into `[0, 10]` and then against the
    /// opposite bound. A NaN `value` leaves the range unchanged.
    #[must_use]
    pub fn with_edge(self, edge: Edge, value: f64) -> Self {
        let Some(value) = to_tenths(value) else {
            return self;
        };
        match edge {
            Edge::Min => Self {
                min_tenths: value.min(self.max_tenths),
                max_tenths: self.max_tenths,
            },
            Edge::Max => Self {
                min_tenths: self.min_tenths,
                max_tenths: value.max(self.min_tenths),
            },
        }
    }

    /// Whether `rating` lies in the range.
    pub fn contains(&self, rating: f64) -> bool {
        to_tenths(rating).is_some_and(|r| (self.min_tenths..=self.max_tenths).contains(&r))
    }
}

impl Default for RatingRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<[f64; 2]> for RatingRange {
    fn from([a, b]: [f64; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<RatingRange> for [f64; 2] {
    fn from(range: RatingRange) -> Self {
        [range.min(), range.max()]
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is rounded and clamped to 0..=100 before the cast"
)]
fn to_tenths(rating: f64) -> Option<u8> {
    if rating.is_nan() {
        return None;
    }
    let tenths = (rating * 10.0).round().clamp(0.0, f64::from(RATING_MAX_TENTHS));
    Some(tenths as u8)
}

/// Immutable snapshot of applied filter criteria.
///
/// Empty sets mean "no restriction" for their field. A deserialized snapshot has sorted
/// ranges and ratings inside `[0, 10]`, but its years are unchecked until
/// [`FilterOptions::clamped`] is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Selected content types.
    pub content_types: BTreeSet<ContentType>,
    /// Selected genres.
    pub genres: BTreeSet<Genre>,
    /// Release year range.
    pub years: YearRange,
    /// Rating range.
    pub ratings: RatingRange,
    /// Selected release statuses.
    pub status: BTreeSet<ReleaseStatus>,
}

impl FilterOptions {
    /// Default criteria for the given year bounds.
    pub fn defaults(bounds: &YearBounds) -> Self {
        Self {
            content_types: BTreeSet::new(),
            genres: BTreeSet::new(),
            years: bounds.default_range(),
            ratings: RatingRange::FULL,
            status: BTreeSet::new(),
        }
    }

    /// This snapshot with its year range clamped into `bounds`.
    #[must_use]
    pub fn clamped(mut self, bounds: &YearBounds) -> Self {
        self.years = self.years.clamped(bounds);
        self
    }

    /// Whether no set-valued field restricts results and the rating range is full.
    ///
    /// The year range is not considered: its default is already a restriction.
    pub fn is_unrestricted(&self) -> bool {
        self.content_types.is_empty()
            && self.genres.is_empty()
            && self.status.is_empty()
            && self.ratings == RatingRange::FULL
    }
}

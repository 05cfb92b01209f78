// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Working copy of filter criteria.
//!
//! A [`FilterDraft`] is edited while the filter popup is open and turned into an immutable
//! [`FilterOptions`] snapshot when the user applies it. Every edit takes `&self` and returns
//! a new draft, so earlier drafts stay valid for undo or diffing, and no edit can produce a
//! range that violates `floor <= min <= max <= current_year` (years) or
//! `0 <= min <= max <= 10` (ratings). Out-of-range input is clamped, never rejected.

use std::collections::BTreeSet;

use chrono::Datelike;

use crate::catalog::{FilterField, Member};
use crate::error::FilterError;
use crate::options::{Edge, FilterOptions, YearBounds};

/// Mutable-by-replacement draft of [`FilterOptions`].
#[derive(Clone, Debug, PartialEq)]
pub struct FilterDraft {
    options: FilterOptions,
    bounds: YearBounds,
}

impl FilterDraft {
    /// A default draft where `current_year` is the latest selectable year.
    pub fn new(current_year: i32) -> Self {
        Self::with_bounds(YearBounds::new(current_year))
    }

    /// A default draft using the local calendar's current year.
    pub fn for_today() -> Self {
        Self::new(chrono::Local::now().year())
    }

    /// A default draft with explicit year bounds.
    pub fn with_bounds(bounds: YearBounds) -> Self {
        Self {
            options: FilterOptions::defaults(&bounds),
            bounds,
        }
    }

    /// A draft starting from a previous snapshot, with its years clamped into `bounds`.
    pub fn from_options(options: FilterOptions, bounds: YearBounds) -> Self {
        Self {
            options: options.clamped(&bounds),
            bounds,
        }
    }

    /// Current criteria.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Year bounds this draft clamps against.
    pub fn bounds(&self) -> &YearBounds {
        &self.bounds
    }

    /// Whether a member is selected.
    pub fn is_selected(&self, member: Member) -> bool {
        match member {
            Member::ContentType(t) => self.options.content_types.contains(&t),
            Member::Genre(g) => self.options.genres.contains(&g),
            Member::Status(s) => self.options.status.contains(&s),
        }
    }

    /// Add `member` if absent, remove it if present.
    #[must_use]
    pub fn toggle_member(&self, member: impl Into<Member>) -> Self {
        let mut next = self.clone();
        let opts = &mut next.options;
        match member.into() {
            Member::ContentType(t) => toggle(&mut opts.content_types, t),
            Member::Genre(g) => toggle(&mut opts.genres, g),
            Member::Status(s) => toggle(&mut opts.status, s),
        }
        next
    }

    /// Toggle a member given by its catalog id.
    pub fn toggle_by_id(&self, field: FilterField, id: &str) -> Result<Self, FilterError> {
        Ok(self.toggle_member(Member::parse(field, id)?))
    }

    /// Set one year bound.
    ///
    /// The value is clamped into the draft's year bounds and then against the opposite
    /// current bound: a min edit never exceeds the current max, a max edit never falls below
    /// the current min, and the opposite bound never moves.
    #[must_use]
    pub fn set_year_bound(&self, edge: Edge, value: i32) -> Self {
        if self.bounds.clamp(value) != value {
            tracing::debug!(?edge, value, bounds = ?self.bounds, "year input clamped");
        }
        let mut next = self.clone();
        next.options.years = self.options.years.with_edge(edge, value, &self.bounds);
        next
    }

    /// Set one rating bound with the same policy as [`Self::set_year_bound`], over `[0, 10]`
    /// in steps of 0.1. NaN input leaves the draft unchanged.
    #[must_use]
    pub fn set_rating_bound(&self, edge: Edge, value: f64) -> Self {
        let mut next = self.clone();
        next.options.ratings = self.options.ratings.with_edge(edge, value);
        next
    }

    /// Set a year bound from typed text. Unreadable text keeps the previous value.
    #[must_use]
    pub fn set_year_input(&self, edge: Edge, input: &str) -> Self {
        match parse_year(input) {
            Ok(year) => self.set_year_bound(edge, year),
            Err(err) => {
                tracing::debug!(?edge, %err, "year input ignored");
                self.clone()
            }
        }
    }

    /// Set a rating bound from typed text. Unreadable text keeps the previous value.
    #[must_use]
    pub fn set_rating_input(&self, edge: Edge, input: &str) -> Self {
        match parse_rating(input) {
            Ok(rating) => self.set_rating_bound(edge, rating),
            Err(err) => {
                tracing::debug!(?edge, %err, "rating input ignored");
                self.clone()
            }
        }
    }

    /// Snapshot of the current criteria.
    pub fn apply(&self) -> FilterOptions {
        self.options.clone()
    }

    /// A default draft with the same year bounds.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::with_bounds(self.bounds)
    }

    /// Whether the draft equals a fresh default draft.
    pub fn is_default(&self) -> bool {
        self.options == FilterOptions::defaults(&self.bounds)
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Read a year the way a number field reports it: optional sign and leading digits,
/// trailing garbage ignored. Values beyond `i32` saturate; clamping happens later.
pub fn parse_year(input: &str) -> Result<i32, FilterError> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(FilterError::NotANumber {
            input: input.to_owned(),
        });
    }
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    Ok(i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX }))
}

/// Read a rating the way a number field reports it: the longest leading decimal number,
/// trailing garbage ignored. Only finite values are accepted.
pub fn parse_rating(input: &str) -> Result<f64, FilterError> {
    decimal_prefix(input.trim())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FilterError::NotANumber {
            input: input.to_owned(),
        })
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa digit.
fn decimal_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        start
            + bytes[start.min(bytes.len())..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    &s[..end]
}

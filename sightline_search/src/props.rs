// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Host-controlled configuration of the search bar.
///
/// These are the click listener's dependencies: any change rebinds it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchBarProps {
    /// Current query, owned by the host.
    pub value: String,
    /// Hint shown while the query is empty.
    pub placeholder: Option<String>,
    /// The bar is pinned to the top of the page.
    pub is_sticky: bool,
    /// The bar is rendered over the featured hero.
    pub is_in_featured: bool,
    /// Suppress the idle hint overlay.
    pub hide_tooltip: bool,
}

impl SearchBarProps {
    /// Props with the given query and everything else at its default.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

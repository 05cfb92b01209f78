// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use sightline_filter::FilterOptions;

/// Callbacks a host supplies to the search bar.
///
/// The host is borrowed for each controller call that may report something, so a callback
/// always sees the host's current state.
pub trait SearchHost {
    /// The query text changed. `force` is `true` for programmatic sets and explicit clears,
    /// `false` for typing.
    fn on_change(&mut self, value: &str, force: bool);

    /// The control lost focus. `Some("")` after an explicit clear, `None` after a click
    /// outside the control.
    fn on_unfocus(&mut self, new_search: Option<&str>);

    /// Filters were applied from the popup.
    fn on_filters_apply(&mut self, filters: &FilterOptions) {
        let _ = filters;
    }
}

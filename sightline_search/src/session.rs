// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side search state.
//!
//! ```text
//! Idle --(query becomes non-empty)--> Pending --(debounced query catches up)--> Settled
//!  ^                                     |  ^                                     |
//!  +----------(query becomes empty)------+  +----(query changes, still non-empty)-+
//! ```
//!
//! `searching` is true outside `Idle`; `loading` is true exactly in `Pending`, which ends the
//! moment the debounced query equals the raw query.

use sightline_event_state::debounce::Debounced;
use sightline_filter::FilterOptions;

use crate::config::SearchConfig;
use crate::host::SearchHost;

/// Phase of a search session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchPhase {
    /// No query.
    Idle,
    /// A query is being typed and has not settled yet.
    Pending,
    /// The settled query equals the raw query.
    Settled,
}

/// Raw and debounced query plus the derived search phase.
#[derive(Clone, Debug)]
pub struct SearchSession {
    query: String,
    debounced: Debounced<String>,
    phase: SearchPhase,
    now: u64,
    scroll_to_top: bool,
    filters: Option<FilterOptions>,
}

impl SearchSession {
    /// Create an idle session with the given quiet period.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            query: String::new(),
            debounced: Debounced::new(String::new(), delay_ms),
            phase: SearchPhase::Idle,
            now: 0,
            scroll_to_top: false,
            filters: None,
        }
    }

    /// Create an idle session using [`SearchConfig::debounce_ms`].
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.debounce_ms)
    }

    /// Replace the raw query at time `now`.
    ///
    /// Returns `true` when this starts a search, which is when the host should scroll back
    /// to the top of the page.
    pub fn set_query(&mut self, text: &str, now: u64) -> bool {
        self.now = self.now.max(now);
        let was_searching = self.searching();
        text.clone_into(&mut self.query);
        self.debounced.observe(self.query.clone(), self.now);
        self.refresh_phase();
        let entered = !was_searching && self.searching();
        if entered {
            self.scroll_to_top = true;
        }
        entered
    }

    /// Advance the clock to `now`, settling the query if its quiet period has passed.
    ///
    /// Returns whether the phase changed.
    pub fn tick(&mut self, now: u64) -> bool {
        self.now = self.now.max(now);
        if let Some(value) = self.debounced.poll(self.now) {
            tracing::debug!(query = %value, now = self.now, "search query settled");
        }
        self.refresh_phase()
    }

    /// Current phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Whether there is a query.
    pub fn searching(&self) -> bool {
        self.phase != SearchPhase::Idle
    }

    /// Whether results for the raw query are still pending.
    pub fn loading(&self) -> bool {
        self.phase == SearchPhase::Pending
    }

    /// Raw query, as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Settled query that results should be fetched for.
    pub fn debounced(&self) -> &str {
        self.debounced.settled()
    }

    /// When the pending query settles, if one is pending.
    pub fn deadline(&self) -> Option<u64> {
        self.debounced.deadline()
    }

    /// Session clock.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Take a pending scroll-to-top request raised by entering a search.
    pub fn take_scroll_to_top(&mut self) -> bool {
        core::mem::take(&mut self.scroll_to_top)
    }

    /// Most recently applied filters.
    pub fn filters(&self) -> Option<&FilterOptions> {
        self.filters.as_ref()
    }

    /// Drop the pending debounce timer.
    pub fn teardown(&mut self) {
        self.debounced.cancel();
    }

    fn refresh_phase(&mut self) -> bool {
        let next = if self.query.is_empty() {
            SearchPhase::Idle
        } else if self.debounced.settled() == &self.query {
            SearchPhase::Settled
        } else {
            SearchPhase::Pending
        };
        if next == self.phase {
            return false;
        }
        tracing::debug!(from = ?self.phase, to = ?next, query = %self.query, "search phase");
        self.phase = next;
        true
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl SearchHost for SearchSession {
    fn on_change(&mut self, value: &str, _force: bool) {
        self.set_query(value, self.now);
    }

    fn on_unfocus(&mut self, new_search: Option<&str>) {
        if let Some(value) = new_search {
            self.set_query(value, self.now);
        }
    }

    fn on_filters_apply(&mut self, filters: &FilterOptions) {
        self.filters = Some(filters.clone());
    }
}

// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce for a changing value.
//!
//! [`Debounced`] holds two values: the *live* value most recently observed and the
//! *settled* value that was live for a full quiet window. Every change of the live value
//! restarts a single timer of `delay_ms`. When the timer fires with no intervening change,
//! the settled value catches up. There is no leading emission.
//!
//! Time is a caller-supplied millisecond timestamp, so the host decides where timers come
//! from (an event loop, `requestAnimationFrame`, a test) and tests never sleep.
//!
//! ## Firing
//!
//! The host either calls [`Debounced::poll`] when [`Debounced::deadline`] passes, or simply
//! polls on every frame. A timer that is already due when a new value arrives through
//! [`Debounced::observe`] fires first, matching an event loop that would have run it before
//! delivering the newer input.
//!
//! ```
//! use sightline_event_state::debounce::Debounced;
//!
//! let mut d = Debounced::new(0_u32, 50);
//! d.observe(1, 1000);
//! assert_eq!(d.deadline(), Some(1050));
//! assert_eq!(*d.settled(), 0);
//! assert_eq!(d.poll(1050).copied(), Some(1));
//! assert!(!d.is_pending());
//! ```

/// A pending timer and the value it will settle.
#[derive(Clone, Debug)]
struct Pending<T> {
    value: T,
    deadline: u64,
}

/// Trailing-edge debounced value.
#[derive(Clone, Debug)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<Pending<T>>,
    delay_ms: u64,
}

impl<T: Clone + PartialEq> Debounced<T> {
    /// Create a debounced value that starts settled at `initial`.
    pub fn new(initial: T, delay_ms: u64) -> Self {
        Self {
            settled: initial,
            pending: None,
            delay_ms,
        }
    }

    /// Observe the current live value at time `now` and return the settled value.
    ///
    /// A value equal to the current live value is not a change and leaves any pending timer
    /// untouched. Any other value cancels the pending timer and starts a new one. With a
    /// zero delay the value settles immediately.
    pub fn observe(&mut self, value: T, now: u64) -> &T {
        self.poll(now);

        if *self.live() == value {
            return &self.settled;
        }

        if self.delay_ms == 0 {
            self.pending = None;
            self.settled = value;
            return &self.settled;
        }

        let deadline = now.saturating_add(self.delay_ms);
        if self.pending.replace(Pending { value, deadline }).is_some() {
            tracing::trace!(deadline, "debounce timer restarted");
        } else {
            tracing::trace!(deadline, "debounce timer started");
        }
        &self.settled
    }

    /// Fire the pending timer if it is due at `now`.
    ///
    /// Returns the newly settled value when the timer fired, `None` otherwise. Each timer
    /// fires at most once.
    pub fn poll(&mut self, now: u64) -> Option<&T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        tracing::trace!(deadline = pending.deadline, now, "debounce timer fired");
        self.settled = pending.value;
        Some(&self.settled)
    }

    /// Drop the pending timer without settling.
    ///
    /// Used on teardown. Calling it with nothing pending is a no-op.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::trace!(deadline = pending.deadline, "debounce timer cancelled");
        }
    }

    /// Most recently settled value.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// Most recently observed value (settled or pending).
    pub fn live(&self) -> &T {
        self.pending
            .as_ref()
            .map_or(&self.settled, |pending| &pending.value)
    }

    /// Time at which the pending timer fires, if any.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Whether a timer is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Configured delay in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Change the delay. Applies to timers started after this call.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }
}

impl<T: Clone + PartialEq + Default> Default for Debounced<T> {
    fn default() -> Self {
        Self::new(T::default(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_only_last_value_after_quiet_window() {
        let mut d = Debounced::new(String::new(), 500);
        d.observe("a".into(), 0);
        d.observe("ab".into(), 100);

        // "a" would have fired at 500, but it was superseded.
        assert!(d.poll(500).is_none());
        assert_eq!(d.settled(), "");
        assert_eq!(d.poll(600).map(String::as_str), Some("ab"));
        // Exactly once.
        assert!(d.poll(601).is_none());
        assert!(d.poll(10_000).is_none());
    }

    #[test]
    fn same_value_does_not_restart_timer() {
        let mut d = Debounced::new(0_i32, 100);
        d.observe(5, 0);
        d.observe(5, 90);
        assert_eq!(d.deadline(), Some(100));
        assert_eq!(d.poll(100).copied(), Some(5));
    }

    #[test]
    fn value_equal_to_settled_is_not_a_change() {
        let mut d = Debounced::new(3_i32, 100);
        assert_eq!(*d.observe(3, 0), 3);
        assert!(!d.is_pending());
    }

    #[test]
    fn reverting_while_pending_restarts_and_reemits() {
        let mut d = Debounced::new("a".to_string(), 100);
        d.observe(String::new(), 0);
        d.observe("a".into(), 50);
        assert_eq!(d.deadline(), Some(150));
        assert_eq!(d.poll(150).map(String::as_str), Some("a"));
    }

    #[test]
    fn overdue_timer_fires_before_new_value() {
        let mut d = Debounced::new(0_u8, 100);
        d.observe(1, 0);
        // Host never polled; the new value arrives after the first deadline.
        assert_eq!(*d.observe(2, 250), 1);
        assert_eq!(d.deadline(), Some(350));
    }

    #[test]
    fn zero_delay_settles_synchronously() {
        let mut d = Debounced::new(0_u8, 0);
        assert_eq!(*d.observe(7, 10), 7);
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut d = Debounced::new(0_u8, 100);
        d.observe(9, 0);
        d.cancel();
        assert!(d.poll(1_000).is_none());
        assert_eq!(*d.settled(), 0);
        assert_eq!(*d.live(), 0);
        // Idempotent.
        d.cancel();
    }

    #[test]
    fn live_tracks_pending_value() {
        let mut d = Debounced::new(1_u8, 100);
        d.observe(2, 0);
        assert_eq!(*d.live(), 2);
        assert_eq!(*d.settled(), 1);
    }

    #[test]
    fn set_delay_applies_to_next_timer() {
        let mut d = Debounced::new(0_u8, 100);
        d.observe(1, 0);
        d.set_delay_ms(300);
        assert_eq!(d.deadline(), Some(100));
        d.observe(2, 10);
        assert_eq!(d.deadline(), Some(310));
        assert_eq!(d.delay_ms(), 300);
    }
}

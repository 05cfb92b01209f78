// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Event State: small, deterministic state machines for UI event handling.
//!
//! ## Overview
//!
//! The types in this crate never read a clock, never touch a document and never run
//! callbacks on their own. The host feeds them events, timestamps (milliseconds) and
//! geometry ([`kurbo`] types), and they answer with what should happen next.
//!
//! - [`debounce::Debounced`]: trailing-edge debounce of a changing value.
//! - [`outside::OutsideWatcher`]: decides whether a pointer event happened outside every
//!   region a component owns (focus loss, popup dismissal).
//! - [`listener::ListenerRegistry`]: bookkeeping for document/window listeners, keyed by the
//!   dependency set each listener was bound with.
//! - [`event`]: the document event vocabulary shared by the above.
//!
//! ## Minimal example
//!
//! ```
//! use sightline_event_state::debounce::Debounced;
//!
//! let mut query = Debounced::new(String::new(), 500);
//!
//! query.observe("a".to_string(), 0);
//! query.observe("ab".to_string(), 100);
//! // Nothing settles while typing continues.
//! assert!(query.poll(599).is_none());
//! // Trailing edge: only the last value, once.
//! assert_eq!(query.poll(600).map(String::as_str), Some("ab"));
//! assert!(query.poll(700).is_none());
//! ```
//!
//! ## Listener bookkeeping
//!
//! ```
//! use kurbo::{Point, Rect};
//! use sightline_event_state::event::{DocumentEvent, EventKinds};
//! use sightline_event_state::listener::{BindOutcome, ListenerRegistry};
//! use sightline_event_state::outside::OutsideWatcher;
//!
//! let mut registry = ListenerRegistry::new();
//! let owner = registry.allocate_owner();
//! assert_eq!(registry.bind(owner, EventKinds::CLICK, &"props-v1"), BindOutcome::Bound);
//!
//! let mut watcher = OutsideWatcher::new(EventKinds::CLICK);
//! watcher.set_regions([Some(Rect::new(0.0, 0.0, 100.0, 40.0))]);
//!
//! let event = DocumentEvent::Click { position: Point::new(300.0, 300.0) };
//! for listener in registry.owners_for(event.kind()) {
//!     assert_eq!(listener, owner);
//!     assert!(watcher.check(&event));
//! }
//!
//! registry.unbind(owner);
//! assert!(registry.is_empty());
//! ```

pub mod debounce;
pub mod event;
pub mod listener;
pub mod outside;

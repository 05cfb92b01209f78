// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Search: a headless search bar for media browsing.
//!
//! - [`SearchInputController`]: focus, tooltip, theme, filter popup and pointer glow of one
//!   search bar, driven by document events and geometry the host reports.
//! - [`SearchSession`]: the host side of the query, with a debounced settled value and an
//!   explicit [`SearchPhase`].
//! - [`SearchHost`]: the callbacks a host implements. [`SearchSession`] implements it, so the
//!   simplest host passes the session straight to the controller.
//! - [`SearchConfig`] and [`Preferences`]: tunables (loadable from TOML) and injected flags.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use sightline_event_state::event::DocumentEvent;
//! use sightline_filter::{ContentType, Edge};
//! use sightline_search::{
//!     Preferences, SearchBarProps, SearchConfig, SearchInputController, SearchSession,
//! };
//!
//! let config = SearchConfig::default();
//! let mut session = SearchSession::from_config(&config);
//! let mut bar = SearchInputController::with_current_year(
//!     config,
//!     Preferences::default(),
//!     SearchBarProps::default(),
//!     2024,
//! );
//! bar.set_viewport(Size::new(1280.0, 800.0));
//! bar.set_container_rect(Some(Rect::new(400.0, 20.0, 900.0, 70.0)));
//! bar.set_trigger_rect(Some(Rect::new(820.0, 30.0, 852.0, 62.0)));
//! bar.mount(0.0);
//!
//! // Typing reaches the session; the query settles after the quiet period.
//! session.tick(0);
//! bar.input("alien", &mut session);
//! bar.set_value(session.query());
//! assert!(session.loading());
//! session.tick(500);
//! assert_eq!(session.debounced(), "alien");
//!
//! // Filters are edited on a draft and handed over on apply.
//! bar.toggle_filters();
//! bar.edit_filters(|d| d.toggle_member(ContentType::Movie).set_year_bound(Edge::Min, 2000));
//! bar.apply_filters(&mut session);
//! assert_eq!(session.filters().map(|f| f.years.min()), Some(2000));
//!
//! // A click away from the bar reports an unfocus without a new query.
//! bar.focus();
//! bar.handle_document_event(
//!     &DocumentEvent::Click { position: Point::new(10.0, 600.0) },
//!     &mut session,
//! );
//! assert!(!bar.is_focused());
//! assert_eq!(session.query(), "alien");
//!
//! bar.unmount();
//! assert!(bar.registry().is_empty());
//! ```

mod config;
mod controller;
mod error;
mod host;
mod props;
mod session;

pub use config::{
    FilterConfig, GlowConfig, PopupConfig, Preferences, SearchConfig, ThemeConfig,
};
pub use controller::{SearchBarView, SearchInputController};
pub use error::ConfigError;
pub use host::SearchHost;
pub use props::SearchBarProps;
pub use session::{SearchPhase, SearchSession};

// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted search bar session with synthetic time and geometry.
//!
//! Types a query, lets it settle, edits and applies filters, then clicks away.
//!
//! Run:
//! - `cargo run -p sightline_demos --example search_session`
//! - `RUST_LOG=debug cargo run -p sightline_demos --example search_session -- search.toml`

use std::path::PathBuf;

use kurbo::{Point, Rect, Size};
use sightline_event_state::event::DocumentEvent;
use sightline_filter::{ContentType, Edge, Genre};
use sightline_search::{
    Preferences, SearchBarProps, SearchConfig, SearchInputController, SearchSession,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => SearchConfig::load_from(&path),
        None => SearchConfig::default(),
    };

    let mut session = SearchSession::from_config(&config);
    let props = SearchBarProps {
        placeholder: Some("Search movies and shows".into()),
        is_in_featured: true,
        ..SearchBarProps::default()
    };
    let mut bar = SearchInputController::new(config, Preferences::default(), props);
    bar.set_viewport(Size::new(1280.0, 800.0));
    bar.set_container_rect(Some(Rect::new(390.0, 300.0, 890.0, 350.0)));
    bar.set_trigger_rect(Some(Rect::new(810.0, 309.0, 842.0, 341.0)));
    bar.mount(0.0);
    tracing::info!(listeners = ?bar.listeners(), "search bar ready");

    bar.handle_document_event(
        &DocumentEvent::PointerMove {
            position: Point::new(520.0, 320.0),
        },
        &mut session,
    );
    bar.pointer_enter();
    tracing::info!(view = ?bar.view(), "hovering the idle bar");

    // Type "dune" one key per 120 ms.
    bar.focus();
    let mut now = 0;
    let mut typed = String::new();
    for ch in "dune".chars() {
        typed.push(ch);
        session.tick(now);
        bar.input(&typed, &mut session);
        bar.set_value(session.query());
        if session.take_scroll_to_top() {
            tracing::info!("search started; scrolling results to the top");
        }
        tracing::info!(now, query = session.query(), loading = session.loading(), "typed");
        now += 120;
    }
    while let Some(deadline) = session.deadline() {
        now = deadline;
        session.tick(now);
    }
    tracing::info!(now, debounced = session.debounced(), phase = ?session.phase(), "settled");

    // Scroll far enough to leave the featured hero.
    bar.handle_document_event(&DocumentEvent::Scroll { scroll_y: 720.0 }, &mut session);
    tracing::info!(light_theme = bar.light_theme(), "scrolled");

    if bar.toggle_filters() {
        bar.set_popup_rect(Rect::new(816.0, 353.0, 1264.0, 780.0));
        bar.edit_filters(|d| {
            d.toggle_member(ContentType::Movie)
                .toggle_member(Genre::SciFi)
                .set_year_input(Edge::Min, "2000")
                .set_year_input(Edge::Max, "twenty-ten")
                .set_rating_bound(Edge::Min, 7.5)
        });
        tracing::info!(draft = ?bar.filter_draft(), "editing filters");
        if let Some(filters) = bar.apply_filters(&mut session) {
            tracing::info!(?filters, "filters applied");
        }
    }

    bar.handle_document_event(
        &DocumentEvent::Click {
            position: Point::new(40.0, 700.0),
        },
        &mut session,
    );
    tracing::info!(view = ?bar.view(), query = session.query(), "clicked away");

    bar.unmount();
    session.teardown();
    tracing::info!(leftover = bar.registry().len(), "torn down");
}

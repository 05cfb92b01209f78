// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The search bar's interaction state.
//!
//! [`SearchInputController`] owns every document-level listener the bar needs, in one
//! [`ListenerRegistry`]:
//!
//! - the control's click listener (outside-click unfocus), whose dependencies are the props;
//! - the control's scroll listener (theme), whose dependencies are the theme inputs;
//! - the filter popup's pointer-down listener, while the popup is open;
//! - the glow's pointer-move listener, while the glow is shown and effects are enabled.
//!
//! The host forwards the event kinds reported by [`SearchInputController::listeners`] to
//! [`SearchInputController::handle_document_event`], together with the [`SearchHost`] that
//! should receive callbacks.

use chrono::Datelike;
use kurbo::{Rect, Size};

use sightline_event_state::event::{DocumentEvent, EventKinds, OwnerId};
use sightline_event_state::listener::ListenerRegistry;
use sightline_event_state::outside::OutsideWatcher;
use sightline_filter::{FilterDraft, FilterOptions, YearBounds};
use sightline_glow::{GlowFrame, PointerGlow};
use sightline_popup::{AnchoredPopup, CloseReason, Placement, PopupError};

use crate::config::{Preferences, SearchConfig};
use crate::host::SearchHost;
use crate::props::SearchBarProps;

/// Everything a host needs to paint the search bar.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchBarView {
    /// Query text.
    pub value: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Whether the input has focus.
    pub focused: bool,
    /// Whether the light theme is active.
    pub light_theme: bool,
    /// Whether the idle hint is showing.
    pub show_tooltip: bool,
    /// Whether the clear button is shown.
    pub show_clear_button: bool,
    /// Whether the focus ring is drawn.
    pub focus_ring: bool,
    /// Filter popup placement, while it is open.
    pub filter_popup: Option<Placement>,
    /// Glow to paint, if any.
    pub glow: Option<GlowFrame>,
}

/// Interaction state of one mounted search bar.
#[derive(Debug)]
pub struct SearchInputController {
    registry: ListenerRegistry,
    click_owner: OwnerId,
    scroll_owner: OwnerId,
    outside: OutsideWatcher,
    popup: AnchoredPopup<FilterDraft>,
    glow: PointerGlow,
    config: SearchConfig,
    prefs: Preferences,
    props: SearchBarProps,
    year_bounds: YearBounds,
    mounted: bool,
    focused: bool,
    light_theme: bool,
    show_tooltip: bool,
    scroll_y: f64,
    trigger: Option<Rect>,
    viewport: Size,
}

impl SearchInputController {
    /// Create an unmounted controller. Filter drafts end at the local calendar's year.
    pub fn new(config: SearchConfig, prefs: Preferences, props: SearchBarProps) -> Self {
        let year = chrono::Local::now().year();
        Self::with_current_year(config, prefs, props, year)
    }

    /// Create an unmounted controller whose filter drafts end at `current_year`.
    pub fn with_current_year(
        config: SearchConfig,
        prefs: Preferences,
        props: SearchBarProps,
        current_year: i32,
    ) -> Self {
        let mut registry = ListenerRegistry::new();
        let click_owner = registry.allocate_owner();
        let scroll_owner = registry.allocate_owner();
        let popup = AnchoredPopup::new(&mut registry, config.popup.geometry());
        let glow = PointerGlow::new(
            &mut registry,
            config.glow.style(),
            prefs.low_performance_mode,
        );
        let year_bounds = config.filter.year_bounds(current_year);
        Self {
            registry,
            click_owner,
            scroll_owner,
            outside: OutsideWatcher::new(EventKinds::CLICK),
            popup,
            glow,
            config,
            prefs,
            props,
            year_bounds,
            mounted: false,
            focused: false,
            light_theme: false,
            show_tooltip: false,
            scroll_y: 0.0,
            trigger: None,
            viewport: Size::ZERO,
        }
    }

    /// Start listening, with the page scrolled to `scroll_y`.
    pub fn mount(&mut self, scroll_y: f64) {
        self.mounted = true;
        self.scroll_y = scroll_y;
        self.light_theme = self.compute_light_theme();
        self.sync_listeners();
        tracing::debug!(scroll_y, light_theme = self.light_theme, "search bar mounted");
    }

    /// Release every listener and close the popup. Safe to call more than once.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.popup.teardown(&mut self.registry);
        self.sync_listeners();
    }

    /// Whether the controller is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replace the props. Rebinds the click listener when they changed.
    pub fn set_props(&mut self, props: SearchBarProps) {
        self.props = props;
        self.light_theme = self.compute_light_theme();
        self.sync_listeners();
    }

    /// Replace the query text, keeping the other props.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let props = SearchBarProps {
            value: value.into(),
            ..self.props.clone()
        };
        self.set_props(props);
    }

    /// Current props.
    pub fn props(&self) -> &SearchBarProps {
        &self.props
    }

    /// Replace the injected preferences.
    pub fn set_preferences(&mut self, prefs: Preferences) {
        self.prefs = prefs;
        if prefs.low_performance_mode {
            self.set_tooltip(false);
        }
        self.glow
            .set_low_performance(prefs.low_performance_mode, &mut self.registry);
        self.light_theme = self.compute_light_theme();
        self.sync_listeners();
    }

    /// Configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Text typed by the user.
    pub fn input(&mut self, text: &str, host: &mut impl SearchHost) {
        host.on_change(text, false);
    }

    /// Set the query programmatically.
    pub fn set_search(&mut self, text: &str, host: &mut impl SearchHost) {
        host.on_change(text, true);
    }

    /// The clear button was pressed.
    pub fn clear(&mut self, host: &mut impl SearchHost) {
        self.set_search("", host);
        host.on_unfocus(Some(""));
    }

    /// The input gained focus. Hides the tooltip.
    pub fn focus(&mut self) {
        self.focused = true;
        self.set_tooltip(false);
        self.sync_listeners();
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Pointer entered the hint area. Ignored while the glow is not rendered.
    pub fn pointer_enter(&mut self) {
        if self.hint_present() && self.glow.frame().is_some() {
            self.set_tooltip(true);
        }
    }

    /// Pointer left the hint area.
    pub fn pointer_leave(&mut self) {
        self.set_tooltip(false);
    }

    /// Whether the light theme is active.
    pub fn light_theme(&self) -> bool {
        self.light_theme
    }

    /// Route a document or window event to every listener bound for its kind.
    pub fn handle_document_event(&mut self, event: &DocumentEvent, host: &mut impl SearchHost) {
        for owner in self.registry.owners_for(event.kind()) {
            if owner == self.click_owner {
                self.on_document_click(event, host);
            } else if owner == self.scroll_owner {
                if let DocumentEvent::Scroll { scroll_y } = *event {
                    self.on_scroll(scroll_y);
                }
            } else if owner == self.popup.owner() {
                self.popup.handle_document_event(event, &mut self.registry);
            } else if owner == self.glow.owner() {
                self.glow.handle_document_event(event);
            }
        }
    }

    /// Event kinds the host must forward.
    pub fn listeners(&self) -> EventKinds {
        self.registry.kinds()
    }

    /// Listener registrations, for inspection.
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Open or close the filter popup from its trigger.
    ///
    /// The trigger's current rectangle is used every time the popup opens. Returns whether
    /// the popup is open afterwards.
    pub fn toggle_filters(&mut self) -> bool {
        if !self.mounted {
            tracing::debug!("filter toggle ignored; search bar is not mounted");
            return false;
        }
        let bounds = self.year_bounds;
        match self.popup.toggle(
            self.trigger,
            self.viewport,
            || FilterDraft::with_bounds(bounds),
            &mut self.registry,
        ) {
            Ok(open) => open,
            Err(PopupError::MissingAnchor) => {
                tracing::warn!("filter trigger is not attached; popup stays closed");
                false
            }
        }
    }

    /// Close the filter popup, discarding the draft.
    pub fn close_filters(&mut self) {
        self.popup.close(CloseReason::CloseControl, &mut self.registry);
    }

    /// Whether the filter popup is open.
    pub fn filters_open(&self) -> bool {
        self.popup.is_open()
    }

    /// Draft being edited, while the popup is open.
    pub fn filter_draft(&self) -> Option<&FilterDraft> {
        self.popup.content()
    }

    /// Replace the draft with `edit(&draft)`. Returns `false` when the popup is closed.
    pub fn edit_filters(&mut self, edit: impl FnOnce(&FilterDraft) -> FilterDraft) -> bool {
        self.popup.update_content(edit)
    }

    /// Reset the draft to defaults. The popup stays open.
    pub fn reset_filters(&mut self) -> bool {
        self.popup.update_content(FilterDraft::reset)
    }

    /// Hand the draft to the host and close the popup.
    pub fn apply_filters(&mut self, host: &mut impl SearchHost) -> Option<FilterOptions> {
        let options = self
            .popup
            .close(CloseReason::Applied, &mut self.registry)?
            .apply();
        host.on_filters_apply(&options);
        Some(options)
    }

    /// Bounding box of the whole control, or `None` while it is not laid out.
    pub fn set_container_rect(&mut self, rect: Option<Rect>) {
        self.outside.set_regions([rect]);
        self.glow.set_container(rect);
    }

    /// Bounding box of the filter trigger, or `None` while it is not laid out.
    pub fn set_trigger_rect(&mut self, rect: Option<Rect>) {
        self.trigger = rect;
    }

    /// Laid-out rectangle of the open filter panel.
    pub fn set_popup_rect(&mut self, rect: Rect) {
        self.popup.set_panel_region(rect);
    }

    /// Viewport size used to place the popup.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Snapshot for painting.
    pub fn view(&self) -> SearchBarView {
        SearchBarView {
            value: self.props.value.clone(),
            placeholder: self.props.placeholder.clone(),
            focused: self.focused,
            light_theme: self.light_theme,
            show_tooltip: self.show_tooltip,
            show_clear_button: !self.props.value.is_empty(),
            focus_ring: self.focused && !self.show_tooltip,
            filter_popup: self.popup.placement().copied(),
            glow: self.glow.frame(),
        }
    }

    fn on_document_click(&mut self, event: &DocumentEvent, host: &mut impl SearchHost) {
        if !self.outside.check(event) {
            return;
        }
        host.on_unfocus(None);
        if self.focused {
            tracing::debug!("search bar lost focus to an outside click");
        }
        self.focused = false;
        self.sync_listeners();
    }

    fn on_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
        let light = self.compute_light_theme();
        if light != self.light_theme {
            tracing::trace!(scroll_y, light, "search bar theme changed");
        }
        self.light_theme = light;
    }

    fn compute_light_theme(&self) -> bool {
        let featured = self.props.is_in_featured && self.prefs.featured;
        (featured || self.props.is_sticky) && self.scroll_y < self.config.theme.light_scroll_limit
    }

    /// The hint overlay (and its glow) exists only while the bar is idle and empty.
    fn hint_present(&self) -> bool {
        !self.props.hide_tooltip && !self.focused && self.props.value.is_empty()
    }

    fn set_tooltip(&mut self, show: bool) {
        self.show_tooltip = show;
        self.glow.set_enabled(show);
    }

    fn sync_listeners(&mut self) {
        if !self.mounted {
            self.registry.unbind(self.click_owner);
            self.registry.unbind(self.scroll_owner);
            self.glow.unmount(&mut self.registry);
            return;
        }

        self.registry
            .bind(self.click_owner, EventKinds::CLICK, &self.props);
        let theme_deps = (
            self.props.is_in_featured,
            self.props.is_sticky,
            self.prefs.featured,
        );
        self.registry
            .bind(self.scroll_owner, EventKinds::SCROLL, &theme_deps);

        if self.hint_present() {
            self.glow.mount(&mut self.registry);
        } else {
            if self.glow.is_mounted() {
                self.set_tooltip(false);
            }
            self.glow.unmount(&mut self.registry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sightline_filter::{ContentType, Edge, Genre, RatingRange, ReleaseStatus, YearRange};

    const CONTAINER: Rect = Rect::new(400.0, 20.0, 900.0, 70.0);
    const TRIGGER: Rect = Rect::new(820.0, 30.0, 852.0, 62.0);
    const PANEL: Rect = Rect::new(816.0, 74.0, 1264.0, 600.0);

    #[derive(Debug, Default)]
    struct Recorder {
        changes: Vec<(String, bool)>,
        unfocus: Vec<Option<String>>,
        applied: Vec<FilterOptions>,
    }

    impl SearchHost for Recorder {
        fn on_change(&mut self, value: &str, force: bool) {
            self.changes.push((value.to_owned(), force));
        }

        fn on_unfocus(&mut self, new_search: Option<&str>) {
            self.unfocus.push(new_search.map(str::to_owned));
        }

        fn on_filters_apply(&mut self, filters: &FilterOptions) {
            self.applied.push(filters.clone());
        }
    }

    fn controller(props: SearchBarProps) -> SearchInputController {
        let mut c = SearchInputController::with_current_year(
            SearchConfig::default(),
            Preferences::default(),
            props,
            2024,
        );
        c.set_viewport(Size::new(1280.0, 800.0));
        c.set_container_rect(Some(CONTAINER));
        c.set_trigger_rect(Some(TRIGGER));
        c.mount(0.0);
        c
    }

    fn click(x: f64, y: f64) -> DocumentEvent {
        DocumentEvent::Click {
            position: Point::new(x, y),
        }
    }

    fn down(x: f64, y: f64) -> DocumentEvent {
        DocumentEvent::PointerDown {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn typing_and_programmatic_sets_are_distinguished() {
        let mut c = controller(SearchBarProps::default());
        let mut host = Recorder::default();
        c.input("al", &mut host);
        c.set_search("alien", &mut host);
        assert_eq!(
            host.changes,
            vec![("al".to_owned(), false), ("alien".to_owned(), true)]
        );
    }

    #[test]
    fn clear_forces_empty_and_reports_cleared() {
        let mut c = controller(SearchBarProps::with_value("dune"));
        let mut host = Recorder::default();
        assert!(c.view().show_clear_button);
        c.clear(&mut host);
        assert_eq!(host.changes, vec![(String::new(), true)]);
        assert_eq!(host.unfocus, vec![Some(String::new())]);
    }

    #[test]
    fn outside_click_unfocuses_without_argument() {
        let mut c = controller(SearchBarProps::default());
        let mut host = Recorder::default();
        c.focus();
        c.handle_document_event(&click(500.0, 40.0), &mut host);
        assert!(c.is_focused());
        assert!(host.unfocus.is_empty());

        c.handle_document_event(&click(10.0, 500.0), &mut host);
        assert!(!c.is_focused());
        assert_eq!(host.unfocus, vec![None]);
    }

    #[test]
    fn clicks_before_layout_are_ignored() {
        let mut c = controller(SearchBarProps::default());
        c.set_container_rect(None);
        let mut host = Recorder::default();
        c.focus();
        c.handle_document_event(&click(10.0, 500.0), &mut host);
        assert!(c.is_focused());
        assert!(host.unfocus.is_empty());
    }

    #[test]
    fn focus_and_tooltip_are_exclusive() {
        let mut c = controller(SearchBarProps::default());
        c.pointer_enter();
        let v = c.view();
        assert!(v.show_tooltip && !v.focus_ring);
        assert_eq!(v.glow.map(|g| g.opacity), Some(1.0));

        c.focus();
        let v = c.view();
        assert!(!v.show_tooltip && v.focused && v.focus_ring);
        assert!(v.glow.is_none());
    }

    #[test]
    fn tooltip_needs_an_idle_empty_bar() {
        let mut hidden = controller(SearchBarProps {
            hide_tooltip: true,
            ..SearchBarProps::default()
        });
        hidden.pointer_enter();
        assert!(!hidden.view().show_tooltip);

        let mut typed = controller(SearchBarProps::with_value("x"));
        typed.pointer_enter();
        assert!(!typed.view().show_tooltip);
        assert!(typed.view().glow.is_none());

        let mut c = controller(SearchBarProps::default());
        c.pointer_enter();
        c.pointer_leave();
        assert!(!c.view().show_tooltip);
    }

    #[test]
    fn theme_follows_scroll_in_featured() {
        let mut c = controller(SearchBarProps {
            is_in_featured: true,
            ..SearchBarProps::default()
        });
        let mut host = Recorder::default();
        assert!(c.light_theme());
        c.handle_document_event(&DocumentEvent::Scroll { scroll_y: 650.0 }, &mut host);
        assert!(!c.light_theme());
        c.handle_document_event(&DocumentEvent::Scroll { scroll_y: 599.0 }, &mut host);
        assert!(c.light_theme());
    }

    #[test]
    fn sticky_bar_is_light_near_the_top() {
        let c = controller(SearchBarProps {
            is_sticky: true,
            ..SearchBarProps::default()
        });
        assert!(c.view().light_theme);
        assert!(!controller(SearchBarProps::default()).light_theme());
    }

    #[test]
    fn featured_preference_gates_featured_theme() {
        let mut c = controller(SearchBarProps {
            is_in_featured: true,
            ..SearchBarProps::default()
        });
        c.set_preferences(Preferences {
            featured: false,
            ..Preferences::default()
        });
        assert!(!c.light_theme());
    }

    #[test]
    fn props_change_rebinds_click_listener() {
        let mut c = controller(SearchBarProps::default());
        let generation = |c: &SearchInputController| {
            c.registry().binding(c.click_owner).map(|b| b.generation)
        };
        assert_eq!(generation(&c), Some(0));
        c.set_value("a");
        assert_eq!(generation(&c), Some(1));
        c.set_value("a");
        assert_eq!(generation(&c), Some(1));
        // Typing hides the hint, so only the control's own listeners remain.
        assert_eq!(c.registry().len(), 2);
    }

    #[test]
    fn mounted_bar_forwards_expected_kinds() {
        let c = controller(SearchBarProps::default());
        assert_eq!(
            c.listeners(),
            EventKinds::CLICK | EventKinds::SCROLL | EventKinds::POINTER_MOVE
        );
    }

    #[test]
    fn low_performance_mode_drops_the_glow_listener() {
        let mut c = controller(SearchBarProps::default());
        c.set_preferences(Preferences {
            low_performance_mode: true,
            ..Preferences::default()
        });
        assert!(!c.listeners().contains(EventKinds::POINTER_MOVE));
        assert!(c.view().glow.is_none());
    }

    #[test]
    fn glow_tracks_pointer_in_container_space() {
        let mut c = controller(SearchBarProps::default());
        let mut host = Recorder::default();
        c.handle_document_event(
            &DocumentEvent::PointerMove {
                position: Point::new(600.0, 45.0),
            },
            &mut host,
        );
        let offset = c.view().glow.and_then(|g| g.offset);
        assert_eq!(offset, Some(kurbo::Vec2::new(100.0, -75.0)));
    }

    #[test]
    fn filter_popup_opens_below_trigger() {
        let mut c = controller(SearchBarProps::default());
        assert!(c.toggle_filters());
        let placement = c.view().filter_popup.unwrap();
        assert_eq!(placement.top, 74.0);
        assert_eq!(placement.width, 448.0);
        assert!(c.listeners().contains(EventKinds::POINTER_DOWN));
        assert!(c.filter_draft().is_some_and(FilterDraft::is_default));
    }

    #[test]
    fn trigger_rect_is_reread_on_each_open() {
        let mut c = controller(SearchBarProps::default());
        c.toggle_filters();
        c.toggle_filters();
        c.set_trigger_rect(Some(Rect::new(820.0, 130.0, 852.0, 162.0)));
        c.toggle_filters();
        assert_eq!(c.view().filter_popup.map(|p| p.top), Some(174.0));
    }

    #[test]
    fn missing_trigger_keeps_popup_closed() {
        let mut c = controller(SearchBarProps::default());
        c.set_trigger_rect(None);
        assert!(!c.toggle_filters());
        assert!(!c.filters_open());
        assert!(!c.listeners().contains(EventKinds::POINTER_DOWN));
    }

    #[test]
    fn outside_pointer_down_dismisses_popup() {
        let mut c = controller(SearchBarProps::default());
        let mut host = Recorder::default();
        c.toggle_filters();
        c.set_popup_rect(PANEL);

        c.handle_document_event(&down(830.0, 40.0), &mut host);
        assert!(c.filters_open());
        c.handle_document_event(&down(900.0, 300.0), &mut host);
        assert!(c.filters_open());

        c.handle_document_event(&down(50.0, 700.0), &mut host);
        assert!(!c.filters_open());
        assert!(host.applied.is_empty());
    }

    #[test]
    fn apply_hands_snapshot_to_host_and_closes() {
        let mut c = controller(SearchBarProps::default());
        let mut host = Recorder::default();
        c.toggle_filters();
        assert!(c.edit_filters(|d| {
            d.toggle_member(ContentType::Movie)
                .set_year_bound(Edge::Min, 2000)
                .set_year_bound(Edge::Max, 2010)
                .set_rating_bound(Edge::Min, 5.0)
                .set_rating_bound(Edge::Max, 8.0)
                .toggle_member(ReleaseStatus::Released)
        }));

        let applied = c.apply_filters(&mut host).unwrap();
        assert_eq!(host.applied, vec![applied.clone()]);
        assert_eq!(applied.years, YearRange::new(2000, 2010));
        assert_eq!(applied.ratings, RatingRange::new(5.0, 8.0));
        assert!(applied.genres.is_empty());
        assert!(!c.filters_open());
        assert!(c.apply_filters(&mut host).is_none());
    }

    #[test]
    fn reset_keeps_popup_open() {
        let mut c = controller(SearchBarProps::default());
        c.toggle_filters();
        c.edit_filters(|d| d.toggle_member(Genre::Comedy));
        assert!(c.reset_filters());
        assert!(c.filters_open());
        assert!(c.filter_draft().is_some_and(FilterDraft::is_default));
    }

    #[test]
    fn closing_discards_the_draft() {
        let mut c = controller(SearchBarProps::default());
        c.toggle_filters();
        c.edit_filters(|d| d.toggle_member(Genre::Comedy));
        c.close_filters();
        assert!(!c.edit_filters(|d| d.reset()));
        c.toggle_filters();
        assert!(c.filter_draft().is_some_and(FilterDraft::is_default));
    }

    #[test]
    fn unmounted_bar_does_not_open_filters() {
        let mut c = SearchInputController::with_current_year(
            SearchConfig::default(),
            Preferences::default(),
            SearchBarProps::default(),
            2024,
        );
        c.set_viewport(Size::new(1280.0, 800.0));
        c.set_trigger_rect(Some(TRIGGER));
        assert!(!c.toggle_filters());
        assert!(!c.filters_open());
        assert!(c.registry().is_empty());

        c.mount(0.0);
        c.unmount();
        assert!(!c.toggle_filters());
        assert!(c.registry().is_empty());
    }

    #[test]
    fn low_performance_mode_has_no_hover_hint() {
        let mut c = controller(SearchBarProps::default());
        c.set_preferences(Preferences {
            low_performance_mode: true,
            ..Preferences::default()
        });
        c.pointer_enter();
        let v = c.view();
        assert!(v.glow.is_none());
        assert!(!v.show_tooltip);

        c.set_preferences(Preferences::default());
        c.pointer_enter();
        assert!(c.view().show_tooltip);
    }

    #[test]
    fn unmount_releases_every_listener() {
        let mut c = controller(SearchBarProps::default());
        for _ in 0..20 {
            c.toggle_filters();
            c.toggle_filters();
        }
        c.toggle_filters();
        c.unmount();
        assert!(c.registry().is_empty());
        assert!(!c.filters_open());
        c.unmount();
        assert!(c.registry().is_empty());
    }

    #[test]
    fn events_after_unmount_do_nothing() {
        let mut c = controller(SearchBarProps::default());
        let mut host = Recorder::default();
        c.focus();
        c.unmount();
        c.handle_document_event(&click(10.0, 500.0), &mut host);
        assert!(host.unfocus.is_empty());
        assert!(c.is_focused());
    }
}

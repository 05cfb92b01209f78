// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Popup: an anchored floating panel with a small, explicit lifecycle.
//!
//! ## State machine
//!
//! ```text
//! Closed --(toggle / open with an anchor)--> Open
//! Open --(toggle | outside pointer-down | close control | applied | teardown)--> Closed
//! ```
//!
//! There are no other transitions. Opening requires an anchor rectangle; without one the
//! popup stays closed rather than positioning itself at an undefined location.
//!
//! ## Placement
//!
//! [`Placement`] is computed once, when the popup opens, from the anchor's bounding box:
//! the panel's top edge sits [`PopupGeometry::offset`] below the anchor's bottom edge and
//! the panel is inset from the viewport's right edge. It is not re-tracked afterwards: if the
//! anchor moves while the popup is open, the placement stays where it was until the next
//! close/open cycle.
//!
//! ## Dismissal
//!
//! While open, the popup listens for pointer-down events (through a
//! [`ListenerRegistry`]) and closes on one that lands outside both its own panel and the
//! anchor. The anchor is included so that pressing the trigger that opened the popup is left
//! to the trigger's own toggle. Until the host reports the laid-out panel rectangle with
//! [`AnchoredPopup::set_panel_region`] no dismissal happens.
//!
//! ## Content
//!
//! The popup owns a content value `C` (for example a filter draft) that exists only while
//! the popup is open. Closing returns it, so an "apply" can take a final snapshot and every
//! other close simply discards it.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use sightline_event_state::event::DocumentEvent;
//! use sightline_event_state::listener::ListenerRegistry;
//! use sightline_popup::{AnchoredPopup, PopupGeometry};
//!
//! let mut registry = ListenerRegistry::new();
//! let mut popup: AnchoredPopup<u32> = AnchoredPopup::new(&mut registry, PopupGeometry::default());
//!
//! let trigger = Rect::new(900.0, 20.0, 940.0, 60.0);
//! let viewport = Size::new(1280.0, 800.0);
//! assert!(popup.toggle(Some(trigger), viewport, || 0, &mut registry).unwrap());
//! assert_eq!(popup.placement().map(|p| p.top), Some(72.0));
//!
//! popup.set_panel_region(Rect::new(832.0, 72.0, 1264.0, 500.0));
//! let outside = DocumentEvent::PointerDown { position: Point::new(10.0, 10.0) };
//! assert!(popup.handle_document_event(&outside, &mut registry).is_some());
//! assert!(!popup.is_open());
//! assert!(registry.is_empty());
//! ```

use kurbo::{Rect, Size};
use thiserror::Error;

use sightline_event_state::event::{DocumentEvent, EventKinds, OwnerId};
use sightline_event_state::listener::ListenerRegistry;
use sightline_event_state::outside::OutsideWatcher;

/// Fixed geometry parameters for popup placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopupGeometry {
    /// Gap between the anchor's bottom edge and the panel's top edge.
    pub offset: f64,
    /// Distance between the panel's right edge and the viewport's right edge.
    pub right_inset: f64,
    /// Maximum panel width.
    pub max_width: f64,
    /// Fraction of the viewport width the panel may use.
    pub viewport_width_ratio: f64,
    /// Fraction of the viewport height the panel may use before scrolling internally.
    pub viewport_height_ratio: f64,
}

impl Default for PopupGeometry {
    fn default() -> Self {
        Self {
            offset: 12.0,
            right_inset: 16.0,
            max_width: 448.0,
            viewport_width_ratio: 0.9,
            viewport_height_ratio: 0.8,
        }
    }
}

/// Where the panel goes, fixed at open time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Top edge in viewport coordinates.
    pub top: f64,
    /// Distance from the viewport's right edge.
    pub right: f64,
    /// Panel width.
    pub width: f64,
    /// Maximum panel height.
    pub max_height: f64,
}

impl Placement {
    /// Compute the placement for an anchor in a viewport.
    pub fn compute(anchor: Rect, viewport: Size, geometry: &PopupGeometry) -> Self {
        let width = (viewport.width * geometry.viewport_width_ratio)
            .min(geometry.max_width)
            .max(0.0);
        Self {
            top: anchor.y1 + geometry.offset,
            right: geometry.right_inset,
            width,
            max_height: (viewport.height * geometry.viewport_height_ratio).max(0.0),
        }
    }

    /// Panel frame for a given content height, clipped to the maximum height.
    pub fn frame(&self, viewport: Size, content_height: f64) -> Rect {
        let x1 = viewport.width - self.right;
        let height = content_height.clamp(0.0, self.max_height);
        Rect::new(x1 - self.width, self.top, x1, self.top + height)
    }
}

/// Why a popup closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// Pointer-down outside the panel and the anchor.
    OutsidePointer,
    /// The panel's own close control.
    CloseControl,
    /// The content was applied.
    Applied,
    /// The trigger was activated again.
    Toggled,
    /// The owner is being torn down.
    Teardown,
}

/// Popup errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PopupError {
    /// There was no anchor element to position against.
    #[error("popup anchor is not attached")]
    MissingAnchor,
}

/// State of an open popup.
#[derive(Clone, Debug)]
pub struct OpenPopup<C> {
    /// Anchor bounding box read at open time.
    pub anchor: Rect,
    /// Placement computed at open time.
    pub placement: Placement,
    /// Laid-out panel rectangle, once the host reports it.
    pub panel: Option<Rect>,
    /// Content owned by the open popup.
    pub content: C,
}

/// Lifecycle state.
#[derive(Clone, Debug)]
pub enum PopupState<C> {
    /// Nothing is shown; no content exists.
    Closed,
    /// The panel is shown.
    Open(OpenPopup<C>),
}

/// A floating panel anchored below a trigger element.
#[derive(Clone, Debug)]
pub struct AnchoredPopup<C> {
    owner: OwnerId,
    geometry: PopupGeometry,
    state: PopupState<C>,
    watcher: OutsideWatcher,
}

impl<C> AnchoredPopup<C> {
    /// Create a closed popup whose listeners live in `registry`.
    pub fn new(registry: &mut ListenerRegistry, geometry: PopupGeometry) -> Self {
        Self {
            owner: registry.allocate_owner(),
            geometry,
            state: PopupState::Closed,
            watcher: OutsideWatcher::new(EventKinds::POINTER_DOWN),
        }
    }

    /// Listener owner id of this popup.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Geometry parameters.
    pub fn geometry(&self) -> &PopupGeometry {
        &self.geometry
    }

    /// Change geometry parameters. Takes effect at the next open.
    pub fn set_geometry(&mut self, geometry: PopupGeometry) {
        self.geometry = geometry;
    }

    /// Current state.
    pub fn state(&self) -> &PopupState<C> {
        &self.state
    }

    /// Whether the panel is shown.
    pub fn is_open(&self) -> bool {
        matches!(self.state, PopupState::Open(_))
    }

    /// Placement, while open.
    pub fn placement(&self) -> Option<&Placement> {
        self.open_state().map(|open| &open.placement)
    }

    /// Anchor rectangle captured at open time, while open.
    pub fn anchor(&self) -> Option<Rect> {
        self.open_state().map(|open| open.anchor)
    }

    /// Content, while open.
    pub fn content(&self) -> Option<&C> {
        self.open_state().map(|open| &open.content)
    }

    /// Mutable content, while open.
    pub fn content_mut(&mut self) -> Option<&mut C> {
        match &mut self.state {
            PopupState::Open(open) => Some(&mut open.content),
            PopupState::Closed => None,
        }
    }

    /// Replace the content with `f(&content)`, while open. Returns whether anything changed.
    pub fn update_content(&mut self, f: impl FnOnce(&C) -> C) -> bool {
        match &mut self.state {
            PopupState::Open(open) => {
                open.content = f(&open.content);
                true
            }
            PopupState::Closed => false,
        }
    }

    /// Open below `anchor`, creating the content with `content`.
    ///
    /// Opening an already open popup is a no-op. With no anchor the popup stays closed and
    /// [`PopupError::MissingAnchor`] is returned.
    pub fn open(
        &mut self,
        anchor: Option<Rect>,
        viewport: Size,
        content: impl FnOnce() -> C,
        registry: &mut ListenerRegistry,
    ) -> Result<(), PopupError> {
        if self.is_open() {
            return Ok(());
        }
        let anchor = anchor.ok_or(PopupError::MissingAnchor)?;
        let placement = Placement::compute(anchor, viewport, &self.geometry);

        self.watcher.set_regions([None, Some(anchor)]);
        registry.bind(self.owner, EventKinds::POINTER_DOWN, &rect_key(anchor));
        self.state = PopupState::Open(OpenPopup {
            anchor,
            placement,
            panel: None,
            content: content(),
        });
        tracing::debug!(owner = self.owner.get(), ?placement, "popup opened");
        Ok(())
    }

    /// Open if closed, close with [`CloseReason::Toggled`] if open.
    ///
    /// Returns whether the popup is open afterwards.
    pub fn toggle(
        &mut self,
        anchor: Option<Rect>,
        viewport: Size,
        content: impl FnOnce() -> C,
        registry: &mut ListenerRegistry,
    ) -> Result<bool, PopupError> {
        if self.is_open() {
            self.close(CloseReason::Toggled, registry);
            Ok(false)
        } else {
            self.open(anchor, viewport, content, registry)?;
            Ok(true)
        }
    }

    /// Close, returning the content if the popup was open.
    pub fn close(&mut self, reason: CloseReason, registry: &mut ListenerRegistry) -> Option<C> {
        registry.unbind(self.owner);
        match core::mem::replace(&mut self.state, PopupState::Closed) {
            PopupState::Open(open) => {
                self.watcher.clear_regions();
                tracing::debug!(owner = self.owner.get(), ?reason, "popup closed");
                Some(open.content)
            }
            PopupState::Closed => None,
        }
    }

    /// Record the laid-out panel rectangle so outside pointer-downs can be detected.
    ///
    /// Ignored while closed.
    pub fn set_panel_region(&mut self, panel: Rect) {
        if let PopupState::Open(open) = &mut self.state {
            open.panel = Some(panel);
            self.watcher.set_regions([Some(panel), Some(open.anchor)]);
        }
    }

    /// Handle a routed document event. Returns the content if the event dismissed the popup.
    pub fn handle_document_event(
        &mut self,
        event: &DocumentEvent,
        registry: &mut ListenerRegistry,
    ) -> Option<C> {
        if !self.is_open() || !self.watcher.check(event) {
            return None;
        }
        self.close(CloseReason::OutsidePointer, registry)
    }

    /// Release everything; the popup ends closed.
    pub fn teardown(&mut self, registry: &mut ListenerRegistry) {
        self.close(CloseReason::Teardown, registry);
    }

    fn open_state(&self) -> Option<&OpenPopup<C>> {
        match &self.state {
            PopupState::Open(open) => Some(open),
            PopupState::Closed => None,
        }
    }
}

fn rect_key(rect: Rect) -> [u64; 4] {
    [
        rect.x0.to_bits(),
        rect.y0.to_bits(),
        rect.x1.to_bits(),
        rect.y1.to_bits(),
    ]
}

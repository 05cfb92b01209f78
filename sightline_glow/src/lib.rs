// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Glow: a pointer-following highlight for hover targets.
//!
//! A [`PointerGlow`] listens to pointer movement anywhere in the document and republishes
//! the pointer position in its container's local coordinates, shifted by half the glow size
//! so that a square radial gradient of [`GlowStyle::size`] is centered on the pointer. The
//! host paints the gradient at [`GlowFrame::offset`].
//!
//! - Disabled (`enabled == false`): the glow keeps tracking and stays in the layout, but
//!   [`GlowFrame::opacity`] is `0.0`, so opacity transitions stay smooth.
//! - Low-performance mode: nothing is rendered ([`PointerGlow::frame`] is `None`) and no
//!   listener is registered at all.
//! - Container not attached yet: pointer moves are skipped silently.
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use sightline_event_state::listener::ListenerRegistry;
//! use sightline_glow::{GlowStyle, PointerGlow};
//!
//! let mut registry = ListenerRegistry::new();
//! let mut glow = PointerGlow::new(&mut registry, GlowStyle::default(), false);
//! glow.mount(&mut registry);
//! glow.set_container(Some(Rect::new(100.0, 50.0, 500.0, 100.0)));
//!
//! glow.on_pointer_move(Point::new(250.0, 80.0));
//! // 250 - 100 - 100, 80 - 50 - 100
//! assert_eq!(glow.offset(), Some(Vec2::new(50.0, -70.0)));
//! assert_eq!(glow.frame().map(|f| f.opacity), Some(0.0));
//! ```

use kurbo::{Point, Rect, Vec2};

use sightline_event_state::event::{DocumentEvent, EventKinds, OwnerId};
use sightline_event_state::listener::ListenerRegistry;

/// Default glow square edge, in pixels.
pub const SIZE_DEFAULT: f64 = 200.0;

/// Visual parameters of the glow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlowStyle {
    /// Edge length of the gradient square.
    pub size: f64,
    /// Opacity at the gradient's center.
    pub gradient_opacity: f64,
    /// Percentage of the radius at which the gradient reaches zero.
    pub gradient_spread: f64,
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            size: SIZE_DEFAULT,
            gradient_opacity: 1.0,
            gradient_spread: 70.0,
        }
    }
}

/// What the host paints for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlowFrame {
    /// Top-left of the gradient square in container coordinates, once the pointer has moved.
    pub offset: Option<Vec2>,
    /// Layer opacity: `1.0` when enabled, `0.0` otherwise.
    pub opacity: f64,
    /// Style to paint with.
    pub style: GlowStyle,
}

/// Pointer-tracking glow effect.
#[derive(Clone, Debug)]
pub struct PointerGlow {
    owner: OwnerId,
    style: GlowStyle,
    enabled: bool,
    low_performance: bool,
    mounted: bool,
    container: Option<Rect>,
    offset: Option<Vec2>,
}

impl PointerGlow {
    /// Create an unmounted glow.
    pub fn new(registry: &mut ListenerRegistry, style: GlowStyle, low_performance: bool) -> Self {
        Self {
            owner: registry.allocate_owner(),
            style,
            enabled: false,
            low_performance,
            mounted: false,
            container: None,
            offset: None,
        }
    }

    /// Listener owner id.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Start tracking. Registers nothing in low-performance mode.
    pub fn mount(&mut self, registry: &mut ListenerRegistry) {
        self.mounted = true;
        self.sync_listener(registry);
    }

    /// Stop tracking and drop the listener.
    pub fn unmount(&mut self, registry: &mut ListenerRegistry) {
        self.mounted = false;
        self.offset = None;
        self.sync_listener(registry);
    }

    /// Whether the glow is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Switch low-performance mode, registering or dropping the listener accordingly.
    pub fn set_low_performance(&mut self, low_performance: bool, registry: &mut ListenerRegistry) {
        if self.low_performance != low_performance {
            tracing::debug!(owner = self.owner.get(), low_performance, "glow gating changed");
        }
        self.low_performance = low_performance;
        self.sync_listener(registry);
    }

    /// Whether low-performance mode is active.
    pub fn is_low_performance(&self) -> bool {
        self.low_performance
    }

    /// Change the style. The size is part of the listener's dependency set.
    pub fn set_style(&mut self, style: GlowStyle, registry: &mut ListenerRegistry) {
        self.style = style;
        self.sync_listener(registry);
    }

    /// Current style.
    pub fn style(&self) -> &GlowStyle {
        &self.style
    }

    /// Show (`true`) or fade out (`false`) the glow without unmounting it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the glow is shown.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Attach or detach the container whose top-left is the local origin.
    pub fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
    }

    /// Track a pointer position given in viewport coordinates.
    ///
    /// Returns the new offset, or `None` when the update was skipped.
    pub fn on_pointer_move(&mut self, position: Point) -> Option<Vec2> {
        if !self.mounted || self.low_performance {
            return None;
        }
        let Some(container) = self.container else {
            tracing::trace!(owner = self.owner.get(), "glow container not attached; move skipped");
            return None;
        };
        let half = self.style.size / 2.0;
        let offset = Vec2::new(
            (position.x - container.x0 - half).round(),
            (position.y - container.y0 - half).round(),
        );
        self.offset = Some(offset);
        Some(offset)
    }

    /// Handle a routed document event. Returns whether the offset changed.
    pub fn handle_document_event(&mut self, event: &DocumentEvent) -> bool {
        match *event {
            DocumentEvent::PointerMove { position } => {
                let before = self.offset;
                self.on_pointer_move(position).is_some() && self.offset != before
            }
            _ => false,
        }
    }

    /// Last published offset.
    pub fn offset(&self) -> Option<Vec2> {
        self.offset
    }

    /// Current layer opacity.
    pub fn opacity(&self) -> f64 {
        if self.enabled { 1.0 } else { 0.0 }
    }

    /// What to paint, or `None` when nothing is rendered (low-performance mode, unmounted).
    pub fn frame(&self) -> Option<GlowFrame> {
        if self.low_performance || !self.mounted {
            return None;
        }
        Some(GlowFrame {
            offset: self.offset,
            opacity: self.opacity(),
            style: self.style,
        })
    }

    fn sync_listener(&self, registry: &mut ListenerRegistry) {
        if self.mounted && !self.low_performance {
            registry.bind(
                self.owner,
                EventKinds::POINTER_MOVE,
                &self.style.size.to_bits(),
            );
        } else {
            registry.unbind(self.owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_event_state::listener::BindOutcome;

    fn mounted(registry: &mut ListenerRegistry, low_performance: bool) -> PointerGlow {
        let mut glow = PointerGlow::new(registry, GlowStyle::default(), low_performance);
        glow.mount(registry);
        glow
    }

    #[test]
    fn offset_centers_glow_on_pointer() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        glow.set_container(Some(Rect::new(10.0, 20.0, 410.0, 70.0)));
        assert_eq!(
            glow.on_pointer_move(Point::new(110.0, 120.0)),
            Some(Vec2::new(0.0, 0.0))
        );
    }

    #[test]
    fn offset_is_rounded_to_whole_pixels() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        glow.set_container(Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(
            glow.on_pointer_move(Point::new(100.4, 100.6)),
            Some(Vec2::new(0.0, 1.0))
        );
    }

    #[test]
    fn detached_container_skips_silently() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        assert!(glow.on_pointer_move(Point::new(5.0, 5.0)).is_none());
        assert!(glow.offset().is_none());
        assert!(glow.frame().is_some());
    }

    #[test]
    fn disabled_glow_is_present_but_transparent() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        assert_eq!(glow.frame().map(|f| f.opacity), Some(0.0));
        glow.set_enabled(true);
        assert_eq!(glow.frame().map(|f| f.opacity), Some(1.0));
    }

    #[test]
    fn low_performance_renders_nothing_and_registers_nothing() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, true);
        glow.set_container(Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(registry.is_empty());
        assert!(glow.frame().is_none());
        assert!(glow.on_pointer_move(Point::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn toggling_low_performance_rebinds() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        assert!(registry.is_listening(glow.owner(), EventKinds::POINTER_MOVE));
        glow.set_low_performance(true, &mut registry);
        assert!(registry.is_empty());
        glow.set_low_performance(false, &mut registry);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn size_change_rebinds_once() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        glow.set_style(
            GlowStyle {
                size: 120.0,
                ..GlowStyle::default()
            },
            &mut registry,
        );
        assert_eq!(registry.binding(glow.owner()).map(|b| b.generation), Some(1));
        assert_eq!(
            registry.bind(glow.owner(), EventKinds::POINTER_MOVE, &120.0_f64.to_bits()),
            BindOutcome::Unchanged
        );
    }

    #[test]
    fn unmount_releases_listener() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        glow.unmount(&mut registry);
        assert!(registry.is_empty());
        assert!(glow.frame().is_none());
        // Tolerates a second teardown.
        glow.unmount(&mut registry);
    }

    #[test]
    fn only_pointer_moves_are_handled() {
        let mut registry = ListenerRegistry::new();
        let mut glow = mounted(&mut registry, false);
        glow.set_container(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(glow.handle_document_event(&DocumentEvent::PointerMove {
            position: Point::new(3.0, 4.0)
        }));
        assert!(!glow.handle_document_event(&DocumentEvent::Click {
            position: Point::new(30.0, 40.0)
        }));
    }
}

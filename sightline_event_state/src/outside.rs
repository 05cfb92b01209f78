// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-pointer detection.
//!
//! An [`OutsideWatcher`] owns one or more regions (the rectangles of the elements a
//! component considers its own) and answers whether a pointer event landed outside all of
//! them. It is used for focus loss of a text control (on click) and for dismissing a popup
//! (on pointer down, with the popup panel and its trigger as the owned regions).
//!
//! Regions are `Option<Rect>`: `None` stands for an element that is not attached yet, for
//! example a panel that has not been laid out. While any owned region is detached the
//! watcher classifies every point as [`Containment::Detached`] and never reports an outside
//! event, so a component cannot be dismissed by the very first frame that mounts it.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use sightline_event_state::event::{DocumentEvent, EventKinds};
//! use sightline_event_state::outside::{Containment, OutsideWatcher};
//!
//! let panel = Rect::new(100.0, 60.0, 300.0, 400.0);
//! let trigger = Rect::new(260.0, 10.0, 290.0, 40.0);
//!
//! let mut watcher = OutsideWatcher::new(EventKinds::POINTER_DOWN);
//! watcher.set_regions([Some(panel), Some(trigger)]);
//!
//! assert_eq!(watcher.classify(Point::new(270.0, 20.0)), Containment::Inside);
//! assert!(watcher.check(&DocumentEvent::PointerDown { position: Point::new(5.0, 5.0) }));
//! // Clicks are not this watcher's trigger.
//! assert!(!watcher.check(&DocumentEvent::Click { position: Point::new(5.0, 5.0) }));
//! ```

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::event::{DocumentEvent, EventKinds};

/// Where a point lies relative to the owned regions of an [`OutsideWatcher`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Containment {
    /// Inside at least one owned region.
    Inside,
    /// Outside every owned region.
    Outside,
    /// At least one owned region is not attached; no decision is made.
    Detached,
}

/// Watches for pointer events outside a set of owned regions.
#[derive(Clone, Debug)]
pub struct OutsideWatcher {
    trigger: EventKinds,
    regions: SmallVec<[Option<Rect>; 2]>,
}

impl OutsideWatcher {
    /// Create a watcher reacting to the given event kinds. It owns no region yet.
    pub fn new(trigger: EventKinds) -> Self {
        Self {
            trigger,
            regions: SmallVec::new(),
        }
    }

    /// Event kinds this watcher reacts to.
    pub fn trigger(&self) -> EventKinds {
        self.trigger
    }

    /// Replace the owned regions.
    pub fn set_regions(&mut self, regions: impl IntoIterator<Item = Option<Rect>>) {
        self.regions.clear();
        self.regions.extend(regions);
    }

    /// Add one owned region.
    pub fn push_region(&mut self, region: Option<Rect>) {
        self.regions.push(region);
    }

    /// Remove every owned region.
    pub fn clear_regions(&mut self) {
        self.regions.clear();
    }

    /// Currently owned regions.
    pub fn regions(&self) -> &[Option<Rect>] {
        &self.regions
    }

    /// Classify a point against the owned regions.
    ///
    /// Containment is edge-inclusive. A watcher without any region has nothing to be
    /// outside of and reports [`Containment::Detached`].
    pub fn classify(&self, point: Point) -> Containment {
        if self.regions.is_empty() || self.regions.iter().any(Option::is_none) {
            return Containment::Detached;
        }
        let inside = self
            .regions
            .iter()
            .flatten()
            .any(|rect| contains_inclusive(rect, point));
        if inside {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }

    /// Whether `event` is a trigger-kind pointer event outside every owned region.
    pub fn check(&self, event: &DocumentEvent) -> bool {
        if !self.trigger.intersects(event.kind()) {
            return false;
        }
        event
            .position()
            .is_some_and(|position| self.classify(position) == Containment::Outside)
    }
}

// `Rect::contains` excludes the far edges; an element's border belongs to it.
fn contains_inclusive(rect: &Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watcher_with(regions: &[Option<Rect>]) -> OutsideWatcher {
        let mut w = OutsideWatcher::new(EventKinds::CLICK);
        w.set_regions(regions.iter().copied());
        w
    }

    #[test]
    fn inside_any_region_is_inside() {
        let w = watcher_with(&[
            Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            Some(Rect::new(50.0, 50.0, 60.0, 60.0)),
        ]);
        assert_eq!(w.classify(Point::new(5.0, 5.0)), Containment::Inside);
        assert_eq!(w.classify(Point::new(55.0, 55.0)), Containment::Inside);
        assert_eq!(w.classify(Point::new(30.0, 30.0)), Containment::Outside);
    }

    #[test]
    fn edges_are_inside() {
        let w = watcher_with(&[Some(Rect::new(0.0, 0.0, 10.0, 10.0))]);
        assert_eq!(w.classify(Point::new(10.0, 10.0)), Containment::Inside);
        assert_eq!(w.classify(Point::new(0.0, 0.0)), Containment::Inside);
    }

    #[test]
    fn detached_region_suppresses_decision() {
        let w = watcher_with(&[Some(Rect::new(0.0, 0.0, 10.0, 10.0)), None]);
        assert_eq!(w.classify(Point::new(100.0, 100.0)), Containment::Detached);
        assert!(!w.check(&DocumentEvent::Click {
            position: Point::new(100.0, 100.0)
        }));
    }

    #[test]
    fn no_regions_is_detached() {
        let w = OutsideWatcher::new(EventKinds::CLICK);
        assert_eq!(w.classify(Point::ZERO), Containment::Detached);
    }

    #[test]
    fn only_trigger_kinds_are_checked() {
        let w = watcher_with(&[Some(Rect::new(0.0, 0.0, 10.0, 10.0))]);
        let far = Point::new(100.0, 100.0);
        assert!(w.check(&DocumentEvent::Click { position: far }));
        assert!(!w.check(&DocumentEvent::PointerDown { position: far }));
        assert!(!w.check(&DocumentEvent::PointerMove { position: far }));
        assert!(!w.check(&DocumentEvent::Scroll { scroll_y: 0.0 }));
    }

    #[test]
    fn regions_can_be_replaced_and_cleared() {
        let mut w = watcher_with(&[Some(Rect::new(0.0, 0.0, 10.0, 10.0))]);
        w.push_region(Some(Rect::new(20.0, 0.0, 30.0, 10.0)));
        assert_eq!(w.regions().len(), 2);
        assert_eq!(w.classify(Point::new(25.0, 5.0)), Containment::Inside);

        w.clear_regions();
        assert!(w.regions().is_empty());
        assert_eq!(w.trigger(), EventKinds::CLICK);
    }
}

// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document and window events as seen by Sightline components.

use kurbo::Point;

bitflags::bitflags! {
    /// Event streams a component may listen to at document or window level.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// Completed click (press and release).
        const CLICK        = 0b0000_0001;
        /// Pointer pressed.
        const POINTER_DOWN = 0b0000_0010;
        /// Pointer moved.
        const POINTER_MOVE = 0b0000_0100;
        /// Window scrolled.
        const SCROLL       = 0b0000_1000;
    }
}

/// A single event delivered by the host.
///
/// Positions are in the same viewport coordinate space as every rectangle the host
/// reports to Sightline components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DocumentEvent {
    /// A click anywhere in the document.
    Click {
        /// Pointer position.
        position: Point,
    },
    /// A pointer press anywhere in the document.
    PointerDown {
        /// Pointer position.
        position: Point,
    },
    /// Pointer movement anywhere in the document.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// The window scrolled.
    Scroll {
        /// Vertical scroll offset after the scroll.
        scroll_y: f64,
    },
}

impl DocumentEvent {
    /// The stream this event belongs to.
    pub const fn kind(&self) -> EventKinds {
        match self {
            Self::Click { .. } => EventKinds::CLICK,
            Self::PointerDown { .. } => EventKinds::POINTER_DOWN,
            Self::PointerMove { .. } => EventKinds::POINTER_MOVE,
            Self::Scroll { .. } => EventKinds::SCROLL,
        }
    }

    /// Pointer position for pointer events, `None` for scroll.
    pub const fn position(&self) -> Option<Point> {
        match *self {
            Self::Click { position }
            | Self::PointerDown { position }
            | Self::PointerMove { position } => Some(position),
            Self::Scroll { .. } => None,
        }
    }
}

/// Identifier of a listener owner within a [`ListenerRegistry`](crate::listener::ListenerRegistry).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub(crate) u32);

impl OwnerId {
    /// Raw index, useful for logging.
    pub const fn get(self) -> u32 {
        self.0
    }
}

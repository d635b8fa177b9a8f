// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by the drag controller.
//!
//! Hosts translate their native pointer and keyboard events into these small
//! value types. All positions are client (viewport) coordinates.

use kurbo::Point;

/// Pointer button of a press event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// The primary (usually left) button.
    Primary,
    /// The secondary (usually right) button.
    Secondary,
    /// The auxiliary (usually middle) button.
    Auxiliary,
    /// Any other button, identified by its host-specific index.
    Other(u16),
}

/// Keys the controller reacts to while dragging.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The escape key; cancels the current drag.
    Escape,
    /// Any other key, identified by its host-specific key code.
    Other(u32),
}

/// A press on a drag handle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PressEvent {
    /// The pressed button.
    pub button: PointerButton,
    /// Pointer position in client coordinates.
    pub position: Point,
}

impl PressEvent {
    /// A primary button press at `position`.
    #[must_use]
    pub fn primary(position: Point) -> Self {
        Self {
            button: PointerButton::Primary,
            position,
        }
    }
}

/// Input delivered to the controller while its input capture is installed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// The pointer moved.
    PointerMove {
        /// Pointer position in client coordinates.
        position: Point,
    },
    /// The pointer button was released.
    PointerUp {
        /// Pointer position in client coordinates.
        position: Point,
    },
    /// A key was pressed.
    KeyDown(Key),
    /// The wheel was turned.
    Wheel {
        /// Pointer position in client coordinates.
        position: Point,
        /// Vertical wheel velocity in host units; positive scrolls down.
        delta_y: f64,
    },
}

/// What the host should do with an event after handing it to the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventDisposition {
    /// The controller owns the event: prevent default handling and stop
    /// propagation.
    Consumed,
    /// No drag is capturing input; route the event normally.
    Ignored,
}

impl EventDisposition {
    /// Returns `true` for [`EventDisposition::Consumed`].
    #[must_use]
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

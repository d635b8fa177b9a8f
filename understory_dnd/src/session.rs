// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State of one drag gesture, from press to finalized drop or cancel.

use alloc::boxed::Box;

use hashbrown::HashSet;
use kurbo::{Point, Vec2};

use crate::capability::{Draggable, TargetId};

/// Where a drag session is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Created from a press, waiting for the coordinator's approval.
    Starting,
    /// Following the pointer with input captured.
    Dragging,
    /// Animating the helper to the placeholder before finalizing the drop.
    Dropping,
    /// Animating the helper back to the start position before finalizing
    /// the cancel.
    Cancelling,
}

impl DragPhase {
    /// Returns `true` once the session is winding down.
    #[must_use]
    pub fn is_ending(self) -> bool {
        matches!(self, Self::Dropping | Self::Cancelling)
    }
}

/// Pointer geometry of the running session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SessionGeometry {
    /// Pointer offset inside the draggable's element at press time.
    pub cursor_offset: Vec2,
    /// Absolute position of the draggable before the drag; cancel destination.
    pub start_position: Point,
    /// Pointer position of the press.
    pub press_position: Point,
    /// Latest pointer position.
    pub pointer_position: Point,
}

impl SessionGeometry {
    /// Pointer travel since the press.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.pointer_position - self.press_position
    }
}

pub(crate) struct DragSession<E> {
    pub(crate) draggable: Box<dyn Draggable<E>>,
    pub(crate) helper: E,
    pub(crate) placeholder: E,
    pub(crate) current_target: Option<TargetId>,
    /// Targets asked to remove the placeholder after hosting it; teardown
    /// skips them unless they host it again.
    pub(crate) released: HashSet<TargetId>,
    pub(crate) geometry: SessionGeometry,
    pub(crate) phase: DragPhase,
}

impl<E> DragSession<E> {
    pub(crate) fn new(
        draggable: Box<dyn Draggable<E>>,
        helper: E,
        placeholder: E,
        current_target: Option<TargetId>,
        cursor_offset: Vec2,
        start_position: Point,
        press_position: Point,
    ) -> Self {
        Self {
            draggable,
            helper,
            placeholder,
            current_target,
            released: HashSet::new(),
            geometry: SessionGeometry {
                cursor_offset,
                start_position,
                press_position,
                pointer_position: press_position,
            },
            phase: DragPhase::Starting,
        }
    }

    pub(crate) fn pointer(&self) -> Point {
        self.geometry.pointer_position
    }

    /// Records a new pointer position, returning the movement since the last one.
    pub(crate) fn update_pointer(&mut self, position: Point) -> Vec2 {
        let delta = position - self.geometry.pointer_position;
        self.geometry.pointer_position = position;
        delta
    }

    pub(crate) fn mark_hosting(&mut self, target: TargetId) {
        self.released.remove(&target);
    }

    pub(crate) fn mark_released(&mut self, target: TargetId) {
        self.released.insert(target);
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for DragSession<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragSession")
            .field("helper", &self.helper)
            .field("placeholder", &self.placeholder)
            .field("current_target", &self.current_target)
            .field("released", &self.released)
            .field("geometry", &self.geometry)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

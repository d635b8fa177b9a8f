// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-of-drag animation requests.
//!
//! When a drag ends the helper glides from where it was released to its
//! resting place: the placeholder on drop, the start position on cancel.
//! The controller describes that movement as a [`MoveAnimation`] and hands it
//! to the host's animation primitive, which reports completion through
//! [`DragController::finish_animation`](crate::DragController::finish_animation).

use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::task::AnimationTicket;

/// Default duration of the end animation.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// A request to move `element` from `from` to `to` over `duration`.
///
/// Both positions are in the element's parent-relative (`left`/`top`)
/// coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveAnimation<E> {
    /// The drag helper being animated.
    pub element: E,
    /// Current helper position.
    pub from: Point,
    /// Resting position.
    pub to: Point,
    /// Total animation time.
    pub duration: Duration,
    /// Identifies the completion continuation.
    pub ticket: AnimationTicket,
}

impl<E> MoveAnimation<E> {
    /// Linear position at `progress` (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn position_at(&self, progress: f64) -> Point {
        self.from.lerp(self.to, progress.clamp(0.0, 1.0))
    }

    /// Total displacement of the animation.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.to - self.from
    }
}

/// Converts an absolute `destination` into the coordinate space of a parent
/// whose absolute origin is `parent_origin`.
pub(crate) fn parent_relative(destination: Point, parent_origin: Point) -> Point {
    (destination - parent_origin).to_point()
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis constraints for a drag gesture.

use kurbo::Point;

/// The allowed drag and drop orientation.
///
/// Drop targets receive the orientation with every hit-test so they can
/// ignore the unused axis, and the controller applies it when positioning
/// the drag helper.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Drag and drop in all directions.
    #[default]
    All,
    /// Only horizontal drag and drop; the pointer's y coordinate is ignored.
    Horizontal,
    /// Only vertical drag and drop; the pointer's x coordinate is ignored.
    Vertical,
}

impl Orientation {
    /// Returns `true` if movement along the x axis participates in the drag.
    #[must_use]
    pub fn tracks_x(self) -> bool {
        !matches!(self, Self::Vertical)
    }

    /// Returns `true` if movement along the y axis participates in the drag.
    #[must_use]
    pub fn tracks_y(self) -> bool {
        !matches!(self, Self::Horizontal)
    }

    /// Combines a `proposed` position with the `current` one, keeping the
    /// current coordinate on every axis this orientation ignores.
    #[must_use]
    pub fn constrain(self, proposed: Point, current: Point) -> Point {
        Point::new(
            if self.tracks_x() { proposed.x } else { current.x },
            if self.tracks_y() { proposed.y } else { current.y },
        )
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use alloc::string::String;
use core::time::Duration;

use crate::animation::DEFAULT_ANIMATION_DURATION;
use crate::error::DndError;
use crate::orientation::Orientation;

/// Tunables of a [`DragController`](crate::DragController).
///
/// With the `serde` feature enabled every field is optional when
/// deserializing; missing fields take their default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DndOptions {
    /// Axis constraint for hit-testing and helper positioning.
    pub orientation: Orientation,
    /// Animate the helper to its resting place when the drag ends.
    pub animation_enabled: bool,
    /// Duration of the end animation.
    pub animation_duration: Duration,
    /// Scroll automatically while the pointer rests near a container edge.
    pub scroll_enabled: bool,
    /// Distance from an edge, in pixels, below which auto-scroll kicks in.
    pub scroll_edge_threshold: f64,
    /// Pixels scrolled per auto-scroll tick.
    pub scroll_step: f64,
    /// Period of the auto-scroll task.
    pub scroll_period: Duration,
    /// Pixels scrolled per unit of wheel velocity.
    pub wheel_step_factor: f64,
    /// Class set on the document root while a drag is in progress.
    pub drag_marker_class: String,
}

impl Default for DndOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::All,
            animation_enabled: true,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            scroll_enabled: true,
            scroll_edge_threshold: 50.0,
            scroll_step: 20.0,
            scroll_period: Duration::from_millis(10),
            wheel_step_factor: 5.0,
            drag_marker_class: String::from("drag-started"),
        }
    }
}

impl DndOptions {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`DndError::InvalidOption`] naming the first offending field.
    pub fn validate(&self) -> Result<(), DndError> {
        if !self.scroll_edge_threshold.is_finite() || self.scroll_edge_threshold < 0.0 {
            return Err(invalid(
                "scroll_edge_threshold",
                "must be finite and non-negative",
            ));
        }
        if !self.scroll_step.is_finite() || self.scroll_step <= 0.0 {
            return Err(invalid("scroll_step", "must be finite and positive"));
        }
        if self.scroll_period.is_zero() {
            return Err(invalid("scroll_period", "must be non-zero"));
        }
        if !self.wheel_step_factor.is_finite() {
            return Err(invalid("wheel_step_factor", "must be finite"));
        }
        if self.drag_marker_class.is_empty() {
            return Err(invalid("drag_marker_class", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> DndError {
    DndError::InvalidOption { field, reason }
}

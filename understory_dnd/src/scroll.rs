// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-scrolling while the pointer rests near the edge of a scroll container.
//!
//! On every move the controller asks [`ScrollDirection::detect`] whether the
//! pointer sits within the edge threshold of a side that still has room to
//! scroll. While a direction is active a repeating task nudges the container
//! by a fixed step per tick ([`ScrollDirection::advance`]) and offsets the drag
//! helper by the same amount so it stays under the pointer.
//!
//! ```
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_dnd::{ScrollDirection, ScrollMetrics};
//!
//! let metrics = ScrollMetrics {
//!     offset: Vec2::ZERO,
//!     viewport: Rect::new(0.0, 0.0, 400.0, 300.0),
//!     content: Size::new(400.0, 1000.0),
//! };
//!
//! // 20px above the bottom edge, with room left below.
//! let dir = ScrollDirection::detect(&metrics, Point::new(200.0, 280.0), 50.0);
//! assert_eq!(dir, Some(ScrollDirection::Down));
//!
//! let step = ScrollDirection::Down.advance(&metrics, 20.0);
//! assert_eq!(step.offset, Vec2::new(0.0, 20.0));
//! assert!(!step.exhausted);
//! ```

use kurbo::{Point, Rect, Size, Vec2};

use crate::task::CancelToken;

/// The container scrolled by auto-scroll and wheel handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scroller<E> {
    /// The page (window) itself.
    Page,
    /// A scrollable element.
    Element(E),
}

/// Scroll geometry of a [`Scroller`], as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset (`scrollLeft`, `scrollTop`).
    pub offset: Vec2,
    /// Visible client area in the pointer's coordinate space.
    pub viewport: Rect,
    /// Full scrollable content size (`scrollWidth`, `scrollHeight`).
    pub content: Size,
}

impl ScrollMetrics {
    /// Largest reachable scroll offset on each axis.
    #[must_use]
    pub fn max_offset(&self) -> Vec2 {
        Vec2::new(
            (self.content.width - self.viewport.width()).max(0.0),
            (self.content.height - self.viewport.height()).max(0.0),
        )
    }

    /// Returns `true` if the content overflows vertically.
    #[must_use]
    pub fn overflows_y(&self) -> bool {
        self.content.height > self.viewport.height()
    }

    /// Returns `true` if the content overflows horizontally.
    #[must_use]
    pub fn overflows_x(&self) -> bool {
        self.content.width > self.viewport.width()
    }
}

/// Active auto-scroll direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Towards the top of the content.
    Up,
    /// Towards the bottom of the content.
    Down,
    /// Towards the start of the line.
    Left,
    /// Towards the end of the line.
    Right,
}

/// Outcome of one scroll tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollAdvance {
    /// New scroll offset to apply to the container.
    pub offset: Vec2,
    /// Offset change actually applied; the helper moves by the same amount.
    pub applied: Vec2,
    /// The container reached its scroll extreme; the task should stop.
    pub exhausted: bool,
}

impl ScrollDirection {
    /// Picks the scroll direction for a pointer at `pointer`, or `None`.
    ///
    /// A side qualifies when the pointer is strictly closer than `threshold`
    /// to it and the container can still scroll towards it. The vertical
    /// axis is checked first (down, then up), then the horizontal one (right,
    /// then left).
    #[must_use]
    pub fn detect(metrics: &ScrollMetrics, pointer: Point, threshold: f64) -> Option<Self> {
        let max = metrics.max_offset();
        let viewport = metrics.viewport;
        if metrics.overflows_y() {
            if viewport.y1 - pointer.y < threshold && metrics.offset.y < max.y {
                return Some(Self::Down);
            }
            if pointer.y - viewport.y0 < threshold && metrics.offset.y > 0.0 {
                return Some(Self::Up);
            }
        }
        if metrics.overflows_x() {
            if viewport.x1 - pointer.x < threshold && metrics.offset.x < max.x {
                return Some(Self::Right);
            }
            if pointer.x - viewport.x0 < threshold && metrics.offset.x > 0.0 {
                return Some(Self::Left);
            }
        }
        None
    }

    /// Computes one tick of `step` pixels in this direction.
    ///
    /// The new offset is clamped to `[0, max_offset]`; reaching either bound
    /// marks the advance as exhausted and `applied` carries only the partial
    /// step that was still available.
    #[must_use]
    pub fn advance(self, metrics: &ScrollMetrics, step: f64) -> ScrollAdvance {
        let old = metrics.offset;
        let max = metrics.max_offset();
        let (offset, exhausted) = match self {
            Self::Down => forward(old.y, max.y, step).map_y(old),
            Self::Up => backward(old.y, step).map_y(old),
            Self::Right => forward(old.x, max.x, step).map_x(old),
            Self::Left => backward(old.x, step).map_x(old),
        };
        ScrollAdvance {
            offset,
            applied: offset - old,
            exhausted,
        }
    }
}

struct AxisStep {
    value: f64,
    exhausted: bool,
}

impl AxisStep {
    fn map_x(self, old: Vec2) -> (Vec2, bool) {
        (Vec2::new(self.value, old.y), self.exhausted)
    }

    fn map_y(self, old: Vec2) -> (Vec2, bool) {
        (Vec2::new(old.x, self.value), self.exhausted)
    }
}

fn forward(current: f64, max: f64, step: f64) -> AxisStep {
    let next = current + step;
    if next >= max {
        AxisStep {
            value: max,
            exhausted: true,
        }
    } else {
        AxisStep {
            value: next,
            exhausted: false,
        }
    }
}

fn backward(current: f64, step: f64) -> AxisStep {
    if current <= step {
        AxisStep {
            value: 0.0,
            exhausted: true,
        }
    } else {
        AxisStep {
            value: current - step,
            exhausted: false,
        }
    }
}

/// The repeating scroll task of a drag session.
#[derive(Debug)]
pub(crate) struct ScrollTimer<E> {
    running: Option<RunningScroll<E>>,
}

#[derive(Debug)]
struct RunningScroll<E> {
    direction: ScrollDirection,
    scroller: Scroller<E>,
    token: CancelToken,
}

impl<E> Default for ScrollTimer<E> {
    fn default() -> Self {
        Self { running: None }
    }
}

impl<E: Clone + PartialEq> ScrollTimer<E> {
    /// Direction of the running task, if any.
    pub(crate) fn direction(&self) -> Option<ScrollDirection> {
        self.running.as_ref().map(|r| r.direction)
    }

    /// Moves the timer to `direction` on `scroller`.
    ///
    /// A running task with a different direction or container is cancelled.
    /// Returns the token of a newly started task, which the caller must
    /// schedule.
    pub(crate) fn retarget(
        &mut self,
        direction: Option<ScrollDirection>,
        scroller: &Scroller<E>,
    ) -> Option<CancelToken> {
        let unchanged = self
            .running
            .as_ref()
            .is_some_and(|r| Some(r.direction) == direction && r.scroller == *scroller);
        if !unchanged {
            self.stop();
        }
        let direction = direction?;
        if self.running.is_some() {
            return None;
        }
        let token = CancelToken::new();
        log::debug!("starting auto-scroll {direction:?}");
        self.running = Some(RunningScroll {
            direction,
            scroller: scroller.clone(),
            token: token.clone(),
        });
        Some(token)
    }

    /// Direction and container of the running task, if `token` identifies it.
    pub(crate) fn task_for(&self, token: &CancelToken) -> Option<(ScrollDirection, Scroller<E>)> {
        self.running
            .as_ref()
            .filter(|r| !token.is_cancelled() && r.token.is_same_task(token))
            .map(|r| (r.direction, r.scroller.clone()))
    }

    /// Cancels the running task. Idempotent.
    pub(crate) fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            log::debug!("stopping auto-scroll {:?}", running.direction);
            running.token.cancel();
        }
    }
}

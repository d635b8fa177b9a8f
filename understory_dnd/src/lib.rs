// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dnd --heading-base-level=0

//! Understory DnD: a host-agnostic drag and drop session controller.
//!
//! This crate tracks a pointer-driven drag gesture from the initial press,
//! through movement, target acquisition and auto-scrolling, to an animated
//! drop or cancel. It owns the state machine and the geometry; everything
//! visual is supplied by the embedding application through small capability
//! traits:
//!
//! - [`DndHost`]: element geometry, scrolling, the root "drag active" class,
//!   and the UI queue used for the auto-scroll task and the end animation.
//! - [`Draggable`]: the item being moved; creates the helper that follows the
//!   pointer and the placeholder that marks the landing spot.
//! - [`DropTarget`]: a container that reports whether the pointer is inside
//!   it and hosts the placeholder.
//! - [`DragCoordinator`]: observes the lifecycle and may veto the start, a
//!   target entry, or the drop.
//! - [`DragHandle`]: the pressable part of a draggable.
//!
//! The core type is [`DragController`]. It accepts at most one session at a
//! time and always returns to idle: every path through drop, cancel or a
//! coordinator veto ends in the same teardown, which removes the placeholder,
//! detaches the helper, clears the root class and releases the input
//! capture.
//!
//! ## Driving the controller
//!
//! The controller is single-threaded and event-driven. The host:
//!
//! 1) Delivers presses on registered handles to [`DragController::on_press`].
//! 2) While [`DragController::is_capturing`] is `true`, routes every pointer
//!    move, release, key and wheel event through
//!    [`DragController::handle_input`], and suppresses default handling of
//!    events reported as [`EventDisposition::Consumed`].
//! 3) Runs the repeating task posted by [`DndHost::schedule_repeating`] by
//!    calling [`DragController::on_scroll_tick`] until its [`CancelToken`] is
//!    cancelled.
//! 4) Plays each [`MoveAnimation`] posted by [`DndHost::start_animation`] and
//!    reports its end with [`DragController::finish_animation`].
//!
//! ## Coordinates
//!
//! Pointer positions are client coordinates. [`DndHost::absolute_position`]
//! reports page coordinates, and helper positions are `left`/`top` relative
//! to the helper's parent. The active [`Orientation`] pins the ignored axis
//! of the helper and is passed to every target hit-test.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//! - `serde`: (de)serialize [`DndOptions`] and [`Orientation`].
//!
//! This crate is `no_std` compatible (with `alloc`). Diagnostics go through
//! the [`log`] facade.

#![no_std]

extern crate alloc;

mod animation;
mod capability;
mod capture;
mod controller;
mod error;
mod event;
mod options;
mod orientation;
mod scroll;
mod session;
mod task;

pub use animation::{DEFAULT_ANIMATION_DURATION, MoveAnimation};
pub use capability::{AcceptAll, DndHost, DragCoordinator, DragHandle, Draggable, DropTarget, HandleId, TargetId};
pub use capture::{CaptureGuard, CaptureSlot};
pub use controller::{DragController, IgnoreReason, StartOutcome};
pub use error::DndError;
pub use event::{EventDisposition, InputEvent, Key, PointerButton, PressEvent};
pub use options::DndOptions;
pub use orientation::Orientation;
pub use scroll::{ScrollAdvance, ScrollDirection, ScrollMetrics, Scroller};
pub use session::{DragPhase, SessionGeometry};
pub use task::{AnimationTicket, CancelToken};

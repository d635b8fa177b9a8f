// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities supplied by the embedding application.
//!
//! The controller owns the gesture; everything it touches is reached through
//! these traits:
//!
//! - [`DndHost`]: the element tree, scrolling, timers and animations.
//! - [`Draggable`]: the item being moved.
//! - [`DropTarget`]: a container that can host the draggable's placeholder.
//! - [`DragCoordinator`]: observes the lifecycle and may veto transitions.
//! - [`DragHandle`]: the pressable part of a draggable, registered once.
//!
//! Collaborators are called only from within controller methods and receive
//! no reference back to the controller, so the registered target collection
//! cannot change while a hit-test is running.

use alloc::boxed::Box;
use core::fmt::Debug;
use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::animation::MoveAnimation;
use crate::orientation::Orientation;
use crate::scroll::{ScrollMetrics, Scroller};
use crate::task::CancelToken;

/// Identifies a drop target registered with a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub(crate) u32);

/// Identifies a drag handle registered with a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub(crate) u32);

/// The element tree and UI-thread services of the embedding host.
///
/// Pointer positions are client coordinates; [`absolute_position`] is in page
/// coordinates; [`offset_position`] is the element's `left`/`top` relative to
/// its parent.
///
/// [`absolute_position`]: DndHost::absolute_position
/// [`offset_position`]: DndHost::offset_position
pub trait DndHost {
    /// Handle to an element of the host's tree.
    type Element: Clone + PartialEq + Debug;

    /// Absolute (page) position of the element's top-left corner.
    fn absolute_position(&self, element: &Self::Element) -> Point;

    /// Maps a client pointer position into the element's local coordinate
    /// space, accounting for its scroll offset.
    fn relative_position(&self, pointer: Point, element: &Self::Element) -> Point;

    /// Parent of the element, or `None` if it is detached or the root.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Current computed `left`/`top` of the element.
    fn offset_position(&self, element: &Self::Element) -> Point;

    /// Sets the element's `left`/`top`.
    fn set_offset_position(&mut self, element: &Self::Element, position: Point);

    /// Removes the element from its parent.
    fn detach(&mut self, element: &Self::Element);

    /// Scroll geometry of a container.
    fn scroll_metrics(&self, scroller: &Scroller<Self::Element>) -> ScrollMetrics;

    /// Scrolls a container to `offset`.
    fn set_scroll_offset(&mut self, scroller: &Scroller<Self::Element>, offset: Vec2);

    /// Adds or removes a class on the document root.
    fn set_root_class(&mut self, class: &str, enabled: bool);

    /// Posts a repeating task to the UI queue.
    ///
    /// Every `period` the host calls
    /// [`DragController::on_scroll_tick`](crate::DragController::on_scroll_tick)
    /// with `token`, until [`CancelToken::is_cancelled`] returns `true`.
    fn schedule_repeating(&mut self, period: Duration, token: CancelToken);

    /// Starts the move animation primitive.
    ///
    /// When the animation completes the host calls
    /// [`DragController::finish_animation`](crate::DragController::finish_animation)
    /// with the request's ticket, exactly once.
    fn start_animation(&mut self, animation: MoveAnimation<Self::Element>);
}

/// An item that can be dragged.
pub trait Draggable<E> {
    /// The draggable's own element.
    fn element(&self) -> E;

    /// The drop target currently containing the draggable, if any.
    fn parent_target(&self) -> Option<TargetId>;

    /// Creates the helper element that follows the pointer.
    fn drag_helper(&mut self, target: Option<TargetId>) -> E;

    /// Creates the placeholder element marking the landing spot.
    fn placeholder(&mut self, target: Option<TargetId>) -> E;

    /// Called once the drag has started.
    fn on_start_drag(&mut self, target: Option<TargetId>);

    /// Called after the draggable was dropped on `target`.
    fn on_drop(&mut self, target: TargetId);

    /// Called after the drag was cancelled.
    fn on_drag_cancel(&mut self);
}

/// A container that can host the draggable's placeholder.
pub trait DropTarget<E> {
    /// The target's element; wheel scrolling starts its search here.
    fn element(&self) -> E;

    /// Returns `true` if `pointer` is inside the target, honoring `orientation`.
    fn check_position(&self, pointer: Point, orientation: Orientation) -> bool;

    /// Inserts the placeholder at the position matching `pointer`.
    fn insert_placeholder(&mut self, placeholder: &E, pointer: Point, orientation: Orientation);

    /// Moves the already inserted placeholder to match `pointer`.
    fn reposition_placeholder(&mut self, pointer: Point, orientation: Orientation);

    /// Removes the placeholder if present.
    fn remove_placeholder(&mut self);

    /// Index of the placeholder among the target's children, or `None` if it
    /// is not inserted.
    fn placeholder_index(&self) -> Option<usize>;

    /// Called when `draggable` is dropped on this target.
    fn on_drop(&mut self, draggable: &dyn Draggable<E>);
}

/// Observer of the drag lifecycle with veto power over start, target entry
/// and drop.
///
/// Every method has a permissive default.
pub trait DragCoordinator<E> {
    /// A drag is starting; return `false` to cancel it.
    fn on_drag_start(&mut self, draggable: &dyn Draggable<E>, target: Option<TargetId>) -> bool {
        let _ = (draggable, target);
        true
    }

    /// The draggable is about to be dropped; return `false` to cancel instead.
    fn on_before_drop(&mut self, draggable: &dyn Draggable<E>, target: TargetId) -> bool {
        let _ = (draggable, target);
        true
    }

    /// The draggable was dropped on `target`.
    fn on_drop(&mut self, draggable: &dyn Draggable<E>, target: TargetId) {
        let _ = (draggable, target);
    }

    /// The drag was cancelled.
    fn on_drag_cancel(&mut self, draggable: &dyn Draggable<E>) {
        let _ = draggable;
    }

    /// The end animation is starting. `target` is `None` when cancelling.
    fn on_animation_start(&mut self, draggable: &dyn Draggable<E>, target: Option<TargetId>) {
        let _ = (draggable, target);
    }

    /// The pointer entered `target`; return `false` to keep the placeholder out.
    fn on_target_enter(&mut self, draggable: &dyn Draggable<E>, target: TargetId) -> bool {
        let _ = (draggable, target);
        true
    }

    /// The pointer left `target`.
    fn on_target_leave(&mut self, draggable: &dyn Draggable<E>, target: TargetId) {
        let _ = (draggable, target);
    }

    /// The placeholder was inserted or repositioned inside `target`.
    fn on_positioned_placeholder(&mut self, draggable: &dyn Draggable<E>, target: TargetId) {
        let _ = (draggable, target);
    }
}

/// Coordinator that accepts everything and observes nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct AcceptAll;

impl<E> DragCoordinator<E> for AcceptAll {}

/// The pressable part of a draggable.
pub trait DragHandle<E> {
    /// The handle's element.
    fn element(&self) -> E;

    /// The draggable this handle moves, or `None` if it cannot be dragged
    /// right now.
    fn draggable(&self) -> Option<Box<dyn Draggable<E>>>;
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag controller: one drag session at a time, from press to drop or cancel.
//!
//! ## Lifecycle
//!
//! ```text
//! idle ──press──▶ dragging ──release/escape/drop/cancel──▶ dropping | cancelling ──finish──▶ idle
//! ```
//!
//! 1) Register drop targets with [`DragController::add_target`] and handles
//!    with [`DragController::register_handle`].
//! 2) Deliver presses on a handle to [`DragController::on_press`].
//! 3) While [`DragController::is_capturing`] is `true`, deliver every pointer,
//!    key and wheel event to [`DragController::handle_input`].
//! 4) Drive the posted tasks: [`DragController::on_scroll_tick`] for the
//!    auto-scroll task and [`DragController::finish_animation`] when the end
//!    animation completes.
//!
//! ## Hit-testing
//!
//! On every move the current target is checked first and kept as long as it
//! reports the pointer inside; only when it loses the pointer are the other
//! targets scanned in registration order. The first one that contains the
//! pointer and is accepted by [`DragCoordinator::on_target_enter`] receives
//! the placeholder. Keeping the current target sticky avoids placeholder
//! flicker where adjacent targets overlap.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Vec2};

use crate::animation::{MoveAnimation, parent_relative};
use crate::capability::{DndHost, DragCoordinator, DragHandle, Draggable, DropTarget, HandleId, TargetId};
use crate::capture::{CaptureGuard, CaptureSlot};
use crate::error::DndError;
use crate::event::{EventDisposition, InputEvent, Key, PointerButton, PressEvent};
use crate::options::DndOptions;
use crate::orientation::Orientation;
use crate::scroll::{ScrollDirection, ScrollTimer, Scroller};
use crate::session::{DragPhase, DragSession, SessionGeometry};
use crate::task::{AnimationTicket, CancelToken};

/// Result of delivering a press to [`DragController::on_press`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A drag session is now in progress.
    Started,
    /// The coordinator refused the drag; the cancel path ran.
    Vetoed,
    /// The press was ignored and nothing changed.
    Ignored(IgnoreReason),
}

/// Why a press did not start a drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Only the primary button starts a drag.
    NotPrimaryButton,
    /// Another drag session is in progress.
    SessionActive,
    /// The end animation of the previous drag is still running.
    AnimationInFlight,
    /// The handle is not registered.
    UnknownHandle,
    /// The handle has no draggable.
    NoDraggable,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Finish {
    Drop(TargetId),
    Cancel,
}

#[derive(Copy, Clone, Debug)]
struct PendingAnimation {
    ticket: AnimationTicket,
    finish: Finish,
}

struct RegisteredTarget<E> {
    id: TargetId,
    target: Box<dyn DropTarget<E>>,
}

/// Drag and drop session controller.
///
/// Owns the host shim `H` and the coordinator `C`, the registered drop
/// targets and drag handles, and at most one drag session at a time.
pub struct DragController<H: DndHost, C> {
    host: H,
    coordinator: C,
    options: DndOptions,
    targets: Vec<RegisteredTarget<H::Element>>,
    handles: HashMap<HandleId, Box<dyn DragHandle<H::Element>>>,
    next_target: u32,
    next_handle: u32,
    next_ticket: u64,
    session: Option<DragSession<H::Element>>,
    scroll_element: Option<H::Element>,
    scroll_timer: ScrollTimer<H::Element>,
    animation: Option<PendingAnimation>,
    capture_slot: CaptureSlot,
    capture: Option<CaptureGuard>,
}

impl<H: DndHost, C> fmt::Debug for DragController<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets: Vec<TargetId> = self.targets.iter().map(|t| t.id).collect();
        f.debug_struct("DragController")
            .field("options", &self.options)
            .field("targets", &targets)
            .field("handles", &self.handles.len())
            .field("session", &self.session)
            .field("scroll_element", &self.scroll_element)
            .field("scroll_direction", &self.scroll_timer.direction())
            .field("animation", &self.animation)
            .field("capturing", &self.capture.is_some())
            .finish_non_exhaustive()
    }
}

impl<H: DndHost, C: DragCoordinator<H::Element>> DragController<H, C> {
    /// Creates a controller with default [`DndOptions`].
    pub fn new(host: H, coordinator: C) -> Self {
        Self {
            host,
            coordinator,
            options: DndOptions::default(),
            targets: Vec::new(),
            handles: HashMap::new(),
            next_target: 0,
            next_handle: 0,
            next_ticket: 0,
            session: None,
            scroll_element: None,
            scroll_timer: ScrollTimer::default(),
            animation: None,
            capture_slot: CaptureSlot::default(),
            capture: None,
        }
    }

    /// Creates a controller with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`DndError::InvalidOption`] if the options do not validate.
    pub fn with_options(host: H, coordinator: C, options: DndOptions) -> Result<Self, DndError> {
        options.validate()?;
        let mut controller = Self::new(host, coordinator);
        controller.options = options;
        Ok(controller)
    }

    /// The host shim.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host shim.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The lifecycle coordinator.
    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    /// Mutable access to the lifecycle coordinator.
    pub fn coordinator_mut(&mut self) -> &mut C {
        &mut self.coordinator
    }

    /// Replaces the coordinator, returning the previous one.
    pub fn set_coordinator(&mut self, coordinator: C) -> C {
        core::mem::replace(&mut self.coordinator, coordinator)
    }

    /// Current options.
    pub fn options(&self) -> &DndOptions {
        &self.options
    }

    /// Replaces all options at once.
    ///
    /// # Errors
    ///
    /// Returns [`DndError::InvalidOption`] and keeps the old options if the
    /// new ones do not validate.
    pub fn set_options(&mut self, options: DndOptions) -> Result<(), DndError> {
        options.validate()?;
        if !options.scroll_enabled {
            self.scroll_timer.stop();
        }
        self.options = options;
        Ok(())
    }

    // --- configuration -----------------------------------------------------

    /// The allowed drag and drop orientation.
    pub fn orientation(&self) -> Orientation {
        self.options.orientation
    }

    /// Sets the allowed drag and drop orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.options.orientation = orientation;
    }

    /// Returns `true` if the end animation is enabled.
    pub fn is_animation_enabled(&self) -> bool {
        self.options.animation_enabled
    }

    /// Enables or disables the end animation.
    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.options.animation_enabled = enabled;
    }

    /// Returns `true` if auto-scrolling is enabled.
    pub fn is_scroll_enabled(&self) -> bool {
        self.options.scroll_enabled
    }

    /// Enables or disables auto-scrolling. Disabling stops a running scroll task.
    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.options.scroll_enabled = enabled;
        if !enabled {
            self.scroll_timer.stop();
        }
    }

    /// The element auto-scrolled instead of the page, if any.
    pub fn scroll_element(&self) -> Option<&H::Element> {
        self.scroll_element.as_ref()
    }

    /// Sets the element to auto-scroll instead of the page.
    pub fn set_scroll_element(&mut self, element: Option<H::Element>) {
        self.scroll_element = element;
    }

    // --- registration ------------------------------------------------------

    /// Registers a drop target. Targets are hit-tested in registration order.
    pub fn add_target(&mut self, target: Box<dyn DropTarget<H::Element>>) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target += 1;
        self.targets.push(RegisteredTarget { id, target });
        id
    }

    /// Unregisters a drop target and hands it back.
    ///
    /// If the target currently hosts the placeholder of a running drag it is
    /// asked to remove it first and the drag continues without a target.
    ///
    /// # Errors
    ///
    /// Returns [`DndError::UnknownTarget`] if `id` is not registered.
    pub fn remove_target(&mut self, id: TargetId) -> Result<Box<dyn DropTarget<H::Element>>, DndError> {
        let index = self
            .targets
            .iter()
            .position(|t| t.id == id)
            .ok_or(DndError::UnknownTarget(id))?;
        let mut entry = self.targets.remove(index);
        if let Some(session) = self.session.as_mut() {
            if session.current_target == Some(id) {
                entry.target.remove_placeholder();
                session.current_target = None;
            }
            session.released.remove(&id);
        }
        Ok(entry.target)
    }

    /// Unregisters every drop target.
    pub fn clear_targets(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Some(current) = session.current_target.take() {
                if let Some(entry) = self.targets.iter_mut().find(|t| t.id == current) {
                    entry.target.remove_placeholder();
                }
            }
            session.released.clear();
        }
        self.targets.clear();
    }

    /// A registered drop target.
    pub fn target(&self, id: TargetId) -> Option<&dyn DropTarget<H::Element>> {
        self.targets
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.target.as_ref())
    }

    /// Mutable access to a registered drop target.
    pub fn target_mut(&mut self, id: TargetId) -> Option<&mut (dyn DropTarget<H::Element> + 'static)> {
        self.targets
            .iter_mut()
            .find(|t| t.id == id)
            .map(|t| t.target.as_mut())
    }

    /// Registered drop targets, in hit-test order.
    pub fn target_ids(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.targets.iter().map(|t| t.id)
    }

    /// Registers a drag handle; presses on it are delivered with the returned id.
    pub fn register_handle(&mut self, handle: Box<dyn DragHandle<H::Element>>) -> HandleId {
        let id = HandleId(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(id, handle);
        id
    }

    /// Unregisters a drag handle and hands it back.
    ///
    /// # Errors
    ///
    /// Returns [`DndError::UnknownHandle`] if `id` is not registered.
    pub fn unregister_handle(&mut self, id: HandleId) -> Result<Box<dyn DragHandle<H::Element>>, DndError> {
        self.handles.remove(&id).ok_or(DndError::UnknownHandle(id))
    }

    /// Element of a registered drag handle.
    pub fn handle_element(&self, id: HandleId) -> Option<H::Element> {
        self.handles.get(&id).map(|h| h.element())
    }

    // --- session state -----------------------------------------------------

    /// Returns `true` while the pointer is being followed.
    pub fn is_dragging(&self) -> bool {
        self.phase() == Some(DragPhase::Dragging)
    }

    /// Returns `true` while an end animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Phase of the current session, or `None` when idle.
    pub fn phase(&self) -> Option<DragPhase> {
        self.session.as_ref().map(|s| s.phase)
    }

    /// The drop target hosting the placeholder.
    pub fn current_target(&self) -> Option<TargetId> {
        self.session.as_ref().and_then(|s| s.current_target)
    }

    /// The item being dragged.
    pub fn draggable(&self) -> Option<&dyn Draggable<H::Element>> {
        self.session.as_ref().map(|s| s.draggable.as_ref())
    }

    /// The helper element following the pointer.
    pub fn drag_helper(&self) -> Option<&H::Element> {
        self.session.as_ref().map(|s| &s.helper)
    }

    /// The placeholder element.
    pub fn placeholder(&self) -> Option<&H::Element> {
        self.session.as_ref().map(|s| &s.placeholder)
    }

    /// Pointer geometry of the current session.
    pub fn session_geometry(&self) -> Option<SessionGeometry> {
        self.session.as_ref().map(|s| s.geometry)
    }

    /// Direction of the running auto-scroll task.
    pub fn auto_scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_timer.direction()
    }

    /// Observable registration of the input capture.
    pub fn capture_slot(&self) -> CaptureSlot {
        self.capture_slot.clone()
    }

    /// Returns `true` while the controller wants every input event.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Overrides the cursor offset of the running session.
    pub fn set_cursor_offset(&mut self, offset: Vec2) {
        match self.session.as_mut() {
            Some(session) => session.geometry.cursor_offset = offset,
            None => log::debug!("no drag in progress; cursor offset not set"),
        }
    }

    /// Overrides the cancel destination of the running session.
    ///
    /// Negative components are ignored.
    pub fn set_start_position(&mut self, left: f64, top: f64) {
        let Some(session) = self.session.as_mut() else {
            log::debug!("no drag in progress; start position not set");
            return;
        };
        if left >= 0.0 {
            session.geometry.start_position.x = left;
        }
        if top >= 0.0 {
            session.geometry.start_position.y = top;
        }
    }

    /// Replaces the helper element of the running session.
    pub fn set_drag_helper(&mut self, helper: H::Element) {
        match self.session.as_mut() {
            Some(session) => session.helper = helper,
            None => log::debug!("no drag in progress; helper not set"),
        }
    }

    /// Replaces the placeholder element of the running session.
    ///
    /// Targets that insert the placeholder from now on receive the new element.
    pub fn set_placeholder(&mut self, placeholder: H::Element) {
        match self.session.as_mut() {
            Some(session) => session.placeholder = placeholder,
            None => log::debug!("no drag in progress; placeholder not set"),
        }
    }

    // --- input ---------------------------------------------------------------

    /// Starts a drag from a press on a registered handle.
    ///
    /// Presses with a non-primary button, while a session or end animation is
    /// in progress, on unknown handles, or on handles without a draggable are
    /// ignored without any state change or notification.
    pub fn on_press(&mut self, handle: HandleId, event: PressEvent) -> StartOutcome {
        if event.button != PointerButton::Primary {
            return StartOutcome::Ignored(IgnoreReason::NotPrimaryButton);
        }
        if self.animation.is_some() {
            return StartOutcome::Ignored(IgnoreReason::AnimationInFlight);
        }
        if self.session.is_some() {
            return StartOutcome::Ignored(IgnoreReason::SessionActive);
        }
        let Some(drag_handle) = self.handles.get(&handle) else {
            return StartOutcome::Ignored(IgnoreReason::UnknownHandle);
        };
        let Some(mut draggable) = drag_handle.draggable() else {
            return StartOutcome::Ignored(IgnoreReason::NoDraggable);
        };

        let element = draggable.element();
        let cursor_offset = self
            .host
            .relative_position(event.position, &element)
            .to_vec2();
        let start_position = self.host.absolute_position(&element);
        let target = draggable.parent_target();
        let helper = draggable.drag_helper(target);
        let placeholder = draggable.placeholder(target);
        log::debug!("starting drag of {element:?} from {target:?}");

        let session = self.session.insert(DragSession::new(
            draggable,
            helper,
            placeholder,
            target,
            cursor_offset,
            start_position,
            event.position,
        ));
        if !self.coordinator.on_drag_start(session.draggable.as_ref(), target) {
            log::debug!("drag start vetoed by coordinator");
            self.cancel();
            return StartOutcome::Vetoed;
        }
        session.draggable.on_start_drag(target);
        session.phase = DragPhase::Dragging;
        self.host
            .set_root_class(&self.options.drag_marker_class, true);
        self.install_capture();
        self.on_move(event.position);
        StartOutcome::Started
    }

    /// Handles an input event while the capture is installed.
    ///
    /// Returns [`EventDisposition::Consumed`] for every captured event; the
    /// host should then prevent default handling and stop propagation.
    pub fn handle_input(&mut self, event: InputEvent) -> EventDisposition {
        if self.capture.is_none() {
            return EventDisposition::Ignored;
        }
        if !self.is_dragging() {
            log::warn!("input capture still installed although no drag is in progress");
            self.stop_dragging();
            return EventDisposition::Consumed;
        }
        match event {
            InputEvent::PointerMove { position } => self.on_move(position),
            InputEvent::PointerUp { position } => self.on_release(position),
            InputEvent::KeyDown(Key::Escape) => self.cancel(),
            InputEvent::KeyDown(Key::Other(_)) => {}
            InputEvent::Wheel { position, delta_y } => self.on_wheel(position, delta_y),
        }
        EventDisposition::Consumed
    }

    fn on_move(&mut self, position: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let delta = session.update_pointer(position);
        log::trace!("pointer moved by {delta:?}");
        self.check_targets();
        self.position_helper();
        self.update_auto_scroll();
    }

    fn on_release(&mut self, position: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.update_pointer(position);
        let placed = session
            .current_target
            .and_then(|id| self.targets.iter().find(|t| t.id == id))
            .is_some_and(|t| t.target.placeholder_index().is_some());
        if placed {
            self.drop_draggable();
        } else {
            self.cancel();
        }
    }

    /// Scrolls the nearest vertically scrollable ancestor of the current
    /// target (or the page), then re-runs the move logic.
    fn on_wheel(&mut self, position: Point, delta_y: f64) {
        let step = delta_y * self.options.wheel_step_factor;
        let scroller = self.wheel_scroller();
        let metrics = self.host.scroll_metrics(&scroller);
        let top = (metrics.offset.y + step).clamp(0.0, metrics.max_offset().y);
        self.host
            .set_scroll_offset(&scroller, Vec2::new(metrics.offset.x, top));
        self.on_move(position);
    }

    fn wheel_scroller(&self) -> Scroller<H::Element> {
        let mut candidate = self
            .current_target()
            .and_then(|id| self.targets.iter().find(|t| t.id == id))
            .map(|t| t.target.element());
        while let Some(element) = candidate {
            let scroller = Scroller::Element(element.clone());
            if self.host.scroll_metrics(&scroller).overflows_y() {
                return scroller;
            }
            candidate = self.host.parent(&element);
        }
        Scroller::Page
    }

    // --- hit-testing and positioning ---------------------------------------

    fn check_targets(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let pointer = session.pointer();
        let orientation = self.options.orientation;

        if let Some(current) = session.current_target {
            match self.targets.iter_mut().find(|t| t.id == current) {
                Some(entry) if entry.target.check_position(pointer, orientation) => {
                    if entry.target.placeholder_index().is_some() {
                        entry.target.reposition_placeholder(pointer, orientation);
                    } else {
                        entry
                            .target
                            .insert_placeholder(&session.placeholder, pointer, orientation);
                        session.mark_hosting(current);
                    }
                    self.coordinator
                        .on_positioned_placeholder(session.draggable.as_ref(), current);
                    return;
                }
                Some(entry) => {
                    self.coordinator
                        .on_target_leave(session.draggable.as_ref(), current);
                    entry.target.remove_placeholder();
                    session.mark_released(current);
                }
                None => {
                    self.coordinator
                        .on_target_leave(session.draggable.as_ref(), current);
                }
            }
        }

        let previous = session.current_target.take();
        for entry in &mut self.targets {
            if previous == Some(entry.id) || !entry.target.check_position(pointer, orientation) {
                continue;
            }
            if !self
                .coordinator
                .on_target_enter(session.draggable.as_ref(), entry.id)
            {
                continue;
            }
            entry
                .target
                .insert_placeholder(&session.placeholder, pointer, orientation);
            session.mark_hosting(entry.id);
            session.current_target = Some(entry.id);
            self.coordinator
                .on_positioned_placeholder(session.draggable.as_ref(), entry.id);
            return;
        }
    }

    /// Moves the helper so the press offset stays under the pointer.
    fn position_helper(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(parent) = self.host.parent(&session.helper) else {
            log::warn!("drag helper {:?} has no parent; skipping positioning", session.helper);
            return;
        };
        let proposed = self.host.relative_position(session.pointer(), &parent)
            - session.geometry.cursor_offset;
        let current = self.host.offset_position(&session.helper);
        let position = self.options.orientation.constrain(proposed, current);
        self.host.set_offset_position(&session.helper, position);
    }

    fn update_auto_scroll(&mut self) {
        if !self.options.scroll_enabled {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let scroller = self
            .scroll_element
            .clone()
            .map_or(Scroller::Page, Scroller::Element);
        let metrics = self.host.scroll_metrics(&scroller);
        let direction = ScrollDirection::detect(
            &metrics,
            session.pointer(),
            self.options.scroll_edge_threshold,
        );
        if let Some(token) = self.scroll_timer.retarget(direction, &scroller) {
            self.host
                .schedule_repeating(self.options.scroll_period, token);
        }
    }

    /// Runs one tick of the auto-scroll task identified by `token`.
    ///
    /// Ticks of cancelled or superseded tasks are ignored.
    pub fn on_scroll_tick(&mut self, token: &CancelToken) {
        let Some((direction, scroller)) = self.scroll_timer.task_for(token) else {
            log::warn!("ignoring tick of a stopped scroll task");
            return;
        };
        let Some(session) = self.session.as_ref() else {
            self.scroll_timer.stop();
            return;
        };
        let metrics = self.host.scroll_metrics(&scroller);
        let advance = direction.advance(&metrics, self.options.scroll_step);
        self.host.set_scroll_offset(&scroller, advance.offset);
        let helper = self.host.offset_position(&session.helper) + advance.applied;
        self.host.set_offset_position(&session.helper, helper);
        if advance.exhausted {
            self.scroll_timer.stop();
        }
    }

    // --- ending --------------------------------------------------------------

    /// Drops the draggable on the current target.
    ///
    /// Without a current target, or if the coordinator vetoes the drop, the
    /// cancel path runs instead. Otherwise input capture and auto-scroll stop
    /// and the helper animates to the placeholder before the drop is
    /// finalized.
    pub fn drop_draggable(&mut self) {
        let Some(session) = self.session.as_ref() else {
            log::debug!("drop requested without a drag in progress");
            return;
        };
        if session.phase != DragPhase::Dragging {
            log::debug!("drop requested while {:?}", session.phase);
            return;
        }
        let Some(target) = session.current_target else {
            self.cancel();
            return;
        };
        if !self
            .coordinator
            .on_before_drop(session.draggable.as_ref(), target)
        {
            log::debug!("drop on {target:?} vetoed by coordinator");
            self.cancel();
            return;
        }
        self.coordinator
            .on_animation_start(session.draggable.as_ref(), Some(target));
        let destination = self.host.absolute_position(&session.placeholder);
        self.stop_dragging();
        self.set_phase(DragPhase::Dropping);
        self.show_end_animation(destination, Finish::Drop(target));
    }

    /// Cancels the drag, animating the helper back to the start position.
    pub fn cancel(&mut self) {
        let Some(session) = self.session.as_ref() else {
            log::debug!("cancel requested without a drag in progress");
            return;
        };
        if session.phase.is_ending() {
            log::debug!("cancel requested while {:?}", session.phase);
            return;
        }
        self.coordinator
            .on_animation_start(session.draggable.as_ref(), None);
        let destination = session.geometry.start_position;
        self.stop_dragging();
        self.set_phase(DragPhase::Cancelling);
        self.show_end_animation(destination, Finish::Cancel);
    }

    /// Completes the end animation identified by `ticket` and finalizes the
    /// drop or cancel it was started for.
    ///
    /// Unknown or already completed tickets are ignored.
    pub fn finish_animation(&mut self, ticket: AnimationTicket) {
        match self.animation.take() {
            Some(pending) if pending.ticket == ticket => self.finalize(pending.finish),
            other => {
                log::warn!("ignoring completion of unknown animation {ticket:?}");
                self.animation = other;
            }
        }
    }

    fn set_phase(&mut self, phase: DragPhase) {
        if let Some(session) = self.session.as_mut() {
            session.phase = phase;
        }
    }

    fn install_capture(&mut self) {
        if self.capture.take().is_some() {
            log::warn!("input capture already installed; replacing it");
        }
        log::debug!("installing input capture");
        self.capture = Some(self.capture_slot.install());
    }

    /// Stops following the pointer: releases the capture and the scroll task.
    fn stop_dragging(&mut self) {
        self.scroll_timer.stop();
        if self.capture.take().is_some() {
            log::debug!("released input capture");
        }
    }

    fn show_end_animation(&mut self, destination: Point, finish: Finish) {
        if !self.options.animation_enabled {
            self.finalize(finish);
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(parent) = self.host.parent(&session.helper) else {
            log::debug!("drag helper is detached; finishing without animation");
            self.finalize(finish);
            return;
        };
        let to = parent_relative(destination, self.host.absolute_position(&parent));
        let from = self.host.offset_position(&session.helper);
        let element = session.helper.clone();
        self.next_ticket += 1;
        let ticket = AnimationTicket(self.next_ticket);
        self.animation = Some(PendingAnimation { ticket, finish });
        log::debug!("animating drag helper from {from:?} to {to:?}");
        self.host.start_animation(MoveAnimation {
            element,
            from,
            to,
            duration: self.options.animation_duration,
            ticket,
        });
    }

    fn finalize(&mut self, finish: Finish) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        match finish {
            Finish::Drop(target) => {
                match self.targets.iter_mut().find(|t| t.id == target) {
                    Some(entry) => entry.target.on_drop(session.draggable.as_ref()),
                    None => log::warn!("drop target {target:?} was removed before the drop completed"),
                }
                self.coordinator
                    .on_drop(session.draggable.as_ref(), target);
                session.draggable.on_drop(target);
            }
            Finish::Cancel => {
                self.coordinator
                    .on_drag_cancel(session.draggable.as_ref());
                session.draggable.on_drag_cancel();
            }
        }
        self.teardown(session);
    }

    /// Releases everything a session holds. Runs exactly once per session.
    fn teardown(&mut self, session: DragSession<H::Element>) {
        for entry in &mut self.targets {
            if !session.released.contains(&entry.id) {
                entry.target.remove_placeholder();
            }
        }
        self.host.detach(&session.helper);
        self.host
            .set_root_class(&self.options.drag_marker_class, false);
        self.animation = None;
        self.stop_dragging();
        log::debug!("drag session finished after {:?}", session.phase);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host and collaborators shared by the integration tests.
//!
//! Elements are plain `u32` ids. The default scene is:
//!
//! - `ROOT` (1): page root at the origin; parent of the helper and targets.
//! - `T_EL` (10) and `U_EL` (11): drop target elements.
//! - `DRAGGABLE_EL` (20): the dragged item, at absolute (10, 10) inside T.
//! - `HELPER_EL` (30): the drag helper, child of `ROOT`.
//! - `PLACEHOLDER_EL` (31): the placeholder, at absolute (40, 60).
//! - `ALT_PLACEHOLDER_EL` (32) and `ALT_HELPER_EL` (33): replacements for
//!   the session overrides; the placeholder sits at absolute (70, 80).

#![allow(dead_code, reason = "each test binary uses a different subset")]
#![allow(unreachable_pub, reason = "shared test module")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_dnd::{
    CancelToken, DndHost, DndOptions, DragController, DragCoordinator, DragHandle, Draggable,
    DropTarget, HandleId, MoveAnimation, Orientation, ScrollMetrics, Scroller, TargetId,
};

pub type El = u32;

pub const ROOT: El = 1;
pub const T_EL: El = 10;
pub const U_EL: El = 11;
pub const DRAGGABLE_EL: El = 20;
pub const HELPER_EL: El = 30;
pub const PLACEHOLDER_EL: El = 31;
pub const ALT_PLACEHOLDER_EL: El = 32;
pub const ALT_HELPER_EL: El = 33;
pub const HANDLE_EL: El = 40;
pub const SCROLL_EL: El = 50;

/// Everything observable that collaborators did, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    DragStart(Option<TargetId>),
    BeforeDrop(TargetId),
    CoordinatorDrop(TargetId),
    CoordinatorCancel,
    AnimationStart(Option<TargetId>),
    Enter(TargetId),
    Leave(TargetId),
    Positioned(TargetId),
    Insert(&'static str, Point),
    Reposition(&'static str, Point),
    Remove(&'static str),
    TargetDrop(&'static str),
    StartDrag(Option<TargetId>),
    DraggableDrop(TargetId),
    DraggableCancel,
}

#[derive(Clone, Debug, Default)]
pub struct Journal {
    calls: Rc<RefCell<Vec<Call>>>,
    /// Placeholder element handed to each insert, by target name.
    placements: Rc<RefCell<Vec<(&'static str, El)>>>,
}

impl Journal {
    pub fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn placed(&self, target: &'static str, placeholder: El) {
        self.placements.borrow_mut().push((target, placeholder));
    }

    pub fn placements(&self) -> Vec<(&'static str, El)> {
        self.placements.borrow().clone()
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<El>,
    pub absolute: Point,
    pub offset: Point,
}

#[derive(Debug)]
pub struct MockHost {
    pub nodes: HashMap<El, Node>,
    pub page: ScrollMetrics,
    pub scrollers: HashMap<El, ScrollMetrics>,
    pub root_classes: Vec<String>,
    pub class_log: Vec<(String, bool)>,
    pub timers: Vec<(Duration, CancelToken)>,
    pub animations: Vec<MoveAnimation<El>>,
    pub helper_moves: Vec<(El, Point)>,
    pub detached: Vec<El>,
    pub scroll_writes: Vec<(Scroller<El>, Vec2)>,
}

impl MockHost {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        let mut node = |id, parent, absolute: (f64, f64)| {
            nodes.insert(
                id,
                Node {
                    parent,
                    absolute: Point::new(absolute.0, absolute.1),
                    offset: Point::ZERO,
                },
            );
        };
        node(ROOT, None, (0.0, 0.0));
        node(T_EL, Some(ROOT), (0.0, 0.0));
        node(U_EL, Some(ROOT), (200.0, 0.0));
        node(DRAGGABLE_EL, Some(T_EL), (10.0, 10.0));
        node(HELPER_EL, Some(ROOT), (0.0, 0.0));
        node(PLACEHOLDER_EL, Some(T_EL), (40.0, 60.0));
        node(ALT_PLACEHOLDER_EL, Some(ROOT), (70.0, 80.0));
        node(ALT_HELPER_EL, Some(ROOT), (0.0, 0.0));
        Self {
            nodes,
            page: fitting(Rect::new(0.0, 0.0, 1000.0, 1000.0)),
            scrollers: HashMap::new(),
            root_classes: Vec::new(),
            class_log: Vec::new(),
            timers: Vec::new(),
            animations: Vec::new(),
            helper_moves: Vec::new(),
            detached: Vec::new(),
            scroll_writes: Vec::new(),
        }
    }

    /// Puts the helper back under the root, as a fresh helper would be.
    pub fn reattach_helper(&mut self) {
        if let Some(node) = self.nodes.get_mut(&HELPER_EL) {
            node.parent = Some(ROOT);
        }
    }

    pub fn helper_offset(&self) -> Point {
        self.nodes[&HELPER_EL].offset
    }

    pub fn scroll_offset(&self, el: El) -> Vec2 {
        self.scrollers[&el].offset
    }

    pub fn last_animation(&self) -> &MoveAnimation<El> {
        self.animations.last().expect("an animation was started")
    }

    pub fn live_timer(&self) -> CancelToken {
        self.timers
            .iter()
            .rev()
            .map(|(_, token)| token.clone())
            .find(|token| !token.is_cancelled())
            .expect("a scroll task is running")
    }
}

/// Metrics of a container whose content exactly fits.
pub fn fitting(viewport: Rect) -> ScrollMetrics {
    ScrollMetrics {
        offset: Vec2::ZERO,
        viewport,
        content: viewport.size(),
    }
}

/// Metrics of a 400x300 container with 1000px of content height.
pub fn tall_scroller(offset_y: f64) -> ScrollMetrics {
    ScrollMetrics {
        offset: Vec2::new(0.0, offset_y),
        viewport: Rect::new(0.0, 0.0, 400.0, 300.0),
        content: Size::new(400.0, 1000.0),
    }
}

impl DndHost for MockHost {
    type Element = El;

    fn absolute_position(&self, element: &El) -> Point {
        self.nodes.get(element).map_or(Point::ZERO, |n| n.absolute)
    }

    fn relative_position(&self, pointer: Point, element: &El) -> Point {
        let scroll = self.scrollers.get(element).map_or(Vec2::ZERO, |m| m.offset);
        (pointer - self.absolute_position(element) + scroll).to_point()
    }

    fn parent(&self, element: &El) -> Option<El> {
        self.nodes.get(element).and_then(|n| n.parent)
    }

    fn offset_position(&self, element: &El) -> Point {
        self.nodes.get(element).map_or(Point::ZERO, |n| n.offset)
    }

    fn set_offset_position(&mut self, element: &El, position: Point) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.offset = position;
        }
        self.helper_moves.push((*element, position));
    }

    fn detach(&mut self, element: &El) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.parent = None;
        }
        self.detached.push(*element);
    }

    fn scroll_metrics(&self, scroller: &Scroller<El>) -> ScrollMetrics {
        match scroller {
            Scroller::Page => self.page,
            Scroller::Element(el) => self.scrollers.get(el).copied().unwrap_or_else(|| {
                let origin = self.absolute_position(el);
                fitting(Rect::from_origin_size(origin, Size::new(100.0, 100.0)))
            }),
        }
    }

    fn set_scroll_offset(&mut self, scroller: &Scroller<El>, offset: Vec2) {
        match scroller {
            Scroller::Page => self.page.offset = offset,
            Scroller::Element(el) => {
                if let Some(metrics) = self.scrollers.get_mut(el) {
                    metrics.offset = offset;
                }
            }
        }
        self.scroll_writes.push((scroller.clone(), offset));
    }

    fn set_root_class(&mut self, class: &str, enabled: bool) {
        self.root_classes.retain(|c| c != class);
        if enabled {
            self.root_classes.push(class.to_owned());
        }
        self.class_log.push((class.to_owned(), enabled));
    }

    fn schedule_repeating(&mut self, period: Duration, token: CancelToken) {
        self.timers.push((period, token));
    }

    fn start_animation(&mut self, animation: MoveAnimation<El>) {
        self.animations.push(animation);
    }
}

/// A rectangular target that records every call.
pub struct TestTarget {
    pub name: &'static str,
    pub element: El,
    pub bounds: Rect,
    pub index: Option<usize>,
    /// Index reported after an insert; `None` simulates a target that
    /// cannot place the placeholder.
    pub index_on_insert: Option<usize>,
    pub journal: Journal,
}

impl TestTarget {
    pub fn new(name: &'static str, element: El, bounds: Rect, journal: &Journal) -> Self {
        Self {
            name,
            element,
            bounds,
            index: None,
            index_on_insert: Some(0),
            journal: journal.clone(),
        }
    }
}

impl DropTarget<El> for TestTarget {
    fn element(&self) -> El {
        self.element
    }

    fn check_position(&self, pointer: Point, orientation: Orientation) -> bool {
        let in_x = pointer.x >= self.bounds.x0 && pointer.x < self.bounds.x1;
        let in_y = pointer.y >= self.bounds.y0 && pointer.y < self.bounds.y1;
        match orientation {
            Orientation::All => in_x && in_y,
            Orientation::Horizontal => in_x,
            Orientation::Vertical => in_y,
        }
    }

    fn insert_placeholder(&mut self, placeholder: &El, pointer: Point, _orientation: Orientation) {
        self.index = self.index_on_insert;
        self.journal.placed(self.name, *placeholder);
        self.journal.push(Call::Insert(self.name, pointer));
    }

    fn reposition_placeholder(&mut self, pointer: Point, _orientation: Orientation) {
        self.journal.push(Call::Reposition(self.name, pointer));
    }

    fn remove_placeholder(&mut self) {
        self.index = None;
        self.journal.push(Call::Remove(self.name));
    }

    fn placeholder_index(&self) -> Option<usize> {
        self.index
    }

    fn on_drop(&mut self, _draggable: &dyn Draggable<El>) {
        self.journal.push(Call::TargetDrop(self.name));
    }
}

pub struct TestDraggable {
    pub parent: Option<TargetId>,
    pub journal: Journal,
}

impl Draggable<El> for TestDraggable {
    fn element(&self) -> El {
        DRAGGABLE_EL
    }

    fn parent_target(&self) -> Option<TargetId> {
        self.parent
    }

    fn drag_helper(&mut self, _target: Option<TargetId>) -> El {
        HELPER_EL
    }

    fn placeholder(&mut self, _target: Option<TargetId>) -> El {
        PLACEHOLDER_EL
    }

    fn on_start_drag(&mut self, target: Option<TargetId>) {
        self.journal.push(Call::StartDrag(target));
    }

    fn on_drop(&mut self, target: TargetId) {
        self.journal.push(Call::DraggableDrop(target));
    }

    fn on_drag_cancel(&mut self) {
        self.journal.push(Call::DraggableCancel);
    }
}

pub struct TestHandle {
    pub parent: Option<TargetId>,
    pub enabled: bool,
    pub journal: Journal,
}

impl DragHandle<El> for TestHandle {
    fn element(&self) -> El {
        HANDLE_EL
    }

    fn draggable(&self) -> Option<Box<dyn Draggable<El>>> {
        self.enabled.then(|| {
            Box::new(TestDraggable {
                parent: self.parent,
                journal: self.journal.clone(),
            }) as Box<dyn Draggable<El>>
        })
    }
}

#[derive(Default)]
pub struct RecordingCoordinator {
    pub journal: Journal,
    pub veto_start: bool,
    pub veto_drop: bool,
    pub refuse: Vec<TargetId>,
}

impl DragCoordinator<El> for RecordingCoordinator {
    fn on_drag_start(&mut self, _draggable: &dyn Draggable<El>, target: Option<TargetId>) -> bool {
        self.journal.push(Call::DragStart(target));
        !self.veto_start
    }

    fn on_before_drop(&mut self, _draggable: &dyn Draggable<El>, target: TargetId) -> bool {
        self.journal.push(Call::BeforeDrop(target));
        !self.veto_drop
    }

    fn on_drop(&mut self, _draggable: &dyn Draggable<El>, target: TargetId) {
        self.journal.push(Call::CoordinatorDrop(target));
    }

    fn on_drag_cancel(&mut self, _draggable: &dyn Draggable<El>) {
        self.journal.push(Call::CoordinatorCancel);
    }

    fn on_animation_start(&mut self, _draggable: &dyn Draggable<El>, target: Option<TargetId>) {
        self.journal.push(Call::AnimationStart(target));
    }

    fn on_target_enter(&mut self, _draggable: &dyn Draggable<El>, target: TargetId) -> bool {
        self.journal.push(Call::Enter(target));
        !self.refuse.contains(&target)
    }

    fn on_target_leave(&mut self, _draggable: &dyn Draggable<El>, target: TargetId) {
        self.journal.push(Call::Leave(target));
    }

    fn on_positioned_placeholder(&mut self, _draggable: &dyn Draggable<El>, target: TargetId) {
        self.journal.push(Call::Positioned(target));
    }
}

pub type Controller = DragController<MockHost, RecordingCoordinator>;

pub struct Fixture {
    pub dnd: Controller,
    pub journal: Journal,
    pub t: TargetId,
    pub u: TargetId,
    pub handle: HandleId,
}

/// T covers (0,0)-(100,100), U covers (200,0)-(300,100).
pub fn fixture() -> Fixture {
    fixture_with(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(200.0, 0.0, 300.0, 100.0),
        DndOptions::default(),
    )
}

pub fn fixture_with(t_bounds: Rect, u_bounds: Rect, options: DndOptions) -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();
    let journal = Journal::default();
    let coordinator = RecordingCoordinator {
        journal: journal.clone(),
        ..RecordingCoordinator::default()
    };
    let mut dnd = DragController::with_options(MockHost::new(), coordinator, options)
        .expect("valid options");
    let t = dnd.add_target(Box::new(TestTarget::new("T", T_EL, t_bounds, &journal)));
    let u = dnd.add_target(Box::new(TestTarget::new("U", U_EL, u_bounds, &journal)));
    let handle = dnd.register_handle(Box::new(TestHandle {
        parent: Some(t),
        enabled: true,
        journal: journal.clone(),
    }));
    Fixture {
        dnd,
        journal,
        t,
        u,
        handle,
    }
}

/// Asserts the idempotent teardown law.
pub fn assert_torn_down(dnd: &Controller) {
    assert!(dnd.phase().is_none(), "session should be gone");
    assert!(dnd.current_target().is_none(), "current target should be cleared");
    assert!(dnd.draggable().is_none(), "draggable should be cleared");
    assert!(dnd.drag_helper().is_none(), "helper should be cleared");
    assert!(dnd.placeholder().is_none(), "placeholder should be cleared");
    assert!(!dnd.is_animating(), "no animation should remain");
    assert!(!dnd.is_capturing(), "input capture should be released");
    assert_eq!(dnd.capture_slot().installed_count(), 0, "capture leaked");
    assert!(
        dnd.host().root_classes.is_empty(),
        "drag marker class should be removed"
    );
    assert!(
        dnd.host().detached.contains(&HELPER_EL),
        "helper should be detached"
    );
}

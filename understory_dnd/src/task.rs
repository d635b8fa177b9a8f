// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identities for work the controller posts to the host's UI queue.
//!
//! The controller never owns a timer or an animation driver. Instead it posts
//! two kinds of task to the host:
//!
//! - A repeating scroll task, identified by a [`CancelToken`]. The host calls
//!   [`DragController::on_scroll_tick`](crate::DragController::on_scroll_tick)
//!   every period until the token reports cancellation.
//! - A one-shot end animation, identified by an [`AnimationTicket`]. The host
//!   calls [`DragController::finish_animation`](crate::DragController::finish_animation)
//!   once when the animation completes.
//!
//! ```
//! use understory_dnd::CancelToken;
//!
//! let token = CancelToken::new();
//! let held_by_host = token.clone();
//! assert!(!held_by_host.is_cancelled());
//!
//! token.cancel();
//! assert!(held_by_host.is_cancelled());
//! assert!(token.is_same_task(&held_by_host));
//! ```

use alloc::rc::Rc;
use core::cell::Cell;

/// Shared cancellation flag of a repeating task.
///
/// Clones observe the same flag; cancelling any clone cancels the task.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the task. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` once the task has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Returns `true` if both tokens identify the same task.
    #[must_use]
    pub fn is_same_task(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// Identifies one end animation and its pending completion continuation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationTicket(pub(crate) u64);

impl AnimationTicket {
    /// The raw ticket number, unique per controller.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

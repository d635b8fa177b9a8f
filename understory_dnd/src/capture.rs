// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped registration of the global input capture.
//!
//! While a drag is in progress the controller intercepts every pointer,
//! keyboard and wheel event. The capture is represented by a [`CaptureGuard`]
//! that is installed when the session starts and released by dropping it, so
//! every exit path (drop, cancel, veto, teardown) releases it exactly once.
//!
//! Hosts observe the registration through a [`CaptureSlot`], typically to
//! decide whether to route native events to the controller first.
//!
//! ```
//! use understory_dnd::CaptureSlot;
//!
//! let slot = CaptureSlot::default();
//! assert!(!slot.is_installed());
//!
//! let guard = slot.install();
//! assert!(slot.is_installed());
//!
//! drop(guard);
//! assert!(!slot.is_installed());
//! ```

use alloc::rc::Rc;
use core::cell::Cell;

/// Observable registration point for the input capture.
#[derive(Clone, Debug, Default)]
pub struct CaptureSlot {
    installed: Rc<Cell<u32>>,
}

impl CaptureSlot {
    /// Installs a capture, returning the guard that owns it.
    #[must_use = "the capture is released as soon as the guard is dropped"]
    pub fn install(&self) -> CaptureGuard {
        self.installed.set(self.installed.get() + 1);
        CaptureGuard {
            installed: Rc::clone(&self.installed),
        }
    }

    /// Returns `true` while at least one guard is alive.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed.get() > 0
    }

    /// Number of live guards. Anything above one is a leak.
    #[must_use]
    pub fn installed_count(&self) -> u32 {
        self.installed.get()
    }
}

/// An installed input capture. Dropping the guard releases it.
#[derive(Debug)]
pub struct CaptureGuard {
    installed: Rc<Cell<u32>>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.installed.set(self.installed.get().saturating_sub(1));
    }
}

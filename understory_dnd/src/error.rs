// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors of the registration and configuration API.

use crate::capability::{HandleId, TargetId};

/// Errors reported by the drag controller's registration and configuration API.
///
/// Gesture handling itself never fails: invalid presses are ignored and
/// vetoes redirect to the cancel path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DndError {
    /// The drop target is not registered with this controller.
    #[error("drop target {0:?} is not registered")]
    UnknownTarget(TargetId),
    /// The drag handle is not registered with this controller.
    #[error("drag handle {0:?} is not registered")]
    UnknownHandle(HandleId),
    /// A configuration value is out of range.
    #[error("invalid option `{field}`: {reason}")]
    InvalidOption {
        /// Name of the offending [`DndOptions`](crate::DndOptions) field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

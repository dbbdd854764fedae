// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for popover operations.

use thiserror::Error;

/// Errors reported by [`Popover`](crate::Popover) operations.
///
/// None of these are fatal: the instance stays usable after any of them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PopoverError {
    /// The anchor has no box: it is missing, empty or detached from the document.
    #[error("popover anchor is missing or detached from the document")]
    MissingAnchor,
    /// The popover markup does not exist yet; it is created by `show()`.
    #[error("popover markup has not been created yet")]
    NotCreated,
    /// A callback was registered under a name that is not a lifecycle trigger.
    #[error("unknown callback trigger {0:?}; it would never be called")]
    UnknownHook(String),
}

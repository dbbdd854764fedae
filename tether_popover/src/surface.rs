// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering layer a popover drives: markup, classes, measurement and transitions.
//!
//! ## Overview
//!
//! A [`Surface`] bundles every external collaborator of a popover behind one trait:
//! element creation and removal, style classes, measurement of the anchor, the
//! popover and the viewport, and notification when a class-driven transition ends.
//! Implement it for your DOM binding or scene graph; [`HeadlessSurface`](crate::headless::HeadlessSurface)
//! is an in-memory implementation.
//!
//! Methods take `&self`. Implementations that mutate state use interior
//! mutability, the way DOM handles do. They must not call back into a popover
//! synchronously, with the single exception of [`Surface::await_transition`],
//! which may complete immediately.

use core::fmt;

use kurbo::{Point, Rect, Size};
use tether_placement::Viewport;

/// Style classes set on popover markup.
///
/// The visibility classes follow the lifecycle: [`INACTIVE`] while hidden,
/// [`ACTIVATING`] during entry, [`ACTIVE`] while shown, [`DEACTIVATING`] during exit.
/// Placement classes come from [`Placement::classes`](tether_placement::Placement::classes).
pub mod classes {
    /// Set on every popover element.
    pub const POPOVER: &str = "tether-popover";
    /// Settled, hidden state.
    pub const INACTIVE: &str = "inactive";
    /// Entry transition in progress.
    pub const ACTIVATING: &str = "activating";
    /// Shown.
    pub const ACTIVE: &str = "active";
    /// Exit transition in progress.
    pub const DEACTIVATING: &str = "deactivating";
}

/// One-shot completion signal for an exit transition.
///
/// Handed to [`Surface::await_transition`]. Call [`TransitionDone::complete`]
/// once the transition has finished (or a fallback timeout fired). Completing a
/// signal that a later `show()` or `destroy()` superseded is harmless: the
/// popover ignores it.
pub struct TransitionDone(Box<dyn FnOnce()>);

impl TransitionDone {
    pub(crate) fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Signal that the transition has finished.
    pub fn complete(self) {
        (self.0)();
    }
}

impl fmt::Debug for TransitionDone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDone").finish_non_exhaustive()
    }
}

/// The rendering layer a popover is displayed through.
pub trait Surface: 'static {
    /// Reference to the anchor element.
    type Anchor: 'static;
    /// Handle to created popover markup.
    type Handle: Clone + fmt::Debug + 'static;
    /// Content payload placed inside the popover.
    type Content: 'static;

    /// Document box of the anchor: outer size (border and padding, no margin).
    ///
    /// Returns `None` when the anchor is missing, empty or detached.
    fn anchor_box(&self, anchor: &Self::Anchor) -> Option<Rect>;

    /// The visible part of the document.
    fn viewport(&self) -> Viewport;

    /// Create popover markup carrying `classes` and `content`, and attach it to the document.
    fn create_popover(&self, classes: &[&str], content: Option<&Self::Content>) -> Self::Handle;

    /// Detach and drop popover markup.
    fn remove_popover(&self, popover: &Self::Handle);

    /// Replace the inner content of popover markup.
    fn set_content(&self, popover: &Self::Handle, content: &Self::Content);

    /// Add a style class. Adding a present class is a no-op.
    fn add_class(&self, popover: &Self::Handle, class: &str);

    /// Remove a style class. Removing an absent class is a no-op.
    fn remove_class(&self, popover: &Self::Handle, class: &str);

    /// Outer size of the popover markup.
    fn popover_size(&self, popover: &Self::Handle) -> Size;

    /// Move the popover's top-left corner to a document position.
    fn set_offset(&self, popover: &Self::Handle, offset: Point);

    /// Flush pending style changes so that the class changes made before this
    /// call and those made after it are rendered as two distinct states.
    ///
    /// In a browser this is a forced synchronous layout read. Without it, entry
    /// and exit transitions collapse into a single style change and never play.
    fn commit(&self, popover: &Self::Handle);

    /// Arrange for `done` to be completed when the exit transition of `popover` ends.
    ///
    /// The default completes immediately, for surfaces without transitions.
    fn await_transition(&self, popover: &Self::Handle, done: TransitionDone) {
        let _ = popover;
        done.complete();
    }
}

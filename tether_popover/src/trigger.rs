// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger binding: map pointer input on the anchor to show/hide intents.
//!
//! ## Usage
//!
//! 1) Feed raw "is the pointer over the anchor" samples to [`PointerTracker::update`]
//!    to get edge events ([`PointerInput::Enter`] / [`PointerInput::Leave`]); forward clicks as
//!    [`PointerInput::Click`].
//! 2) Hand each event to [`Popover::handle_input`](crate::Popover::handle_input), which asks
//!    the popover's [`TriggerMode`] for an [`Intent`] and applies it.
//!
//! ```
//! use tether_popover::trigger::{Intent, PointerInput, PointerTracker, TriggerMode};
//!
//! let mut pointer = PointerTracker::new();
//! assert_eq!(pointer.update(true), Some(PointerInput::Enter));
//! assert_eq!(pointer.update(true), None);
//! assert_eq!(TriggerMode::Hover.intent(PointerInput::Enter), Some(Intent::Show));
//! ```

/// Which pointer input shows and hides a popover.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TriggerMode {
    /// Show on pointer enter, hide on pointer leave.
    #[default]
    Hover,
    /// Toggle on click.
    Click,
    /// Ignore pointer input; the application calls `show()`/`hide()` itself.
    None,
}

/// Pointer input relevant to triggering.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerInput {
    /// The pointer moved onto the anchor.
    Enter,
    /// The pointer moved off the anchor.
    Leave,
    /// The anchor was clicked.
    Click,
}

/// What a trigger asks the popover to do.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Intent {
    /// Call `show()`.
    Show,
    /// Call `hide()`.
    Hide,
    /// Hide if shown (or showing), show otherwise.
    Toggle,
}

impl TriggerMode {
    /// The intent for `input`, or `None` when this mode ignores it.
    pub fn intent(self, input: PointerInput) -> Option<Intent> {
        match (self, input) {
            (Self::Hover, PointerInput::Enter) => Some(Intent::Show),
            (Self::Hover, PointerInput::Leave) => Some(Intent::Hide),
            (Self::Click, PointerInput::Click) => Some(Intent::Toggle),
            _ => None,
        }
    }
}

/// Turns "pointer is inside" samples into enter/leave edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerTracker {
    inside: bool,
}

impl PointerTracker {
    /// A tracker that starts with the pointer outside.
    pub fn new() -> Self {
        Self { inside: false }
    }

    /// Whether the last sample was inside.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Record a sample and return the transition it caused, if any.
    pub fn update(&mut self, inside: bool) -> Option<PointerInput> {
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            PointerInput::Enter
        } else {
            PointerInput::Leave
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_maps_enter_and_leave() {
        assert_eq!(TriggerMode::Hover.intent(PointerInput::Enter), Some(Intent::Show));
        assert_eq!(TriggerMode::Hover.intent(PointerInput::Leave), Some(Intent::Hide));
        assert_eq!(TriggerMode::Hover.intent(PointerInput::Click), None);
    }

    #[test]
    fn click_toggles_and_ignores_hover() {
        assert_eq!(TriggerMode::Click.intent(PointerInput::Click), Some(Intent::Toggle));
        assert_eq!(TriggerMode::Click.intent(PointerInput::Enter), None);
        assert_eq!(TriggerMode::Click.intent(PointerInput::Leave), None);
    }

    #[test]
    fn none_ignores_everything() {
        for input in [PointerInput::Enter, PointerInput::Leave, PointerInput::Click] {
            assert_eq!(TriggerMode::None.intent(input), None);
        }
    }

    // Repeated samples produce no events; only changes do.
    #[test]
    fn tracker_emits_edges_only() {
        let mut t = PointerTracker::new();
        assert_eq!(t.update(false), None);
        assert_eq!(t.update(true), Some(PointerInput::Enter));
        assert_eq!(t.update(true), None);
        assert!(t.is_inside());
        assert_eq!(t.update(false), Some(PointerInput::Leave));
        assert_eq!(t.update(false), None);
    }
}

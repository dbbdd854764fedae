// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration.
//!
//! A [`PopoverConfig`] is fixed once the popover is constructed. Build one with
//! struct update syntax or the `with_*` methods, starting from a profile:
//!
//! - [`PopoverConfig::default`]: no fallback placements, diagnostics on.
//! - [`PopoverConfig::legacy`]: falls back to `"center bottom"`.
//! - [`PopoverConfig::quiet`]: diagnostics off.
//!
//! With the `serde` feature, a config deserializes from camelCase keys and
//! missing keys take their default:
//!
//! ```json
//! { "position": "right bottom", "alternativePositions": ["left center"], "offsetX": 4 }
//! ```

use kurbo::Vec2;
use tether_placement::Placement;

use crate::trigger::TriggerMode;

/// Group that popovers join when they disallow parallel use without naming a group.
pub const DEFAULT_GROUP: &str = "default";

/// Which placement label a popover keeps when a fallback placement was applied.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum LabelPolicy {
    /// Keep the requested primary label (and its classes) even though an
    /// alternative's offset is applied. Matches the historical widget.
    #[default]
    KeepPrimary,
    /// Switch the label and its classes to the placement actually applied.
    FollowApplied,
}

/// Configuration of a single popover.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct PopoverConfig {
    /// Pointer input that shows and hides the popover.
    pub trigger: TriggerMode,
    /// Primary placement.
    pub position: Placement,
    /// Placements tried in order when the primary one leaves the viewport.
    pub alternative_positions: Vec<Placement>,
    /// Horizontal gap between anchor and popover, in pixels.
    pub offset_x: f64,
    /// Vertical gap between anchor and popover, in pixels.
    pub offset_y: f64,
    /// Additional whitespace-separated classes for the popover markup.
    pub popover_class: Option<String>,
    /// Group to join at construction.
    pub group: Option<String>,
    /// When `false`, showing this popover hides the others in its group, and
    /// the popover joins [`DEFAULT_GROUP`] unless `group` names another.
    pub allow_parallel_use: bool,
    /// Drop the markup as soon as a hide completes.
    pub disposable: bool,
    /// Emit diagnostics through `tracing`.
    pub debug: bool,
    /// Label kept after a fallback placement.
    pub label_policy: LabelPolicy,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerMode::Hover,
            position: Placement::RIGHT_CENTER,
            alternative_positions: Vec::new(),
            offset_x: 10.0,
            offset_y: 10.0,
            popover_class: None,
            group: None,
            allow_parallel_use: true,
            disposable: false,
            debug: true,
            label_policy: LabelPolicy::KeepPrimary,
        }
    }
}

impl PopoverConfig {
    /// The profile that falls back to `"center bottom"`.
    pub fn legacy() -> Self {
        Self {
            alternative_positions: vec![Placement::CENTER_BOTTOM],
            ..Self::default()
        }
    }

    /// The default profile with diagnostics off.
    pub fn quiet() -> Self {
        Self {
            debug: false,
            ..Self::default()
        }
    }

    /// Set the trigger mode.
    pub fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set the primary placement.
    pub fn with_position(mut self, position: Placement) -> Self {
        self.position = position;
        self
    }

    /// Set the fallback placements, tried in order.
    pub fn with_alternatives(mut self, alternatives: impl IntoIterator<Item = Placement>) -> Self {
        self.alternative_positions = alternatives.into_iter().collect();
        self
    }

    /// Set both gaps between anchor and popover.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set additional classes for the popover markup.
    pub fn with_popover_class(mut self, class: impl Into<String>) -> Self {
        self.popover_class = Some(class.into());
        self
    }

    /// Join the named group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Allow or forbid other group members being shown at the same time.
    pub fn with_parallel_use(mut self, allow: bool) -> Self {
        self.allow_parallel_use = allow;
        self
    }

    /// Drop markup after every completed hide.
    pub fn with_disposable(mut self, disposable: bool) -> Self {
        self.disposable = disposable;
        self
    }

    /// Turn diagnostics on or off.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Choose the label kept after a fallback placement.
    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    /// Both gaps as a vector.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// The group this configuration joins, if any.
    ///
    /// An explicit `group` wins; otherwise [`DEFAULT_GROUP`] when parallel use is forbidden.
    pub fn effective_group(&self) -> Option<&str> {
        match &self.group {
            Some(group) => Some(group.as_str()),
            None if !self.allow_parallel_use => Some(DEFAULT_GROUP),
            None => None,
        }
    }

    /// The additional popover classes, split on whitespace.
    pub fn popover_classes(&self) -> impl Iterator<Item = &str> {
        self.popover_class
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }
}

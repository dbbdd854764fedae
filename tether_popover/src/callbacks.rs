// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle triggers and the per-instance callback table.
//!
//! Element hooks ([`Hook`]) receive the anchor and the popover handle. Group
//! events ([`GroupEvent`]) are delivered by the group registry and receive the
//! id of the member that caused them.

use core::fmt;
use core::str::FromStr;
use std::rc::Rc;

use crate::error::PopoverError;
use crate::group::MemberId;
use crate::surface::Surface;

/// Lifecycle moments that call element callbacks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Hook {
    /// The markup was just created, before any visibility class was applied.
    AfterCreate,
    /// The popover reached the active state.
    AfterShow,
    /// The exit transition finished; fires before any disposal.
    AfterHide,
}

impl Hook {
    /// The trigger name, e.g. `"afterShow"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AfterCreate => "afterCreate",
            Self::AfterShow => "afterShow",
            Self::AfterHide => "afterHide",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hook {
    type Err = PopoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "afterCreate" => Ok(Self::AfterCreate),
            "afterShow" => Ok(Self::AfterShow),
            "afterHide" => Ok(Self::AfterHide),
            _ => Err(PopoverError::UnknownHook(s.to_owned())),
        }
    }
}

/// Events broadcast to the other members of a group.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum GroupEvent {
    /// A member is about to become active.
    BeforeShow,
}

impl GroupEvent {
    /// The event name, e.g. `"beforeShow"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeShow => "beforeShow",
        }
    }
}

impl fmt::Display for GroupEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupEvent {
    type Err = PopoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beforeShow" => Ok(Self::BeforeShow),
            _ => Err(PopoverError::UnknownHook(s.to_owned())),
        }
    }
}

pub(crate) type HookFn<S> = Rc<dyn Fn(&<S as Surface>::Anchor, &<S as Surface>::Handle)>;
pub(crate) type GroupFn = Rc<dyn Fn(MemberId)>;

/// Ordered callbacks per trigger.
///
/// Callers take a snapshot before invoking so that a callback may register
/// further callbacks, or re-enter the popover, without a live borrow.
pub(crate) struct Callbacks<S: Surface> {
    after_create: Vec<HookFn<S>>,
    after_show: Vec<HookFn<S>>,
    after_hide: Vec<HookFn<S>>,
    before_show: Vec<GroupFn>,
}

impl<S: Surface> Default for Callbacks<S> {
    fn default() -> Self {
        Self {
            after_create: Vec::new(),
            after_show: Vec::new(),
            after_hide: Vec::new(),
            before_show: Vec::new(),
        }
    }
}

impl<S: Surface> Callbacks<S> {
    fn list(&self, hook: Hook) -> &[HookFn<S>] {
        match hook {
            Hook::AfterCreate => &self.after_create,
            Hook::AfterShow => &self.after_show,
            Hook::AfterHide => &self.after_hide,
        }
    }

    fn list_mut(&mut self, hook: Hook) -> &mut Vec<HookFn<S>> {
        match hook {
            Hook::AfterCreate => &mut self.after_create,
            Hook::AfterShow => &mut self.after_show,
            Hook::AfterHide => &mut self.after_hide,
        }
    }

    pub(crate) fn push(&mut self, hook: Hook, f: HookFn<S>) {
        self.list_mut(hook).push(f);
    }

    pub(crate) fn snapshot(&self, hook: Hook) -> Vec<HookFn<S>> {
        self.list(hook).to_vec()
    }

    pub(crate) fn push_group(&mut self, event: GroupEvent, f: GroupFn) {
        match event {
            GroupEvent::BeforeShow => self.before_show.push(f),
        }
    }

    pub(crate) fn group_snapshot(&self, event: GroupEvent) -> Vec<GroupFn> {
        match event {
            GroupEvent::BeforeShow => self.before_show.clone(),
        }
    }

    pub(crate) fn len(&self, hook: Hook) -> usize {
        self.list(hook).len()
    }
}

impl<S: Surface> fmt::Debug for Callbacks<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("after_create", &self.after_create.len())
            .field("after_show", &self.after_show.len())
            .field("after_hide", &self.after_hide.len())
            .field("before_show", &self.before_show.len())
            .finish()
    }
}

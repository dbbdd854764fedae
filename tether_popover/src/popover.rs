// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popover instance: markup lifecycle, visibility state machine and positioning.
//!
//! ## Lifecycle
//!
//! ```text
//! Hidden --show--> Activating --> Active --hide--> Deactivating --done--> Hidden
//!                                                                    \--> Disposed (disposable)
//! ```
//!
//! `Activating` lasts for the duration of `show()`: positioning and the group
//! broadcast happen inside it. `Deactivating` lasts until the surface completes
//! the [`TransitionDone`] handed to [`Surface::await_transition`]. Each
//! transition bumps an epoch; a completion from an older epoch is ignored, so
//! `show()` during `Deactivating` cancels the pending hide.
//!
//! No internal borrow is held while callbacks, group siblings, or transition
//! completion run, so all of them may re-enter the popover.

use core::cell::RefCell;
use core::fmt;
use std::rc::{Rc, Weak};

use tether_placement::{Placement, PlacementRequest, Resolution};
use tracing::{debug, error, warn};

use crate::callbacks::{Callbacks, GroupEvent, Hook};
use crate::config::{LabelPolicy, PopoverConfig};
use crate::error::PopoverError;
use crate::group::{GroupMember, Groups, MemberId};
use crate::surface::{Surface, TransitionDone, classes};
use crate::trigger::{Intent, PointerInput};

/// Visibility state of a popover.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Visibility {
    /// Not shown. Markup may or may not exist.
    #[default]
    Hidden,
    /// Inside `show()`, before reaching [`Visibility::Active`].
    Activating,
    /// Shown.
    Active,
    /// Exit transition running.
    Deactivating,
    /// Hidden and markup released after a disposable hide.
    Disposed,
}

struct State<S: Surface> {
    visibility: Visibility,
    // Placement asked for, by configuration or `position_popover`.
    requested: Placement,
    // Placement whose classes the markup carries.
    label: Placement,
    element: Option<S::Handle>,
    content: Option<S::Content>,
    callbacks: Callbacks<S>,
    epoch: u64,
    group: Option<String>,
}

struct Shared<S: Surface> {
    id: MemberId,
    me: Weak<Self>,
    surface: Rc<S>,
    anchor: S::Anchor,
    config: PopoverConfig,
    groups: Groups,
    state: RefCell<State<S>>,
}

/// A popover attached to an anchor on a [`Surface`].
///
/// Cloning yields another handle to the same instance. Markup is created
/// lazily by the first [`show`](Self::show). Dropping the last handle leaves
/// the group; call [`destroy`](Self::destroy) to also remove the markup.
pub struct Popover<S: Surface> {
    shared: Rc<Shared<S>>,
}

impl<S: Surface> Clone for Popover<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: Surface> Popover<S> {
    /// Create a popover for `anchor`, registered in the thread's [`Groups::global`] registry.
    pub fn new(surface: Rc<S>, anchor: S::Anchor, config: PopoverConfig) -> Self {
        Self::with_groups(surface, anchor, config, Groups::global())
    }

    /// Create a popover registered in `groups`.
    ///
    /// Joins [`PopoverConfig::effective_group`], if any. When parallel use is
    /// forbidden, also installs the `beforeShow` callback that hides this
    /// popover whenever a sibling is about to show.
    pub fn with_groups(
        surface: Rc<S>,
        anchor: S::Anchor,
        config: PopoverConfig,
        groups: Groups,
    ) -> Self {
        let id = MemberId::next();
        let group = config.effective_group().map(str::to_owned);
        let position = config.position;
        let shared = Rc::new_cyclic(|me| Shared {
            id,
            me: me.clone(),
            surface,
            anchor,
            config,
            groups,
            state: RefCell::new(State {
                visibility: Visibility::Hidden,
                requested: position,
                label: position,
                element: None,
                content: None,
                callbacks: Callbacks::default(),
                epoch: 0,
                group: group.clone(),
            }),
        });

        if shared.config.debug && shared.surface.anchor_box(&shared.anchor).is_none() {
            error!(popover = %id, "anchor is missing or detached; show() will fail");
        }

        if !shared.config.allow_parallel_use {
            let me = Rc::downgrade(&shared);
            shared.state.borrow_mut().callbacks.push_group(
                GroupEvent::BeforeShow,
                Rc::new(move |origin: MemberId| {
                    if let Some(shared) = me.upgrade() {
                        if shared.hide() && shared.config.debug {
                            debug!(popover = %shared.id, %origin, "hidden for sibling");
                        }
                    }
                }),
            );
        }

        if let Some(name) = &group {
            let weak: Weak<Shared<S>> = Rc::downgrade(&shared);
            let member: Weak<dyn GroupMember> = weak;
            shared.groups.register(name, id, member);
            if shared.config.debug {
                debug!(popover = %id, group = %name, "joined group");
            }
        }

        Self { shared }
    }

    /// Show the popover, creating its markup on first use.
    ///
    /// Returns `Ok(true)` when the popover became active, `Ok(false)` when it
    /// already was (it is repositioned) or when a callback superseded this
    /// call. Fails with [`PopoverError::MissingAnchor`] when the anchor has no box.
    pub fn show(&self) -> Result<bool, PopoverError> {
        self.shared.show()
    }

    /// Start hiding. Returns `false`, changing nothing, unless the popover is active.
    pub fn hide(&self) -> bool {
        self.shared.hide()
    }

    /// Remove the markup and leave the group.
    ///
    /// Returns `false` when there was nothing to remove, so repeated calls are no-ops.
    pub fn destroy(&self) -> bool {
        self.shared.destroy()
    }

    /// Store the content payload and push it into the markup if it exists.
    pub fn set_content(&self, content: S::Content) {
        let shared = &*self.shared;
        let mut st = shared.state.borrow_mut();
        st.content = Some(content);
        if let (Some(element), Some(content)) = (&st.element, &st.content) {
            shared.surface.set_content(element, content);
        }
    }

    /// Position the markup, for `placement` or else the last requested placement.
    ///
    /// A placement passed here becomes the requested placement for later calls.
    pub fn position_popover(
        &self,
        placement: Option<Placement>,
    ) -> Result<Resolution, PopoverError> {
        self.shared.position(placement)
    }

    /// Handle to the markup, if it exists.
    pub fn popover(&self) -> Option<S::Handle> {
        self.shared.state.borrow().element.clone()
    }

    /// Whether the markup exists.
    pub fn exists(&self) -> bool {
        self.shared.state.borrow().element.is_some()
    }

    /// Whether the popover is [`Visibility::Active`].
    pub fn is_active(&self) -> bool {
        self.state() == Visibility::Active
    }

    /// Current visibility state.
    pub fn state(&self) -> Visibility {
        self.shared.state.borrow().visibility
    }

    /// The placement label the markup currently carries.
    pub fn placement(&self) -> Placement {
        self.shared.state.borrow().label
    }

    /// Identifier used in group broadcasts.
    pub fn id(&self) -> MemberId {
        self.shared.id
    }

    /// The group this popover belongs to; `None` after `destroy()`.
    pub fn group(&self) -> Option<String> {
        self.shared.state.borrow().group.clone()
    }

    /// The registry this popover was registered in.
    pub fn groups(&self) -> &Groups {
        &self.shared.groups
    }

    /// The configuration.
    pub fn config(&self) -> &PopoverConfig {
        &self.shared.config
    }

    /// The anchor.
    pub fn anchor(&self) -> &S::Anchor {
        &self.shared.anchor
    }

    /// Register a callback for `hook`. Callbacks run in registration order.
    pub fn add_callback(&self, hook: Hook, f: impl Fn(&S::Anchor, &S::Handle) + 'static) {
        self.shared
            .state
            .borrow_mut()
            .callbacks
            .push(hook, Rc::new(f));
    }

    /// Register a callback by trigger name, e.g. `"afterShow"`.
    ///
    /// An unknown name drops the callback and is reported (and logged as a
    /// warning when diagnostics are on).
    pub fn add_named_callback(
        &self,
        name: &str,
        f: impl Fn(&S::Anchor, &S::Handle) + 'static,
    ) -> Result<(), PopoverError> {
        match name.parse::<Hook>() {
            Ok(hook) => {
                self.add_callback(hook, f);
                Ok(())
            }
            Err(err) => {
                if self.shared.config.debug {
                    warn!(popover = %self.shared.id, trigger = name, "{err}");
                }
                Err(err)
            }
        }
    }

    /// Register a callback for a group event, called with the originating member.
    pub fn add_group_callback(&self, event: GroupEvent, f: impl Fn(MemberId) + 'static) {
        self.shared
            .state
            .borrow_mut()
            .callbacks
            .push_group(event, Rc::new(f));
    }

    /// Number of callbacks registered for `hook`.
    pub fn callback_count(&self, hook: Hook) -> usize {
        self.shared.state.borrow().callbacks.len(hook)
    }

    /// Apply pointer input according to the configured trigger mode.
    ///
    /// Returns whether a transition started; input the mode ignores returns `Ok(false)`.
    pub fn handle_input(&self, input: PointerInput) -> Result<bool, PopoverError> {
        match self.shared.config.trigger.intent(input) {
            None => Ok(false),
            Some(Intent::Show) => self.show(),
            Some(Intent::Hide) => Ok(self.hide()),
            Some(Intent::Toggle) => match self.state() {
                Visibility::Active | Visibility::Activating => Ok(self.hide()),
                _ => self.show(),
            },
        }
    }
}

impl<S: Surface> fmt::Debug for Popover<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.shared.state.borrow();
        f.debug_struct("Popover")
            .field("id", &self.shared.id)
            .field("visibility", &st.visibility)
            .field("placement", &st.label)
            .field("element", &st.element)
            .field("group", &st.group)
            .field("callbacks", &st.callbacks)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Shared<S> {
    fn show(&self) -> Result<bool, PopoverError> {
        if self.surface.anchor_box(&self.anchor).is_none() {
            if self.config.debug {
                error!(popover = %self.id, "cannot show: anchor is missing or detached");
            }
            return Err(PopoverError::MissingAnchor);
        }

        let epoch = {
            let mut st = self.state.borrow_mut();
            let visibility = st.visibility;
            match visibility {
                Visibility::Activating => return Ok(false),
                Visibility::Active => {
                    drop(st);
                    self.position(None)?;
                    return Ok(false);
                }
                _ => {}
            }
            st.visibility = Visibility::Activating;
            st.epoch += 1;
            st.epoch
        };

        let element = self.ensure_markup();
        if !self.is_current(Visibility::Activating, epoch) {
            return Ok(false);
        }

        let surface = &*self.surface;
        surface.remove_class(&element, classes::INACTIVE);
        surface.remove_class(&element, classes::DEACTIVATING);
        surface.commit(&element);
        surface.add_class(&element, classes::ACTIVATING);

        if let Err(err) = self.position(None) {
            if self.is_current(Visibility::Activating, epoch) {
                self.state.borrow_mut().visibility = Visibility::Hidden;
                surface.remove_class(&element, classes::ACTIVATING);
                surface.add_class(&element, classes::INACTIVE);
            }
            return Err(err);
        }

        let grouped = self.state.borrow().group.is_some();
        if grouped {
            let delivered = self.groups.notify(GroupEvent::BeforeShow, self.id);
            if self.config.debug {
                debug!(popover = %self.id, delivered, "broadcast beforeShow");
            }
        }

        {
            let mut st = self.state.borrow_mut();
            if st.visibility != Visibility::Activating || st.epoch != epoch {
                return Ok(false);
            }
            st.visibility = Visibility::Active;
        }
        surface.remove_class(&element, classes::ACTIVATING);
        surface.add_class(&element, classes::ACTIVE);
        if self.config.debug {
            debug!(popover = %self.id, "shown");
        }
        self.fire(Hook::AfterShow, &element);
        Ok(true)
    }

    fn hide(&self) -> bool {
        let (element, epoch) = {
            let mut st = self.state.borrow_mut();
            if st.visibility != Visibility::Active {
                return false;
            }
            let Some(element) = st.element.clone() else {
                return false;
            };
            st.visibility = Visibility::Deactivating;
            st.epoch += 1;
            (element, st.epoch)
        };

        let surface = &*self.surface;
        surface.remove_class(&element, classes::ACTIVE);
        surface.commit(&element);
        surface.add_class(&element, classes::DEACTIVATING);
        if self.config.debug {
            debug!(popover = %self.id, "hiding");
        }

        let me = self.me.clone();
        surface.await_transition(
            &element,
            TransitionDone::new(move || {
                if let Some(shared) = me.upgrade() {
                    shared.finish_hide(epoch);
                }
            }),
        );
        true
    }

    fn finish_hide(&self, epoch: u64) {
        let element = {
            let mut st = self.state.borrow_mut();
            if st.visibility != Visibility::Deactivating || st.epoch != epoch {
                if self.config.debug {
                    debug!(popover = %self.id, epoch, "ignoring stale transition completion");
                }
                return;
            }
            st.visibility = Visibility::Hidden;
            st.element.clone()
        };
        let Some(element) = element else {
            return;
        };

        self.surface.remove_class(&element, classes::DEACTIVATING);
        self.surface.add_class(&element, classes::INACTIVE);
        if self.config.debug {
            debug!(popover = %self.id, "hidden");
        }
        self.fire(Hook::AfterHide, &element);

        if self.config.disposable {
            let released = {
                let mut st = self.state.borrow_mut();
                if st.visibility == Visibility::Hidden && st.epoch == epoch {
                    st.visibility = Visibility::Disposed;
                    st.element.take()
                } else {
                    None
                }
            };
            if let Some(element) = released {
                self.surface.remove_popover(&element);
                if self.config.debug {
                    debug!(popover = %self.id, "disposed markup");
                }
            }
        }
    }

    fn destroy(&self) -> bool {
        let (element, group) = {
            let mut st = self.state.borrow_mut();
            st.epoch += 1;
            if st.visibility != Visibility::Disposed {
                st.visibility = Visibility::Hidden;
            }
            (st.element.take(), st.group.take())
        };
        let left = group.is_some() && self.groups.unregister(self.id);
        if let Some(element) = &element {
            self.surface.remove_popover(element);
        }
        let destroyed = element.is_some() || left;
        if destroyed && self.config.debug {
            debug!(popover = %self.id, "destroyed");
        }
        destroyed
    }

    fn position(&self, placement: Option<Placement>) -> Result<Resolution, PopoverError> {
        let (element, primary) = {
            let st = self.state.borrow();
            let element = st.element.clone().ok_or(PopoverError::NotCreated)?;
            (element, placement.unwrap_or(st.requested))
        };
        let Some(anchor) = self.surface.anchor_box(&self.anchor) else {
            if self.config.debug {
                error!(popover = %self.id, "cannot position: anchor is missing or detached");
            }
            return Err(PopoverError::MissingAnchor);
        };

        let request = PlacementRequest {
            anchor,
            popover: self.surface.popover_size(&element),
            offset: self.config.offset(),
            viewport: self.surface.viewport(),
        };
        let alternatives = &self.config.alternative_positions;
        let resolution = request.resolve(primary, alternatives);
        self.surface.set_offset(&element, resolution.offset);

        let label = match self.config.label_policy {
            LabelPolicy::KeepPrimary => resolution.placement,
            LabelPolicy::FollowApplied => resolution.applied,
        };
        let previous = {
            let mut st = self.state.borrow_mut();
            st.requested = primary;
            core::mem::replace(&mut st.label, label)
        };
        let current = label.classes();
        for class in previous.classes() {
            if !current.contains(&class) {
                self.surface.remove_class(&element, class);
            }
        }
        for class in current {
            self.surface.add_class(&element, class);
        }

        if self.config.debug {
            debug!(
                popover = %self.id,
                placement = %label,
                applied = %resolution.applied,
                x = resolution.offset.x,
                y = resolution.offset.y,
                "positioned"
            );
            if !resolution.fit_found && !alternatives.is_empty() {
                warn!(
                    popover = %self.id,
                    placement = %resolution.applied,
                    "no placement fits the viewport; using the last alternative"
                );
            }
        }
        Ok(resolution)
    }

    fn ensure_markup(&self) -> S::Handle {
        let element = {
            let mut st = self.state.borrow_mut();
            if let Some(element) = &st.element {
                return element.clone();
            }
            let mut list = vec![classes::POPOVER, classes::INACTIVE];
            list.extend(self.config.popover_classes());
            list.extend(st.label.classes());
            let element = self.surface.create_popover(&list, st.content.as_ref());
            st.element = Some(element.clone());
            element
        };
        if self.config.debug {
            debug!(popover = %self.id, element = ?element, "created markup");
        }
        self.fire(Hook::AfterCreate, &element);
        element
    }

    fn is_current(&self, visibility: Visibility, epoch: u64) -> bool {
        let st = self.state.borrow();
        st.visibility == visibility && st.epoch == epoch
    }

    fn fire(&self, hook: Hook, element: &S::Handle) {
        let callbacks = self.state.borrow().callbacks.snapshot(hook);
        for f in callbacks {
            f(&self.anchor, element);
        }
    }
}

impl<S: Surface> GroupMember for Shared<S> {
    fn group_event(&self, event: GroupEvent, origin: MemberId) {
        if self.config.debug {
            debug!(popover = %self.id, %origin, %event, "group event");
        }
        let callbacks = self.state.borrow().callbacks.group_snapshot(event);
        for f in callbacks {
            f(origin);
        }
    }
}

impl<S: Surface> Drop for Shared<S> {
    fn drop(&mut self) {
        if self.state.get_mut().group.is_some() {
            self.groups.unregister(self.id);
        }
    }
}

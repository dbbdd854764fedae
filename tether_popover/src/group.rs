// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group registry: named sets of popovers with coordinated visibility.
//!
//! ## Overview
//!
//! A [`Groups`] registry maps group names to members in registration order.
//! Popovers join at construction when their configuration names a group (or
//! forbids parallel use) and leave on `destroy()` or when dropped.
//!
//! [`Groups::notify`] delivers an event to every other member of the origin's
//! group, synchronously. Mutual exclusion is built on top of it: an exclusive
//! popover registers a `beforeShow` callback that hides itself.
//!
//! ## Process-wide registry
//!
//! [`Groups::global`] returns the registry shared by every popover on the current
//! thread. Construct popovers with an explicit registry via
//! [`Popover::with_groups`](crate::Popover::with_groups) to isolate them, and use
//! [`Groups::clear`] to reset between test cases.
//!
//! ## Reentrancy
//!
//! Members are held weakly. Broadcasting iterates over a snapshot taken before
//! the first delivery, so members may register, unregister, or be dropped from
//! inside a notification.

use core::cell::RefCell;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::callbacks::GroupEvent;

/// Identifier of a popover instance, unique within the process.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MemberId(u64);

impl MemberId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popover#{}", self.0)
    }
}

/// Receiver of group broadcasts.
///
/// Implemented by popover instances; implement it yourself to observe a group.
pub trait GroupMember {
    /// Handle `event`, caused by the member `origin`.
    fn group_event(&self, event: GroupEvent, origin: MemberId);
}

struct Entry {
    id: MemberId,
    member: Weak<dyn GroupMember>,
}

/// Registry of named groups.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct Groups {
    table: Rc<RefCell<BTreeMap<String, Vec<Entry>>>>,
}

thread_local! {
    static GLOBAL: Groups = Groups::new();
}

impl Groups {
    /// Create an empty, independent registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by all popovers on this thread.
    pub fn global() -> Self {
        GLOBAL.with(Clone::clone)
    }

    /// Whether two handles refer to the same registry.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }

    /// Append `member` to `group`.
    ///
    /// A member belongs to at most one group: any previous membership of `id`
    /// is dropped first, and registering twice in the same group keeps a single entry.
    pub fn register(&self, group: &str, id: MemberId, member: Weak<dyn GroupMember>) {
        let mut table = self.table.borrow_mut();
        for entries in table.values_mut() {
            entries.retain(|e| e.id != id);
        }
        table
            .entry(group.to_owned())
            .or_default()
            .push(Entry { id, member });
    }

    /// Remove `id` from its group. Returns whether it was a member.
    pub fn unregister(&self, id: MemberId) -> bool {
        let mut table = self.table.borrow_mut();
        let mut found = false;
        for entries in table.values_mut() {
            let before = entries.len();
            entries.retain(|e| e.id != id);
            found |= entries.len() != before;
        }
        found
    }

    /// The group `id` belongs to, if any.
    pub fn group_of(&self, id: MemberId) -> Option<String> {
        self.table
            .borrow()
            .iter()
            .find(|(_, entries)| entries.iter().any(|e| e.id == id))
            .map(|(name, _)| name.clone())
    }

    /// Member ids of `group`, in registration order.
    pub fn members(&self, group: &str) -> Vec<MemberId> {
        self.table
            .borrow()
            .get(group)
            .map(|entries| entries.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    /// Number of members in `group`.
    pub fn len(&self, group: &str) -> usize {
        self.table.borrow().get(group).map_or(0, Vec::len)
    }

    /// Names of all groups that currently have members.
    pub fn group_names(&self) -> Vec<String> {
        self.table
            .borrow()
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Drop every group and membership.
    pub fn clear(&self) {
        self.table.borrow_mut().clear();
    }

    /// Deliver `event` to every member of `origin`'s group except `origin`.
    ///
    /// Members are visited in registration order. Members that were dropped
    /// without leaving are skipped and pruned. Returns the number of members
    /// the event was delivered to; zero when `origin` is in no group.
    pub fn notify(&self, event: GroupEvent, origin: MemberId) -> usize {
        let recipients: Vec<Rc<dyn GroupMember>> = {
            let table = self.table.borrow();
            let Some(entries) = table
                .values()
                .find(|entries| entries.iter().any(|e| e.id == origin))
            else {
                return 0;
            };
            entries
                .iter()
                .filter(|e| e.id != origin)
                .filter_map(|e| e.member.upgrade())
                .collect()
        };

        for member in &recipients {
            member.group_event(event, origin);
        }
        let delivered = recipients.len();
        // Dropping the snapshot may release the last handle of a member, which
        // unregisters itself; do it before taking the table borrow again.
        drop(recipients);

        self.prune();
        delivered
    }

    fn prune(&self) {
        let mut table = self.table.borrow_mut();
        for entries in table.values_mut() {
            entries.retain(|e| e.member.strong_count() > 0);
        }
    }
}

impl fmt::Debug for Groups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        let mut map = f.debug_map();
        for (name, entries) in table.iter() {
            map.entry(name, &entries.iter().map(|e| e.id).collect::<Vec<_>>());
        }
        map.finish()
    }
}

// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Surface`]: a tiny document of anchors and popover elements.
//!
//! Useful for tests, demos, and for driving popover logic where no real
//! rendering layer exists. It records every class mutation and layout barrier
//! in a journal, so the order of visual state changes can be asserted.
//!
//! ## Transitions
//!
//! By default exit transitions complete immediately. Call
//! [`HeadlessSurface::set_animated`] to queue them instead, then release them
//! with [`HeadlessSurface::finish_transitions`].
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::{Rect, Size};
//! use tether_popover::headless::HeadlessSurface;
//! use tether_popover::{Popover, PopoverConfig};
//!
//! let surface = Rc::new(HeadlessSurface::new(Size::new(800.0, 600.0)));
//! let anchor = surface.add_anchor(Rect::new(200.0, 200.0, 300.0, 300.0));
//! let popover = Popover::new(surface.clone(), anchor, PopoverConfig::quiet());
//! popover.show().unwrap();
//! let element = popover.popover().unwrap();
//! assert!(surface.has_class(element, "active"));
//! ```

use core::cell::RefCell;
use core::fmt;
use std::collections::{BTreeMap, VecDeque};

use kurbo::{Point, Rect, Size};
use tether_placement::Viewport;

use crate::surface::{Surface, TransitionDone};

/// Identifier of an anchor in a [`HeadlessSurface`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AnchorId(u32);

/// Identifier of a popover element in a [`HeadlessSurface`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(u32);

/// One recorded mutation of a popover element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// The element was created with these classes.
    Created(ElementId, Vec<String>),
    /// A class was added (only recorded when it was absent).
    ClassAdded(ElementId, String),
    /// A class was removed (only recorded when it was present).
    ClassRemoved(ElementId, String),
    /// A layout barrier was requested.
    Commit(ElementId),
    /// The element was removed from the document.
    Removed(ElementId),
}

#[derive(Clone, Debug)]
struct Element {
    classes: Vec<String>,
    content: Option<String>,
    offset: Point,
    size: Size,
}

#[derive(Default)]
struct Document {
    next_id: u32,
    // `None` marks a detached anchor.
    anchors: BTreeMap<AnchorId, Option<Rect>>,
    elements: BTreeMap<ElementId, Element>,
    viewport: Viewport,
    popover_size: Size,
    animated: bool,
    pending: VecDeque<(ElementId, TransitionDone)>,
    journal: Vec<Mutation>,
}

impl Document {
    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory surface with string content.
pub struct HeadlessSurface {
    doc: RefCell<Document>,
}

impl HeadlessSurface {
    /// A document viewed through a viewport of `size`, scrolled to the origin.
    pub fn new(size: Size) -> Self {
        Self {
            doc: RefCell::new(Document {
                viewport: Viewport::new(size),
                ..Document::default()
            }),
        }
    }

    /// Add an anchor occupying `rect` (document coordinates).
    pub fn add_anchor(&self, rect: Rect) -> AnchorId {
        let mut doc = self.doc.borrow_mut();
        let id = AnchorId(doc.next());
        doc.anchors.insert(id, Some(rect));
        id
    }

    /// Add an anchor that is not part of the document and has no box.
    pub fn add_detached_anchor(&self) -> AnchorId {
        let mut doc = self.doc.borrow_mut();
        let id = AnchorId(doc.next());
        doc.anchors.insert(id, None);
        id
    }

    /// Move an anchor, or detach it with `None`.
    pub fn move_anchor(&self, anchor: AnchorId, rect: Option<Rect>) {
        self.doc.borrow_mut().anchors.insert(anchor, rect);
    }

    /// Replace the viewport.
    pub fn set_viewport(&self, viewport: Viewport) {
        self.doc.borrow_mut().viewport = viewport;
    }

    /// Size given to popover elements created from now on.
    pub fn set_popover_size(&self, size: Size) {
        self.doc.borrow_mut().popover_size = size;
    }

    /// Resize an existing popover element.
    pub fn resize(&self, element: ElementId, size: Size) {
        if let Some(e) = self.doc.borrow_mut().elements.get_mut(&element) {
            e.size = size;
        }
    }

    /// Queue exit transitions instead of completing them immediately.
    pub fn set_animated(&self, animated: bool) {
        self.doc.borrow_mut().animated = animated;
    }

    /// Number of queued transition completions.
    pub fn pending_transitions(&self) -> usize {
        self.doc.borrow().pending.len()
    }

    /// Complete every queued transition in order. Returns how many completed.
    ///
    /// Completions queued while finishing are completed too.
    pub fn finish_transitions(&self) -> usize {
        let mut n = 0;
        loop {
            // Release the document before running popover code.
            let next = self.doc.borrow_mut().pending.pop_front();
            let Some((_, done)) = next else {
                return n;
            };
            done.complete();
            n += 1;
        }
    }

    /// Number of popover elements in the document.
    pub fn popover_count(&self) -> usize {
        self.doc.borrow().elements.len()
    }

    /// Whether the element is in the document.
    pub fn contains(&self, element: ElementId) -> bool {
        self.doc.borrow().elements.contains_key(&element)
    }

    /// Classes of an element, in insertion order; empty if absent.
    pub fn classes(&self, element: ElementId) -> Vec<String> {
        self.doc
            .borrow()
            .elements
            .get(&element)
            .map(|e| e.classes.clone())
            .unwrap_or_default()
    }

    /// Whether an element carries `class`.
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.doc
            .borrow()
            .elements
            .get(&element)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Content of an element.
    pub fn content(&self, element: ElementId) -> Option<String> {
        self.doc
            .borrow()
            .elements
            .get(&element)
            .and_then(|e| e.content.clone())
    }

    /// Document offset of an element.
    pub fn offset(&self, element: ElementId) -> Option<Point> {
        self.doc.borrow().elements.get(&element).map(|e| e.offset)
    }

    /// Take the recorded mutations, leaving the journal empty.
    pub fn take_journal(&self) -> Vec<Mutation> {
        core::mem::take(&mut self.doc.borrow_mut().journal)
    }
}

impl fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.doc.borrow();
        f.debug_struct("HeadlessSurface")
            .field("viewport", &doc.viewport)
            .field("anchors", &doc.anchors.len())
            .field("elements", &doc.elements)
            .field("pending", &doc.pending.len())
            .finish_non_exhaustive()
    }
}

impl Surface for HeadlessSurface {
    type Anchor = AnchorId;
    type Handle = ElementId;
    type Content = String;

    fn anchor_box(&self, anchor: &AnchorId) -> Option<Rect> {
        self.doc.borrow().anchors.get(anchor).copied().flatten()
    }

    fn viewport(&self) -> Viewport {
        self.doc.borrow().viewport
    }

    fn create_popover(&self, classes: &[&str], content: Option<&String>) -> ElementId {
        let mut doc = self.doc.borrow_mut();
        let id = ElementId(doc.next());
        let mut list: Vec<String> = Vec::with_capacity(classes.len());
        for &c in classes {
            if !list.iter().any(|x| x == c) {
                list.push(c.to_owned());
            }
        }
        doc.journal.push(Mutation::Created(id, list.clone()));
        let size = doc.popover_size;
        doc.elements.insert(
            id,
            Element {
                classes: list,
                content: content.cloned(),
                offset: Point::ZERO,
                size,
            },
        );
        id
    }

    fn remove_popover(&self, popover: &ElementId) {
        let mut doc = self.doc.borrow_mut();
        if doc.elements.remove(popover).is_some() {
            doc.journal.push(Mutation::Removed(*popover));
        }
    }

    fn set_content(&self, popover: &ElementId, content: &String) {
        if let Some(e) = self.doc.borrow_mut().elements.get_mut(popover) {
            e.content = Some(content.clone());
        }
    }

    fn add_class(&self, popover: &ElementId, class: &str) {
        let mut doc = self.doc.borrow_mut();
        let Some(e) = doc.elements.get_mut(popover) else {
            return;
        };
        if e.classes.iter().any(|c| c == class) {
            return;
        }
        e.classes.push(class.to_owned());
        doc.journal
            .push(Mutation::ClassAdded(*popover, class.to_owned()));
    }

    fn remove_class(&self, popover: &ElementId, class: &str) {
        let mut doc = self.doc.borrow_mut();
        let Some(e) = doc.elements.get_mut(popover) else {
            return;
        };
        let before = e.classes.len();
        e.classes.retain(|c| c != class);
        if e.classes.len() != before {
            doc.journal
                .push(Mutation::ClassRemoved(*popover, class.to_owned()));
        }
    }

    fn popover_size(&self, popover: &ElementId) -> Size {
        self.doc
            .borrow()
            .elements
            .get(popover)
            .map_or(Size::ZERO, |e| e.size)
    }

    fn set_offset(&self, popover: &ElementId, offset: Point) {
        if let Some(e) = self.doc.borrow_mut().elements.get_mut(popover) {
            e.offset = offset;
        }
    }

    fn commit(&self, popover: &ElementId) {
        self.doc.borrow_mut().journal.push(Mutation::Commit(*popover));
    }

    fn await_transition(&self, popover: &ElementId, done: TransitionDone) {
        let mut doc = self.doc.borrow_mut();
        if doc.animated {
            doc.pending.push_back((*popover, done));
            return;
        }
        drop(doc);
        done.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn class_mutations_are_deduplicated_and_journaled() {
        let s = HeadlessSurface::new(Size::new(100.0, 100.0));
        let e = s.create_popover(&["a", "b", "a"], None);
        assert_eq!(s.classes(e), vec!["a", "b"]);
        s.add_class(&e, "b");
        s.add_class(&e, "c");
        s.remove_class(&e, "zzz");
        s.remove_class(&e, "a");
        s.commit(&e);
        assert_eq!(
            s.take_journal(),
            vec![
                Mutation::Created(e, vec!["a".into(), "b".into()]),
                Mutation::ClassAdded(e, "c".into()),
                Mutation::ClassRemoved(e, "a".into()),
                Mutation::Commit(e),
            ]
        );
        assert!(s.take_journal().is_empty());
    }

    #[test]
    fn anchors_can_move_and_detach() {
        let s = HeadlessSurface::new(Size::new(100.0, 100.0));
        let a = s.add_anchor(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(s.anchor_box(&a), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
        s.move_anchor(a, None);
        assert_eq!(s.anchor_box(&a), None);
        assert_eq!(s.anchor_box(&s.add_detached_anchor()), None);
    }

    #[test]
    fn animated_transitions_wait_for_finish() {
        let s = HeadlessSurface::new(Size::new(100.0, 100.0));
        let e = s.create_popover(&[], None);
        let fired = Rc::new(Cell::new(0));

        let f = fired.clone();
        s.await_transition(&e, TransitionDone::new(move || f.set(f.get() + 1)));
        assert_eq!(fired.get(), 1);

        s.set_animated(true);
        let f = fired.clone();
        s.await_transition(&e, TransitionDone::new(move || f.set(f.get() + 1)));
        assert_eq!(fired.get(), 1);
        assert_eq!(s.pending_transitions(), 1);
        assert_eq!(s.finish_transitions(), 1);
        assert_eq!(fired.get(), 2);
        assert_eq!(s.pending_transitions(), 0);
    }

    #[test]
    fn removed_elements_ignore_further_mutations() {
        let s = HeadlessSurface::new(Size::new(100.0, 100.0));
        s.set_popover_size(Size::new(5.0, 6.0));
        let e = s.create_popover(&["x"], Some(&"hi".to_owned()));
        assert_eq!(s.popover_size(&e), Size::new(5.0, 6.0));
        assert_eq!(s.content(e).as_deref(), Some("hi"));
        s.remove_popover(&e);
        s.add_class(&e, "y");
        assert!(!s.contains(e));
        assert_eq!(s.popover_count(), 0);
        assert!(s.classes(e).is_empty());
        assert_eq!(s.popover_size(&e), Size::ZERO);
    }
}

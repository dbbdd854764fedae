// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport fit checks.

use kurbo::{Rect, Size, Vec2};

use crate::types::Overflow;

/// Whether `rect`, in viewport (client) coordinates, lies entirely inside a
/// viewport of `size` whose top-left corner is the origin.
///
/// Edges may touch the viewport boundary; any edge outside fails.
pub fn fits_in_viewport(rect: Rect, size: Size) -> bool {
    overflow_of(rect, size).is_empty()
}

fn overflow_of(rect: Rect, size: Size) -> Overflow {
    let mut out = Overflow::empty();
    if rect.y0 < 0.0 {
        out |= Overflow::TOP;
    }
    if rect.x0 < 0.0 {
        out |= Overflow::LEFT;
    }
    if rect.y1 > size.height {
        out |= Overflow::BOTTOM;
    }
    if rect.x1 > size.width {
        out |= Overflow::RIGHT;
    }
    out
}

/// The visible part of the document.
///
/// `scroll` is the document position of the viewport's top-left corner and
/// `size` its extent. Popover boxes are document-relative; they are converted
/// with [`Viewport::to_client`] before the fit check.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Document offset of the viewport's top-left corner.
    pub scroll: Vec2,
    /// Width and height of the viewport.
    pub size: Size,
}

impl Viewport {
    /// A viewport of `size` scrolled to the document origin.
    pub const fn new(size: Size) -> Self {
        Self {
            scroll: Vec2::ZERO,
            size,
        }
    }

    /// Return a copy scrolled to `scroll`.
    pub const fn with_scroll(self, scroll: Vec2) -> Self {
        Self {
            scroll,
            size: self.size,
        }
    }

    /// Convert a document rectangle to viewport (client) coordinates.
    pub fn to_client(&self, rect: Rect) -> Rect {
        rect - self.scroll
    }

    /// Edges of a document rectangle that fall outside this viewport.
    pub fn overflow(&self, rect: Rect) -> Overflow {
        overflow_of(self.to_client(rect), self.size)
    }

    /// Whether a document rectangle is entirely visible.
    pub fn contains(&self, rect: Rect) -> bool {
        fits_in_viewport(self.to_client(rect), self.size)
    }
}

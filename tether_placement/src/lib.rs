// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Placement: place a popover box around an anchor box.
//!
//! Tether Placement is the geometric half of an anchored popover.
//!
//! - Names the nine compass-style [`Placement`]s (`"right bottom"`, `"center top"`, …).
//! - Computes the document offset of a popover for a placement with [`compute_offset`].
//! - Tests whether a box is fully visible with [`fits_in_viewport`] / [`Viewport::contains`].
//! - Resolves a primary placement with ordered fallbacks via [`PlacementRequest::resolve`].
//!
//! It performs no DOM or window-system access. Callers measure the anchor and the
//! popover, describe the viewport, and apply the returned offset themselves.
//!
//! ## Not a layout engine
//!
//! Only axis-aligned rectangles and nine discrete relative placements are supported.
//! There is no scroll following, no flipping heuristics beyond the explicit fallback list,
//! and no arbitrary shapes.
//!
//! ## Coordinates
//!
//! Anchor and popover boxes are document-relative. A [`Viewport`] carries its document
//! scroll offset so the fit check can work in viewport (client) coordinates.
//! Center alignment rounds half-extents half-up per axis.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use tether_placement::{Placement, PlacementRequest, Viewport};
//!
//! let request = PlacementRequest {
//!     anchor: Rect::new(200.0, 200.0, 300.0, 300.0),
//!     popover: Size::new(50.0, 50.0),
//!     offset: Vec2::new(10.0, 10.0),
//!     viewport: Viewport::new(Size::new(1024.0, 768.0)),
//! };
//!
//! let r = request.resolve(Placement::RIGHT_CENTER, &[Placement::CENTER_BOTTOM]);
//! assert!(r.fit_found);
//! assert_eq!(r.offset, Point::new(310.0, 225.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

pub mod geometry;
pub mod resolve;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod types;
pub mod viewport;

pub use geometry::{anchor_box, compute_offset, popover_rect, round_half_up};
pub use resolve::{PlacementRequest, Resolution};
pub use types::{Horizontal, Overflow, ParsePlacementError, Placement, Vertical};
pub use viewport::{Viewport, fits_in_viewport};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size, Vec2};

    // Every placement around a centered anchor fits a roomy viewport, and no
    // fallback is consulted.
    #[test]
    fn every_placement_fits_around_centered_anchor() {
        let request = PlacementRequest {
            anchor: Rect::new(400.0, 300.0, 500.0, 400.0),
            popover: Size::new(80.0, 40.0),
            offset: Vec2::new(10.0, 10.0),
            viewport: Viewport::new(Size::new(900.0, 700.0)),
        };
        for p in Placement::ALL {
            let r = request.resolve(p, &[Placement::CENTER_BOTTOM]);
            assert!(r.fit_found, "{p} should fit");
            assert_eq!(r.applied, p);
        }
    }

    // Anchor in the top-left corner: only placements to the right and below fit.
    #[test]
    fn corner_anchor_falls_back_towards_open_space() {
        let request = PlacementRequest {
            anchor: Rect::new(0.0, 0.0, 40.0, 20.0),
            popover: Size::new(100.0, 50.0),
            offset: Vec2::new(10.0, 10.0),
            viewport: Viewport::new(Size::new(800.0, 600.0)),
        };
        let alts = [
            "center top".parse().unwrap(),
            "right bottom".parse().unwrap(),
        ];
        let r = request.resolve("left top".parse().unwrap(), &alts);
        assert!(r.fit_found);
        assert_eq!(r.applied, alts[1]);
        assert_eq!(r.offset, kurbo::Point::new(50.0, 30.0));
    }
}

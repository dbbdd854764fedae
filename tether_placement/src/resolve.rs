// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement resolution with ordered fallbacks.
//!
//! ## Algorithm
//!
//! 1) Compute the offset for the primary placement. If the popover fits the
//!    viewport there, or no alternatives are configured, that is the result.
//! 2) Otherwise try each alternative in order and stop at the first one that fits.
//! 3) If none fits, the last alternative's offset is returned with
//!    [`Resolution::fit_found`] cleared. Callers are expected to report it, not fail.
//!
//! ## Labels
//!
//! [`Resolution::placement`] is always the primary placement, even when an
//! alternative's offset was applied. [`Resolution::applied`] names the
//! placement whose offset was actually returned, for callers that want the
//! label to follow the geometry.

use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry::{compute_offset, popover_rect};
use crate::types::Placement;
use crate::viewport::Viewport;

/// Inputs of one positioning pass, captured once and reused for every attempt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Document box of the anchor (outer size, no margin).
    pub anchor: Rect,
    /// Outer size of the popover.
    pub popover: Size,
    /// Gap between anchor and popover on each axis.
    pub offset: Vec2,
    /// The visible part of the document.
    pub viewport: Viewport,
}

/// Outcome of [`PlacementRequest::resolve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The label to report: always the requested primary placement.
    pub placement: Placement,
    /// The placement whose offset was returned.
    pub applied: Placement,
    /// Document offset (top-left corner) for the popover.
    pub offset: Point,
    /// Whether the returned offset keeps the popover inside the viewport.
    pub fit_found: bool,
}

impl Resolution {
    /// Whether an alternative's offset was applied instead of the primary's.
    pub fn used_alternative(&self) -> bool {
        self.applied != self.placement
    }
}

impl PlacementRequest {
    /// Offset and fit of a single placement.
    pub fn attempt(&self, placement: Placement) -> (Point, bool) {
        let offset = compute_offset(self.anchor, self.popover, placement, self.offset);
        let fits = self
            .viewport
            .contains(popover_rect(offset, self.popover));
        (offset, fits)
    }

    /// Resolve `primary`, falling back through `alternatives` in order.
    ///
    /// ```
    /// use kurbo::{Rect, Size, Vec2};
    /// use tether_placement::{Placement, PlacementRequest, Viewport};
    ///
    /// // Anchor hugging the right edge of an 800×600 viewport.
    /// let request = PlacementRequest {
    ///     anchor: Rect::new(700.0, 100.0, 790.0, 130.0),
    ///     popover: Size::new(120.0, 40.0),
    ///     offset: Vec2::new(10.0, 10.0),
    ///     viewport: Viewport::new(Size::new(800.0, 600.0)),
    /// };
    /// let left: Placement = "left center".parse().unwrap();
    /// let r = request.resolve(Placement::RIGHT_CENTER, &[left]);
    /// assert!(r.fit_found);
    /// assert_eq!(r.applied, left);
    /// assert_eq!(r.placement, Placement::RIGHT_CENTER);
    /// ```
    pub fn resolve(&self, primary: Placement, alternatives: &[Placement]) -> Resolution {
        let (offset, fits) = self.attempt(primary);
        if fits || alternatives.is_empty() {
            return Resolution {
                placement: primary,
                applied: primary,
                offset,
                fit_found: fits,
            };
        }

        let mut last = (primary, offset);
        for &alternative in alternatives {
            let (offset, fits) = self.attempt(alternative);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                placement = %alternative,
                x = offset.x,
                y = offset.y,
                fits,
                "trying alternative placement"
            );
            if fits {
                return Resolution {
                    placement: primary,
                    applied: alternative,
                    offset,
                    fit_found: true,
                };
            }
            last = (alternative, offset);
        }

        Resolution {
            placement: primary,
            applied: last.0,
            offset: last.1,
            fit_found: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(label: &str) -> Placement {
        label.parse().unwrap()
    }

    // 100×100 anchor at (200, 200), 50×50 popover, in a viewport of `w`×`h`.
    fn request(w: f64, h: f64) -> PlacementRequest {
        PlacementRequest {
            anchor: Rect::new(200.0, 200.0, 300.0, 300.0),
            popover: Size::new(50.0, 50.0),
            offset: Vec2::new(10.0, 10.0),
            viewport: Viewport::new(Size::new(w, h)),
        }
    }

    #[test]
    fn primary_that_fits_wins() {
        let r = request(1000.0, 1000.0).resolve(p("right center"), &[p("left center")]);
        assert_eq!(r.placement, p("right center"));
        assert_eq!(r.applied, p("right center"));
        assert_eq!(r.offset, Point::new(310.0, 225.0));
        assert!(r.fit_found);
        assert!(!r.used_alternative());
    }

    #[test]
    fn primary_without_alternatives_is_returned_even_if_off_screen() {
        // Right edge of "right center" is at 360; viewport is 340 wide.
        let r = request(340.0, 1000.0).resolve(p("right center"), &[]);
        assert_eq!(r.applied, p("right center"));
        assert_eq!(r.offset, Point::new(310.0, 225.0));
        assert!(!r.fit_found);
    }

    // The retained label stays on the primary while the alternative's geometry is applied.
    #[test]
    fn fitting_alternative_offset_with_primary_label() {
        let r = request(340.0, 1000.0).resolve(p("right center"), &[p("left center")]);
        assert_eq!(r.placement, p("right center"));
        assert_eq!(r.applied, p("left center"));
        assert_eq!(r.offset, Point::new(140.0, 225.0));
        assert!(r.fit_found);
        assert!(r.used_alternative());
    }

    #[test]
    fn first_fitting_alternative_in_order() {
        // "right bottom" overflows on the right; "center bottom" and "left bottom"
        // both fit, and the earlier one in the list wins.
        let r = request(340.0, 400.0).resolve(
            p("right center"),
            &[p("right bottom"), p("center bottom"), p("left bottom")],
        );
        assert_eq!(r.applied, p("center bottom"));
        assert_eq!(r.offset, Point::new(225.0, 310.0));
    }

    #[test]
    fn exhausted_alternatives_return_last_attempt() {
        // Tiny viewport: nothing fits.
        let r = request(100.0, 100.0).resolve(
            p("right center"),
            &[p("left center"), p("center bottom")],
        );
        assert!(!r.fit_found);
        assert_eq!(r.placement, p("right center"));
        assert_eq!(r.applied, p("center bottom"));
        assert_eq!(r.offset, Point::new(225.0, 310.0));
    }

    #[test]
    fn scrolled_viewport_changes_outcome() {
        let mut req = request(1000.0, 300.0);
        // Unscrolled: "center bottom" spans y 310..360, outside a 300px viewport.
        assert!(!req.attempt(p("center bottom")).1);
        req.viewport = req.viewport.with_scroll(Vec2::new(0.0, 100.0));
        assert!(req.attempt(p("center bottom")).1);
    }

    #[test]
    fn resolution_is_a_pure_function_of_inputs() {
        let req = request(340.0, 1000.0);
        let alts = [p("left center")];
        assert_eq!(
            req.resolve(p("right center"), &alts),
            req.resolve(p("right center"), &alts)
        );
    }
}

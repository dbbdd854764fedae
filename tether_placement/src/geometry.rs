// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure geometry: anchor boxes and popover offsets for a placement.
//!
//! All coordinates are document-relative pixels. Center alignment rounds each
//! half-extent half-up, independently per axis, so results are whole pixels
//! whenever the inputs are.

use kurbo::{Point, Rect, Size, Vec2};

use crate::types::{Horizontal, Placement, Vertical};

/// Round to the nearest integer, with halves rounded towards positive infinity.
///
/// `2.5` rounds to `3` and `-2.5` rounds to `-2`. Only meaningful for values
/// within `i64` range, which covers any pixel coordinate.
pub fn round_half_up(v: f64) -> f64 {
    let t = v + 0.5;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Pixel coordinates are far inside i64 range."
    )]
    let truncated = t as i64 as f64;
    // Truncation rounds towards zero; step down for negative non-integers.
    if truncated > t {
        truncated - 1.0
    } else {
        truncated
    }
}

/// Build an anchor box from its document offset and outer size.
///
/// The outer size includes border and padding but excludes margin.
pub fn anchor_box(origin: Point, outer_size: Size) -> Rect {
    Rect::from_origin_size(origin, outer_size)
}

/// Compute the document offset (top-left corner) of a popover of `popover`
/// size placed around `anchor` at `placement`, kept `offset` pixels away.
///
/// `offset.x` separates the boxes for `left`/`right` placements and
/// `offset.y` for `top`/`bottom` placements; centered axes ignore it.
///
/// ```
/// use kurbo::{Point, Rect, Size, Vec2};
/// use tether_placement::{compute_offset, Placement};
///
/// let anchor = Rect::new(200.0, 200.0, 300.0, 300.0);
/// let popover = Size::new(50.0, 50.0);
/// let at = compute_offset(anchor, popover, "right top".parse().unwrap(), Vec2::new(10.0, 10.0));
/// assert_eq!(at, Point::new(310.0, 140.0));
/// ```
pub fn compute_offset(anchor: Rect, popover: Size, placement: Placement, offset: Vec2) -> Point {
    let x = match placement.horizontal {
        Horizontal::Left => anchor.x0 - popover.width - offset.x,
        Horizontal::Center => {
            anchor.x0 + round_half_up((anchor.x1 - anchor.x0) / 2.0)
                - round_half_up(popover.width / 2.0)
        }
        Horizontal::Right => anchor.x1 + offset.x,
    };
    let y = match placement.vertical {
        Vertical::Top => anchor.y0 - offset.y - popover.height,
        Vertical::Center => {
            anchor.y0 + round_half_up((anchor.y1 - anchor.y0) / 2.0)
                - round_half_up(popover.height / 2.0)
        }
        Vertical::Bottom => anchor.y1 + offset.y,
    };
    Point::new(x, y)
}

/// The document rectangle covered by a popover of `size` placed at `offset`.
pub fn popover_rect(offset: Point, size: Size) -> Rect {
    Rect::from_origin_size(offset, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Rect = Rect::new(200.0, 200.0, 300.0, 300.0);
    const POPOVER: Size = Size::new(50.0, 50.0);
    const GAP: Vec2 = Vec2::new(10.0, 10.0);

    fn at(label: &str) -> (f64, f64) {
        let p = compute_offset(ANCHOR, POPOVER, label.parse().unwrap(), GAP);
        (p.x, p.y)
    }

    // Reference fixture: 100×100 anchor at (200, 200), 50×50 popover, 10px gaps.
    #[test]
    fn nine_placements_match_reference_fixture() {
        assert_eq!(at("right top"), (310.0, 140.0));
        assert_eq!(at("right center"), (310.0, 225.0));
        assert_eq!(at("right bottom"), (310.0, 310.0));
        assert_eq!(at("center top"), (225.0, 140.0));
        assert_eq!(at("center center"), (225.0, 225.0));
        assert_eq!(at("center bottom"), (225.0, 310.0));
        assert_eq!(at("left top"), (140.0, 140.0));
        assert_eq!(at("left center"), (140.0, 225.0));
        assert_eq!(at("left bottom"), (140.0, 310.0));
    }

    #[test]
    fn zero_sized_popover_hugs_anchor_edges() {
        let gap = |label: &str| {
            let p = compute_offset(ANCHOR, Size::ZERO, label.parse().unwrap(), GAP);
            (p.x, p.y)
        };
        assert_eq!(gap("right bottom"), (310.0, 310.0));
        assert_eq!(gap("center center"), (250.0, 250.0));
        assert_eq!(gap("left top"), (190.0, 190.0));
    }

    #[test]
    fn center_rounds_each_half_independently() {
        // Anchor width 101 → half 50.5 → 51; popover width 21 → half 10.5 → 11.
        let anchor = Rect::new(0.0, 0.0, 101.0, 101.0);
        let p = compute_offset(
            anchor,
            Size::new(21.0, 21.0),
            Placement::new(Horizontal::Center, Vertical::Center),
            GAP,
        );
        assert_eq!(p, Point::new(40.0, 40.0));
    }

    #[test]
    fn round_half_up_matches_script_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(-0.2), 0.0);
        assert_eq!(round_half_up(7.0), 7.0);
    }

    #[test]
    fn anchor_box_uses_outer_size() {
        let r = anchor_box(Point::new(5.0, 7.0), Size::new(20.0, 10.0));
        assert_eq!(r, Rect::new(5.0, 7.0, 25.0, 17.0));
        assert_eq!(
            popover_rect(Point::new(1.0, 2.0), Size::new(3.0, 4.0)),
            Rect::new(1.0, 2.0, 4.0, 6.0)
        );
    }
}

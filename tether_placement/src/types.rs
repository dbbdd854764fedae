// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement labels: horizontal and vertical alignment, their textual form, and overflow flags.

use core::fmt;
use core::str::FromStr;

/// Horizontal alignment of the popover relative to its anchor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Horizontal {
    /// Popover sits to the left of the anchor.
    Left,
    /// Popover is horizontally centered on the anchor.
    Center,
    /// Popover sits to the right of the anchor.
    Right,
}

/// Vertical alignment of the popover relative to its anchor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Vertical {
    /// Popover sits above the anchor.
    Top,
    /// Popover is vertically centered on the anchor.
    Center,
    /// Popover sits below the anchor.
    Bottom,
}

impl Horizontal {
    /// The lowercase token used in placement labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// The style class marking this alignment, e.g. `horizontal-left`.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Left => "horizontal-left",
            Self::Center => "horizontal-center",
            Self::Right => "horizontal-right",
        }
    }
}

impl Vertical {
    /// The lowercase token used in placement labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    /// The style class marking this alignment, e.g. `vertical-top`.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Top => "vertical-top",
            Self::Center => "vertical-center",
            Self::Bottom => "vertical-bottom",
        }
    }
}

/// One of the nine compass-style placements of a popover around its anchor.
///
/// The textual form is two lowercase tokens, horizontal first: `"right bottom"`.
///
/// ```
/// use tether_placement::{Horizontal, Placement, Vertical};
///
/// let p: Placement = "left center".parse().unwrap();
/// assert_eq!(p, Placement::new(Horizontal::Left, Vertical::Center));
/// assert_eq!(p.to_string(), "left center");
/// assert_eq!(p.classes(), ["horizontal-left", "vertical-center"]);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Placement {
    /// Horizontal alignment.
    pub horizontal: Horizontal,
    /// Vertical alignment.
    pub vertical: Vertical,
}

impl Placement {
    /// `"right center"`, the conventional primary placement.
    pub const RIGHT_CENTER: Self = Self::new(Horizontal::Right, Vertical::Center);

    /// `"center bottom"`, the conventional fallback placement.
    pub const CENTER_BOTTOM: Self = Self::new(Horizontal::Center, Vertical::Bottom);

    /// All nine placements, row by row from top to bottom.
    pub const ALL: [Self; 9] = [
        Self::new(Horizontal::Left, Vertical::Top),
        Self::new(Horizontal::Center, Vertical::Top),
        Self::new(Horizontal::Right, Vertical::Top),
        Self::new(Horizontal::Left, Vertical::Center),
        Self::new(Horizontal::Center, Vertical::Center),
        Self::new(Horizontal::Right, Vertical::Center),
        Self::new(Horizontal::Left, Vertical::Bottom),
        Self::new(Horizontal::Center, Vertical::Bottom),
        Self::new(Horizontal::Right, Vertical::Bottom),
    ];

    /// Create a placement from its two alignments.
    pub const fn new(horizontal: Horizontal, vertical: Vertical) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The two style classes describing this placement, horizontal first.
    pub const fn classes(self) -> [&'static str; 2] {
        [self.horizontal.class(), self.vertical.class()]
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::RIGHT_CENTER
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.horizontal.as_str(), self.vertical.as_str())
    }
}

/// Error returned when a placement label cannot be parsed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParsePlacementError {
    /// The label did not consist of exactly two tokens.
    #[error("placement label must be \"<left|center|right> <top|center|bottom>\"")]
    TokenCount,
    /// The first token is not `left`, `center` or `right`.
    #[error("unknown horizontal placement token")]
    Horizontal,
    /// The second token is not `top`, `center` or `bottom`.
    #[error("unknown vertical placement token")]
    Vertical,
}

impl FromStr for Horizontal {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(ParsePlacementError::Horizontal),
        }
    }
}

impl FromStr for Vertical {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ParsePlacementError::Vertical),
        }
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_ascii_whitespace();
        let (Some(h), Some(v), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ParsePlacementError::TokenCount);
        };
        Ok(Self::new(h.parse()?, v.parse()?))
    }
}

bitflags::bitflags! {
    /// Edges of a rectangle that fall outside the viewport.
    ///
    /// Empty means the rectangle fits; see [`Viewport::overflow`](crate::Viewport::overflow).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Overflow: u8 {
        /// Top edge is above the viewport.
        const TOP    = 0b0000_0001;
        /// Left edge is left of the viewport.
        const LEFT   = 0b0000_0010;
        /// Bottom edge is below the viewport.
        const BOTTOM = 0b0000_0100;
        /// Right edge is right of the viewport.
        const RIGHT  = 0b0000_1000;
    }
}

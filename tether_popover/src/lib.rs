// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Popover: anchored popovers with a show/hide lifecycle and exclusive groups.
//!
//! A [`Popover`] is attached to an anchor on a [`Surface`], the rendering layer
//! that owns markup, style classes, measurement and transitions. The popover
//! creates its markup lazily, positions it next to the anchor using
//! [`tether_placement`] (falling back through alternative placements when the
//! primary one leaves the viewport), and walks a visibility state machine whose
//! states are mirrored as style classes so that a stylesheet can animate them.
//!
//! - [`config`]: [`PopoverConfig`], profiles and options.
//! - [`surface`]: the [`Surface`] trait and the class names it receives.
//! - [`group`]: the [`Groups`] registry and `beforeShow` broadcasts.
//! - [`trigger`]: mapping pointer input to show/hide.
//! - [`headless`]: an in-memory surface.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::{Rect, Size};
//! use tether_popover::headless::HeadlessSurface;
//! use tether_popover::{Groups, Hook, Popover, PopoverConfig, Visibility};
//!
//! let surface = Rc::new(HeadlessSurface::new(Size::new(800.0, 600.0)));
//! surface.set_popover_size(Size::new(50.0, 50.0));
//! let anchor = surface.add_anchor(Rect::new(200.0, 200.0, 300.0, 300.0));
//!
//! let groups = Groups::new();
//! let config = PopoverConfig::quiet().with_parallel_use(false);
//! let first = Popover::with_groups(surface.clone(), anchor, config.clone(), groups.clone());
//! let second = Popover::with_groups(surface.clone(), anchor, config, groups);
//! first.add_callback(Hook::AfterShow, |_, element| println!("showing {element:?}"));
//!
//! first.show().unwrap();
//! second.show().unwrap();
//! // Showing the second popover hid the first.
//! assert_eq!(first.state(), Visibility::Hidden);
//! assert!(second.is_active());
//! ```
//!
//! ## Diagnostics
//!
//! Lifecycle steps and positioning are reported with `tracing` at debug level,
//! unusable configurations as warnings, missing anchors as errors. All of it is
//! switched off per instance with [`PopoverConfig::debug`].

mod callbacks;
pub mod config;
mod error;
pub mod group;
pub mod headless;
mod popover;
pub mod surface;
pub mod trigger;

pub use callbacks::{GroupEvent, Hook};
pub use config::{LabelPolicy, PopoverConfig};
pub use error::PopoverError;
pub use group::{GroupMember, Groups, MemberId};
pub use popover::{Popover, Visibility};
pub use surface::{Surface, TransitionDone};
pub use tether_placement::{Placement, Resolution};
pub use trigger::{PointerInput, TriggerMode};

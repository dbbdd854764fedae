// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement fallback near the viewport edge.
//!
//! An anchor hugging the right edge cannot host a "right center" popover, so
//! the first alternative that fits is applied. The label kept afterwards
//! depends on the label policy.
//!
//! Run:
//! - `cargo run -p tether_demos --example placement_fallback`

use std::rc::Rc;

use kurbo::{Rect, Size};
use tether_popover::headless::HeadlessSurface;
use tether_popover::{Groups, LabelPolicy, Placement, Popover, PopoverConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let surface = Rc::new(HeadlessSurface::new(Size::new(800.0, 600.0)));
    surface.set_popover_size(Size::new(120.0, 40.0));
    let anchor = surface.add_anchor(Rect::new(700.0, 100.0, 790.0, 130.0));

    let alternatives: Vec<Placement> = ["left center", "center bottom"]
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    for policy in [LabelPolicy::KeepPrimary, LabelPolicy::FollowApplied] {
        let config = PopoverConfig::default()
            .with_alternatives(alternatives.iter().copied())
            .with_label_policy(policy);
        let popover = Popover::with_groups(surface.clone(), anchor, config, Groups::new());
        if let Err(err) = popover.show() {
            eprintln!("show failed: {err}");
            return;
        }
        let Some(element) = popover.popover() else {
            return;
        };
        println!("== {policy:?} ==");
        println!("  label:   {}", popover.placement());
        println!("  offset:  {:?}", surface.offset(element));
        println!("  classes: {:?}", surface.classes(element));
        popover.destroy();
    }

    // Nothing fits a viewport smaller than the popover: shown at the last
    // alternative, with a warning.
    surface.set_viewport(tether_placement::Viewport::new(Size::new(100.0, 100.0)));
    let popover = Popover::with_groups(
        surface.clone(),
        anchor,
        PopoverConfig::legacy(),
        Groups::new(),
    );
    if let Ok(true) = popover.show() {
        println!("== cramped ==\n  offset: {:?}", popover.popover().and_then(|e| surface.offset(e)));
    }
}

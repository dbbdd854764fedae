// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-driven transitions and disposal.
//!
//! The headless surface queues exit transitions when animated, the way a
//! browser would wait for `transitionend`. Showing again before the queued
//! completion arrives cancels the hide.
//!
//! Run:
//! - `cargo run -p tether_demos --example transitions`

use std::rc::Rc;

use kurbo::{Rect, Size};
use tether_popover::headless::{HeadlessSurface, Mutation};
use tether_popover::{Groups, Popover, PopoverConfig};

fn print_journal(surface: &HeadlessSurface) {
    for m in surface.take_journal() {
        println!("    {m:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let surface = Rc::new(HeadlessSurface::new(Size::new(800.0, 600.0)));
    surface.set_popover_size(Size::new(50.0, 50.0));
    surface.set_animated(true);
    let anchor = surface.add_anchor(Rect::new(200.0, 200.0, 300.0, 300.0));

    let popover = Popover::with_groups(
        surface.clone(),
        anchor,
        PopoverConfig::default().with_disposable(true),
        Groups::new(),
    );
    popover.set_content("Hello from tether".to_owned());

    println!("== show ==");
    let _ = popover.show();
    print_journal(&surface);

    println!("== hide, then show before the transition ends ==");
    popover.hide();
    let _ = popover.show();
    println!("    completed {} stale transition(s)", surface.finish_transitions());
    println!("    state: {:?}", popover.state());
    print_journal(&surface);

    println!("== hide and let it finish ==");
    popover.hide();
    surface.finish_transitions();
    println!("    state: {:?}, markup: {:?}", popover.state(), popover.popover());
    let removed = surface
        .take_journal()
        .into_iter()
        .any(|m| matches!(m, Mutation::Removed(_)));
    println!("    markup removed: {removed}");
}

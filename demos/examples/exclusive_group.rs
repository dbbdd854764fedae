// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutually exclusive popovers.
//!
//! Three popovers forbid parallel use, so they share the default group and
//! showing one hides whichever other one is shown. A fourth joins a named
//! group that allows parallel use and only observes `beforeShow`.
//!
//! Run:
//! - `cargo run -p tether_demos --example exclusive_group`

use std::rc::Rc;

use kurbo::{Rect, Size};
use tether_popover::config::DEFAULT_GROUP;
use tether_popover::headless::HeadlessSurface;
use tether_popover::{GroupEvent, Groups, Hook, Popover, PopoverConfig, Visibility};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let surface = Rc::new(HeadlessSurface::new(Size::new(1024.0, 768.0)));
    surface.set_popover_size(Size::new(160.0, 48.0));
    let groups = Groups::new();

    let exclusive = PopoverConfig::default().with_parallel_use(false);
    let menus: Vec<_> = (0..3)
        .map(|i| {
            let x = 40.0 + f64::from(i) * 200.0;
            let anchor = surface.add_anchor(Rect::new(x, 20.0, x + 120.0, 44.0));
            let p = Popover::with_groups(surface.clone(), anchor, exclusive.clone(), groups.clone());
            let id = p.id();
            p.add_callback(Hook::AfterShow, move |_, _| println!("  {id} shown"));
            p.add_callback(Hook::AfterHide, move |_, _| println!("  {id} hidden"));
            p
        })
        .collect();
    println!("{DEFAULT_GROUP}: {:?}", groups.members(DEFAULT_GROUP));

    for (i, menu) in menus.iter().enumerate() {
        println!("== show menu {i} ==");
        if let Err(err) = menu.show() {
            eprintln!("show failed: {err}");
        }
        let states: Vec<Visibility> = menus.iter().map(Popover::state).collect();
        println!("  states: {states:?}");
    }

    let observer_anchor = surface.add_anchor(Rect::new(40.0, 400.0, 160.0, 424.0));
    let observer = Popover::with_groups(
        surface.clone(),
        observer_anchor,
        PopoverConfig::default().with_group("tips"),
        groups.clone(),
    );
    let tip_anchor = surface.add_anchor(Rect::new(240.0, 400.0, 360.0, 424.0));
    let tip = Popover::with_groups(
        surface,
        tip_anchor,
        PopoverConfig::default().with_group("tips"),
        groups,
    );
    observer.add_group_callback(GroupEvent::BeforeShow, |origin| {
        println!("  observer saw beforeShow from {origin}");
    });
    println!("== tips ==");
    let _ = observer.show();
    let _ = tip.show();
    println!("  both active: {}", observer.is_active() && tip.is_active());
}

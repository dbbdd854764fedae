// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use tether_popover::headless::HeadlessSurface;
use tether_popover::{Groups, Popover, PopoverConfig};

fn surface_with_anchors(n: usize) -> (Rc<HeadlessSurface>, Vec<tether_popover::headless::AnchorId>) {
    let surface = Rc::new(HeadlessSurface::new(Size::new(1280.0, 800.0)));
    surface.set_popover_size(Size::new(180.0, 60.0));
    let anchors = (0..n)
        .map(|i| {
            let x = (i % 16) as f64 * 70.0;
            let y = (i / 16) as f64 * 40.0;
            surface.add_anchor(Rect::new(x, y, x + 60.0, y + 30.0))
        })
        .collect();
    (surface, anchors)
}

fn bench_show_hide(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");
    let (surface, anchors) = surface_with_anchors(1);
    let popover = Popover::with_groups(
        surface.clone(),
        anchors[0],
        PopoverConfig::quiet(),
        Groups::new(),
    );
    group.bench_function("show_hide", |b| {
        b.iter(|| {
            black_box(popover.show().is_ok());
            black_box(popover.hide());
        });
    });

    group.bench_function("create_destroy", |b| {
        b.iter_batched(
            || Popover::with_groups(surface.clone(), anchors[0], PopoverConfig::quiet(), Groups::new()),
            |p| {
                let _ = p.show();
                black_box(p.destroy());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

// Showing each member of an exclusive group in turn hides the previous one.
fn bench_exclusive_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("exclusive_group");
    for &n in &[8_usize, 64, 256] {
        let (surface, anchors) = surface_with_anchors(n);
        let groups = Groups::new();
        let config = PopoverConfig::quiet().with_parallel_use(false);
        let popovers: Vec<_> = anchors
            .iter()
            .map(|&a| Popover::with_groups(surface.clone(), a, config.clone(), groups.clone()))
            .collect();
        group.bench_function(format!("rotate_n{n}"), |b| {
            b.iter(|| {
                for p in &popovers {
                    black_box(p.show().is_ok());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_show_hide, bench_exclusive_group);
criterion_main!(benches);

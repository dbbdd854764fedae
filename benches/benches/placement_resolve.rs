// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use tether_placement::{Placement, PlacementRequest, Viewport};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

// Anchors scattered over a document larger than the viewport, so a share of
// them needs one or more fallbacks.
fn gen_requests(count: usize, viewport: Viewport) -> Vec<PlacementRequest> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let x0 = rng.next_f64() * viewport.size.width * 1.2;
        let y0 = rng.next_f64() * viewport.size.height * 1.2;
        let w = 20.0 + rng.next_f64() * 120.0;
        let h = 16.0 + rng.next_f64() * 40.0;
        out.push(PlacementRequest {
            anchor: Rect::new(x0, y0, x0 + w, y0 + h),
            popover: Size::new(180.0, 60.0),
            offset: Vec2::new(10.0, 10.0),
            viewport,
        });
    }
    out
}

fn bench_resolve(c: &mut Criterion) {
    let viewport = Viewport::new(Size::new(1280.0, 800.0));
    let requests = gen_requests(4096, viewport);
    let primary = Placement::RIGHT_CENTER;
    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(requests.len() as u64));

    group.bench_function("primary_only", |b| {
        b.iter(|| {
            let fits = requests
                .iter()
                .filter(|r| r.resolve(primary, &[]).fit_found)
                .count();
            black_box(fits);
        });
    });

    let legacy = [Placement::CENTER_BOTTOM];
    group.bench_function("legacy_fallback", |b| {
        b.iter(|| {
            let fits = requests
                .iter()
                .filter(|r| r.resolve(primary, &legacy).fit_found)
                .count();
            black_box(fits);
        });
    });

    // Worst case: every placement as an alternative.
    group.bench_function("all_alternatives", |b| {
        b.iter(|| {
            let fits = requests
                .iter()
                .filter(|r| r.resolve(primary, &Placement::ALL).fit_found)
                .count();
            black_box(fits);
        });
    });
    group.finish();
}

fn bench_attempt(c: &mut Criterion) {
    let viewport = Viewport::new(Size::new(1280.0, 800.0)).with_scroll(Vec2::new(0.0, 400.0));
    let requests = gen_requests(4096, viewport);
    let mut group = c.benchmark_group("attempt");
    group.throughput(Throughput::Elements((requests.len() * Placement::ALL.len()) as u64));
    group.bench_function("nine_placements", |b| {
        b.iter(|| {
            let mut fits = 0_usize;
            for r in &requests {
                for p in Placement::ALL {
                    fits += usize::from(r.attempt(p).1);
                }
            }
            black_box(fits);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_attempt);
criterion_main!(benches);

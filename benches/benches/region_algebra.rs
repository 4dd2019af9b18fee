// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_geometry::{Rect, Region};

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

fn gen_random_rects(count: usize, extent: f64, size: f64) -> Vec<Rect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x0 = (rng.next_f64() * (extent - size)).floor();
            let y0 = (rng.next_f64() * (extent - size)).floor();
            Rect::new(x0, y0, x0 + size, y0 + size)
        })
        .collect()
}

fn gen_grid_rects(n: usize, cell: f64, gap: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * (cell + gap);
            let y0 = y as f64 * (cell + gap);
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn bench_include(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_include");
    for &count in &[16usize, 64, 256] {
        let rects = gen_random_rects(count, 1000.0, 80.0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("random_n{count}"), |b| {
            b.iter_batched(
                Region::new,
                |mut region| {
                    for r in &rects {
                        region.include(*r);
                    }
                    black_box(region.count_rects());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_exclude(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_exclude");
    let frame = Rect::from_size(1000.0, 1000.0);
    for &count in &[16usize, 64, 256] {
        let rects = gen_random_rects(count, 1000.0, 40.0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("random_holes_n{count}"), |b| {
            b.iter_batched(
                || Region::from_rect(frame),
                |mut region| {
                    for r in &rects {
                        region.exclude(*r);
                    }
                    black_box(region.area());
                },
                BatchSize::SmallInput,
            );
        });
    }
    // Worst case for band splitting: a regular grid of holes.
    let holes = gen_grid_rects(16, 40.0, 20.0);
    group.bench_function("grid_holes_16x16", |b| {
        b.iter_batched(
            || Region::from_rect(frame),
            |mut region| {
                for r in &holes {
                    region.exclude(*r);
                }
                black_box(region.count_rects());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_intersect");
    let a: Region = gen_random_rects(128, 1000.0, 60.0).into_iter().collect();
    let b: Region = gen_grid_rects(12, 60.0, 25.0).into_iter().collect();
    group.bench_function("random_vs_grid", |bench| {
        bench.iter_batched(
            || a.clone(),
            |mut region| {
                region.intersect_region(&b);
                black_box(region.area());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_include, bench_exclude, bench_intersect);
criterion_main!(benches);

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_geometry::{Point, Rect, Vec2};
use trellis_view_tree::{ContainerId, NodeId, ResizingMode, Tree};

/// A root panel holding `n` × `n` overlapping cells, each with one label.
fn build_grid(n: usize, cell: f64) -> (Tree, NodeId, Vec<NodeId>) {
    let extent = n as f64 * cell + cell;
    let mut tree = Tree::with_root_size(extent, extent);
    let panel = tree.create_item(Rect::from_size(extent, extent), ResizingMode::ALL);
    tree.add_item(ContainerId::Root, panel, None).unwrap();
    let mut cells = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let frame = Rect::new(x0, y0, x0 + cell * 1.5, y0 + cell * 1.5);
            let id = tree.create_item(frame, ResizingMode::RIGHT | ResizingMode::BOTTOM);
            tree.add_item(panel.into(), id, None).unwrap();
            let label = tree.create_item(Rect::new(2.0, 2.0, cell, 12.0), ResizingMode::ALL);
            tree.add_item(id.into(), label, None).unwrap();
            cells.push(id);
        }
    }
    let _ = tree.take_damage();
    (tree, panel, cells)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_build");
    for &n in &[8usize, 16, 32] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{n}"), |b| {
            b.iter(|| {
                let (tree, _, _) = build_grid(n, 20.0);
                black_box(tree.count_items());
            });
        });
    }
    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_mutations");
    for &n in &[8usize, 16, 32] {
        let (tree, panel, cells) = build_grid(n, 20.0);
        let back = cells[0];
        let front = cells[cells.len() - 1];

        group.bench_function(format!("move_front_n{n}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut t| {
                    t.move_by(front, Vec2::new(3.0, 1.0));
                    black_box(t.take_damage().dirty_rects.len());
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("move_back_n{n}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut t| {
                    t.move_by(back, Vec2::new(3.0, 1.0));
                    black_box(t.take_damage().dirty_rects.len());
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("resize_cascade_n{n}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut t| {
                    t.resize_by(panel, 40.0, 40.0);
                    black_box(t.take_damage().dirty_rects.len());
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("scroll_panel_n{n}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut t| {
                    t.scroll_to(panel, Point::new(5.0, 5.0));
                    black_box(t.take_damage().dirty_rects.len());
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("hit_test_n{n}"), |b| {
            b.iter(|| black_box(tree.find_item_at(Point::new(55.0, 55.0)).map(|h| h.node)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_mutations);
criterion_main!(benches);

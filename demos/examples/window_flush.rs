// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window flush.
//!
//! Drive a window with a toy event loop: several invalidations coalesce into a
//! single flush, a disabled batch is copied once on release, and a queued
//! resize interrupts a repaint.
//!
//! Run:
//! - `RUST_LOG=trellis_window=debug cargo run -p trellis_demos --example window_flush`

use std::cell::Cell;

use tracing_subscriber::EnvFilter;
use trellis_geometry::{Rect, Vec2};
use trellis_view_tree::{ContainerId, NodeId, ResizingMode, Tree};
use trellis_window::{BackingStore, EventLoop, Painter, StdThread, Window};

#[derive(Default)]
struct ToyLoop {
    queued_flushes: usize,
    /// Answer "resize pending" once, after this many checks.
    resize_after: Option<usize>,
    checks: Cell<usize>,
}

impl EventLoop for ToyLoop {
    type ThreadId = std::thread::ThreadId;

    fn current_thread(&self) -> Self::ThreadId {
        StdThread::current()
    }

    fn post_flush(&mut self) {
        self.queued_flushes += 1;
    }

    fn resize_pending(&self) -> bool {
        let checks = self.checks.get();
        self.checks.set(checks + 1);
        self.resize_after == Some(checks)
    }
}

struct PrintingStore;

impl BackingStore for PrintingStore {
    fn copy_to_surface(&mut self, src: Rect, dest: Rect) {
        println!("  blit {src:?} -> {dest:?}");
    }
}

struct PrintingPainter;

impl Painter for PrintingPainter {
    fn draw(&mut self, _tree: &Tree, node: NodeId, rect: Rect) {
        println!("  draw {node:?} in {rect:?}");
    }

    fn draw_background(&mut self, rect: Rect) {
        println!("  clear {rect:?}");
    }
}

fn run_queued(window: &mut Window<ToyLoop, PrintingStore>) {
    while window.event_loop().queued_flushes > 0 {
        window.event_loop_mut().queued_flushes -= 1;
        window.update_if_needed(&mut PrintingPainter);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut window = Window::new(
        Rect::new(40.0, 40.0, 360.0, 280.0),
        ToyLoop::default(),
        PrintingStore,
    );

    println!("== build");
    let (list, rows) = window.edit(|tree| {
        let list = tree.create_item(Rect::new(10.0, 10.0, 210.0, 230.0), ResizingMode::ALL);
        tree.add_item(ContainerId::Root, list, None).unwrap();
        let rows: Vec<NodeId> = (0..4)
            .map(|i| {
                let y = f64::from(i) * 60.0;
                let row = tree.create_item(Rect::new(0.0, y, 200.0, y + 50.0), ResizingMode::NONE);
                tree.add_item(list.into(), row, None).unwrap();
                row
            })
            .collect();
        (list, rows)
    });
    println!("  flushes queued: {}", window.event_loop().queued_flushes);
    run_queued(&mut window);

    println!("== scroll and invalidate");
    window.edit(|tree| tree.scroll_by(list, Vec2::new(0.0, 20.0)));
    window.edit(|tree| tree.invalidate(rows[1], Rect::new(0.0, 0.0, 50.0, 10.0)));
    println!("  flushes queued: {}", window.event_loop().queued_flushes);
    run_queued(&mut window);

    println!("== batched blits");
    window.disable_updates();
    window.invalidate(Rect::new(0.0, 0.0, 20.0, 20.0), false);
    window.invalidate(Rect::new(100.0, 100.0, 120.0, 120.0), false);
    window.enable_updates();

    println!("== interrupted repaint");
    window.event_loop_mut().checks.set(0);
    window.event_loop_mut().resize_after = Some(2);
    window.invalidate_all();
    run_queued(&mut window);
    println!("  broke on expose: {}", window.broke_on_expose());
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize anchors.
//!
//! Lay out a toolbar, a sidebar, a content pane, a status bar, and a centered
//! badge, then resize the root and print where everything ended up.
//!
//! Run:
//! - `cargo run -p trellis_demos --example resize_anchors`

use tracing_subscriber::EnvFilter;
use trellis_geometry::Rect;
use trellis_view_tree::{ContainerId, ResizingMode, Tree};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Tree::with_root_size(400.0, 300.0);
    let layout = [
        (
            "toolbar",
            Rect::new(0.0, 0.0, 400.0, 30.0),
            ResizingMode::LEFT | ResizingMode::RIGHT | ResizingMode::TOP,
        ),
        (
            "sidebar",
            Rect::new(0.0, 30.0, 80.0, 280.0),
            ResizingMode::LEFT | ResizingMode::TOP | ResizingMode::BOTTOM,
        ),
        (
            "content",
            Rect::new(80.0, 30.0, 400.0, 280.0),
            ResizingMode::ALL,
        ),
        (
            "status",
            Rect::new(0.0, 280.0, 400.0, 300.0),
            ResizingMode::LEFT | ResizingMode::RIGHT | ResizingMode::BOTTOM,
        ),
        (
            "badge",
            Rect::new(180.0, 140.0, 220.0, 160.0),
            ResizingMode::H_CENTER | ResizingMode::V_CENTER,
        ),
    ];

    let mut ids = Vec::new();
    for (name, frame, mode) in layout {
        let id = tree.create_item(frame, mode);
        tree.add_item(ContainerId::Root, id, None).unwrap();
        ids.push((name, id));
    }
    let _ = tree.take_damage();

    for (width, height) in [(600.0, 450.0), (320.0, 200.0), (320.0, 200.0)] {
        tree.resize_root(width, height);
        println!("== root {width} x {height}");
        for (name, id) in &ids {
            println!("  {name:>8}: {:?}", tree.frame(*id).unwrap());
        }
        let damage = tree.take_damage();
        println!("  damage: {:?}", damage.dirty_rects);
    }
}

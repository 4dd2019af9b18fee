// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Occlusion basics.
//!
//! Stack two overlapping siblings, print their visible regions, then restack
//! and hide to see the regions follow. Finishes with a hit test.
//!
//! Run:
//! - `cargo run -p trellis_demos --example occlusion_basics`
//! - `RUST_LOG=trellis_view_tree=trace cargo run -p trellis_demos --example occlusion_basics`

use tracing_subscriber::EnvFilter;
use trellis_geometry::{Point, Rect};
use trellis_view_tree::{ContainerId, NodeId, OcclusionMargin, ResizingMode, Tree, TreeOptions};

fn print_regions(tree: &Tree, label: &str, nodes: &[(&str, NodeId)]) {
    println!("== {label}");
    for (name, id) in nodes {
        let region = tree.visible_region(*id).unwrap();
        println!(
            "  {name}: area {:>7.1} in {} rect(s): {:?}",
            region.area(),
            region.count_rects(),
            region.rects()
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Tree::with_options(TreeOptions {
        root_bounds: Rect::from_size(300.0, 300.0),
        occlusion_margin: OcclusionMargin::None,
        ..TreeOptions::default()
    });

    let a = tree.create_item(Rect::new(0.0, 0.0, 100.0, 100.0), ResizingMode::default());
    let b = tree.create_item(Rect::new(50.0, 50.0, 150.0, 150.0), ResizingMode::default());
    tree.add_item(ContainerId::Root, a, None).unwrap();
    tree.add_item(ContainerId::Root, b, None).unwrap();
    let nodes = [("A", a), ("B", b)];
    print_regions(&tree, "B added after A (B on top)", &nodes);
    println!("  damage: {:?}", tree.take_damage().dirty_rects);

    tree.bring_to_front(a).unwrap();
    print_regions(&tree, "A brought to front", &nodes);

    tree.hide(a);
    print_regions(&tree, "A hidden", &nodes);
    tree.show(a);

    let probe = Point::new(75.0, 75.0);
    let hit = tree.find_item_at(probe).unwrap();
    println!("hit at {probe:?}: {:?} via {:?}", hit.node, hit.path);
}

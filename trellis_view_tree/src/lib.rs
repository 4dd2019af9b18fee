// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_view_tree --heading-base-level=0

//! Trellis View Tree: a window's view hierarchy with cached visible regions.
//!
//! Every node (a layout item) has a frame in its container's coordinates, a
//! scroll origin, a resizing mode, and a hidden flag. The tree keeps, for each
//! node, the region of it that is actually visible: its frame clipped to the
//! container's visible region, minus the siblings stacked above it. Mutations
//! keep those regions consistent and record window-space damage.
//!
//! - Sibling order is stacking order: index 0 is furthest back, the last child is on top.
//! - Resizing a node moves and stretches its children according to their [`ResizingMode`].
//! - Damage is drained with [`Tree::take_damage`] and handed to whatever repaints the window.
//!
//! ## API overview
//!
//! - [`Tree`]: owns the nodes and the root container.
//! - [`NodeId`]: generational handle of a node.
//! - [`ContainerId`]: either the root container or a node holding children.
//! - [`ResizingMode`]: which container edges a node's frame follows.
//! - [`TreeOptions`]: root bounds, root units-per-pixel, and the [`OcclusionMargin`].
//! - [`Damage`]: window-space rectangles invalidated since the last drain.
//! - [`TreeError`]: structural misuse such as attaching an attached node.
//!
//! Key operations:
//! - [`Tree::create_item`] then [`Tree::add_item`] / [`Tree::remove_item`] / [`Tree::destroy`]
//! - [`Tree::move_to`], [`Tree::resize_to`], [`Tree::scroll_to`], [`Tree::show`], [`Tree::hide`]
//! - [`Tree::bring_to_front`], [`Tree::send_behind`], [`Tree::send_to_back`]
//! - [`Tree::visible_region`] and [`Tree::find_item_at`]
//!
//! ## Occlusion margin
//!
//! Occluding siblings are outset before being subtracted, by one device pixel
//! (the container's units-per-pixel) unless [`TreeOptions::occlusion_margin`]
//! says otherwise. This keeps antialiased edges of the occluder from leaving
//! slivers of the node behind unpainted.
//!
//! # Example
//!
//! ```rust
//! use trellis_geometry::Rect;
//! use trellis_view_tree::{ContainerId, OcclusionMargin, ResizingMode, Tree, TreeOptions};
//!
//! let mut tree = Tree::with_options(TreeOptions {
//!     root_bounds: Rect::from_size(200.0, 200.0),
//!     occlusion_margin: OcclusionMargin::None,
//!     ..TreeOptions::default()
//! });
//!
//! let a = tree.create_item(Rect::new(0.0, 0.0, 100.0, 100.0), ResizingMode::default());
//! let b = tree.create_item(Rect::new(50.0, 50.0, 150.0, 150.0), ResizingMode::default());
//! tree.add_item(ContainerId::Root, a, None).unwrap();
//! tree.add_item(ContainerId::Root, b, None).unwrap();
//!
//! // B is on top: A keeps an L-shaped area, B keeps its whole frame.
//! assert_eq!(tree.visible_region(a).unwrap().area(), 7500.0);
//! assert_eq!(tree.visible_region(b).unwrap().area(), 10000.0);
//!
//! // Both insertions were recorded as window-space damage.
//! let damage = tree.take_damage();
//! assert_eq!(damage.union_rect(), Rect::new(0.0, 0.0, 150.0, 150.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coords;
mod damage;
mod error;
mod resize;
mod solver;
mod tree;
mod types;

pub use damage::Damage;
pub use error::TreeError;
pub use tree::Tree;
pub use types::{ContainerId, Hit, NodeId, OcclusionMargin, ResizingMode, TreeOptions};

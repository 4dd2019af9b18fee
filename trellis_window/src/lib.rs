// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_window --heading-base-level=0

//! Trellis Window: damage coalescing and repaint scheduling for one window.
//!
//! A [`Window`] owns a [`Tree`](trellis_view_tree::Tree) and collects the
//! damage its mutations produce. Damage is split in two:
//!
//! - *expose* damage: widgets must repaint the area into the backing store;
//! - *update* damage: the area is already painted and only needs copying to the screen.
//!
//! Neither is acted on immediately. The first damage after a flush asks the
//! host's [`EventLoop`] for a flush; everything arriving before it runs is
//! merged into the same request. When the loop calls
//! [`Window::update_if_needed`], exposed nodes are handed to a [`Painter`]
//! back to front and the result is copied once through the [`BackingStore`].
//!
//! [`Window::disable_updates`] and [`Window::enable_updates`] bracket a batch
//! of changes. They nest, must stay on one thread, and releasing the last
//! level copies pending update damage right away.
//!
//! # Example
//!
//! ```rust
//! use trellis_geometry::Rect;
//! use trellis_view_tree::{ContainerId, NodeId, ResizingMode, Tree};
//! use trellis_window::{BackingStore, EventLoop, Painter, Window};
//!
//! #[derive(Default)]
//! struct Loop {
//!     posted: usize,
//! }
//!
//! impl EventLoop for Loop {
//!     type ThreadId = ();
//!     fn current_thread(&self) {}
//!     fn post_flush(&mut self) {
//!         self.posted += 1;
//!     }
//!     fn resize_pending(&self) -> bool {
//!         false
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Screen {
//!     copies: Vec<Rect>,
//! }
//!
//! impl BackingStore for Screen {
//!     fn copy_to_surface(&mut self, _src: Rect, dest: Rect) {
//!         self.copies.push(dest);
//!     }
//! }
//!
//! struct Log(Vec<NodeId>);
//!
//! impl Painter for Log {
//!     fn draw(&mut self, _tree: &Tree, node: NodeId, _rect: Rect) {
//!         self.0.push(node);
//!     }
//! }
//!
//! let mut window = Window::new(
//!     Rect::new(100.0, 100.0, 300.0, 200.0),
//!     Loop::default(),
//!     Screen::default(),
//! );
//! let label = window.edit(|tree| {
//!     let label = tree.create_item(Rect::new(10.0, 10.0, 90.0, 30.0), ResizingMode::NONE);
//!     tree.add_item(ContainerId::Root, label, None).unwrap();
//!     label
//! });
//! window.invalidate(Rect::new(0.0, 0.0, 5.0, 5.0), false);
//! assert_eq!(window.event_loop().posted, 1);
//!
//! // The event loop runs the flush.
//! let mut painter = Log(Vec::new());
//! window.update_if_needed(&mut painter);
//! assert_eq!(painter.0, [label]);
//! assert_eq!(window.backing_store().copies, [Rect::new(100.0, 100.0, 190.0, 130.0)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature adds [`StdThread`].

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod host;
mod updates;
mod window;

#[cfg(feature = "std")]
pub use host::StdThread;
pub use host::{BackingStore, EventLoop, Painter};
pub use updates::UpdateState;
pub use window::Window;

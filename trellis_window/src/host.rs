// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the host platform provides to a [`Window`](crate::Window).
//!
//! The window never talks to a message loop, a pixel buffer, or widget code
//! directly. It asks for a flush through [`EventLoop`], copies finished pixels
//! through [`BackingStore`], and hands every node that needs repainting to a
//! [`Painter`].

use core::fmt::Debug;

use trellis_geometry::Rect;
use trellis_view_tree::{NodeId, Tree};

/// The event loop that owns a window.
pub trait EventLoop {
    /// Identity of a thread, used to keep update suspension on a single thread.
    type ThreadId: Copy + Eq + Debug;

    /// Identity of the calling thread.
    fn current_thread(&self) -> Self::ThreadId;

    /// Ask the loop to call [`Window::update_if_needed`](crate::Window::update_if_needed) soon.
    ///
    /// Fire-and-forget. The window never has more than one request outstanding.
    fn post_flush(&mut self);

    /// Whether a resize of this window is queued and not yet handled.
    ///
    /// A pending resize interrupts a repaint pass, since its result would be
    /// thrown away right after.
    fn resize_pending(&self) -> bool;
}

/// Off-screen pixels of a window and the surface they are shown on.
pub trait BackingStore {
    /// Copy `src` (window coordinates) of the off-screen buffer to `dest` (screen coordinates).
    fn copy_to_surface(&mut self, src: Rect, dest: Rect);

    /// The window was resized; the buffer should now cover `width` × `height`.
    fn resize(&mut self, width: f64, height: f64) {
        let _ = (width, height);
    }
}

/// Widget drawing code, invoked during a repaint pass.
pub trait Painter {
    /// Draw `node` into the backing store.
    ///
    /// `rect` is the part of the node that needs repainting, in the node's local coordinates.
    fn draw(&mut self, tree: &Tree, node: NodeId, rect: Rect);

    /// Clear `rect` (window coordinates) before any node is drawn over it.
    fn draw_background(&mut self, rect: Rect) {
        let _ = rect;
    }
}

/// Thread identities from the standard library.
///
/// Event loops running on std threads can use this for
/// [`EventLoop::current_thread`].
///
/// ```
/// use trellis_window::StdThread;
///
/// let here = StdThread::current();
/// let there = std::thread::spawn(StdThread::current).join().unwrap();
/// assert_ne!(here, there);
/// ```
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug, Default)]
pub struct StdThread;

#[cfg(feature = "std")]
impl StdThread {
    /// Identity of the calling thread.
    pub fn current() -> std::thread::ThreadId {
        std::thread::current().id()
    }
}

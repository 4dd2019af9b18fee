// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A window: one view tree, its damage, and the collaborators that repaint it.

use trellis_geometry::{Point, Rect};
use trellis_view_tree::{ContainerId, Tree, TreeOptions};

use crate::host::{BackingStore, EventLoop, Painter};
use crate::updates::{UpdateState, Updates};

/// A window's view tree together with its update coalescer.
///
/// Damage comes in two kinds. *Expose* damage needs the widgets to repaint
/// into the backing store; *update* damage only needs already painted pixels
/// copied to the screen. Both accumulate until the event loop runs
/// [`Window::update_if_needed`], and the window never has more than one flush
/// request outstanding.
///
/// Tree mutations go through [`Window::edit`], which forwards the tree's
/// damage as expose damage when the closure returns.
pub struct Window<L: EventLoop, B: BackingStore> {
    tree: Tree,
    event_loop: L,
    backing_store: B,
    updates: Updates<L::ThreadId>,
    /// Position and size on screen.
    frame: Rect,
}

impl<L: EventLoop, B: BackingStore> core::fmt::Debug for Window<L, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Window")
            .field("frame", &self.frame)
            .field("tree", &self.tree)
            .field("state", &self.updates.state())
            .field("expose", &self.updates.expose)
            .field("update", &self.updates.update)
            .finish_non_exhaustive()
    }
}

impl<L: EventLoop, B: BackingStore> Window<L, B> {
    /// Create a window occupying `frame` (screen coordinates).
    pub fn new(frame: Rect, event_loop: L, backing_store: B) -> Self {
        Self::with_tree_options(frame, TreeOptions::default(), event_loop, backing_store)
    }

    /// Create a window whose tree uses `options`.
    ///
    /// The root bounds are always the window's size, whatever `options` says.
    pub fn with_tree_options(
        frame: Rect,
        options: TreeOptions,
        event_loop: L,
        backing_store: B,
    ) -> Self {
        let tree = Tree::with_options(TreeOptions {
            root_bounds: Rect::from_size(frame.width(), frame.height()),
            ..options
        });
        Self {
            tree,
            event_loop,
            backing_store,
            updates: Updates::new(),
            frame,
        }
    }

    /// The view tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutate the view tree; everything it invalidates becomes expose damage.
    ///
    /// ```
    /// # use trellis_geometry::Rect;
    /// # use trellis_view_tree::{ContainerId, ResizingMode};
    /// # use trellis_window::{BackingStore, EventLoop, UpdateState, Window};
    /// # struct Loop;
    /// # impl EventLoop for Loop {
    /// #     type ThreadId = ();
    /// #     fn current_thread(&self) {}
    /// #     fn post_flush(&mut self) {}
    /// #     fn resize_pending(&self) -> bool { false }
    /// # }
    /// # struct Store;
    /// # impl BackingStore for Store {
    /// #     fn copy_to_surface(&mut self, _src: Rect, _dest: Rect) {}
    /// # }
    /// let mut window = Window::new(Rect::from_size(200.0, 100.0), Loop, Store);
    /// let panel = window.edit(|tree| {
    ///     let panel = tree.create_item(Rect::new(10.0, 10.0, 60.0, 60.0), ResizingMode::NONE);
    ///     tree.add_item(ContainerId::Root, panel, None).map(|()| panel)
    /// })?;
    /// assert_eq!(window.expose_rect(), Rect::new(10.0, 10.0, 60.0, 60.0));
    /// assert_eq!(window.update_state(), UpdateState::Flushing);
    /// # let _ = panel;
    /// # Ok::<(), trellis_view_tree::TreeError>(())
    /// ```
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Tree) -> R) -> R {
        let out = f(&mut self.tree);
        let damage = self.tree.take_damage();
        for rect in damage.dirty_rects {
            self.invalidate(rect, true);
        }
        out
    }

    /// The event loop this window posts to.
    pub fn event_loop(&self) -> &L {
        &self.event_loop
    }

    /// Mutable access to the event loop.
    pub fn event_loop_mut(&mut self) -> &mut L {
        &mut self.event_loop
    }

    /// The backing store this window copies from.
    pub fn backing_store(&self) -> &B {
        &self.backing_store
    }

    /// Mutable access to the backing store.
    pub fn backing_store_mut(&mut self) -> &mut B {
        &mut self.backing_store
    }

    /// Position and size of the window on screen.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Current state of the update machinery.
    pub fn update_state(&self) -> UpdateState {
        self.updates.state()
    }

    /// Whether a flush request is outstanding.
    pub fn flush_pending(&self) -> bool {
        self.updates.flush_pending
    }

    /// Whether the last repaint pass was interrupted by a pending resize.
    pub fn broke_on_expose(&self) -> bool {
        self.updates.broke_on_expose
    }

    /// Window area waiting for a full repaint, or [`Rect::INVALID`].
    pub fn expose_rect(&self) -> Rect {
        self.updates.expose
    }

    /// Window area waiting only for a copy to the screen, or [`Rect::INVALID`].
    pub fn update_rect(&self) -> Rect {
        self.updates.update
    }

    // --- damage ---

    /// Record `rect` (window coordinates) as damaged.
    ///
    /// With `redraw`, the widgets must repaint it; otherwise only the backing
    /// store needs copying to the screen. Rectangles with no area inside the
    /// window are ignored.
    /// Posts a flush unless one is already outstanding or updates are disabled.
    pub fn invalidate(&mut self, rect: Rect, redraw: bool) {
        let rect = rect & self.tree.root_bounds();
        if !rect.has_area() {
            return;
        }
        self.updates.merge(rect, redraw);
        if !self.updates.is_suspended() {
            self.request_flush();
        }
    }

    /// Mark the whole window for repaint.
    pub fn invalidate_all(&mut self) {
        self.invalidate(self.tree.root_bounds(), true);
    }

    /// Suspend flushing. Nestable, and only from one thread at a time.
    ///
    /// # Panics
    ///
    /// If another thread has updates disabled.
    pub fn disable_updates(&mut self) {
        let thread = self.event_loop.current_thread();
        self.updates.hold(thread);
        tracing::debug!(?thread, state = ?self.updates.state(), "updates disabled");
    }

    /// Undo one [`Window::disable_updates`].
    ///
    /// When the last level is released, pending update damage is copied to the
    /// screen right away, unless a resize is pending. Anything still owed is
    /// left to a posted flush.
    ///
    /// # Panics
    ///
    /// Without a matching [`Window::disable_updates`], or from a thread other
    /// than the one that disabled updates.
    pub fn enable_updates(&mut self) {
        let thread = self.event_loop.current_thread();
        if !self.updates.release(thread) {
            return;
        }
        tracing::debug!(?thread, "updates enabled");
        if self.updates.update.is_valid() && !self.event_loop.resize_pending() {
            let rect = self.updates.take_update();
            self.blit(rect);
        }
        if self.updates.has_damage() {
            self.request_flush();
        }
    }

    /// Run a flush: repaint exposed nodes, then copy the result to the screen.
    ///
    /// Called by the event loop after [`EventLoop::post_flush`]. Nodes are
    /// painted back to front, once each, when their visible region meets the
    /// exposed area. A resize arriving during the pass aborts it; the exposed
    /// area is kept and another flush is posted.
    pub fn update_if_needed(&mut self, painter: &mut impl Painter) {
        self.updates.flush_pending = false;
        if self.updates.is_suspended() {
            return;
        }

        let expose = self.updates.expose;
        if expose.is_valid() {
            if !self.paint(painter, expose) {
                self.updates.broke_on_expose = true;
                tracing::debug!("repaint interrupted by pending resize");
                self.request_flush();
                return;
            }
            self.updates.broke_on_expose = false;
        }

        let rect = self.updates.take_all();
        if rect.is_valid() {
            self.blit(rect);
        }
    }

    fn paint(&mut self, painter: &mut impl Painter, expose: Rect) -> bool {
        painter.draw_background(expose);
        for node in self.tree.descendants_pre_order(ContainerId::Root) {
            if self.event_loop.resize_pending() {
                return false;
            }
            let Some(local) = self
                .tree
                .convert_rect_from_window(ContainerId::Item(node), expose)
            else {
                continue;
            };
            let Some(region) = self.tree.visible_region(node) else {
                continue;
            };
            if region.intersects(local) {
                painter.draw(&self.tree, node, region.frame() & local);
            }
        }
        true
    }

    fn request_flush(&mut self) {
        if self.updates.claim_flush() {
            tracing::debug!("posting flush");
            self.event_loop.post_flush();
        }
    }

    fn blit(&mut self, rect: Rect) {
        let dest = rect.offset_by(self.frame.left_top().to_vec2());
        tracing::debug!(
            left = rect.left,
            top = rect.top,
            right = rect.right,
            bottom = rect.bottom,
            "copying to surface"
        );
        self.backing_store.copy_to_surface(rect, dest);
    }

    // --- window geometry ---

    /// Resize the window. The root container follows, and so do its children.
    pub fn resize_to(&mut self, width: f64, height: f64) {
        if self.frame.width() == width && self.frame.height() == height {
            return;
        }
        self.frame = Rect::new(
            self.frame.left,
            self.frame.top,
            self.frame.left + width,
            self.frame.top + height,
        );
        self.backing_store.resize(width, height);
        self.edit(|tree| tree.resize_root(width, height));
    }

    /// Move the window on screen. Its contents are unchanged.
    pub fn move_to(&mut self, point: Point) {
        self.frame = self.frame.offset_to(point);
    }

    /// Convert `point` from window to screen coordinates.
    pub fn convert_to_screen(&self, point: Point) -> Point {
        point + self.frame.left_top().to_vec2()
    }

    /// Convert `point` from screen to window coordinates.
    pub fn convert_from_screen(&self, point: Point) -> Point {
        point - self.frame.left_top().to_vec2()
    }
}

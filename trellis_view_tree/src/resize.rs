// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize-anchor propagation.
//!
//! When a container changes size, each child's frame is recomputed from its
//! [`ResizingMode`], one axis at a time. A child whose size changes passes its
//! own delta on to its children. The whole cascade runs under the tree's
//! `updating` guard and is solved and invalidated once at the end.

use alloc::vec::Vec;
use trellis_geometry::Rect;

use crate::tree::Tree;
use crate::types::{ContainerId, NodeId, ResizingMode};

impl ResizingMode {
    /// The frame a child with this mode gets when its container grows by `dw` × `dh`.
    ///
    /// ```
    /// use trellis_geometry::Rect;
    /// use trellis_view_tree::ResizingMode;
    ///
    /// let frame = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// assert_eq!(ResizingMode::RIGHT.follow(frame, 200.0, 0.0), Rect::new(200.0, 0.0, 250.0, 50.0));
    /// assert_eq!(ResizingMode::ALL.follow(frame, 200.0, 10.0), Rect::new(0.0, 0.0, 250.0, 60.0));
    /// ```
    pub fn follow(self, frame: Rect, dw: f64, dh: f64) -> Rect {
        let (left, right) = follow_axis(
            frame.left,
            frame.right,
            dw,
            self.contains(Self::LEFT),
            self.contains(Self::RIGHT),
            self.contains(Self::H_CENTER),
        );
        let (top, bottom) = follow_axis(
            frame.top,
            frame.bottom,
            dh,
            self.contains(Self::TOP),
            self.contains(Self::BOTTOM),
            self.contains(Self::V_CENTER),
        );
        Rect::new(left, top, right, bottom)
    }
}

fn follow_axis(
    min: f64,
    max: f64,
    delta: f64,
    follow_min: bool,
    follow_max: bool,
    follow_center: bool,
) -> (f64, f64) {
    let half = 0.5 * delta;
    match (follow_min, follow_max, follow_center) {
        // Both edges anchored: the size tracks the container, center is ignored.
        (true, true, _) => (min, max + delta),
        (false, true, false) => (min + delta, max + delta),
        (false, false, true) => (min + half, max + half),
        (true, false, true) => (min, max + half),
        (false, true, true) => (min + half, max + delta),
        (true, false, false) | (false, false, false) => (min, max),
    }
}

impl Tree {
    /// Resize the root container to `width` × `height`.
    ///
    /// Root children follow their resizing modes. Resizing to the current size
    /// does nothing.
    pub fn resize_root(&mut self, width: f64, height: f64) {
        let old = self.root.bounds;
        let new = Rect::new(old.left, old.top, old.left + width, old.top + height);
        if new == old {
            return;
        }
        let (dw, dh) = (new.width() - old.width(), new.height() - old.height());
        tracing::debug!(width, height, "resizing root container");

        self.updating += 1;
        self.root.bounds = new;
        self.propagate_resize(ContainerId::Root, dw, dh);
        self.updating -= 1;

        if self.updating == 0 {
            let count = self.root.children.len();
            if count > 0 {
                self.resolve_siblings(ContainerId::Root, 0, count - 1);
            }
            self.invalidate_in(ContainerId::Root, old | new);
        }
    }

    /// Give `id` a new frame, cascading size changes to its children.
    ///
    /// The solve and invalidation happen only when the outermost cascade ends.
    pub(crate) fn apply_frame(&mut self, id: NodeId, frame: Rect) {
        let old = self.node(id).frame;
        if old == frame {
            return;
        }
        let (dw, dh) = (frame.width() - old.width(), frame.height() - old.height());

        self.updating += 1;
        self.node_mut(id).frame = frame;
        if dw != 0.0 || dh != 0.0 {
            self.propagate_resize(ContainerId::Item(id), dw, dh);
        }
        self.updating -= 1;

        if self.updating == 0 {
            self.frame_changed(id, old);
        }
    }

    fn propagate_resize(&mut self, container: ContainerId, dw: f64, dh: f64) {
        let children: Vec<NodeId> = self.children(container).to_vec();
        for child in children {
            let node = self.node(child);
            let frame = node.resizing_mode.follow(node.frame, dw, dh);
            self.apply_frame(child, frame);
        }
    }

    fn frame_changed(&mut self, id: NodeId, old: Rect) {
        let node = self.node(id);
        let Some(container) = node.container else {
            return;
        };
        let (index, new) = (node.index, node.frame);
        tracing::trace!(node = ?id, "frame changed");
        self.resolve_siblings(container, 0, index);
        self.invalidate_in(container, old | new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_geometry::Point;

    const FRAME: Rect = Rect::new(0.0, 0.0, 50.0, 50.0);

    fn container_with_child(mode: ResizingMode) -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::with_root_size(1000.0, 1000.0);
        let container = tree.create_item(Rect::new(0.0, 0.0, 200.0, 100.0), ResizingMode::NONE);
        tree.add_item(ContainerId::Root, container, None).unwrap();
        let child = tree.create_item(FRAME, mode);
        tree.add_item(container.into(), child, None).unwrap();
        let _ = tree.take_damage();
        (tree, container, child)
    }

    #[test]
    fn follow_none_keeps_frame() {
        let (mut tree, container, child) = container_with_child(ResizingMode::NONE);
        tree.resize_to(container, 400.0, 100.0);
        assert_eq!(tree.frame(child), Some(FRAME));
    }

    #[test]
    fn follow_right_shifts_whole_frame() {
        let (mut tree, container, child) = container_with_child(ResizingMode::RIGHT);
        tree.resize_to(container, 400.0, 100.0);
        assert_eq!(tree.frame(child), Some(Rect::new(200.0, 0.0, 250.0, 50.0)));
    }

    #[test]
    fn axis_rules() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(ResizingMode::LEFT_TOP.follow(r, 100.0, 100.0), r);
        assert_eq!(
            (ResizingMode::LEFT | ResizingMode::RIGHT).follow(r, 100.0, 100.0),
            Rect::new(10.0, 20.0, 130.0, 40.0)
        );
        assert_eq!(
            ResizingMode::H_CENTER.follow(r, 100.0, 0.0),
            Rect::new(60.0, 20.0, 80.0, 40.0)
        );
        assert_eq!(
            (ResizingMode::H_CENTER | ResizingMode::LEFT).follow(r, 100.0, 0.0),
            Rect::new(10.0, 20.0, 80.0, 40.0)
        );
        assert_eq!(
            (ResizingMode::H_CENTER | ResizingMode::RIGHT).follow(r, 100.0, 0.0),
            Rect::new(60.0, 20.0, 130.0, 40.0)
        );
        assert_eq!(
            (ResizingMode::H_CENTER | ResizingMode::LEFT | ResizingMode::RIGHT)
                .follow(r, 100.0, 0.0),
            Rect::new(10.0, 20.0, 130.0, 40.0)
        );
        assert_eq!(
            (ResizingMode::V_CENTER | ResizingMode::BOTTOM).follow(r, 0.0, -20.0),
            Rect::new(10.0, 10.0, 30.0, 20.0)
        );
        assert_eq!(
            ResizingMode::ALL.follow(r, -5.0, 5.0),
            Rect::new(10.0, 20.0, 25.0, 45.0)
        );
    }

    #[test]
    fn resize_cascades_through_grandchildren() {
        let (mut tree, container, child) = container_with_child(ResizingMode::ALL);
        let grandchild = tree.create_item(Rect::new(40.0, 0.0, 50.0, 10.0), ResizingMode::RIGHT);
        tree.add_item(child.into(), grandchild, None).unwrap();

        tree.resize_by(container, 100.0, 20.0);
        assert_eq!(tree.frame(child), Some(Rect::new(0.0, 0.0, 150.0, 70.0)));
        assert_eq!(
            tree.frame(grandchild),
            Some(Rect::new(140.0, 0.0, 150.0, 10.0))
        );
        // The grandchild was solved after the cascade against the final frames.
        assert_eq!(tree.visible_region(grandchild).unwrap().area(), 100.0);
    }

    #[test]
    fn cascade_records_single_damage_rect() {
        let (mut tree, container, _child) = container_with_child(ResizingMode::ALL);
        tree.resize_to(container, 300.0, 150.0);
        let damage = tree.take_damage();
        assert_eq!(damage.dirty_rects, [Rect::new(0.0, 0.0, 300.0, 150.0)]);
    }

    #[test]
    fn resize_to_current_size_is_noop() {
        let (mut tree, container, child) = container_with_child(ResizingMode::ALL);
        tree.resize_to(container, 200.0, 100.0);
        assert_eq!(tree.frame(child), Some(FRAME));
        assert!(tree.take_damage().is_empty());

        tree.resize_root(1000.0, 1000.0);
        assert!(tree.take_damage().is_empty());
    }

    #[test]
    fn root_resize_moves_anchored_children() {
        let mut tree = Tree::with_root_size(200.0, 100.0);
        let pinned = tree.create_item(FRAME, ResizingMode::NONE);
        let docked = tree.create_item(FRAME, ResizingMode::RIGHT | ResizingMode::BOTTOM);
        tree.add_item(ContainerId::Root, pinned, None).unwrap();
        tree.add_item(ContainerId::Root, docked, None).unwrap();
        let _ = tree.take_damage();

        tree.resize_root(400.0, 150.0);
        assert_eq!(tree.root_bounds(), Rect::new(0.0, 0.0, 400.0, 150.0));
        assert_eq!(tree.frame(pinned), Some(FRAME));
        assert_eq!(tree.frame(docked), Some(Rect::new(200.0, 50.0, 250.0, 100.0)));
        assert_eq!(
            tree.take_damage().union_rect(),
            Rect::new(0.0, 0.0, 400.0, 150.0)
        );
    }

    #[test]
    fn move_and_resize_is_atomic() {
        let (mut tree, container, child) = container_with_child(ResizingMode::ALL);
        tree.move_and_resize_to(container, Rect::new(10.0, 10.0, 110.0, 60.0));
        // Shrinking past the child's size leaves it inverted, with no area.
        assert_eq!(tree.frame(child), Some(Rect::new(0.0, 0.0, -50.0, 0.0)));
        assert!(tree.visible_region(child).unwrap().is_empty());
        assert_eq!(
            tree.take_damage().dirty_rects,
            [Rect::new(0.0, 0.0, 200.0, 100.0) | Rect::new(10.0, 10.0, 110.0, 60.0)]
        );
        tree.move_to(container, Point::new(0.0, 0.0));
        assert_eq!(tree.frame(container), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
    }
}

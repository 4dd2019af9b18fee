// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate conversion between local, container, and window space, plus hit testing.
//!
//! A node's local space places its frame's top-left corner at its scroll
//! origin: `local = container - frame.left_top + local_origin`. The root
//! container's space is window space. Nodes that are not attached to the root,
//! directly or through their ancestors, have no window position.

use alloc::vec::Vec;
use trellis_geometry::{Point, Rect, Region, Vec2};

use crate::tree::Tree;
use crate::types::{ContainerId, Hit, NodeId};

impl Tree {
    /// Convert `point` from `item`'s local coordinates to its container's.
    pub fn convert_to_parent(&self, item: NodeId, point: Point) -> Option<Point> {
        self.parent_offset(item).map(|offset| point + offset)
    }

    /// Convert `point` from `item`'s container coordinates to its local ones.
    pub fn convert_from_parent(&self, item: NodeId, point: Point) -> Option<Point> {
        self.parent_offset(item).map(|offset| point - offset)
    }

    /// Convert `rect` from `item`'s local coordinates to its container's.
    pub fn convert_rect_to_parent(&self, item: NodeId, rect: Rect) -> Option<Rect> {
        self.parent_offset(item).map(|offset| rect.offset_by(offset))
    }

    /// Convert `rect` from `item`'s container coordinates to its local ones.
    pub fn convert_rect_from_parent(&self, item: NodeId, rect: Rect) -> Option<Rect> {
        self.parent_offset(item).map(|offset| rect.offset_by(-offset))
    }

    /// Convert `point` from `container` coordinates to window coordinates.
    ///
    /// Returns `None` when the container is not attached to the root.
    pub fn convert_to_window(&self, container: ContainerId, point: Point) -> Option<Point> {
        self.window_offset(container).map(|offset| point + offset)
    }

    /// Convert `point` from window coordinates to `container` coordinates.
    pub fn convert_from_window(&self, container: ContainerId, point: Point) -> Option<Point> {
        self.window_offset(container).map(|offset| point - offset)
    }

    /// Convert `rect` from `container` coordinates to window coordinates.
    pub fn convert_rect_to_window(&self, container: ContainerId, rect: Rect) -> Option<Rect> {
        self.rect_to_window(container, rect)
    }

    /// Convert `rect` from window coordinates to `container` coordinates.
    pub fn convert_rect_from_window(&self, container: ContainerId, rect: Rect) -> Option<Rect> {
        self.window_offset(container)
            .map(|offset| rect.offset_by(-offset))
    }

    /// The visible region of `item` in window coordinates.
    ///
    /// Empty for hidden or detached items.
    pub fn visible_region_in_window(&self, item: NodeId) -> Option<Region> {
        let mut region = self.visible_region(item)?.clone();
        match self.window_offset(ContainerId::Item(item)) {
            Some(offset) => region.offset_by(offset),
            None => region.make_empty(),
        }
        Some(region)
    }

    /// Find the deepest, topmost node whose visible region contains `point` (window coordinates).
    ///
    /// Siblings are searched front to back, so an occluding sibling wins over
    /// the node behind it. Hidden nodes have no visible region and are never hit.
    ///
    /// ```
    /// use trellis_geometry::{Point, Rect};
    /// use trellis_view_tree::{ContainerId, ResizingMode, Tree};
    ///
    /// let mut tree = Tree::with_root_size(200.0, 200.0);
    /// let panel = tree.create_item(Rect::new(10.0, 10.0, 110.0, 110.0), ResizingMode::NONE);
    /// tree.add_item(ContainerId::Root, panel, None).unwrap();
    /// let button = tree.create_item(Rect::new(0.0, 0.0, 20.0, 20.0), ResizingMode::NONE);
    /// tree.add_item(panel.into(), button, None).unwrap();
    ///
    /// let hit = tree.find_item_at(Point::new(15.0, 15.0)).unwrap();
    /// assert_eq!(hit.node, button);
    /// assert_eq!(hit.path, [panel, button]);
    /// assert_eq!(tree.find_item_at(Point::new(150.0, 150.0)).map(|h| h.node), None);
    /// ```
    pub fn find_item_at(&self, point: Point) -> Option<Hit> {
        let mut path = Vec::new();
        let mut container = ContainerId::Root;
        let mut local = point;
        'descend: loop {
            for &child in self.children(container).iter().rev() {
                let node = self.node(child);
                let inner = local - node.frame.left_top().to_vec2() + node.local_origin.to_vec2();
                if node.visible_region.contains_point(inner) {
                    path.push(child);
                    container = ContainerId::Item(child);
                    local = inner;
                    continue 'descend;
                }
            }
            break;
        }
        let node = *path.last()?;
        Some(Hit { node, path })
    }

    /// Window-space translation of `container` coordinates, if attached to the root.
    pub(crate) fn window_offset(&self, container: ContainerId) -> Option<Vec2> {
        let mut offset = Vec2::ZERO;
        let mut current = container;
        loop {
            match current {
                ContainerId::Root => return Some(offset),
                ContainerId::Item(id) => {
                    let node = self.node_opt(id)?;
                    offset += node.frame.left_top() - node.local_origin;
                    current = node.container?;
                }
            }
        }
    }

    /// Translate `rect` from `container` coordinates into window space.
    pub(crate) fn rect_to_window(&self, container: ContainerId, rect: Rect) -> Option<Rect> {
        self.window_offset(container)
            .map(|offset| rect.offset_by(offset))
    }

    fn parent_offset(&self, item: NodeId) -> Option<Vec2> {
        let node = self.node_opt(item)?;
        Some(node.frame.left_top() - node.local_origin)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ContainerId, NodeId, ResizingMode, Tree};
    use trellis_geometry::{Point, Rect, Vec2};

    fn add(tree: &mut Tree, container: ContainerId, frame: Rect) -> NodeId {
        let id = tree.create_item(frame, ResizingMode::NONE);
        tree.add_item(container, id, None).unwrap();
        id
    }

    #[test]
    fn parent_conversion_accounts_for_scroll() {
        let mut tree = Tree::with_root_size(200.0, 200.0);
        let a = add(&mut tree, ContainerId::Root, Rect::new(10.0, 20.0, 110.0, 120.0));
        assert_eq!(
            tree.convert_to_parent(a, Point::new(0.0, 0.0)),
            Some(Point::new(10.0, 20.0))
        );
        tree.scroll_to(a, Point::new(5.0, 5.0));
        assert_eq!(
            tree.convert_to_parent(a, Point::new(5.0, 5.0)),
            Some(Point::new(10.0, 20.0))
        );
        assert_eq!(
            tree.convert_from_parent(a, Point::new(10.0, 20.0)),
            Some(Point::new(5.0, 5.0))
        );
        assert_eq!(
            tree.convert_rect_to_parent(a, Rect::new(5.0, 5.0, 15.0, 15.0)),
            Some(Rect::new(10.0, 20.0, 20.0, 30.0))
        );
        assert_eq!(
            tree.convert_rect_from_parent(a, Rect::new(10.0, 20.0, 20.0, 30.0)),
            Some(Rect::new(5.0, 5.0, 15.0, 15.0))
        );
    }

    #[test]
    fn window_conversion_walks_the_chain() {
        let mut tree = Tree::with_root_size(400.0, 400.0);
        let a = add(&mut tree, ContainerId::Root, Rect::new(100.0, 100.0, 300.0, 300.0));
        let b = add(&mut tree, a.into(), Rect::new(10.0, 10.0, 60.0, 60.0));
        tree.scroll_by(a, Vec2::new(0.0, 4.0));

        let p = Point::new(1.0, 2.0);
        assert_eq!(tree.convert_to_window(ContainerId::Root, p), Some(p));
        let window = tree.convert_to_window(b.into(), p).unwrap();
        assert_eq!(window, Point::new(111.0, 108.0));
        assert_eq!(tree.convert_from_window(b.into(), window), Some(p));
        assert_eq!(
            tree.convert_rect_from_window(a.into(), Rect::new(100.0, 100.0, 110.0, 110.0)),
            Some(Rect::new(0.0, 4.0, 10.0, 14.0))
        );

        tree.remove_self(a).unwrap();
        assert_eq!(tree.convert_to_window(b.into(), p), None);
        // Conversion to the direct container still works for detached nodes.
        assert_eq!(tree.convert_to_parent(b, p), Some(Point::new(11.0, 12.0)));
    }

    #[test]
    fn visible_region_in_window_space() {
        let mut tree = Tree::with_root_size(400.0, 400.0);
        let a = add(&mut tree, ContainerId::Root, Rect::new(100.0, 100.0, 200.0, 200.0));
        let b = add(&mut tree, a.into(), Rect::new(50.0, 50.0, 150.0, 150.0));
        let region = tree.visible_region_in_window(b).unwrap();
        assert_eq!(region.frame(), Rect::new(150.0, 150.0, 200.0, 200.0));

        tree.hide(a);
        assert!(tree.visible_region_in_window(b).unwrap().is_empty());
    }

    #[test]
    fn hit_prefers_front_sibling_and_deepest_child() {
        let mut tree = Tree::with_root_size(200.0, 200.0);
        let back = add(&mut tree, ContainerId::Root, Rect::new(0.0, 0.0, 100.0, 100.0));
        let inner = add(&mut tree, back.into(), Rect::new(0.0, 0.0, 40.0, 40.0));
        let front = add(&mut tree, ContainerId::Root, Rect::new(50.0, 50.0, 150.0, 150.0));

        let hit = tree.find_item_at(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(hit.node, inner);
        assert_eq!(hit.path, [back, inner]);
        assert_eq!(tree.find_item_at(Point::new(75.0, 75.0)).unwrap().node, front);
        assert_eq!(tree.find_item_at(Point::new(75.0, 20.0)).unwrap().node, back);

        tree.hide(front);
        assert_eq!(tree.find_item_at(Point::new(75.0, 75.0)).unwrap().node, back);
        assert!(tree.find_item_at(Point::new(175.0, 175.0)).is_none());
    }

    #[test]
    fn hit_respects_scroll_origin() {
        let mut tree = Tree::with_root_size(200.0, 200.0);
        let panel = add(&mut tree, ContainerId::Root, Rect::new(0.0, 0.0, 100.0, 100.0));
        let row = add(&mut tree, panel.into(), Rect::new(0.0, 100.0, 100.0, 120.0));
        assert_eq!(tree.find_item_at(Point::new(10.0, 10.0)).unwrap().node, panel);

        tree.scroll_to(panel, Point::new(0.0, 100.0));
        assert_eq!(tree.find_item_at(Point::new(10.0, 10.0)).unwrap().node, row);
    }
}

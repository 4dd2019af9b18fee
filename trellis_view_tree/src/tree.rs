// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node storage, structure, and mutations.

use alloc::vec::Vec;
use trellis_geometry::{Point, PointExt, Rect, Region, Vec2};

use crate::damage::Damage;
use crate::error::TreeError;
use crate::types::{ContainerId, NodeId, ResizingMode, TreeOptions};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// The view tree of one window.
///
/// The tree owns every node. Children are kept per container in an ordered
/// list; the position in that list is the stacking order (index 0 is furthest
/// back). Every mutation keeps each node's cached visible region consistent and
/// records the affected window-space rectangles as [`Damage`].
#[derive(Clone)]
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    pub(crate) root: RootContainer,
    pub(crate) options: TreeOptions,
    focus: Option<NodeId>,
    pub(crate) damage: Damage,
    /// Nesting depth of frame cascades; solving and damage are deferred while non-zero.
    pub(crate) updating: u32,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root_bounds", &self.root.bounds)
            .field("pending_damage", &self.damage.dirty_rects.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RootContainer {
    pub(crate) bounds: Rect,
    pub(crate) children: Vec<NodeId>,
    pub(crate) units_per_pixel: f64,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) container: Option<ContainerId>,
    /// Position in the container's child list.
    pub(crate) index: usize,
    pub(crate) children: Vec<NodeId>,
    pub(crate) frame: Rect,
    pub(crate) resizing_mode: ResizingMode,
    pub(crate) hidden: bool,
    pub(crate) local_origin: Point,
    pub(crate) units_per_pixel: f64,
    /// Cached visible area in the node's local coordinates.
    pub(crate) visible_region: Region,
}

impl Node {
    fn new(generation: u32, frame: Rect, resizing_mode: ResizingMode) -> Self {
        Self {
            generation,
            container: None,
            index: 0,
            children: Vec::new(),
            frame,
            resizing_mode,
            hidden: false,
            local_origin: Point::ZERO,
            units_per_pixel: 1.0,
            visible_region: Region::new(),
        }
    }
}

impl Tree {
    /// Create an empty tree with default options.
    pub fn new() -> Self {
        Self::with_options(TreeOptions::default())
    }

    /// Create an empty tree whose root container is `width` × `height`.
    pub fn with_root_size(width: f64, height: f64) -> Self {
        Self::with_options(TreeOptions {
            root_bounds: Rect::from_size(width, height),
            ..TreeOptions::default()
        })
    }

    /// Create an empty tree with the given options.
    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: RootContainer {
                bounds: options.root_bounds,
                children: Vec::new(),
                units_per_pixel: options.units_per_pixel,
            },
            options,
            focus: None,
            damage: Damage::default(),
            updating: 0,
        }
    }

    /// The options this tree was created with.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    // --- lifecycle ---

    /// Create a detached node with the given frame and resizing mode.
    ///
    /// The node has no visible area until it is attached with [`Tree::add_item`].
    pub fn create_item(&mut self, frame: Rect, resizing_mode: ResizingMode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, frame, resizing_mode));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes
                .push(Some(Node::new(generation, frame, resizing_mode)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Attach `item` to `container` at `index` (`None` appends).
    ///
    /// The item's subtree takes on the container's units-per-pixel.
    /// Indices past the end are clamped. The item and every sibling stacked
    /// behind it are re-solved, and the item's frame is invalidated.
    pub fn add_item(
        &mut self,
        container: ContainerId,
        item: NodeId,
        index: Option<usize>,
    ) -> Result<(), TreeError> {
        self.check_alive(item)?;
        if let ContainerId::Item(parent) = container {
            self.check_alive(parent)?;
            if self.is_ancestor_or_self(item, parent) {
                return Err(TreeError::WouldCreateCycle {
                    node: item,
                    container,
                });
            }
        }
        if self.node(item).container.is_some() {
            return Err(TreeError::AlreadyAttached(item));
        }

        let children = self.children_mut(container);
        let index = index.map_or(children.len(), |i| i.min(children.len()));
        children.insert(index, item);
        self.node_mut(item).container = Some(container);
        self.reindex(container, index);
        tracing::trace!(?item, ?container, index, "attached item");

        if let Some(units_per_pixel) = self.units_per_pixel(container) {
            self.node_mut(item).units_per_pixel = units_per_pixel;
            for id in self.descendants_pre_order(ContainerId::Item(item)) {
                self.node_mut(id).units_per_pixel = units_per_pixel;
            }
        }
        self.resolve_siblings(container, 0, index);
        let frame = self.node(item).frame;
        self.invalidate_in(container, frame);
        Ok(())
    }

    /// Detach `item` from `container`.
    ///
    /// The item's subtree loses its visible area, the siblings that were behind
    /// it are re-solved, and the vacated frame is invalidated.
    pub fn remove_item(&mut self, container: ContainerId, item: NodeId) -> Result<(), TreeError> {
        self.check_alive(item)?;
        if self.node(item).container != Some(container) {
            return Err(TreeError::NotAChild {
                node: item,
                container,
            });
        }
        if self.focus_within(item) {
            tracing::debug!(?item, "clearing focus of removed subtree");
            self.focus = None;
        }

        let (index, frame) = {
            let node = self.node(item);
            (node.index, node.frame)
        };
        // Computed while the container chain is still intact.
        let vacated = self.rect_to_window(container, frame);

        self.children_mut(container).remove(index);
        self.reindex(container, index);
        self.node_mut(item).container = None;
        self.node_mut(item).index = 0;
        tracing::trace!(?item, ?container, index, "detached item");

        self.solve_subtree(item);
        if index > 0 {
            self.resolve_siblings(container, 0, index - 1);
        }
        if let Some(rect) = vacated {
            self.push_damage(rect);
        }
        Ok(())
    }

    /// Detach `item` from whatever container holds it.
    pub fn remove_self(&mut self, item: NodeId) -> Result<(), TreeError> {
        self.check_alive(item)?;
        let container = self
            .node(item)
            .container
            .ok_or(TreeError::NotAttached(item))?;
        self.remove_item(container, item)
    }

    /// Detach `item` if attached, then free it and its whole subtree.
    ///
    /// All identifiers of the subtree become stale.
    pub fn destroy(&mut self, item: NodeId) -> Result<(), TreeError> {
        self.check_alive(item)?;
        if self.node(item).container.is_some() {
            self.remove_self(item)?;
        }
        for id in self.descendants_pre_order(ContainerId::Item(item)) {
            self.free_slot(id);
        }
        self.free_slot(item);
        Ok(())
    }

    fn free_slot(&mut self, id: NodeId) {
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    // --- geometry mutations ---

    /// Move `item` so that its frame's top-left corner is at `point` (container coordinates).
    pub fn move_to(&mut self, item: NodeId, point: Point) {
        if let Some(frame) = self.frame(item) {
            self.apply_frame(item, frame.offset_to(point));
        }
    }

    /// Move `item` by `delta`.
    pub fn move_by(&mut self, item: NodeId, delta: Vec2) {
        if let Some(frame) = self.frame(item) {
            self.apply_frame(item, frame.offset_by(delta));
        }
    }

    /// Resize `item` to `width` × `height`, keeping its top-left corner.
    ///
    /// Children follow according to their [`ResizingMode`].
    pub fn resize_to(&mut self, item: NodeId, width: f64, height: f64) {
        if let Some(frame) = self.frame(item) {
            let resized = Rect::new(
                frame.left,
                frame.top,
                frame.left + width,
                frame.top + height,
            );
            self.apply_frame(item, resized);
        }
    }

    /// Grow `item` by `dw` × `dh`.
    pub fn resize_by(&mut self, item: NodeId, dw: f64, dh: f64) {
        if let Some(frame) = self.frame(item) {
            self.resize_to(item, frame.width() + dw, frame.height() + dh);
        }
    }

    /// Replace `item`'s frame in one step, with a single solve and invalidation.
    pub fn move_and_resize_to(&mut self, item: NodeId, frame: Rect) {
        if self.is_alive(item) {
            self.apply_frame(item, frame);
        }
    }

    /// Scroll `item`'s contents so that local `point` appears at its frame's top-left corner.
    ///
    /// Negative coordinates are clamped to zero. Only the node and its
    /// descendants are re-solved: its own area in the container does not change.
    pub fn scroll_to(&mut self, item: NodeId, point: Point) {
        let point = point.clamp_non_negative();
        let Some(node) = self.node_opt_mut(item) else {
            return;
        };
        if node.local_origin == point {
            return;
        }
        node.local_origin = point;
        let (container, frame) = (node.container, node.frame);
        tracing::trace!(?item, x = point.x, y = point.y, "scrolled");
        self.solve_subtree(item);
        if let Some(container) = container {
            self.invalidate_in(container, frame);
        }
    }

    /// Scroll `item` by `delta`.
    pub fn scroll_by(&mut self, item: NodeId, delta: Vec2) {
        if let Some(origin) = self.local_origin(item) {
            self.scroll_to(item, origin + delta);
        }
    }

    /// Make `item` visible again.
    pub fn show(&mut self, item: NodeId) {
        self.set_hidden(item, false);
    }

    /// Hide `item` and its subtree.
    ///
    /// Focus inside the subtree is cleared before any geometry changes.
    pub fn hide(&mut self, item: NodeId) {
        if self.is_alive(item) && !self.node(item).hidden && self.focus_within(item) {
            tracing::debug!(?item, "clearing focus of hidden subtree");
            self.focus = None;
        }
        self.set_hidden(item, true);
    }

    fn set_hidden(&mut self, item: NodeId, hidden: bool) {
        let Some(node) = self.node_opt_mut(item) else {
            return;
        };
        if node.hidden == hidden {
            return;
        }
        node.hidden = hidden;
        let (container, index, frame) = (node.container, node.index, node.frame);
        if let Some(container) = container {
            self.resolve_siblings(container, 0, index);
            self.invalidate_in(container, frame);
        }
    }

    /// Change how `item` follows its container's resizes. No geometry changes.
    pub fn set_resizing_mode(&mut self, item: NodeId, mode: ResizingMode) {
        if let Some(node) = self.node_opt_mut(item) {
            node.resizing_mode = mode;
        }
    }

    /// Set the units-per-pixel of `container`, and of all its descendants when `deep`.
    ///
    /// Every node under the container is re-solved afterwards and the
    /// container's area is invalidated. Non-positive or non-finite values are ignored.
    pub fn set_units_per_pixel(&mut self, container: ContainerId, value: f64, deep: bool) {
        if !(value.is_finite() && value > 0.0) {
            tracing::debug!(value, "ignoring invalid units-per-pixel");
            return;
        }
        match container {
            ContainerId::Root => self.root.units_per_pixel = value,
            ContainerId::Item(id) => match self.node_opt_mut(id) {
                Some(node) => node.units_per_pixel = value,
                None => return,
            },
        }
        if deep {
            for id in self.descendants_pre_order(container) {
                self.node_mut(id).units_per_pixel = value;
            }
        }

        match container {
            ContainerId::Root => {
                let count = self.root.children.len();
                if count > 0 {
                    self.resolve_siblings(ContainerId::Root, 0, count - 1);
                }
                let bounds = self.root.bounds;
                self.push_damage(bounds);
            }
            ContainerId::Item(id) => {
                self.solve_subtree(id);
                let node = self.node(id);
                if let Some(parent) = node.container {
                    let frame = node.frame;
                    self.invalidate_in(parent, frame);
                }
            }
        }
    }

    // --- stacking order ---

    /// Restack `item` directly behind `sibling`.
    pub fn send_behind(&mut self, item: NodeId, sibling: NodeId) -> Result<(), TreeError> {
        self.check_alive(item)?;
        self.check_alive(sibling)?;
        let container = self
            .node(item)
            .container
            .ok_or(TreeError::NotAttached(item))?;
        if self.node(sibling).container != Some(container) || item == sibling {
            return Err(TreeError::NotSiblings(item, sibling));
        }
        let from = self.node(item).index;
        let target = self.node(sibling).index;
        // Removing `item` first shifts the sibling down when it sat above.
        let to = if from < target { target - 1 } else { target };
        self.restack(container, from, to);
        Ok(())
    }

    /// Restack `item` above all of its siblings.
    pub fn bring_to_front(&mut self, item: NodeId) -> Result<(), TreeError> {
        self.check_alive(item)?;
        let container = self
            .node(item)
            .container
            .ok_or(TreeError::NotAttached(item))?;
        let last = self.children(container).len() - 1;
        let from = self.node(item).index;
        self.restack(container, from, last);
        Ok(())
    }

    /// Restack `item` behind all of its siblings.
    pub fn send_to_back(&mut self, item: NodeId) -> Result<(), TreeError> {
        self.check_alive(item)?;
        let container = self
            .node(item)
            .container
            .ok_or(TreeError::NotAttached(item))?;
        let from = self.node(item).index;
        self.restack(container, from, 0);
        Ok(())
    }

    fn restack(&mut self, container: ContainerId, from: usize, to: usize) {
        if from == to {
            return;
        }
        let children = self.children_mut(container);
        let item = children.remove(from);
        children.insert(to, item);
        let (lo, hi) = (from.min(to), from.max(to));
        self.reindex(container, lo);
        tracing::trace!(?item, from, to, "restacked");
        // Only nodes inside the moved span see a different set of occluders.
        self.resolve_siblings(container, lo, hi);
        let frame = self.node(item).frame;
        self.invalidate_in(container, frame);
    }

    // --- focus ---

    /// Give focus to `item` (or clear it with `None`). Stale ids clear focus.
    pub fn set_focus(&mut self, item: Option<NodeId>) {
        self.focus = item.filter(|id| self.is_alive(*id));
    }

    /// The focused node, if any.
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    fn focus_within(&self, item: NodeId) -> bool {
        self.focus
            .is_some_and(|focus| self.is_ancestor_or_self(item, focus))
    }

    // --- queries ---

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Number of live nodes, attached or not.
    pub fn count_items(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Bounds of the root container in window space.
    pub fn root_bounds(&self) -> Rect {
        self.root.bounds
    }

    /// Children of `container` from back to front. Empty for stale ids.
    pub fn children(&self, container: ContainerId) -> &[NodeId] {
        match container {
            ContainerId::Root => &self.root.children,
            ContainerId::Item(id) => self
                .node_opt(id)
                .map(|n| n.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    /// The container holding `item`.
    pub fn container_of(&self, item: NodeId) -> Option<ContainerId> {
        self.node_opt(item)?.container
    }

    /// Stacking position of `item` within its container.
    pub fn index_of(&self, item: NodeId) -> Option<usize> {
        let node = self.node_opt(item)?;
        node.container.map(|_| node.index)
    }

    /// Frame of `item` in its container's coordinates.
    pub fn frame(&self, item: NodeId) -> Option<Rect> {
        self.node_opt(item).map(|n| n.frame)
    }

    /// The area of `item` in its own coordinates: its size placed at its scroll origin.
    pub fn bounds(&self, item: NodeId) -> Option<Rect> {
        self.node_opt(item)
            .map(|n| Rect::from_origin_size(n.local_origin, n.frame.size()))
    }

    /// Scroll offset of `item`.
    pub fn local_origin(&self, item: NodeId) -> Option<Point> {
        self.node_opt(item).map(|n| n.local_origin)
    }

    /// Resizing mode of `item`.
    pub fn resizing_mode(&self, item: NodeId) -> Option<ResizingMode> {
        self.node_opt(item).map(|n| n.resizing_mode)
    }

    /// Whether `item` itself is hidden.
    pub fn is_hidden(&self, item: NodeId) -> Option<bool> {
        self.node_opt(item).map(|n| n.hidden)
    }

    /// Whether `item` or any of its ancestors is hidden, or it is not attached to the root.
    pub fn is_hidden_effectively(&self, item: NodeId) -> bool {
        let mut current = item;
        loop {
            let Some(node) = self.node_opt(current) else {
                return true;
            };
            if node.hidden {
                return true;
            }
            match node.container {
                Some(ContainerId::Root) => return false,
                Some(ContainerId::Item(parent)) => current = parent,
                None => return true,
            }
        }
    }

    /// Units-per-pixel of `container`.
    pub fn units_per_pixel(&self, container: ContainerId) -> Option<f64> {
        match container {
            ContainerId::Root => Some(self.root.units_per_pixel),
            ContainerId::Item(id) => self.node_opt(id).map(|n| n.units_per_pixel),
        }
    }

    /// Cached visible region of `item` in its own coordinates.
    pub fn visible_region(&self, item: NodeId) -> Option<&Region> {
        self.node_opt(item).map(|n| &n.visible_region)
    }

    /// All nodes below `container` in pre-order, children from back to front.
    ///
    /// This is painting order: every node precedes its children, and a node's
    /// children precede its later siblings.
    pub fn descendants_pre_order(&self, container: ContainerId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(container).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    // --- damage ---

    /// Invalidate `rect` given in `item`'s local coordinates.
    ///
    /// The rectangle is clipped to the item's visible region bounds, so
    /// invalidating hidden or detached items records nothing.
    pub fn invalidate(&mut self, item: NodeId, rect: Rect) {
        let Some(node) = self.node_opt(item) else {
            return;
        };
        let clipped = rect & node.visible_region.frame();
        if let Some(window) = self.rect_to_window(ContainerId::Item(item), clipped) {
            self.push_damage(window);
        }
    }

    /// Drain the damage recorded since the last call.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    /// Record `rect`, given in `container` coordinates, as damaged.
    pub(crate) fn invalidate_in(&mut self, container: ContainerId, rect: Rect) {
        if self.updating > 0 {
            return;
        }
        if let Some(window) = self.rect_to_window(container, rect) {
            self.push_damage(window);
        }
    }

    fn push_damage(&mut self, rect: Rect) {
        if self.updating > 0 || !rect.has_area() {
            return;
        }
        tracing::trace!(
            left = rect.left,
            top = rect.top,
            right = rect.right,
            bottom = rect.bottom,
            "damage"
        );
        self.damage.push(rect);
    }

    // --- internals ---

    fn check_alive(&self, id: NodeId) -> Result<(), TreeError> {
        if self.is_alive(id) {
            Ok(())
        } else {
            tracing::debug!(?id, "rejected operation on stale node");
            Err(TreeError::StaleNode(id))
        }
    }

    /// Whether `ancestor` is `node` or lies on `node`'s container chain.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = match self.node_opt(id).and_then(|n| n.container) {
                Some(ContainerId::Item(parent)) => Some(parent),
                _ => None,
            };
        }
        false
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn children_mut(&mut self, container: ContainerId) -> &mut Vec<NodeId> {
        match container {
            ContainerId::Root => &mut self.root.children,
            ContainerId::Item(id) => &mut self.node_mut(id).children,
        }
    }

    /// Refresh the stored index of every child of `container` from `start` on.
    fn reindex(&mut self, container: ContainerId, start: usize) {
        let children: Vec<NodeId> = self.children(container)[start..].to_vec();
        for (offset, id) in children.into_iter().enumerate() {
            self.node_mut(id).index = start + offset;
        }
    }
}

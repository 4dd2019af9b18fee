// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: identifiers, containers, resizing modes, and options.

use alloc::vec::Vec;
use trellis_geometry::Rect;

/// Identifier for a node (layout item) in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On destroy, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A layout container: either the window's root or a node holding children.
///
/// Children refer to their container through this handle. It never owns the
/// container; ownership flows from containers to children only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContainerId {
    /// The top-level container of the tree. Its coordinate space is window space.
    Root,
    /// A node acting as a container for its children.
    Item(NodeId),
}

impl From<NodeId> for ContainerId {
    fn from(id: NodeId) -> Self {
        Self::Item(id)
    }
}

bitflags::bitflags! {
    /// How a node's frame follows its container when the container is resized.
    ///
    /// Each axis is evaluated independently:
    ///
    /// | Flags on an axis             | Effect on that axis                          |
    /// |------------------------------|----------------------------------------------|
    /// | none, or `LEFT`/`TOP` only   | frame unchanged                              |
    /// | `LEFT \| RIGHT`              | far edge moves, size tracks the container    |
    /// | `RIGHT` only                 | both edges move by the full delta            |
    /// | `H_CENTER` only              | both edges move by half the delta            |
    /// | `H_CENTER \| LEFT`           | far edge moves by half the delta             |
    /// | `H_CENTER \| RIGHT`          | near edge moves by half, far edge by full    |
    ///
    /// The vertical axis uses `TOP`, `BOTTOM`, and `V_CENTER` the same way.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ResizingMode: u8 {
        /// Left edge keeps its distance to the container's left edge.
        const LEFT     = 0b0000_0001;
        /// Top edge keeps its distance to the container's top edge.
        const TOP      = 0b0000_0010;
        /// Right edge keeps its distance to the container's right edge.
        const RIGHT    = 0b0000_0100;
        /// Bottom edge keeps its distance to the container's bottom edge.
        const BOTTOM   = 0b0000_1000;
        /// Horizontal center follows the container's horizontal center.
        const H_CENTER = 0b0001_0000;
        /// Vertical center follows the container's vertical center.
        const V_CENTER = 0b0010_0000;
    }
}

impl ResizingMode {
    /// Frame never follows the container.
    pub const NONE: Self = Self::empty();
    /// Follow all four edges: the frame stretches with the container.
    pub const ALL: Self = Self::LEFT
        .union(Self::TOP)
        .union(Self::RIGHT)
        .union(Self::BOTTOM);
    /// Anchored to the top-left corner (the default).
    pub const LEFT_TOP: Self = Self::LEFT.union(Self::TOP);
}

impl Default for ResizingMode {
    fn default() -> Self {
        Self::LEFT_TOP
    }
}

/// Extra area around an occluding sibling's frame that is also treated as covered.
///
/// Occluders are outset by this margin before being subtracted from the
/// visible region of the siblings behind them.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum OcclusionMargin {
    /// Occluders cover exactly their frame.
    None,
    /// Occluders are outset by the container's units-per-pixel (one device pixel).
    #[default]
    UnitsPerPixel,
    /// Occluders are outset by a fixed amount in container units.
    Fixed(f64),
}

/// Construction options for a [`Tree`](crate::Tree).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeOptions {
    /// Bounds of the root container in window space.
    pub root_bounds: Rect,
    /// Initial units-per-pixel of the root container.
    pub units_per_pixel: f64,
    /// How much occluding siblings are outset before subtraction.
    pub occlusion_margin: OcclusionMargin,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root_bounds: Rect::from_size(0.0, 0.0),
            units_per_pixel: 1.0,
            occlusion_margin: OcclusionMargin::default(),
        }
    }
}

/// Result of [`Tree::find_item_at`](crate::Tree::find_item_at).
#[derive(Clone, Debug)]
pub struct Hit {
    /// The deepest, topmost node containing the point.
    pub node: NodeId,
    /// Path from the outermost node to `node` (inclusive).
    pub path: Vec<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resizing_mode_constants() {
        assert!(ResizingMode::NONE.is_empty());
        assert_eq!(ResizingMode::default(), ResizingMode::LEFT | ResizingMode::TOP);
        assert!(ResizingMode::ALL.contains(ResizingMode::RIGHT | ResizingMode::BOTTOM));
        assert!(!ResizingMode::ALL.intersects(ResizingMode::H_CENTER | ResizingMode::V_CENTER));
    }

    #[test]
    fn container_from_node() {
        let id = NodeId::new(3, 1);
        assert_eq!(ContainerId::from(id), ContainerId::Item(id));
    }
}

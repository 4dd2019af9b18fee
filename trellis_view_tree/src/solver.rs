// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-region solver.
//!
//! A node's visible region is its frame, clipped to its container's visible
//! region, minus the frames of the visible siblings stacked above it, expressed
//! in the node's local coordinates. Children depend on their container's
//! freshly computed region, so every solve continues into the subtree.

use alloc::vec::Vec;
use trellis_geometry::Region;

use crate::tree::Tree;
use crate::types::{ContainerId, NodeId, OcclusionMargin};

impl Tree {
    /// Re-solve the children of `container` in `first..=last`, each with its subtree.
    ///
    /// Skipped while a frame cascade is running; the cascade solves once at the end.
    pub(crate) fn resolve_siblings(&mut self, container: ContainerId, first: usize, last: usize) {
        if self.updating > 0 {
            return;
        }
        let children = self.children(container);
        let last = last.min(children.len().saturating_sub(1));
        if children.is_empty() || first > last {
            return;
        }
        let ids: Vec<NodeId> = children[first..=last].to_vec();
        for id in ids {
            self.solve_subtree(id);
        }
    }

    /// Recompute the visible region of `id` and of its whole subtree.
    pub(crate) fn solve_subtree(&mut self, id: NodeId) {
        if self.updating > 0 {
            return;
        }
        // Parents before children, so each child clips against a fresh region.
        let mut stack = Vec::from([id]);
        while let Some(current) = stack.pop() {
            let region = self.compute_visible_region(current);
            let node = self.node_mut(current);
            tracing::trace!(
                node = ?current,
                rects = region.count_rects(),
                "solved visible region"
            );
            node.visible_region = region;
            stack.extend(node.children.iter().copied());
        }
    }

    fn compute_visible_region(&self, id: NodeId) -> Region {
        let node = self.node(id);
        let Some(container) = node.container else {
            return Region::new();
        };
        if node.hidden || !node.frame.has_area() {
            return Region::new();
        }

        let mut region = match container {
            ContainerId::Root => Region::from_rect(node.frame),
            ContainerId::Item(parent) => {
                let mut clip = self.node(parent).visible_region.clone();
                clip.intersect_rect(node.frame);
                clip
            }
        };

        let margin = self.occlusion_margin(container);
        for &sibling in &self.children(container)[node.index + 1..] {
            if region.is_empty() {
                break;
            }
            let s = self.node(sibling);
            if s.hidden || !s.frame.has_area() {
                continue;
            }
            region.exclude(s.frame.inset_by(-margin, -margin));
        }

        region.offset_by(node.local_origin - node.frame.left_top());
        region
    }

    fn occlusion_margin(&self, container: ContainerId) -> f64 {
        match self.options.occlusion_margin {
            OcclusionMargin::None => 0.0,
            OcclusionMargin::Fixed(margin) => margin,
            OcclusionMargin::UnitsPerPixel => self.units_per_pixel(container).unwrap_or(1.0),
        }
    }
}

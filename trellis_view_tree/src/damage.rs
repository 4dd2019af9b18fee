// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage recorded by tree mutations.

use alloc::vec::Vec;
use trellis_geometry::Rect;

/// Window-space rectangles invalidated by tree mutations.
///
/// Drained with [`Tree::take_damage`](crate::Tree::take_damage). Rectangles may
/// overlap and are not deduplicated; the consumer decides how to merge them.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Window-space rectangles that should be repainted.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// True if nothing was invalidated.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    /// Returns the union of all damage rects, or [`Rect::INVALID`] when empty.
    pub fn union_rect(&self) -> Rect {
        self.dirty_rects
            .iter()
            .fold(Rect::INVALID, |acc, r| acc | *r)
    }

    pub(crate) fn push(&mut self, rect: Rect) {
        if rect.has_area() {
            self.dirty_rects.push(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_starts_invalid_and_skips_empty_pushes() {
        let mut d = Damage::default();
        assert!(d.is_empty());
        assert!(!d.union_rect().is_valid());
        d.push(Rect::INVALID);
        d.push(Rect::new(10.0, 0.0, 10.0, 10.0));
        assert!(d.is_empty());
        d.push(Rect::new(0.0, 0.0, 10.0, 10.0));
        d.push(Rect::new(20.0, 5.0, 30.0, 6.0));
        assert_eq!(d.union_rect(), Rect::new(0.0, 0.0, 30.0, 10.0));
    }
}

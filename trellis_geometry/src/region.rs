// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbitrary areas stored as canonical, non-overlapping rectangle bands.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::Rect;

/// A possibly disjoint area made of non-overlapping rectangles.
///
/// The rectangles are kept in a canonical y-x banded form:
/// - the area is cut into horizontal bands at every distinct top/bottom edge;
/// - inside a band, touching or overlapping spans are merged;
/// - vertically adjacent bands with identical spans are merged.
///
/// Rectangles are ordered by band (top to bottom), then left to right, and every
/// stored rectangle has a positive area. Because the form is canonical, two
/// regions covering the same area compare equal with `==`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    /// Create an empty region.
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Create a region covering `rect` (empty if `rect` has no area).
    pub fn from_rect(rect: Rect) -> Self {
        let mut rects = Vec::new();
        if rect.has_area() {
            rects.push(rect);
        }
        Self { rects }
    }

    /// True when the region covers no area.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Remove everything from the region.
    pub fn make_empty(&mut self) {
        self.rects.clear();
    }

    /// The stored rectangles in band order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Number of stored rectangles.
    pub fn count_rects(&self) -> usize {
        self.rects.len()
    }

    /// Minimal bounding rectangle, or [`Rect::INVALID`] when empty.
    pub fn frame(&self) -> Rect {
        self.rects
            .iter()
            .fold(Rect::INVALID, |acc, r| acc.union(*r))
    }

    /// Total covered area.
    pub fn area(&self) -> f64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Whether `point` lies inside the region (rectangle edges inclusive).
    pub fn contains_point(&self, point: Point) -> bool {
        self.rects.iter().any(|r| r.contains_point(point))
    }

    /// Whether the region shares a positive area with `rect`.
    pub fn intersects(&self, rect: Rect) -> bool {
        rect.has_area() && self.rects.iter().any(|r| r.intersects(rect))
    }

    /// Add `rect` to the region.
    pub fn include(&mut self, rect: Rect) {
        if !rect.has_area() {
            return;
        }
        if self.rects.is_empty() {
            self.rects.push(rect);
            return;
        }
        if self.rects.iter().any(|r| r.contains_rect(rect)) {
            return;
        }
        self.rects.push(rect);
        self.rects = normalize(&self.rects);
    }

    /// Add every rectangle of `other` to the region.
    pub fn include_region(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.rects.clone_from(&other.rects);
            return;
        }
        self.rects.extend_from_slice(&other.rects);
        self.rects = normalize(&self.rects);
    }

    /// Remove `rect` from the region.
    pub fn exclude(&mut self, rect: Rect) {
        if !rect.has_area() || !self.intersects(rect) {
            return;
        }
        let mut pieces = Vec::with_capacity(self.rects.len() + 4);
        for r in &self.rects {
            subtract_into(*r, rect, &mut pieces);
        }
        self.rects = normalize(&pieces);
    }

    /// Remove every rectangle of `other` from the region.
    pub fn exclude_region(&mut self, other: &Self) {
        let frame = self.frame();
        let mut pieces = self.rects.clone();
        let mut touched = false;
        for cut in other.rects.iter().filter(|c| c.intersects(frame)) {
            touched = true;
            let mut next = Vec::with_capacity(pieces.len() + 4);
            for r in &pieces {
                subtract_into(*r, *cut, &mut next);
            }
            pieces = next;
        }
        if touched {
            self.rects = normalize(&pieces);
        }
    }

    /// Keep only the part of the region inside `rect`.
    pub fn intersect_rect(&mut self, rect: Rect) {
        if !rect.has_area() {
            self.rects.clear();
            return;
        }
        if rect.contains_rect(self.frame()) {
            return;
        }
        let clipped: Vec<Rect> = self
            .rects
            .iter()
            .map(|r| r.intersect(rect))
            .filter(Rect::has_area)
            .collect();
        self.rects = normalize(&clipped);
    }

    /// Keep only the part of the region also covered by `other`.
    pub fn intersect_region(&mut self, other: &Self) {
        if self == other {
            return;
        }
        let mut clipped = Vec::new();
        for a in &self.rects {
            for b in &other.rects {
                let r = a.intersect(*b);
                if r.has_area() {
                    clipped.push(r);
                }
            }
        }
        self.rects = normalize(&clipped);
    }

    /// Translate every rectangle by `delta`.
    pub fn offset_by(&mut self, delta: Vec2) {
        for r in &mut self.rects {
            *r = r.offset_by(delta);
        }
    }

    /// Scale every coordinate by `(sx, sy)` around the origin.
    ///
    /// Negative factors mirror the region; zero factors empty it.
    pub fn scale_by(&mut self, sx: f64, sy: f64) {
        let scaled: Vec<Rect> = self
            .rects
            .iter()
            .map(|r| {
                let (l, rr) = ordered(r.left * sx, r.right * sx);
                let (t, b) = ordered(r.top * sy, r.bottom * sy);
                Rect::new(l, t, rr, b)
            })
            .filter(Rect::has_area)
            .collect();
        self.rects = normalize(&scaled);
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl FromIterator<Rect> for Region {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        let rects: Vec<Rect> = iter.into_iter().filter(Rect::has_area).collect();
        Self {
            rects: normalize(&rects),
        }
    }
}

impl Extend<Rect> for Region {
    fn extend<I: IntoIterator<Item = Rect>>(&mut self, iter: I) {
        self.rects.extend(iter.into_iter().filter(Rect::has_area));
        self.rects = normalize(&self.rects);
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Push the parts of `r` not covered by `cut` (at most four rectangles).
fn subtract_into(r: Rect, cut: Rect, out: &mut Vec<Rect>) {
    let overlap = r.intersect(cut);
    if !overlap.has_area() {
        out.push(r);
        return;
    }
    let above = Rect::new(r.left, r.top, r.right, overlap.top);
    let below = Rect::new(r.left, overlap.bottom, r.right, r.bottom);
    let left = Rect::new(r.left, overlap.top, overlap.left, overlap.bottom);
    let right = Rect::new(overlap.right, overlap.top, r.right, overlap.bottom);
    out.extend([above, left, right, below].into_iter().filter(Rect::has_area));
}

/// Rebuild the canonical banded form for an arbitrary (possibly overlapping) set.
fn normalize(input: &[Rect]) -> Vec<Rect> {
    let mut edges: Vec<f64> = Vec::with_capacity(input.len() * 2);
    for r in input.iter().filter(|r| r.has_area()) {
        edges.push(r.top);
        edges.push(r.bottom);
    }
    edges.sort_by(f64::total_cmp);
    edges.dedup();

    let mut out: Vec<Rect> = Vec::new();
    // Spans of the previously emitted band and the index of its first rect in `out`.
    let mut prev: Option<(f64, usize)> = None;
    let mut prev_spans: Vec<(f64, f64)> = Vec::new();
    let mut spans: Vec<(f64, f64)> = Vec::new();

    for band in edges.windows(2) {
        let (y0, y1) = (band[0], band[1]);
        spans.clear();
        spans.extend(
            input
                .iter()
                .filter(|r| r.has_area() && r.top <= y0 && r.bottom >= y1)
                .map(|r| (r.left, r.right)),
        );
        if spans.is_empty() {
            prev = None;
            continue;
        }
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut merged = 0;
        for i in 1..spans.len() {
            if spans[i].0 <= spans[merged].1 {
                spans[merged].1 = spans[merged].1.max(spans[i].1);
            } else {
                merged += 1;
                spans[merged] = spans[i];
            }
        }
        spans.truncate(merged + 1);

        match prev {
            Some((bottom, start)) if bottom == y0 && prev_spans == spans => {
                for r in &mut out[start..] {
                    r.bottom = y1;
                }
                prev = Some((y1, start));
            }
            _ => {
                let start = out.len();
                out.extend(spans.iter().map(|&(l, r)| Rect::new(l, y0, r, y1)));
                prev = Some((y1, start));
                prev_spans.clone_from(&spans);
            }
        }
    }
    out
}

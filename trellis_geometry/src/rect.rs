// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-based rectangles where an inverted rectangle means "no area".

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use kurbo::{Point, Size, Vec2};

/// Axis-aligned rectangle described by its four edges.
///
/// A rectangle is *valid* when `left <= right` and `top <= bottom`.
/// An invalid rectangle covers nothing: it is the identity for union (`|`)
/// and the absorbing element for intersection (`&`).
/// [`Rect::INVALID`] is the canonical empty value.
///
/// Valid rectangles may still have zero width or height; such rectangles
/// have no area and never contribute to a [`Region`](crate::Region).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Default for Rect {
    fn default() -> Self {
        Self::INVALID
    }
}

impl Rect {
    /// The canonical invalid (empty) rectangle.
    pub const INVALID: Self = Self {
        left: 0.0,
        top: 0.0,
        right: -1.0,
        bottom: -1.0,
    };

    /// Create a rectangle from its edges.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Create a rectangle with its top-left corner at the origin.
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Whether `left <= right && top <= bottom`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Whether the rectangle covers a positive area.
    #[inline]
    pub fn has_area(&self) -> bool {
        self.left < self.right && self.top < self.bottom
    }

    /// Horizontal extent. Meaningless for invalid rectangles.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent. Meaningless for invalid rectangles.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Width and height as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Covered area, or zero when invalid.
    pub fn area(&self) -> f64 {
        if self.has_area() {
            self.width() * self.height()
        } else {
            0.0
        }
    }

    /// Top-left corner.
    #[inline]
    pub fn left_top(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Bottom-right corner.
    #[inline]
    pub fn right_bottom(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.left + self.right),
            0.5 * (self.top + self.bottom),
        )
    }

    /// Move all four edges inward by `dx` horizontally and `dy` vertically.
    ///
    /// Negative values grow the rectangle.
    pub fn inset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right - dx,
            self.bottom - dy,
        )
    }

    /// Translate by `delta`.
    pub fn offset_by(&self, delta: Vec2) -> Self {
        Self::new(
            self.left + delta.x,
            self.top + delta.y,
            self.right + delta.x,
            self.bottom + delta.y,
        )
    }

    /// Translate so that the top-left corner lands on `point`.
    pub fn offset_to(&self, point: Point) -> Self {
        self.offset_by(point - self.left_top())
    }

    /// Smallest rectangle covering both; invalid inputs are ignored.
    pub fn union(&self, other: Self) -> Self {
        match (self.is_valid(), other.is_valid()) {
            (false, _) => other,
            (true, false) => *self,
            (true, true) => Self::new(
                self.left.min(other.left),
                self.top.min(other.top),
                self.right.max(other.right),
                self.bottom.max(other.bottom),
            ),
        }
    }

    /// Overlap of both rectangles; invalid when either is invalid or they are disjoint.
    pub fn intersect(&self, other: Self) -> Self {
        if !self.is_valid() || !other.is_valid() {
            return Self::INVALID;
        }
        let r = Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_valid() { r } else { Self::INVALID }
    }

    /// Whether the two rectangles share a positive area.
    pub fn intersects(&self, other: Self) -> bool {
        self.intersect(other).has_area()
    }

    /// Whether `point` lies inside the rectangle (edges inclusive).
    pub fn contains_point(&self, point: Point) -> bool {
        self.is_valid()
            && point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    /// Whether `other` lies entirely inside this rectangle.
    ///
    /// An invalid `other` is contained by everything valid.
    pub fn contains_rect(&self, other: Self) -> bool {
        if !self.is_valid() {
            return false;
        }
        if !other.is_valid() {
            return true;
        }
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Round every edge down to an integer.
    pub fn floor(&self) -> Self {
        Self::from_kurbo_raw(self.to_kurbo_raw().floor())
    }

    /// Round every edge up to an integer.
    pub fn ceil(&self) -> Self {
        Self::from_kurbo_raw(self.to_kurbo_raw().ceil())
    }

    /// Round every edge to the nearest integer.
    pub fn round(&self) -> Self {
        Self::from_kurbo_raw(self.to_kurbo_raw().round())
    }

    /// Snap outward to the pixel grid: floor `left`/`top`, ceil `right`/`bottom`.
    pub fn snap_out(&self) -> Self {
        if !self.is_valid() {
            return *self;
        }
        let lt = self.left_top().floor();
        let rb = self.right_bottom().ceil();
        Self::new(lt.x, lt.y, rb.x, rb.y)
    }

    /// Convert to a normalized [`kurbo::Rect`]; `None` when invalid.
    pub fn to_kurbo(&self) -> Option<kurbo::Rect> {
        self.is_valid().then(|| self.to_kurbo_raw())
    }

    // kurbo's rounding helpers work per coordinate and keep edge order, so
    // they are safe to use on invalid rectangles too.
    fn to_kurbo_raw(self) -> kurbo::Rect {
        kurbo::Rect::new(self.left, self.top, self.right, self.bottom)
    }

    fn from_kurbo_raw(r: kurbo::Rect) -> Self {
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Self::from_kurbo_raw(r)
    }
}

impl BitOr for Rect {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Rect {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for Rect {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl BitAndAssign for Rect {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersect(rhs);
    }
}

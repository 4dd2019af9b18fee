// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point helpers on top of [`kurbo::Point`].

use kurbo::Point;

use crate::Rect;

/// Extra operations for [`kurbo::Point`] used by the compositing core.
///
/// Rounding (`floor`, `ceil`, `round`) and arithmetic with [`kurbo::Vec2`]
/// come from kurbo itself.
pub trait PointExt {
    /// Clamp the point into `rect`. Invalid rectangles leave the point untouched.
    fn constrain_to(self, rect: Rect) -> Point;

    /// Clamp both coordinates to be non-negative.
    fn clamp_non_negative(self) -> Point;
}

impl PointExt for Point {
    fn constrain_to(self, rect: Rect) -> Point {
        if !rect.is_valid() {
            return self;
        }
        Point::new(
            self.x.clamp(rect.left, rect.right),
            self.y.clamp(rect.top, rect.bottom),
        )
    }

    fn clamp_non_negative(self) -> Point {
        Point::new(self.x.max(0.0), self.y.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_to_rect() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(Point::new(-5.0, 25.0).constrain_to(r), Point::new(0.0, 20.0));
        assert_eq!(Point::new(3.0, 4.0).constrain_to(r), Point::new(3.0, 4.0));
        assert_eq!(
            Point::new(-5.0, 25.0).constrain_to(Rect::INVALID),
            Point::new(-5.0, 25.0)
        );
    }

    #[test]
    fn non_negative() {
        assert_eq!(
            Point::new(-1.0, 7.5).clamp_non_negative(),
            Point::new(0.0, 7.5)
        );
    }
}

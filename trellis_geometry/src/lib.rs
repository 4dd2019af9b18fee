// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_geometry --heading-base-level=0

//! Trellis Geometry: rectangles and rectangle regions for view compositing.
//!
//! This crate holds the value types the rest of Trellis computes with.
//!
//! - [`Rect`]: an edge-based rectangle where an inverted rectangle means "no area".
//!   Invalid rectangles are the identity for union (`|`) and absorb intersection (`&`),
//!   which keeps damage accumulation free of special cases.
//! - [`Region`]: an arbitrary, possibly disjoint area stored as canonical,
//!   non-overlapping rectangle bands, with include/exclude/intersect algebra.
//! - [`PointExt`]: clamping helpers for [`kurbo::Point`].
//!
//! Points and vectors are plain [`kurbo::Point`] and [`kurbo::Vec2`]; this crate
//! re-exports them so downstream crates can stay on one geometry vocabulary.
//!
//! ## Float semantics
//!
//! Coordinates are assumed finite (no NaNs). Regions compare edges exactly, so
//! regions built from the same edges compare equal regardless of construction order.
//!
//! # Example
//!
//! ```rust
//! use trellis_geometry::{Rect, Region};
//!
//! let a = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let b = Rect::new(50.0, 50.0, 150.0, 150.0);
//!
//! // Rect algebra: invalid is the identity for union.
//! assert_eq!(Rect::INVALID | a, a);
//! assert_eq!(a & b, Rect::new(50.0, 50.0, 100.0, 100.0));
//!
//! // `a` with `b` on top of it leaves an L-shaped area.
//! let mut visible = Region::from_rect(a);
//! visible.exclude(b);
//! assert_eq!(visible.area(), 7500.0);
//! assert_eq!(visible.frame(), a);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod point;
mod rect;
mod region;

pub use kurbo::{Point, Size, Vec2};
pub use point::PointExt;
pub use rect::Rect;
pub use region::Region;

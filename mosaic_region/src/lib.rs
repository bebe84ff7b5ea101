// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=mosaic_region --heading-base-level=0

//! Mosaic Region: exact region algebra for unions of axis-aligned rectangles.
//!
//! A [`Region`] is a piecewise-constant field over the plane stored as a sorted list of
//! signed [`Vertex`] corners. The value at a point is the sum of the weights of every
//! vertex to its lower left, so a rectangle is four corners weighted `+1, -1, -1, +1`.
//! This makes sums exact and cheap (a merge of two sorted lists) and lets every other
//! operation be phrased as a scan over horizontal scanlines.
//!
//! - [`Region::add`], [`Region::scale`] and [`Region::transform`] combine and reshape
//!   fields. Boolean union is `transform` with a `w > 0` threshold.
//! - [`Region::rectangles`] decomposes a field into disjoint [`WeightedRect`]s, and
//!   [`Region::rect_index`] feeds the positive ones to a
//!   [`mosaic_index::RectIndex`] for point and overlap queries.
//! - [`morph`] provides dilation, erosion and closing by a square.
//!
//! Coordinates are [`kurbo`] points and rectangles.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use mosaic_index::Aabb2D;
//! use mosaic_region::{Region, morph};
//!
//! let bar = Region::from_rect(Rect::new(0.0, 0.0, 30.0, 10.0));
//! let post = Region::from_rect(Rect::new(0.0, 10.0, 10.0, 30.0));
//! let l_shape = morph::union(&bar, &post);
//! assert_eq!(l_shape.value(Point::new(5.0, 25.0)), 1.0);
//! assert_eq!(l_shape.value(Point::new(20.0, 20.0)), 0.0);
//!
//! // Two disjoint pieces cover it.
//! assert_eq!(l_shape.rectangles().len(), 2);
//!
//! let index = l_shape.rect_index();
//! assert!(!index.overlaps(&Aabb2D::new(10.0, 10.0, 20.0, 20.0)));
//! ```
//!
//! ### Float semantics
//!
//! Vertices with exactly equal coordinates are merged; nothing is snapped. Sums,
//! scaling by `-1` and thresholds are exact. Dilation and erosion move coordinates by
//! `+d` and `-d`, and `(x + d) - d` need not round back to `x`, so a dilate/erode pair
//! can shift edges by a few ulps. [`morph::close`] folds its input back in, so a closed
//! region always covers the original. NaN coordinates are not supported.
//!
//! This crate is `no_std` and uses `alloc`. Enable either the `std` (default) or the
//! `libm` feature to select Kurbo's float backend.

#![no_std]

extern crate alloc;

pub mod morph;
mod profile;
pub mod vertex;
pub mod vlist;

pub use vertex::{Vertex, WeightedRect};
pub use vlist::Region;

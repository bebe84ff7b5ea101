// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=mosaic_index --heading-base-level=0

//! Mosaic Index: interval and rectangle indexing for region queries.
//!
//! Mosaic Index is the acceleration layer under the Mosaic packer.
//!
//! - [`IntervalTree`]: a weight-balanced interval tree over closed 1D intervals with
//!   payloads. Insert and remove by stable [`IntervalKey`], query by point or range with
//!   early exit through [`ControlFlow`](core::ops::ControlFlow).
//! - [`RectIndex`]: a static set of axis-aligned rectangles keyed on their vertical
//!   extent, answering "is this point covered" and "does this box overlap anything".
//! - [`Aabb2D`]: the plain min/max box type shared by both.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Higher layers (like the region algebra) decompose their shapes into boxes and feed
//! them here.
//!
//! # Example
//!
//! ```rust
//! use mosaic_index::{Aabb2D, RectIndex};
//!
//! // An L-shaped area made of two tiles.
//! let idx: RectIndex<f64, u32> = RectIndex::new([
//!     (Aabb2D::<f64>::from_xywh(0.0, 0.0, 30.0, 10.0), 0),
//!     (Aabb2D::<f64>::from_xywh(0.0, 10.0, 10.0, 20.0), 1),
//! ]);
//!
//! assert!(idx.contains_point(5.0, 25.0));
//! // A box tucked into the notch only touches the tiles.
//! assert!(!idx.overlaps(&Aabb2D::<f64>::from_xywh(10.0, 10.0, 5.0, 5.0)));
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Inserting an interval with
//! a NaN or inverted endpoint panics.

#![no_std]

extern crate alloc;

pub mod rect_index;
pub mod tree;
pub mod types;

pub use rect_index::RectIndex;
pub use tree::{Interval, IntervalKey, IntervalTree};
pub use types::Aabb2D;

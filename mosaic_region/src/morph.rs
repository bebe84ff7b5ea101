// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Morphological operators on 0/1 regions with a square structuring element.
//!
//! All operators threshold their result with `w > 0`, so they return indicator
//! regions even when fed arbitrary fields.

use alloc::vec::Vec;

use crate::vertex::WeightedRect;
use crate::vlist::Region;

/// Padding around the bounds of a region when eroding it.
const ERODE_MARGIN: f64 = 10.0;

/// `1` where `w > 0`, `0` elsewhere.
pub fn indicator(w: f64) -> f64 {
    if w > 0.0 { 1.0 } else { 0.0 }
}

/// The union of two regions as an indicator region.
pub fn union(a: &Region, b: &Region) -> Region {
    a.add(b).transform(indicator)
}

/// Grow the positive part of `region` by `d` in every axis direction.
///
/// Every decomposed rectangle is inflated by `d` on all four sides and the pieces are
/// merged. `d == 0` just thresholds the region.
///
/// # Panics
///
/// Panics if `d` is negative or not finite.
pub fn dilate(region: &Region, d: f64) -> Region {
    assert!(
        d.is_finite() && d >= 0.0,
        "dilation distance must be finite and non-negative, got {d}"
    );
    let pieces = region.rectangles();
    let mut vertices = Vec::with_capacity(pieces.len() * 4);
    for piece in pieces {
        vertices.extend(WeightedRect::new(piece.rect.inflate(d, d), piece.w).corners());
    }
    Region::from_vertices(vertices).transform(indicator)
}

/// Shrink the positive part of `region` by `d` in every axis direction.
///
/// The region is cut out of its bounding box padded by a fixed margin, the remainder is
/// dilated by `d`, and whatever the dilation did not reach is the result. Regions with
/// fewer than four vertices have no area and erode to empty.
///
/// # Panics
///
/// Panics if `d` is negative or not finite.
pub fn erode(region: &Region, d: f64) -> Region {
    let Some(bounds) = region.bounds().filter(|_| region.len() >= 4) else {
        return Region::new();
    };
    let frame = bounds.inflate(ERODE_MARGIN, ERODE_MARGIN);
    let outside = Region::from_rect(frame).add(&region.transform(indicator).scale(-1.0));
    let grown = dilate(&outside, d);
    // `grown` covers exactly the inflated frame minus the eroded region. Both frames are
    // produced by the same `inflate` call, so their corners cancel exactly.
    grown
        .add(&Region::from_rect(frame.inflate(d, d)).scale(-1.0))
        .scale(-1.0)
}

/// Dilate by `d` when `d >= 0`, erode by `-d` otherwise.
pub fn topo(region: &Region, d: f64) -> Region {
    if d < 0.0 {
        erode(region, -d)
    } else {
        dilate(region, d)
    }
}

/// Morphological closing: dilate by `d` then erode by `d`.
///
/// Fills notches and gaps narrower than about `2 * d` while keeping the outline
/// elsewhere. For `d >= 0` the input is folded back into the result, so every point
/// of the input stays covered even when `(x + d) - d` rounds away from `x`.
///
/// ```
/// use kurbo::{Point, Rect};
/// use mosaic_region::{Region, morph};
///
/// // Two squares with a 1-unit gap between them.
/// let a = morph::union(
///     &Region::from_rect(Rect::new(0.0, 0.0, 4.0, 4.0)),
///     &Region::from_rect(Rect::new(5.0, 0.0, 9.0, 4.0)),
/// );
/// let closed = morph::close(&a, 1.0);
/// assert_eq!(closed.value(Point::new(4.5, 2.0)), 1.0);
/// assert_eq!(closed, Region::from_rect(Rect::new(0.0, 0.0, 9.0, 4.0)));
/// ```
pub fn close(region: &Region, d: f64) -> Region {
    let closed = topo(&topo(region, d), -d);
    if d >= 0.0 {
        union(&closed, region)
    } else {
        closed
    }
}

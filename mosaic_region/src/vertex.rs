// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signed vertices and their scanline ordering.

use core::cmp::Ordering;

use kurbo::{Point, Rect};

/// A signed corner of a region.
///
/// A vertex adds `w` to the field at every point it dominates, that is every point
/// `q` with `q.x >= p.x` and `q.y >= p.y`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Signed weight contributed to the dominated quadrant.
    pub w: f64,
    /// Position of the quadrant's corner.
    pub p: Point,
}

impl Vertex {
    /// Create a vertex.
    pub const fn new(w: f64, p: Point) -> Self {
        Self { w, p }
    }

    /// Scanline order: `y` first, then `x`.
    ///
    /// Incomparable coordinates (NaN) tie.
    pub fn scanline_cmp(&self, other: &Self) -> Ordering {
        cmp_f64(self.p.y, other.p.y).then_with(|| cmp_f64(self.p.x, other.p.x))
    }

    /// Whether `q` lies in the quadrant this vertex contributes to.
    pub fn dominates(&self, q: Point) -> bool {
        q.x >= self.p.x && q.y >= self.p.y
    }

    /// The same corner with its weight multiplied by `k`.
    #[must_use]
    pub fn scaled(self, k: f64) -> Self {
        Self {
            w: self.w * k,
            p: self.p,
        }
    }

    pub(crate) fn same_position(&self, other: &Self) -> bool {
        self.p.x == other.p.x && self.p.y == other.p.y
    }
}

/// A rectangle carrying a constant field value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeightedRect {
    /// Extent of the piece.
    pub rect: Rect,
    /// Field value inside `rect`.
    pub w: f64,
}

impl WeightedRect {
    /// Create a weighted rectangle.
    pub const fn new(rect: Rect, w: f64) -> Self {
        Self { rect, w }
    }

    /// The four inclusion-exclusion corners in scanline order.
    ///
    /// Assumes `rect` is non-inverted (`x0 <= x1`, `y0 <= y1`).
    pub fn corners(&self) -> [Vertex; 4] {
        let Rect { x0, y0, x1, y1 } = self.rect;
        [
            Vertex::new(self.w, Point::new(x0, y0)),
            Vertex::new(-self.w, Point::new(x1, y0)),
            Vertex::new(-self.w, Point::new(x0, y1)),
            Vertex::new(self.w, Point::new(x1, y1)),
        ]
    }
}

pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Regions as sorted lists of signed vertices.

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Point, Rect, Vec2};
use mosaic_index::{Aabb2D, RectIndex};

use crate::profile::Profile;
use crate::vertex::{Vertex, WeightedRect};

/// A piecewise-constant field over the plane, stored as signed vertices.
///
/// The value at `q` is the sum of the weights of every vertex that dominates `q`.
/// Vertices are kept in scanline order (`y`, then `x`) and normalized: no two share a
/// position and none has zero weight. Every operation returns a new region.
///
/// A 0/1 region is a union of axis-aligned rectangles; see [`Region::from_rect`] and
/// [`crate::morph::union`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    vertices: Vec<Vertex>,
}

/// A horizontal boundary piece: the field jumps by `w` when crossing `y` upward
/// anywhere in `[x0, x1)`.
#[cfg(test)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Face {
    pub(crate) x0: f64,
    pub(crate) x1: f64,
    pub(crate) y: f64,
    pub(crate) w: f64,
}

impl Region {
    /// The empty region (zero everywhere).
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// The indicator of `rect`.
    ///
    /// The rectangle is taken with its corners reordered, so inverted input describes
    /// the same area. A rectangle with no area gives the empty region.
    pub fn from_rect(rect: Rect) -> Self {
        WeightedRect::new(rect.abs(), 1.0).to_region()
    }

    /// Build a region from vertices in any order.
    ///
    /// Sorts into scanline order (stably), sums coincident vertices and drops zero
    /// weights.
    pub fn from_vertices(mut vertices: Vec<Vertex>) -> Self {
        vertices.sort_by(Vertex::scanline_cmp);
        Self::from_sorted(vertices)
    }

    fn from_sorted(vertices: Vec<Vertex>) -> Self {
        let mut region = Self { vertices };
        region.normalize();
        region
    }

    /// Sum coincident vertices and drop zero weights in place.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the vertices are not in scanline order.
    pub fn normalize(&mut self) {
        debug_assert!(
            self.vertices
                .windows(2)
                .all(|p| p[0].scanline_cmp(&p[1]) != Ordering::Greater),
            "region vertices must be in scanline order"
        );
        let mut out: Vec<Vertex> = Vec::with_capacity(self.vertices.len());
        for v in self.vertices.drain(..) {
            match out.last_mut() {
                Some(last) if last.same_position(&v) => last.w += v.w,
                _ => {
                    if out.last().is_some_and(|last| last.w == 0.0) {
                        out.pop();
                    }
                    out.push(v);
                }
            }
        }
        if out.last().is_some_and(|last| last.w == 0.0) {
            out.pop();
        }
        self.vertices = out;
    }

    /// The vertices in scanline order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the field is zero everywhere.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Field value at `q`.
    pub fn value(&self, q: Point) -> f64 {
        self.vertices
            .iter()
            .take_while(|v| v.p.y <= q.y)
            .filter(|v| v.dominates(q))
            .map(|v| v.w)
            .sum()
    }

    /// Pointwise sum of two fields.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let (a, b) = (&self.vertices, &other.vertices);
        let mut vertices = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].scanline_cmp(&b[j]) {
                Ordering::Less => {
                    vertices.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    vertices.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    let w = a[i].w + b[j].w;
                    if w != 0.0 {
                        vertices.push(Vertex::new(w, a[i].p));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        vertices.extend_from_slice(&a[i..]);
        vertices.extend_from_slice(&b[j..]);
        Self { vertices }
    }

    /// Multiply the field by `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero; use [`Region::new`] for the empty region.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        assert!(k != 0.0, "scaling a region by zero");
        Self {
            vertices: self.vertices.iter().map(|v| v.scaled(k)).collect(),
        }
    }

    /// Apply `f` to the field value everywhere and rebuild a minimal region.
    ///
    /// `f` is only called where the field is nonzero and the result is taken to be zero
    /// elsewhere, so `f(0)` should be `0`.
    ///
    /// ```
    /// use kurbo::{Point, Rect};
    /// use mosaic_region::Region;
    ///
    /// let a = Region::from_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    /// let b = Region::from_rect(Rect::new(2.0, 2.0, 6.0, 6.0));
    /// let sum = a.add(&b);
    /// assert_eq!(sum.value(Point::new(3.0, 3.0)), 2.0);
    ///
    /// let union = sum.transform(|w| if w > 0.0 { 1.0 } else { 0.0 });
    /// assert_eq!(union.value(Point::new(3.0, 3.0)), 1.0);
    /// assert_eq!(union.len(), 8);
    /// ```
    #[must_use]
    pub fn transform(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        let mut vertices = Vec::with_capacity(self.vertices.len());
        let mut running = Profile::default();
        let mut previous = Profile::default();
        for group in self.scanlines() {
            let y = group[0].p.y;
            running = running.add(&Profile::project(group));
            let current = running.transform(&mut f);
            let delta = current.add(&previous.scale(-1.0));
            if !delta.is_empty() {
                vertices.extend(delta.unproject(y));
            }
            previous = current;
        }
        Self { vertices }
    }

    /// Decompose into disjoint weighted rectangles whose sum is this field.
    ///
    /// Rectangles come out in scanline bands, bottom to top, each band left to right.
    pub fn rectangles(&self) -> Vec<WeightedRect> {
        let mut out = Vec::new();
        let mut running = Profile::default();
        let mut prev_y = f64::NEG_INFINITY;
        for group in self.scanlines() {
            let y = group[0].p.y;
            out.extend(
                running
                    .segments()
                    .map(|s| WeightedRect::new(Rect::new(s.x0, prev_y, s.x1, y), s.w)),
            );
            running = running.add(&Profile::project(group));
            prev_y = y;
        }
        out
    }

    /// Horizontal faces: for each scanline, the spans where the field changes across it.
    #[cfg(test)]
    pub(crate) fn faces(&self) -> Vec<Face> {
        self.scanlines()
            .flat_map(|group| {
                let y = group[0].p.y;
                Profile::project(group)
                    .segments()
                    .map(|s| Face {
                        x0: s.x0,
                        x1: s.x1,
                        y,
                        w: s.w,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Bounding box of all vertices, or `None` for the empty region.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.vertices.first()?;
        let init = Rect::from_points(first.p, first.p);
        Some(self.vertices.iter().fold(init, |acc, v| {
            Rect::new(
                acc.x0.min(v.p.x),
                acc.y0.min(v.p.y),
                acc.x1.max(v.p.x),
                acc.y1.max(v.p.y),
            )
        }))
    }

    /// The same field shifted by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex::new(v.w, v.p + offset))
                .collect(),
        }
    }

    /// Index the positive part of the field for point and overlap queries.
    ///
    /// Each entry is one piece of [`Region::rectangles`] with its field value as payload.
    pub fn rect_index(&self) -> RectIndex<f64, f64> {
        self.rectangles()
            .into_iter()
            .filter(|r| r.w > 0.0)
            .map(|r| (rect_to_aabb(r.rect), r.w))
            .collect()
    }

    /// Runs of vertices sharing a `y`.
    fn scanlines(&self) -> impl Iterator<Item = &[Vertex]> + '_ {
        self.vertices.chunk_by(|a, b| a.p.y == b.p.y)
    }
}

impl WeightedRect {
    /// This piece as a region of its own.
    pub fn to_region(&self) -> Region {
        Region::from_sorted(self.corners().to_vec())
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

pub(crate) fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

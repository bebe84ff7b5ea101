// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional step functions: the projection of a region onto a scanline.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::vertex::{Vertex, cmp_f64};

/// A signed knot on the real line adding `w` to every `x' >= x`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Step {
    pub(crate) w: f64,
    pub(crate) x: f64,
}

/// A half-open span `[x0, x1)` of constant value `w`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Segment {
    pub(crate) x0: f64,
    pub(crate) x1: f64,
    pub(crate) w: f64,
}

/// Normalized knots sorted by `x`: distinct positions, no zero weights.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Profile {
    steps: Vec<Step>,
}

impl Profile {
    /// Drop the `y` coordinate of one scanline group.
    ///
    /// The group must come from a normalized region, so its `x` values are
    /// strictly increasing.
    pub(crate) fn project(group: &[Vertex]) -> Self {
        debug_assert!(
            group.windows(2).all(|p| p[0].p.x < p[1].p.x),
            "scanline group must be sorted with distinct x"
        );
        Self {
            steps: group.iter().map(|v| Step { w: v.w, x: v.p.x }).collect(),
        }
    }

    /// Re-attach `y`, producing vertices in scanline order.
    pub(crate) fn unproject(&self, y: f64) -> impl Iterator<Item = Vertex> + '_ {
        self.steps
            .iter()
            .map(move |s| Vertex::new(s.w, kurbo::Point::new(s.x, y)))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Pointwise sum.
    pub(crate) fn add(&self, other: &Self) -> Self {
        let (a, b) = (&self.steps, &other.steps);
        let mut steps = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match cmp_f64(a[i].x, b[j].x) {
                Ordering::Less => {
                    steps.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    steps.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    let w = a[i].w + b[j].w;
                    if w != 0.0 {
                        steps.push(Step { w, x: a[i].x });
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        steps.extend_from_slice(&a[i..]);
        steps.extend_from_slice(&b[j..]);
        Self { steps }
    }

    /// Multiply every knot by `k`.
    pub(crate) fn scale(&self, k: f64) -> Self {
        Self {
            steps: self
                .steps
                .iter()
                .map(|s| Step { w: s.w * k, x: s.x })
                .collect(),
        }
    }

    /// Field value at `x`.
    #[cfg(test)]
    pub(crate) fn value(&self, x: f64) -> f64 {
        self.steps
            .iter()
            .take_while(|s| s.x <= x)
            .map(|s| s.w)
            .sum()
    }

    /// Apply `f` to the field and rebuild a minimal profile.
    ///
    /// Walks the knots keeping the running value and the running transformed value;
    /// a knot is emitted wherever the transformed value changes. `f` is only
    /// evaluated where the running value is nonzero.
    pub(crate) fn transform(&self, f: &mut impl FnMut(f64) -> f64) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len());
        let mut total = 0.0;
        let mut current = 0.0;
        for s in &self.steps {
            total += s.w;
            let next = if total != 0.0 { f(total) } else { 0.0 };
            let delta = next - current;
            if delta != 0.0 {
                steps.push(Step { w: delta, x: s.x });
            }
            current = next;
        }
        Self { steps }
    }

    /// Spans between successive knots where the running value is nonzero.
    pub(crate) fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let mut running = 0.0;
        let mut prev_x = f64::NEG_INFINITY;
        self.steps.iter().filter_map(move |s| {
            let seg = (running != 0.0).then_some(Segment {
                x0: prev_x,
                x1: s.x,
                w: running,
            });
            running += s.w;
            prev_x = s.x;
            seg
        })
    }
}

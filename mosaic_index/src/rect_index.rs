// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static rectangle index keyed on vertical extent.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::ControlFlow;

use crate::tree::{Interval, IntervalTree};
use crate::types::Aabb2D;

/// Rectangles indexed by their `[min_y, max_y]` extent in an [`IntervalTree`].
///
/// Built once from a set of boxes and rebuilt wholesale when the set changes. The
/// rectangles are expected to be disjoint (for example the decomposition of a region),
/// though queries stay correct for overlapping input.
pub struct RectIndex<T, P> {
    tree: IntervalTree<T, (Aabb2D<T>, P)>,
}

impl<T, P> Debug for RectIndex<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RectIndex")
            .field("tree", &self.tree)
            .finish()
    }
}

impl<T, P> Default for RectIndex<T, P> {
    fn default() -> Self {
        Self {
            tree: IntervalTree::default(),
        }
    }
}

impl<T: Copy + PartialOrd, P> RectIndex<T, P> {
    /// Build an index over `(box, payload)` entries.
    pub fn new(entries: impl IntoIterator<Item = (Aabb2D<T>, P)>) -> Self {
        Self {
            tree: IntervalTree::from_intervals(
                entries
                    .into_iter()
                    .map(|(aabb, payload)| Interval::new(aabb.min_y, aabb.max_y, (aabb, payload))),
            ),
        }
    }

    /// Number of indexed rectangles.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Whether some rectangle covers the point.
    ///
    /// Rectangles are treated as half-open `[min, max)` so that a point on an edge shared
    /// by two tiles belongs to exactly one of them, and a point on the outer boundary of
    /// the covered area is outside.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.tree
            .query_point(y, |_, iv| {
                if iv.payload.0.contains_point_half_open(x, y) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .is_break()
    }

    /// Whether the open interior of `rect` intersects any indexed rectangle.
    ///
    /// Sharing an edge or a corner is not an overlap.
    pub fn overlaps(&self, rect: &Aabb2D<T>) -> bool {
        self.tree
            .query_interval(rect.min_y, rect.max_y, |_, iv| {
                if iv.payload.0.overlaps_open(rect) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .is_break()
    }

    /// Every indexed rectangle whose interior intersects `rect`.
    pub fn overlapping<'a>(
        &'a self,
        rect: &Aabb2D<T>,
    ) -> impl Iterator<Item = (&'a Aabb2D<T>, &'a P)> + 'a {
        let mut out = Vec::new();
        let _ = self
            .tree
            .query_interval(rect.min_y, rect.max_y, |_, iv| {
                if iv.payload.0.overlaps_open(rect) {
                    out.push((&iv.payload.0, &iv.payload.1));
                }
                ControlFlow::<()>::Continue(())
            });
        out.into_iter()
    }

    /// Iterate all indexed rectangles.
    pub fn iter(&self) -> impl Iterator<Item = (&Aabb2D<T>, &P)> + '_ {
        self.tree.iter().map(|(_, iv)| (&iv.payload.0, &iv.payload.1))
    }
}

impl<T: Copy + PartialOrd, P> FromIterator<(Aabb2D<T>, P)> for RectIndex<T, P> {
    fn from_iter<I: IntoIterator<Item = (Aabb2D<T>, P)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weight-balanced interval tree over 1D intervals with payloads.
//!
//! Each node stores a split value `mid`, a left subtree holding intervals that end
//! before `mid`, a right subtree holding intervals that start after `mid`, and the
//! intervals straddling `mid` twice: once sorted by low endpoint and once by high
//! endpoint. Point and range queries then only walk one root-to-leaf path plus the
//! prefix/suffix of each straddling list that can match.
//!
//! Balance is amortized: there are no rotations. When a child would carry more than
//! three quarters of its node's non-straddling weight, the whole node is rebuilt
//! from its flattened interval set with a median split.
//!
//! Intervals are closed: `[lo, hi]` contains both endpoints. Coordinates are assumed
//! to be free of NaNs.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::ControlFlow;

use crate::types::{cmp_t, le, lt};

/// Generational handle for an interval stored in an [`IntervalTree`].
///
/// Keys stay valid until the interval is removed. A slot freed by [`IntervalTree::remove`]
/// is reused with a bumped generation, so a stale key never aliases a newer interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntervalKey(u32, u32);

impl IntervalKey {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Interval keys are 32-bit; trees never hold more than u32::MAX slots."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A closed interval `[lo, hi]` with an attached payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval<T, P> {
    /// Low endpoint.
    pub lo: T,
    /// High endpoint.
    pub hi: T,
    /// User payload.
    pub payload: P,
}

impl<T: Copy + PartialOrd, P> Interval<T, P> {
    /// Create a new interval.
    pub const fn new(lo: T, hi: T, payload: P) -> Self {
        Self { lo, hi, payload }
    }

    /// Whether `x` lies within `[lo, hi]`.
    pub fn contains(&self, x: T) -> bool {
        le(self.lo, x) && le(x, self.hi)
    }

    /// Whether this interval shares at least one point with `[lo, hi]`.
    pub fn overlaps(&self, lo: T, hi: T) -> bool {
        le(self.lo, hi) && le(lo, self.hi)
    }
}

#[derive(Copy, Clone, Debug)]
struct Span<T> {
    lo: T,
    hi: T,
    key: IntervalKey,
}

fn cmp_begin<T: PartialOrd>(a: &Span<T>, b: &Span<T>) -> Ordering {
    cmp_t(&a.lo, &b.lo).then_with(|| cmp_t(&a.hi, &b.hi))
}

fn cmp_end<T: PartialOrd>(a: &Span<T>, b: &Span<T>) -> Ordering {
    cmp_t(&a.hi, &b.hi).then_with(|| cmp_t(&a.lo, &b.lo))
}

enum Removal {
    NotFound,
    Removed,
    /// The subtree no longer holds any interval and must be unlinked.
    Emptied,
}

struct Node<T> {
    mid: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
    by_lo: Vec<Span<T>>,
    by_hi: Vec<Span<T>>,
    count: usize,
}

fn count_of<T>(node: &Option<Box<Node<T>>>) -> usize {
    node.as_ref().map_or(0, |n| n.count)
}

impl<T: Copy + PartialOrd> Node<T> {
    fn single(span: Span<T>) -> Box<Self> {
        Box::new(Self {
            mid: span.lo,
            left: None,
            right: None,
            by_lo: alloc::vec![span],
            by_hi: alloc::vec![span],
            count: 1,
        })
    }

    /// Static build: split at the median endpoint, recurse on both sides.
    fn build(spans: Vec<Span<T>>) -> Option<Box<Self>> {
        if spans.is_empty() {
            return None;
        }
        let mut pts: Vec<T> = Vec::with_capacity(spans.len() * 2);
        for s in &spans {
            pts.push(s.lo);
            pts.push(s.hi);
        }
        pts.sort_by(cmp_t);
        // The median is an endpoint of some interval, so the center set is never empty.
        let mid = pts[pts.len() >> 1];

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut by_lo = Vec::new();
        for s in spans {
            if lt(s.hi, mid) {
                left.push(s);
            } else if lt(mid, s.lo) {
                right.push(s);
            } else {
                by_lo.push(s);
            }
        }
        let mut by_hi = by_lo.clone();
        by_lo.sort_by(cmp_begin);
        by_hi.sort_by(cmp_end);

        let left = Self::build(left);
        let right = Self::build(right);
        let count = count_of(&left) + count_of(&right) + by_lo.len();
        Some(Box::new(Self {
            mid,
            left,
            right,
            by_lo,
            by_hi,
            count,
        }))
    }

    fn collect(&self, out: &mut Vec<Span<T>>) {
        out.extend_from_slice(&self.by_lo);
        if let Some(left) = &self.left {
            left.collect(out);
        }
        if let Some(right) = &self.right {
            right.collect(out);
        }
    }

    fn depth(&self) -> usize {
        let l = self.left.as_ref().map_or(0, |n| n.depth());
        let r = self.right.as_ref().map_or(0, |n| n.depth());
        1 + l.max(r)
    }

    fn rebuild_with(node: &mut Box<Self>, span: Span<T>) {
        let mut spans = Vec::with_capacity(node.count + 1);
        node.collect(&mut spans);
        spans.push(span);
        if let Some(rebuilt) = Self::build(spans) {
            *node = rebuilt;
        }
    }

    fn rebuild_without(node: &mut Box<Self>, span: Span<T>) -> Removal {
        let mut spans = Vec::with_capacity(node.count);
        node.collect(&mut spans);
        let Some(pos) = spans.iter().position(|s| s.key == span.key) else {
            return Removal::NotFound;
        };
        spans.swap_remove(pos);
        match Self::build(spans) {
            Some(rebuilt) => {
                *node = rebuilt;
                Removal::Removed
            }
            None => Removal::Emptied,
        }
    }

    fn insert(node: &mut Box<Self>, span: Span<T>) {
        let weight = node.count - node.by_lo.len();
        node.count += 1;
        if lt(span.hi, node.mid) {
            match node.left.as_ref().map(|n| n.count) {
                None => node.left = Some(Self::single(span)),
                Some(c) if 4 * (c + 1) > 3 * (weight + 1) => Self::rebuild_with(node, span),
                Some(_) => {
                    if let Some(left) = node.left.as_mut() {
                        Self::insert(left, span);
                    }
                }
            }
        } else if lt(node.mid, span.lo) {
            match node.right.as_ref().map(|n| n.count) {
                None => node.right = Some(Self::single(span)),
                Some(c) if 4 * (c + 1) > 3 * (weight + 1) => Self::rebuild_with(node, span),
                Some(_) => {
                    if let Some(right) = node.right.as_mut() {
                        Self::insert(right, span);
                    }
                }
            }
        } else {
            let l = node
                .by_lo
                .partition_point(|s| cmp_begin(s, &span) == Ordering::Less);
            node.by_lo.insert(l, span);
            let r = node
                .by_hi
                .partition_point(|s| cmp_end(s, &span) == Ordering::Less);
            node.by_hi.insert(r, span);
        }
    }

    fn remove(node: &mut Box<Self>, span: Span<T>) -> Removal {
        let weight = node.count - node.by_lo.len();
        if lt(span.hi, node.mid) {
            if node.left.is_none() {
                return Removal::NotFound;
            }
            if 4 * count_of(&node.right) > 3 * weight.saturating_sub(1) {
                return Self::rebuild_without(node, span);
            }
            let outcome = match node.left.as_mut() {
                Some(left) => Self::remove(left, span),
                None => Removal::NotFound,
            };
            match outcome {
                Removal::NotFound => Removal::NotFound,
                Removal::Removed => {
                    node.count -= 1;
                    Removal::Removed
                }
                Removal::Emptied => {
                    node.left = None;
                    node.count -= 1;
                    Self::settle(node)
                }
            }
        } else if lt(node.mid, span.lo) {
            if node.right.is_none() {
                return Removal::NotFound;
            }
            if 4 * count_of(&node.left) > 3 * weight.saturating_sub(1) {
                return Self::rebuild_without(node, span);
            }
            let outcome = match node.right.as_mut() {
                Some(right) => Self::remove(right, span),
                None => Removal::NotFound,
            };
            match outcome {
                Removal::NotFound => Removal::NotFound,
                Removal::Removed => {
                    node.count -= 1;
                    Removal::Removed
                }
                Removal::Emptied => {
                    node.right = None;
                    node.count -= 1;
                    Self::settle(node)
                }
            }
        } else {
            let start = node
                .by_lo
                .partition_point(|s| cmp_begin(s, &span) == Ordering::Less);
            let Some(i) = node.by_lo[start..]
                .iter()
                .take_while(|s| cmp_begin(s, &span) == Ordering::Equal)
                .position(|s| s.key == span.key)
            else {
                return Removal::NotFound;
            };
            node.by_lo.remove(start + i);

            let start = node
                .by_hi
                .partition_point(|s| cmp_end(s, &span) == Ordering::Less);
            let j = node.by_hi[start..]
                .iter()
                .take_while(|s| cmp_end(s, &span) == Ordering::Equal)
                .position(|s| s.key == span.key)
                .expect("straddling interval must be listed by both endpoints");
            node.by_hi.remove(start + j);
            node.count -= 1;
            Self::settle(node)
        }
    }

    /// Restore the node shape after a removal.
    ///
    /// A node left without straddling intervals is replaced by its only child, or kept
    /// as a routing node while both children remain.
    fn settle(node: &mut Box<Self>) -> Removal {
        if !node.by_lo.is_empty() {
            return Removal::Removed;
        }
        match (node.left.take(), node.right.take()) {
            (None, None) => Removal::Emptied,
            (Some(only), None) | (None, Some(only)) => {
                *node = only;
                Removal::Removed
            }
            (left, right) => {
                node.left = left;
                node.right = right;
                Removal::Removed
            }
        }
    }

    fn query_point<B, F>(&self, x: T, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(IntervalKey) -> ControlFlow<B>,
    {
        if lt(x, self.mid) {
            if let Some(left) = &self.left {
                left.query_point(x, visit)?;
            }
            for s in self.by_lo.iter().take_while(|s| le(s.lo, x)) {
                visit(s.key)?;
            }
        } else if lt(self.mid, x) {
            if let Some(right) = &self.right {
                right.query_point(x, visit)?;
            }
            for s in self.by_hi.iter().rev().take_while(|s| le(x, s.hi)) {
                visit(s.key)?;
            }
        } else {
            for s in &self.by_lo {
                visit(s.key)?;
            }
        }
        ControlFlow::Continue(())
    }

    fn query_interval<B, F>(&self, lo: T, hi: T, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(IntervalKey) -> ControlFlow<B>,
    {
        if lt(lo, self.mid)
            && let Some(left) = &self.left
        {
            left.query_interval(lo, hi, visit)?;
        }
        if lt(self.mid, hi)
            && let Some(right) = &self.right
        {
            right.query_interval(lo, hi, visit)?;
        }
        if lt(hi, self.mid) {
            for s in self.by_lo.iter().take_while(|s| le(s.lo, hi)) {
                visit(s.key)?;
            }
        } else if lt(self.mid, lo) {
            for s in self.by_hi.iter().rev().take_while(|s| le(lo, s.hi)) {
                visit(s.key)?;
            }
        } else {
            for s in &self.by_lo {
                visit(s.key)?;
            }
        }
        ControlFlow::Continue(())
    }
}

/// Weight-balanced interval tree with stable keys and payloads.
///
/// The tree is a single-writer structure: mutation takes `&mut self`, so queries can
/// never observe a half-applied insert or removal.
///
/// ```
/// use core::ops::ControlFlow;
/// use mosaic_index::IntervalTree;
///
/// let mut tree: IntervalTree<i64, &str> = IntervalTree::new();
/// tree.insert(1, 5, "a");
/// tree.insert(2, 6, "b");
/// let far = tree.insert(8, 10, "c");
///
/// let mut seen = Vec::new();
/// let _ = tree.query_interval(4, 7, |_, iv| {
///     seen.push(iv.payload);
///     ControlFlow::<()>::Continue(())
/// });
/// seen.sort();
/// assert_eq!(seen, ["a", "b"]);
///
/// assert!(tree.remove(far).is_some());
/// assert_eq!(tree.len(), 2);
/// ```
pub struct IntervalTree<T, P> {
    root: Option<Box<Node<T>>>,
    slots: Vec<Option<Interval<T, P>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<T, P> Default for IntervalTree<T, P> {
    fn default() -> Self {
        Self {
            root: None,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<T, P> Debug for IntervalTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("IntervalTree")
            .field("total_slots", &total)
            .field("alive", &alive)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd, P> IntervalTree<T, P> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a static set of intervals in one pass.
    ///
    /// Keys are handed out in iteration order, so the `n`-th interval gets the `n`-th key
    /// of [`IntervalTree::iter`].
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval<T, P>>) -> Self {
        let mut tree = Self::new();
        let mut spans = Vec::new();
        for iv in intervals {
            assert!(
                le(iv.lo, iv.hi),
                "interval low endpoint must not exceed its high endpoint"
            );
            let (lo, hi) = (iv.lo, iv.hi);
            let key = tree.alloc(iv);
            spans.push(Span { lo, hi, key });
        }
        tree.root = Node::build(spans);
        tree
    }

    /// Number of intervals in the tree (the root's cached subtree count).
    pub fn len(&self) -> usize {
        count_of(&self.root)
    }

    /// True if the tree holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; `0` when empty.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Remove every interval. Outstanding keys become stale.
    pub fn clear(&mut self) {
        self.root = None;
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
    }

    /// Look up a live interval.
    pub fn get(&self, key: IntervalKey) -> Option<&Interval<T, P>> {
        if self.generations.get(key.idx()).copied() != Some(key.1) {
            return None;
        }
        self.slots.get(key.idx())?.as_ref()
    }

    /// Iterate all live intervals in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (IntervalKey, &Interval<T, P>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|iv| (IntervalKey::new(i, self.generations[i]), iv))
        })
    }

    /// Insert the closed interval `[lo, hi]` and return its key.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi` or either endpoint is NaN.
    pub fn insert(&mut self, lo: T, hi: T, payload: P) -> IntervalKey {
        assert!(
            le(lo, hi),
            "interval low endpoint must not exceed its high endpoint"
        );
        let key = self.alloc(Interval { lo, hi, payload });
        let span = Span { lo, hi, key };
        match self.root.as_mut() {
            None => self.root = Some(Node::single(span)),
            Some(root) => Node::insert(root, span),
        }
        key
    }

    /// Remove the interval behind `key`, returning it.
    ///
    /// Returns `None` if the key is stale or was never issued by this tree.
    pub fn remove(&mut self, key: IntervalKey) -> Option<Interval<T, P>> {
        let (lo, hi) = self.get(key).map(|iv| (iv.lo, iv.hi))?;
        let root = self.root.as_mut()?;
        match Node::remove(root, Span { lo, hi, key }) {
            Removal::NotFound => {
                debug_assert!(false, "live interval missing from the tree structure");
                return None;
            }
            Removal::Removed => {}
            Removal::Emptied => self.root = None,
        }
        self.free_list.push(key.idx());
        self.slots[key.idx()].take()
    }

    /// Visit every interval containing `x`.
    ///
    /// The walk stops as soon as `visit` returns [`ControlFlow::Break`], and that value is
    /// returned. Each matching interval is visited exactly once.
    pub fn query_point<'a, B>(
        &'a self,
        x: T,
        mut visit: impl FnMut(IntervalKey, &'a Interval<T, P>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let Some(root) = &self.root else {
            return ControlFlow::Continue(());
        };
        root.query_point(x, &mut |key| match self.get(key) {
            Some(iv) => visit(key, iv),
            None => ControlFlow::Continue(()),
        })
    }

    /// Visit every interval overlapping the closed range `[lo, hi]`.
    ///
    /// An inverted range (`lo > hi`) matches nothing.
    pub fn query_interval<'a, B>(
        &'a self,
        lo: T,
        hi: T,
        mut visit: impl FnMut(IntervalKey, &'a Interval<T, P>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let Some(root) = &self.root else {
            return ControlFlow::Continue(());
        };
        if !le(lo, hi) {
            return ControlFlow::Continue(());
        }
        root.query_interval(lo, hi, &mut |key| match self.get(key) {
            Some(iv) => visit(key, iv),
            None => ControlFlow::Continue(()),
        })
    }

    /// Collect the intervals containing `x`.
    pub fn intervals_at(&self, x: T) -> impl Iterator<Item = (IntervalKey, &Interval<T, P>)> + '_ {
        let mut out = Vec::new();
        let _ = self.query_point(x, |key, iv| {
            out.push((key, iv));
            ControlFlow::<()>::Continue(())
        });
        out.into_iter()
    }

    /// Collect the intervals overlapping `[lo, hi]`.
    pub fn intervals_overlapping(
        &self,
        lo: T,
        hi: T,
    ) -> impl Iterator<Item = (IntervalKey, &Interval<T, P>)> + '_ {
        let mut out = Vec::new();
        let _ = self.query_interval(lo, hi, |key, iv| {
            out.push((key, iv));
            ControlFlow::<()>::Continue(())
        });
        out.into_iter()
    }

    fn alloc(&mut self, interval: Interval<T, P>) -> IntervalKey {
        if let Some(idx) = self.free_list.pop() {
            self.generations[idx] += 1;
            self.slots[idx] = Some(interval);
            IntervalKey::new(idx, self.generations[idx])
        } else {
            self.slots.push(Some(interval));
            self.generations.push(1);
            IntervalKey::new(self.slots.len() - 1, 1)
        }
    }
}

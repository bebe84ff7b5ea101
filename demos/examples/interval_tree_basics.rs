// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interval tree basics.
//!
//! Index the vertical extents of some boxes, query them, and remove one.
//!
//! Run:
//! - `cargo run -p mosaic_demos --example interval_tree_basics`

use core::ops::ControlFlow;

use mosaic_index::{Aabb2D, IntervalTree, RectIndex};

fn main() {
    let boxes = [
        ("header", Aabb2D::new(0.0, 0.0, 100.0, 12.0)),
        ("sidebar", Aabb2D::new(0.0, 12.0, 20.0, 80.0)),
        ("content", Aabb2D::new(20.0, 12.0, 100.0, 70.0)),
        ("footer", Aabb2D::new(20.0, 70.0, 100.0, 80.0)),
    ];

    let mut rows = IntervalTree::new();
    let keys: Vec<_> = boxes
        .iter()
        .map(|(name, b)| rows.insert(b.min_y, b.max_y, *name))
        .collect();
    println!("{} intervals, depth {}", rows.len(), rows.depth());

    let at_12: Vec<_> = rows.intervals_at(12.0).map(|(_, iv)| iv.payload).collect();
    println!("rows touching y = 12: {at_12:?}");

    // Find any box reaching below y = 75, stopping at the first one.
    let deep = rows.query_interval(75.0, f64::INFINITY, |_, iv| ControlFlow::Break(iv.payload));
    println!("first box below 75: {deep:?}");

    let removed = rows.remove(keys[2]).map(|iv| iv.payload);
    println!("removed {removed:?}, {} left", rows.len());
    assert!(rows.remove(keys[2]).is_none(), "stale keys are rejected");

    let index: RectIndex<f64, &str> = boxes.iter().map(|(name, b)| (*b, *name)).collect();
    for (x, y) in [(10.0, 5.0), (10.0, 40.0), (60.0, 40.0), (100.0, 40.0)] {
        let hit: Vec<_> = index
            .overlapping(&Aabb2D::new(x - 0.5, y - 0.5, x + 0.5, y + 0.5))
            .map(|(_, name)| *name)
            .collect();
        println!("({x}, {y}) -> {hit:?}");
    }
}

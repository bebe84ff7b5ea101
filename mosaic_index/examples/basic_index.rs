// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Mosaic Index: insert, query, and remove intervals, then index boxes.

use core::ops::ControlFlow;

use mosaic_index::{Aabb2D, IntervalTree, RectIndex};

fn main() {
    let mut tree: IntervalTree<f64, &str> = IntervalTree::new();
    let _a = tree.insert(1.0, 5.0, "a");
    let b = tree.insert(2.0, 6.0, "b");
    let _c = tree.insert(8.0, 10.0, "c");

    let hits: Vec<_> = tree.intervals_overlapping(4.0, 7.0).map(|(_, iv)| iv.payload).collect();
    println!("overlapping [4, 7]: {:?}", hits);

    // Stop at the first interval containing 3.
    let first = tree.query_point(3.0, |_, iv| ControlFlow::Break(iv.payload));
    println!("first hit at 3: {:?}", first);

    tree.remove(b);
    println!("after removing b: {} intervals", tree.len());

    // Index a couple of tiles and probe them.
    let idx: RectIndex<f64, u32> = RectIndex::new([
        (Aabb2D::<f64>::from_xywh(0.0, 0.0, 30.0, 10.0), 0),
        (Aabb2D::<f64>::from_xywh(0.0, 10.0, 10.0, 20.0), 1),
    ]);
    println!("(5, 25) covered: {}", idx.contains_point(5.0, 25.0));
    println!(
        "notch box overlaps: {}",
        idx.overlaps(&Aabb2D::<f64>::from_xywh(10.0, 10.0, 5.0, 5.0))
    );
}

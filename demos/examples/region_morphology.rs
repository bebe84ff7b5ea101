// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region morphology.
//!
//! Build a union of rectangles with narrow gaps, then dilate, erode and close it and
//! draw each result on a character grid.
//!
//! Run:
//! - `cargo run -p mosaic_demos --example region_morphology`

use kurbo::{Point, Rect};
use mosaic_region::{Region, morph};

fn draw(title: &str, region: &Region) {
    println!("{title}: {} vertices", region.len());
    for row in (0..24).rev() {
        let line: String = (0..48)
            .map(|col| {
                let q = Point::new(f64::from(col) + 0.5, f64::from(row) + 0.5);
                if region.value(q) > 0.0 { '#' } else { '.' }
            })
            .collect();
        println!("  {line}");
    }
}

fn main() {
    let pieces = [
        Rect::new(4.0, 4.0, 20.0, 14.0),
        Rect::new(21.0, 4.0, 30.0, 10.0),
        Rect::new(4.0, 14.0, 10.0, 20.0),
        Rect::new(12.0, 15.0, 26.0, 20.0),
        Rect::new(33.0, 6.0, 44.0, 18.0),
    ];
    let shape = pieces
        .iter()
        .fold(Region::new(), |acc, r| morph::union(&acc, &Region::from_rect(*r)));

    draw("union", &shape);
    draw("dilate 1", &morph::dilate(&shape, 1.0));
    draw("erode 2", &morph::erode(&shape, 2.0));
    let closed = morph::close(&shape, 1.0);
    draw("close 1", &closed);

    for piece in closed.rectangles() {
        println!("  piece {:?} weight {}", piece.rect, piece.w);
    }
    let index = closed.rect_index();
    println!(
        "gap at (20.5, 7) filled: {}",
        index.contains_point(20.5, 7.0)
    );
}

// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrangement basics.
//!
//! Turn clip durations into areas, pack them around the middle of an 80 x 40 viewport,
//! and print the result as text.
//!
//! Run:
//! - `cargo run -p mosaic_demos --example arrange_basics`
//! - `RUST_LOG=mosaic_arrange=debug cargo run -p mosaic_demos --example arrange_basics`
//! - pass a JSON config as the first argument, for example
//!   `'{"heuristic": "first", "metric": "chessboard"}'`

use kurbo::{Point, Size};
use mosaic_arrange::{ArrangeConfig, Arrangement, Request, batch};
use tracing_subscriber::EnvFilter;

const CLIPS: &[(&str, f64, f64)] = &[
    ("keynote", 3600.0, 1.78),
    ("interview", 1500.0, 1.33),
    ("demo", 900.0, 1.78),
    ("trailer", 150.0, 2.39),
    ("portrait", 40.0, 0.56),
    ("b-roll", 300.0, 1.78),
    ("outtakes", 600.0, 1.33),
    ("short", 60.0, 0.56),
    ("teaser", 30.0, 1.0),
    ("credits", 90.0, 2.39),
    ("recap", 420.0, 1.78),
    ("panel", 2400.0, 1.78),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(json) => match serde_json::from_str::<ArrangeConfig>(&json) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("bad config {json:?}: {err}");
                std::process::exit(2);
            }
        },
        None => ArrangeConfig::default(),
    };
    tracing::info!(?config, "arranging {} clips", CLIPS.len());

    let (min, max) = CLIPS
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), c| (lo.min(c.1), hi.max(c.1)));
    let mut requests: Vec<_> = CLIPS
        .iter()
        .map(|&(name, secs, aspect)| {
            Request::new(batch::scale_to_range(secs, min..=max, 100.0..=10_000.0), aspect, name)
        })
        .collect();
    batch::largest_first(&mut requests);

    let viewport = Size::new(80.0, 40.0);
    let mut arrangement = Arrangement::new(Point::new(40.0, 20.0), config).unwrap();
    arrangement
        .place_all(requests, |done, total| {
            tracing::info!("placed {done}/{total}");
        })
        .unwrap();

    let view = batch::fit_transform(arrangement.bounds().unwrap(), viewport, 2.0);
    // Character cells are about twice as tall as wide.
    let mut canvas = vec![vec![' '; viewport.width as usize]; (viewport.height / 2.0) as usize];
    for (i, placed) in arrangement.placed().iter().enumerate() {
        let r = view.transform_rect_bbox(placed.rect);
        let glyph = char::from(b'a' + (i % 26) as u8);
        for (row, line) in canvas.iter_mut().enumerate() {
            let y = row as f64 * 2.0 + 1.0;
            for (col, cell) in line.iter_mut().enumerate() {
                let x = col as f64 + 0.5;
                if r.contains(Point::new(x, y)) {
                    *cell = glyph;
                }
            }
        }
        println!(
            "{glyph}: {:<10} {:>7.1} x {:<7.1} at ({:.1}, {:.1})",
            placed.source,
            placed.rect.width(),
            placed.rect.height(),
            placed.rect.x0,
            placed.rect.y0
        );
    }
    for line in canvas {
        println!("|{}|", line.into_iter().collect::<String>());
    }
    println!(
        "region: {} vertices, {} pieces",
        arrangement.region().len(),
        arrangement.region().rectangles().len()
    );
}

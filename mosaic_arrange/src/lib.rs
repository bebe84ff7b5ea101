// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=mosaic_arrange --heading-base-level=0

//! Mosaic Arrange: pack rectangles tightly around a center point.
//!
//! Given a stream of `(area, aspect ratio, id)` requests, an [`Arrangement`] grows an
//! irregular, gap-free, non-overlapping mosaic outward from a fixed center. It was built
//! to lay out photo thumbnails, where each picture keeps its aspect ratio and its area
//! encodes some weight, but it works for any set of axis-aligned rectangles.
//!
//! The search is greedy: every new rectangle goes into the legal slot whose center is
//! nearest the arrangement center, with slots proposed at the corners of the occupied
//! region. The occupied region is a [`mosaic_region::Region`] that is closed after
//! placements so narrow leftover gaps get sealed instead of offered as slots.
//!
//! - [`Arrangement`]: the engine; [`Arrangement::place`] and [`Arrangement::place_all`].
//! - [`ArrangeConfig`]: [`Heuristic`], [`Metric`] and the closing schedule.
//! - [`ArrangeError`]: invalid input and search exhaustion.
//! - [`batch`]: request ordering, value-to-area mapping and viewport fitting.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use mosaic_arrange::{ArrangeConfig, Arrangement, Metric, Request, batch};
//!
//! let config = ArrangeConfig::default().with_metric(Metric::Chebyshev);
//! let mut arrangement = Arrangement::new(Point::new(400.0, 300.0), config).unwrap();
//!
//! // Durations become areas between 100 and 10000.
//! let clips = [("intro", 12.0, 1.78), ("talk", 95.0, 1.33), ("outro", 4.0, 0.75)];
//! let mut requests: Vec<_> = clips
//!     .iter()
//!     .map(|&(name, secs, aspect)| {
//!         Request::new(batch::scale_to_range(secs, 4.0..=95.0, 100.0..=10_000.0), aspect, name)
//!     })
//!     .collect();
//! batch::largest_first(&mut requests);
//! arrangement.place_all(requests, |_, _| {}).unwrap();
//!
//! assert_eq!(arrangement.placed()[0].source, "talk");
//! let view = batch::fit_transform(arrangement.bounds().unwrap(), Size::new(800.0, 600.0), 16.0);
//! let corner = view * arrangement.placed()[0].corners()[0];
//! assert!(corner.x >= 0.0 && corner.y >= 0.0);
//! ```
//!
//! ## Logging
//!
//! The engine emits [`tracing`] events: `debug` for every commit and closing, `trace`
//! for per-search statistics, and `warn` when a rectangle cannot be placed. Install a
//! subscriber to see them.

pub mod arrangement;
pub mod batch;
pub mod config;
pub mod error;

pub use arrangement::{Arrangement, Phase, PlacedRect};
pub use batch::{Request, fit_transform, largest_first, scale_to_range};
pub use config::{ArrangeConfig, Heuristic, Metric};
pub use error::ArrangeError;

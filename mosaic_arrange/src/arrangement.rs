// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement engine.

use kurbo::{Point, Rect, Size};
use mosaic_index::Aabb2D;
use mosaic_region::{Region, morph};
use tracing::{debug, trace, warn};

use crate::config::{ArrangeConfig, Heuristic};
use crate::error::ArrangeError;

/// A committed rectangle and the identifier it was requested with.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRect<S> {
    /// Where the rectangle went.
    pub rect: Rect,
    /// Caller-supplied identifier, passed through untouched.
    pub source: S,
}

impl<S> PlacedRect<S> {
    /// Corners in scanline order: `(x0, y0)`, `(x1, y0)`, `(x0, y1)`, `(x1, y1)`.
    pub fn corners(&self) -> [Point; 4] {
        let Rect { x0, y0, x1, y1 } = self.rect;
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
        ]
    }
}

/// Lifecycle of an [`Arrangement`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing placed; the next rectangle is centered on the arrangement center.
    Empty,
    /// One rectangle placed around the center.
    Seeded,
    /// Later rectangles are searched for along the frontier.
    Growing,
}

/// A growing, gap-free packing of rectangles around a fixed center.
///
/// Each call to [`Arrangement::place`] looks at the corners of the occupied region,
/// tries to put the new rectangle flush against each of them, and keeps the legal
/// position whose center is nearest the arrangement center. The occupied region is
/// then extended with the rectangle and periodically closed so that slivers too
/// narrow to matter stop being offered as slots.
///
/// ```
/// use kurbo::Point;
/// use mosaic_arrange::{ArrangeConfig, Arrangement};
///
/// let mut arrangement = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
/// let first = arrangement.place(100.0, 1.0, "a").unwrap();
/// assert_eq!(first.rect, kurbo::Rect::new(-5.0, -5.0, 5.0, 5.0));
///
/// let second = arrangement.place(100.0, 1.0, "b").unwrap().rect;
/// // Flush against the first square, one side length from the center.
/// assert_eq!(second.center().distance(Point::ORIGIN), 10.0);
/// assert_eq!(arrangement.placed().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Arrangement<S> {
    center: Point,
    config: ArrangeConfig,
    region: Region,
    placed: Vec<PlacedRect<S>>,
}

/// Counters collected during one frontier search.
#[derive(Copy, Clone, Debug, Default)]
struct SearchStats {
    vertices: usize,
    candidates: usize,
    center_covered: usize,
    overlapping: usize,
}

impl<S> Arrangement<S> {
    /// Create an empty arrangement around `center`.
    pub fn new(center: Point, config: ArrangeConfig) -> Result<Self, ArrangeError> {
        if !center.is_finite() {
            return Err(ArrangeError::InvalidCenter {
                x: center.x,
                y: center.y,
            });
        }
        config.validate()?;
        Ok(Self {
            center,
            config,
            region: Region::new(),
            placed: Vec::new(),
        })
    }

    /// The fixed center placements gravitate toward.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The configuration in effect.
    pub fn config(&self) -> &ArrangeConfig {
        &self.config
    }

    /// The occupied region, closed according to the configuration.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Placed rectangles in the order they were committed.
    pub fn placed(&self) -> &[PlacedRect<S>] {
        &self.placed
    }

    /// Number of placed rectangles.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// True if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Where the arrangement is in its lifecycle.
    pub fn phase(&self) -> Phase {
        match self.placed.len() {
            0 => Phase::Empty,
            1 => Phase::Seeded,
            _ => Phase::Growing,
        }
    }

    /// Bounding box of all placed rectangles.
    pub fn bounds(&self) -> Option<Rect> {
        self.placed
            .iter()
            .map(|p| p.rect)
            .reduce(|acc, r| acc.union(r))
    }

    /// Place a rectangle of the given area and width/height ratio.
    ///
    /// The rectangle is `sqrt(area * aspect_ratio)` wide and `area / width` tall. On
    /// error nothing changes.
    pub fn place(
        &mut self,
        area: f64,
        aspect_ratio: f64,
        source: S,
    ) -> Result<&PlacedRect<S>, ArrangeError> {
        let size = rect_size(area, aspect_ratio)?;
        let half_diagonal = 0.5 * size.width.hypot(size.height);
        let rect = if self.placed.is_empty() {
            let origin = self.center - 0.5 * size.to_vec2();
            Rect::from_origin_size(origin, size)
        } else {
            let Some(rect) = self.search(size, half_diagonal) else {
                warn!(
                    index = self.placed.len(),
                    width = size.width,
                    height = size.height,
                    "no legal position for rectangle"
                );
                return Err(ArrangeError::PlacementExhausted {
                    index: self.placed.len(),
                    width: size.width,
                    height: size.height,
                });
            };
            rect
        };
        self.commit(rect, half_diagonal);
        let index = self.placed.len();
        self.placed.push(PlacedRect { rect, source });
        Ok(&self.placed[index])
    }

    /// Find the legal position nearest the center, if any.
    fn search(&self, size: Size, half_diagonal: f64) -> Option<Rect> {
        let metric = self.config.metric;
        let index = self.region.rect_index();
        let mut frontier: Vec<_> = self
            .region
            .vertices()
            .iter()
            .map(|v| (metric.distance(v.p, self.center), v))
            .collect();
        // Stable, so ties stay in scanline order.
        frontier.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (w, h) = (size.width, size.height);
        let mut stats = SearchStats::default();
        let mut best: Option<(f64, Rect)> = None;
        for (distance, v) in frontier {
            if let Some((best_distance, _)) = best
                && distance > best_distance + half_diagonal
            {
                break;
            }
            stats.vertices += 1;
            let Point { x, y } = v.p;
            // Each anchoring puts one corner of the candidate on the vertex. Only the
            // ones on the empty side of the vertex, told apart by its sign, can fit.
            let anchorings = [
                (Rect::new(x, y, x + w, y + h), -1.0),
                (Rect::new(x - w, y, x, y + h), 1.0),
                (Rect::new(x, y - h, x + w, y), 1.0),
                (Rect::new(x - w, y - h, x, y), -1.0),
            ];
            for (candidate, sign) in anchorings {
                if v.w.signum() != sign {
                    continue;
                }
                stats.candidates += 1;
                let c = candidate.center();
                if index.contains_point(c.x, c.y) {
                    stats.center_covered += 1;
                    continue;
                }
                let aabb = Aabb2D::new(candidate.x0, candidate.y0, candidate.x1, candidate.y1);
                if index.overlaps(&aabb) {
                    stats.overlapping += 1;
                    continue;
                }
                let d = metric.distance(c, self.center);
                if best.is_none_or(|(best_distance, _)| d < best_distance) {
                    best = Some((d, candidate));
                }
            }
            if self.config.heuristic == Heuristic::First && best.is_some() {
                break;
            }
        }
        trace!(
            frontier = self.region.len(),
            vertices = stats.vertices,
            candidates = stats.candidates,
            center_covered = stats.center_covered,
            overlapping = stats.overlapping,
            best = ?best.map(|(d, _)| d),
            "frontier search"
        );
        best.map(|(_, rect)| rect)
    }

    /// Fold `rect` into the occupied region and close it when due.
    fn commit(&mut self, rect: Rect, half_diagonal: f64) {
        let count = self.placed.len() + 1;
        self.region = morph::union(&self.region, &Region::from_rect(rect));
        debug!(
            index = count - 1,
            x = rect.x0,
            y = rect.y0,
            width = rect.width(),
            height = rect.height(),
            "placed rectangle"
        );
        if count % self.config.close_every == 0 {
            let amount = half_diagonal * self.config.close_factor;
            self.region = morph::close(&self.region, amount);
            debug!(amount, vertices = self.region.len(), "closed region");
        }
    }
}

/// Width and height for a request, or the reason it is invalid.
fn rect_size(area: f64, aspect_ratio: f64) -> Result<Size, ArrangeError> {
    if !(area.is_finite() && area > 0.0) {
        return Err(ArrangeError::InvalidArea { area });
    }
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(ArrangeError::InvalidAspectRatio { aspect_ratio });
    }
    let width = (area * aspect_ratio).sqrt();
    let height = area / width;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ArrangeError::InvalidArea { area });
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Metric;

    const TOLERANCE: f64 = 1e-9;

    // Xorshift generator for deterministic request streams.
    struct Rng(u64);

    impl Rng {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn next_f64(&mut self) -> f64 {
            let v = self.next_u64() >> 11;
            (v as f64) / ((1_u64 << 53) as f64)
        }
    }

    fn assert_disjoint<S>(placed: &[PlacedRect<S>]) {
        for (i, a) in placed.iter().enumerate() {
            for (j, b) in placed.iter().enumerate().skip(i + 1) {
                let common = a.rect.intersect(b.rect);
                assert!(
                    !(common.width() > 0.0 && common.height() > 0.0),
                    "rect {i} {:?} and rect {j} {:?} share interior",
                    a.rect,
                    b.rect
                );
            }
        }
    }

    fn assert_covered<S>(arrangement: &Arrangement<S>) {
        let region = arrangement.region();
        for (i, p) in arrangement.placed().iter().enumerate() {
            let uncovered = Region::from_rect(p.rect)
                .add(&region.scale(-1.0))
                .transform(morph::indicator);
            assert!(uncovered.is_empty(), "rect {i} {:?} sticks out of the region", p.rect);
        }
    }

    fn random_arrangement(config: ArrangeConfig, seed: u64, n: usize) -> Arrangement<usize> {
        let mut rng = Rng(seed);
        let mut arrangement = Arrangement::new(Point::new(400.0, 300.0), config).unwrap();
        for i in 0..n {
            let area = 100.0 + 9_900.0 * rng.next_f64();
            let aspect = 0.5 + 1.5 * rng.next_f64();
            arrangement.place(area, aspect, i).unwrap();
        }
        arrangement
    }

    #[test]
    fn first_rect_is_centered() {
        let mut arrangement = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
        assert_eq!(arrangement.phase(), Phase::Empty);
        let placed = arrangement.place(100.0, 1.0, 7).unwrap();
        assert_eq!(
            placed.corners(),
            [
                Point::new(-5.0, -5.0),
                Point::new(5.0, -5.0),
                Point::new(-5.0, 5.0),
                Point::new(5.0, 5.0),
            ]
        );
        assert_eq!(placed.source, 7);
        assert_eq!(arrangement.phase(), Phase::Seeded);
        assert_eq!(arrangement.region(), &Region::from_rect(Rect::new(-5.0, -5.0, 5.0, 5.0)));
    }

    #[test]
    fn second_rect_is_adjacent() {
        let mut arrangement = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
        arrangement.place(100.0, 1.0, 0).unwrap();
        let second = arrangement.place(100.0, 1.0, 1).unwrap().rect;
        assert_eq!(arrangement.phase(), Phase::Growing);
        // Ties between the four sides keep the first corner in scanline order.
        assert_eq!(second, Rect::new(-15.0, -5.0, -5.0, 5.0));
        assert_disjoint(arrangement.placed());
        assert_eq!(
            arrangement.bounds(),
            Some(Rect::new(-15.0, -5.0, 5.0, 5.0))
        );
    }

    #[test]
    fn rectangles_fill_around_the_center() {
        let mut arrangement = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
        for i in 0..9 {
            arrangement.place(100.0, 1.0, i).unwrap();
        }
        assert_disjoint(arrangement.placed());
        // Nine equal squares around the center make a 3 x 3 block.
        assert_eq!(arrangement.bounds(), Some(Rect::new(-15.0, -15.0, 15.0, 15.0)));
        assert_eq!(
            arrangement.region(),
            &Region::from_rect(Rect::new(-15.0, -15.0, 15.0, 15.0))
        );
    }

    #[test]
    fn invalid_requests_leave_state_untouched() {
        let mut arrangement = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
        arrangement.place(100.0, 1.0, 0).unwrap();
        let before = arrangement.clone();

        for (area, aspect) in [
            (0.0, 1.0),
            (-1.0, 1.0),
            (f64::NAN, 1.0),
            (f64::INFINITY, 1.0),
            (100.0, 0.0),
            (100.0, -2.0),
            (100.0, f64::NAN),
            (f64::MAX, f64::MAX),
        ] {
            let err = arrangement.place(area, aspect, 1).unwrap_err();
            assert!(err.is_invalid_input(), "{err}");
        }
        assert_eq!(
            arrangement.place(0.0, 1.0, 1).unwrap_err(),
            ArrangeError::InvalidArea { area: 0.0 }
        );
        assert_eq!(arrangement.placed(), before.placed());
        assert_eq!(arrangement.region(), before.region());
    }

    #[test]
    fn bad_center_or_config_is_rejected() {
        let err = Arrangement::<()>::new(Point::new(f64::NAN, 0.0), ArrangeConfig::default())
            .unwrap_err();
        assert!(matches!(err, ArrangeError::InvalidCenter { .. }));
        let err =
            Arrangement::<()>::new(Point::ORIGIN, ArrangeConfig::default().with_close_every(0))
                .unwrap_err();
        assert!(matches!(err, ArrangeError::InvalidConfig(_)));
    }

    #[test]
    fn exhausted_search_reports_and_keeps_state() {
        let mut arrangement = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
        arrangement.place(100.0, 1.0, 0).unwrap();
        // A frontier with no vertices offers no anchors.
        arrangement.region = Region::new();
        let err = arrangement.place(50.0, 2.0, 1).unwrap_err();
        assert!(matches!(
            err,
            ArrangeError::PlacementExhausted { index: 1, width, height }
                if width == 10.0 && height == 5.0
        ));
        assert!(!err.is_invalid_input());
        assert_eq!(arrangement.len(), 1);
    }

    #[test]
    fn random_requests_never_overlap() {
        for metric in [Metric::Euclidean, Metric::Chebyshev, Metric::Manhattan] {
            for heuristic in [Heuristic::Best, Heuristic::First] {
                let config = ArrangeConfig::default()
                    .with_metric(metric)
                    .with_heuristic(heuristic);
                let arrangement = random_arrangement(config, 0xDEAD_BEEF_CAFE_F00D, 40);
                assert_eq!(arrangement.len(), 40);
                assert_disjoint(arrangement.placed());
                assert_covered(&arrangement);
                let sources: Vec<_> = arrangement.placed().iter().map(|p| p.source).collect();
                assert_eq!(sources, (0..40).collect::<Vec<_>>());
                // The center stays covered.
                let first = arrangement.placed()[0].rect;
                assert!(first.contains(arrangement.center()));
            }
        }
    }

    #[test]
    fn closing_keeps_placed_rects_covered() {
        // The default close distance is a fifth of an irrational half-diagonal, so the
        // dilate/erode round trip does not land back on the original edges.
        for seed in [0xDEAD_BEEF_CAFE_F00D, 0x1234_5678_9ABC_DEF1, 0x0F0F_1E1E_2D2D_3C3C, 7] {
            for metric in [Metric::Euclidean, Metric::Chebyshev, Metric::Manhattan] {
                let config = ArrangeConfig::default().with_metric(metric);
                let mut arrangement = Arrangement::new(Point::new(400.0, 300.0), config).unwrap();
                let mut rng = Rng(seed);
                for i in 0..30 {
                    let area = 100.0 + 9_900.0 * rng.next_f64();
                    let aspect = 0.5 + 1.5 * rng.next_f64();
                    arrangement.place(area, aspect, i).unwrap();
                    assert_covered(&arrangement);
                }
                assert_disjoint(arrangement.placed());
            }
        }
    }

    #[test]
    fn sparse_closing_still_packs() {
        let config = ArrangeConfig::default()
            .with_close_every(4)
            .with_close_factor(0.5);
        let arrangement = random_arrangement(config, 0x0123_4567_89AB_CDEF, 30);
        assert_eq!(arrangement.len(), 30);
        assert_disjoint(arrangement.placed());
        assert_covered(&arrangement);
        let bounds = arrangement.bounds().unwrap();
        for p in arrangement.placed() {
            assert_eq!(bounds.union(p.rect), bounds);
            // Placed rectangles are part of the occupied region.
            assert_eq!(arrangement.region().value(p.rect.center()), 1.0);
        }
    }

    #[test]
    fn best_is_no_farther_than_first() {
        // With identical history the exhaustive search can only do as well or better.
        let mut best = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
        let mut rng = Rng(42);
        for i in 0..20 {
            let area = 50.0 + 500.0 * rng.next_f64();
            let aspect = 0.5 + rng.next_f64();
            let mut first = best.clone();
            first.config.heuristic = Heuristic::First;
            let b = best.place(area, aspect, i).unwrap().rect.center();
            let f = first.place(area, aspect, i).unwrap().rect.center();
            let metric = Metric::Euclidean;
            assert!(
                metric.distance(b, Point::ORIGIN)
                    <= metric.distance(f, Point::ORIGIN) + TOLERANCE,
                "step {i}"
            );
        }
    }
}

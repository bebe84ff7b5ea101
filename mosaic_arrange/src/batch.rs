// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placing many requests at once and fitting the result to a viewport.

use core::ops::RangeInclusive;

use kurbo::{Affine, Rect, Size, Vec2};
use tracing::debug;

use crate::arrangement::Arrangement;
use crate::error::ArrangeError;

/// One rectangle to place.
#[derive(Clone, Debug, PartialEq)]
pub struct Request<S> {
    /// Target area.
    pub area: f64,
    /// Width divided by height.
    pub aspect_ratio: f64,
    /// Identifier carried through to the placed rectangle.
    pub source: S,
}

impl<S> Request<S> {
    /// Create a request.
    pub fn new(area: f64, aspect_ratio: f64, source: S) -> Self {
        Self {
            area,
            aspect_ratio,
            source,
        }
    }
}

impl<S> Arrangement<S> {
    /// Place `requests` in order.
    ///
    /// `progress(done, total)` is called after every successful placement. Stops at the
    /// first error; rectangles placed before it stay placed.
    ///
    /// ```
    /// use kurbo::Point;
    /// use mosaic_arrange::{ArrangeConfig, Arrangement, Request};
    ///
    /// let mut arrangement = Arrangement::new(Point::ORIGIN, ArrangeConfig::default()).unwrap();
    /// let requests = (0..5).map(|i| Request::new(100.0, 1.5, i));
    /// let mut last = (0, 0);
    /// arrangement.place_all(requests, |done, total| last = (done, total)).unwrap();
    /// assert_eq!(last, (5, 5));
    /// assert_eq!(arrangement.len(), 5);
    /// ```
    pub fn place_all<I>(
        &mut self,
        requests: I,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<(), ArrangeError>
    where
        I: IntoIterator<Item = Request<S>>,
        I::IntoIter: ExactSizeIterator,
    {
        let requests = requests.into_iter();
        let total = requests.len();
        debug!(total, "placing batch");
        for (i, request) in requests.enumerate() {
            self.place(request.area, request.aspect_ratio, request.source)?;
            progress(i + 1, total);
        }
        Ok(())
    }
}

/// Order requests from largest to smallest area.
///
/// Big rectangles placed first end up near the center and small ones fill in around
/// them, which gives the densest arrangements.
pub fn largest_first<S>(requests: &mut [Request<S>]) {
    requests.sort_by(|a, b| b.area.total_cmp(&a.area));
}

/// Map `value` linearly from `domain` onto `range`, clamping at both ends.
///
/// A degenerate domain maps everything to the start of `range`.
///
/// ```
/// use mosaic_arrange::scale_to_range;
///
/// assert_eq!(scale_to_range(5.0, 0.0..=10.0, 100.0..=200.0), 150.0);
/// assert_eq!(scale_to_range(-3.0, 0.0..=10.0, 100.0..=200.0), 100.0);
/// assert_eq!(scale_to_range(42.0, 0.0..=10.0, 100.0..=200.0), 200.0);
/// ```
pub fn scale_to_range(value: f64, domain: RangeInclusive<f64>, range: RangeInclusive<f64>) -> f64 {
    let (d0, d1) = (*domain.start(), *domain.end());
    let (r0, r1) = (*range.start(), *range.end());
    if d0 == d1 || value <= d0 {
        return r0;
    }
    if value >= d1 {
        return r1;
    }
    (value - d0) * (r1 - r0) / (d1 - d0) + r0
}

/// Uniform scale and translation that centers `bounds` in a `viewport` sized area,
/// leaving at least `padding` in total along the tighter axis.
///
/// Axes along which `bounds` has no extent do not constrain the scale; if neither
/// does, the scale is 1.
pub fn fit_transform(bounds: Rect, viewport: Size, padding: f64) -> Affine {
    let avail = Size::new(viewport.width - padding, viewport.height - padding);
    let sx = (bounds.width() > 0.0).then(|| avail.width / bounds.width());
    let sy = (bounds.height() > 0.0).then(|| avail.height / bounds.height());
    let scale = match (sx, sy) {
        (Some(a), Some(b)) => a.min(b),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    };
    let offset = Vec2::new(
        -bounds.x0 * scale + (viewport.width - bounds.width() * scale) / 2.0,
        -bounds.y0 * scale + (viewport.height - bounds.height() * scale) / 2.0,
    );
    Affine::translate(offset) * Affine::scale(scale)
}

// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search heuristics, distance metrics and tuning knobs.

use kurbo::Point;

use crate::error::ArrangeError;

/// How much of the frontier to examine per placement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Heuristic {
    /// Stop after the nearest frontier vertex that yields any legal candidate.
    ///
    /// Much faster on large arrangements but may miss a closer slot offered by a
    /// slightly farther vertex.
    First,
    /// Examine every frontier vertex that could still beat the best candidate.
    #[default]
    Best,
}

/// Distance used to rank vertices and candidate centers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Metric {
    /// Straight-line distance. Grows round arrangements.
    #[default]
    Euclidean,
    /// Largest axis difference. Grows square arrangements.
    #[cfg_attr(feature = "serde", serde(alias = "chessboard"))]
    Chebyshev,
    /// Sum of axis differences. Grows diamond-shaped arrangements.
    Manhattan,
}

impl Metric {
    /// Distance between `a` and `b`.
    pub fn distance(self, a: Point, b: Point) -> f64 {
        let d = a - b;
        match self {
            Self::Euclidean => d.hypot(),
            Self::Chebyshev => d.x.abs().max(d.y.abs()),
            Self::Manhattan => d.x.abs() + d.y.abs(),
        }
    }
}

/// Settings for an [`Arrangement`](crate::Arrangement).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ArrangeConfig {
    /// Frontier search strategy.
    pub heuristic: Heuristic,
    /// Distance to the center that placements minimize.
    pub metric: Metric,
    /// Close the occupied region after every `close_every` placements. Must be nonzero.
    pub close_every: usize,
    /// Closing distance as a fraction of the just-placed rectangle's half-diagonal.
    ///
    /// Gaps narrower than roughly twice that distance are sealed and never offered
    /// as slots. Must be positive and finite.
    pub close_factor: f64,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Best,
            metric: Metric::Euclidean,
            close_every: 1,
            close_factor: 0.2,
        }
    }
}

impl ArrangeConfig {
    /// Replace the heuristic.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Replace the metric.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Replace the closing period.
    #[must_use]
    pub fn with_close_every(mut self, close_every: usize) -> Self {
        self.close_every = close_every;
        self
    }

    /// Replace the closing factor.
    #[must_use]
    pub fn with_close_factor(mut self, close_factor: f64) -> Self {
        self.close_factor = close_factor;
        self
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), ArrangeError> {
        if self.close_every == 0 {
            return Err(ArrangeError::InvalidConfig("close_every must be nonzero"));
        }
        if !(self.close_factor.is_finite() && self.close_factor > 0.0) {
            return Err(ArrangeError::InvalidConfig(
                "close_factor must be positive and finite",
            ));
        }
        Ok(())
    }
}

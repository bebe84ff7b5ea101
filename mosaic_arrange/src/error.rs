// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the arrangement engine.

use thiserror::Error;

/// Why a request was refused.
///
/// Every variant leaves the arrangement exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ArrangeError {
    /// The requested area is zero, negative, or not finite.
    #[error("area must be positive and finite, got {area}")]
    InvalidArea {
        /// Rejected value.
        area: f64,
    },

    /// The requested aspect ratio is zero, negative, or not finite.
    #[error("aspect ratio must be positive and finite, got {aspect_ratio}")]
    InvalidAspectRatio {
        /// Rejected value.
        aspect_ratio: f64,
    },

    /// The arrangement center has a non-finite coordinate.
    #[error("center must be finite, got ({x}, {y})")]
    InvalidCenter {
        /// Rejected x.
        x: f64,
        /// Rejected y.
        y: f64,
    },

    /// A configuration field is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// No legal position was found for the rectangle.
    #[error("could not find a place for rectangle #{index} ({width} x {height})")]
    PlacementExhausted {
        /// Position the rectangle would have taken in the placement order.
        index: usize,
        /// Width of the rejected rectangle.
        width: f64,
        /// Height of the rejected rectangle.
        height: f64,
    },
}

impl ArrangeError {
    /// Whether the error is due to bad input rather than the search failing.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::PlacementExhausted { .. })
    }
}

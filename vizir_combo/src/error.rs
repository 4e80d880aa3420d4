// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for malformed render inputs.
//!
//! Data problems (missing fields, text in numeric columns, unknown types) never surface here;
//! only arguments that no render could honor do.

use core::fmt;

use crate::series::Axis;

/// Errors returned by the render entry points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderError {
    /// The content area is negative or not finite.
    InvalidContentSize {
        /// Supplied width.
        width: f64,
        /// Supplied height.
        height: f64,
    },
    /// The domain headroom factor is not finite or is below `1`.
    InvalidHeadroom {
        /// Supplied factor.
        headroom: f64,
    },
    /// A caller-supplied axis domain is not finite or has `min > max`.
    InvalidDomain {
        /// Axis the override was supplied for.
        axis: Axis,
        /// Supplied lower bound.
        min: f64,
        /// Supplied upper bound.
        max: f64,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContentSize { width, height } => {
                write!(f, "invalid content size {width}x{height}")
            }
            Self::InvalidHeadroom { headroom } => {
                write!(f, "invalid domain headroom factor {headroom}")
            }
            Self::InvalidDomain { axis, min, max } => write!(
                f,
                "invalid {} axis domain [{min}, {max}]",
                axis.as_str()
            ),
        }
    }
}

impl core::error::Error for RenderError {}

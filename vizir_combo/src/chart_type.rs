// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of series types a combo chart understands.

use crate::z_order::{self, LayerGroup};

/// A series chart type.
///
/// Configuration may carry tags this crate does not know; those parse to
/// [`ChartType::Unrecognized`] and are drawn as plain points after every known type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartType {
    /// Areas summed per row within a stack group.
    StackedArea,
    /// Area filled from the baseline.
    Area,
    /// Vertical bars, tiled within a category band by group.
    Bar,
    /// Running-total bars driven by a per-row type field.
    Waterfall,
    /// Scatter points.
    Scatter,
    /// Polyline.
    Line,
    /// A tag this crate does not recognize.
    Unrecognized,
}

/// How a chart type contributes values to its axis domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregation {
    /// Raw per-row values.
    Identity,
    /// Per-row sums across a stack group.
    Stacked,
    /// Running totals (waterfall).
    Cumulative,
}

impl ChartType {
    /// Every recognized chart type, in rank order.
    pub const KNOWN: [Self; 6] = [
        Self::StackedArea,
        Self::Area,
        Self::Bar,
        Self::Waterfall,
        Self::Line,
        Self::Scatter,
    ];

    /// Parses a configuration tag such as `"stackedArea"` or `"bar"`.
    ///
    /// Matching ignores ASCII case, `-` and `_`. Unknown tags yield [`ChartType::Unrecognized`].
    pub fn from_tag(tag: &str) -> Self {
        let mut buf = [0_u8; 16];
        let mut len = 0;
        for b in tag.bytes().filter(|b| *b != b'-' && *b != b'_') {
            if len == buf.len() {
                return Self::Unrecognized;
            }
            buf[len] = b.to_ascii_lowercase();
            len += 1;
        }
        match &buf[..len] {
            b"stackedarea" => Self::StackedArea,
            b"area" => Self::Area,
            b"bar" => Self::Bar,
            b"waterfall" => Self::Waterfall,
            b"scatter" => Self::Scatter,
            b"line" => Self::Line,
            _ => Self::Unrecognized,
        }
    }

    /// Returns the canonical camelCase tag, or `None` for unrecognized types.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::StackedArea => Some("stackedArea"),
            Self::Area => Some("area"),
            Self::Bar => Some("bar"),
            Self::Waterfall => Some("waterfall"),
            Self::Scatter => Some("scatter"),
            Self::Line => Some("line"),
            Self::Unrecognized => None,
        }
    }

    /// Returns the layer rank (see [`z_order::rank`]).
    pub fn rank(self) -> i32 {
        z_order::rank(self)
    }

    /// Returns the layer group (see [`z_order::group`]).
    pub fn group(self) -> Option<LayerGroup> {
        z_order::group(self)
    }

    /// Returns the domain aggregation behavior of this type.
    pub fn aggregation(self) -> Aggregation {
        match self {
            Self::StackedArea => Aggregation::Stacked,
            Self::Waterfall => Aggregation::Cumulative,
            Self::Area | Self::Bar | Self::Scatter | Self::Line | Self::Unrecognized => {
                Aggregation::Identity
            }
        }
    }
}

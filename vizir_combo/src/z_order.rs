// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical layer ranks for combo chart series.
//!
//! Lower ranks are drawn first (behind). Ranks depend only on the chart type, never on
//! declaration order; two series with the same rank keep their declaration order.

extern crate alloc;

use alloc::vec::Vec;

use crate::ChartType;
use crate::series::SeriesDeclaration;

/// Stacked areas, drawn behind everything else.
pub const STACKED_AREA: i32 = 0;
/// Plain areas.
pub const AREA: i32 = 1;
/// Grouped bars.
pub const BAR: i32 = 2;
/// Waterfall bars.
pub const WATERFALL: i32 = 3;
/// Lines drawn above filled series.
pub const LINE: i32 = 4;
/// Scatter points drawn above lines.
pub const SCATTER: i32 = 5;

/// Rank used for chart types this crate does not recognize.
///
/// Unrecognized series are still drawn, just after every known type.
pub const UNRECOGNIZED: i32 = 100;

/// Coarse classification of a chart type's role in the composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerGroup {
    /// Filled regions that provide context (areas).
    Background,
    /// The main categorical marks (bars).
    Primary,
    /// Marks drawn on top of the primary layer (lines, points).
    Overlay,
    /// Types with their own aggregation semantics (waterfall).
    Specialty,
}

/// Returns the layer rank for `chart_type`.
pub fn rank(chart_type: ChartType) -> i32 {
    match chart_type {
        ChartType::StackedArea => STACKED_AREA,
        ChartType::Area => AREA,
        ChartType::Bar => BAR,
        ChartType::Waterfall => WATERFALL,
        ChartType::Line => LINE,
        ChartType::Scatter => SCATTER,
        ChartType::Unrecognized => UNRECOGNIZED,
    }
}

/// Returns the layer group for `chart_type`, or `None` if the type is unrecognized.
pub fn group(chart_type: ChartType) -> Option<LayerGroup> {
    match chart_type {
        ChartType::StackedArea | ChartType::Area => Some(LayerGroup::Background),
        ChartType::Bar => Some(LayerGroup::Primary),
        ChartType::Line | ChartType::Scatter => Some(LayerGroup::Overlay),
        ChartType::Waterfall => Some(LayerGroup::Specialty),
        ChartType::Unrecognized => None,
    }
}

/// Returns declaration indices of `series` in draw order.
///
/// The sort is stable: ties on rank keep declaration order.
pub fn layer_order(series: &[SeriesDeclaration]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..series.len()).collect();
    order.sort_by_key(|&i| rank(series[i].chart_type));
    order
}

/// Returns `series` in draw order, each paired with its declaration index.
pub fn sort_by_layer(series: &[SeriesDeclaration]) -> Vec<(usize, &SeriesDeclaration)> {
    layer_order(series)
        .into_iter()
        .map(|i| (i, &series[i]))
        .collect()
}

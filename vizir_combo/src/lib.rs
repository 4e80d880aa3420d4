// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combo chart planning for VizIR.
//!
//! A combo chart draws heterogeneous series (bars, lines, areas, stacked areas, scatter points,
//! waterfalls) over one shared X axis and up to two independent Y axes. This crate decides the
//! numbers behind such a chart, not the pixels' paint:
//! - **Domains**: each Y axis pools values from its series, honoring per-type aggregation
//!   (raw values, stacked sums, waterfall running totals).
//! - **Scales**: one [`ScaleTable`] per render pass holds the `x`, `leftY` and `rightY` scales.
//! - **Grouping**: bars sharing a group key tile a category band; stacked areas are grouped and
//!   handed on with their stack policies.
//! - **Layering**: series are drawn in a fixed per-type rank order, ties kept in declaration
//!   order.
//!
//! The output is a [`RenderPlan`]: series in draw order, each with pixel-mapped points and a
//! [`Shape`] for a downstream shape renderer. Drawing, axes and legends are out of scope.
//!
//! ```
//! use vizir_combo::{Axis, ChartType, ComboChartSpec, Row, SeriesDeclaration};
//! use kurbo::Size;
//!
//! let rows = [
//!     Row::new().with("month", "Jan").with("sales", 10.0).with("rate", 0.4),
//!     Row::new().with("month", "Feb").with("sales", 14.0).with("rate", 0.7),
//! ];
//! let plan = ComboChartSpec::new("month", Size::new(400.0, 300.0))
//!     .with_series(SeriesDeclaration::new(ChartType::Line, "rate").with_axis(Axis::Right))
//!     .with_series(SeriesDeclaration::new(ChartType::Bar, "sales"))
//!     .render(&rows)
//!     .unwrap();
//!
//! // Bars are drawn before lines regardless of declaration order.
//! assert_eq!(plan.draw_order(), vec![1, 0]);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod chart_type;
mod combo_chart;
#[cfg(test)]
mod combo_tests;
mod diagnostics;
mod dispatch;
mod domain;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod grouping;
mod plan;
mod scale;
mod scale_table;
mod series;
mod time;
mod value;
mod waterfall;
pub mod z_order;

pub use chart_type::{Aggregation, ChartType};
pub use combo_chart::{AxisOverrides, ComboChartSpec, render};
#[cfg(feature = "tracing")]
pub use diagnostics::TracingSink;
pub use diagnostics::{Diagnostic, DiagnosticSink, FnSink, NullSink};
pub use dispatch::{Dispatcher, PlannedSeries, PlotPoint, Shape};
pub use domain::{
    AxisDomains, CandidatePool, DEFAULT_HEADROOM, Extent, axis_candidates, resolve_axis,
    resolve_domains, resolve_domains_with, widen,
};
pub use error::RenderError;
pub use grouping::{
    BarGroup, BarSlot, GroupLayout, GroupMembers, Placement, StackGroup, allocate, bar_groups,
    bar_slots, stack_groups,
};
pub use plan::RenderPlan;
pub use scale::{
    DEFAULT_BAND_PADDING, DEFAULT_TICK_COUNT, Scale, ScaleBand, ScaleKind, ScaleLinear,
    ScaleLinearSpec, ScaleTime,
};
pub use scale_table::{DomainSource, RegisteredScale, ScaleKey, ScaleMetadata, ScaleTable};
pub use series::{
    Axis, Curve, DEFAULT_GROUP_KEY, SeriesDeclaration, SeriesStyle, StackOffset, StackOrder,
    palette_color,
};
pub use time::nice_time_ticks_millis;
pub use value::{Row, Value, coerce_number};
pub use waterfall::{WaterfallKind, WaterfallStep, waterfall_steps};
pub use z_order::{LayerGroup, layer_order, sort_by_layer};

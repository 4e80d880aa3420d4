// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series dispatch.
//!
//! The dispatcher walks series in layer order, looks up the scales each one needs, and maps
//! every row into pixel space. The result is one [`PlannedSeries`] per drawable series: a
//! [`Shape`] describing what to draw plus the mapped points. Drawing itself is left to the
//! caller's shape renderer.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Color;

use crate::ChartType;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::grouping::{BarSlot, GroupLayout, Placement};
use crate::scale::ScaleLinear;
use crate::scale_table::{ScaleKey, ScaleTable};
use crate::series::{Axis, Curve, SeriesDeclaration, StackOffset, StackOrder, palette_color};
use crate::value::Row;
use crate::waterfall::{WaterfallKind, waterfall_steps};
use crate::z_order::LayerGroup;

/// One row of a series mapped into pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    /// Source row index.
    pub row: usize,
    /// The row value after numeric coercion.
    pub value: f64,
    /// Mapped position. For bars this is the bar's top-center (or bottom-center when negative).
    pub pos: Point,
    /// Mapped y of the point's baseline: zero for most types, the pre-value for waterfall steps.
    pub baseline: f64,
}

/// What the shape renderer should draw for a series.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// One bar per point, centered on `pos.x`.
    Bars {
        /// Slot within the category band.
        slot: BarSlot,
    },
    /// One floating bar per point, spanning `baseline..pos.y`.
    Waterfall {
        /// Bar width.
        width: f64,
        /// Step kind per point.
        kinds: Vec<WaterfallKind>,
    },
    /// Area filled down to the baseline.
    Area {
        /// Interpolation.
        curve: Curve,
    },
    /// One layer of a stack group; the renderer computes the stack geometry.
    StackedArea {
        /// Index into the plan's stack groups.
        group: usize,
        /// Position within the group.
        position: usize,
        /// Stack order policy of the group.
        order: StackOrder,
        /// Stack baseline policy of the group.
        offset: StackOffset,
        /// Interpolation.
        curve: Curve,
    },
    /// Polyline through the points.
    Line {
        /// Interpolation.
        curve: Curve,
        /// Stroke width.
        stroke_width: f64,
    },
    /// Scatter glyphs.
    Scatter {
        /// Glyph radius.
        radius: f64,
    },
    /// Plain points for series of unrecognized type.
    Points {
        /// Glyph radius.
        radius: f64,
    },
}

/// A series ready for a shape renderer.
#[derive(Clone, Debug)]
pub struct PlannedSeries {
    /// Declaration index.
    pub index: usize,
    /// Chart type.
    pub chart_type: ChartType,
    /// Y axis binding.
    pub axis: Axis,
    /// Layer rank.
    pub rank: i32,
    /// Layer group.
    pub layer_group: Option<LayerGroup>,
    /// Display label.
    pub label: Option<String>,
    /// Handle of the X scale in the plan's scale table.
    pub x_scale: ScaleKey,
    /// Handle of the Y scale in the plan's scale table.
    pub y_scale: ScaleKey,
    /// Series paint.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// What to draw.
    pub shape: Shape,
    /// Mapped points, in row order.
    pub points: Vec<PlotPoint>,
}

/// Maps declared series into [`PlannedSeries`] using a populated [`ScaleTable`].
#[derive(Clone, Copy, Debug)]
pub struct Dispatcher<'a> {
    rows: &'a [Row],
    x_field: &'a str,
    series: &'a [SeriesDeclaration],
    layout: &'a GroupLayout,
    scales: &'a ScaleTable,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over one render pass's inputs.
    pub fn new(
        rows: &'a [Row],
        x_field: &'a str,
        series: &'a [SeriesDeclaration],
        layout: &'a GroupLayout,
        scales: &'a ScaleTable,
    ) -> Self {
        Self {
            rows,
            x_field,
            series,
            layout,
            scales,
        }
    }

    /// Plans every series in `order` (declaration indices, typically layer order).
    ///
    /// Series whose scales are missing are skipped and reported to `sink`.
    pub fn dispatch(&self, order: &[usize], sink: &mut dyn DiagnosticSink) -> Vec<PlannedSeries> {
        let x_positions: Option<Vec<Option<f64>>> = self.scales.get(ScaleKey::X).map(|x| {
            self.rows
                .iter()
                .map(|row| x.position(row.get(self.x_field)))
                .collect()
        });

        order
            .iter()
            .filter_map(|&index| {
                let Some(x_positions) = x_positions.as_deref() else {
                    sink.report(Diagnostic::MissingScale {
                        series: index,
                        scale: ScaleKey::X,
                    });
                    return None;
                };
                self.plan(index, x_positions, sink)
            })
            .collect()
    }

    fn plan(
        &self,
        index: usize,
        x_positions: &[Option<f64>],
        sink: &mut dyn DiagnosticSink,
    ) -> Option<PlannedSeries> {
        let s = self.series.get(index)?;
        let y_key = s.axis.scale_key();
        let Some(y) = self.scales.linear(y_key) else {
            sink.report(Diagnostic::MissingScale {
                series: index,
                scale: y_key,
            });
            return None;
        };

        let placement = self.layout.placement(index);
        let x_offset = match placement {
            Placement::Bar(slot) => slot.offset,
            Placement::Stack { .. } | Placement::Center => 0.0,
        };

        let (points, kinds) = match s.chart_type {
            ChartType::Waterfall => self.waterfall_points(s, y, x_positions, x_offset),
            ChartType::StackedArea
            | ChartType::Area
            | ChartType::Bar
            | ChartType::Line
            | ChartType::Scatter
            | ChartType::Unrecognized => {
                (self.value_points(s, y, x_positions, x_offset), Vec::new())
            }
        };

        let style = s.style;
        let shape = match s.chart_type {
            ChartType::Bar => Shape::Bars {
                slot: match placement {
                    Placement::Bar(slot) => slot,
                    Placement::Stack { .. } | Placement::Center => BarSlot::full(0.0),
                },
            },
            ChartType::Waterfall => Shape::Waterfall {
                width: match placement {
                    Placement::Bar(slot) => slot.width,
                    Placement::Stack { .. } | Placement::Center => 0.0,
                },
                kinds,
            },
            ChartType::Area => Shape::Area { curve: style.curve },
            ChartType::StackedArea => {
                let (group, position) = match placement {
                    Placement::Stack { group, position } => (group, position),
                    Placement::Bar(_) | Placement::Center => (0, 0),
                };
                let stack = self.layout.stack_groups.get(group);
                Shape::StackedArea {
                    group,
                    position,
                    order: stack.map_or(style.stack_order, |g| g.order),
                    offset: stack.map_or(style.stack_offset, |g| g.offset),
                    curve: style.curve,
                }
            }
            ChartType::Line => Shape::Line {
                curve: style.curve,
                stroke_width: style.stroke_width,
            },
            ChartType::Scatter => Shape::Scatter {
                radius: style.point_radius,
            },
            ChartType::Unrecognized => {
                sink.report(Diagnostic::UnrecognizedChartType {
                    series: index,
                    tag: s.tag.clone(),
                });
                Shape::Points {
                    radius: style.point_radius,
                }
            }
        };

        Some(PlannedSeries {
            index,
            chart_type: s.chart_type,
            axis: s.axis,
            rank: s.chart_type.rank(),
            layer_group: s.chart_type.group(),
            label: s.label.clone(),
            x_scale: ScaleKey::X,
            y_scale: y_key,
            color: s.color.unwrap_or_else(|| palette_color(index)),
            opacity: style.opacity,
            shape,
            points,
        })
    }

    fn value_points(
        &self,
        s: &SeriesDeclaration,
        y: &ScaleLinear,
        x_positions: &[Option<f64>],
        x_offset: f64,
    ) -> Vec<PlotPoint> {
        let baseline = y.map(y.clamp(0.0));
        self.rows
            .iter()
            .zip(x_positions)
            .enumerate()
            .filter_map(|(row, (r, x))| {
                let x = (*x)?;
                let value = r.number(&s.value_field);
                Some(PlotPoint {
                    row,
                    value,
                    pos: Point::new(x + x_offset, y.map(value)),
                    baseline,
                })
            })
            .collect()
    }

    fn waterfall_points(
        &self,
        s: &SeriesDeclaration,
        y: &ScaleLinear,
        x_positions: &[Option<f64>],
        x_offset: f64,
    ) -> (Vec<PlotPoint>, Vec<WaterfallKind>) {
        let steps = waterfall_steps(self.rows, &s.value_field, s.type_field.as_deref());
        self.rows
            .iter()
            .zip(x_positions)
            .zip(steps)
            .enumerate()
            .filter_map(|(row, ((r, x), step))| {
                let x = (*x)?;
                let point = PlotPoint {
                    row,
                    value: r.number(&s.value_field),
                    pos: Point::new(x + x_offset, y.map(step.end)),
                    baseline: y.map(step.start),
                };
                Some((point, step.kind))
            })
            .unzip()
    }
}

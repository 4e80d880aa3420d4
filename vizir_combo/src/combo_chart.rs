// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combo chart composition.
//!
//! A render pass runs, in order:
//! 1. domain resolution for both Y axes (unless overridden),
//! 2. scale registration (`x`, `leftY`, `rightY`),
//! 3. bar/stack grouping against the X band width,
//! 4. layer sorting,
//! 5. dispatch into a [`RenderPlan`].
//!
//! Every pass starts from scratch; nothing is cached between passes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

use crate::diagnostics::{Diagnostic, DiagnosticSink, NullSink};
use crate::dispatch::Dispatcher;
use crate::domain::{AxisDomains, DEFAULT_HEADROOM, Extent, resolve_domains_with};
use crate::error::RenderError;
use crate::grouping::allocate;
use crate::plan::RenderPlan;
use crate::scale::{
    DEFAULT_BAND_PADDING, DEFAULT_TICK_COUNT, Scale, ScaleBand, ScaleLinear, ScaleLinearSpec,
    ScaleTime,
};
use crate::scale_table::{DomainSource, ScaleKey, ScaleMetadata, ScaleTable};
use crate::series::{Axis, SeriesDeclaration};
use crate::value::{Row, Value, coerce_number};
use crate::z_order::layer_order;

/// Caller-supplied Y domains. A supplied domain is used as-is, bypassing resolution and `nice`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisOverrides {
    /// Left axis domain.
    pub left: Option<Extent>,
    /// Right axis domain.
    pub right: Option<Extent>,
}

impl AxisOverrides {
    /// Returns the override for `axis`.
    pub fn get(&self, axis: Axis) -> Option<Extent> {
        match axis {
            Axis::Left => self.left,
            Axis::Right => self.right,
        }
    }

    fn validate(&self) -> Result<(), RenderError> {
        for axis in Axis::BOTH {
            if let Some(d) = self.get(axis)
                && !d.is_valid()
            {
                return Err(RenderError::InvalidDomain {
                    axis,
                    min: d.min,
                    max: d.max,
                });
            }
        }
        Ok(())
    }
}

/// A combo chart description: series, X field, content area and resolution options.
#[derive(Clone, Debug)]
pub struct ComboChartSpec {
    /// Declared series, in declaration order.
    pub series: Vec<SeriesDeclaration>,
    /// Row field providing the X value.
    pub x_field: String,
    /// Content area in pixels.
    pub content_size: Size,
    /// Caller-supplied Y domains.
    pub overrides: AxisOverrides,
    /// Tick count used when rounding Y domains (and numeric X domains) with `nice`.
    ///
    /// Default: [`DEFAULT_TICK_COUNT`].
    pub tick_count: usize,
    /// Inner and outer padding of the categorical X band scale.
    ///
    /// Default: [`DEFAULT_BAND_PADDING`].
    pub band_padding: f64,
    /// Ceiling headroom factor for resolved Y domains. Must be finite and at least `1`.
    ///
    /// Default: [`DEFAULT_HEADROOM`].
    pub headroom: f64,
}

impl ComboChartSpec {
    /// Creates a spec with no series.
    pub fn new(x_field: &str, content_size: Size) -> Self {
        Self {
            series: Vec::new(),
            x_field: String::from(x_field),
            content_size,
            overrides: AxisOverrides::default(),
            tick_count: DEFAULT_TICK_COUNT,
            band_padding: DEFAULT_BAND_PADDING,
            headroom: DEFAULT_HEADROOM,
        }
    }

    /// Appends a series.
    pub fn with_series(mut self, series: SeriesDeclaration) -> Self {
        self.series.push(series);
        self
    }

    /// Appends several series.
    pub fn with_series_list(mut self, series: impl IntoIterator<Item = SeriesDeclaration>) -> Self {
        self.series.extend(series);
        self
    }

    /// Fixes the left axis domain.
    pub fn with_left_domain(mut self, domain: impl Into<Extent>) -> Self {
        self.overrides.left = Some(domain.into());
        self
    }

    /// Fixes the right axis domain.
    pub fn with_right_domain(mut self, domain: impl Into<Extent>) -> Self {
        self.overrides.right = Some(domain.into());
        self
    }

    /// Replaces all axis overrides.
    pub fn with_overrides(mut self, overrides: AxisOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Sets the tick count used for `nice` rounding.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Sets the band padding of a categorical X axis.
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding.max(0.0);
        self
    }

    /// Sets the ceiling headroom factor.
    ///
    /// Rendering fails with [`RenderError::InvalidHeadroom`] unless the factor is finite and at
    /// least `1`.
    pub fn with_headroom(mut self, headroom: f64) -> Self {
        self.headroom = headroom;
        self
    }

    /// Plans `rows`, discarding diagnostics.
    pub fn render(&self, rows: &[Row]) -> Result<RenderPlan, RenderError> {
        self.render_with(rows, &mut NullSink)
    }

    /// Plans `rows`, reporting recoverable conditions to `sink`.
    pub fn render_with(
        &self,
        rows: &[Row],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<RenderPlan, RenderError> {
        let Size { width, height } = self.content_size;
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(RenderError::InvalidContentSize { width, height });
        }
        if !(self.headroom.is_finite() && self.headroom >= 1.0) {
            return Err(RenderError::InvalidHeadroom {
                headroom: self.headroom,
            });
        }
        self.overrides.validate()?;

        if rows.is_empty() {
            sink.report(Diagnostic::EmptyRows);
        }
        if self.series.is_empty() {
            sink.report(Diagnostic::EmptySeries);
        }
        if rows.is_empty() || self.series.is_empty() {
            return Ok(RenderPlan::empty(self.content_size));
        }

        let mut domains = resolve_domains_with(rows, &self.series, self.headroom);
        for axis in Axis::BOTH {
            if let Some(d) = self.overrides.get(axis) {
                domains.set(axis, d);
            }
        }

        let scales = self.build_scales(rows, &domains);
        let band_width = self.band_width(rows, &scales);
        let layout = allocate(&self.series, band_width);
        let order = layer_order(&self.series);

        let series = Dispatcher::new(rows, &self.x_field, &self.series, &layout, &scales)
            .dispatch(&order, sink);

        Ok(RenderPlan {
            series,
            scales,
            domains,
            bar_groups: layout.bar_groups,
            stack_groups: layout.stack_groups,
            content_size: self.content_size,
        })
    }

    fn build_scales(&self, rows: &[Row], domains: &AxisDomains) -> ScaleTable {
        let mut table = ScaleTable::new();
        let (x, x_meta) = self.x_scale(rows);
        table.register(ScaleKey::X, x, x_meta);

        let y_range = (self.content_size.height, 0.0);
        for axis in Axis::BOTH {
            let extent = domains.get(axis);
            if let Some(d) = self.overrides.get(axis) {
                table.register(
                    axis.scale_key(),
                    Scale::Linear(ScaleLinear::new(d.as_tuple(), y_range)),
                    ScaleMetadata::new(DomainSource::Override).with_raw_domain(d),
                );
            } else if self.series.iter().any(|s| s.axis == axis) {
                let y = ScaleLinearSpec::from(extent)
                    .with_nice(true)
                    .instantiate_resolved(y_range, self.tick_count);
                table.register(
                    axis.scale_key(),
                    Scale::Linear(y),
                    ScaleMetadata::new(DomainSource::Resolved)
                        .with_raw_domain(extent)
                        .with_nice(true),
                );
            }
        }
        table
    }

    /// Picks the X scale from the first row's X value: dates get a time scale, numbers a
    /// `nice` linear scale, anything else a band scale.
    fn x_scale(&self, rows: &[Row]) -> (Scale, ScaleMetadata) {
        let x_range = (0.0, self.content_size.width);
        let field = self.x_field.as_str();
        let numeric_extent = || {
            Extent::of(rows.iter().map(|r| coerce_number(r.get(field)))).unwrap_or(Extent::PLACEHOLDER)
        };

        match rows.first().and_then(|r| r.get(field)) {
            Some(Value::Date(_)) => {
                let extent = numeric_extent();
                (
                    Scale::Time(ScaleTime::new(extent.as_tuple(), x_range)),
                    ScaleMetadata::new(DomainSource::RowKeys).with_raw_domain(extent),
                )
            }
            Some(Value::Number(_)) => {
                let extent = numeric_extent();
                let x = ScaleLinearSpec::from(extent)
                    .with_nice(true)
                    .instantiate_resolved(x_range, self.tick_count);
                (
                    Scale::Linear(x),
                    ScaleMetadata::new(DomainSource::RowKeys)
                        .with_raw_domain(extent)
                        .with_nice(true),
                )
            }
            _ => {
                let keys = rows
                    .iter()
                    .map(|r| r.get(field).map(Value::category_key).unwrap_or_default());
                let band = ScaleBand::new(x_range, keys)
                    .with_padding(self.band_padding, self.band_padding);
                (Scale::Band(band), ScaleMetadata::new(DomainSource::RowKeys))
            }
        }
    }

    /// Width shared by a category's bars. Continuous X axes use an even split of the content
    /// width per row, shrunk by the band padding.
    fn band_width(&self, rows: &[Row], scales: &ScaleTable) -> f64 {
        match scales.get(ScaleKey::X) {
            Some(Scale::Band(band)) => band.band_width(),
            Some(Scale::Linear(_) | Scale::Time(_)) | None => {
                let n = rows.len().max(1) as f64;
                self.content_size.width / n * (1.0 - self.band_padding).max(0.0)
            }
        }
    }
}

/// Plans a combo chart in one call.
///
/// This is a shorthand for building a [`ComboChartSpec`] and calling
/// [`ComboChartSpec::render`].
pub fn render(
    rows: &[Row],
    series: &[SeriesDeclaration],
    x_field: &str,
    content_width: f64,
    content_height: f64,
    overrides: Option<AxisOverrides>,
) -> Result<RenderPlan, RenderError> {
    ComboChartSpec::new(x_field, Size::new(content_width, content_height))
        .with_series_list(series.iter().cloned())
        .with_overrides(overrides.unwrap_or_default())
        .render(rows)
}

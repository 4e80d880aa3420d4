// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The output of a render pass.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Size;

use crate::dispatch::PlannedSeries;
use crate::domain::AxisDomains;
use crate::grouping::{BarGroup, StackGroup};
use crate::scale_table::ScaleTable;

/// Everything a shape renderer and axis renderer need to draw one combo chart.
///
/// Series are in draw order. Each series refers to its scales by [`crate::ScaleKey`]; resolve
/// them through [`RenderPlan::scales`].
#[derive(Clone, Debug)]
pub struct RenderPlan {
    pub(crate) series: Vec<PlannedSeries>,
    pub(crate) scales: ScaleTable,
    pub(crate) domains: AxisDomains,
    pub(crate) bar_groups: Vec<BarGroup>,
    pub(crate) stack_groups: Vec<StackGroup>,
    pub(crate) content_size: Size,
}

impl RenderPlan {
    /// An empty plan for a content area of `content_size`.
    pub fn empty(content_size: Size) -> Self {
        Self {
            series: Vec::new(),
            scales: ScaleTable::new(),
            domains: AxisDomains::PLACEHOLDER,
            bar_groups: Vec::new(),
            stack_groups: Vec::new(),
            content_size,
        }
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Planned series in draw order.
    pub fn series(&self) -> &[PlannedSeries] {
        &self.series
    }

    /// Consumes the plan, returning the planned series in draw order.
    pub fn into_series(self) -> Vec<PlannedSeries> {
        self.series
    }

    /// Returns the planned series for declaration index `index`, if it was drawn.
    pub fn find(&self, index: usize) -> Option<&PlannedSeries> {
        self.series.iter().find(|s| s.index == index)
    }

    /// Declaration indices in draw order.
    pub fn draw_order(&self) -> Vec<usize> {
        self.series.iter().map(|s| s.index).collect()
    }

    /// Scales registered for this pass.
    pub fn scales(&self) -> &ScaleTable {
        &self.scales
    }

    /// Y-axis extents before `nice` rounding (or the caller's overrides).
    pub fn domains(&self) -> AxisDomains {
        self.domains
    }

    /// Bar groups of this pass.
    pub fn bar_groups(&self) -> &[BarGroup] {
        &self.bar_groups
    }

    /// Stack groups of this pass, indexed by the `group` of [`crate::Shape::StackedArea`].
    pub fn stack_groups(&self) -> &[StackGroup] {
        &self.stack_groups
    }

    /// The content area the plan was laid out for.
    pub fn content_size(&self) -> Size {
        self.content_size
    }
}

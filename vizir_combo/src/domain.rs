// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Y-axis domain resolution.
//!
//! Each axis pools candidate values from every series bound to it:
//! - identity types (bar, line, area, scatter) contribute raw row values,
//! - stacked areas contribute per-row sums of their stack group,
//! - waterfalls contribute both ends of every replayed bar.
//!
//! The pooled extent is then widened once: the floor includes zero and the ceiling gets a
//! headroom factor. Any stacked series on the axis pins the floor to exactly zero, even if
//! other series on the axis are negative.

extern crate alloc;

use alloc::vec::Vec;

use crate::chart_type::Aggregation;
use crate::grouping::stack_groups;
use crate::series::{Axis, SeriesDeclaration};
use crate::value::Row;
use crate::waterfall::waterfall_steps;

/// Default ceiling headroom (10%).
pub const DEFAULT_HEADROOM: f64 = 1.1;

/// A `[min, max]` pair in data units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Extent {
    /// Domain used for an axis with nothing bound to it.
    pub const PLACEHOLDER: Self = Self { min: 0.0, max: 1.0 };

    /// Creates an extent.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `(min, max)`.
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Returns `max - min`.
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if both bounds are finite and ordered.
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Returns `true` if `v` lies within the extent (inclusive).
    pub fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Returns the `(min, max)` of `values`, or `None` if there are none.
    ///
    /// Callers coerce values before this point, so non-finite inputs are skipped
    /// rather than propagated.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        (min.is_finite() && max.is_finite()).then_some(Self { min, max })
    }
}

impl From<(f64, f64)> for Extent {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Resolved extents for both Y axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisDomains {
    /// Left axis extent.
    pub left: Extent,
    /// Right axis extent.
    pub right: Extent,
}

impl AxisDomains {
    /// Both axes at [`Extent::PLACEHOLDER`].
    pub const PLACEHOLDER: Self = Self {
        left: Extent::PLACEHOLDER,
        right: Extent::PLACEHOLDER,
    };

    /// Returns the extent for `axis`.
    pub fn get(&self, axis: Axis) -> Extent {
        match axis {
            Axis::Left => self.left,
            Axis::Right => self.right,
        }
    }

    /// Replaces the extent for `axis`.
    pub fn set(&mut self, axis: Axis, extent: Extent) {
        match axis {
            Axis::Left => self.left = extent,
            Axis::Right => self.right = extent,
        }
    }
}

/// Candidate values pooled for one axis, before headroom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidatePool {
    /// Every candidate value, in collection order.
    pub values: Vec<f64>,
    /// Set when a stacked series is bound to the axis.
    pub zero_floor: bool,
    /// Number of series bound to the axis.
    pub series_count: usize,
}

/// Collects candidate values for `axis` from the series bound to it.
pub fn axis_candidates(rows: &[Row], series: &[SeriesDeclaration], axis: Axis) -> CandidatePool {
    let mut pool = CandidatePool::default();

    for s in series.iter().filter(|s| s.axis == axis) {
        pool.series_count += 1;
        match s.chart_type.aggregation() {
            Aggregation::Identity => {
                pool.values
                    .extend(rows.iter().map(|row| row.number(&s.value_field)));
            }
            Aggregation::Cumulative => {
                let steps = waterfall_steps(rows, &s.value_field, s.type_field.as_deref());
                pool.values.extend(steps.iter().flat_map(|step| step.candidates()));
            }
            // Stacked series are summed per group below.
            Aggregation::Stacked => pool.zero_floor = true,
        }
    }

    for group in stack_groups(series).iter().filter(|g| g.axis == axis) {
        pool.values.extend(group.row_sums(rows, series));
    }

    pool
}

/// Widens a candidate pool into a domain extent.
///
/// The floor is `min(0, min)` (exactly `0` when `zero_floor` is set) and the ceiling is
/// `max * headroom`. A ceiling at or below zero stays at zero so negative-only data keeps a
/// visible baseline. An empty pool or a zero-width result yields [`Extent::PLACEHOLDER`]-like
/// bounds anchored at the floor.
pub fn widen(pool: &CandidatePool, headroom: f64) -> Extent {
    if pool.series_count == 0 {
        return Extent::PLACEHOLDER;
    }
    let Some(raw) = Extent::of(pool.values.iter().copied()) else {
        return Extent::PLACEHOLDER;
    };
    let min = if pool.zero_floor { 0.0 } else { raw.min.min(0.0) };
    let max = if raw.max > 0.0 { raw.max * headroom } else { 0.0 };
    if max <= min {
        return Extent::new(min, min + 1.0);
    }
    Extent::new(min, max)
}

/// Resolves the extent of one axis.
pub fn resolve_axis(rows: &[Row], series: &[SeriesDeclaration], axis: Axis, headroom: f64) -> Extent {
    widen(&axis_candidates(rows, series, axis), headroom)
}

/// Resolves both Y axes with the default headroom.
pub fn resolve_domains(rows: &[Row], series: &[SeriesDeclaration]) -> AxisDomains {
    resolve_domains_with(rows, series, DEFAULT_HEADROOM)
}

/// Resolves both Y axes with a custom headroom factor.
pub fn resolve_domains_with(
    rows: &[Row],
    series: &[SeriesDeclaration],
    headroom: f64,
) -> AxisDomains {
    AxisDomains {
        left: resolve_axis(rows, series, Axis::Left, headroom),
        right: resolve_axis(rows, series, Axis::Right, headroom),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::ChartType;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn rows_of(field: &str, values: &[f64]) -> Vec<Row> {
        values.iter().map(|&v| Row::new().with(field, v)).collect()
    }

    #[test]
    fn identity_floor_includes_negatives_and_ceiling_gets_headroom() {
        let rows = rows_of("v", &[-5.0, 10.0, 3.0]);
        let series = vec![SeriesDeclaration::new(ChartType::Bar, "v")];
        let d = resolve_domains(&rows, &series);
        assert!(close(d.left.min, -5.0), "floor {:?}", d.left);
        assert!(close(d.left.max, 11.0), "ceiling {:?}", d.left);
    }

    #[test]
    fn positive_identity_values_still_include_zero() {
        let rows = rows_of("v", &[4.0, 8.0]);
        let series = vec![SeriesDeclaration::new(ChartType::Line, "v")];
        let d = resolve_domains(&rows, &series);
        assert_eq!(d.left.min, 0.0);
        assert!(close(d.left.max, 8.8));
    }

    #[test]
    fn stacked_groups_sum_per_row_and_pin_floor_to_zero() {
        let rows = vec![
            Row::new().with("a", 3.0).with("b", 4.0),
            Row::new().with("a", 5.0).with("b", 2.0),
        ];
        let series = vec![
            SeriesDeclaration::new(ChartType::StackedArea, "a"),
            SeriesDeclaration::new(ChartType::StackedArea, "b"),
        ];
        let d = resolve_domains(&rows, &series);
        assert_eq!(d.left.min, 0.0);
        assert!(close(d.left.max, 7.7), "ceiling {:?}", d.left);
    }

    #[test]
    fn separate_stack_groups_are_summed_independently() {
        let rows = vec![Row::new().with("a", 3.0).with("b", 4.0).with("c", 10.0)];
        let series = vec![
            SeriesDeclaration::new(ChartType::StackedArea, "a"),
            SeriesDeclaration::new(ChartType::StackedArea, "b"),
            SeriesDeclaration::new(ChartType::StackedArea, "c").with_stack_group_key("solo"),
        ];
        let pool = axis_candidates(&rows, &series, Axis::Left);
        assert_eq!(pool.values, vec![7.0, 10.0]);
    }

    #[test]
    fn stacked_series_pin_floor_even_with_negative_neighbors() {
        let rows = vec![Row::new().with("s", 2.0).with("b", -6.0)];
        let series = vec![
            SeriesDeclaration::new(ChartType::StackedArea, "s"),
            SeriesDeclaration::new(ChartType::Bar, "b"),
        ];
        let d = resolve_domains(&rows, &series);
        assert_eq!(d.left.min, 0.0);
    }

    #[test]
    fn waterfall_domain_covers_intermediate_peaks() {
        let rows = vec![
            Row::new().with("t", "total").with("v", 100.0),
            Row::new().with("t", "positive").with("v", 20.0),
            Row::new().with("t", "negative").with("v", -30.0),
            Row::new().with("t", "total").with("v", 90.0),
        ];
        let series = vec![SeriesDeclaration::new(ChartType::Waterfall, "v").with_type_field("t")];
        let pool = axis_candidates(&rows, &series, Axis::Left);
        for v in [0.0, 100.0, 120.0, 90.0] {
            assert!(pool.values.contains(&v), "missing candidate {v}");
        }
        let d = resolve_domains(&rows, &series);
        assert_eq!(d.left.min, 0.0);
        assert!(d.left.max >= 120.0, "collapsed to final totals: {:?}", d.left);
        assert!(close(d.left.max, 132.0));
    }

    #[test]
    fn headroom_is_applied_once_across_buckets() {
        let rows = vec![Row::new().with("a", 10.0).with("b", 10.0).with("c", 5.0)];
        let series = vec![
            SeriesDeclaration::new(ChartType::StackedArea, "a"),
            SeriesDeclaration::new(ChartType::StackedArea, "b"),
            SeriesDeclaration::new(ChartType::Line, "c"),
        ];
        let d = resolve_domains(&rows, &series);
        assert!(close(d.left.max, 22.0), "got {:?}", d.left);
    }

    #[test]
    fn axes_resolve_independently_and_empty_axis_is_placeholder() {
        let rows = rows_of("v", &[1.0, 2.0]);
        let series = vec![SeriesDeclaration::new(ChartType::Bar, "v").with_axis(Axis::Right)];
        let d = resolve_domains(&rows, &series);
        assert_eq!(d.left, Extent::PLACEHOLDER);
        assert!(close(d.right.max, 2.2));
    }

    #[test]
    fn non_numeric_cells_coerce_to_zero() {
        let rows = vec![
            Row::new().with("v", f64::NAN),
            Row::new().with("v", "abc"),
            Row::new(),
        ];
        let series = vec![SeriesDeclaration::new(ChartType::Bar, "v")];
        let d = resolve_domains(&rows, &series);
        assert!(d.left.is_valid());
        assert_eq!(d.left, Extent::new(0.0, 1.0));
    }

    #[test]
    fn negative_only_data_keeps_zero_ceiling() {
        let rows = rows_of("v", &[-4.0, -2.0]);
        let series = vec![SeriesDeclaration::new(ChartType::Area, "v")];
        let d = resolve_domains(&rows, &series);
        assert_eq!(d.left, Extent::new(-4.0, 0.0));
    }

    #[test]
    fn bound_series_without_rows_is_placeholder() {
        let series = vec![SeriesDeclaration::new(ChartType::Bar, "v")];
        assert_eq!(resolve_domains(&[], &series).left, Extent::PLACEHOLDER);
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar and stack grouping.
//!
//! Bars sharing a `(axis, group_key)` tile side by side within a category band. Stacked areas
//! sharing a `(axis, stack_group_key)` are summed by the domain resolver and handed to the
//! shape renderer as an ordered member list plus stack policies; no stack geometry is
//! computed here.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::ChartType;
use crate::series::{Axis, SeriesDeclaration, StackOffset, StackOrder};
use crate::value::Row;

/// Declaration indices of a group's members, in declaration order.
pub type GroupMembers = SmallVec<[usize; 4]>;

/// Horizontal placement of one bar series within a category band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSlot {
    /// Offset of the bar center from the band center.
    pub offset: f64,
    /// Bar width.
    pub width: f64,
    /// Position within the group.
    pub index: usize,
    /// Number of members in the group.
    pub count: usize,
}

impl BarSlot {
    /// A slot spanning the full band.
    pub fn full(band_width: f64) -> Self {
        Self {
            offset: 0.0,
            width: band_width,
            index: 0,
            count: 1,
        }
    }
}

/// Splits a band of width `band_width` into `count` centered slots.
///
/// Slot `i` has width `band_width / count` and offset `(i - (count - 1) / 2) * width`, so the
/// group is symmetric around the band center for any `count`.
pub fn bar_slots(count: usize, band_width: f64) -> Vec<BarSlot> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;
    let width = band_width / n;
    let center = (n - 1.0) / 2.0;
    (0..count)
        .map(|index| BarSlot {
            offset: (index as f64 - center) * width,
            width,
            index,
            count,
        })
        .collect()
}

/// Bars sharing an axis and a group key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarGroup {
    /// Axis shared by the members.
    pub axis: Axis,
    /// Group key.
    pub key: String,
    /// Member declaration indices.
    pub members: GroupMembers,
}

/// Stacked areas sharing an axis and a stack group key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackGroup {
    /// Axis shared by the members.
    pub axis: Axis,
    /// Stack group key.
    pub key: String,
    /// Member declaration indices, in declaration order.
    pub members: GroupMembers,
    /// Stack order policy (taken from the first member).
    pub order: StackOrder,
    /// Stack baseline policy (taken from the first member).
    pub offset: StackOffset,
}

impl StackGroup {
    /// Per-row sums of the members' values.
    pub fn row_sums(&self, rows: &[Row], series: &[SeriesDeclaration]) -> Vec<f64> {
        rows.iter()
            .map(|row| {
                self.members
                    .iter()
                    .map(|&i| row.number(&series[i].value_field))
                    .sum::<f64>()
            })
            .collect()
    }
}

fn partition<'a>(
    series: &'a [SeriesDeclaration],
    chart_type: ChartType,
    key: impl Fn(&'a SeriesDeclaration) -> &'a str,
) -> Vec<(Axis, &'a str, GroupMembers)> {
    let mut index: HashMap<(Axis, &'a str), usize> = HashMap::new();
    let mut groups: Vec<(Axis, &'a str, GroupMembers)> = Vec::new();
    for (i, s) in series.iter().enumerate() {
        if s.chart_type != chart_type {
            continue;
        }
        let k = (s.axis, key(s));
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k.0, k.1, GroupMembers::new()));
            groups.len() - 1
        });
        groups[slot].2.push(i);
    }
    groups
}

/// Partitions bar series into groups, in order of first appearance.
pub fn bar_groups(series: &[SeriesDeclaration]) -> Vec<BarGroup> {
    partition(series, ChartType::Bar, SeriesDeclaration::group_key)
        .into_iter()
        .map(|(axis, key, members)| BarGroup {
            axis,
            key: String::from(key),
            members,
        })
        .collect()
}

/// Partitions stacked-area series into stack groups, in order of first appearance.
pub fn stack_groups(series: &[SeriesDeclaration]) -> Vec<StackGroup> {
    partition(series, ChartType::StackedArea, SeriesDeclaration::stack_group_key)
        .into_iter()
        .map(|(axis, key, members)| {
            let style = series[members[0]].style;
            StackGroup {
                axis,
                key: String::from(key),
                members,
                order: style.stack_order,
                offset: style.stack_offset,
            }
        })
        .collect()
}

/// Where a series sits within a category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// A bar slot within the band (bars and waterfalls).
    Bar(BarSlot),
    /// Membership in a stack group.
    Stack {
        /// Index into [`GroupLayout::stack_groups`].
        group: usize,
        /// Position within the group's member list.
        position: usize,
    },
    /// Centered on the band (lines, areas, points).
    Center,
}

/// Result of grouping every declared series for one render pass.
#[derive(Clone, Debug)]
pub struct GroupLayout {
    /// Bar groups.
    pub bar_groups: Vec<BarGroup>,
    /// Stack groups.
    pub stack_groups: Vec<StackGroup>,
    placements: Vec<Placement>,
}

impl GroupLayout {
    /// Returns the placement of the series at declaration index `series`.
    pub fn placement(&self, series: usize) -> Placement {
        self.placements
            .get(series)
            .copied()
            .unwrap_or(Placement::Center)
    }

    /// Returns all placements, indexed by declaration index.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

/// Groups `series` and allocates bar slots within a band of width `band_width`.
///
/// Waterfall series are not grouped; each one spans the full band.
///
/// Slots only tile within one bar group. Bars with different group keys, and waterfalls, are
/// each centered on the full band and overlap one another; give bars a shared group key to lay
/// them out side by side.
pub fn allocate(series: &[SeriesDeclaration], band_width: f64) -> GroupLayout {
    let bar_groups = bar_groups(series);
    let stack_groups = stack_groups(series);

    let mut placements: Vec<Placement> = series
        .iter()
        .map(|s| match s.chart_type {
            ChartType::Waterfall => Placement::Bar(BarSlot::full(band_width)),
            ChartType::StackedArea
            | ChartType::Bar
            | ChartType::Area
            | ChartType::Line
            | ChartType::Scatter
            | ChartType::Unrecognized => Placement::Center,
        })
        .collect();

    for group in &bar_groups {
        for (slot, &member) in bar_slots(group.members.len(), band_width)
            .into_iter()
            .zip(group.members.iter())
        {
            placements[member] = Placement::Bar(slot);
        }
    }
    for (g, group) in stack_groups.iter().enumerate() {
        for (position, &member) in group.members.iter().enumerate() {
            placements[member] = Placement::Stack { group: g, position };
        }
    }

    GroupLayout {
        bar_groups,
        stack_groups,
        placements,
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Size;

use crate::{
    Axis, AxisOverrides, ChartType, ComboChartSpec, Diagnostic, DomainSource, Extent, PlotPoint,
    RenderError, Row, ScaleKey, ScaleKind, SeriesDeclaration, Shape, StackOffset, StackOrder,
    Value, render,
};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() <= 1e-9, "{a} != {b}");
}

fn quarterly_rows() -> Vec<Row> {
    [
        ("Q1", 120.0, 40.0, 10.0, 0.12),
        ("Q2", 90.0, 55.0, 25.0, 0.18),
        ("Q3", 150.0, 30.0, 5.0, 0.09),
        ("Q4", 60.0, 70.0, 40.0, 0.22),
    ]
    .into_iter()
    .map(|(q, revenue, cost, other, margin)| {
        Row::new()
            .with("quarter", q)
            .with("revenue", revenue)
            .with("cost", cost)
            .with("other", other)
            .with("margin", margin)
    })
    .collect()
}

fn mixed_series() -> Vec<SeriesDeclaration> {
    vec![
        SeriesDeclaration::new(ChartType::Line, "margin").with_axis(Axis::Right),
        SeriesDeclaration::new(ChartType::Bar, "revenue"),
        SeriesDeclaration::new(ChartType::StackedArea, "cost")
            .with_stack_order(StackOrder::Descending)
            .with_stack_offset(StackOffset::Expand),
        SeriesDeclaration::new(ChartType::Bar, "cost"),
        SeriesDeclaration::new(ChartType::StackedArea, "other"),
    ]
}

fn points(plan: &crate::RenderPlan) -> Vec<Vec<PlotPoint>> {
    plan.series().iter().map(|s| s.points.clone()).collect()
}

#[test]
fn mixed_combo_sorts_by_layer_and_keeps_bar_order() {
    let spec = ComboChartSpec::new("quarter", Size::new(400.0, 200.0))
        .with_series_list(mixed_series());
    let plan = spec.render(&quarterly_rows()).unwrap();

    assert_eq!(plan.draw_order(), vec![2, 4, 1, 3, 0]);
    let ranks: Vec<i32> = plan.series().iter().map(|s| s.rank).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "ranks {ranks:?}");
}

#[test]
fn left_axis_pools_identity_and_stacked_values() {
    let plan = ComboChartSpec::new("quarter", Size::new(400.0, 200.0))
        .with_series_list(mixed_series())
        .render(&quarterly_rows())
        .unwrap();

    // Stack sums are 50, 80, 35, 110; bars peak at revenue 150.
    let left = plan.domains().left;
    assert_eq!(left.min, 0.0);
    assert_close(left.max, 165.0);

    let right = plan.domains().right;
    assert_eq!(right.min, 0.0);
    assert_close(right.max, 0.22 * 1.1);

    let y = plan.scales().linear(ScaleKey::LeftY).unwrap();
    assert_eq!(y.domain(), (0.0, 180.0));
    assert_eq!(y.range(), (200.0, 0.0));
    let meta = plan.scales().metadata(ScaleKey::LeftY).unwrap();
    assert_eq!(meta.source, DomainSource::Resolved);
    assert_eq!(meta.raw_domain, Some(left));
}

#[test]
fn grouped_bars_tile_each_category_band() {
    let plan = ComboChartSpec::new("quarter", Size::new(400.0, 200.0))
        .with_series_list(mixed_series())
        .render(&quarterly_rows())
        .unwrap();

    let band = plan.scales().get(ScaleKey::X).unwrap().as_band().unwrap().clone();
    let bw = band.band_width();
    let revenue = plan.find(1).unwrap();
    let cost = plan.find(3).unwrap();
    let (Shape::Bars { slot: a }, Shape::Bars { slot: b }) = (&revenue.shape, &cost.shape) else {
        panic!("expected bar shapes");
    };
    assert_close(a.width, bw / 2.0);
    assert_close(b.width, bw / 2.0);
    for (p, q) in revenue.points.iter().zip(&cost.points) {
        let center = band.band_center(p.row);
        assert_close(p.pos.x, center - bw / 4.0);
        assert_close(q.pos.x, center + bw / 4.0);
        assert!(p.pos.x + a.width / 2.0 <= q.pos.x - b.width / 2.0 + 1e-9);
    }
}

#[test]
fn stacked_areas_carry_group_policies_through() {
    let plan = ComboChartSpec::new("quarter", Size::new(400.0, 200.0))
        .with_series_list(mixed_series())
        .render(&quarterly_rows())
        .unwrap();

    assert_eq!(plan.stack_groups().len(), 1);
    assert_eq!(plan.stack_groups()[0].members.as_slice(), &[2, 4]);
    let other = plan.find(4).unwrap();
    assert_eq!(
        other.shape,
        Shape::StackedArea {
            group: 0,
            position: 1,
            order: StackOrder::Descending,
            offset: StackOffset::Expand,
            curve: crate::Curve::Linear,
        }
    );
}

#[test]
fn identical_inputs_produce_bit_identical_plans() {
    let rows = quarterly_rows();
    let series = mixed_series();
    let a = render(&rows, &series, "quarter", 640.0, 480.0, None).unwrap();
    let b = render(&rows, &series, "quarter", 640.0, 480.0, None).unwrap();

    assert_eq!(a.draw_order(), b.draw_order());
    let (pa, pb) = (points(&a), points(&b));
    assert_eq!(pa.len(), pb.len());
    for (sa, sb) in pa.iter().zip(&pb) {
        for (x, y) in sa.iter().zip(sb) {
            assert_eq!(x.pos.x.to_bits(), y.pos.x.to_bits());
            assert_eq!(x.pos.y.to_bits(), y.pos.y.to_bits());
            assert_eq!(x.baseline.to_bits(), y.baseline.to_bits());
        }
    }
}

#[test]
fn empty_rows_give_an_empty_plan() {
    let mut diagnostics = Vec::new();
    let plan = ComboChartSpec::new("quarter", Size::new(100.0, 100.0))
        .with_series_list(mixed_series())
        .render_with(&[], &mut diagnostics)
        .unwrap();
    assert!(plan.is_empty());
    assert!(plan.scales().is_empty());
    assert_eq!(plan.domains().left, Extent::PLACEHOLDER);
    assert_eq!(diagnostics, vec![Diagnostic::EmptyRows]);
}

#[test]
fn no_series_gives_an_empty_plan() {
    let mut diagnostics = Vec::new();
    let plan = ComboChartSpec::new("quarter", Size::new(100.0, 100.0))
        .render_with(&quarterly_rows(), &mut diagnostics)
        .unwrap();
    assert!(plan.is_empty());
    assert_eq!(diagnostics, vec![Diagnostic::EmptySeries]);
}

#[test]
fn unused_axis_gets_no_scale_and_placeholder_domain() {
    let series = vec![SeriesDeclaration::new(ChartType::Bar, "revenue")];
    let plan = render(&quarterly_rows(), &series, "quarter", 300.0, 150.0, None).unwrap();
    assert!(plan.scales().get(ScaleKey::RightY).is_none());
    assert_eq!(plan.domains().right, Extent::PLACEHOLDER);
    assert_eq!(plan.series().len(), 1);
}

#[test]
fn overrides_win_over_resolution() {
    let series = mixed_series();
    let overrides = AxisOverrides {
        left: Some(Extent::new(-50.0, 500.0)),
        right: None,
    };
    let plan = render(&quarterly_rows(), &series, "quarter", 300.0, 150.0, Some(overrides)).unwrap();
    assert_eq!(plan.domains().left, Extent::new(-50.0, 500.0));
    let y = plan.scales().linear(ScaleKey::LeftY).unwrap();
    assert_eq!(y.domain(), (-50.0, 500.0));
    assert_eq!(
        plan.scales().metadata(ScaleKey::LeftY).unwrap().source,
        DomainSource::Override
    );
}

#[test]
fn override_on_an_unused_axis_still_registers_a_scale() {
    let series = vec![SeriesDeclaration::new(ChartType::Bar, "revenue")];
    let plan = ComboChartSpec::new("quarter", Size::new(300.0, 150.0))
        .with_series_list(series)
        .with_right_domain((0.0, 1.0))
        .render(&quarterly_rows())
        .unwrap();
    assert!(plan.scales().contains(ScaleKey::RightY));
}

#[test]
fn malformed_arguments_are_rejected() {
    let rows = quarterly_rows();
    let series = mixed_series();
    assert!(matches!(
        render(&rows, &series, "quarter", f64::NAN, 10.0, None),
        Err(RenderError::InvalidContentSize { width, height: 10.0 }) if width.is_nan()
    ));
    assert!(matches!(
        render(&rows, &series, "quarter", 10.0, -1.0, None),
        Err(RenderError::InvalidContentSize { .. })
    ));
    let bad = AxisOverrides {
        left: None,
        right: Some(Extent::new(5.0, 1.0)),
    };
    assert_eq!(
        render(&rows, &series, "quarter", 10.0, 10.0, Some(bad)).unwrap_err(),
        RenderError::InvalidDomain {
            axis: Axis::Right,
            min: 5.0,
            max: 1.0,
        }
    );
}

#[test]
fn headroom_must_be_finite_and_not_shrink_the_ceiling() {
    let rows = quarterly_rows();
    let spec = ComboChartSpec::new("quarter", Size::new(400.0, 200.0))
        .with_series(SeriesDeclaration::new(ChartType::Bar, "revenue"));

    assert!(matches!(
        spec.clone().with_headroom(f64::NAN).render(&rows),
        Err(RenderError::InvalidHeadroom { headroom }) if headroom.is_nan()
    ));
    assert_eq!(
        spec.clone().with_headroom(f64::INFINITY).render(&rows).unwrap_err(),
        RenderError::InvalidHeadroom {
            headroom: f64::INFINITY
        }
    );
    assert_eq!(
        spec.clone().with_headroom(0.5).render(&rows).unwrap_err(),
        RenderError::InvalidHeadroom { headroom: 0.5 }
    );

    let plan = spec.with_headroom(1.0).render(&rows).unwrap();
    assert_eq!(plan.domains().left, Extent::new(0.0, 150.0));
    let (d0, d1) = plan.scales().linear(ScaleKey::LeftY).unwrap().domain();
    assert!(d0.is_finite() && d1.is_finite());
    assert!(plan.series()[0].points.iter().all(|p| p.pos.y.is_finite()));
}

#[test]
fn numeric_x_uses_a_nice_linear_scale() {
    let rows: Vec<Row> = [1.0, 4.0, 9.0]
        .into_iter()
        .map(|x| Row::new().with("x", x).with("v", x * 2.0))
        .collect();
    let series = vec![
        SeriesDeclaration::new(ChartType::Scatter, "v"),
        SeriesDeclaration::new(ChartType::Bar, "v"),
    ];
    let plan = render(&rows, &series, "x", 100.0, 100.0, None).unwrap();
    let x = plan.scales().get(ScaleKey::X).unwrap();
    assert_eq!(x.kind(), ScaleKind::Linear);
    let (d0, d1) = x.as_linear().unwrap().domain();
    assert_close(d0, 1.0);
    assert_close(d1, 9.0);

    let Shape::Bars { slot } = &plan.find(1).unwrap().shape else {
        panic!("expected bars");
    };
    assert_close(slot.width, 100.0 / 3.0 * 0.9);
}

#[test]
fn date_x_uses_a_time_scale() {
    let day = 86_400_000.0;
    let rows: Vec<Row> = (0..3)
        .map(|i| {
            Row::new()
                .with("day", Value::date_millis(f64::from(i) * day))
                .with("v", 1.0)
        })
        .collect();
    let series = vec![SeriesDeclaration::new(ChartType::Line, "v")];
    let plan = render(&rows, &series, "day", 200.0, 100.0, None).unwrap();
    let x = plan.scales().get(ScaleKey::X).unwrap();
    assert_eq!(x.kind(), ScaleKind::Time);
    let line = &plan.series()[0];
    assert_close(line.points[0].pos.x, 0.0);
    assert_close(line.points[2].pos.x, 200.0);
}

#[test]
fn bad_cells_never_poison_the_plan() {
    let rows = vec![
        Row::new().with("k", "a").with("v", "not a number"),
        Row::new().with("k", "b").with("v", f64::INFINITY),
        Row::new().with("k", "c"),
    ];
    let series = vec![SeriesDeclaration::new(ChartType::Area, "v")];
    let plan = render(&rows, &series, "k", 90.0, 90.0, None).unwrap();
    for p in &plan.series()[0].points {
        assert_eq!(p.value, 0.0);
        assert!(p.pos.y.is_finite());
    }
}

#[test]
fn unrecognized_types_render_last_and_are_reported() {
    let series = vec![
        SeriesDeclaration::from_tag("sparkline", "margin"),
        SeriesDeclaration::from_tag("bar", "revenue"),
    ];
    let mut diagnostics = Vec::new();
    let plan = ComboChartSpec::new("quarter", Size::new(300.0, 150.0))
        .with_series_list(series)
        .render_with(&quarterly_rows(), &mut diagnostics)
        .unwrap();
    assert_eq!(plan.draw_order(), vec![1, 0]);
    assert_eq!(
        diagnostics,
        vec![Diagnostic::UnrecognizedChartType {
            series: 0,
            tag: Some(String::from("sparkline")),
        }]
    );
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series declarations and their style options.

extern crate alloc;

use alloc::string::String;

use peniko::Color;
use peniko::color::palette::css;

use crate::ChartType;
use crate::scale_table::ScaleKey;

/// Group key used when a series declares no `group_key` / `stack_group_key`.
pub const DEFAULT_GROUP_KEY: &str = "default";

/// Which of the two Y axes a series is bound to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The left Y axis.
    #[default]
    Left,
    /// The right Y axis.
    Right,
}

impl Axis {
    /// Both axes, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Returns `"left"` or `"right"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Returns the scale table key for this axis.
    pub fn scale_key(self) -> ScaleKey {
        match self {
            Self::Left => ScaleKey::LeftY,
            Self::Right => ScaleKey::RightY,
        }
    }
}

/// Interpolation between points for line and area series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Curve {
    /// Straight segments.
    #[default]
    Linear,
    /// Monotone cubic interpolation in x.
    Monotone,
    /// Cardinal spline.
    Cardinal,
    /// B-spline through the control points.
    Basis,
    /// Step function.
    Step,
}

/// Order in which series are stacked within a stack group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackOrder {
    /// Declaration order.
    #[default]
    None,
    /// Smallest series sum at the bottom.
    Ascending,
    /// Largest series sum at the bottom.
    Descending,
    /// Largest series in the middle (streamgraphs).
    InsideOut,
}

/// Stack baseline policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackOffset {
    /// Stack upward from zero.
    #[default]
    None,
    /// Normalize each row to `[0, 1]`.
    Expand,
    /// Center each row around zero.
    Silhouette,
    /// Minimize weighted slope changes (streamgraphs).
    Wiggle,
}

/// Non-geometric style options carried through to the shape renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Interpolation for line/area types.
    pub curve: Curve,
    /// Stroke width for lines and outlines.
    pub stroke_width: f64,
    /// Radius for scatter points.
    pub point_radius: f64,
    /// Stack order for stacked areas.
    pub stack_order: StackOrder,
    /// Stack baseline policy for stacked areas.
    pub stack_offset: StackOffset,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            curve: Curve::Linear,
            stroke_width: 2.0,
            point_radius: 3.0,
            stack_order: StackOrder::None,
            stack_offset: StackOffset::None,
        }
    }
}

/// One declared series of a combo chart.
#[derive(Clone, Debug)]
pub struct SeriesDeclaration {
    /// Chart type.
    pub chart_type: ChartType,
    /// The configuration tag this series was built from, if any.
    pub tag: Option<String>,
    /// Row field holding the series value.
    pub value_field: String,
    /// Y axis binding.
    pub axis: Axis,
    /// Bar group key (bars sharing a key tile within a category band).
    pub group_key: Option<String>,
    /// Stack group key (stacked areas sharing a key are summed).
    pub stack_group_key: Option<String>,
    /// Row field holding the waterfall step type (`positive`, `negative`, `total`, `subtotal`).
    pub type_field: Option<String>,
    /// Display label.
    pub label: Option<String>,
    /// Series paint. `None` picks from the default palette by declaration index.
    pub color: Option<Color>,
    /// Style options.
    pub style: SeriesStyle,
}

impl SeriesDeclaration {
    /// Creates a left-axis series with default style.
    pub fn new(chart_type: ChartType, value_field: &str) -> Self {
        Self {
            chart_type,
            tag: None,
            value_field: String::from(value_field),
            axis: Axis::Left,
            group_key: None,
            stack_group_key: None,
            type_field: None,
            label: None,
            color: None,
            style: SeriesStyle::default(),
        }
    }

    /// Creates a series from a configuration tag (see [`ChartType::from_tag`]).
    ///
    /// The tag is kept so diagnostics can name unrecognized types.
    pub fn from_tag(tag: &str, value_field: &str) -> Self {
        let mut s = Self::new(ChartType::from_tag(tag), value_field);
        s.tag = Some(String::from(tag));
        s
    }

    /// Sets the Y axis binding.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the bar group key.
    pub fn with_group_key(mut self, key: &str) -> Self {
        self.group_key = Some(String::from(key));
        self
    }

    /// Sets the stack group key.
    pub fn with_stack_group_key(mut self, key: &str) -> Self {
        self.stack_group_key = Some(String::from(key));
        self
    }

    /// Sets the waterfall type field.
    pub fn with_type_field(mut self, field: &str) -> Self {
        self.type_field = Some(String::from(field));
        self
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(String::from(label));
        self
    }

    /// Sets the series paint.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the opacity (clamped to `[0, 1]`).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.style.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the interpolation curve.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.style.curve = curve;
        self
    }

    /// Sets the stroke width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.style.stroke_width = width.max(0.0);
        self
    }

    /// Sets the scatter point radius.
    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.style.point_radius = radius.max(0.0);
        self
    }

    /// Sets the stack order policy.
    pub fn with_stack_order(mut self, order: StackOrder) -> Self {
        self.style.stack_order = order;
        self
    }

    /// Sets the stack baseline policy.
    pub fn with_stack_offset(mut self, offset: StackOffset) -> Self {
        self.style.stack_offset = offset;
        self
    }

    /// Returns the bar group key, or [`DEFAULT_GROUP_KEY`].
    pub fn group_key(&self) -> &str {
        self.group_key.as_deref().unwrap_or(DEFAULT_GROUP_KEY)
    }

    /// Returns the stack group key, or [`DEFAULT_GROUP_KEY`].
    pub fn stack_group_key(&self) -> &str {
        self.stack_group_key.as_deref().unwrap_or(DEFAULT_GROUP_KEY)
    }
}

/// Returns a default categorical paint for the series at `index`.
///
/// Colors are taken from named CSS colors and repeat past the palette length.
pub fn palette_color(index: usize) -> Color {
    const PALETTE: [Color; 8] = [
        css::CORNFLOWER_BLUE,
        css::ORANGE,
        css::MEDIUM_SEA_GREEN,
        css::CRIMSON,
        css::GOLDENROD,
        css::SLATE_BLUE,
        css::DARK_CYAN,
        css::HOT_PINK,
    ];
    PALETTE[index % PALETTE.len()]
}

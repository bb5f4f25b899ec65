// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit style parameters for every chart.
//!
//! There is no ambient theme: each chart owns its style struct, and every struct has a `Default`
//! carrying the stock look plus `with_*` setters for the common overrides.

use peniko::Color;
use peniko::color::palette::css;
use weightchart_core::{DashPattern, LineCap};

use crate::animation::{AnimationSpec, Easing};
use crate::model::{GradientStyle, LineStyle, PointStyle, XLabelOrientation};

/// Size of the anomaly star glyph.
pub const STAR_SIZE: f64 = 16.0;
/// Gap between a bar's top and its value label.
pub const BAR_TOP_SPACING: f64 = 8.0;

/// Font size and colour of one kind of label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in px.
    pub font_size: f64,
    /// Text colour.
    pub color: Color,
}

impl TextStyle {
    /// Black text at `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            color: css::BLACK,
        }
    }

    /// Sets the colour.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Visibility and styling of the axis labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    /// Draw x-axis (bottom) labels.
    pub show_bottom_labels: bool,
    /// Style of x-axis labels.
    pub bottom: TextStyle,
    /// Draw value-axis (data) labels.
    pub show_data_labels: bool,
    /// Style of value-axis labels.
    pub data: TextStyle,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            show_bottom_labels: true,
            bottom: TextStyle::default(),
            show_data_labels: true,
            data: TextStyle::default(),
        }
    }
}

/// Chart background and optional horizontal gridlines.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundStyle {
    /// Fill behind the chart; also the colour of marker spacing discs.
    pub background_color: Color,
    /// Draw one gridline per tick.
    pub draw_bg_lines: bool,
    /// Gridline colour.
    pub line_color: Color,
    /// Gridline dash; `None` for solid lines.
    pub dash: Option<DashPattern>,
    /// Gridline cap.
    pub cap: LineCap,
    /// Gridline width.
    pub line_width: f64,
}

impl BackgroundStyle {
    /// Turns the gridlines on or off.
    pub fn with_bg_lines(mut self, draw: bool) -> Self {
        self.draw_bg_lines = draw;
        self
    }

    /// Sets the background colour.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            background_color: Color::TRANSPARENT,
            draw_bg_lines: false,
            line_color: css::LIGHT_GRAY,
            dash: Some(DashPattern::new([2.0, 4.0], 0.0)),
            cap: LineCap::Butt,
            line_width: 1.0,
        }
    }
}

/// Gaps between the plot and its axis labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartPadding {
    /// Between the plot bottom and the x-axis labels.
    pub x_axis: f64,
    /// Right of the value-axis labels.
    pub y_axis: f64,
}

impl ChartPadding {
    /// Creates padding.
    pub const fn new(x_axis: f64, y_axis: f64) -> Self {
        Self { x_axis, y_axis }
    }
}

/// Bar geometry shared by bar and combined charts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSize {
    /// Width of one whole group.
    pub bar_width: f64,
    /// Gap between bars of one group.
    pub group_spacing: f64,
    /// Gap between stacked segments.
    pub stack_spacing: f64,
}

impl Default for BarSize {
    fn default() -> Self {
        Self {
            bar_width: 16.0,
            group_spacing: 2.0,
            stack_spacing: 2.0,
        }
    }
}

/// Column geometry of the vertical-progress chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalBarSize {
    /// Stroke width of a column.
    pub bar_width: f64,
    /// Space above the column track.
    pub top_spacing: f64,
    /// Space below the column track.
    pub bottom_spacing: f64,
}

impl Default for VerticalBarSize {
    fn default() -> Self {
        Self {
            bar_width: 12.0,
            top_spacing: 8.0,
            bottom_spacing: 8.0,
        }
    }
}

/// Caller hook mapping the data maximum to a forced axis maximum (`<= 0` keeps the computed one).
pub type MaxValueHook = fn(f64) -> f64;

/// Line chart configuration.
#[derive(Clone, Debug)]
pub struct LineChartStyle {
    /// Horizontal distance between consecutive points.
    pub data_spacing: f64,
    /// Default stroke width.
    pub line_width: f64,
    /// Default segment shape.
    pub line_style: LineStyle,
    /// Forces a marker style on every series; `None` defers to each series.
    pub point_style: Option<PointStyle>,
    /// Optional fill under each line.
    pub gradient: Option<GradientStyle>,
    /// X-label rotation.
    pub orientation: XLabelOrientation,
    /// Background and gridlines.
    pub background: BackgroundStyle,
    /// Axis label gaps.
    pub padding: ChartPadding,
    /// Axis label styling.
    pub labels: LabelStyle,
    /// Enter/exit timing.
    pub animation: AnimationSpec,
    /// Fixed value-axis label width; `0` sizes to the widest label.
    pub y_label_width: f64,
    /// Forced axis maximum.
    pub max_value: Option<MaxValueHook>,
}

impl LineChartStyle {
    /// Sets the enter/exit timing.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    /// Forces a marker style on every series.
    pub fn with_point_style(mut self, style: PointStyle) -> Self {
        self.point_style = Some(style);
        self
    }

    /// Adds a fill under each line.
    pub fn with_gradient(mut self, gradient: GradientStyle) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Sets the x-label rotation.
    pub fn with_orientation(mut self, orientation: XLabelOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the background.
    pub fn with_background(mut self, background: BackgroundStyle) -> Self {
        self.background = background;
        self
    }

    /// Sets the point spacing.
    pub fn with_data_spacing(mut self, spacing: f64) -> Self {
        self.data_spacing = spacing;
        self
    }
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            data_spacing: 50.0,
            line_width: 2.0,
            line_style: LineStyle::Curved,
            point_style: None,
            gradient: None,
            orientation: XLabelOrientation::Straight,
            background: BackgroundStyle::default(),
            padding: ChartPadding::new(0.0, 8.0),
            labels: LabelStyle::default(),
            animation: AnimationSpec::new(0.0, Easing::FastOutSlowIn),
            y_label_width: 0.0,
            max_value: None,
        }
    }
}

/// Bar chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChartStyle {
    /// Gap between groups.
    pub data_spacing: f64,
    /// Bar geometry.
    pub bar_size: BarSize,
    /// X-label rotation.
    pub orientation: XLabelOrientation,
    /// Background and gridlines.
    pub background: BackgroundStyle,
    /// Axis label gaps.
    pub padding: ChartPadding,
    /// Axis label styling.
    pub labels: LabelStyle,
    /// Style of totals above bars; `None` hides them.
    pub value_label: Option<TextStyle>,
    /// Grow-in timing.
    pub animation: AnimationSpec,
    /// Fixed value-axis label width; `0` sizes to the widest label.
    pub y_label_width: f64,
}

impl BarChartStyle {
    /// Shows totals above bars.
    pub fn with_value_label(mut self, style: TextStyle) -> Self {
        self.value_label = Some(style);
        self
    }

    /// Sets the grow-in timing.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    /// Sets the bar geometry.
    pub fn with_bar_size(mut self, bar_size: BarSize) -> Self {
        self.bar_size = bar_size;
        self
    }

    /// Sets the x-label rotation.
    pub fn with_orientation(mut self, orientation: XLabelOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the background.
    pub fn with_background(mut self, background: BackgroundStyle) -> Self {
        self.background = background;
        self
    }
}

impl Default for BarChartStyle {
    fn default() -> Self {
        Self {
            data_spacing: 24.0,
            bar_size: BarSize::default(),
            orientation: XLabelOrientation::Straight,
            background: BackgroundStyle::default(),
            padding: ChartPadding::new(8.0, 16.0),
            labels: LabelStyle::default(),
            value_label: None,
            animation: AnimationSpec::immediate(),
            y_label_width: 0.0,
        }
    }
}

/// Combined bar + line chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinedChartStyle {
    /// Gap between groups; lines step by `data_spacing + bar_width`.
    pub data_spacing: f64,
    /// Bar geometry.
    pub bar_size: BarSize,
    /// Default line stroke width.
    pub line_width: f64,
    /// Default segment shape.
    pub line_style: LineStyle,
    /// Forces a marker style on every line.
    pub point_style: Option<PointStyle>,
    /// Optional fill under each line.
    pub gradient: Option<GradientStyle>,
    /// Style of totals above bars; `None` hides them.
    pub value_label: Option<TextStyle>,
    /// X-label rotation.
    pub orientation: XLabelOrientation,
    /// Background and gridlines.
    pub background: BackgroundStyle,
    /// Axis label gaps.
    pub padding: ChartPadding,
    /// Axis label styling.
    pub labels: LabelStyle,
    /// Timing of both bar grow-in and line enter/exit.
    pub animation: AnimationSpec,
    /// Fixed value-axis label width; `0` sizes to the widest label.
    pub y_label_width: f64,
}

impl CombinedChartStyle {
    /// Sets the timing.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    /// Forces a marker style on every line.
    pub fn with_point_style(mut self, style: PointStyle) -> Self {
        self.point_style = Some(style);
        self
    }

    /// Shows totals above bars.
    pub fn with_value_label(mut self, style: TextStyle) -> Self {
        self.value_label = Some(style);
        self
    }

    /// Sets the background.
    pub fn with_background(mut self, background: BackgroundStyle) -> Self {
        self.background = background;
        self
    }
}

impl Default for CombinedChartStyle {
    fn default() -> Self {
        Self {
            data_spacing: 50.0,
            bar_size: BarSize::default(),
            line_width: 2.0,
            line_style: LineStyle::Curved,
            point_style: None,
            gradient: None,
            value_label: None,
            orientation: XLabelOrientation::Straight,
            background: BackgroundStyle::default(),
            padding: ChartPadding::new(0.0, 8.0),
            labels: LabelStyle::default(),
            animation: AnimationSpec::immediate(),
            y_label_width: 0.0,
        }
    }
}

/// Gauge needle drawn from the centre towards the progress end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeedlePointerStyle {
    /// Half-width of the needle at its base.
    pub width: f64,
    /// Needle length; `0` uses half the radius.
    pub length: f64,
    /// Radius of the hub disc.
    pub base_radius: f64,
}

impl Default for NeedlePointerStyle {
    fn default() -> Self {
        Self {
            width: 4.0,
            length: 0.0,
            base_radius: 6.0,
        }
    }
}

/// Dot riding on the gauge arc at the progress end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeadingIndicator {
    /// Dot colour.
    pub color: Color,
    /// Dot radius.
    pub radius: f64,
}

impl Default for LeadingIndicator {
    fn default() -> Self {
        Self {
            color: css::WHITE,
            radius: 4.0,
        }
    }
}

/// Gauge progress and pointer decorations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialProgressStyle {
    /// Filled share of the sweep, in percent.
    pub progress: f64,
    /// Optional needle.
    pub needle: Option<NeedlePointerStyle>,
    /// Optional leading dot.
    pub leading_indicator: Option<LeadingIndicator>,
}

impl RadialProgressStyle {
    /// Sets the filled share.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Adds a needle.
    pub fn with_needle(mut self, needle: NeedlePointerStyle) -> Self {
        self.needle = Some(needle);
        self
    }

    /// Adds a leading dot.
    pub fn with_leading_indicator(mut self, indicator: LeadingIndicator) -> Self {
        self.leading_indicator = Some(indicator);
        self
    }
}

impl Default for RadialProgressStyle {
    fn default() -> Self {
        Self {
            progress: 100.0,
            needle: None,
            leading_indicator: None,
        }
    }
}

/// Numeric labels inside the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeterText {
    /// Number of evenly spaced scale labels; `0` labels each pie slice with its value instead.
    pub count: u32,
    /// First scale value.
    pub start_value: f64,
    /// Last scale value.
    pub end_value: f64,
    /// Inset from the inner edge of the ring.
    pub spacing: f64,
    /// Label style.
    pub text: TextStyle,
}

impl Default for MeterText {
    fn default() -> Self {
        Self {
            count: 0,
            start_value: 0.0,
            end_value: 100.0,
            spacing: 8.0,
            text: TextStyle::default(),
        }
    }
}

/// Pie and radial gauge configuration.
///
/// Angles are degrees, clockwise from the positive x axis.
#[derive(Clone, Debug, PartialEq)]
pub struct CircularChartStyle {
    /// Where the first slice (or the gauge arc) starts.
    pub start_angle: f64,
    /// Total angular extent; negative runs counter-clockwise.
    pub sweep_angle: f64,
    /// Gap between slices in degrees; `0` derives it from `spacing_width`.
    pub spacing_angle: f64,
    /// Gap between slices in px, used when `spacing_angle` is `0`.
    pub spacing_width: f64,
    /// Ring width; `<= 0` draws a full pie.
    pub line_width: f64,
    /// Extra width of the pressed slice, in percent of `line_width`.
    pub scale_percent_on_click: f64,
    /// Grow a half circle to fill its box.
    pub draw_for_min_size: bool,
    /// Arc end cap; `None` is butt for pies and round for gauges.
    pub stroke_cap: Option<LineCap>,
    /// Gauge track colour; `None` is the slice colour at 20% alpha.
    pub progress_background: Option<Color>,
    /// Gauge progress and pointers.
    pub radial: RadialProgressStyle,
    /// Optional labels inside the ring.
    pub meter_text: Option<MeterText>,
    /// Sweep animation timing.
    pub animation: AnimationSpec,
}

impl CircularChartStyle {
    /// Stock pie/donut look.
    pub fn pie() -> Self {
        Self {
            start_angle: 180.0,
            sweep_angle: 180.0,
            spacing_angle: 0.0,
            spacing_width: 0.0,
            line_width: 2.0,
            scale_percent_on_click: 20.0,
            draw_for_min_size: true,
            stroke_cap: Some(LineCap::Butt),
            progress_background: Some(Color::TRANSPARENT),
            radial: RadialProgressStyle::default(),
            meter_text: None,
            animation: AnimationSpec::immediate(),
        }
    }

    /// Stock radial gauge look.
    pub fn gauge() -> Self {
        Self {
            scale_percent_on_click: 0.0,
            draw_for_min_size: false,
            stroke_cap: None,
            progress_background: None,
            ..Self::pie()
        }
    }

    /// Sets start and sweep.
    pub fn with_angles(mut self, start_angle: f64, sweep_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.sweep_angle = sweep_angle;
        self
    }

    /// Sets the ring width.
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    /// Sets the gap between slices in degrees.
    pub fn with_spacing_angle(mut self, spacing_angle: f64) -> Self {
        self.spacing_angle = spacing_angle;
        self
    }

    /// Sets the gauge decorations.
    pub fn with_radial(mut self, radial: RadialProgressStyle) -> Self {
        self.radial = radial;
        self
    }

    /// Adds ring labels.
    pub fn with_meter_text(mut self, meter_text: MeterText) -> Self {
        self.meter_text = Some(meter_text);
        self
    }

    /// Sets the sweep animation timing.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }
}

impl Default for CircularChartStyle {
    fn default() -> Self {
        Self::pie()
    }
}

/// Vertical-progress chart configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalProgressStyle {
    /// Column geometry.
    pub bar_size: VerticalBarSize,
    /// Horizontal slot per column.
    pub data_spacing: f64,
    /// Top and bottom label styling.
    pub labels: LabelStyle,
    /// Fill timing.
    pub animation: AnimationSpec,
}

impl VerticalProgressStyle {
    /// Sets the fill timing.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }
}

impl Default for VerticalProgressStyle {
    fn default() -> Self {
        Self {
            bar_size: VerticalBarSize::default(),
            data_spacing: 32.0,
            labels: LabelStyle::default(),
            animation: AnimationSpec::new(1000.0, Easing::Linear),
        }
    }
}

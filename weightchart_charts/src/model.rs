// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data types handed to the charts by the host screen.
//!
//! All types compare structurally: two series built from the same values at different times are
//! equal, which is what the dataset diff keys on.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

/// One x-axis sample of a line series.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// The plotted value.
    pub value: f64,
    /// X-axis label.
    pub label: String,
    /// Optional secondary label (tooltips, accessibility).
    pub hint_label: Option<String>,
    /// Anomalous samples are drawn as a star instead of the regular marker.
    pub is_anomaly: bool,
}

impl DataPoint {
    /// A regular sample.
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            hint_label: None,
            is_anomaly: false,
        }
    }

    /// Sets the hint label.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint_label = Some(hint.into());
        self
    }

    /// Marks the sample as an anomaly.
    pub fn with_anomaly(mut self, is_anomaly: bool) -> Self {
        self.is_anomaly = is_anomaly;
        self
    }
}

/// How data point markers are drawn on a line.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PointStyle {
    /// No markers.
    #[default]
    None,
    /// A filled disc.
    Filled {
        /// Marker diameter.
        size: f64,
        /// Background-coloured gap around the marker.
        spacing: f64,
        /// Marker colour; the line colour when `None`.
        color: Option<Color>,
    },
    /// A stroked ring.
    Outline {
        /// Marker diameter.
        size: f64,
        /// Ring stroke width.
        width: f64,
        /// Background-coloured gap around the marker.
        spacing: f64,
        /// Marker colour; the line colour when `None`.
        color: Option<Color>,
    },
}

impl PointStyle {
    /// A filled marker with the default 2px gap.
    pub fn filled(size: f64) -> Self {
        Self::Filled {
            size,
            spacing: 2.0,
            color: None,
        }
    }

    /// An outlined marker with the default 2px gap.
    pub fn outline(size: f64, width: f64) -> Self {
        Self::Outline {
            size,
            width,
            spacing: 2.0,
            color: None,
        }
    }

    /// Vertical space a marker needs above the highest point.
    pub fn height(&self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Filled { size, .. } | Self::Outline { size, .. } => size.max(0.0),
        }
    }
}

/// Segment shape between consecutive points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Symmetric cubic Béziers.
    #[default]
    Curved,
    /// Straight segments.
    Straight,
}

/// Dash treatment of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinePathType {
    /// Round dots spaced two line widths apart.
    Dot,
    /// Dashes two line widths long.
    Grid,
    /// A solid line.
    #[default]
    Line,
}

/// One line of a line chart.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    /// Line colour.
    pub color: Color,
    /// Samples in x order.
    pub points: Vec<DataPoint>,
    /// Markers used when the chart does not force a point style.
    pub point_style: PointStyle,
    /// Stroke width; `0` uses the chart default.
    pub line_width: f64,
    /// Segment shape; `None` uses the chart default.
    pub line_style: Option<LineStyle>,
    /// Dash treatment.
    pub path_type: LinePathType,
}

impl LineSeries {
    /// A solid series with chart-default width and shape.
    pub fn new(color: Color, points: Vec<DataPoint>) -> Self {
        Self {
            color,
            points,
            point_style: PointStyle::None,
            line_width: 0.0,
            line_style: None,
            path_type: LinePathType::Line,
        }
    }

    /// Sets the series' own point style.
    pub fn with_point_style(mut self, style: PointStyle) -> Self {
        self.point_style = style;
        self
    }

    /// Overrides the chart line width.
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    /// Overrides the chart line style.
    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    /// Sets the dash treatment.
    pub fn with_path_type(mut self, path_type: LinePathType) -> Self {
        self.path_type = path_type;
        self
    }

    /// `(min, max)` over the finite point values, or `None` for an empty series.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.value))
    }
}

/// One stacked segment of a bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarValue {
    /// Segment value.
    pub value: f64,
    /// Segment colour.
    pub color: Color,
}

impl BarValue {
    /// Creates a segment.
    pub fn new(value: f64, color: Color) -> Self {
        Self { value, color }
    }
}

/// All bars sharing one x-axis label.
///
/// `stacks` holds the bars drawn side by side; each inner list is stacked bottom-up.
#[derive(Clone, Debug, PartialEq)]
pub struct BarGroup {
    /// X-axis label; also keys the per-label grow animation.
    pub label: String,
    /// Replaces the computed total above the bar when present.
    pub top_label: Option<String>,
    /// Side-by-side bars, each a bottom-up stack.
    pub stacks: Vec<Vec<BarValue>>,
}

impl BarGroup {
    /// A group with a single bar of one segment.
    pub fn single(label: impl Into<String>, value: f64, color: Color) -> Self {
        Self::stacked(label, alloc::vec![alloc::vec![BarValue::new(value, color)]])
    }

    /// A group with explicit stacks.
    pub fn stacked(label: impl Into<String>, stacks: Vec<Vec<BarValue>>) -> Self {
        Self {
            label: label.into(),
            top_label: None,
            stacks,
        }
    }

    /// Sets the label drawn above the bar.
    pub fn with_top_label(mut self, top_label: impl Into<String>) -> Self {
        self.top_label = Some(top_label.into());
        self
    }

    /// Largest stack total in the group.
    pub fn max_stack_total(&self) -> f64 {
        self.stacks
            .iter()
            .map(|stack| stack_total(stack))
            .fold(0.0, f64::max)
    }
}

pub(crate) fn stack_total(stack: &[BarValue]) -> f64 {
    stack.iter().map(|v| finite(v.value)).sum()
}

/// Largest stack total across all groups (0 when empty).
pub fn max_stack_total(groups: &[BarGroup]) -> f64 {
    groups
        .iter()
        .map(BarGroup::max_stack_total)
        .fold(0.0, f64::max)
}

/// Compares bar snapshots by segment values only; colours and labels are ignored.
pub fn same_bar_values(a: &[BarGroup], b: &[BarGroup]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.stacks.len() == y.stacks.len()
                && x.stacks.iter().zip(&y.stacks).all(|(s, t)| {
                    s.len() == t.len() && s.iter().zip(t).all(|(u, v)| u.value == v.value)
                })
        })
}

/// One slice of a pie, or the single value of a radial gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularSlice {
    /// Slice value.
    pub value: f64,
    /// Slice colour.
    pub color: Color,
}

impl CircularSlice {
    /// Creates a slice.
    pub fn new(value: f64, color: Color) -> Self {
        Self { value, color }
    }
}

/// One column of a vertical-progress chart.
#[derive(Clone, Debug, PartialEq)]
pub struct VerticalProgressItem {
    /// Fill colour.
    pub color: Color,
    /// Track colour.
    pub background_color: Color,
    /// Label under the column.
    pub bottom_label: String,
    /// Fill in percent, clamped to `0..=100` when drawn.
    pub fill_percent: f64,
    /// Label above the column when `show_value_on_top` is off.
    pub top_label: Option<String>,
    /// Draw `"{fill_percent}%"` above the column.
    pub show_value_on_top: bool,
}

impl VerticalProgressItem {
    /// A column whose track is the fill colour at 20% alpha.
    pub fn new(color: Color, bottom_label: impl Into<String>, fill_percent: f64) -> Self {
        Self {
            color,
            background_color: color.with_alpha(0.2),
            bottom_label: bottom_label.into(),
            fill_percent,
            top_label: None,
            show_value_on_top: true,
        }
    }

    /// Sets the track colour.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Shows `top_label` instead of the percentage.
    pub fn with_top_label(mut self, top_label: impl Into<String>) -> Self {
        self.top_label = Some(top_label.into());
        self.show_value_on_top = false;
        self
    }

    /// The fill percent clamped to `0..=100`.
    pub fn clamped_percent(&self) -> f64 {
        let pct = finite(self.fill_percent);
        if !(0.0..=100.0).contains(&pct) {
            tracing::warn!(percent = pct, "fill percent outside 0..=100 clamped");
        }
        pct.clamp(0.0, 100.0)
    }
}

/// Gradient axis for the fill under a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientDirection {
    /// Left to right across the canvas.
    Horizontal,
    /// Top to bottom, starting at the series maximum.
    #[default]
    Vertical,
}

/// Gradient fill under a line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GradientStyle {
    /// Gradient axis.
    pub direction: GradientDirection,
    /// Stop colours, evenly spaced; empty means a fading ramp of the line colour.
    pub colors: Vec<Color>,
}

/// Rotation of x-axis labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum XLabelOrientation {
    /// Horizontal text.
    #[default]
    Straight,
    /// Rotated -45 degrees.
    LeftSlanted,
    /// Rotated 45 degrees.
    RightSlanted,
}

impl XLabelOrientation {
    /// Rotation in degrees.
    pub fn angle(self) -> f64 {
        match self {
            Self::Straight => 0.0,
            Self::LeftSlanted => -45.0,
            Self::RightSlanted => 45.0,
        }
    }
}

pub(crate) fn finite(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

pub(crate) fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .map(finite)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn series_extent_treats_non_finite_as_zero() {
        let s = LineSeries::new(
            css::BLUE,
            alloc::vec![
                DataPoint::new(3.0, "a"),
                DataPoint::new(f64::NAN, "b"),
                DataPoint::new(-2.0, "c"),
            ],
        );
        assert_eq!(s.value_extent(), Some((-2.0, 3.0)));
        assert_eq!(LineSeries::new(css::BLUE, Vec::new()).value_extent(), None);
    }

    #[test]
    fn bar_equality_ignores_colours() {
        let a = [BarGroup::single("Mon", 3.0, css::RED)];
        let b = [BarGroup::single("Tue", 3.0, css::GREEN)];
        let c = [BarGroup::single("Mon", 4.0, css::RED)];
        assert!(same_bar_values(&a, &b));
        assert!(!same_bar_values(&a, &c));
        assert!(!same_bar_values(&a, &[]));
    }

    #[test]
    fn stack_totals() {
        let g = BarGroup::stacked(
            "Mon",
            alloc::vec![
                alloc::vec![BarValue::new(2.0, css::RED), BarValue::new(3.0, css::BLUE)],
                alloc::vec![BarValue::new(7.0, css::RED)],
            ],
        );
        assert_eq!(g.max_stack_total(), 7.0);
        assert_eq!(max_stack_total(&[g]), 7.0);
        assert_eq!(max_stack_total(&[]), 0.0);
    }

    #[test]
    fn percent_is_clamped() {
        let item = VerticalProgressItem::new(css::TEAL, "Water", 140.0);
        assert_eq!(item.clamped_percent(), 100.0);
        let item = VerticalProgressItem::new(css::TEAL, "Water", -5.0);
        assert_eq!(item.clamped_percent(), 0.0);
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line chart: series geometry plus the stateful chart that animates series in and out.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, ParamCurveArclen, Point, Rect, Size};
use peniko::color::palette::css;
use peniko::{Brush, Color, ColorStop, Gradient};
use weightchart_core::{DashPattern, LineCap, Mark, PathChannels, StrokeStyle};

use crate::axis;
use crate::dataset::DatasetHolder;
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::ids::{key3, layer, mark_id};
use crate::layout::{CartesianLayoutSpec, ChartLayout, line_content_width, visible_range};
use crate::measure::TextMeasurer;
use crate::model::{
    GradientDirection, GradientStyle, LinePathType, LineSeries, LineStyle, PointStyle,
};
use crate::scale::{ScaleModel, compute_scale};
use crate::scroll::ScrollState;
use crate::style::{LineChartStyle, STAR_SIZE};
use crate::symbol::{circle_path, star_path};
use crate::z_order;

/// Accuracy used when measuring path length for the reveal.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// Shared geometry and styling for drawing line series onto one plot.
#[derive(Clone, Copy, Debug)]
pub struct LinePlot<'a> {
    /// Chart namespace for mark ids.
    pub ns: u32,
    /// Value axis.
    pub scale: &'a ScaleModel,
    /// Canvas rectangle in viewport coordinates.
    pub plot: Rect,
    /// Distance between consecutive points.
    pub spacing: f64,
    /// X of point 0 relative to the canvas, before scrolling.
    pub start_offset: f64,
    /// Current scroll offset (`<= 0`).
    pub scroll_offset: f64,
    /// Width used when a series leaves it at `0`.
    pub line_width: f64,
    /// Shape used when a series leaves it unset.
    pub line_style: LineStyle,
    /// Chart-level marker override; `Some(PointStyle::None)` hides every marker.
    pub point_style: Option<&'a PointStyle>,
    /// Optional fill under each line.
    pub gradient: Option<&'a GradientStyle>,
    /// Colour of marker spacing discs and star interiors.
    pub background: Color,
}

impl LinePlot<'_> {
    fn point(&self, index: usize, value: f64) -> Point {
        Point::new(
            self.plot.x0 + index as f64 * self.spacing + self.start_offset + self.scroll_offset,
            self.plot.y0 + self.scale.map_y(value, self.plot.height()),
        )
    }
}

/// Marks for one line series at animation `progress`.
///
/// Emits, in paint order: the gradient fill (once more than three quarters revealed), the line
/// itself with its reveal dash, then markers for every point the reveal has passed. Only points
/// within one slot of the visible window are emitted. `key` keeps ids stable per series.
pub fn line_series_marks(
    ctx: &LinePlot<'_>,
    key: usize,
    series: &LineSeries,
    progress: f64,
) -> Vec<Mark> {
    let mut out = Vec::new();
    let n = series.points.len();
    let progress = progress.clamp(0.0, 1.0);
    let Some(range) = visible_range(n, ctx.spacing, ctx.scroll_offset, ctx.plot.width()) else {
        return out;
    };

    let line_width = if series.line_width > 0.0 {
        series.line_width
    } else {
        ctx.line_width
    };
    let shape = series.line_style.unwrap_or(ctx.line_style);

    let mut path = BezPath::new();
    let mut first: Option<Point> = None;
    let mut prev: Option<Point> = None;
    for i in range.clone() {
        let p = ctx.point(i, series.points[i].value);
        match prev {
            None => {
                path.move_to(p);
                first = Some(p);
            }
            Some(q) => match shape {
                LineStyle::Curved => {
                    let mid = (q.x + p.x) * 0.5;
                    path.curve_to(Point::new(mid, q.y), Point::new(mid, p.y), p);
                }
                LineStyle::Straight => path.line_to(p),
            },
        }
        prev = Some(p);
    }
    let (Some(first), Some(last)) = (first, prev) else {
        return out;
    };

    if let Some(gradient) = ctx.gradient {
        if let Some(fill) = gradient_fill(ctx, key, series, gradient, &path, (first, last), progress)
        {
            out.push(fill);
        }
    }

    let length: f64 = path.segments().map(|s| s.arclen(ARCLEN_ACCURACY)).sum();
    let mut stroke = StrokeStyle::solid(series.color, line_width);
    match series.path_type {
        LinePathType::Dot => {
            stroke = stroke
                .with_cap(LineCap::Round)
                .with_dash(DashPattern::new([0.1, 2.0 * line_width], 0.0));
        }
        LinePathType::Grid => {
            stroke = stroke.with_dash(DashPattern::new([2.0 * line_width, line_width], 0.0));
        }
        LinePathType::Line => {}
    }
    let mut channels = PathChannels::stroked(path, stroke);
    if progress < 1.0 {
        channels = channels.with_reveal(DashPattern::new([length, length], (1.0 - progress) * length));
    }
    out.push(
        Mark::path(mark_id(ctx.ns, layer::LINE, key as u64), channels)
            .with_z_index(z_order::SERIES_STROKE),
    );

    let point_style = match ctx.point_style {
        Some(PointStyle::None) => return out,
        Some(style) => style,
        None => &series.point_style,
    };
    push_markers(ctx, key, series, point_style, progress, *range.end(), &mut out);
    out
}

fn gradient_fill(
    ctx: &LinePlot<'_>,
    key: usize,
    series: &LineSeries,
    gradient: &GradientStyle,
    line: &BezPath,
    (first, last): (Point, Point),
    progress: f64,
) -> Option<Mark> {
    let alpha = ((progress - 0.75) * 4.0).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return None;
    }
    let bottom = ctx.plot.y1;
    let mut area = line.clone();
    area.line_to((last.x, bottom));
    area.line_to((first.x, bottom));
    area.close_path();

    #[allow(
        clippy::cast_possible_truncation,
        reason = "alpha is in 0..=1 and colour channels are f32"
    )]
    let alpha = alpha as f32;
    let colors: Vec<Color> = if gradient.colors.is_empty() {
        [0.5, 0.25, 0.125, 0.0625]
            .into_iter()
            .map(|a| series.color.multiply_alpha(a * alpha))
            .chain(core::iter::once(Color::TRANSPARENT))
            .collect()
    } else {
        gradient
            .colors
            .iter()
            .map(|c| c.multiply_alpha(alpha))
            .collect()
    };
    let stops = even_stops(&colors);

    let (start, end) = match gradient.direction {
        GradientDirection::Horizontal => (
            Point::new(ctx.plot.x0, ctx.plot.y0),
            Point::new(ctx.plot.x1, ctx.plot.y0),
        ),
        GradientDirection::Vertical => {
            let max = series
                .value_extent()
                .map_or(ctx.scale.min_value, |(_, hi)| hi);
            let top = ctx.plot.y0 + ctx.scale.map_y(max, ctx.plot.height());
            (Point::new(ctx.plot.x0, top), Point::new(ctx.plot.x0, bottom))
        }
    };
    let brush = Brush::Gradient(Gradient::new_linear(start, end).with_stops(stops.as_slice()));
    Some(
        Mark::path(
            mark_id(ctx.ns, layer::LINE_FILL, key as u64),
            PathChannels::filled(area, brush),
        )
        .with_z_index(z_order::SERIES_UNDERLAY),
    )
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "stop offsets are in 0..=1 and peniko stores them as f32"
)]
fn even_stops(colors: &[Color]) -> Vec<ColorStop> {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| ColorStop::from(((i as f64 / last) as f32, *c)))
        .collect()
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the revealed index is clamped to the series length"
)]
fn push_markers(
    ctx: &LinePlot<'_>,
    key: usize,
    series: &LineSeries,
    style: &PointStyle,
    progress: f64,
    visible_end: usize,
    out: &mut Vec<Mark>,
) {
    let n = series.points.len();
    if n == 0 {
        return;
    }
    let revealed = ((progress * (n - 1) as f64).floor().max(0.0) as usize).min(n - 1);
    let Some(range) = visible_range(
        revealed + 1,
        ctx.spacing,
        ctx.scroll_offset,
        ctx.plot.width(),
    ) else {
        return;
    };
    let end = (*range.end()).min(visible_end);

    for i in *range.start()..=end {
        let point = &series.points[i];
        let at = ctx.point(i, point.value);
        let spacer_id = mark_id(ctx.ns, layer::POINT_SPACER, key3(key, i, 0));
        let point_id = |part: usize| mark_id(ctx.ns, layer::POINT, key3(key, i, part));

        if point.is_anomaly {
            let star = star_path(at, STAR_SIZE);
            out.push(
                Mark::path(
                    point_id(0),
                    PathChannels::stroked(star.clone(), StrokeStyle::solid(css::RED, 2.0)),
                )
                .with_z_index(z_order::SERIES_POINTS),
            );
            out.push(
                Mark::path(point_id(1), PathChannels::filled(star, ctx.background))
                    .with_z_index(z_order::SERIES_POINTS),
            );
            continue;
        }

        match *style {
            PointStyle::None => {}
            PointStyle::Filled {
                size,
                spacing,
                color,
            } => {
                out.push(
                    Mark::path(
                        spacer_id,
                        PathChannels::filled(circle_path(at, size + spacing), ctx.background),
                    )
                    .with_z_index(z_order::POINT_SPACERS),
                );
                out.push(
                    Mark::path(
                        point_id(0),
                        PathChannels::filled(circle_path(at, size), color.unwrap_or(series.color)),
                    )
                    .with_z_index(z_order::SERIES_POINTS),
                );
            }
            PointStyle::Outline {
                size,
                width,
                spacing,
                color,
            } => {
                out.push(
                    Mark::path(
                        spacer_id,
                        PathChannels::filled(
                            circle_path(at, size + spacing + width),
                            ctx.background,
                        ),
                    )
                    .with_z_index(z_order::POINT_SPACERS),
                );
                out.push(
                    Mark::path(
                        point_id(0),
                        PathChannels::stroked(
                            circle_path(at, size),
                            StrokeStyle::solid(color.unwrap_or(series.color), width),
                        ),
                    )
                    .with_z_index(z_order::SERIES_POINTS),
                );
            }
        }
    }
}

/// Labels of the longest series, used for the x axis.
pub(crate) fn longest_labels<'a>(series: impl IntoIterator<Item = &'a LineSeries>) -> Vec<String> {
    let mut best: Option<&LineSeries> = None;
    for s in series {
        if best.is_none_or(|b| s.points.len() > b.points.len()) {
            best = Some(s);
        }
    }
    best.map(|s| s.points.iter().map(|p| p.label.clone()).collect())
        .unwrap_or_default()
}

/// An animated, scrollable multi-series line chart.
///
/// Feed it snapshots with [`LineChart::set_data`]; series that appear draw themselves in from the
/// left, series that disappear retract and are dropped.
#[derive(Debug)]
pub struct LineChart {
    ns: u32,
    style: LineChartStyle,
    dataset: DatasetHolder<LineSeries>,
    scroll: ScrollState,
}

impl LineChart {
    /// Creates an empty chart whose marks live in namespace `ns`.
    pub fn new(ns: u32, style: LineChartStyle) -> Self {
        Self {
            ns,
            dataset: DatasetHolder::new(style.animation),
            style,
            scroll: ScrollState::new(),
        }
    }

    /// Current style.
    pub fn style(&self) -> &LineChartStyle {
        &self.style
    }

    /// Replaces the style; running animations keep their old timing.
    pub fn set_style(&mut self, style: LineChartStyle) {
        self.dataset.set_spec(style.animation);
        self.style = style;
    }

    /// Pushes a new snapshot. Returns `true` if anything starts animating.
    pub fn set_data(&mut self, series: &[LineSeries]) -> bool {
        self.dataset.set_target(series)
    }

    /// Advances animations and scrolling by one frame. Returns `true` while another frame is
    /// needed.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let data = self.dataset.tick(dt_ms);
        let scroll = self.scroll.tick(dt_ms);
        tracing::trace!(dt_ms, data, scroll, "line chart tick");
        data || scroll
    }

    /// Scroll state, for feeding drag input.
    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Scroll state.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Progress of `series` if it is on screen.
    pub fn progress_of(&self, series: &LineSeries) -> Option<f64> {
        self.dataset.progress_of(series)
    }

    /// Value axis for the current render set, or `None` when nothing is shown.
    pub fn scale(&self) -> Option<ScaleModel> {
        let (min, max) = self.dataset.value_range()?;
        let data_max = self
            .dataset
            .target()
            .iter()
            .filter_map(LineSeries::value_extent)
            .map(|(_, hi)| hi)
            .fold(f64::NEG_INFINITY, f64::max);
        let forced = self
            .style
            .max_value
            .map(|hook| hook(if data_max.is_finite() { data_max } else { max }))
            .filter(|m| m.is_finite() && *m > 0.0);
        Some(compute_scale(min, max, forced))
    }

    /// Arranges the chart in `viewport` and updates the scroll extent.
    pub fn set_viewport(&mut self, viewport: Size, measurer: &dyn TextMeasurer) {
        let Some((layout, _, labels)) = self.arrange(viewport, measurer) else {
            self.scroll.set_extent(0.0, viewport.width);
            return;
        };
        let points = labels.len();
        let content = line_content_width(points, self.style.data_spacing, 0.0);
        self.scroll.set_extent(content, layout.content_viewport());
    }

    fn top_padding(&self) -> f64 {
        let marker = match &self.style.point_style {
            Some(style) => style.height(),
            None => self
                .dataset
                .render_set()
                .iter()
                .map(|s| s.point_style.height())
                .fold(0.0, f64::max),
        };
        self.style.line_width + marker
    }

    fn arrange(
        &self,
        viewport: Size,
        measurer: &dyn TextMeasurer,
    ) -> Option<(ChartLayout, ScaleModel, Vec<String>)> {
        let scale = self.scale()?;
        let x_labels = longest_labels(self.dataset.render_set());
        let y_labels = scale.line_axis_labels();
        let spec = CartesianLayoutSpec {
            viewport,
            x_labels: &x_labels,
            y_labels: &y_labels,
            labels: &self.style.labels,
            orientation: self.style.orientation,
            slot_width: self.style.data_spacing,
            step: self.style.data_spacing,
            bar_width: 0.0,
            y_label_width: self.style.y_label_width,
            padding: self.style.padding,
            top_padding: self.top_padding(),
        };
        Some((ChartLayout::arrange(&spec, measurer), scale, x_labels))
    }

    /// Marks for the current frame.
    pub fn marks(&self, viewport: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::new();
        let Some((layout, scale, x_labels)) = self.arrange(viewport, measurer) else {
            return out;
        };
        let offset = self.scroll.offset();

        out.extend(axis::background_mark(self.ns, &layout, &self.style.background));
        out.extend(axis::grid_line_marks(
            self.ns,
            &layout,
            scale.tick_count,
            &self.style.background,
        ));

        let ctx = LinePlot {
            ns: self.ns,
            scale: &scale,
            plot: layout.plot,
            spacing: self.style.data_spacing,
            start_offset: 0.0,
            scroll_offset: offset,
            line_width: self.style.line_width,
            line_style: self.style.line_style,
            point_style: self.style.point_style.as_ref(),
            gradient: self.style.gradient.as_ref(),
            background: self.style.background.background_color,
        };
        for (key, (series, progress, _)) in self.dataset.entries().enumerate() {
            if series.points.is_empty() {
                continue;
            }
            out.extend(line_series_marks(&ctx, key, series, progress));
        }

        out.extend(axis::y_label_marks(
            self.ns,
            &layout,
            &scale.line_axis_labels(),
            &self.style.labels,
        ));
        out.extend(axis::x_label_marks(
            self.ns,
            &layout,
            &x_labels,
            &self.style.labels,
            self.style.orientation,
            offset,
        ));
        out
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new(0, LineChartStyle::default())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use weightchart_core::MarkPayload;

    use super::*;
    use crate::animation::{AnimationSpec, Easing};
    use crate::style::MaxValueHook;
    use crate::model::DataPoint;

    fn series(values: &[f64]) -> LineSeries {
        LineSeries::new(
            css::STEEL_BLUE,
            values
                .iter()
                .enumerate()
                .map(|(i, v)| DataPoint::new(*v, alloc::format!("d{i}")))
                .collect(),
        )
    }

    fn plot<'a>(scale: &'a ScaleModel) -> LinePlot<'a> {
        LinePlot {
            ns: 1,
            scale,
            plot: Rect::new(0.0, 0.0, 400.0, 100.0),
            spacing: 50.0,
            start_offset: 0.0,
            scroll_offset: 0.0,
            line_width: 2.0,
            line_style: LineStyle::Straight,
            point_style: None,
            gradient: None,
            background: css::WHITE,
        }
    }

    fn line_of(marks: &[Mark]) -> &PathChannels {
        marks
            .iter()
            .find_map(|m| match &m.payload {
                MarkPayload::Path(p) if m.z_index == z_order::SERIES_STROKE => Some(p),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no line mark"))
    }

    #[test]
    fn straight_line_hits_scaled_points() {
        let scale = compute_scale(0.0, 100.0, None);
        let s = series(&[0.0, 50.0, 100.0]);
        let marks = line_series_marks(&plot(&scale), 0, &s, 1.0);
        let line = line_of(&marks);
        let pts: Vec<Point> = line
            .path
            .elements()
            .iter()
            .filter_map(|el| el.end_point())
            .collect();
        assert_eq!(pts, vec![
            Point::new(0.0, 100.0),
            Point::new(50.0, 50.0),
            Point::new(100.0, 0.0)
        ]);
        assert!(line.reveal.is_none());
    }

    #[test]
    fn curved_segments_use_midpoint_controls() {
        let scale = compute_scale(0.0, 100.0, None);
        let s = series(&[0.0, 100.0]).with_line_style(LineStyle::Curved);
        let marks = line_series_marks(&plot(&scale), 0, &s, 1.0);
        let els = line_of(&marks).path.elements().to_vec();
        assert_eq!(
            els[1],
            kurbo::PathEl::CurveTo(
                Point::new(25.0, 100.0),
                Point::new(25.0, 0.0),
                Point::new(50.0, 0.0)
            )
        );
    }

    #[test]
    fn partial_progress_reveals_from_the_left() {
        let scale = compute_scale(0.0, 100.0, None);
        let s = series(&[50.0, 50.0, 50.0]);
        let marks = line_series_marks(&plot(&scale), 0, &s, 0.25);
        let reveal = line_of(&marks)
            .reveal
            .clone()
            .unwrap_or_else(|| panic!("expected a reveal dash"));
        assert!((reveal.intervals[0] - 100.0).abs() < 1e-6);
        assert!((reveal.offset - 75.0).abs() < 1e-6);
        // 25 px into a 100 px line is on, 30 px is off.
        assert!(reveal.is_on_at(20.0));
        assert!(!reveal.is_on_at(30.0));
    }

    #[test]
    fn markers_follow_reveal_and_anomalies_draw_stars() {
        let scale = compute_scale(0.0, 100.0, None);
        let mut s = series(&[10.0, 20.0, 30.0, 40.0, 50.0]).with_point_style(PointStyle::filled(6.0));
        s.points[1].is_anomaly = true;

        let marks = line_series_marks(&plot(&scale), 0, &s, 0.5);
        let spacers = marks.iter().filter(|m| m.z_index == z_order::POINT_SPACERS).count();
        let points = marks.iter().filter(|m| m.z_index == z_order::SERIES_POINTS).count();
        // Indices 0..=2 are revealed; index 1 is a star (stroke + fill, no spacer).
        assert_eq!(spacers, 2);
        assert_eq!(points, 4);

        let forced = PointStyle::None;
        let ctx = LinePlot {
            point_style: Some(&forced),
            ..plot(&scale)
        };
        let marks = line_series_marks(&ctx, 0, &s, 1.0);
        assert_eq!(marks.len(), 1);
    }

    #[test]
    fn dot_path_type_uses_round_dots() {
        let scale = compute_scale(0.0, 100.0, None);
        let s = series(&[10.0, 20.0]).with_path_type(LinePathType::Dot);
        let marks = line_series_marks(&plot(&scale), 0, &s, 1.0);
        let stroke = line_of(&marks).stroke.clone().unwrap_or_default();
        assert_eq!(stroke.cap, LineCap::Round);
        assert_eq!(stroke.dash, Some(DashPattern::new([0.1, 4.0], 0.0)));
    }

    #[test]
    fn gradient_fades_in_over_last_quarter() {
        let scale = compute_scale(0.0, 100.0, None);
        let s = series(&[10.0, 60.0, 30.0]);
        let gradient = GradientStyle::default();
        let ctx = LinePlot {
            gradient: Some(&gradient),
            ..plot(&scale)
        };
        let fills = |p: f64| {
            line_series_marks(&ctx, 0, &s, p)
                .into_iter()
                .filter(|m| m.z_index == z_order::SERIES_UNDERLAY)
                .count()
        };
        assert_eq!(fills(0.7), 0);
        assert_eq!(fills(0.9), 1);
        assert_eq!(fills(1.0), 1);
    }

    #[test]
    fn scrolled_series_only_emits_visible_window() {
        let scale = compute_scale(0.0, 100.0, None);
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let s = series(&values);
        let ctx = LinePlot {
            scroll_offset: -1000.0,
            ..plot(&scale)
        };
        let marks = line_series_marks(&ctx, 0, &s, 1.0);
        let first = line_of(&marks)
            .path
            .elements()
            .first()
            .and_then(|el| el.end_point())
            .unwrap_or_default();
        // Index 19 is one slot left of the window.
        assert!((first.x - (19.0 * 50.0 - 1000.0)).abs() < 1e-9);
    }

    #[test]
    fn chart_animates_series_in() {
        let style = LineChartStyle::default()
            .with_animation(AnimationSpec::new(100.0, Easing::Linear));
        let mut chart = LineChart::new(3, style);
        let s = series(&[10.0, 20.0, 15.0]);
        assert!(chart.set_data(&[s.clone()]));
        assert_eq!(chart.progress_of(&s), Some(0.0));
        assert!(chart.tick(50.0));
        assert_eq!(chart.progress_of(&s), Some(0.5));
        while chart.tick(16.0) {}
        assert_eq!(chart.progress_of(&s), Some(1.0));
        assert!(!chart.marks(Size::new(300.0, 200.0), &crate::HeuristicTextMeasurer).is_empty());
    }

    #[test]
    fn max_value_hook_forces_axis_top() {
        fn hundred(_: f64) -> f64 {
            100.0
        }
        let style = LineChartStyle {
            max_value: Some(hundred as MaxValueHook),
            ..LineChartStyle::default()
        };
        let mut chart = LineChart::new(3, style);
        chart.set_data(&[series(&[10.0, 20.0])]);
        let scale = chart.scale().unwrap_or_else(|| panic!("scale"));
        assert_eq!(scale.max_value, 100.0);
    }
}

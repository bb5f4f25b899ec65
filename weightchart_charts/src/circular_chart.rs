// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie/donut charts and radial progress gauges.
//!
//! One slice draws a gauge: a background track, the progress arc and optional needle, leading
//! dot and scale labels. Two or more slices draw a pie whose slices can be clicked.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Point, Size};
use peniko::Color;
use weightchart_core::{
    LineCap, Mark, MarkId, PathChannels, StrokeStyle, TextAnchor, TextBaseline, TextChannels,
};

use crate::animation::Tween;
use crate::format::format_whole;
use crate::hit_test::{PieSelection, SelectionError, hit_test};
use crate::ids::{layer, mark_id};
use crate::measure::TextMeasurer;
use crate::model::{CircularSlice, finite};
use crate::style::{CircularChartStyle, MeterText};
use crate::symbol::{arc_path, circle_path, needle_path};
use crate::z_order;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Start and sweep of every slice, in degrees.
///
/// Slices are laid out back to back from `start`, separated by `spacing` (already signed to
/// follow `sweep`). Slice `i` spans `values[i] / total * (sweep - spacing * (n - 1))`, so the
/// slices and gaps together cover exactly `sweep`. A zero or non-finite total gives every
/// slice a zero sweep.
pub fn slice_angles(values: &[f64], start: f64, sweep: f64, spacing: f64) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().copied().map(finite).sum();
    let gaps = values.len().saturating_sub(1) as f64;
    let available = sweep - spacing * gaps;
    let mut at = start;
    values
        .iter()
        .map(|&v| {
            let share = if total != 0.0 && total.is_finite() {
                finite(v) / total * available
            } else {
                0.0
            };
            let slice = (at, share);
            at += share + spacing;
            slice
        })
        .collect()
}

/// Where and how big the ring is inside a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularGeometry {
    /// Ring centre.
    pub center: Point,
    /// Diameter of the box the ring fills.
    pub diameter: f64,
    /// Effective ring width (half the diameter for a full pie).
    pub line_width: f64,
    /// Extra width reserved for a pressed slice.
    pub pressed_width: f64,
    /// Radius of the ring's centre line.
    pub radius: f64,
    /// Signed gap between slices, in degrees.
    pub spacing_angle: f64,
}

fn is_axis_angle(angle: f64) -> bool {
    [0.0, 90.0, 180.0, 270.0, 360.0].contains(&angle.abs())
}

impl CircularGeometry {
    /// Sizes the ring for `viewport`.
    ///
    /// Half circles that start on an axis can be grown to fill their box when
    /// `draw_for_min_size` is set: the centre moves to the middle of the edge the half circle
    /// stands on.
    pub fn arrange(viewport: Size, style: &CircularChartStyle) -> Self {
        let (w, h) = (viewport.width.max(0.0), viewport.height.max(0.0));
        let half_circle = style.draw_for_min_size
            && style.sweep_angle.abs() == 180.0
            && is_axis_angle(style.start_angle);

        let (center, diameter) = if half_circle {
            let center = match (style.sweep_angle > 0.0, h > w) {
                (true, true) => Point::new(w, h * 0.5),
                (true, false) => Point::new(w * 0.5, h),
                (false, true) => Point::new(0.0, h * 0.5),
                (false, false) => Point::new(w * 0.5, 0.0),
            };
            let diameter = if h < w * 0.5 {
                if h < w { h * 2.0 } else { w }
            } else if w < h * 0.5 {
                if w < h { w * 2.0 } else { h }
            } else {
                w.max(h)
            };
            (center, diameter)
        } else {
            (Point::new(w * 0.5, h * 0.5), w.min(h))
        };

        let line_width = if style.line_width <= 0.0 {
            diameter * 0.5
        } else {
            style.line_width
        };
        let pressed_width = line_width * style.scale_percent_on_click / 100.0;
        let radius = diameter * 0.5 - line_width * 0.5 - pressed_width * 0.5;

        let spacing = if style.spacing_angle == 0.0 {
            if radius > 0.0 {
                (style.spacing_width / radius).to_degrees()
            } else {
                0.0
            }
        } else {
            style.spacing_angle
        };
        let spacing_angle = if style.sweep_angle < 0.0 { -spacing } else { spacing };

        Self {
            center,
            diameter,
            line_width,
            pressed_width,
            radius,
            spacing_angle,
        }
    }
}

/// A pie or radial gauge with an animated sweep and clickable slices.
#[derive(Debug)]
pub struct CircularChart {
    ns: u32,
    style: CircularChartStyle,
    slices: Vec<CircularSlice>,
    sweep: Tween,
    selection: PieSelection,
}

impl CircularChart {
    /// Creates an empty chart whose marks live in namespace `ns`.
    pub fn new(ns: u32, style: CircularChartStyle) -> Self {
        Self {
            ns,
            sweep: Tween::new(0.0, style.animation),
            style,
            slices: Vec::new(),
            selection: PieSelection::new(),
        }
    }

    /// Current style.
    pub fn style(&self) -> &CircularChartStyle {
        &self.style
    }

    /// Replaces the style and animates towards the sweep it implies.
    pub fn set_style(&mut self, style: CircularChartStyle) {
        self.sweep.set_spec(style.animation);
        self.style = style;
        if !self.slices.is_empty() {
            self.sweep.animate_to(self.target_sweep());
        }
    }

    /// Current slices.
    pub fn slices(&self) -> &[CircularSlice] {
        &self.slices
    }

    /// Returns `true` when the slices form a pie rather than a gauge.
    pub fn is_pie(&self) -> bool {
        self.slices.len() > 1
    }

    fn target_sweep(&self) -> f64 {
        if self.is_pie() {
            self.style.sweep_angle
        } else {
            self.style.radial.progress.clamp(0.0, 100.0) / 100.0 * self.style.sweep_angle
        }
    }

    /// Pushes new slices. Returns `true` if they differ from the current ones.
    ///
    /// A pie regrows from zero; a gauge moves from its current sweep to the new target.
    pub fn set_data(&mut self, slices: &[CircularSlice]) -> bool {
        if self.slices == slices {
            return false;
        }
        let total: f64 = slices.iter().map(|s| s.value).sum();
        if slices.len() > 1 && (total == 0.0 || !total.is_finite()) {
            tracing::warn!(total, "pie slices do not sum to a positive value; drawing empty");
        }
        let progress = self.style.radial.progress;
        if !(0.0..=100.0).contains(&progress) {
            tracing::warn!(progress, "gauge progress outside 0..=100 clamped");
        }

        self.slices = slices.to_vec();
        if self
            .selection
            .pressed()
            .is_some_and(|pressed| pressed >= self.slices.len())
        {
            self.selection.clear();
        }
        if self.is_pie() {
            self.sweep.snap_to(0.0);
        }
        self.sweep.animate_to(self.target_sweep());
        tracing::debug!(slices = slices.len(), pie = self.is_pie(), "circular data replaced");
        true
    }

    /// Advances the sweep animation. Returns `true` while another frame is needed.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let running = self.sweep.tick(dt_ms);
        tracing::trace!(dt_ms, running, sweep = self.sweep.value(), "circular chart tick");
        running
    }

    /// Animated sweep in degrees.
    pub fn animated_sweep(&self) -> f64 {
        self.sweep.value()
    }

    /// Installs the slice click listener; `None` reports a cleared selection.
    pub fn on_click(&mut self, listener: impl FnMut(Option<usize>) + 'static) {
        self.selection.set_listener(listener);
    }

    /// Currently pressed slice.
    pub fn pressed(&self) -> Option<usize> {
        self.selection.pressed()
    }

    /// Selects a slice without notifying the listener.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), SelectionError> {
        self.selection.select(index, self.slices.len())
    }

    /// Full (unanimated) start and sweep of each slice in `viewport`.
    pub fn slice_angles(&self, viewport: Size) -> Vec<(f64, f64)> {
        let geometry = CircularGeometry::arrange(viewport, &self.style);
        self.angles(&geometry)
    }

    fn angles(&self, geometry: &CircularGeometry) -> Vec<(f64, f64)> {
        let values: Vec<f64> = self.slices.iter().map(|s| s.value).collect();
        slice_angles(
            &values,
            self.style.start_angle,
            self.style.sweep_angle,
            geometry.spacing_angle,
        )
    }

    /// Routes a click at `pointer` to the pie.
    ///
    /// Returns the selection change reported to the listener, if any. Gauges and pies with
    /// `scale_percent_on_click == 0` ignore clicks.
    pub fn click(&mut self, pointer: Point, viewport: Size) -> Option<Option<usize>> {
        if !self.is_pie() || self.style.scale_percent_on_click <= 0.0 {
            return None;
        }
        let geometry = CircularGeometry::arrange(viewport, &self.style);
        let (starts, sweeps): (Vec<f64>, Vec<f64>) = self.angles(&geometry).into_iter().unzip();
        let hit = hit_test(
            pointer,
            geometry.center,
            geometry.radius,
            geometry.line_width,
            &starts,
            &sweeps,
        );
        self.selection.click(hit)
    }

    /// Marks for the current frame.
    pub fn marks(&self, viewport: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::new();
        let geometry = CircularGeometry::arrange(viewport, &self.style);
        if self.slices.is_empty() || geometry.radius <= 0.0 {
            return out;
        }
        if self.is_pie() {
            self.pie_marks(&geometry, measurer, &mut out);
        } else {
            self.gauge_marks(&geometry, measurer, &mut out);
        }
        out
    }

    fn pie_marks(&self, g: &CircularGeometry, measurer: &dyn TextMeasurer, out: &mut Vec<Mark>) {
        let angles = self.angles(g);
        let full = self.style.sweep_angle;
        let factor = if full != 0.0 {
            self.sweep.value() / full
        } else {
            0.0
        };
        let cap = self.style.stroke_cap.unwrap_or(LineCap::Butt);
        for (i, (slice, &(start, sweep))) in self.slices.iter().zip(&angles).enumerate() {
            let pressed = if self.selection.pressed() == Some(i) {
                g.line_width * self.style.scale_percent_on_click / 100.0
            } else {
                0.0
            };
            out.push(arc_mark(
                mark_id(self.ns, layer::SLICE, i as u64),
                arc_path(g.center, g.radius, start, sweep * factor),
                slice.color,
                g.line_width + pressed,
                cap,
                z_order::SERIES_FILL,
            ));
        }

        if full != 0.0
            && let Some(meter) = &self.style.meter_text
        {
            self.slice_value_marks(g, meter, &angles, measurer, out);
        }
    }

    fn gauge_marks(&self, g: &CircularGeometry, measurer: &dyn TextMeasurer, out: &mut Vec<Mark>) {
        let Some(slice) = self.slices.first() else {
            return;
        };
        let style = &self.style;
        let cap = style.stroke_cap.unwrap_or(LineCap::Round);
        let lifted = if style.sweep_angle == 180.0 {
            Point::new(g.center.x, g.center.y - g.line_width * 0.5)
        } else {
            g.center
        };
        let track = style
            .progress_background
            .unwrap_or_else(|| slice.color.multiply_alpha(0.2));

        out.push(arc_mark(
            mark_id(self.ns, layer::TRACK, 0),
            arc_path(lifted, g.radius, style.start_angle, style.sweep_angle),
            track,
            g.line_width,
            cap,
            z_order::SERIES_UNDERLAY,
        ));
        let animated = self.sweep.value();
        out.push(arc_mark(
            mark_id(self.ns, layer::SLICE, 0),
            arc_path(lifted, g.radius, style.start_angle, animated),
            slice.color,
            g.line_width,
            cap,
            z_order::SERIES_FILL,
        ));

        let pivot = Point::new(g.center.x, g.center.y - g.line_width * 0.5);
        let rotation = style.start_angle + animated + 180.0;
        if let Some(needle) = &style.radial.needle {
            let length = if needle.length == 0.0 {
                g.radius * 0.5
            } else {
                needle.length
            };
            out.push(
                Mark::path(
                    mark_id(self.ns, layer::NEEDLE, 0),
                    PathChannels::filled(
                        needle_path(pivot, needle.width, length, rotation),
                        slice.color,
                    ),
                )
                .with_z_index(z_order::POINTERS),
            );
            out.push(
                Mark::path(
                    mark_id(self.ns, layer::NEEDLE, 1),
                    PathChannels::filled(circle_path(pivot, needle.base_radius * 2.0), slice.color),
                )
                .with_z_index(z_order::POINTERS),
            );
        }
        if let Some(indicator) = &style.radial.leading_indicator {
            let at = Point::new(pivot.x - g.diameter * 0.5 + g.line_width * 0.5, pivot.y);
            let at = Affine::rotate_about(rotation.to_radians(), pivot) * at;
            out.push(
                Mark::path(
                    mark_id(self.ns, layer::INDICATOR, 0),
                    PathChannels::filled(circle_path(at, indicator.radius * 2.0), indicator.color),
                )
                .with_z_index(z_order::POINTERS + 1),
            );
        }

        if let Some(meter) = &style.meter_text {
            if meter.count > 0 {
                self.meter_scale_marks(g, meter, measurer, out);
            } else {
                let full = style.radial.progress.clamp(0.0, 100.0) / 100.0 * style.sweep_angle;
                self.slice_value_marks(g, meter, &[(style.start_angle, full)], measurer, out);
            }
        }
    }

    /// `count` evenly spaced scale labels from `start_value` to `end_value` along the sweep.
    fn meter_scale_marks(
        &self,
        g: &CircularGeometry,
        meter: &MeterText,
        measurer: &dyn TextMeasurer,
        out: &mut Vec<Mark>,
    ) {
        let steps = f64::from(meter.count.saturating_sub(1).max(1));
        let angle_step = self.style.sweep_angle / steps;
        let value_step = (meter.end_value - meter.start_value) / steps;
        for i in 0..meter.count {
            let value = meter.start_value + value_step * f64::from(i);
            let angle = self.style.start_angle + angle_step * f64::from(i);
            out.push(meter_text_mark(
                mark_id(self.ns, layer::METER_TEXT, u64::from(i)),
                g,
                meter,
                angle,
                value,
                measurer,
            ));
        }
    }

    /// Each slice's whole value at the middle of its arc.
    fn slice_value_marks(
        &self,
        g: &CircularGeometry,
        meter: &MeterText,
        angles: &[(f64, f64)],
        measurer: &dyn TextMeasurer,
        out: &mut Vec<Mark>,
    ) {
        for (i, (slice, &(start, sweep))) in self.slices.iter().zip(angles).enumerate() {
            out.push(meter_text_mark(
                mark_id(self.ns, layer::METER_TEXT, i as u64),
                g,
                meter,
                start + sweep * 0.5,
                slice.value,
                measurer,
            ));
        }
    }
}

impl Default for CircularChart {
    fn default() -> Self {
        Self::new(0, CircularChartStyle::default())
    }
}

fn arc_mark(
    id: MarkId,
    path: BezPath,
    color: Color,
    width: f64,
    cap: LineCap,
    z_index: i32,
) -> Mark {
    Mark::path(
        id,
        PathChannels::stroked(path, StrokeStyle::solid(color, width).with_cap(cap)),
    )
    .with_z_index(z_index)
}

/// A label centred on the circle `radius - line_width / 2 - spacing` at `angle_deg`.
fn meter_text_mark(
    id: MarkId,
    g: &CircularGeometry,
    meter: &MeterText,
    angle_deg: f64,
    value: f64,
    measurer: &dyn TextMeasurer,
) -> Mark {
    let text = format_whole(value);
    let (_, height) = measurer.measure(&text, meter.text.font_size);
    let r = g.radius - g.line_width * 0.5 - meter.spacing;
    let a = angle_deg.to_radians();
    Mark::text(
        id,
        TextChannels {
            pos: Point::new(g.center.x + r * a.cos(), g.center.y + r * a.sin() + height * 0.5),
            text,
            font_size: meter.text.font_size,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Alphabetic,
            fill: meter.text.color.into(),
            ..TextChannels::default()
        },
    )
    .with_z_index(z_order::VALUE_LABELS)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;

    use peniko::Brush;
    use peniko::color::palette::css;
    use weightchart_core::MarkPayload;

    use super::*;
    use crate::animation::{AnimationSpec, Easing};
    use crate::measure::HeuristicTextMeasurer;
    use crate::style::{LeadingIndicator, NeedlePointerStyle, RadialProgressStyle};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn pie() -> Vec<CircularSlice> {
        alloc::vec![
            CircularSlice::new(30.0, css::RED),
            CircularSlice::new(50.0, css::GREEN),
            CircularSlice::new(20.0, css::BLUE),
        ]
    }

    fn stroke_width(mark: &Mark) -> f64 {
        match &mark.payload {
            MarkPayload::Path(p) => p.stroke.as_ref().map_or(0.0, |s| s.width),
            _ => 0.0,
        }
    }

    #[test]
    fn slices_and_gaps_cover_the_sweep() {
        let angles = slice_angles(&[30.0, 50.0, 20.0], 180.0, 180.0, 2.0);
        let total: f64 = angles.iter().map(|(_, s)| s).sum();
        assert!(close(total, 180.0 - 2.0 * 2.0));
        assert!(close(angles[0].0, 180.0));
        assert!(close(angles[1].0, angles[0].0 + angles[0].1 + 2.0));
        let (last_start, last_sweep) = angles[2];
        assert!(close(last_start + last_sweep, 360.0));
        assert!(close(angles[1].1, 176.0 * 0.5));
    }

    #[test]
    fn zero_total_gives_zero_sweeps() {
        let angles = slice_angles(&[0.0, 0.0], 0.0, 360.0, 4.0);
        assert!(angles.iter().all(|&(start, sweep)| sweep == 0.0 && start.is_finite()));
        assert!(slice_angles(&[], 0.0, 360.0, 4.0).is_empty());
    }

    #[test]
    fn half_pie_fills_its_box() {
        let style = CircularChartStyle::pie();
        let g = CircularGeometry::arrange(Size::new(200.0, 100.0), &style);
        assert_eq!(g.center, Point::new(100.0, 100.0));
        assert_eq!(g.diameter, 200.0);
        // 100 - 2/2 - (2 * 20%)/2
        assert!(close(g.radius, 98.8));

        let wide = CircularGeometry::arrange(Size::new(300.0, 100.0), &style);
        assert_eq!(wide.diameter, 200.0);
        assert_eq!(wide.center, Point::new(150.0, 100.0));

        let gauge = CircularGeometry::arrange(Size::new(200.0, 120.0), &CircularChartStyle::gauge());
        assert_eq!(gauge.center, Point::new(100.0, 60.0));
        assert_eq!(gauge.diameter, 120.0);
    }

    #[test]
    fn full_pie_and_spacing_from_width() {
        let mut style = CircularChartStyle::pie()
            .with_angles(0.0, 360.0)
            .with_line_width(0.0);
        style.scale_percent_on_click = 0.0;
        style.spacing_width = 10.0;
        let g = CircularGeometry::arrange(Size::new(100.0, 100.0), &style);
        assert_eq!(g.line_width, 50.0);
        assert!(close(g.radius, 25.0));
        assert!(close(g.spacing_angle, (10.0_f64 / 25.0).to_degrees()));

        let reversed = style.with_angles(0.0, -360.0);
        let g = CircularGeometry::arrange(Size::new(100.0, 100.0), &reversed);
        assert!(g.spacing_angle < 0.0);
    }

    #[test]
    fn pie_regrows_on_new_data() {
        let style = CircularChartStyle::pie().with_animation(AnimationSpec::new(100.0, Easing::Linear));
        let mut chart = CircularChart::new(4, style);
        assert!(chart.set_data(&pie()));
        assert!(!chart.set_data(&pie()));
        chart.tick(50.0);
        assert!(close(chart.animated_sweep(), 90.0));
        chart.tick(50.0);
        assert!(close(chart.animated_sweep(), 180.0));

        let mut other = pie();
        other[0].value = 10.0;
        chart.set_data(&other);
        assert_eq!(chart.animated_sweep(), 0.0);
        assert!(chart.tick(10.0));
    }

    #[test]
    fn clicking_a_slice_widens_it_and_toggles() {
        let viewport = Size::new(200.0, 100.0);
        let mut chart = CircularChart::default();
        chart.set_data(&pie());
        let g = CircularGeometry::arrange(viewport, chart.style());
        let angles = chart.slice_angles(viewport);
        let (start, sweep) = angles[1];
        let mid = (start + sweep * 0.5).to_radians();
        let pointer = Point::new(
            g.center.x + g.radius * mid.cos(),
            g.center.y + g.radius * mid.sin(),
        );

        assert_eq!(chart.click(pointer, viewport), Some(Some(1)));
        let marks = chart.marks(viewport, &HeuristicTextMeasurer);
        assert_eq!(marks.len(), 3);
        assert!(close(stroke_width(&marks[1]), 2.4));
        assert!(close(stroke_width(&marks[0]), 2.0));

        assert_eq!(chart.click(pointer, viewport), Some(None));
        assert_eq!(chart.pressed(), None);
        // Inside the hole.
        assert_eq!(chart.click(g.center, viewport), None);

        assert!(chart.select(Some(2)).is_ok());
        assert_eq!(chart.pressed(), Some(2));
        assert!(chart.select(Some(3)).is_err());
    }

    #[test]
    fn gauge_draws_track_progress_and_pointers() {
        let style = CircularChartStyle::gauge()
            .with_line_width(10.0)
            .with_animation(AnimationSpec::new(100.0, Easing::Linear))
            .with_radial(
                RadialProgressStyle::default()
                    .with_progress(50.0)
                    .with_needle(NeedlePointerStyle::default())
                    .with_leading_indicator(LeadingIndicator::default()),
            );
        let mut chart = CircularChart::new(5, style);
        chart.set_data(&[CircularSlice::new(72.0, css::TEAL)]);
        assert!(!chart.is_pie());
        chart.tick(100.0);
        assert!(close(chart.animated_sweep(), 90.0));

        let viewport = Size::new(200.0, 200.0);
        let marks = chart.marks(viewport, &HeuristicTextMeasurer);
        // Track, progress, needle, hub, indicator.
        assert_eq!(marks.len(), 5);
        let MarkPayload::Path(track) = &marks[0].payload else {
            panic!("track should be a path");
        };
        let track_color = track.stroke.as_ref().map(|s| s.brush.clone());
        assert_eq!(track_color, Some(Brush::from(css::TEAL.multiply_alpha(0.2))));
        assert_eq!(track.stroke.as_ref().map(|s| s.cap), Some(LineCap::Round));

        // Half-way round a 180 degree sweep from 180: the dot sits straight above the pivot.
        let g = CircularGeometry::arrange(viewport, chart.style());
        let dot = marks[4].payload.bounds().map(|b| b.center());
        let Some(dot) = dot else {
            panic!("indicator should have bounds");
        };
        assert!(close(dot.x, g.center.x));
        assert!(close(dot.y, g.center.y - 5.0 - (100.0 - 5.0)));

        let needle = marks[2].payload.bounds().unwrap_or_default();
        assert!(needle.y0 < g.center.y - 5.0 - g.radius * 0.5 + 1e-6);
    }

    #[test]
    fn meter_scale_labels_spread_along_the_sweep() {
        let style = CircularChartStyle::gauge().with_meter_text(MeterText {
            count: 3,
            ..MeterText::default()
        });
        let mut chart = CircularChart::new(6, style);
        chart.set_data(&[CircularSlice::new(40.0, css::TEAL)]);
        let marks = chart.marks(Size::new(200.0, 200.0), &HeuristicTextMeasurer);
        let labels: Vec<(String, Point)> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((t.text.clone(), t.pos)),
                _ => None,
            })
            .collect();
        let texts: Vec<&str> = labels.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, ["0", "50", "100"]);
        // The first label sits left of centre, the middle one above it.
        assert!(labels[0].1.x < 100.0);
        assert!(close(labels[1].1.x, 100.0));
        assert!(labels[1].1.y < 100.0);
    }

    #[test]
    fn pie_meter_text_labels_slices() {
        let style = CircularChartStyle::pie().with_meter_text(MeterText::default());
        let mut chart = CircularChart::new(7, style);
        chart.set_data(&pie());
        let marks = chart.marks(Size::new(200.0, 100.0), &HeuristicTextMeasurer);
        let texts: Vec<String> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["30", "50", "20"]);
    }
}

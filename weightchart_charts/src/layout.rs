// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure/arrange layout for the cartesian charts.
//!
//! - **Measure**: x labels give the bottom margin (rotated when slanted), y labels give the
//!   value-axis column width.
//! - **Arrange**: the plot takes what is left; y labels are spread over the plot height and x
//!   labels follow the scroll offset underneath.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

use kurbo::{Rect, Size};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::measure::TextMeasurer;
use crate::model::XLabelOrientation;
use crate::style::{ChartPadding, LabelStyle};

/// Bottom margin reserved for an x label box of `width` x `height` rotated by `angle_deg`.
///
/// `width * sin|a| + height * cos|a|`, which is the vertical extent of the rotated box.
pub fn bottom_spacing(width: f64, height: f64, angle_deg: f64) -> f64 {
    let a = angle_deg.abs().to_radians();
    width * a.sin() + height * a.cos()
}

/// Gap between consecutive labels stacked in `available` space.
///
/// The leftover space is split over `count - 1` gaps, with at least one gap.
pub fn label_gap(available: f64, label_heights: &[f64]) -> f64 {
    let total: f64 = label_heights.iter().sum();
    let gaps = label_heights.len().saturating_sub(1).max(1);
    (available - total) / gaps as f64
}

/// Scrollable width of line content: `max_points * step - trailing`.
///
/// Line points sit on the slot boundaries, so the last point still owns a full step unless the
/// caller trims it (the combined chart removes one data spacing).
pub fn line_content_width(max_points: usize, step: f64, trailing: f64) -> f64 {
    if max_points == 0 {
        return 0.0;
    }
    (max_points as f64 * step - trailing).max(0.0)
}

/// Scrollable width of bar content: `(groups - 1) * step`.
///
/// Groups are anchored between gridlines, so the first group adds no width.
pub fn bar_content_width(groups: usize, step: f64) -> f64 {
    groups.saturating_sub(1) as f64 * step
}

/// Indices of a `len`-long series that can intersect a `width`-wide window at scroll `offset`.
///
/// One index of slack is kept on both sides so segments entering the window are complete.
/// Returns `None` for an empty series.
#[allow(
    clippy::cast_possible_truncation,
    reason = "indices are clamped to the series length before conversion"
)]
pub fn visible_range(
    len: usize,
    spacing: f64,
    offset: f64,
    width: f64,
) -> Option<RangeInclusive<usize>> {
    if len == 0 {
        return None;
    }
    let last = (len - 1) as f64;
    if spacing.is_nan() || spacing <= 0.0 || !offset.is_finite() || !width.is_finite() {
        return Some(0..=len - 1);
    }
    let start = ((-offset / spacing).floor() - 1.0).clamp(0.0, last);
    let end = (((-offset + width) / spacing).floor() + 1.0).clamp(0.0, last);
    Some(start as usize..=(end.max(start)) as usize)
}

/// Inputs to [`ChartLayout::arrange`].
#[derive(Clone, Copy, Debug)]
pub struct CartesianLayoutSpec<'a> {
    /// Outer chart size.
    pub viewport: Size,
    /// X-axis labels in slot order.
    pub x_labels: &'a [String],
    /// Value-axis labels, top to bottom.
    pub y_labels: &'a [String],
    /// Label visibility and fonts.
    pub labels: &'a LabelStyle,
    /// X-label rotation.
    pub orientation: XLabelOrientation,
    /// Width of one x label box; labels are centred in it.
    pub slot_width: f64,
    /// Distance between consecutive x labels.
    pub step: f64,
    /// Bar width, used to centre bars under their labels; `0` for lines.
    pub bar_width: f64,
    /// Fixed value-axis label width; `0` sizes to the widest label.
    pub y_label_width: f64,
    /// Gaps around the axes.
    pub padding: ChartPadding,
    /// Headroom above the plot (line width plus marker size for lines).
    pub top_padding: f64,
}

/// Output of the arrange pass, in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// Width of the value-axis label column, including its padding.
    pub y_axis_width: f64,
    /// Height of one value-axis label.
    pub y_label_height: f64,
    /// Bottom margin reserved for the x labels.
    pub bottom_spacing: f64,
    /// The series canvas. Its left edge is shifted so the first slot centres under its label.
    pub plot: Rect,
    /// Region right of the value axis; series and x labels never draw outside it.
    pub clip: Rect,
    /// Gridline rectangle: the plot's vertical extent across the clip width.
    pub grid: Rect,
    /// Vertical centre of every value-axis label, top to bottom.
    pub y_label_centers: Vec<f64>,
    /// Right edge of the value-axis labels.
    pub y_label_right: f64,
    /// Vertical centre of the x labels.
    pub x_label_center_y: f64,
    /// Width of one x label box.
    pub slot_width: f64,
    /// Distance between consecutive x labels.
    pub step: f64,
}

impl ChartLayout {
    /// Measures the axis labels and arranges plot and labels inside the viewport.
    pub fn arrange(spec: &CartesianLayoutSpec<'_>, measurer: &dyn TextMeasurer) -> Self {
        let width = spec.viewport.width.max(0.0);
        let height = spec.viewport.height.max(0.0);
        let view = Rect::new(0.0, 0.0, width, height);
        let top = spec.top_padding.max(0.0);
        let bottom_padding = spec.padding.x_axis.max(0.0);

        // Measure x labels: fixed-width boxes, height from the font.
        let show_x = spec.labels.show_bottom_labels && !spec.x_labels.is_empty();
        let x_label_height = if show_x {
            spec.x_labels
                .iter()
                .map(|l| measurer.measure(l, spec.labels.bottom.font_size).1)
                .fold(0.0, f64::max)
        } else {
            0.0
        };
        let angle = spec.orientation.angle();
        let bottom = if show_x {
            bottom_spacing(spec.slot_width, x_label_height, angle)
        } else {
            0.0
        };

        // Measure y labels.
        let show_y = spec.labels.show_data_labels && !spec.y_labels.is_empty();
        let y_sizes: Vec<(f64, f64)> = if show_y {
            spec.y_labels
                .iter()
                .map(|l| measurer.measure(l, spec.labels.data.font_size))
                .collect()
        } else {
            Vec::new()
        };
        let y_pad = spec.padding.y_axis.max(0.0);
        let y_axis_width = if y_sizes.is_empty() {
            0.0
        } else if spec.y_label_width > 0.0 {
            spec.y_label_width + y_pad
        } else {
            y_sizes.iter().map(|s| s.0).fold(0.0, f64::max) + y_pad
        };
        let y_label_height = y_sizes.iter().map(|s| s.1).fold(0.0, f64::max);

        // Arrange the plot in what is left.
        let plot_height = (height - top - bottom - y_label_height - bottom_padding).max(0.0);
        let plot_top = top + y_label_height * 0.5;
        let plot_left = y_axis_width + (spec.slot_width - spec.bar_width) * 0.5;
        let plot = Rect::new(
            plot_left,
            plot_top,
            plot_left + (width - y_axis_width).max(0.0),
            plot_top + plot_height,
        );
        let clip = Rect::new(y_axis_width.min(width), 0.0, width, height);
        let grid = Rect::new(clip.x0, plot.y0, clip.x1, plot.y1);

        // Spread the y labels from the top padding down to the bottom margin.
        let heights: Vec<f64> = y_sizes.iter().map(|s| s.1).collect();
        let gap = label_gap(height - bottom - top - bottom_padding, &heights);
        let mut y = top;
        let mut y_label_centers = Vec::with_capacity(heights.len());
        for h in &heights {
            y_label_centers.push(y + h * 0.5);
            y += h + gap;
        }

        let slant_fix = if spec.orientation == XLabelOrientation::Straight {
            0.0
        } else {
            spec.slot_width * angle.to_radians().cos() * 0.5
        };
        let x_label_top = top + plot_height + y_label_height + bottom_padding + slant_fix;

        tracing::trace!(
            y_axis_width,
            plot_height,
            bottom_spacing = bottom,
            "arranged chart layout"
        );

        Self {
            view,
            y_axis_width,
            y_label_height,
            bottom_spacing: bottom,
            plot,
            clip,
            grid,
            y_label_centers,
            y_label_right: y_axis_width - y_pad,
            x_label_center_y: x_label_top + x_label_height * 0.5,
            slot_width: spec.slot_width,
            step: spec.step,
        }
    }

    /// Horizontal centre of x label `index` at scroll `offset`.
    pub fn x_label_center(&self, index: usize, offset: f64) -> f64 {
        self.y_axis_width + index as f64 * self.step + offset + self.slot_width * 0.5
    }

    /// Returns `true` if a label box centred at `x` overlaps the clip region.
    pub fn is_slot_visible(&self, x: f64) -> bool {
        let half = self.slot_width * 0.5;
        x + half > self.clip.x0 && x - half < self.clip.x1
    }

    /// Width available to series content.
    pub fn content_viewport(&self) -> f64 {
        self.clip.width()
    }
}

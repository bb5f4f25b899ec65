// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated charts for a weight tracker, built on `weightchart_core`.
//!
//! Every chart is a small state machine:
//! - **Data** goes in through `set_data`, which diffs against what is on screen and starts
//!   the matching animation.
//! - **Time** goes in through `tick(dt_ms)`, which advances tweens and scroll flings and
//!   reports whether another frame is wanted.
//! - **Marks** come out of `marks(..)`: stable-identity rects, paths and text that a
//!   `weightchart_core::Scene` turns into enter/update/exit diffs for a renderer.
//!
//! The crate ships line, bar, combined bar+line, circular (pie and radial gauge) and
//! vertical-progress charts, plus the shared scale, layout and scroll machinery they use.
//!
//! Text shaping is out of scope; labels are measured through [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod animation;
mod axis;
mod bar_chart;
#[cfg(test)]
mod chart_tests;
mod circular_chart;
mod combined_chart;
mod dataset;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod ids;
mod layout;
mod line_chart;
mod measure;
mod model;
mod scale;
mod scroll;
mod style;
mod symbol;
mod vertical_progress;
mod z_order;

pub use animation::{AnimationSpec, Easing, LabelAnimations, Tween};
pub use axis::{background_mark, grid_line_marks, x_label_marks, y_label_marks};
pub use bar_chart::{BarChart, BarPlot, bar_group_marks};
pub use circular_chart::{CircularChart, CircularGeometry, slice_angles};
pub use combined_chart::CombinedChart;
pub use dataset::{DatasetHolder, Extent, Phase, Reconciliation, reconcile};
pub use format::format_tick_value;
pub use hit_test::{ClickListener, PieSelection, SelectionError, hit_test, pointer_angle};
pub use layout::{
    CartesianLayoutSpec, ChartLayout, bar_content_width, bottom_spacing, label_gap,
    line_content_width, visible_range,
};
pub use line_chart::{LineChart, LinePlot, line_series_marks};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use model::{
    BarGroup, BarValue, CircularSlice, DataPoint, GradientDirection, GradientStyle,
    LinePathType, LineSeries, LineStyle, PointStyle, VerticalProgressItem, XLabelOrientation,
    max_stack_total, same_bar_values,
};
pub use scale::{MAX_TICK_COUNT, ScaleModel, compute_scale};
pub use scroll::{ScrollState, VelocityTracker};
pub use style::{
    BAR_TOP_SPACING, BackgroundStyle, BarChartStyle, BarSize, ChartPadding, CircularChartStyle,
    CombinedChartStyle, LabelStyle, LeadingIndicator, LineChartStyle, MaxValueHook, MeterText,
    NeedlePointerStyle, RadialProgressStyle, STAR_SIZE, TextStyle, VerticalBarSize,
    VerticalProgressStyle,
};
pub use symbol::{arc_path, circle_path, needle_path, rotate_about, star_path};
pub use vertical_progress::{
    ProgressColumns, VerticalProgressChart, top_label, vertical_progress_marks,
};
pub use z_order::*;

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Renderers emit marks in painter order, and also tag them with these coarse z-indexes so a
//! retained painter sorting by `(z_index, frame order)` reproduces the same stacking.

/// Background gridlines.
pub const GRID_LINES: i32 = -50;

/// Gradient fills under lines, pie background arcs and progress tracks.
pub const SERIES_UNDERLAY: i32 = -10;
/// Bars, pie slices and progress fills.
pub const SERIES_FILL: i32 = 0;
/// Stroked series lines.
pub const SERIES_STROKE: i32 = 10;
/// Spacing discs behind data point markers.
pub const POINT_SPACERS: i32 = 15;
/// Data point markers and anomaly stars.
pub const SERIES_POINTS: i32 = 20;
/// Gauge needles and leading indicators.
pub const POINTERS: i32 = 25;

/// Value labels drawn on top of bars or progress columns, and meter text.
pub const VALUE_LABELS: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;

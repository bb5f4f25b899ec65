// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The value-axis scale model.
//!
//! Every cartesian chart (line, bar, combined) maps values onto the vertical axis through a
//! [`ScaleModel`]. The model snaps the data range outwards to the data's order of magnitude and
//! picks a gridline count that never looks sparse.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::format_tick_value;

/// Upper bound on gridline gaps. A range far wider than the magnitude of its maximum (such as
/// `-100..0.01`) would otherwise produce thousands of gridlines.
pub const MAX_TICK_COUNT: usize = 100;

/// Axis bounds and ticks derived from a data range.
///
/// `min_value`/`max_value` are the *shifted* bounds (snapped outward to `tick_interval`), not the
/// raw data extremes. Renderers always map through these so that negative values and non-zero
/// baselines land correctly.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleModel {
    /// Lower axis bound.
    pub min_value: f64,
    /// Upper axis bound.
    pub max_value: f64,
    /// Order-of-magnitude step the bounds were snapped to.
    pub tick_interval: f64,
    /// Number of gaps between gridlines.
    pub tick_count: usize,
    /// Tick values, ascending, `tick_count + 1` entries spanning the bounds inclusively.
    pub tick_values: Vec<f64>,
}

/// Computes the scale for a data range.
///
/// - `shift = 10^floor(log10(|max|))`
/// - bounds snap outward to multiples of `shift`; `force_max`, when given, replaces the upper
///   bound verbatim
/// - `tick_count = round((max - min) / shift)`, then `x5` if it is at most 1, or `x2` if it is
///   at most 4, and never more than [`MAX_TICK_COUNT`]
///
/// `compute_scale(0.0, 0.0, None)` is the degenerate case: a flat three-tick list at zero.
/// A range collapsed onto any other single value is widened by one `shift` so the axis never
/// has zero height.
pub fn compute_scale(min_value: f64, max_value: f64, force_max: Option<f64>) -> ScaleModel {
    let (mut lo, mut hi) = (finite_or_zero(min_value), finite_or_zero(max_value));
    if lo > hi {
        core::mem::swap(&mut lo, &mut hi);
    }

    if lo == 0.0 && hi == 0.0 && force_max.is_none_or(|m| m.is_nan() || m <= 0.0) {
        return ScaleModel {
            min_value: 0.0,
            max_value: 0.0,
            tick_interval: 0.0,
            tick_count: 2,
            tick_values: alloc::vec![0.0; 3],
        };
    }

    let magnitude = if hi != 0.0 { hi.abs() } else { lo.abs() };
    let shift = if magnitude > 0.0 {
        10_f64.powf(magnitude.log10().floor())
    } else {
        1.0
    };

    let min_shift = shift * (lo / shift).floor();
    let mut max_shift = match force_max {
        Some(m) if m.is_finite() && m > 0.0 => m,
        _ => shift * (hi / shift).ceil(),
    };
    if max_shift <= min_shift {
        max_shift = min_shift + shift;
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "gap counts are small positive integers"
    )]
    let mut tick_count = ((max_shift - min_shift) / shift).round().max(1.0) as usize;
    if tick_count <= 1 {
        tick_count *= 5;
    } else if tick_count <= 4 {
        tick_count *= 2;
    }
    if tick_count > MAX_TICK_COUNT {
        tracing::warn!(
            tick_count,
            min = min_shift,
            max = max_shift,
            "gridline count capped"
        );
        tick_count = MAX_TICK_COUNT;
    }

    let step = (max_shift - min_shift) / tick_count as f64;
    let tick_values = (0..=tick_count)
        .map(|i| {
            if i == tick_count {
                max_shift
            } else {
                min_shift + step * i as f64
            }
        })
        .collect();

    ScaleModel {
        min_value: min_shift,
        max_value: max_shift,
        tick_interval: shift,
        tick_count,
        tick_values,
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!(value = v, "non-finite scale bound treated as 0");
        0.0
    }
}

impl ScaleModel {
    /// Returns `true` for the flat all-zero axis.
    pub fn is_degenerate(&self) -> bool {
        self.max_value <= self.min_value
    }

    /// Ticks as fractions of the axis, ascending (`i / tick_count`).
    pub fn tick_fractions(&self) -> Vec<f64> {
        if self.is_degenerate() {
            return alloc::vec![0.0; self.tick_values.len()];
        }
        (0..=self.tick_count)
            .map(|i| i as f64 / self.tick_count as f64)
            .collect()
    }

    /// Position of `value` between the bounds, `0` at `min_value` and `1` at `max_value`.
    ///
    /// Values outside the bounds extrapolate; a degenerate axis maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return 0.0;
        }
        (value - self.min_value) / (self.max_value - self.min_value)
    }

    /// Maps a value into a y coordinate on a canvas of `height`, with y growing downwards.
    pub fn map_y(&self, value: f64, height: f64) -> f64 {
        height - self.normalize(value) * height
    }

    /// Converts a value *span* (such as one stacked segment) into pixels.
    pub fn span_to_px(&self, span: f64, height: f64) -> f64 {
        if self.is_degenerate() || !span.is_finite() {
            return 0.0;
        }
        span / (self.max_value - self.min_value) * height
    }

    /// Value-axis labels for bar-based charts, top to bottom.
    ///
    /// Label `i` is `max - (max / tick_count) * i`; bar charts always anchor at zero.
    pub fn bar_axis_labels(&self) -> Vec<String> {
        if self.tick_count == 0 {
            return Vec::new();
        }
        let step = self.max_value / self.tick_count as f64;
        (0..=self.tick_count)
            .map(|i| format_tick_value(self.max_value - step * i as f64))
            .collect()
    }

    /// Value-axis labels for line charts, top to bottom.
    ///
    /// Each tick fraction `t` becomes `(1 - t) * (max - min) + min`.
    pub fn line_axis_labels(&self) -> Vec<String> {
        let span = self.max_value - self.min_value;
        self.tick_fractions()
            .into_iter()
            .map(|t| format_tick_value((1.0 - t) * span + self.min_value))
            .collect()
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::string::String;
use alloc::string::ToString;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a value-axis tick label.
///
/// Integral values render without a decimal point; anything else renders with exactly one
/// decimal, rounded half away from zero. Float noise such as `67.99999999` counts as integral.
pub fn format_tick_value(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }

    let rounded = (v * 10.0).round() / 10.0;
    // normalize `-0.0`
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    if is_approx_integer(rounded) {
        alloc::format!("{rounded:.0}")
    } else {
        alloc::format!("{rounded:.1}")
    }
}

/// Formats an integer count such as a bar total or a pie slice value (truncating).
pub(crate) fn format_whole(v: f64) -> String {
    if !v.is_finite() {
        return String::from("0");
    }
    let t = v.trunc();
    let t = if t == 0.0 { 0.0 } else { t };
    alloc::format!("{t:.0}")
}

pub(crate) fn is_approx_integer(x: f64) -> bool {
    if !x.is_finite() {
        return false;
    }
    let nearest = x.round();
    let err = (x - nearest).abs();
    err <= 1e-9 * x.abs().max(1.0)
}

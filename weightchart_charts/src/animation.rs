// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven value animation.
//!
//! Nothing here owns a clock: hosts call `tick(dt_ms)` once per frame and read values back.
//! A [`Tween`] moves one scalar towards a target over an [`AnimationSpec`]; a
//! [`LabelAnimations`] keeps one tween per x-axis label for the bar grow-in.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Timing curve applied to linear progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// `cubic-bezier(0.4, 0.0, 0.2, 1.0)`: quick start, long settle.
    FastOutSlowIn,
}

impl Easing {
    /// Maps linear progress `t` in `0..=1` through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluates a CSS-style cubic-bezier timing function at `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }
    let bez = |a: f64, b: f64, s: f64| {
        let u = 1.0 - s;
        3.0 * u * u * s * a + 3.0 * u * s * s * b + s * s * s
    };
    // x(s) is monotonic for control x in 0..=1, so bisection converges.
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..48 {
        let mid = 0.5 * (lo + hi);
        if bez(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bez(y1, y2, 0.5 * (lo + hi))
}

/// Duration, start delay and easing of one animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Run time in milliseconds; `0` jumps straight to the target.
    pub duration_ms: f64,
    /// Wait before the value starts moving.
    pub delay_ms: f64,
    /// Timing curve.
    pub easing: Easing,
}

impl AnimationSpec {
    /// A spec with no delay.
    pub const fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing,
        }
    }

    /// An instantaneous spec.
    pub const fn immediate() -> Self {
        Self::new(0.0, Easing::Linear)
    }

    /// Sets the start delay.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    fn is_instant(&self) -> bool {
        self.duration_ms.max(0.0) == 0.0 && self.delay_ms.max(0.0) == 0.0
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::immediate()
    }
}

/// One animated scalar.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    spec: AnimationSpec,
    from: f64,
    to: f64,
    value: f64,
    elapsed_ms: f64,
    running: bool,
}

impl Tween {
    /// A settled tween at `value`.
    pub fn new(value: f64, spec: AnimationSpec) -> Self {
        Self {
            spec,
            from: value,
            to: value,
            value,
            elapsed_ms: 0.0,
            running: false,
        }
    }

    /// Starts moving from the current value to `target`.
    ///
    /// Re-targeting to the target already in flight is a no-op, so calling this every frame does
    /// not restart the clock. An instantaneous spec lands on the target immediately.
    pub fn animate_to(&mut self, target: f64) {
        if target == self.to && (self.running || self.value == target) {
            return;
        }
        self.from = self.value;
        self.to = target;
        self.elapsed_ms = 0.0;
        if self.spec.is_instant() {
            self.value = target;
            self.running = false;
        } else {
            self.running = true;
        }
    }

    /// Jumps to `value` and stops.
    pub fn snap_to(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.value = value;
        self.elapsed_ms = 0.0;
        self.running = false;
    }

    /// Advances the clock; returns `true` if the value may have changed this frame.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let active = self.elapsed_ms - self.spec.delay_ms;
        if active < 0.0 {
            return true;
        }
        let t = if self.spec.duration_ms > 0.0 {
            (active / self.spec.duration_ms).min(1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            self.value = self.to;
            self.running = false;
        } else {
            self.value = self.from + (self.to - self.from) * self.spec.easing.apply(t);
        }
        true
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value the tween is heading to.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Returns `true` while the value is still moving (or waiting out its delay).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Replaces the timing used by later `animate_to` calls.
    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }
}

/// One grow-in tween per distinct x-axis label.
///
/// All tweens start together and share one spec; there is no per-bar stagger.
#[derive(Clone, Debug, Default)]
pub struct LabelAnimations {
    spec: AnimationSpec,
    entries: Vec<(String, Tween)>,
}

impl LabelAnimations {
    /// Creates an empty set.
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            spec,
            entries: Vec::new(),
        }
    }

    /// Snaps every label of `labels` to 0 and animates it to 1.
    ///
    /// Labels not in `labels` are dropped; duplicates share one tween.
    pub fn restart<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) {
        self.reset(labels);
        for (_, tween) in &mut self.entries {
            tween.animate_to(1.0);
        }
    }

    /// Snaps every label of `labels` to 0 without starting them.
    pub fn reset<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) {
        self.entries.clear();
        for label in labels {
            if self.entries.iter().any(|(l, _)| l == label) {
                continue;
            }
            self.entries
                .push((String::from(label), Tween::new(0.0, self.spec)));
        }
    }

    /// Starts every tween towards 1.
    pub fn start(&mut self) {
        for (_, tween) in &mut self.entries {
            tween.animate_to(1.0);
        }
    }

    /// Advances every tween; returns `true` while any is running.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let mut any = false;
        for (_, tween) in &mut self.entries {
            any |= tween.tick(dt_ms);
        }
        any
    }

    /// Progress of `label`, or `None` if it has no tween.
    pub fn progress(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, t)| t.value())
    }

    /// Returns `true` while any tween is running.
    pub fn is_running(&self) -> bool {
        self.entries.iter().any(|(_, t)| t.is_running())
    }
}

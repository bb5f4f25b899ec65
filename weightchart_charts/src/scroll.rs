// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal scrolling with drag and fling.
//!
//! Offsets are `<= 0`: the content is translated left by `-offset`. Bounds are hard; a fling
//! that reaches one stops there.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use smallvec::SmallVec;

/// Samples older than this (relative to the newest) do not affect the release velocity.
const VELOCITY_WINDOW_MS: f64 = 100.0;
/// Per-16ms velocity retention while flinging.
const FRICTION: f64 = 0.95;
/// Velocities below this (px/ms) count as stopped.
const MIN_VELOCITY: f64 = 0.01;

/// Estimates pointer velocity from recent `(time, position)` samples.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[(f64, f64); 16]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every sample.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Records the pointer at `position` at `time_ms`.
    pub fn add(&mut self, time_ms: f64, position: f64) {
        if let Some(&(last, _)) = self.samples.last() {
            if time_ms < last {
                self.samples.clear();
            }
        }
        self.samples.push((time_ms, position));
        let cutoff = time_ms - VELOCITY_WINDOW_MS;
        self.samples.retain(|s| s.0 >= cutoff);
    }

    /// Least-squares slope of position over time, in px/ms; `0` with fewer than two samples.
    pub fn velocity(&self) -> f64 {
        let n = self.samples.len();
        if n < 2 {
            return 0.0;
        }
        let inv = 1.0 / n as f64;
        let mean_t = self.samples.iter().map(|s| s.0).sum::<f64>() * inv;
        let mean_x = self.samples.iter().map(|s| s.1).sum::<f64>() * inv;
        let (mut num, mut den) = (0.0, 0.0);
        for &(t, x) in &self.samples {
            num += (t - mean_t) * (x - mean_x);
            den += (t - mean_t) * (t - mean_t);
        }
        if den <= f64::EPSILON { 0.0 } else { num / den }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingJump {
    percent: f64,
    remaining_ms: f64,
}

/// Scroll offset, bounds and fling state of one chart.
#[derive(Clone, Debug, Default)]
pub struct ScrollState {
    offset: f64,
    lower_bound: f64,
    upper_bound: f64,
    velocity: f64,
    content_width: f64,
    viewport_width: f64,
    tracker: VelocityTracker,
    pointer: f64,
    dragging: bool,
    pending: Option<PendingJump>,
}

impl ScrollState {
    /// An unscrolled state with no extent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates content and viewport widths.
    ///
    /// Scrolling is enabled only when the content is wider than the viewport; the bounds are
    /// `[-(content - viewport), 0]`. The offset is re-clamped.
    pub fn set_extent(&mut self, content_width: f64, viewport_width: f64) {
        self.content_width = content_width.max(0.0);
        self.viewport_width = viewport_width.max(0.0);
        let overflow = self.content_width - self.viewport_width;
        self.lower_bound = if overflow > 0.0 && self.viewport_width > 0.0 {
            -overflow
        } else {
            0.0
        };
        self.upper_bound = 0.0;
        self.offset = self.clamp(self.offset);
        if !self.is_scrollable() {
            self.velocity = 0.0;
        }
    }

    /// Returns `true` when the content overflows the viewport.
    pub fn is_scrollable(&self) -> bool {
        self.lower_bound < self.upper_bound
    }

    /// Starts a drag at pointer position `x`, cancelling any fling.
    pub fn drag_start(&mut self, time_ms: f64, x: f64) {
        if self.velocity != 0.0 {
            tracing::debug!(velocity = self.velocity, "fling interrupted by drag");
        }
        self.velocity = 0.0;
        self.pending = None;
        self.dragging = true;
        self.pointer = x;
        self.tracker.reset();
        self.tracker.add(time_ms, x);
    }

    /// Moves the pointer by `dx`; the offset follows immediately.
    pub fn drag_by(&mut self, time_ms: f64, dx: f64) {
        if !self.dragging {
            self.drag_start(time_ms, 0.0);
        }
        self.pointer += dx;
        self.tracker.add(time_ms, self.pointer);
        if self.is_scrollable() {
            self.offset = self.clamp(self.offset + dx);
        }
    }

    /// Releases the drag and flings with the recent pointer velocity.
    pub fn drag_end(&mut self, time_ms: f64) {
        if !self.dragging {
            return;
        }
        self.tracker.add(time_ms, self.pointer);
        self.dragging = false;
        let v = self.tracker.velocity();
        self.tracker.reset();
        if self.is_scrollable() && v.abs() >= MIN_VELOCITY {
            tracing::debug!(velocity = v, "fling started");
            self.velocity = v;
        }
    }

    /// Advances a scheduled jump and the fling. Returns `true` while either is pending.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let dt_ms = dt_ms.max(0.0);

        if let Some(mut jump) = self.pending.take() {
            jump.remaining_ms -= dt_ms;
            if jump.remaining_ms <= 0.0 {
                self.scroll_to_percent(jump.percent);
            } else {
                self.pending = Some(jump);
            }
        }

        if self.velocity != 0.0 && !self.dragging {
            let next = self.offset + self.velocity * dt_ms;
            let clamped = self.clamp(next);
            self.offset = clamped;
            self.velocity *= FRICTION.powf(dt_ms / 16.0);
            if clamped != next || self.velocity.abs() < MIN_VELOCITY {
                tracing::debug!(offset = self.offset, "fling stopped");
                self.velocity = 0.0;
            }
        }

        self.velocity != 0.0 || self.pending.is_some()
    }

    /// Jumps to `percent` of the content width: `offset = -(percent * content) / 100`, clamped.
    pub fn scroll_to_percent(&mut self, percent: f64) {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.velocity = 0.0;
        self.offset = self.clamp(-(percent * self.content_width) / 100.0);
        tracing::debug!(percent, offset = self.offset, "scrolled to percent");
    }

    /// Schedules [`ScrollState::scroll_to_percent`] to run once `delay_ms` of ticks have passed.
    pub fn schedule_scroll_to_percent(&mut self, percent: f64, delay_ms: f64) {
        self.pending = Some(PendingJump {
            percent,
            remaining_ms: delay_ms.max(0.0),
        });
    }

    /// Current offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current fling velocity in px/ms.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// `(lower, upper)` offset bounds.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    /// Returns `true` while a fling is running.
    pub fn is_flinging(&self) -> bool {
        self.velocity != 0.0
    }

    fn clamp(&self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.clamp(self.lower_bound, self.upper_bound)
        } else {
            self.upper_bound
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn drag_clamps_to_bounds() {
        let mut s = ScrollState::new();
        s.set_extent(1000.0, 300.0);
        assert_eq!(s.bounds(), (-700.0, 0.0));

        s.drag_start(0.0, 500.0);
        s.drag_by(16.0, -2000.0);
        assert_eq!(s.offset(), -700.0);
        s.drag_by(32.0, 5000.0);
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn narrow_content_does_not_scroll() {
        let mut s = ScrollState::new();
        s.set_extent(200.0, 300.0);
        assert!(!s.is_scrollable());
        s.drag_start(0.0, 0.0);
        s.drag_by(16.0, -50.0);
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn velocity_is_least_squares_over_recent_window() {
        let mut t = VelocityTracker::new();
        t.add(0.0, 0.0);
        // Far outside the 100ms window of the last sample.
        t.add(500.0, 1000.0);
        t.add(510.0, 1010.0);
        t.add(520.0, 1020.0);
        assert!((t.velocity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fling_decays_and_stops() {
        let mut s = ScrollState::new();
        s.set_extent(10_000.0, 300.0);
        s.drag_start(0.0, 300.0);
        for i in 1..=5 {
            s.drag_by(f64::from(i) * 10.0, -10.0);
        }
        s.drag_end(50.0);
        assert!(s.is_flinging());
        assert!(s.velocity() < 0.0);

        let mut frames = 0;
        while s.tick(16.0) {
            frames += 1;
            assert!(frames < 1000, "fling never settled");
        }
        assert!(s.offset() < -50.0);
        assert_eq!(s.velocity(), 0.0);
    }

    #[test]
    fn fling_stops_hard_at_bound() {
        let mut s = ScrollState::new();
        s.set_extent(1000.0, 300.0);
        s.drag_start(0.0, 0.0);
        s.drag_by(10.0, -50.0);
        s.drag_by(20.0, -50.0);
        s.drag_end(20.0);
        while s.tick(16.0) {}
        assert_eq!(s.offset(), -700.0);
    }

    #[test]
    fn scroll_to_percent_uses_content_width() {
        let mut s = ScrollState::new();
        s.set_extent(1000.0, 300.0);
        s.scroll_to_percent(50.0);
        assert_eq!(s.offset(), -500.0);
        s.scroll_to_percent(100.0);
        assert_eq!(s.offset(), -700.0);
    }

    #[test]
    fn scheduled_jump_waits_for_delay() {
        let mut s = ScrollState::new();
        s.set_extent(1000.0, 300.0);
        s.schedule_scroll_to_percent(20.0, 100.0);
        assert!(s.tick(60.0));
        assert_eq!(s.offset(), 0.0);
        assert!(!s.tick(60.0));
        assert_eq!(s.offset(), -200.0);
    }
}

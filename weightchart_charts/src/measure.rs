// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for the layout pass.
//!
//! Shaping stays downstream, so the layout engine asks a measurer for label extents before any
//! marks are generated.

/// A minimal text measurement interface used by the layout engine.
///
/// Axis label columns, the rotated-label bottom margin and the pie meter labels are all sized
/// through this trait. Hosts with a real text stack plug it in here; demos can use
/// [`HeuristicTextMeasurer`].
pub trait TextMeasurer {
    /// Returns `(width, height)` in the same coordinate system as the marks.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A tiny heuristic text measurer suitable for demos and tests.
///
/// It assumes an average glyph width of ~0.6em and a line height of 1.2em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, 1.2 * font_size)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        (**self).measure(text, font_size)
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bars and lines sharing one canvas and one value axis.
//!
//! A new bar snapshot is not drawn straight away. It is held as pending with every grow-in
//! snapped to 0, and the next [`CombinedChart::tick`] commits it and starts the grow-in. Nothing
//! is drawn while a snapshot is pending, so lines never appear over bars from the previous
//! snapshot.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;
use weightchart_core::Mark;

use crate::animation::LabelAnimations;
use crate::axis;
use crate::bar_chart::{BarPlot, bar_group_marks, group_size, value_label_headroom};
use crate::dataset::DatasetHolder;
use crate::layout::{CartesianLayoutSpec, ChartLayout, bar_content_width, line_content_width};
use crate::line_chart::{LinePlot, line_series_marks, longest_labels};
use crate::measure::TextMeasurer;
use crate::model::{BarGroup, LineSeries, max_stack_total, same_bar_values};
use crate::scale::{ScaleModel, compute_scale};
use crate::scroll::ScrollState;
use crate::style::CombinedChartStyle;

/// An animated, scrollable chart of bar groups overlaid with line series.
#[derive(Debug)]
pub struct CombinedChart {
    ns: u32,
    style: CombinedChartStyle,
    bars: Vec<BarGroup>,
    pending: Option<Vec<BarGroup>>,
    lines: DatasetHolder<LineSeries>,
    anims: LabelAnimations,
    scroll: ScrollState,
}

impl CombinedChart {
    /// Creates an empty chart whose marks live in namespace `ns`.
    pub fn new(ns: u32, style: CombinedChartStyle) -> Self {
        Self {
            ns,
            anims: LabelAnimations::new(style.animation),
            lines: DatasetHolder::new(style.animation),
            style,
            bars: Vec::new(),
            pending: None,
            scroll: ScrollState::new(),
        }
    }

    /// Current style.
    pub fn style(&self) -> &CombinedChartStyle {
        &self.style
    }

    /// Latest bar snapshot, pending or committed.
    fn latest_bars(&self) -> &[BarGroup] {
        self.pending.as_deref().unwrap_or(&self.bars)
    }

    /// Pushes new bar and line snapshots. Returns `true` if anything will animate.
    ///
    /// Bars whose values changed become pending until the next tick. Lines go through the
    /// usual enter/exit reconciliation.
    pub fn set_data(&mut self, bars: &[BarGroup], lines: &[LineSeries]) -> bool {
        let lines_changed = self.lines.set_target(lines);
        let bars_changed = !same_bar_values(self.latest_bars(), bars);
        if bars_changed {
            tracing::debug!(groups = bars.len(), "bar snapshot pending");
            let labels = label_list(bars, lines);
            self.anims.reset(labels.iter().map(String::as_str));
            self.pending = Some(bars.to_vec());
        } else if let Some(pending) = &mut self.pending {
            *pending = bars.to_vec();
        } else {
            self.bars = bars.to_vec();
        }
        bars_changed || lines_changed
    }

    /// Returns `true` while a bar snapshot waits for the next tick.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Committed bar groups.
    pub fn bars(&self) -> &[BarGroup] {
        &self.bars
    }

    /// Advances animations and scrolling by one frame. Returns `true` while another frame is
    /// needed.
    ///
    /// A pending bar snapshot is committed instead of advancing the grow-in; the grow-in starts
    /// from 0 on the following tick.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let mut grow = if let Some(pending) = self.pending.take() {
            tracing::debug!(groups = pending.len(), "bar data committed");
            self.bars = pending;
            self.anims.start();
            true
        } else {
            self.anims.tick(dt_ms)
        };
        let lines = self.lines.tick(dt_ms);
        let scroll = self.scroll.tick(dt_ms);
        grow |= self.anims.is_running();
        tracing::trace!(dt_ms, grow, lines, scroll, "combined chart tick");
        grow || lines || scroll
    }

    /// Grow-in progress of the bar group labelled `label` (1 for labels without an animation).
    pub fn bar_progress(&self, label: &str) -> f64 {
        self.anims.progress(label).unwrap_or(1.0)
    }

    /// Progress of `series` if it is on screen.
    pub fn line_progress(&self, series: &LineSeries) -> Option<f64> {
        self.lines.progress_of(series)
    }

    /// Scroll state, for feeding drag input.
    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Scroll state.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Shared value axis: 0 up to the larger of the largest stack total and the largest line
    /// value. Lines still retracting count until they are dropped.
    pub fn scale(&self) -> ScaleModel {
        let line_max = self.lines.value_range().map_or(0.0, |(_, hi)| hi.max(0.0));
        let max = max_stack_total(self.latest_bars()).max(line_max);
        compute_scale(0.0, max, None)
    }

    fn step(&self) -> f64 {
        self.style.bar_size.bar_width + self.style.data_spacing
    }

    fn x_labels(&self) -> Vec<String> {
        let bars: Vec<String> = self.latest_bars().iter().map(|g| g.label.clone()).collect();
        let lines = longest_labels(self.lines.render_set());
        if bars.len() < lines.len() { lines } else { bars }
    }

    fn arrange(
        &self,
        viewport: Size,
        measurer: &dyn TextMeasurer,
    ) -> (ChartLayout, ScaleModel, Vec<String>) {
        let scale = self.scale();
        let x_labels = self.x_labels();
        let y_labels = scale.bar_axis_labels();
        let spec = CartesianLayoutSpec {
            viewport,
            x_labels: &x_labels,
            y_labels: &y_labels,
            labels: &self.style.labels,
            orientation: self.style.orientation,
            slot_width: self.step(),
            step: self.step(),
            bar_width: self.style.bar_size.bar_width,
            y_label_width: self.style.y_label_width,
            padding: self.style.padding,
            top_padding: value_label_headroom(self.style.value_label.as_ref(), measurer),
        };
        (ChartLayout::arrange(&spec, measurer), scale, x_labels)
    }

    /// Scrollable content width: the wider of the bar and line content.
    pub fn content_width(&self) -> f64 {
        let step = self.step();
        let points = longest_labels(self.lines.target()).len();
        bar_content_width(self.latest_bars().len(), step).max(line_content_width(
            points,
            step,
            self.style.data_spacing,
        ))
    }

    /// Arranges the chart in `viewport` and updates the scroll extent.
    pub fn set_viewport(&mut self, viewport: Size, measurer: &dyn TextMeasurer) {
        let (layout, _, _) = self.arrange(viewport, measurer);
        let content = self.content_width();
        self.scroll.set_extent(content, layout.content_viewport());
    }

    /// Marks for the current frame. Empty while a bar snapshot is pending.
    pub fn marks(&self, viewport: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::new();
        if self.pending.is_some() || (self.bars.is_empty() && self.lines.is_empty()) {
            return out;
        }
        let (layout, scale, x_labels) = self.arrange(viewport, measurer);
        let offset = self.scroll.offset();

        out.extend(axis::background_mark(self.ns, &layout, &self.style.background));
        out.extend(axis::grid_line_marks(
            self.ns,
            &layout,
            scale.tick_count,
            &self.style.background,
        ));

        let bars = BarPlot {
            ns: self.ns,
            scale: &scale,
            plot: layout.plot,
            bar_size: self.style.bar_size,
            data_spacing: self.style.data_spacing,
            scroll_offset: offset,
            group_size: group_size(&self.bars),
            value_label: self.style.value_label.as_ref(),
        };
        for (i, group) in self.bars.iter().enumerate() {
            let x = bars.group_x(i);
            if x + self.style.bar_size.bar_width < layout.clip.x0 || x > layout.clip.x1 {
                continue;
            }
            out.extend(bar_group_marks(
                &bars,
                i,
                group,
                self.anims.progress(&group.label).unwrap_or(0.0),
            ));
        }

        let lines = LinePlot {
            ns: self.ns,
            scale: &scale,
            plot: layout.plot,
            spacing: self.step(),
            start_offset: self.style.bar_size.bar_width * 0.5,
            scroll_offset: offset,
            line_width: self.style.line_width,
            line_style: self.style.line_style,
            point_style: self.style.point_style.as_ref(),
            gradient: self.style.gradient.as_ref(),
            background: self.style.background.background_color,
        };
        for (key, (series, progress, _)) in self.lines.entries().enumerate() {
            if series.points.is_empty() {
                continue;
            }
            out.extend(line_series_marks(&lines, key, series, progress));
        }

        out.extend(axis::y_label_marks(
            self.ns,
            &layout,
            &scale.bar_axis_labels(),
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

impl Default for CombinedChart {
    fn default() -> Self {
        Self::new(0, CombinedChartStyle::default())
    }
}

/// Labels the grow-in animations are keyed by: bar labels, or the longest line's labels when
/// there are no bars.
fn label_list(bars: &[BarGroup], lines: &[LineSeries]) -> Vec<String> {
    if bars.is_empty() {
        longest_labels(lines)
    } else {
        bars.iter().map(|g| g.label.clone()).collect()
    }
}

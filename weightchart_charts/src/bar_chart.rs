// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped, stacked bar chart.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use weightchart_core::{Mark, RectChannels, TextAnchor, TextBaseline, TextChannels};

use crate::animation::LabelAnimations;
use crate::axis;
use crate::format::format_whole;
use crate::ids::{key3, layer, mark_id};
use crate::layout::{CartesianLayoutSpec, ChartLayout, bar_content_width};
use crate::measure::TextMeasurer;
use crate::model::{BarGroup, finite, max_stack_total, same_bar_values, stack_total};
use crate::scale::{ScaleModel, compute_scale};
use crate::scroll::ScrollState;
use crate::style::{BAR_TOP_SPACING, BarChartStyle, BarSize, TextStyle};
use crate::z_order;

/// Shared geometry for drawing bar groups onto one plot.
#[derive(Clone, Copy, Debug)]
pub struct BarPlot<'a> {
    /// Chart namespace for mark ids.
    pub ns: u32,
    /// Value axis; bars grow from 0.
    pub scale: &'a ScaleModel,
    /// Canvas rectangle in viewport coordinates.
    pub plot: Rect,
    /// Bar geometry.
    pub bar_size: BarSize,
    /// Gap between groups.
    pub data_spacing: f64,
    /// Current scroll offset (`<= 0`).
    pub scroll_offset: f64,
    /// Largest number of side-by-side bars in any group.
    pub group_size: usize,
    /// Total label style; `None` hides totals.
    pub value_label: Option<&'a TextStyle>,
}

impl BarPlot<'_> {
    /// Width of one bar when `group_size` bars share a group.
    pub fn bar_width(&self) -> f64 {
        let g = self.group_size.max(1) as f64;
        (self.bar_size.bar_width - (g - 1.0) * self.bar_size.group_spacing) / g
    }

    /// Left edge of group `index`.
    pub fn group_x(&self, index: usize) -> f64 {
        self.plot.x0
            + index as f64 * (self.data_spacing + self.bar_size.bar_width)
            + self.scroll_offset
    }
}

/// Marks for bar group `index` at grow-in `progress`.
///
/// Bars sit side by side; each stack grows bottom-up. Every segment after the first starts
/// `stack_spacing` above the previous top, and segments of multi-segment stacks give up half a
/// stack spacing of height. A total (or the group's `top_label`) is drawn above the bar only
/// when groups hold a single bar.
pub fn bar_group_marks(
    ctx: &BarPlot<'_>,
    index: usize,
    group: &BarGroup,
    progress: f64,
) -> Vec<Mark> {
    let mut out = Vec::new();
    let progress = progress.clamp(0.0, 1.0);
    let height = ctx.plot.height();
    let bottom = ctx.plot.y1;
    let bar = ctx.bar_width();
    let gs = ctx.bar_size.group_spacing;
    let ss = ctx.bar_size.stack_spacing;

    let mut x = ctx.group_x(index) - gs - bar;
    for (bar_index, stack) in group.stacks.iter().enumerate() {
        x += gs + bar;
        let mut y = bottom;
        let shrink = if stack.len() > 1 { ss * 0.5 } else { 0.0 };
        for (seg, value) in stack.iter().enumerate() {
            let start = if seg == 0 { y } else { y - ss };
            let seg_height =
                (ctx.scale.span_to_px(finite(value.value), height) - shrink) * progress;
            y -= seg_height;
            out.push(
                Mark::rect(
                    mark_id(ctx.ns, layer::BAR, key3(index, bar_index, seg)),
                    RectChannels {
                        rect: Rect::new(x, y.min(start), x + bar, y.max(start)),
                        fill: value.color.into(),
                    },
                )
                .with_z_index(z_order::SERIES_FILL),
            );
        }

        if ctx.group_size == 1
            && let Some(style) = ctx.value_label
        {
            let text: String = group
                .top_label
                .clone()
                .unwrap_or_else(|| format_whole(stack_total(stack)));
            let color = stack.last().map_or(style.color, |v| v.color);
            out.push(
                Mark::text(
                    mark_id(ctx.ns, layer::BAR_LABEL, key3(index, bar_index, 0)),
                    TextChannels {
                        pos: (x + bar * 0.5, y - BAR_TOP_SPACING).into(),
                        text,
                        font_size: style.font_size,
                        anchor: TextAnchor::Middle,
                        baseline: TextBaseline::Alphabetic,
                        fill: color.into(),
                        ..TextChannels::default()
                    },
                )
                .with_z_index(z_order::VALUE_LABELS),
            );
        }
    }
    out
}

/// Largest number of side-by-side bars in any group.
pub(crate) fn group_size(groups: &[BarGroup]) -> usize {
    groups.iter().map(|g| g.stacks.len()).max().unwrap_or(0)
}

/// Default font size for bar totals when none is configured.
const DEFAULT_VALUE_FONT: f64 = 16.0;

/// Headroom above bars: the cap height of the value label font.
pub(crate) fn value_label_headroom(
    value_label: Option<&TextStyle>,
    measurer: &dyn TextMeasurer,
) -> f64 {
    let size = value_label.map_or(DEFAULT_VALUE_FONT, |s| s.font_size);
    measurer.measure("I", size).1
}

/// An animated, scrollable bar chart.
///
/// Whenever the segment values change, every x label's grow-in restarts from 0.
#[derive(Debug)]
pub struct BarChart {
    ns: u32,
    style: BarChartStyle,
    data: Vec<BarGroup>,
    anims: LabelAnimations,
    scroll: ScrollState,
}

impl BarChart {
    /// Creates an empty chart whose marks live in namespace `ns`.
    pub fn new(ns: u32, style: BarChartStyle) -> Self {
        Self {
            ns,
            anims: LabelAnimations::new(style.animation),
            style,
            data: Vec::new(),
            scroll: ScrollState::new(),
        }
    }

    /// Current style.
    pub fn style(&self) -> &BarChartStyle {
        &self.style
    }

    /// Pushes a new snapshot. Returns `true` if the bars regrow.
    ///
    /// Snapshots whose values match the current ones (colours and labels aside) only replace the
    /// stored data.
    pub fn set_data(&mut self, groups: &[BarGroup]) -> bool {
        let changed = !same_bar_values(&self.data, groups);
        self.data = groups.to_vec();
        if changed {
            tracing::debug!(groups = groups.len(), "bar data changed, regrowing");
            self.anims.restart(self.data.iter().map(|g| g.label.as_str()));
        }
        changed
    }

    /// Current data.
    pub fn data(&self) -> &[BarGroup] {
        &self.data
    }

    /// Advances animations and scrolling by one frame. Returns `true` while another frame is
    /// needed.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let grow = self.anims.tick(dt_ms);
        let scroll = self.scroll.tick(dt_ms);
        tracing::trace!(dt_ms, grow, scroll, "bar chart tick");
        grow || scroll
    }

    /// Grow-in progress of the group labelled `label` (1 for labels without an animation).
    pub fn progress(&self, label: &str) -> f64 {
        self.anims.progress(label).unwrap_or(1.0)
    }

    /// Scroll state, for feeding drag input.
    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Scroll state.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Value axis: 0 up to the largest stack total.
    pub fn scale(&self) -> ScaleModel {
        compute_scale(0.0, max_stack_total(&self.data), None)
    }

    fn step(&self) -> f64 {
        self.style.bar_size.bar_width + self.style.data_spacing
    }

    fn arrange(
        &self,
        viewport: Size,
        measurer: &dyn TextMeasurer,
    ) -> (ChartLayout, ScaleModel, Vec<String>) {
        let scale = self.scale();
        let x_labels: Vec<String> = self.data.iter().map(|g| g.label.clone()).collect();
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

    /// Arranges the chart in `viewport` and updates the scroll extent.
    pub fn set_viewport(&mut self, viewport: Size, measurer: &dyn TextMeasurer) {
        let (layout, _, _) = self.arrange(viewport, measurer);
        let content = bar_content_width(self.data.len(), self.step());
        self.scroll.set_extent(content, layout.content_viewport());
    }

    /// Marks for the current frame.
    pub fn marks(&self, viewport: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::new();
        if self.data.is_empty() {
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

        let ctx = BarPlot {
            ns: self.ns,
            scale: &scale,
            plot: layout.plot,
            bar_size: self.style.bar_size,
            data_spacing: self.style.data_spacing,
            scroll_offset: offset,
            group_size: group_size(&self.data),
            value_label: self.style.value_label.as_ref(),
        };
        for (i, group) in self.data.iter().enumerate() {
            let x = ctx.group_x(i);
            if x + self.style.bar_size.bar_width < layout.clip.x0 || x > layout.clip.x1 {
                continue;
            }
            out.extend(bar_group_marks(&ctx, i, group, self.progress(&group.label)));
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

impl Default for BarChart {
    fn default() -> Self {
        Self::new(0, BarChartStyle::default())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::Brush;
    use peniko::color::palette::css;
    use weightchart_core::MarkPayload;

    use super::*;
    use crate::animation::{AnimationSpec, Easing};
    use crate::model::BarValue;

    fn rects(marks: &[Mark]) -> Vec<Rect> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Rect(r) => Some(r.rect),
                _ => None,
            })
            .collect()
    }

    fn ctx<'a>(scale: &'a ScaleModel, group_size: usize, label: Option<&'a TextStyle>) -> BarPlot<'a> {
        BarPlot {
            ns: 2,
            scale,
            plot: Rect::new(0.0, 0.0, 300.0, 100.0),
            bar_size: BarSize::default(),
            data_spacing: 24.0,
            scroll_offset: 0.0,
            group_size,
            value_label: label,
        }
    }

    #[test]
    fn single_bar_height_is_proportional() {
        let scale = compute_scale(0.0, 50.0, None);
        assert_eq!(scale.max_value, 50.0);
        let group = BarGroup::single("Mon", 25.0, css::TEAL);
        let r = rects(&bar_group_marks(&ctx(&scale, 1, None), 1, &group, 1.0));
        assert_eq!(r, vec![Rect::new(40.0, 50.0, 56.0, 100.0)]);

        let half = rects(&bar_group_marks(&ctx(&scale, 1, None), 1, &group, 0.5));
        assert_eq!(half[0].height(), 25.0);
    }

    #[test]
    fn stacks_grow_bottom_up_with_gaps() {
        let scale = compute_scale(0.0, 50.0, None);
        let group = BarGroup::stacked(
            "Mon",
            vec![vec![BarValue::new(20.0, css::RED), BarValue::new(10.0, css::BLUE)]],
        );
        let r = rects(&bar_group_marks(&ctx(&scale, 1, None), 0, &group, 1.0));
        // 20 -> 40px less half a 2px spacing; 10 -> 20px less 1px, starting 2px higher.
        assert_eq!(r[0].y1, 100.0);
        assert_eq!(r[0].y0, 61.0);
        assert_eq!(r[1].y1, 59.0);
        assert_eq!(r[1].y0, 42.0);
    }

    #[test]
    fn side_by_side_bars_split_the_width_and_hide_totals() {
        let scale = compute_scale(0.0, 50.0, None);
        let label = TextStyle::default();
        let group = BarGroup::stacked(
            "Mon",
            vec![
                vec![BarValue::new(20.0, css::RED)],
                vec![BarValue::new(30.0, css::BLUE)],
            ],
        );
        let marks = bar_group_marks(&ctx(&scale, 2, Some(&label)), 0, &group, 1.0);
        let r = rects(&marks);
        assert_eq!(r[0].x0, 0.0);
        assert_eq!(r[0].width(), 7.0);
        assert_eq!(r[1].x0, 9.0);
        assert!(marks.iter().all(|m| m.z_index != z_order::VALUE_LABELS));
    }

    #[test]
    fn total_label_sits_above_the_bar() {
        let scale = compute_scale(0.0, 50.0, None);
        let label = TextStyle::default();
        let group = BarGroup::stacked(
            "Mon",
            vec![vec![BarValue::new(20.5, css::RED), BarValue::new(10.0, css::BLUE)]],
        );
        let marks = bar_group_marks(&ctx(&scale, 1, Some(&label)), 0, &group, 1.0);
        let text = marks
            .iter()
            .find_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.clone()),
                _ => None,
            })
            .unwrap_or_else(|| panic!("missing total"));
        assert_eq!(text.text, "30");
        assert_eq!(text.fill, Brush::from(css::BLUE));
        let top = rects(&marks)[1].y0;
        assert_eq!(text.pos.y, top - BAR_TOP_SPACING);

        let custom = group.with_top_label("goal");
        let marks = bar_group_marks(&ctx(&scale, 1, Some(&label)), 0, &custom, 1.0);
        assert!(marks.iter().any(|m| matches!(&m.payload, MarkPayload::Text(t) if t.text == "goal")));
    }

    #[test]
    fn value_change_restarts_growth() {
        let style = BarChartStyle::default()
            .with_animation(AnimationSpec::new(100.0, Easing::Linear));
        let mut chart = BarChart::new(2, style);
        let week = [BarGroup::single("Mon", 3.0, css::RED), BarGroup::single("Tue", 5.0, css::RED)];
        assert!(chart.set_data(&week));
        chart.tick(100.0);
        assert_eq!(chart.progress("Mon"), 1.0);

        // Same values, new colours: no regrow.
        let recoloured = [BarGroup::single("Mon", 3.0, css::BLUE), BarGroup::single("Tue", 5.0, css::BLUE)];
        assert!(!chart.set_data(&recoloured));
        assert_eq!(chart.progress("Tue"), 1.0);

        let changed = [BarGroup::single("Mon", 4.0, css::RED), BarGroup::single("Tue", 5.0, css::RED)];
        assert!(chart.set_data(&changed));
        assert_eq!(chart.progress("Mon"), 0.0);
        assert_eq!(chart.progress("Tue"), 0.0);
        assert!(chart.tick(50.0));
        assert_eq!(chart.progress("Tue"), 0.5);
    }

    #[test]
    fn bar_scale_starts_at_zero() {
        let mut chart = BarChart::default();
        chart.set_data(&[BarGroup::single("Mon", 58.0, css::RED)]);
        let scale = chart.scale();
        assert_eq!(scale.min_value, 0.0);
        assert_eq!(scale.max_value, 60.0);
    }
}

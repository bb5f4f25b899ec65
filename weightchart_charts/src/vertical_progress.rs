// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Columns that fill from the bottom up to a percentage.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
use weightchart_core::{
    LineCap, Mark, MarkId, PathChannels, StrokeStyle, TextAnchor, TextBaseline, TextChannels,
};

use crate::animation::Tween;
use crate::format::format_tick_value;
use crate::ids::{key3, layer, mark_id};
use crate::measure::TextMeasurer;
use crate::model::VerticalProgressItem;
use crate::scroll::ScrollState;
use crate::style::{TextStyle, VerticalProgressStyle};
use crate::z_order;

/// Shared geometry for drawing progress columns.
#[derive(Clone, Copy, Debug)]
pub struct ProgressColumns {
    /// Chart namespace for mark ids.
    pub ns: u32,
    /// Area the column tracks span, in viewport coordinates.
    pub canvas: Rect,
    /// Horizontal slot per column.
    pub spacing: f64,
    /// Column stroke width.
    pub bar_width: f64,
    /// Current scroll offset (`<= 0`).
    pub scroll_offset: f64,
}

impl ProgressColumns {
    /// Horizontal centre of column `index`.
    pub fn column_x(&self, index: usize) -> f64 {
        self.canvas.x0 + index as f64 * self.spacing + self.spacing * 0.5 + self.scroll_offset
    }
}

fn column_stroke(id: MarkId, from: Point, to: Point, color: Color, width: f64, z: i32) -> Mark {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    Mark::path(
        id,
        PathChannels::stroked(
            path,
            StrokeStyle::solid(color, width).with_cap(LineCap::Round),
        ),
    )
    .with_z_index(z)
}

/// Track and fill of column `index`, filled to `percent`.
///
/// Both are round-capped strokes of the bar width, so they start half a bar width inside the
/// canvas. The fill runs up from the track's bottom end by `(height - bar_width) * percent / 100`.
pub fn vertical_progress_marks(
    ctx: &ProgressColumns,
    index: usize,
    item: &VerticalProgressItem,
    percent: f64,
) -> Vec<Mark> {
    let x = ctx.column_x(index);
    let half = ctx.bar_width * 0.5;
    let bottom = ctx.canvas.y1 - half;
    let top = ctx.canvas.y0 + half;
    let fill = (ctx.canvas.height() - ctx.bar_width).max(0.0) * percent.clamp(0.0, 100.0) / 100.0;
    alloc::vec![
        column_stroke(
            mark_id(ctx.ns, layer::PROGRESS, key3(index, 0, 0)),
            Point::new(x, bottom),
            Point::new(x, top),
            item.background_color,
            ctx.bar_width,
            z_order::SERIES_UNDERLAY,
        ),
        column_stroke(
            mark_id(ctx.ns, layer::PROGRESS, key3(index, 1, 0)),
            Point::new(x, bottom),
            Point::new(x, bottom - fill),
            item.color,
            ctx.bar_width,
            z_order::SERIES_FILL,
        ),
    ]
}

/// Text drawn above a column, if any.
pub fn top_label(item: &VerticalProgressItem) -> Option<String> {
    if item.show_value_on_top {
        Some(alloc::format!("{}%", format_tick_value(item.fill_percent)))
    } else {
        item.top_label.clone()
    }
}

fn row_height(
    texts: impl Iterator<Item = String>,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> f64 {
    texts
        .map(|t| measurer.measure(&t, style.font_size).1)
        .fold(0.0, f64::max)
}

/// A row of animated vertical progress columns with top and bottom labels.
///
/// Each column fills from 0 the first time it is seen; columns that survive a data update keep
/// their current fill.
#[derive(Debug)]
pub struct VerticalProgressChart {
    ns: u32,
    style: VerticalProgressStyle,
    items: Vec<(VerticalProgressItem, Tween)>,
    scroll: ScrollState,
}

impl VerticalProgressChart {
    /// Creates an empty chart whose marks live in namespace `ns`.
    pub fn new(ns: u32, style: VerticalProgressStyle) -> Self {
        Self {
            ns,
            style,
            items: Vec::new(),
            scroll: ScrollState::new(),
        }
    }

    /// Current style.
    pub fn style(&self) -> &VerticalProgressStyle {
        &self.style
    }

    /// Pushes new columns. Returns `true` if any column starts filling.
    pub fn set_data(&mut self, items: &[VerticalProgressItem]) -> bool {
        let mut previous = core::mem::take(&mut self.items);
        let mut started = 0_usize;
        for item in items {
            let tween = match previous.iter().position(|(old, _)| old == item) {
                Some(i) => previous.swap_remove(i).1,
                None => {
                    let mut tween = Tween::new(0.0, self.style.animation);
                    tween.animate_to(item.clamped_percent());
                    started += 1;
                    tween
                }
            };
            self.items.push((item.clone(), tween));
        }
        if started > 0 {
            tracing::debug!(started, columns = items.len(), "progress columns filling");
        }
        started > 0
    }

    /// Current columns.
    pub fn items(&self) -> impl Iterator<Item = &VerticalProgressItem> + '_ {
        self.items.iter().map(|(item, _)| item)
    }

    /// Animated fill of column `index`, in percent.
    pub fn fill_of(&self, index: usize) -> Option<f64> {
        self.items.get(index).map(|(_, t)| t.value())
    }

    /// Advances every fill and the scroll state. Returns `true` while another frame is needed.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let mut fill = false;
        for (_, tween) in &mut self.items {
            fill |= tween.tick(dt_ms);
        }
        let scroll = self.scroll.tick(dt_ms);
        tracing::trace!(dt_ms, fill, scroll, "vertical progress tick");
        fill || scroll
    }

    /// Scroll state, for feeding drag input.
    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Scrollable content width: one slot per column.
    pub fn content_width(&self) -> f64 {
        self.items.len() as f64 * self.style.data_spacing
    }

    /// Updates the scroll extent for `viewport`.
    pub fn set_viewport(&mut self, viewport: Size) {
        let content = self.content_width();
        self.scroll.set_extent(content, viewport.width);
    }

    /// Marks for the current frame.
    pub fn marks(&self, viewport: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::new();
        if self.items.is_empty() {
            return out;
        }
        let labels = &self.style.labels;
        let top_row = if labels.show_data_labels {
            row_height(self.items().filter_map(top_label), &labels.data, measurer)
        } else {
            0.0
        };
        let bottom_row = if labels.show_bottom_labels {
            row_height(
                self.items().map(|i| i.bottom_label.clone()),
                &labels.bottom,
                measurer,
            )
        } else {
            0.0
        };

        let size = self.style.bar_size;
        let canvas = Rect::new(
            0.0,
            top_row + size.top_spacing,
            viewport.width.max(0.0),
            (viewport.height - bottom_row - size.bottom_spacing).max(top_row + size.top_spacing),
        );
        let ctx = ProgressColumns {
            ns: self.ns,
            canvas,
            spacing: self.style.data_spacing,
            bar_width: size.bar_width,
            scroll_offset: self.scroll.offset(),
        };

        let mut push_label = |id, x: f64, y: f64, text: String, style: &TextStyle| {
            out.push(
                Mark::text(
                    id,
                    TextChannels {
                        pos: (x, y).into(),
                        text,
                        font_size: style.font_size,
                        anchor: TextAnchor::Middle,
                        baseline: TextBaseline::Middle,
                        fill: style.color.into(),
                        ..TextChannels::default()
                    },
                )
                .with_z_index(z_order::AXIS_LABELS),
            );
        };
        let mut columns = Vec::new();
        for (i, (item, tween)) in self.items.iter().enumerate() {
            let x = ctx.column_x(i);
            let half_slot = ctx.spacing * 0.5;
            if x + half_slot < 0.0 || x - half_slot > canvas.x1 {
                continue;
            }
            columns.extend(vertical_progress_marks(&ctx, i, item, tween.value()));
            if labels.show_data_labels
                && let Some(text) = top_label(item)
            {
                push_label(
                    mark_id(self.ns, layer::TOP_LABEL, i as u64),
                    x,
                    top_row * 0.5,
                    text,
                    &labels.data,
                );
            }
            if labels.show_bottom_labels {
                push_label(
                    mark_id(self.ns, layer::X_LABEL, i as u64),
                    x,
                    viewport.height - bottom_row * 0.5,
                    item.bottom_label.clone(),
                    &labels.bottom,
                );
            }
        }
        out.extend(columns);
        out
    }
}

impl Default for VerticalProgressChart {
    fn default() -> Self {
        Self::new(0, VerticalProgressStyle::default())
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis label and gridline marks for the cartesian charts.
//!
//! Positions come from an arranged [`ChartLayout`]; these helpers only turn them into marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::BezPath;
use weightchart_core::{
    Mark, PathChannels, RectChannels, StrokeStyle, TextAnchor, TextBaseline, TextChannels,
};

use crate::ids::{layer, mark_id};
use crate::layout::ChartLayout;
use crate::model::XLabelOrientation;
use crate::style::{BackgroundStyle, LabelStyle};
use crate::z_order;

/// Fill behind the whole chart; `None` when the background is fully transparent.
pub fn background_mark(ns: u32, layout: &ChartLayout, style: &BackgroundStyle) -> Option<Mark> {
    if style.background_color.components[3] <= 0.0 {
        return None;
    }
    Some(
        Mark::rect(
            mark_id(ns, layer::BACKGROUND, 0),
            RectChannels {
                rect: layout.view,
                fill: style.background_color.into(),
            },
        )
        .with_z_index(z_order::GRID_LINES - 1),
    )
}

/// Horizontal gridlines every `plot height / tick_count`, plus one on the plot bottom.
///
/// Empty unless `style.draw_bg_lines` is set.
pub fn grid_line_marks(
    ns: u32,
    layout: &ChartLayout,
    tick_count: usize,
    style: &BackgroundStyle,
) -> Vec<Mark> {
    let mut out = Vec::new();
    if !style.draw_bg_lines {
        return out;
    }
    let grid = layout.grid;
    let height = grid.height();
    let mut stroke =
        StrokeStyle::solid(style.line_color, style.line_width).with_cap(style.cap);
    if let Some(dash) = &style.dash {
        stroke = stroke.with_dash(dash.clone());
    }
    let mut push = |key: u64, y: f64| {
        let mut path = BezPath::new();
        path.move_to((grid.x0, grid.y0 + y));
        path.line_to((grid.x1, grid.y0 + y));
        out.push(
            Mark::path(
                mark_id(ns, layer::GRID, key),
                PathChannels::stroked(path, stroke.clone()),
            )
            .with_z_index(z_order::GRID_LINES),
        );
    };

    let count = tick_count.max(1);
    let spacing = height / count as f64;
    if spacing > 0.0 {
        for i in 0..=count {
            let y = spacing * i as f64;
            if y > height + 1e-9 {
                break;
            }
            push(i as u64, y);
        }
    }
    push(u64::MAX >> 16, height);
    out
}

/// Value-axis labels, right-aligned against the plot and centred on their rows.
pub fn y_label_marks(
    ns: u32,
    layout: &ChartLayout,
    labels: &[String],
    style: &LabelStyle,
) -> Vec<Mark> {
    if !style.show_data_labels {
        return Vec::new();
    }
    labels
        .iter()
        .zip(&layout.y_label_centers)
        .enumerate()
        .map(|(i, (text, &y))| {
            Mark::text(
                mark_id(ns, layer::Y_LABEL, i as u64),
                TextChannels {
                    pos: (layout.y_label_right, y).into(),
                    text: text.clone(),
                    font_size: style.data.font_size,
                    anchor: TextAnchor::End,
                    baseline: TextBaseline::Middle,
                    fill: style.data.color.into(),
                    ..TextChannels::default()
                },
            )
            .with_z_index(z_order::AXIS_LABELS)
        })
        .collect()
}

/// X-axis labels following the scroll `offset`; labels outside the clip region are skipped.
pub fn x_label_marks(
    ns: u32,
    layout: &ChartLayout,
    labels: &[String],
    style: &LabelStyle,
    orientation: XLabelOrientation,
    offset: f64,
) -> Vec<Mark> {
    if !style.show_bottom_labels {
        return Vec::new();
    }
    let angle = orientation.angle();
    let mut out = Vec::new();
    for (i, text) in labels.iter().enumerate() {
        let x = layout.x_label_center(i, offset);
        if !layout.is_slot_visible(x) {
            continue;
        }
        out.push(
            Mark::text(
                mark_id(ns, layer::X_LABEL, i as u64),
                TextChannels {
                    pos: (x, layout.x_label_center_y).into(),
                    text: text.clone(),
                    font_size: style.bottom.font_size,
                    angle,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Middle,
                    fill: style.bottom.color.into(),
                },
            )
            .with_z_index(z_order::AXIS_LABELS),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use kurbo::{Rect, Shape, Size};
    use weightchart_core::MarkPayload;

    use super::*;
    use crate::layout::CartesianLayoutSpec;
    use crate::measure::HeuristicTextMeasurer;
    use crate::style::ChartPadding;

    fn layout(labels: &LabelStyle, x: &[String], y: &[String]) -> ChartLayout {
        ChartLayout::arrange(
            &CartesianLayoutSpec {
                viewport: Size::new(200.0, 120.0),
                x_labels: x,
                y_labels: y,
                labels,
                orientation: XLabelOrientation::Straight,
                slot_width: 40.0,
                step: 40.0,
                bar_width: 0.0,
                y_label_width: 0.0,
                padding: ChartPadding::default(),
                top_padding: 0.0,
            },
            &HeuristicTextMeasurer,
        )
    }

    fn path_y(mark: &Mark) -> f64 {
        match &mark.payload {
            MarkPayload::Path(p) => p.path.bounding_box().y0,
            _ => panic!("expected a path mark"),
        }
    }

    #[test]
    fn gridlines_follow_tick_count() {
        let labels = LabelStyle::default();
        let l = layout(&labels, &[], &[]);
        let style = BackgroundStyle::default().with_bg_lines(true);
        let marks = grid_line_marks(1, &l, 4, &style);
        // Five tick rows plus the explicit bottom line.
        assert_eq!(marks.len(), 6);
        assert_eq!(path_y(&marks[0]), l.grid.y0);
        assert!((path_y(&marks[5]) - l.grid.y1).abs() < 1e-9);

        let off = grid_line_marks(1, &l, 4, &BackgroundStyle::default());
        assert!(off.is_empty());
    }

    #[test]
    fn x_labels_scroll_and_cull() {
        let labels = LabelStyle::default();
        let x: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let l = layout(&labels, &x, &[]);
        let marks = x_label_marks(1, &l, &x, &labels, XLabelOrientation::RightSlanted, -400.0);
        assert!(!marks.is_empty());
        assert!(marks.len() < 20);
        for m in &marks {
            let MarkPayload::Text(t) = &m.payload else {
                panic!("expected text");
            };
            assert_eq!(t.angle, 45.0);
            assert!(t.pos.x + 20.0 > l.clip.x0 && t.pos.x - 20.0 < l.clip.x1);
        }
    }

    #[test]
    fn transparent_background_emits_nothing() {
        let labels = LabelStyle::default();
        let l = layout(&labels, &[], &[]);
        assert!(background_mark(1, &l, &BackgroundStyle::default()).is_none());
        let filled = BackgroundStyle::default()
            .with_background_color(peniko::color::palette::css::WHITE);
        let mark = background_mark(1, &l, &filled);
        assert!(matches!(
            mark.map(|m| m.payload),
            Some(MarkPayload::Rect(RectChannels { rect, .. })) if rect == Rect::new(0.0, 0.0, 200.0, 120.0)
        ));
    }
}

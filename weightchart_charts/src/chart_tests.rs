// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Size};
use peniko::color::palette::css;
use weightchart_core::{Mark, MarkDiff, MarkPayload, Scene};

use crate::ids::{key3, layer, mark_id};
use crate::{
    AnimationSpec, BarChart, BarChartStyle, BarGroup, CircularChart, CircularChartStyle,
    CircularGeometry, CircularSlice, DataPoint, DatasetHolder, Easing, HeuristicTextMeasurer,
    LineChart, LineChartStyle, LineSeries, Phase, ScrollState, reconcile, slice_angles, z_order,
};

const VIEW: Size = Size::new(600.0, 300.0);

fn monthly(values: &[(f64, &str)]) -> LineSeries {
    LineSeries::new(
        css::TOMATO,
        values.iter().map(|(v, l)| DataPoint::new(*v, *l)).collect(),
    )
}

fn stroke_points(marks: &[Mark]) -> Vec<Point> {
    marks
        .iter()
        .find_map(|m| match &m.payload {
            MarkPayload::Path(p) if m.z_index == z_order::SERIES_STROKE => Some(
                p.path
                    .elements()
                    .iter()
                    .filter_map(|el| el.end_point())
                    .collect(),
            ),
            _ => None,
        })
        .unwrap_or_default()
}

#[test]
fn instant_line_chart_lands_on_scaled_values() {
    let style = LineChartStyle::default().with_animation(AnimationSpec::immediate());
    let mut chart = LineChart::new(1, style);
    let s = monthly(&[(10.0, "Jan"), (20.0, "Feb"), (15.0, "Mar")]);
    assert!(chart.set_data(&[s.clone()]));

    // No frame is needed to finish the entry.
    assert_eq!(chart.progress_of(&s), Some(1.0));
    assert!(!chart.tick(16.0));

    let scale = chart.scale().unwrap_or_else(|| panic!("scale"));
    assert_eq!((scale.min_value, scale.max_value), (10.0, 20.0));

    let pts = stroke_points(&chart.marks(VIEW, &HeuristicTextMeasurer));
    assert_eq!(pts.len(), 3);
    let (bottom, top) = (pts[0].y, pts[1].y);
    assert!(bottom > top, "larger values sit higher");
    let mid = (bottom - pts[2].y) / (bottom - top);
    assert!((mid - 0.5).abs() < 1e-9, "15 sits halfway between 10 and 20");
}

#[test]
fn slices_and_gaps_cover_the_sweep() {
    for (values, sweep, spacing) in [
        (vec![30.0, 50.0, 20.0], 360.0, 4.0),
        (vec![1.0, 1.0], 180.0, 10.0),
        (vec![5.0, 0.0, 7.0, 2.0], -270.0, -3.0),
        (vec![42.0], 360.0, 6.0),
    ] {
        let angles = slice_angles(&values, -90.0, sweep, spacing);
        let covered: f64 = angles.iter().map(|(_, s)| s).sum::<f64>()
            + spacing * (values.len() - 1) as f64;
        assert!((covered - sweep).abs() < 1e-9, "{values:?} covers {covered}");
        for pair in angles.windows(2) {
            let (start, sweep) = pair[0];
            assert!((pair[1].0 - (start + sweep + spacing)).abs() < 1e-9);
        }
    }
}

#[test]
fn clicks_on_a_drawn_pie_find_the_slice_under_the_pointer() {
    let style = CircularChartStyle::pie()
        .with_angles(0.0, 360.0)
        .with_line_width(20.0)
        .with_animation(AnimationSpec::immediate());
    let mut chart = CircularChart::new(4, style);
    chart.set_data(&[
        CircularSlice::new(25.0, css::RED),
        CircularSlice::new(75.0, css::BLUE),
    ]);
    while chart.tick(16.0) {}

    let view = Size::new(200.0, 200.0);
    let angles = chart.slice_angles(view);
    // Aim at the middle of slice 1, on the ring.
    let (start, sweep) = angles[1];
    let mid = (start + sweep / 2.0).to_radians();
    let geometry = CircularGeometry::arrange(view, chart.style());
    let pointer = Point::new(
        geometry.center.x + geometry.radius * mid.cos(),
        geometry.center.y + geometry.radius * mid.sin(),
    );
    assert_eq!(chart.click(pointer, view), Some(Some(1)));
    assert_eq!(chart.pressed(), Some(1));
    // The hole misses and clears.
    assert_eq!(chart.click(geometry.center, view), Some(None));
}

#[test]
fn scroll_offset_stays_inside_content() {
    let mut scroll = ScrollState::new();
    scroll.set_extent(1000.0, 300.0);
    assert_eq!(scroll.bounds(), (-700.0, 0.0));

    scroll.drag_start(0.0, 0.0);
    scroll.drag_by(16.0, 250.0);
    assert_eq!(scroll.offset(), 0.0);
    scroll.drag_by(32.0, -5000.0);
    assert_eq!(scroll.offset(), -700.0);
    scroll.drag_end(48.0);
    for _ in 0..200 {
        scroll.tick(16.0);
        let offset = scroll.offset();
        assert!((-700.0..=0.0).contains(&offset));
    }

    // Narrow content cannot scroll at all.
    scroll.set_extent(200.0, 300.0);
    assert_eq!(scroll.offset(), 0.0);
    scroll.drag_by(64.0, -50.0);
    assert_eq!(scroll.offset(), 0.0);
}

#[test]
fn reconciling_keeps_shared_items_in_place() {
    let previous = ["a", "b", "c"];
    let incoming = ["c", "d", "a"];
    let diff = reconcile(&previous, &incoming);
    assert_eq!(diff.render_set, vec!["a", "b", "c", "d"]);
    assert_eq!(diff.entering, vec![3]);
    assert_eq!(diff.exiting, vec![1]);

    let same = reconcile(&previous, &previous);
    assert!(same.is_unchanged());
    assert_eq!(same.render_set, previous.to_vec());
}

#[test]
fn replaced_series_retracts_then_disappears() {
    let spec = AnimationSpec::new(100.0, Easing::Linear);
    let mut holder = DatasetHolder::new(spec);
    let first = monthly(&[(60.0, "Mon"), (61.0, "Tue")]);
    let second = monthly(&[(59.0, "Mon"), (58.0, "Tue")]);

    holder.set_target(&[first.clone()]);
    while holder.tick(16.0) {}
    assert_eq!(holder.phase_of(&first), Some(Phase::Steady));

    assert!(holder.set_target(&[second.clone()]));
    assert!(!holder.set_target(&[second.clone()]), "same snapshot is a no-op");
    assert_eq!(holder.phase_of(&first), Some(Phase::Exiting));
    assert_eq!(holder.phase_of(&second), Some(Phase::Entering));
    assert_eq!(holder.value_range(), Some((58.0, 61.0)));

    while holder.tick(16.0) {}
    assert_eq!(holder.phase_of(&first), None);
    assert_eq!(holder.render_set(), vec![&second]);
    assert_eq!(holder.value_range(), Some((58.0, 59.0)));
}

#[test]
fn scene_diffs_follow_bar_growth() {
    let style = BarChartStyle::default().with_animation(AnimationSpec::new(100.0, Easing::Linear));
    let mut chart = BarChart::new(2, style);
    let groups: Vec<BarGroup> = [40.0, 30.0, 20.0]
        .iter()
        .enumerate()
        .map(|(i, v)| BarGroup::single(format!("w{i}"), *v, css::SEA_GREEN))
        .collect();
    chart.set_data(&groups);

    let mut scene = Scene::new();
    let measurer = HeuristicTextMeasurer;
    let first = scene.tick(chart.marks(VIEW, &measurer));
    assert!(first.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));
    let count = scene.len();

    chart.tick(50.0);
    let grow = scene.tick(chart.marks(VIEW, &measurer));
    assert!(!grow.is_empty());
    assert!(grow.iter().all(|d| matches!(d, MarkDiff::Update { .. })));
    assert_eq!(scene.len(), count);

    while chart.tick(16.0) {}
    scene.tick(chart.marks(VIEW, &measurer));
    let idle = scene.tick(chart.marks(VIEW, &measurer));
    assert!(idle.is_empty(), "a settled chart produces no diffs");

    chart.set_data(&groups[..2]);
    let shrink = scene.tick(chart.marks(VIEW, &measurer));
    let gone = mark_id(2, layer::BAR, key3(2, 0, 0));
    assert!(
        shrink
            .iter()
            .any(|d| matches!(d, MarkDiff::Exit { .. }) && d.id() == gone)
    );
    assert!(scene.get(gone).is_none());
}

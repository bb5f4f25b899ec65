// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives every `weightchart_charts` chart through a simulated frame loop and writes the frames
//! to an HTML report.
mod html;
mod svg;

use color_eyre::Result;
use kurbo::{Point, Rect, Size, Vec2};
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;
use weightchart_charts::{
    AnimationSpec, BarChart, BarChartStyle, BarGroup, BarValue, CircularChart,
    CircularChartStyle, CircularSlice, CombinedChart, CombinedChartStyle, DataPoint, Easing,
    GradientStyle, HeuristicTextMeasurer, LeadingIndicator, LineChart, LineChartStyle,
    LinePathType, LineSeries, LineStyle, MeterText, NeedlePointerStyle, PointStyle,
    RadialProgressStyle, TextMeasurer, TextStyle, VerticalProgressChart, VerticalProgressItem,
    VerticalProgressStyle, XLabelOrientation,
};
use weightchart_core::{Mark, Scene};

const FRAME_MS: f64 = 16.0;

/// The frame-loop surface every chart shares.
trait DemoChart {
    fn tick(&mut self, dt_ms: f64) -> bool;
    fn marks(&self, viewport: Size, measurer: &dyn TextMeasurer) -> Vec<Mark>;
}

macro_rules! demo_chart {
    ($($ty:ty),*) => {
        $(impl DemoChart for $ty {
            fn tick(&mut self, dt_ms: f64) -> bool {
                <$ty>::tick(self, dt_ms)
            }

            fn marks(&self, viewport: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
                <$ty>::marks(self, viewport, measurer)
            }
        })*
    };
}

demo_chart!(LineChart, BarChart, CombinedChart, CircularChart, VerticalProgressChart);

/// Runs frames until `until_ms`, snapshotting the SVG at each of `captures` (in ms).
fn record(
    chart: &mut dyn DemoChart,
    scene: &mut Scene,
    svg: &mut svg::SvgScene,
    viewport: Size,
    until_ms: f64,
    captures: &[f64],
) -> Vec<(String, String)> {
    let measurer = HeuristicTextMeasurer;
    svg.set_view_box(Rect::from_origin_size(Point::ORIGIN, viewport));
    let mut frames = Vec::new();
    let mut next = captures.iter().peekable();
    let mut now = 0.0;
    let mut diff_count = 0;
    loop {
        let diffs = scene.tick(chart.marks(viewport, &measurer));
        diff_count += diffs.len();
        svg.apply_diffs(&diffs);
        while let Some(&&at) = next.peek() {
            if at > now {
                break;
            }
            frames.push((format!("t = {now:.0} ms"), svg.to_svg_string()));
            next.next();
        }
        if now >= until_ms {
            break;
        }
        chart.tick(FRAME_MS);
        now += FRAME_MS;
    }
    tracing::info!(diff_count, marks = svg.len(), until_ms, "recorded chart");
    frames
}

fn weights() -> Vec<DataPoint> {
    let values = [
        82.4, 82.1, 81.9, 82.3, 81.6, 81.2, 81.4, 80.9, 80.7, 81.0, 80.2, 80.4, 79.9, 79.6,
    ];
    values
        .iter()
        .enumerate()
        .map(|(day, v)| DataPoint::new(*v, format!("{}/10", day + 1)).with_anomaly(day == 3))
        .collect()
}

fn line_demo() -> html::HtmlSection {
    let style = LineChartStyle::default()
        .with_animation(AnimationSpec::new(600.0, Easing::FastOutSlowIn))
        .with_gradient(GradientStyle::default())
        .with_orientation(XLabelOrientation::LeftSlanted);
    let mut chart = LineChart::new(1, style);
    let weight = LineSeries::new(css::STEEL_BLUE, weights())
        .with_line_style(LineStyle::Curved)
        .with_point_style(PointStyle::filled(6.0));
    let goal = LineSeries::new(
        css::ORANGE,
        (1..=14)
            .map(|day| DataPoint::new(80.0, format!("{day}/10")))
            .collect(),
    )
    .with_path_type(LinePathType::Dot)
    .with_point_style(PointStyle::None);

    let viewport = Size::new(420.0, 240.0);
    let measurer = HeuristicTextMeasurer;
    let mut scene = Scene::new();
    let mut svg = svg::SvgScene::default();

    chart.set_data(&[weight.clone()]);
    chart.set_viewport(viewport, &measurer);
    let mut frames = record(
        &mut chart,
        &mut scene,
        &mut svg,
        viewport,
        700.0,
        &[0.0, 304.0, 700.0],
    );

    // Add the goal line, then fling back towards the start.
    chart.set_data(&[weight, goal]);
    chart.set_viewport(viewport, &measurer);
    chart.scroll_mut().scroll_to_percent(100.0);
    chart.scroll_mut().drag_start(0.0, 0.0);
    chart.scroll_mut().drag_by(16.0, 40.0);
    chart.scroll_mut().drag_by(32.0, 80.0);
    chart.scroll_mut().drag_end(48.0);
    frames.extend(record(&mut chart, &mut scene, &mut svg, viewport, 700.0, &[304.0, 700.0]));

    html::HtmlSection {
        title: "Line chart".into(),
        note: "Two weeks of weigh-ins drawing in from the left, then a dotted goal line \
               joining while the view flings."
            .into(),
        frames,
    }
}

fn bar_demo() -> html::HtmlSection {
    let style = BarChartStyle::default()
        .with_animation(AnimationSpec::new(500.0, Easing::FastOutSlowIn))
        .with_value_label(TextStyle::new(11.0));
    let mut chart = BarChart::new(2, style);
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let steps = [6.2, 8.4, 4.1, 9.8, 7.3, 11.5, 3.9];
    let groups: Vec<BarGroup> = days
        .iter()
        .zip(steps)
        .map(|(day, k)| BarGroup::single(*day, k, css::MEDIUM_SEA_GREEN))
        .collect();
    let stacked: Vec<BarGroup> = days
        .iter()
        .zip(steps)
        .map(|(day, k)| {
            BarGroup::stacked(
                *day,
                vec![vec![
                    BarValue::new(k * 0.6, css::MEDIUM_SEA_GREEN),
                    BarValue::new(k * 0.4, css::DARK_GREEN),
                ]],
            )
        })
        .collect();

    let viewport = Size::new(420.0, 240.0);
    let measurer = HeuristicTextMeasurer;
    let mut scene = Scene::new();
    let mut svg = svg::SvgScene::default();
    chart.set_data(&groups);
    chart.set_viewport(viewport, &measurer);
    let mut frames = record(&mut chart, &mut scene, &mut svg, viewport, 520.0, &[160.0, 520.0]);
    chart.set_data(&stacked);
    frames.extend(record(&mut chart, &mut scene, &mut svg, viewport, 520.0, &[160.0, 520.0]));

    html::HtmlSection {
        title: "Bar chart".into(),
        note: "Daily steps (thousands), then the same days split into walking and running."
            .into(),
        frames,
    }
}

fn combined_demo() -> html::HtmlSection {
    let style = CombinedChartStyle::default()
        .with_animation(AnimationSpec::new(400.0, Easing::Linear))
        .with_point_style(PointStyle::filled(5.0));
    let mut chart = CombinedChart::new(3, style);
    let weeks = ["W1", "W2", "W3", "W4", "W5"];
    let bars: Vec<BarGroup> = weeks
        .iter()
        .zip([3.0, 4.0, 2.0, 5.0, 4.0])
        .map(|(w, sessions)| BarGroup::single(*w, sessions, css::LIGHT_SLATE_GRAY))
        .collect();
    let trend = LineSeries::new(
        css::CRIMSON,
        weeks
            .iter()
            .zip([2.5, 3.2, 3.0, 3.8, 4.1])
            .map(|(w, v)| DataPoint::new(v, *w))
            .collect(),
    );

    let viewport = Size::new(360.0, 220.0);
    let measurer = HeuristicTextMeasurer;
    let mut scene = Scene::new();
    let mut svg = svg::SvgScene::default();
    chart.set_data(&bars, &[trend]);
    chart.set_viewport(viewport, &measurer);
    let frames = record(&mut chart, &mut scene, &mut svg, viewport, 420.0, &[0.0, 208.0, 420.0]);

    html::HtmlSection {
        title: "Combined chart".into(),
        note: "Workout sessions per week with the rolling average on top; bars wait one \
               frame before growing."
            .into(),
        frames,
    }
}

fn pie_demo() -> html::HtmlSection {
    let style = CircularChartStyle::pie()
        .with_angles(-90.0, 360.0)
        .with_line_width(28.0)
        .with_animation(AnimationSpec::new(600.0, Easing::FastOutSlowIn))
        .with_meter_text(MeterText {
            spacing: 0.0,
            text: TextStyle::new(11.0),
            ..MeterText::default()
        });
    let mut chart = CircularChart::new(4, style);
    chart.on_click(|slice| tracing::info!(?slice, "pie clicked"));
    chart.set_data(&[
        CircularSlice::new(45.0, css::CORNFLOWER_BLUE),
        CircularSlice::new(30.0, css::GOLDENROD),
        CircularSlice::new(25.0, css::INDIAN_RED),
    ]);

    let viewport = Size::new(220.0, 220.0);
    let mut scene = Scene::new();
    let mut svg = svg::SvgScene::default();
    let mut frames = record(&mut chart, &mut scene, &mut svg, viewport, 620.0, &[208.0, 620.0]);

    // Press the second slice on the ring.
    let angles = chart.slice_angles(viewport);
    if let Some(&(start, sweep)) = angles.get(1) {
        let mid = (start + sweep * 0.5).to_radians();
        let center = Point::new(viewport.width * 0.5, viewport.height * 0.5);
        let pointer = center + Vec2::new(mid.cos(), mid.sin()) * 80.0;
        chart.click(pointer, viewport);
    }
    frames.extend(record(&mut chart, &mut scene, &mut svg, viewport, 0.0, &[0.0]));

    html::HtmlSection {
        title: "Pie chart".into(),
        note: "Macronutrient split sweeping in; the last frame has the middle slice pressed."
            .into(),
        frames,
    }
}

fn gauge_demo() -> html::HtmlSection {
    let style = CircularChartStyle::gauge()
        .with_angles(180.0, 180.0)
        .with_line_width(16.0)
        .with_animation(AnimationSpec::new(800.0, Easing::FastOutSlowIn))
        .with_radial(
            RadialProgressStyle::default()
                .with_progress(68.0)
                .with_needle(NeedlePointerStyle::default())
                .with_leading_indicator(LeadingIndicator::default()),
        )
        .with_meter_text(MeterText {
            count: 5,
            start_value: 0.0,
            end_value: 100.0,
            spacing: 12.0,
            text: TextStyle::new(10.0),
        });
    let mut chart = CircularChart::new(5, style);
    chart.set_data(&[CircularSlice::new(68.0, css::TEAL)]);

    let viewport = Size::new(240.0, 160.0);
    let mut scene = Scene::new();
    let mut svg = svg::SvgScene::default();
    let frames = record(&mut chart, &mut scene, &mut svg, viewport, 820.0, &[0.0, 400.0, 820.0]);

    html::HtmlSection {
        title: "Radial gauge".into(),
        note: "Progress towards the monthly goal with needle, leading dot and scale labels."
            .into(),
        frames,
    }
}

fn progress_demo() -> html::HtmlSection {
    let mut chart = VerticalProgressChart::new(6, VerticalProgressStyle::default());
    let days = ["M", "T", "W", "T", "F", "S", "S"];
    let water = [100.0, 75.0, 40.0, 90.0, 120.0, 55.0, 0.0];
    let items: Vec<VerticalProgressItem> = days
        .iter()
        .zip(water)
        .map(|(day, pct)| {
            let item = VerticalProgressItem::new(css::DODGER_BLUE, *day, pct);
            if pct > 100.0 {
                item.with_top_label("max")
            } else {
                item
            }
        })
        .collect();

    let viewport = Size::new(260.0, 180.0);
    let mut scene = Scene::new();
    let mut svg = svg::SvgScene::default();
    chart.set_data(&items);
    chart.set_viewport(viewport);
    let frames = record(&mut chart, &mut scene, &mut svg, viewport, 1000.0, &[0.0, 496.0, 1000.0]);

    html::HtmlSection {
        title: "Vertical progress".into(),
        note: "Daily water intake against target, filling linearly over one second.".into(),
        frames,
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,weightchart_charts=debug")),
        )
        .init();

    let sections = vec![
        line_demo(),
        bar_demo(),
        combined_demo(),
        pie_demo(),
        gauge_demo(),
        progress_demo(),
    ];

    let html = html::render_report("weightchart demo", &sections);
    std::fs::write("weightchart_demo.html", html)?;
    tracing::info!(sections = sections.len(), "wrote weightchart_demo.html");
    Ok(())
}

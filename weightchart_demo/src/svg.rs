// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a diffed mark set.

use std::collections::HashMap;
use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::{AlphaColor, Srgb};
use weightchart_core::{
    DashPattern, LineCap, MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline,
};

/// Mirror of a `Scene`, rebuilt only from the diffs it is fed.
#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: HashMap<MarkId, (i32, usize, MarkPayload)>,
    next_seq: usize,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.len()
    }

    pub(crate) fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.next_seq += 1;
                    self.marks
                        .insert(*id, (*z_index, self.next_seq, (**new).clone()));
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    let seq = self.marks.get(id).map_or(self.next_seq, |(_, s, _)| *s);
                    self.marks.insert(*id, (*new_z_index, seq, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = write!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        out.push('\n');

        let mut marks: Vec<_> = self.marks.values().collect();
        marks.sort_by_key(|(z, seq, _)| (*z, *seq));

        for (_, _, payload) in marks {
            match payload {
                MarkPayload::Rect(r) => {
                    let _ = write!(
                        out,
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    );
                    write_paint_attr(&mut out, "fill", &r.fill);
                    out.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                    };
                    let _ = write!(
                        out,
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                        t.pos.x, t.pos.y, t.font_size, baseline
                    );
                    if t.angle != 0.0 {
                        let _ = write!(
                            out,
                            r#" transform="rotate({} {} {})""#,
                            t.angle, t.pos.x, t.pos.y
                        );
                    }
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", &t.fill);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
                MarkPayload::Path(p) => {
                    let d = p.path.to_svg();
                    let _ = write!(out, r#"<path d="{d}""#);
                    write_paint_attr(&mut out, "fill", &p.fill);
                    if let Some(stroke) = &p.stroke {
                        write_paint_attr(&mut out, "stroke", &stroke.brush);
                        let _ = write!(out, r#" stroke-width="{}""#, stroke.width);
                        out.push_str(match stroke.cap {
                            LineCap::Butt => "",
                            LineCap::Round => r#" stroke-linecap="round""#,
                            LineCap::Square => r#" stroke-linecap="square""#,
                        });
                        // SVG has one dash slot; a running reveal wins over the style dash.
                        if let Some(dash) = p.reveal.as_ref().or(stroke.dash.as_ref()) {
                            write_dash_attrs(&mut out, dash);
                        }
                    }
                    out.push_str("/>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn write_dash_attrs(out: &mut String, dash: &DashPattern) {
    let list: Vec<String> = dash.intervals.iter().map(f64::to_string).collect();
    let _ = write!(
        out,
        r#" stroke-dasharray="{}" stroke-dashoffset="{}""#,
        list.join(" "),
        dash.offset
    );
}

fn solid_paint(color: AlphaColor<Srgb>) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (fill, opacity)
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => solid_paint(*color),
        // Gradients flatten to their strongest stop.
        Brush::Gradient(gradient) => gradient
            .stops
            .iter()
            .map(|stop| stop.color.to_alpha_color::<Srgb>())
            .max_by(|a, b| a.components[3].total_cmp(&b.components[3]))
            .map_or_else(|| ("none".to_string(), None), solid_paint),
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Point};
    use peniko::color::palette::css;
    use weightchart_core::{Mark, PathChannels, Scene, StrokeStyle};

    use super::*;

    #[test]
    fn exits_remove_elements_and_reveal_becomes_dasharray() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(100.0, 0.0));
        let line = PathChannels::stroked(path, StrokeStyle::solid(css::RED, 2.0))
            .with_reveal(DashPattern::new([100.0, 100.0], 60.0));

        let mut scene = Scene::new();
        let mut svg = SvgScene::default();
        svg.apply_diffs(&scene.tick([Mark::path(MarkId(1), line)]));
        let text = svg.to_svg_string();
        assert!(text.contains(r#"stroke-dasharray="100 100""#));
        assert!(text.contains(r#"stroke-dashoffset="60""#));

        svg.apply_diffs(&scene.clear());
        assert_eq!(svg.len(), 0);
        assert!(!svg.to_svg_string().contains("<path"));
    }
}

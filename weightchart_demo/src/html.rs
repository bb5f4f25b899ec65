// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-page HTML report holding the demo frames.

use std::fmt::Write as _;

/// One chart: a heading, a note, and a strip of SVG frames.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) note: String,
    pub(crate) frames: Vec<(String, String)>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!doctype html>");
    let _ = writeln!(out, "<html><head><meta charset=\"utf-8\"><title>{title}</title>");
    out.push_str(
        "<style>body{font-family:sans-serif;margin:24px;background:#f6f6f6}\
         section{background:#fff;padding:16px;margin-bottom:24px;border-radius:8px}\
         .strip{display:flex;flex-wrap:wrap;gap:16px}\
         figure{margin:0}figcaption{font-size:12px;color:#666}</style>\n",
    );
    let _ = writeln!(out, "</head><body><h1>{title}</h1>");
    for section in sections {
        let _ = writeln!(out, "<section><h2>{}</h2><p>{}</p>", section.title, section.note);
        out.push_str("<div class=\"strip\">\n");
        for (caption, svg) in &section.frames {
            let _ = writeln!(
                out,
                "<figure>{svg}<figcaption>{caption}</figcaption></figure>"
            );
        }
        out.push_str("</div></section>\n");
    }
    out.push_str("</body></html>\n");
    out
}

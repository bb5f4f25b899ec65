// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph paths for point markers, anomaly stars and gauge pointers.

use kurbo::{Affine, Arc, BezPath, Circle, Point, Shape, Vec2};

/// Flattening tolerance for circular glyphs.
const TOLERANCE: f64 = 0.1;

/// Star vertex multipliers, in drawing order.
const STAR_VERTICES: [(f64, f64); 5] = [
    (0.50, 0.84),
    (1.50, 0.84),
    (0.68, 1.45),
    (1.00, 0.50),
    (1.32, 1.45),
];

/// A disc of diameter `size` centred at `center`.
pub fn circle_path(center: Point, size: f64) -> BezPath {
    Circle::new(center, (size * 0.5).max(0.0))
        .path_elements(TOLERANCE)
        .collect()
}

/// The five-point anomaly star anchored on a data point.
///
/// Vertices sit at `(x - size + size * mx, y + size * my - size)`; the star is drawn as one
/// self-intersecting closed polyline.
pub fn star_path(at: Point, size: f64) -> BezPath {
    let mut path = BezPath::new();
    for (i, (mx, my)) in STAR_VERTICES.into_iter().enumerate() {
        let p = Point::new(at.x - size + size * mx, at.y + size * my - size);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

/// A needle pointing left from `pivot`, rotated clockwise by `angle_deg` around it.
///
/// The unrotated triangle is `(pivot.x, pivot.y - half_width)`, `(pivot.x - length, pivot.y)`,
/// `(pivot.x, pivot.y + half_width)`.
pub fn needle_path(pivot: Point, half_width: f64, length: f64, angle_deg: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((pivot.x, pivot.y - half_width));
    path.line_to((pivot.x - length, pivot.y));
    path.line_to((pivot.x, pivot.y + half_width));
    path.close_path();
    rotate_about(path, pivot, angle_deg)
}

/// An open circular arc of `radius` around `center`, starting at `start_deg` and running
/// `sweep_deg` degrees (clockwise in y-down space when positive).
pub fn arc_path(center: Point, radius: f64, start_deg: f64, sweep_deg: f64) -> BezPath {
    Arc::new(
        center,
        Vec2::new(radius.max(0.0), radius.max(0.0)),
        start_deg.to_radians(),
        sweep_deg.to_radians(),
        0.0,
    )
    .path_elements(TOLERANCE)
    .collect()
}

/// Rotates `path` clockwise (in y-down space) by `angle_deg` around `pivot`.
pub fn rotate_about(path: BezPath, pivot: Point, angle_deg: f64) -> BezPath {
    Affine::rotate_about(angle_deg.to_radians(), pivot) * path
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{PathEl, Shape};

    use super::*;

    #[test]
    fn star_spans_its_glyph_box() {
        let star = star_path(Point::new(100.0, 50.0), 16.0);
        let bbox = star.bounding_box();
        // x from (0.5 - 1) * 16 to (1.5 - 1) * 16 around the anchor.
        assert!((bbox.x0 - 92.0).abs() < 1e-9);
        assert!((bbox.x1 - 108.0).abs() < 1e-9);
        assert!((bbox.y0 - 42.0).abs() < 1e-9);
        assert!((bbox.y1 - (50.0 + 16.0 * 0.45)).abs() < 1e-9);
        assert!(matches!(star.elements().last(), Some(PathEl::ClosePath)));
    }

    #[test]
    fn arc_runs_clockwise_from_its_start() {
        let arc = arc_path(Point::new(0.0, 0.0), 10.0, 180.0, 90.0);
        let start = arc.elements().first().and_then(|e| e.end_point());
        let end = arc.elements().last().and_then(|e| e.end_point());
        let (Some(start), Some(end)) = (start, end) else {
            panic!("empty arc");
        };
        assert!((start.x + 10.0).abs() < 1e-6 && start.y.abs() < 1e-6);
        // 270 degrees is straight up in y-down space.
        assert!(end.x.abs() < 1e-6 && (end.y + 10.0).abs() < 1e-6);
    }

    #[test]
    fn needle_rotation_is_clockwise() {
        let pivot = Point::new(50.0, 50.0);
        // 180 degrees flips a left-pointing needle to point right.
        let needle = needle_path(pivot, 4.0, 20.0, 180.0);
        let bbox = needle.bounding_box();
        assert!((bbox.x1 - 70.0).abs() < 1e-6);
        assert!((bbox.x0 - 50.0).abs() < 1e-6);
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `weightchart_core`: the draw-command model shared by the weightchart renderers.
//!
//! This crate provides:
//! - stable mark identity ([`MarkId`])
//! - per-kind mark payloads ([`MarkPayload`]) describing what to paint
//! - stroke descriptions with caps and dash patterns ([`StrokeStyle`], [`DashPattern`])
//! - frame-to-frame reconciliation with diff output ([`Scene`], [`MarkDiff`])
//!
//! Chart renderers are pure functions that return a `Vec<Mark>` for one frame. A host can paint
//! that list directly in order, or feed it to [`Scene::tick`] and apply the resulting
//! `Enter/Update/Exit` stream to a retained renderer.
//!
//! Text shaping is out of scope: text marks carry unshaped strings plus anchoring hints.

#![no_std]

extern crate alloc;

use alloc::{boxed::Box, string::String, vec::Vec};
use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};
use smallvec::SmallVec;

/// Stable identifier for a [`Mark`].
///
/// `MarkId`s must remain stable across frames for the same conceptual visual item (the second
/// bar of the third group, the line of a given series); this is what lets [`Scene::tick`] report
/// an `Update` instead of an `Exit` followed by an `Enter`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Create a mark id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Create a stable mark id for an item key within a namespace.
    ///
    /// Namespaces separate the marks of different charts (or different layers of one chart)
    /// that would otherwise share small integer keys.
    pub fn for_item(namespace: u32, key: u64) -> Self {
        // 64-bit mix based on golden ratio and some rotation; deterministic across runs.
        let ns = u64::from(namespace).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mixed = ns ^ key.rotate_left(17) ^ key.wrapping_mul(0xD6E8_FEB8_6659_FD93);
        Self(mixed)
    }

    /// Derive a child id, e.g. the `n`th segment of a stacked bar.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "folding the high and low halves into a namespace is intentionally lossy"
    )]
    pub fn child(self, n: u64) -> Self {
        Self::for_item((self.0 >> 32) as u32 ^ self.0 as u32, n ^ self.0.rotate_left(29))
    }
}

/// The geometric "kind" of a mark, which determines how its payload is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle using [`RectChannels`].
    Rect,
    /// A text item positioned at a point.
    Text,
    /// A vector path.
    Path,
}

/// Evaluated per-kind channels (payload) for a mark instance.
///
/// This is the render-facing data model: it is what downstream painters consume, and it is what
/// appears (boxed) in [`MarkDiff`]s.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// An axis-aligned rectangle.
    Rect(RectChannels),
    /// A text item positioned at a point.
    Text(TextChannels),
    /// A vector path.
    Path(PathChannels),
}

impl MarkPayload {
    /// Return the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Text(_) => MarkKind::Text,
            Self::Path(_) => MarkKind::Path,
        }
    }

    /// Optional bounds hint for downstream damage calculation.
    ///
    /// Path bounds include half the stroke width on every side.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            // Shaping is downstream; text bounds are not known here.
            Self::Text(_) => None,
            Self::Path(p) => {
                let bbox = p.path.bounding_box();
                let pad = p.stroke.as_ref().map_or(0.0, |s| s.width * 0.5);
                Some(bbox.inflate(pad, pad))
            }
        }
    }
}

/// Evaluated channels for [`MarkKind::Rect`].
#[derive(Clone, Debug, PartialEq)]
pub struct RectChannels {
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// Evaluated channels for [`MarkKind::Text`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextChannels {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Text rotation angle in degrees, with positive angles rotating clockwise.
    ///
    /// Slanted x-axis labels carry `-45` or `45` here.
    pub angle: f64,
    /// Horizontal text anchoring (how the glyphs align relative to [`TextChannels::pos`]).
    pub anchor: TextAnchor,
    /// Vertical alignment for text relative to [`TextChannels::pos`].
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Horizontal anchoring for text.
///
/// In SVG terms, this maps to the `text-anchor` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start (left in LTR).
    Start,
    /// Anchor in the middle.
    Middle,
    /// Anchor at the end (right in LTR).
    End,
}

/// Vertical alignment for text.
///
/// In SVG terms, this maps to the `dominant-baseline` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Baseline is centered on the anchor point.
    Middle,
    /// Baseline is the font's alphabetic baseline.
    Alphabetic,
    /// Baseline is the font's hanging baseline (text hangs below the anchor).
    Hanging,
}

/// How the ends of an open stroked path are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Flat end exactly at the path endpoint.
    #[default]
    Butt,
    /// Semicircular end extending half the stroke width past the endpoint.
    Round,
    /// Square end extending half the stroke width past the endpoint.
    Square,
}

/// An on/off dash pattern measured along a path.
///
/// Intervals alternate `on, off, on, off, ...`. An odd number of intervals is repeated once to
/// make the list even, as SVG and most 2D canvases do. `offset` shifts the pattern so that the
/// path starts `offset` units into it.
#[derive(Clone, Debug, PartialEq)]
pub struct DashPattern {
    /// Alternating on/off lengths.
    pub intervals: SmallVec<[f64; 4]>,
    /// Phase into the pattern at the start of the path.
    pub offset: f64,
}

impl DashPattern {
    /// Creates a dash pattern from alternating on/off lengths and a phase offset.
    pub fn new(intervals: impl IntoIterator<Item = f64>, offset: f64) -> Self {
        Self {
            intervals: intervals.into_iter().collect(),
            offset,
        }
    }

    fn effective_len(&self) -> usize {
        let n = self.intervals.len();
        if n % 2 == 0 { n } else { n * 2 }
    }

    /// Total length of one repetition of the (even-length) pattern.
    pub fn period(&self) -> f64 {
        let n = self.intervals.len();
        (0..self.effective_len())
            .map(|i| self.intervals[i % n])
            .sum()
    }

    /// Returns `true` if a point `distance` units along the path falls on an "on" interval.
    ///
    /// An empty or zero-length pattern is treated as solid.
    pub fn is_on_at(&self, distance: f64) -> bool {
        let period = self.period();
        if period.is_nan() || period <= 0.0 {
            return true;
        }
        let n = self.intervals.len();
        let mut d = (distance + self.offset) % period;
        if d < 0.0 {
            d += period;
        }
        for i in 0..self.effective_len() {
            let len = self.intervals[i % n];
            if d < len {
                return i % 2 == 0;
            }
            d -= len;
        }
        true
    }
}

/// Paint, width, cap and optional dashing for a stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub width: f64,
    /// End cap for open subpaths.
    pub cap: LineCap,
    /// Optional dash pattern.
    pub dash: Option<DashPattern>,
}

impl StrokeStyle {
    /// Convenience for a solid, butt-capped stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
            cap: LineCap::Butt,
            dash: None,
        }
    }

    /// Sets the end cap.
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Sets the dash pattern.
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Color::from_rgba8(0, 0, 0, 255), 1.0)
    }
}

/// Evaluated channels for [`MarkKind::Path`].
#[derive(Clone, Debug, PartialEq)]
pub struct PathChannels {
    /// The vector path geometry.
    pub path: BezPath,
    /// Fill paint. Use a transparent brush for stroke-only paths.
    pub fill: Brush,
    /// Optional stroke.
    pub stroke: Option<StrokeStyle>,
    /// Optional reveal mask, combined with the stroke's own dash.
    ///
    /// A point along the path is painted only where both the stroke dash (if any) and this
    /// pattern are "on". Animated line reveals use `[L, L]` with a moving offset.
    pub reveal: Option<DashPattern>,
}

impl PathChannels {
    /// A filled path with no stroke.
    pub fn filled(path: BezPath, fill: impl Into<Brush>) -> Self {
        Self {
            path,
            fill: fill.into(),
            stroke: None,
            reveal: None,
        }
    }

    /// A stroked path with a transparent fill.
    pub fn stroked(path: BezPath, stroke: StrokeStyle) -> Self {
        Self {
            path,
            fill: Brush::Solid(Color::TRANSPARENT),
            stroke: Some(stroke),
            reveal: None,
        }
    }

    /// Sets the reveal mask.
    pub fn with_reveal(mut self, reveal: DashPattern) -> Self {
        self.reveal = Some(reveal);
        self
    }
}

impl Default for RectChannels {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            fill: Brush::Solid(Color::from_rgba8(0, 0, 0, 255)),
        }
    }
}

impl Default for TextChannels {
    fn default() -> Self {
        Self {
            pos: Point::new(0.0, 0.0),
            text: String::new(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::Solid(Color::from_rgba8(0, 0, 0, 255)),
        }
    }
}

impl Default for PathChannels {
    fn default() -> Self {
        Self::filled(BezPath::new(), Color::from_rgba8(0, 0, 0, 255))
    }
}

/// A single draw command: a payload with a stable id and a z-index.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identifier.
    pub id: MarkId,
    /// Z-ordering for rendering; higher values are drawn above lower values.
    ///
    /// Marks with equal z-index paint in the order they were emitted.
    pub z_index: i32,
    /// What to paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Create a mark at z-index 0.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            payload,
        }
    }

    /// Create a rect mark.
    pub fn rect(id: MarkId, channels: RectChannels) -> Self {
        Self::new(id, MarkPayload::Rect(channels))
    }

    /// Create a text mark.
    pub fn text(id: MarkId, channels: TextChannels) -> Self {
        Self::new(id, MarkPayload::Text(channels))
    }

    /// Create a path mark.
    pub fn path(id: MarkId, channels: PathChannels) -> Self {
        Self::new(id, MarkPayload::Path(channels))
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Return the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

/// Mark-level diffs keyed by stable identity.
///
/// Payloads are boxed to keep `MarkDiff` itself reasonably sized.
#[derive(Debug)]
pub enum MarkDiff {
    /// A mark is newly present.
    Enter {
        /// Stable identifier.
        id: MarkId,
        /// Z-ordering for rendering.
        z_index: i32,
        /// The mark kind.
        kind: MarkKind,
        /// The new payload.
        new: Box<MarkPayload>,
        /// Optional bounds hint for downstream damage calculation.
        bounds: Option<Rect>,
    },
    /// A mark exists and its payload or z-index changed.
    Update {
        /// Stable identifier.
        id: MarkId,
        /// Previous z-index.
        old_z_index: i32,
        /// New z-index.
        new_z_index: i32,
        /// The mark kind.
        kind: MarkKind,
        /// Previous payload.
        old: Box<MarkPayload>,
        /// New payload.
        new: Box<MarkPayload>,
        /// Union of old and new bounds when both are known.
        damage: Option<Rect>,
    },
    /// A mark was removed.
    Exit {
        /// Stable identifier.
        id: MarkId,
        /// Z-ordering for rendering.
        z_index: i32,
        /// The mark kind.
        kind: MarkKind,
        /// The last payload seen for this mark.
        old: Box<MarkPayload>,
        /// Optional bounds hint for downstream damage calculation.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id this diff applies to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// Returns the best available damage rectangle for this diff.
    pub fn damage(&self) -> Option<Rect> {
        match self {
            Self::Enter { bounds, .. } => *bounds,
            Self::Update { damage, .. } => *damage,
            Self::Exit { bounds, .. } => *bounds,
        }
    }
}

fn exit_of(mark: Mark) -> MarkDiff {
    let bounds = mark.payload.bounds();
    MarkDiff::Exit {
        id: mark.id,
        z_index: mark.z_index,
        kind: mark.payload.kind(),
        old: Box::new(mark.payload),
        bounds,
    }
}

fn enter_of(mark: &Mark) -> MarkDiff {
    MarkDiff::Enter {
        id: mark.id,
        z_index: mark.z_index,
        kind: mark.payload.kind(),
        new: Box::new(mark.payload.clone()),
        bounds: mark.payload.bounds(),
    }
}

/// The retained mark set of one chart instance.
///
/// Each call to [`Scene::tick`] replaces the whole set with one frame's marks and reports what
/// changed. Unchanged marks produce no diff.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
    order: Vec<MarkId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marks currently held.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Look up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Reconcile the scene against a complete frame and return the diffs.
    ///
    /// - New ids yield `Enter`.
    /// - Ids whose payload or z-index changed yield `Update`.
    /// - Ids whose kind changed yield `Exit` followed by `Enter`.
    /// - Ids missing from the frame yield `Exit` (sorted by id, after all other diffs).
    ///
    /// Ids are expected to be unique within a frame; the first occurrence wins.
    pub fn tick<I>(&mut self, marks: I) -> Vec<MarkDiff>
    where
        I: IntoIterator<Item = Mark>,
    {
        let mut old = core::mem::take(&mut self.marks);
        self.order.clear();
        let mut diffs = Vec::new();

        for mark in marks {
            let id = mark.id;
            if self.marks.contains_key(&id) {
                continue;
            }
            match old.remove(&id) {
                None => diffs.push(enter_of(&mark)),
                Some(prev) if prev.kind() != mark.kind() => {
                    diffs.push(exit_of(prev));
                    diffs.push(enter_of(&mark));
                }
                Some(prev) => {
                    if prev.payload != mark.payload || prev.z_index != mark.z_index {
                        let damage = match (prev.payload.bounds(), mark.payload.bounds()) {
                            (Some(a), Some(b)) => Some(a.union(b)),
                            _ => None,
                        };
                        diffs.push(MarkDiff::Update {
                            id,
                            old_z_index: prev.z_index,
                            new_z_index: mark.z_index,
                            kind: mark.kind(),
                            old: Box::new(prev.payload),
                            new: Box::new(mark.payload.clone()),
                            damage,
                        });
                    }
                }
            }
            self.order.push(id);
            self.marks.insert(id, mark);
        }

        let mut gone: Vec<Mark> = old.into_values().collect();
        gone.sort_by_key(|m| m.id);
        diffs.extend(gone.into_iter().map(exit_of));
        diffs
    }

    /// Remove every mark, returning `Exit` diffs.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.tick(core::iter::empty())
    }

    /// Iterate marks in paint order: ascending z-index, then frame order.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self
            .order
            .iter()
            .filter_map(|id| self.marks.get(id))
            .collect();
        out.sort_by_key(|m| m.z_index);
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    fn rect_mark(id: u64, x: f64) -> Mark {
        Mark::rect(
            MarkId(id),
            RectChannels {
                rect: Rect::new(x, 0.0, x + 10.0, 10.0),
                fill: css::TOMATO.into(),
            },
        )
    }

    #[test]
    fn enter_update_exit_smoke() {
        let mut scene = Scene::new();
        let diffs = scene.tick([rect_mark(7, 0.0)]);
        assert!(matches!(
            &diffs[..],
            [MarkDiff::Enter { id, .. }] if *id == MarkId(7)
        ));

        let diffs = scene.tick([rect_mark(7, 5.0)]);
        let [MarkDiff::Update { old, new, damage, .. }] = &diffs[..] else {
            panic!("expected a single update diff");
        };
        let (MarkPayload::Rect(old), MarkPayload::Rect(new)) = (&**old, &**new) else {
            panic!("expected rect payloads");
        };
        assert_ne!(old.rect.x0, new.rect.x0);
        assert_eq!(*damage, Some(Rect::new(0.0, 0.0, 15.0, 10.0)));

        let diffs = scene.clear();
        assert!(matches!(
            &diffs[..],
            [MarkDiff::Exit { id, .. }] if *id == MarkId(7)
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn unchanged_marks_do_not_diff() {
        let mut scene = Scene::new();
        let _ = scene.tick([rect_mark(1, 0.0), rect_mark(2, 20.0)]);
        let diffs = scene.tick([rect_mark(1, 0.0), rect_mark(2, 20.0)]);
        assert!(diffs.is_empty(), "identical frames must not produce diffs");
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn kind_change_exits_then_enters() {
        let mut scene = Scene::new();
        let _ = scene.tick([rect_mark(3, 0.0)]);
        let text = Mark::text(MarkId(3), TextChannels::default());
        let diffs = scene.tick([text]);
        assert!(matches!(
            &diffs[..],
            [
                MarkDiff::Exit { kind: MarkKind::Rect, .. },
                MarkDiff::Enter { kind: MarkKind::Text, .. }
            ]
        ));
    }

    #[test]
    fn paint_order_is_z_then_frame_order() {
        let mut scene = Scene::new();
        let _ = scene.tick([
            rect_mark(1, 0.0).with_z_index(10),
            rect_mark(2, 0.0),
            rect_mark(3, 0.0).with_z_index(10),
            rect_mark(4, 0.0).with_z_index(-5),
        ]);
        let ids: Vec<u64> = scene.paint_order().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, [4, 2, 1, 3]);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut scene = Scene::new();
        let diffs = scene.tick([rect_mark(1, 0.0), rect_mark(1, 50.0)]);
        assert_eq!(diffs.len(), 1);
        let Some(Mark {
            payload: MarkPayload::Rect(r),
            ..
        }) = scene.get(MarkId(1))
        else {
            panic!("expected rect mark");
        };
        assert_eq!(r.rect.x0, 0.0);
    }

    #[test]
    fn stroked_path_bounds_include_half_width() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 0.0));
        let payload = MarkPayload::Path(PathChannels::stroked(
            p,
            StrokeStyle::solid(css::BLACK, 4.0),
        ));
        assert_eq!(payload.bounds(), Some(Rect::new(-2.0, -2.0, 12.0, 2.0)));
    }

    #[test]
    fn dash_pattern_phase() {
        let dash = DashPattern::new([4.0, 2.0], 0.0);
        assert!(dash.is_on_at(0.0));
        assert!(dash.is_on_at(3.9));
        assert!(!dash.is_on_at(4.5));
        assert!(dash.is_on_at(6.5));

        // Reveal mask: [L, L] with offset (1 - p) * L shows the first p * L units.
        let len = 100.0;
        let reveal = DashPattern::new([len, len], (1.0 - 0.25) * len);
        assert!(reveal.is_on_at(10.0));
        assert!(!reveal.is_on_at(30.0));
        assert!(!reveal.is_on_at(99.0));
    }

    #[test]
    fn odd_dash_lists_repeat() {
        let dash = DashPattern::new([3.0], 0.0);
        assert_eq!(dash.period(), 6.0);
        assert!(dash.is_on_at(1.0));
        assert!(!dash.is_on_at(4.0));
    }

    #[test]
    fn empty_dash_is_solid() {
        let dash = DashPattern::new([], 0.0);
        assert!(dash.is_on_at(123.0));
    }

    #[test]
    fn item_ids_are_namespaced() {
        assert_ne!(MarkId::for_item(1, 5), MarkId::for_item(2, 5));
        assert_eq!(MarkId::for_item(1, 5), MarkId::for_item(1, 5));
        assert_ne!(MarkId(9).child(0), MarkId(9).child(1));
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable mark id layout.
//!
//! Every chart draws under one namespace. Within it, a layer tag selects the kind of visual
//! (gridline, y label, bar segment, ...) and a per-layer key picks the item, so the same item
//! keeps its id from frame to frame.

use weightchart_core::MarkId;

/// Layer tags. Each occupies the top 16 bits of the per-namespace key.
pub(crate) mod layer {
    pub(crate) const BACKGROUND: u64 = 1;
    pub(crate) const GRID: u64 = 2;
    pub(crate) const Y_LABEL: u64 = 3;
    pub(crate) const X_LABEL: u64 = 4;
    pub(crate) const LINE: u64 = 5;
    pub(crate) const LINE_FILL: u64 = 6;
    pub(crate) const POINT_SPACER: u64 = 7;
    pub(crate) const POINT: u64 = 8;
    pub(crate) const BAR: u64 = 9;
    pub(crate) const BAR_LABEL: u64 = 10;
    pub(crate) const SLICE: u64 = 11;
    pub(crate) const TRACK: u64 = 12;
    pub(crate) const NEEDLE: u64 = 13;
    pub(crate) const INDICATOR: u64 = 14;
    pub(crate) const METER_TEXT: u64 = 15;
    pub(crate) const PROGRESS: u64 = 16;
    pub(crate) const TOP_LABEL: u64 = 17;
}

/// Id of item `key` on `layer` in chart namespace `ns`.
pub(crate) fn mark_id(ns: u32, layer: u64, key: u64) -> MarkId {
    MarkId::for_item(ns, (layer << 48) ^ key)
}

/// Packs up to three small indices into one key (16 bits each).
pub(crate) fn key3(a: usize, b: usize, c: usize) -> u64 {
    let a = (a as u64) & 0xFFFF;
    let b = (b as u64) & 0xFFFF;
    let c = (c as u64) & 0xFFFF;
    (a << 32) | (b << 16) | c
}

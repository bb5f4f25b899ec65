// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset diffing with enter/exit choreography.
//!
//! Callers push a full snapshot whenever they like. [`reconcile`] compares it with what is on
//! screen by structural equality; [`DatasetHolder`] turns the result into per-item progress that
//! grows new items in and retracts removed ones before dropping them.

extern crate alloc;

use alloc::vec::Vec;

use crate::animation::{AnimationSpec, Tween};
use crate::model::{LineSeries, extent};

/// Items that contribute a value range to the scale.
pub trait Extent {
    /// `(min, max)` of the item's values, or `None` if it has none.
    fn extent(&self) -> Option<(f64, f64)>;
}

impl Extent for LineSeries {
    fn extent(&self) -> Option<(f64, f64)> {
        self.value_extent()
    }
}

/// Animation phase of one rendered item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Growing towards progress 1.
    Entering,
    /// Fully shown.
    Steady,
    /// Retracting towards progress 0; dropped once it gets there.
    Exiting,
}

/// Result of comparing two snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation<T> {
    /// Previous items in their original order, followed by newly added items.
    pub render_set: Vec<T>,
    /// Indices into `render_set` of items that were not in the previous snapshot.
    pub entering: Vec<usize>,
    /// Indices into `render_set` of previous items missing from the incoming snapshot.
    pub exiting: Vec<usize>,
}

impl<T> Reconciliation<T> {
    /// Returns `true` if nothing enters or exits.
    pub fn is_unchanged(&self) -> bool {
        self.entering.is_empty() && self.exiting.is_empty()
    }
}

/// Diffs `incoming` against `previous` by structural equality.
///
/// Items present in both pass through untouched and in place. New items are appended in
/// `incoming` order (duplicates collapse onto the first). Missing items stay in the render set
/// and are reported as exiting.
pub fn reconcile<T: PartialEq + Clone>(previous: &[T], incoming: &[T]) -> Reconciliation<T> {
    let exiting = previous
        .iter()
        .enumerate()
        .filter(|(_, item)| !incoming.contains(item))
        .map(|(i, _)| i)
        .collect();

    let mut render_set = previous.to_vec();
    let mut entering = Vec::new();
    for item in incoming {
        if !render_set.contains(item) {
            entering.push(render_set.len());
            render_set.push(item.clone());
        }
    }

    Reconciliation {
        render_set,
        entering,
        exiting,
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    item: T,
    progress: Tween,
    phase: Phase,
}

/// The render set of one chart plus the progress of every item in it.
///
/// The tracked value range only grows while items are added; it is recomputed from the
/// survivors when an exiting item is purged.
#[derive(Clone, Debug)]
pub struct DatasetHolder<T> {
    spec: AnimationSpec,
    entries: Vec<Entry<T>>,
    target: Vec<T>,
    range: Option<(f64, f64)>,
}

impl<T: PartialEq + Clone + Extent> DatasetHolder<T> {
    /// An empty holder animating with `spec`.
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            spec,
            entries: Vec::new(),
            target: Vec::new(),
            range: None,
        }
    }

    /// Replaces the timing for animations started after this call.
    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
        for entry in &mut self.entries {
            entry.progress.set_spec(spec);
        }
    }

    /// Pushes a new snapshot. Returns `false` if it equals the previous one.
    ///
    /// - new items enter at progress 0 and grow to 1
    /// - items missing from `incoming` retract from their current progress to 0
    /// - items still entering restart from 0, so overlapping changes never jump mid-flight
    /// - exiting items that reappear grow back from where they are
    pub fn set_target(&mut self, incoming: &[T]) -> bool {
        if self.target.as_slice() == incoming {
            return false;
        }

        let previous: Vec<T> = self.entries.iter().map(|e| e.item.clone()).collect();
        let diff = reconcile(&previous, incoming);

        for (i, entry) in self.entries.iter_mut().enumerate() {
            if diff.exiting.contains(&i) {
                if entry.phase != Phase::Exiting {
                    tracing::debug!(index = i, "series exiting");
                }
                entry.phase = Phase::Exiting;
                entry.progress.animate_to(0.0);
                continue;
            }
            match entry.phase {
                Phase::Exiting => {
                    tracing::debug!(index = i, "exiting series re-entering");
                    entry.phase = Phase::Entering;
                    entry.progress.animate_to(1.0);
                }
                Phase::Entering => {
                    entry.progress.snap_to(0.0);
                    entry.progress.animate_to(1.0);
                }
                Phase::Steady => {}
            }
        }

        for &i in &diff.entering {
            let item = diff.render_set[i].clone();
            if let Some((lo, hi)) = item.extent() {
                self.range = Some(match self.range {
                    None => (lo, hi),
                    Some((a, b)) => (a.min(lo), b.max(hi)),
                });
            }
            let mut progress = Tween::new(0.0, self.spec);
            progress.animate_to(1.0);
            tracing::debug!(index = i, "series entering");
            self.entries.push(Entry {
                item,
                progress,
                phase: Phase::Entering,
            });
        }

        self.target = incoming.to_vec();
        self.settle();
        true
    }

    /// Advances every item's progress and purges items that finished exiting.
    ///
    /// Returns `true` while anything is still animating.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let mut changed = false;
        for entry in &mut self.entries {
            changed |= entry.progress.tick(dt_ms);
        }
        changed |= self.settle();
        changed || self.is_animating()
    }

    fn settle(&mut self) -> bool {
        for entry in &mut self.entries {
            if entry.phase == Phase::Entering && !entry.progress.is_running() {
                entry.phase = Phase::Steady;
            }
        }

        let before = self.entries.len();
        self.entries.retain(|e| {
            !(e.phase == Phase::Exiting && !e.progress.is_running() && e.progress.value() == 0.0)
        });
        let purged = before - self.entries.len();
        if purged == 0 {
            return false;
        }

        tracing::debug!(purged, remaining = self.entries.len(), "exited series purged");
        self.range = self
            .entries
            .iter()
            .filter_map(|e| e.item.extent())
            .fold(None, |acc, (lo, hi)| {
                extent(acc.into_iter().flat_map(|(a, b)| [a, b]).chain([lo, hi]))
            });
        true
    }

    /// Items currently on screen, in render order (including exiting ones).
    pub fn render_set(&self) -> Vec<&T> {
        self.entries.iter().map(|e| &e.item).collect()
    }

    /// Items with their progress and phase, in render order.
    pub fn entries(&self) -> impl Iterator<Item = (&T, f64, Phase)> + '_ {
        self.entries
            .iter()
            .map(|e| (&e.item, e.progress.value().clamp(0.0, 1.0), e.phase))
    }

    /// Progress of an item, or `None` if it is not in the render set.
    pub fn progress_of(&self, item: &T) -> Option<f64> {
        self.find(item).map(|e| e.progress.value().clamp(0.0, 1.0))
    }

    /// Phase of an item, or `None` if it is not in the render set.
    pub fn phase_of(&self, item: &T) -> Option<Phase> {
        self.find(item).map(|e| e.phase)
    }

    /// Value range of the render set.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.range
    }

    /// The last snapshot pushed with [`DatasetHolder::set_target`].
    pub fn target(&self) -> &[T] {
        &self.target
    }

    /// Returns `true` while any item is entering or exiting.
    pub fn is_animating(&self) -> bool {
        self.entries.iter().any(|e| e.progress.is_running())
    }

    /// Returns `true` if nothing is on screen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, item: &T) -> Option<&Entry<T>> {
        self.entries.iter().find(|e| &e.item == item)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::animation::Easing;

    #[derive(Clone, Debug, PartialEq)]
    struct S(&'static str, f64, f64);

    impl Extent for S {
        fn extent(&self) -> Option<(f64, f64)> {
            Some((self.1, self.2))
        }
    }

    const A: S = S("a", 10.0, 20.0);
    const B: S = S("b", 0.0, 50.0);

    fn spec() -> AnimationSpec {
        AnimationSpec::new(100.0, Easing::Linear)
    }

    #[test]
    fn reconcile_is_idempotent() {
        let s = [A, B];
        let r = reconcile(&s, &s);
        assert_eq!(r.render_set, s);
        assert!(r.is_unchanged());
    }

    #[test]
    fn reconcile_marks_additions_and_removals() {
        let r = reconcile(&[A], &[A, B]);
        assert_eq!(r.render_set, [A, B]);
        assert_eq!(r.entering, [1]);
        assert!(r.exiting.is_empty());

        let r = reconcile(&[A, B], &[A]);
        assert_eq!(r.render_set, [A, B]);
        assert_eq!(r.exiting, [1]);
        assert!(r.entering.is_empty());
    }

    #[test]
    fn reconcile_collapses_duplicates() {
        let r = reconcile(&[], &[A, A]);
        assert_eq!(r.render_set, [A]);
    }

    #[test]
    fn removed_series_is_purged_only_at_zero() {
        let mut h = DatasetHolder::new(spec());
        h.set_target(&[A, B]);
        h.tick(100.0);
        assert_eq!(h.phase_of(&B), Some(Phase::Steady));

        h.set_target(&[A]);
        assert_eq!(h.phase_of(&B), Some(Phase::Exiting));
        h.tick(50.0);
        assert_eq!(h.progress_of(&B), Some(0.5));
        assert_eq!(h.render_set().len(), 2);

        h.tick(50.0);
        assert_eq!(h.progress_of(&B), None);
        assert_eq!(h.render_set(), [&A]);
    }

    #[test]
    fn identical_snapshot_does_not_restart() {
        let mut h = DatasetHolder::new(spec());
        assert!(h.set_target(&[A]));
        h.tick(40.0);
        assert!(!h.set_target(&[A]));
        h.tick(10.0);
        assert_eq!(h.progress_of(&A), Some(0.5));
    }

    #[test]
    fn change_while_entering_restarts_from_zero() {
        let mut h = DatasetHolder::new(spec());
        h.set_target(&[A]);
        h.tick(60.0);
        h.set_target(&[A, B]);
        assert_eq!(h.progress_of(&A), Some(0.0));
        assert_eq!(h.phase_of(&A), Some(Phase::Entering));
        assert_eq!(h.progress_of(&B), Some(0.0));
    }

    #[test]
    fn instant_spec_settles_in_set_target() {
        let mut h = DatasetHolder::new(AnimationSpec::immediate());
        h.set_target(&[A, B]);
        assert_eq!(h.progress_of(&A), Some(1.0));
        assert_eq!(h.phase_of(&A), Some(Phase::Steady));
        h.set_target(&[A]);
        assert_eq!(h.render_set(), [&A]);
    }

    #[test]
    fn range_grows_on_add_and_shrinks_on_purge() {
        let mut h = DatasetHolder::new(spec());
        h.set_target(&[A]);
        assert_eq!(h.value_range(), Some((10.0, 20.0)));
        h.set_target(&[A, B]);
        assert_eq!(h.value_range(), Some((0.0, 50.0)));

        // Removal alone does not shrink the range...
        h.set_target(&[A]);
        assert_eq!(h.value_range(), Some((0.0, 50.0)));
        // ...the purge does.
        h.tick(100.0);
        assert_eq!(h.value_range(), Some((10.0, 20.0)));

        h.set_target(&[]);
        h.tick(100.0);
        assert!(h.is_empty());
        assert_eq!(h.value_range(), None);
    }

    #[test]
    fn exiting_series_can_come_back() {
        let mut h = DatasetHolder::new(spec());
        h.set_target(&[A]);
        h.tick(100.0);
        h.set_target(&[]);
        h.tick(30.0);
        h.set_target(&[A]);
        assert_eq!(h.phase_of(&A), Some(Phase::Entering));
        h.tick(30.0);
        assert!(h.progress_of(&A).unwrap_or_default() > 0.7);
        assert_eq!(h.render_set(), vec![&A]);
    }
}

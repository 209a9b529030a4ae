//! Keeps the sparse run collection in step with the string configuration.
//!
//! Rows are derived at read time: [`list_active_keys`] gives the MPPT indices
//! that need a run, [`CablingRuns::resolve`] fills the gaps with transient
//! defaults, and only an edit ([`CablingRuns::upsert`]) stores a record.

use crate::run::{CablingRun, DEFAULT_LENGTH_M, DEFAULT_SECTION_MM2, MpptIndex};
use crate::section::CableSection;
use crate::store::CablingRuns;
use pv_core::Real;
use std::collections::BTreeSet;

/// Anything in the string configuration that declares which MPPT it feeds.
pub trait StringAssignment {
    fn mppt_index(&self) -> MpptIndex;
}

impl StringAssignment for MpptIndex {
    fn mppt_index(&self) -> MpptIndex {
        *self
    }
}

/// MPPT indices start at 1; index 0 (never assigned) counts as MPPT 1.
pub fn normalize_key(mppt_index: MpptIndex) -> MpptIndex {
    mppt_index.max(1)
}

/// Distinct MPPT indices used by `strings`, ascending.
pub fn list_active_keys<S: StringAssignment>(strings: &[S]) -> Vec<MpptIndex> {
    strings
        .iter()
        .map(|s| normalize_key(s.mppt_index()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Partial edit of a run. `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunPatch {
    pub length_m: Option<Real>,
    pub section_mm2: Option<Real>,
}

impl RunPatch {
    pub fn length(length_m: Real) -> Self {
        Self {
            length_m: Some(length_m),
            section_mm2: None,
        }
    }

    pub fn section_mm2(section_mm2: Real) -> Self {
        Self {
            length_m: None,
            section_mm2: Some(section_mm2),
        }
    }

    pub fn section(section: CableSection) -> Self {
        Self::section_mm2(section.mm2())
    }

    pub fn with_length(mut self, length_m: Real) -> Self {
        self.length_m = Some(length_m);
        self
    }

    pub fn with_section_mm2(mut self, section_mm2: Real) -> Self {
        self.section_mm2 = Some(section_mm2);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.length_m.is_none() && self.section_mm2.is_none()
    }

    /// Replaces values the evaluator cannot use: a non-finite length becomes 0,
    /// a negative one is clamped to 0 and a non-finite section becomes 4 mm².
    fn sanitized(self, mppt_index: MpptIndex) -> Self {
        let length_m = self.length_m.map(|v| {
            if !v.is_finite() {
                tracing::warn!(mppt_index, value = v, "non-finite cable length, using 0 m");
                DEFAULT_LENGTH_M
            } else if v < 0.0 {
                tracing::warn!(mppt_index, value = v, "negative cable length, using 0 m");
                DEFAULT_LENGTH_M
            } else {
                v
            }
        });
        let section_mm2 = self.section_mm2.map(|v| {
            if v.is_finite() {
                v
            } else {
                tracing::warn!(mppt_index, value = v, "non-finite cable section, using 4 mm²");
                DEFAULT_SECTION_MM2
            }
        });
        Self {
            length_m,
            section_mm2,
        }
    }
}

impl CablingRuns {
    /// Stored run for `mppt_index`, or the unconfigured default. Never stores.
    pub fn resolve(&self, mppt_index: MpptIndex) -> CablingRun {
        let mppt_index = normalize_key(mppt_index);
        self.find(mppt_index)
            .copied()
            .unwrap_or_else(|| CablingRun::unconfigured(mppt_index))
    }

    /// Returns a new collection where `mppt_index` maps to the resolved run
    /// merged with `patch`. The merged run is moved to the end; `self` is left
    /// untouched.
    pub fn upsert(&self, mppt_index: MpptIndex, patch: RunPatch) -> CablingRuns {
        let mppt_index = normalize_key(mppt_index);
        let patch = patch.sanitized(mppt_index);
        let current = self.resolve(mppt_index);
        let merged = CablingRun {
            mppt_index,
            length_m: patch.length_m.unwrap_or(current.length_m),
            section_mm2: patch.section_mm2.unwrap_or(current.section_mm2),
        };

        if self.find(mppt_index).is_none() {
            tracing::debug!(mppt_index, "materializing cable run");
        }
        tracing::debug!(
            mppt_index,
            length_m = merged.length_m,
            section_mm2 = merged.section_mm2,
            "upsert cable run"
        );

        let mut runs: Vec<CablingRun> = self
            .runs
            .iter()
            .filter(|r| r.mppt_index != mppt_index)
            .copied()
            .collect();
        runs.push(merged);
        CablingRuns { runs }
    }

    /// Joins the active keys of `strings` with the stored runs, in key order.
    pub fn resolve_active<S: StringAssignment>(&self, strings: &[S]) -> Vec<CablingRun> {
        list_active_keys(strings)
            .into_iter()
            .map(|k| self.resolve(k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_keys_are_sorted_and_deduplicated() {
        let strings: [MpptIndex; 4] = [2, 1, 2, 3];
        assert_eq!(list_active_keys(&strings), vec![1, 2, 3]);
    }

    #[test]
    fn active_keys_treat_unassigned_as_first_mppt() {
        let strings: [MpptIndex; 3] = [0, 2, 1];
        assert_eq!(list_active_keys(&strings), vec![1, 2]);
    }

    #[test]
    fn active_keys_of_no_strings_is_empty() {
        let strings: [MpptIndex; 0] = [];
        assert!(list_active_keys(&strings).is_empty());
    }

    #[test]
    fn zero_key_edits_land_on_first_mppt() {
        let runs = CablingRuns::new().upsert(0, RunPatch::length(25.0));
        assert_eq!(runs.as_slice(), &[CablingRun::new(1, 25.0, 4.0)]);

        let strings: [MpptIndex; 1] = [0];
        assert_eq!(runs.resolve_active(&strings), vec![CablingRun::new(1, 25.0, 4.0)]);
        assert_eq!(runs.resolve(0), CablingRun::new(1, 25.0, 4.0));

        let runs = runs.upsert(1, RunPatch::section_mm2(6.0));
        assert_eq!(runs.as_slice(), &[CablingRun::new(1, 25.0, 6.0)]);
    }

    #[test]
    fn resolve_defaults_when_absent() {
        let runs = CablingRuns::new();
        assert_eq!(runs.resolve(7), CablingRun::new(7, 0.0, 4.0));
        assert!(runs.is_empty());
    }

    #[test]
    fn upsert_does_not_mutate_previous_collection() {
        let before = CablingRuns::new();
        let after = before.upsert(1, RunPatch::length(12.0));
        assert!(before.is_empty());
        assert_eq!(after.as_slice(), &[CablingRun::new(1, 12.0, 4.0)]);
    }

    #[test]
    fn length_then_section_keeps_both() {
        let runs = CablingRuns::new()
            .upsert(2, RunPatch::length(35.0))
            .upsert(2, RunPatch::section(CableSection::S6));
        assert_eq!(runs.as_slice(), &[CablingRun::new(2, 35.0, 6.0)]);
    }

    #[test]
    fn section_then_length_keeps_both() {
        let runs = CablingRuns::new()
            .upsert(2, RunPatch::section(CableSection::S6))
            .upsert(2, RunPatch::length(35.0));
        assert_eq!(runs.as_slice(), &[CablingRun::new(2, 35.0, 6.0)]);
    }

    #[test]
    fn upsert_moves_edited_run_to_end() {
        let runs = CablingRuns::new()
            .upsert(1, RunPatch::length(10.0))
            .upsert(2, RunPatch::length(20.0))
            .upsert(1, RunPatch::section_mm2(10.0));
        let keys: Vec<_> = runs.iter().map(|r| r.mppt_index).collect();
        assert_eq!(keys, vec![2, 1]);
        assert_eq!(runs.find(1), Some(&CablingRun::new(1, 10.0, 10.0)));
    }

    #[test]
    fn upsert_is_idempotent() {
        let patch = RunPatch::length(18.0).with_section_mm2(2.5);
        let base = CablingRuns::new().upsert(4, RunPatch::length(3.0));
        let once = base.upsert(1, patch);
        let twice = once.upsert(1, patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_patch_materializes_defaults() {
        let runs = CablingRuns::new().upsert(5, RunPatch::default());
        assert_eq!(runs.as_slice(), &[CablingRun::unconfigured(5)]);
    }

    #[test]
    fn non_finite_input_is_replaced() {
        let runs = CablingRuns::new()
            .upsert(1, RunPatch::length(25.0).with_section_mm2(6.0))
            .upsert(1, RunPatch::length(Real::NAN))
            .upsert(1, RunPatch::section_mm2(Real::INFINITY));
        assert_eq!(runs.find(1), Some(&CablingRun::new(1, 0.0, 4.0)));
    }

    #[test]
    fn negative_length_is_clamped() {
        let runs = CablingRuns::new().upsert(1, RunPatch::length(-5.0));
        assert_eq!(runs.resolve(1).length_m, 0.0);
    }

    #[test]
    fn stale_runs_survive_but_are_not_resolved() {
        let runs = CablingRuns::new()
            .upsert(1, RunPatch::length(10.0))
            .upsert(3, RunPatch::length(40.0));
        let strings: [MpptIndex; 2] = [1, 2];
        let active = runs.resolve_active(&strings);
        assert_eq!(
            active,
            vec![CablingRun::new(1, 10.0, 4.0), CablingRun::unconfigured(2)]
        );
        assert!(runs.find(3).is_some());
    }
}

//! Sparse keyed collection of cable runs.
//!
//! The collection keeps insertion order and holds at most one run per MPPT
//! index as long as every write goes through [`CablingRuns::upsert`]. Entries
//! for MPPT indices no longer used by the string configuration are kept as-is.

use crate::run::{CablingRun, MpptIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CablingRuns {
    pub(crate) runs: Vec<CablingRun>,
}

impl CablingRuns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear scan for the run feeding `mppt_index`.
    pub fn find(&self, mppt_index: MpptIndex) -> Option<&CablingRun> {
        self.runs.iter().find(|r| r.mppt_index == mppt_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CablingRun> {
        self.runs.iter()
    }

    pub fn as_slice(&self) -> &[CablingRun] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// MPPT indices stored more than once, in first-repeat order.
    ///
    /// Only reachable for collections read from disk; upserts never create
    /// duplicates.
    pub fn duplicate_keys(&self) -> Vec<MpptIndex> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for run in &self.runs {
            if !seen.insert(run.mppt_index) && !dupes.contains(&run.mppt_index) {
                dupes.push(run.mppt_index);
            }
        }
        dupes
    }
}

/// Collects runs with upsert semantics: a later record replaces an earlier
/// one with the same key and moves to the end.
impl FromIterator<CablingRun> for CablingRuns {
    fn from_iter<I: IntoIterator<Item = CablingRun>>(iter: I) -> Self {
        let mut runs: Vec<CablingRun> = Vec::new();
        for run in iter {
            runs.retain(|r| r.mppt_index != run.mppt_index);
            runs.push(run);
        }
        Self { runs }
    }
}

impl<'a> IntoIterator for &'a CablingRuns {
    type Item = &'a CablingRun;
    type IntoIter = std::slice::Iter<'a, CablingRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_on_empty_is_none() {
        assert!(CablingRuns::new().find(1).is_none());
    }

    #[test]
    fn find_returns_matching_run() {
        let runs: CablingRuns = [CablingRun::new(1, 10.0, 4.0), CablingRun::new(3, 20.0, 6.0)]
            .into_iter()
            .collect();
        assert_eq!(runs.find(3), Some(&CablingRun::new(3, 20.0, 6.0)));
        assert!(runs.find(2).is_none());
    }

    #[test]
    fn collect_keeps_last_record_per_key() {
        let runs: CablingRuns = [
            CablingRun::new(1, 10.0, 4.0),
            CablingRun::new(2, 15.0, 4.0),
            CablingRun::new(1, 30.0, 10.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            runs.as_slice(),
            &[CablingRun::new(2, 15.0, 4.0), CablingRun::new(1, 30.0, 10.0)]
        );
        assert!(runs.duplicate_keys().is_empty());
    }

    #[test]
    fn duplicates_from_raw_input_are_reported() {
        let runs: CablingRuns = serde_json::from_str(
            r#"[
                { "mpptIndex": 1, "lengthM": 5 },
                { "mpptIndex": 2 },
                { "mpptIndex": 1, "lengthM": 8 },
                { "mpptIndex": 1 }
            ]"#,
        )
        .unwrap();
        assert_eq!(runs.len(), 4);
        assert_eq!(runs.duplicate_keys(), vec![1]);
        assert_eq!(runs.find(1).map(|r| r.length_m), Some(5.0));
    }

    #[test]
    fn serializes_as_plain_sequence() {
        let runs: CablingRuns = [CablingRun::new(2, 12.0, 6.0)].into_iter().collect();
        let json = serde_json::to_string(&runs).unwrap();
        assert_eq!(json, r#"[{"mpptIndex":2,"lengthM":12.0,"sectionMm2":6.0}]"#);
    }
}

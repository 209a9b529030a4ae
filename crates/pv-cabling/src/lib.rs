//! pv-cabling: DC cable runs per MPPT and their voltage drop.
//!
//! Contains:
//! - run (the `CablingRun` record and its defaults)
//! - section (standard conductor sections + section recommendation)
//! - store (sparse keyed run collection, lookup)
//! - sync (active MPPT keys, lazy resolution, key-preserving upsert)
//! - voltage_drop (voltage-drop evaluator and threshold policies)
//! - report (read-time join of keys, runs and per-MPPT analysis)
//! - format (shared display rules for every report surface)

pub mod format;
pub mod report;
pub mod run;
pub mod section;
pub mod store;
pub mod sync;
pub mod voltage_drop;

pub use report::{DropRow, MpptElectrical, report_rows, worst_severity};
pub use run::{CablingRun, DEFAULT_LENGTH_M, DEFAULT_SECTION_MM2, MpptIndex};
pub use section::{CableSection, recommend_section};
pub use store::CablingRuns;
pub use sync::{RunPatch, StringAssignment, list_active_keys, normalize_key};
pub use voltage_drop::{
    DropInputs, Severity, ThresholdPolicy, VoltageDrop, evaluate, evaluate_with,
};

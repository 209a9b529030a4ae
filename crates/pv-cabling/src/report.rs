//! Read-time join feeding the editor, the audit table and the exported report.

use crate::run::{CablingRun, MpptIndex};
use crate::store::CablingRuns;
use crate::sync::StringAssignment;
use crate::voltage_drop::{DropInputs, Severity, ThresholdPolicy, VoltageDrop, evaluate_with};
use pv_core::Real;
use serde::Serialize;

/// Per-MPPT electrical values computed by the string analysis.
pub trait MpptElectrical {
    fn mppt_index(&self) -> MpptIndex;
    /// Worst-case design current (A).
    fn current_a(&self) -> Real;
    /// Hot-condition operating voltage (V).
    fn reference_voltage_v(&self) -> Real;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropRow {
    pub mppt_index: MpptIndex,
    pub run: CablingRun,
    pub current_a: Real,
    pub reference_voltage_v: Real,
    /// False when the analysis has no entry for this MPPT.
    pub has_analysis: bool,
    pub drop: VoltageDrop,
}

/// One row per active MPPT of `strings`, ascending.
///
/// Runs are resolved lazily; nothing is written back to `runs`.
pub fn report_rows<S, E>(
    strings: &[S],
    runs: &CablingRuns,
    analysis: &[E],
    policy: &ThresholdPolicy,
) -> Vec<DropRow>
where
    S: StringAssignment,
    E: MpptElectrical,
{
    runs.resolve_active(strings)
        .into_iter()
        .map(|run| {
            let electrical = analysis.iter().find(|a| a.mppt_index() == run.mppt_index);
            let (current_a, reference_voltage_v) = electrical
                .map(|a| (a.current_a(), a.reference_voltage_v()))
                .unwrap_or((0.0, 0.0));
            let drop = evaluate_with(
                DropInputs::for_run(&run, current_a, reference_voltage_v),
                policy,
            );
            DropRow {
                mppt_index: run.mppt_index,
                run,
                current_a,
                reference_voltage_v,
                has_analysis: electrical.is_some(),
                drop,
            }
        })
        .collect()
}

/// Highest severity among configured rows; `None` if no row is configured.
pub fn worst_severity(rows: &[DropRow]) -> Option<Severity> {
    rows.iter()
        .map(|r| r.drop.severity)
        .filter(|s| !s.is_missing())
        .max()
}

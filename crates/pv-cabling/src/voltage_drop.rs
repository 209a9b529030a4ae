//! DC voltage drop over a string cable run.
//!
//! The drop is taken over the round trip (2 × one-way length) with copper
//! resistivity ρ = 0.023 Ω·mm²/m:
//!
//! ```text
//! ΔU   = 2 · L · I · ρ / S
//! ΔU % = ΔU / V_ref · 100
//! ```
//!
//! Every report surface must call [`evaluate`] (or [`evaluate_with`]) rather
//! than recomputing the formula, so the same inputs always give the same row.

use crate::run::CablingRun;
use pv_core::constants::COPPER_RESISTIVITY_OHM_MM2_PER_M;
use pv_core::{Area, Current, Length, Real, Voltage, finite_or, guarded_div};
use serde::{Deserialize, Serialize};

/// How a drop percentage is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Length or section not entered yet.
    Missing,
    Ok,
    Warn,
    Fail,
}

impl Severity {
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Maps a drop percentage of a configured run to a [`Severity`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// `pct <= ok_max_pct` is ok, `pct <= warn_max_pct` is warn, above is fail.
    TwoTier { ok_max_pct: Real, warn_max_pct: Real },
    /// `pct <= max_pct` is ok, above is fail.
    SingleCutoff { max_pct: Real },
}

impl ThresholdPolicy {
    /// Design target of 1 %, hard limit of 3 %.
    pub const CANONICAL: Self = Self::TwoTier {
        ok_max_pct: 1.0,
        warn_max_pct: 3.0,
    };

    pub const fn single_cutoff(max_pct: Real) -> Self {
        Self::SingleCutoff { max_pct }
    }

    pub fn classify(&self, drop_pct: Real) -> Severity {
        match *self {
            Self::TwoTier {
                ok_max_pct,
                warn_max_pct,
            } => {
                if drop_pct <= ok_max_pct {
                    Severity::Ok
                } else if drop_pct <= warn_max_pct {
                    Severity::Warn
                } else {
                    Severity::Fail
                }
            }
            Self::SingleCutoff { max_pct } => {
                if drop_pct <= max_pct {
                    Severity::Ok
                } else {
                    Severity::Fail
                }
            }
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// The four values a drop depends on, in display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropInputs {
    /// One-way cable length (m)
    pub length_m: Real,
    /// Conductor section (mm²)
    pub section_mm2: Real,
    /// Worst-case string current (A)
    pub current_a: Real,
    /// Hot-condition operating voltage (V)
    pub reference_voltage_v: Real,
}

impl DropInputs {
    pub fn new(
        length_m: Real,
        section_mm2: Real,
        current_a: Real,
        reference_voltage_v: Real,
    ) -> Self {
        Self {
            length_m,
            section_mm2,
            current_a,
            reference_voltage_v,
        }
    }

    pub fn for_run(run: &CablingRun, current_a: Real, reference_voltage_v: Real) -> Self {
        Self::new(run.length_m, run.section_mm2, current_a, reference_voltage_v)
    }

    pub fn from_quantities(
        length: Length,
        section: Area,
        current: Current,
        voltage: Voltage,
    ) -> Self {
        Self::new(
            pv_core::in_m(length),
            pv_core::in_mm2(section),
            pv_core::in_amps(current),
            pv_core::in_volts(voltage),
        )
    }

    fn sanitized(self) -> Self {
        Self {
            length_m: finite_or(self.length_m, 0.0),
            section_mm2: finite_or(self.section_mm2, 0.0),
            current_a: finite_or(self.current_a, 0.0),
            reference_voltage_v: finite_or(self.reference_voltage_v, 0.0),
        }
    }

    fn is_configured(&self) -> bool {
        self.length_m > 0.0 && self.section_mm2 > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoltageDrop {
    pub drop_v: Real,
    pub drop_pct: Real,
    pub severity: Severity,
}

impl VoltageDrop {
    pub const MISSING: Self = Self {
        drop_v: 0.0,
        drop_pct: 0.0,
        severity: Severity::Missing,
    };
}

/// Drop in volts over the round trip. 0 when the section is not positive.
pub fn drop_volts(length_m: Real, section_mm2: Real, current_a: Real) -> Real {
    let num = 2.0
        * finite_or(length_m, 0.0)
        * finite_or(current_a, 0.0)
        * COPPER_RESISTIVITY_OHM_MM2_PER_M;
    guarded_div(num, section_mm2)
}

/// Drop as a percentage of `reference_voltage_v`. 0 when the voltage is not positive.
pub fn drop_percent(drop_v: Real, reference_voltage_v: Real) -> Real {
    finite_or(guarded_div(drop_v, reference_voltage_v) * 100.0, 0.0)
}

/// Evaluates with [`ThresholdPolicy::CANONICAL`].
pub fn evaluate(inputs: DropInputs) -> VoltageDrop {
    evaluate_with(inputs, &ThresholdPolicy::CANONICAL)
}

pub fn evaluate_with(inputs: DropInputs, policy: &ThresholdPolicy) -> VoltageDrop {
    let inputs = inputs.sanitized();
    if !inputs.is_configured() {
        return VoltageDrop::MISSING;
    }
    let drop_v = drop_volts(inputs.length_m, inputs.section_mm2, inputs.current_a);
    let drop_pct = drop_percent(drop_v, inputs.reference_voltage_v);
    VoltageDrop {
        drop_v,
        drop_pct,
        severity: policy.classify(drop_pct),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn output_is_always_finite(
            l in prop::num::f64::ANY,
            s in prop::num::f64::ANY,
            i in prop::num::f64::ANY,
            v in prop::num::f64::ANY,
        ) {
            let d = evaluate(DropInputs::new(l, s, i, v));
            prop_assert!(d.drop_v.is_finite());
            prop_assert!(d.drop_pct.is_finite());
        }

        #[test]
        fn longer_run_never_improves_severity(
            l in 0.1_f64..200.0,
            extra in 0.0_f64..200.0,
            i in 0.0_f64..20.0,
            v in 100.0_f64..1000.0,
        ) {
            let short = evaluate(DropInputs::new(l, 4.0, i, v));
            let long = evaluate(DropInputs::new(l + extra, 4.0, i, v));
            prop_assert!(long.severity >= short.severity);
        }
    }
}

//! Standard DC conductor sections.

use crate::voltage_drop::{drop_percent, drop_volts};
use pv_core::{PvError, PvResult, Real};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conductor sections offered for PV string cabling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum CableSection {
    #[serde(rename = "2.5")]
    S2_5,
    #[default]
    #[serde(rename = "4")]
    S4,
    #[serde(rename = "6")]
    S6,
    #[serde(rename = "10")]
    S10,
}

impl CableSection {
    /// All sections, smallest first.
    pub const ALL: [CableSection; 4] = [Self::S2_5, Self::S4, Self::S6, Self::S10];

    pub fn mm2(self) -> Real {
        match self {
            Self::S2_5 => 2.5,
            Self::S4 => 4.0,
            Self::S6 => 6.0,
            Self::S10 => 10.0,
        }
    }

    /// Exact match against the catalogue.
    pub fn try_from_mm2(mm2: Real) -> PvResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.mm2() == mm2)
            .ok_or(PvError::InvalidArg {
                what: "cable section (mm²)",
                value: mm2,
            })
    }

    pub fn is_standard(mm2: Real) -> bool {
        Self::try_from_mm2(mm2).is_ok()
    }
}

impl fmt::Display for CableSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm²", self.mm2())
    }
}

/// Smallest standard section keeping the drop at or below `target_pct`.
///
/// Returns `None` when even 10 mm² is not enough, or when the length or the
/// reference voltage leave nothing to size against.
pub fn recommend_section(
    length_m: Real,
    current_a: Real,
    reference_voltage_v: Real,
    target_pct: Real,
) -> Option<CableSection> {
    let sizable = length_m > 0.0 && reference_voltage_v > 0.0 && target_pct.is_finite();
    if !sizable {
        return None;
    }
    CableSection::ALL.into_iter().find(|s| {
        let pct = drop_percent(drop_volts(length_m, s.mm2(), current_a), reference_voltage_v);
        pct <= target_pct
    })
}

//! The per-MPPT cable run record.

use pv_core::Real;
use serde::{Deserialize, Serialize};

/// MPPT input number as declared by the string configuration (1-based).
pub type MpptIndex = u32;

/// Length of a run that has not been configured yet.
pub const DEFAULT_LENGTH_M: Real = 0.0;

/// Conductor section assumed until the user picks one.
pub const DEFAULT_SECTION_MM2: Real = 4.0;

/// One DC cable segment from a string group to the DC box / inverter input.
///
/// Serialized as `{mpptIndex, lengthM, sectionMm2}`. Missing `lengthM` reads
/// back as 0 and missing `sectionMm2` as 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CablingRun {
    pub mppt_index: MpptIndex,
    /// One-way length in meters.
    #[serde(default = "default_length_m")]
    pub length_m: Real,
    /// Conductor cross-section in mm².
    #[serde(default = "default_section_mm2")]
    pub section_mm2: Real,
}

fn default_length_m() -> Real {
    DEFAULT_LENGTH_M
}

fn default_section_mm2() -> Real {
    DEFAULT_SECTION_MM2
}

impl CablingRun {
    pub fn new(mppt_index: MpptIndex, length_m: Real, section_mm2: Real) -> Self {
        Self {
            mppt_index,
            length_m,
            section_mm2,
        }
    }

    /// Transient record shown for an MPPT that has no stored run.
    pub fn unconfigured(mppt_index: MpptIndex) -> Self {
        Self::new(mppt_index, DEFAULT_LENGTH_M, DEFAULT_SECTION_MM2)
    }

    /// A run needs both a length and a section before a drop can be computed.
    pub fn is_configured(&self) -> bool {
        self.length_m > 0.0 && self.section_mm2 > 0.0
    }
}

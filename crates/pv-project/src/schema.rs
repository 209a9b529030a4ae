//! Project schema definitions.

use pv_cabling::{
    CablingRuns, MpptElectrical, MpptIndex, RunPatch, StringAssignment, ThresholdPolicy,
};
use pv_core::Real;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub inverter_config: InverterConfig,
    #[serde(default)]
    pub report: ReportSettings,
}

impl Project {
    /// Copy of the project with one cable run edited.
    ///
    /// Callers replace their whole project with the returned value; the
    /// receiver is left as it was.
    pub fn with_cabling_edit(&self, mppt_index: MpptIndex, patch: RunPatch) -> Project {
        let mut next = self.clone();
        next.inverter_config.dc_cabling_runs = self
            .inverter_config
            .dc_cabling_runs
            .upsert(mppt_index, patch);
        next
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InverterConfig {
    #[serde(default)]
    pub brand: InverterBrand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub configured_strings: Vec<ConfiguredString>,
    /// DC runs from string groups to the DC box / inverter, keyed by MPPT.
    #[serde(default)]
    pub dc_cabling_runs: CablingRuns,
}

impl InverterConfig {
    /// Micro-inverter systems and projects without an inverter have no DC
    /// string cabling to size.
    pub fn uses_dc_cabling(&self) -> bool {
        !matches!(self.brand, InverterBrand::None) && !self.brand.is_micro()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum InverterBrand {
    #[default]
    None,
    Enphase,
    #[serde(rename = "APSystems")]
    ApSystems,
    #[serde(rename = "FoxESS")]
    FoxEss,
    Custom,
}

impl InverterBrand {
    pub fn is_micro(self) -> bool {
        matches!(self, Self::Enphase | Self::ApSystems)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfiguredString {
    pub id: String,
    #[serde(default, alias = "fieldId")]
    pub field_id: String,
    #[serde(alias = "panelCount")]
    pub panel_count: u32,
    #[serde(default = "default_mppt_index", alias = "mpptIndex")]
    pub mppt_index: MpptIndex,
}

fn default_mppt_index() -> MpptIndex {
    1
}

impl StringAssignment for ConfiguredString {
    fn mppt_index(&self) -> MpptIndex {
        self.mppt_index
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSettings {
    #[serde(default)]
    pub threshold_policy: ThresholdPolicy,
}

/// Per-MPPT result of the string analysis, read from its own file.
///
/// Accepts the analysis engine's camelCase keys as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MpptAnalysis {
    #[serde(alias = "mpptIndex")]
    pub mppt_index: MpptIndex,
    #[serde(default)]
    pub composition: String,
    #[serde(default, alias = "totalPanelCount")]
    pub total_panel_count: u32,
    #[serde(default, alias = "vocCold")]
    pub voc_cold: Real,
    /// Operating voltage at maximum cell temperature (V)
    #[serde(alias = "vmpHot")]
    pub vmp_hot: Real,
    #[serde(default, alias = "iscMax")]
    pub isc_max: Real,
    /// Design current, Isc × 1.25 (A)
    #[serde(alias = "iscCalculation")]
    pub isc_calculation: Real,
}

impl MpptElectrical for MpptAnalysis {
    fn mppt_index(&self) -> MpptIndex {
        self.mppt_index
    }

    fn current_a(&self) -> Real {
        self.isc_calculation
    }

    fn reference_voltage_v(&self) -> Real {
        self.vmp_hot
    }
}

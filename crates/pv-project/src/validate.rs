//! Project validation logic.

use crate::schema::{InverterConfig, Project};
use pv_cabling::CableSection;
use pv_core::ensure_finite;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_strings(&project.inverter_config)?;
    validate_cabling_runs(&project.inverter_config)?;

    Ok(())
}

fn validate_strings(config: &InverterConfig) -> Result<(), ValidationError> {
    let mut string_ids = HashSet::new();
    for string in &config.configured_strings {
        if !string_ids.insert(&string.id) {
            return Err(ValidationError::DuplicateId {
                id: string.id.clone(),
                context: "configured_strings".to_string(),
            });
        }
        if string.mppt_index == 0 {
            return Err(ValidationError::InvalidValue {
                field: format!("configured_strings[{}].mppt_index", string.id),
                value: "0".to_string(),
                reason: "MPPT indices start at 1".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_cabling_runs(config: &InverterConfig) -> Result<(), ValidationError> {
    let runs = &config.dc_cabling_runs;
    if let Some(dup) = runs.duplicate_keys().first() {
        return Err(ValidationError::DuplicateId {
            id: dup.to_string(),
            context: "dc_cabling_runs mpptIndex".to_string(),
        });
    }

    for run in runs {
        let field = |name: &str| format!("dc_cabling_runs[mppt {}].{}", run.mppt_index, name);

        if run.mppt_index == 0 {
            return Err(ValidationError::InvalidValue {
                field: field("mpptIndex"),
                value: "0".to_string(),
                reason: "MPPT indices start at 1".to_string(),
            });
        }
        let length_m = ensure_finite(run.length_m, "lengthM").map_err(|e| {
            ValidationError::InvalidValue {
                field: field("lengthM"),
                value: run.length_m.to_string(),
                reason: e.to_string(),
            }
        })?;
        if length_m < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: field("lengthM"),
                value: length_m.to_string(),
                reason: "must be a non-negative length".to_string(),
            });
        }
        let section_mm2 = ensure_finite(run.section_mm2, "sectionMm2").map_err(|e| {
            ValidationError::InvalidValue {
                field: field("sectionMm2"),
                value: run.section_mm2.to_string(),
                reason: e.to_string(),
            }
        })?;
        if section_mm2 <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: field("sectionMm2"),
                value: section_mm2.to_string(),
                reason: "must be a positive section".to_string(),
            });
        }
        if !CableSection::is_standard(section_mm2) {
            tracing::warn!(
                mppt_index = run.mppt_index,
                section_mm2 = run.section_mm2,
                "cable section is not one of 2.5 / 4 / 6 / 10 mm²"
            );
        }
    }
    Ok(())
}

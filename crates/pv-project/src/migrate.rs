//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        1 => migrate_v1_to_v2(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// v0 files predate the DC run collection; serde defaults already fill it.
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    project.version = 1;
    Ok(project)
}

/// Unassigned strings move to MPPT 1 and repeated runs collapse to the last
/// record per MPPT.
fn migrate_v1_to_v2(mut project: Project) -> Result<Project, ProjectError> {
    let config = &mut project.inverter_config;

    for string in &mut config.configured_strings {
        if string.mppt_index == 0 {
            string.mppt_index = 1;
        }
    }

    let dupes = config.dc_cabling_runs.duplicate_keys();
    if !dupes.is_empty() {
        tracing::debug!(?dupes, "collapsing duplicate cable runs");
        config.dc_cabling_runs = config.dc_cabling_runs.iter().copied().collect();
    }

    project.version = 2;
    Ok(project)
}

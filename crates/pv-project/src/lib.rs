//! pv-project: installation project file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unsupported file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ProjectResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Loads a YAML or JSON project, picked by file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    match format_of(path)? {
        Format::Yaml => load_yaml(path),
        Format::Json => load_json(path),
    }
}

pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    match format_of(path)? {
        Format::Yaml => save_yaml(path, project),
        Format::Json => save_json(path, project),
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let mut project: Project = serde_yaml::from_str(&content)?;
    project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let mut project: Project = serde_json::from_str(&content)?;
    project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Reads the per-MPPT string analysis (a plain list of records).
pub fn load_analysis(path: &Path) -> ProjectResult<Vec<MpptAnalysis>> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    let analysis = match format {
        Format::Yaml => serde_yaml::from_str(&content)?,
        Format::Json => serde_json::from_str(&content)?,
    };
    Ok(analysis)
}

//! rg-config: run-file format and validation.
//!
//! A run file names one gas, the models to try on it and the states to
//! evaluate. Files are YAML or JSON and are validated on load and on save.

pub mod convert;
pub mod schema;
pub mod validate;

pub use convert::DEFAULT_STATE;
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_run_file};

use std::path::Path;
use tracing::debug;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model error: {0}")]
    Eos(#[from] rg_eos::EosError),

    #[error("Unit error: {0}")]
    Unit(#[from] rg_eos::UnitError),

    #[error("Sweep error: {0}")]
    Sweep(#[from] rg_eos::SweepDefinitionError),

    #[error("Unsupported file extension: {0}")]
    Extension(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ConfigResult<RunFile> {
    let run: RunFile = serde_yaml::from_str(content)?;
    validate_run_file(&run)?;
    Ok(run)
}

pub fn from_json_str(content: &str) -> ConfigResult<RunFile> {
    let run: RunFile = serde_json::from_str(content)?;
    validate_run_file(&run)?;
    Ok(run)
}

pub fn load_yaml(path: &Path) -> ConfigResult<RunFile> {
    debug!(path = %path.display(), "loading run file");
    from_yaml_str(&std::fs::read_to_string(path)?)
}

pub fn save_yaml(path: &Path, run: &RunFile) -> ConfigResult<()> {
    validate_run_file(run)?;
    let content = serde_yaml::to_string(run)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ConfigResult<RunFile> {
    debug!(path = %path.display(), "loading run file");
    from_json_str(&std::fs::read_to_string(path)?)
}

pub fn save_json(path: &Path, run: &RunFile) -> ConfigResult<()> {
    validate_run_file(run)?;
    let content = serde_json::to_string_pretty(run)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` is JSON, `.yaml`/`.yml` is YAML.
pub fn load(path: &Path) -> ConfigResult<RunFile> {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("json") => load_json(path),
        Some("yaml" | "yml") => load_yaml(path),
        other => Err(ConfigError::Extension(other.unwrap_or("").to_string())),
    }
}

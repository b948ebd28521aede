use std::fs;
use std::path::Path;

use nrz_core::{ErrorInfo, NrzError, RandomizationConfig};

use crate::serde::from_json_slice;

/// Decodes a config from JSON, applying field defaults.
pub fn config_from_json_slice(data: &[u8]) -> Result<RandomizationConfig, NrzError> {
    from_json_slice(data)
}

/// Decodes a config from YAML, applying field defaults.
pub fn config_from_yaml_slice(data: &[u8]) -> Result<RandomizationConfig, NrzError> {
    serde_yaml::from_slice(data).map_err(|err| NrzError::serde("yaml-deserialize", err))
}

/// Loads a config file, picking the decoder from the extension.
pub fn load_config(path: &Path) -> Result<RandomizationConfig, NrzError> {
    let bytes = fs::read(path).map_err(|err| {
        NrzError::Serde(
            ErrorInfo::new("config-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("json") => config_from_json_slice(&bytes),
        Some("yaml") | Some("yml") => config_from_yaml_slice(&bytes),
        _ => Err(NrzError::Serde(
            ErrorInfo::new("config-format", "unsupported config file extension")
                .with_context("path", path.display().to_string())
                .with_hint("use .json, .yaml or .yml"),
        )),
    }
}

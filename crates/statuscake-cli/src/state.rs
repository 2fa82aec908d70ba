//! Configuration and state files.
//!
//! A configuration file is a flat JSON object of resource attributes. A state
//! file is a serialized [`ResourceData`]: the test id plus the attributes
//! last read from StatusCake.

use anyhow::{Context, Result};
use serde_json::Value;
use statuscake_core::ResourceData;
use std::path::Path;

/// Load a configuration file into an attribute bag without an id.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a JSON object.
pub fn load_config(path: &Path) -> Result<ResourceData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;

    match value {
        Value::Object(attributes) => Ok(ResourceData::from_attributes(attributes)),
        _ => anyhow::bail!("Config file {} must contain a JSON object", path.display()),
    }
}

/// Load a state file. A missing file is an empty state.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or decoded, including
/// when it holds a malformed id.
pub fn load(path: &Path) -> Result<ResourceData> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No state file, starting empty");
        return Ok(ResourceData::new());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid state file {}", path.display()))
}

/// Write a state file, replacing any previous content.
///
/// The new state is written next to the target and renamed into place so a
/// failed write never leaves a truncated file.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn save(path: &Path, data: &ResourceData) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to encode state")?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, json + "\n")
        .with_context(|| format!("Failed to write {}", Path::new(&tmp).display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace state file {}", path.display()))?;

    tracing::debug!(path = %path.display(), id = ?data.id(), "State saved");
    Ok(())
}

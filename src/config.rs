use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level nemfile configuration.
///
/// Everything is optional; CLI flags override config values field by
/// field.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct NemfileConfig {
    /// Metering point identifier.
    #[serde(default)]
    pub nmi: Option<String>,

    /// Receiving participant code.
    #[serde(default)]
    pub to_participant: Option<String>,

    /// Sending participant code.
    #[serde(default)]
    pub from_participant: Option<String>,

    /// Meter serial number.
    #[serde(default)]
    pub serial_number: Option<String>,

    /// Unit of measure per register suffix, e.g. `E1 = "kWh"`.
    #[serde(default)]
    pub uoms: HashMap<String, String>,
}

/// Loads the TOML config file, or returns defaults when no path is
/// given.
pub fn load(path: Option<&Path>) -> Result<NemfileConfig> {
    let Some(path) = path else {
        return Ok(NemfileConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}

//! Engine configuration model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchematicError};

/// Tunables for the resolution pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Run the structural validator after substitution.
    pub validate: bool,
    /// Log supplied values that match no declared parameter.
    pub warn_unused_parameters: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate: true,
            warn_unused_parameters: true,
        }
    }
}

impl EngineConfig {
    /// Reads a configuration from a JSON file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| SchematicError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

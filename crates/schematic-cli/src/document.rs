//! Reading and writing schematic documents and parameter files.
//!
//! Files with a `.json` extension use the JSON codec; everything else is
//! read as YAML.

use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use schematic_common::constants::JSON_EXTENSION;
use schematic_common::error::{Result, SchematicError};
use schematic_model::ComponentSchematic;

/// Output encoding of a rendered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// YAML.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SchematicError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a schematic document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub fn load(path: &Path) -> Result<ComponentSchematic> {
    let raw = read(path)?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "loading schematic");
    if is_json(path) {
        Ok(serde_json::from_str(&raw)?)
    } else {
        Ok(serde_yaml::from_str(&raw)?)
    }
}

/// Encodes a schematic document.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn render(schematic: &ComponentSchematic, format: Format) -> Result<String> {
    match format {
        Format::Yaml => Ok(serde_yaml::to_string(schematic)?),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(schematic)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Loads a flat map of parameter values.
///
/// Scalars are converted to the raw strings the engine expects: booleans
/// and numbers as written, null as the empty string. The YAML codec also
/// reads JSON, so one parser covers both.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not decode, or holds
/// a non-scalar value.
pub fn load_params(path: &Path) -> Result<BTreeMap<String, String>> {
    let raw = read(path)?;
    let values: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(&raw)?;
    values
        .into_iter()
        .map(|(name, value)| {
            let raw = match value {
                serde_yaml::Value::Null => String::new(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::String(s) => s,
                _ => {
                    return Err(SchematicError::Config {
                        message: format!(
                            "parameter \"{name}\" in {} must be a scalar",
                            path.display()
                        ),
                    });
                }
            };
            Ok((name, raw))
        })
        .collect()
}

//! Parameter table construction.
//!
//! Merges the declared parameters of a template with the raw values a
//! caller supplied, producing an immutable name → typed value table.

use std::collections::{BTreeMap, HashSet};

use schematic_model::{ParamValue, Parameter, ParameterType};

use crate::error::{ResolveError, Result};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The caller supplied it.
    Supplied,
    /// The parameter's declared default.
    Default,
}

/// A typed parameter value together with its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    declared: ParameterType,
    value: ParamValue,
    source: ValueSource,
}

impl ResolvedValue {
    /// The type the parameter was declared with.
    #[must_use]
    pub const fn declared_type(&self) -> ParameterType {
        self.declared
    }

    /// The parsed value.
    #[must_use]
    pub const fn value(&self) -> &ParamValue {
        &self.value
    }

    /// Where the value came from.
    #[must_use]
    pub const fn source(&self) -> ValueSource {
        self.source
    }

    /// The value rendered for a string field.
    #[must_use]
    pub fn render(&self) -> String {
        self.value.to_string()
    }
}

/// Resolved parameters keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    entries: BTreeMap<String, ResolvedValue>,
}

impl ParameterTable {
    /// A table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.entries.get(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Builds the parameter table for a set of declarations and supplied values.
///
/// Supplied names that match no declaration are ignored.
///
/// # Errors
///
/// - [`ResolveError::EmptyParameterName`] or
///   [`ResolveError::DuplicateParameterName`] for malformed declarations.
/// - [`ResolveError::TypeMismatch`] when a supplied value does not parse
///   as the declared type.
/// - [`ResolveError::MissingRequiredParameter`] when a required value is
///   not supplied.
/// - [`ResolveError::InvalidDefault`] when an optional parameter's default
///   does not parse.
pub fn build(declared: &[Parameter], supplied: &BTreeMap<String, String>) -> Result<ParameterTable> {
    tracing::debug!(
        declared = declared.len(),
        supplied = supplied.len(),
        "building parameter table"
    );
    check_names(declared)?;

    let mut entries = BTreeMap::new();
    for param in declared {
        let resolved = resolve_one(param, supplied.get(&param.name))?;
        let _ = entries.insert(param.name.clone(), resolved);
    }

    for name in supplied.keys().filter(|name| !entries.contains_key(*name)) {
        tracing::debug!(parameter = %name, "ignoring undeclared parameter");
    }

    Ok(ParameterTable { entries })
}

fn check_names(declared: &[Parameter]) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, param) in declared.iter().enumerate() {
        if param.name.is_empty() {
            return Err(ResolveError::EmptyParameterName { index });
        }
        if !seen.insert(param.name.as_str()) {
            return Err(ResolveError::DuplicateParameterName {
                name: param.name.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_one(param: &Parameter, supplied: Option<&String>) -> Result<ResolvedValue> {
    let declared = param.parameter_type;
    let (value, source) = match supplied {
        Some(raw) => {
            let value = declared
                .parse(raw)
                .ok_or_else(|| ResolveError::TypeMismatch {
                    subject: format!("parameter \"{}\"", param.name),
                    expected: declared,
                    found: format!("{raw:?}"),
                })?;
            (value, ValueSource::Supplied)
        }
        None if param.required => {
            return Err(ResolveError::MissingRequiredParameter {
                name: param.name.clone(),
            });
        }
        None => {
            let value =
                declared
                    .parse(&param.default)
                    .ok_or_else(|| ResolveError::InvalidDefault {
                        name: param.name.clone(),
                        expected: declared,
                        value: param.default.clone(),
                    })?;
            (value, ValueSource::Default)
        }
    };
    Ok(ResolvedValue {
        declared,
        value,
        source,
    })
}

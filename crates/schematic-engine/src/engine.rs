//! The resolution pipeline.
//!
//! [`Engine`] holds no mutable state: one instance can serve any number
//! of concurrent resolutions.

use std::collections::BTreeMap;

use schematic_common::config::EngineConfig;
use schematic_model::ComponentSpec;

use crate::error::Result;
use crate::params::{self, ParameterTable};
use crate::resolver;
use crate::validator::{self, ValidationError};

/// A concrete spec and the structural violations found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The concrete spec, free of `fromParam` references.
    pub spec: ComponentSpec,
    /// Every violation found. Empty when the spec is valid or validation
    /// is disabled.
    pub violations: Vec<ValidationError>,
}

impl Resolution {
    /// Returns whether no violations were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the spec if it is valid, the violations otherwise.
    ///
    /// # Errors
    ///
    /// Returns the violation list when it is not empty.
    pub fn into_result(self) -> std::result::Result<ComponentSpec, Vec<ValidationError>> {
        if self.violations.is_empty() {
            Ok(self.spec)
        } else {
            Err(self.violations)
        }
    }
}

/// Runs table building, substitution and validation in sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Instantiates `template` with the supplied raw parameter values.
    ///
    /// A template with no `fromParam` references left is already concrete:
    /// its declarations are not checked again, so a resolved spec passes
    /// through unchanged with no values supplied.
    ///
    /// Table building and substitution stop at the first fatal error.
    /// Validation never fails; its findings are returned in
    /// [`Resolution::violations`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`](crate::error::ResolveError) raised
    /// while building the parameter table or substituting references.
    pub fn instantiate(
        &self,
        template: &ComponentSpec,
        supplied: &BTreeMap<String, String>,
    ) -> Result<Resolution> {
        let table = if template.is_concrete() {
            tracing::debug!("template has no references; skipping parameter table");
            ParameterTable::empty()
        } else {
            params::build(&template.parameters, supplied)?
        };

        if self.config.warn_unused_parameters {
            for name in supplied.keys().filter(|name| table.get(name).is_none()) {
                tracing::warn!(parameter = %name, "supplied parameter is not used; ignoring");
            }
        }

        self.apply(template, &table)
    }

    /// Substitutes `template` from an already built table and validates
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`](crate::error::ResolveError) raised
    /// while substituting references.
    pub fn apply(&self, template: &ComponentSpec, table: &ParameterTable) -> Result<Resolution> {
        let spec = resolver::resolve(template, table)?;
        let violations = if self.config.validate {
            validator::validate(&spec)
        } else {
            Vec::new()
        };

        tracing::info!(
            parameters = table.len(),
            violations = violations.len(),
            "component instantiated"
        );
        Ok(Resolution { spec, violations })
    }
}

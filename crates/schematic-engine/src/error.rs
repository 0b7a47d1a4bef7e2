//! Fatal resolution errors.
//!
//! These stop the pipeline at the first occurrence: a template that hits
//! one of them cannot be instantiated at all. Structural problems of an
//! instantiated spec are reported separately as
//! [`ValidationError`](crate::validator::ValidationError)s.

use schematic_model::ParameterType;
use thiserror::Error;

/// Error raised by the parameter table builder or the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Two declared parameters share a name.
    #[error("duplicate parameter name: \"{name}\"")]
    DuplicateParameterName {
        /// The repeated name.
        name: String,
    },

    /// A declared parameter has no name.
    #[error("parameter at index {index} has an empty name")]
    EmptyParameterName {
        /// Position in the declaration list.
        index: usize,
    },

    /// A required parameter was not supplied.
    #[error("missing required parameter: \"{name}\"")]
    MissingRequiredParameter {
        /// The parameter name.
        name: String,
    },

    /// The declared default of an optional parameter does not parse.
    #[error("default {value:?} of parameter \"{name}\" is not a valid {expected}")]
    InvalidDefault {
        /// The parameter name.
        name: String,
        /// The declared type.
        expected: ParameterType,
        /// The raw default.
        value: String,
    },

    /// A `fromParam` names a parameter that is not declared.
    #[error("{field} references undeclared parameter \"{parameter}\"")]
    UnknownParameterReference {
        /// Path of the referencing field.
        field: String,
        /// The referenced name.
        parameter: String,
    },

    /// A value does not fit the type expected where it is used.
    #[error("type mismatch at {subject}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Parameter name or field path.
        subject: String,
        /// Expected type.
        expected: ParameterType,
        /// What was found instead: a type name or the raw value.
        found: String,
    },
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, ResolveError>;

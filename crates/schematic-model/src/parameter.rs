//! Declared parameters, workload settings, and typed parameter values.
//!
//! [`ParameterType`] is a closed set: unknown type strings are rejected
//! when a document is deserialized, and every variant has exactly one
//! parsing rule ([`ParameterType::parse`]) and one rendering rule
//! ([`ParamValue`]'s `Display`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value type of a parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// `true` or `false`.
    Boolean,
    /// Any text. Also the type assumed when a document omits `type`.
    #[default]
    String,
    /// A finite decimal number.
    Number,
    /// The empty value.
    Null,
}

impl ParameterType {
    /// Parses a raw string according to this type.
    ///
    /// Returns `None` when `raw` is not a valid literal of the type:
    /// booleans must be exactly `true` or `false`, numbers must be finite,
    /// and null only accepts the empty string.
    #[must_use]
    pub fn parse(self, raw: &str) -> Option<ParamValue> {
        match self {
            Self::Boolean => match raw {
                "true" => Some(ParamValue::Boolean(true)),
                "false" => Some(ParamValue::Boolean(false)),
                _ => None,
            },
            Self::String => Some(ParamValue::String(raw.to_owned())),
            Self::Number => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(ParamValue::Number),
            Self::Null => raw.is_empty().then_some(ParamValue::Null),
        }
    }

    /// Returns whether a field of this type can hold a value of type `found`.
    ///
    /// String fields accept every type through rendering; all other types
    /// only accept themselves.
    #[must_use]
    pub fn accepts(self, found: Self) -> bool {
        self == Self::String || self == found
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A parsed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A boolean value.
    Boolean(bool),
    /// A string value.
    String(String),
    /// A finite number.
    Number(f64),
    /// The null value.
    Null,
}

impl ParamValue {
    /// Returns the type of this value.
    #[must_use]
    pub const fn kind(&self) -> ParameterType {
        match self {
            Self::Boolean(_) => ParameterType::Boolean,
            Self::String(_) => ParameterType::String,
            Self::Number(_) => ParameterType::Number,
            Self::Null => ParameterType::Null,
        }
    }
}

/// Renders the value as it is written into a string field.
///
/// Numbers use the shortest decimal that round-trips, with integral
/// values printed without a fraction and negative zero printed as `0`.
/// Null renders as the empty string.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Null => Ok(()),
        }
    }
}

/// A named, typed input declared once per schematic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameter {
    /// Unique, non-empty parameter name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Value type.
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Whether callers must supply a value. When set, `default` is ignored.
    pub required: bool,
    /// Raw default used when the parameter is optional and not supplied.
    pub default: String,
}

impl Parameter {
    /// Declares a required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            required: true,
            ..Self::default()
        }
    }

    /// Declares an optional parameter with a raw default.
    #[must_use]
    pub fn optional(
        name: impl Into<String>,
        parameter_type: ParameterType,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            default: default.into(),
            ..Self::default()
        }
    }
}

/// A configuration value attached to the workload type itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkloadSetting {
    /// Setting name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Value type expected by the workload.
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Whether the workload requires this setting.
    pub required: bool,
    /// Literal value, used unless `from_param` names a parameter.
    pub default: String,
    /// Name of the parameter that supplies the value.
    pub from_param: String,
}

/// A field whose value may come from a declared parameter.
///
/// Implemented by every entity that carries a `fromParam` reference.
pub trait Parameterized {
    /// The referenced parameter name, if the reference is set.
    fn reference(&self) -> Option<&str>;

    /// The type the field's value must have.
    fn expected_type(&self) -> ParameterType;

    /// Stores a rendered parameter value as the field's literal and clears
    /// the reference.
    fn bind(&mut self, rendered: String);
}

impl Parameterized for WorkloadSetting {
    fn reference(&self) -> Option<&str> {
        (!self.from_param.is_empty()).then_some(self.from_param.as_str())
    }

    fn expected_type(&self) -> ParameterType {
        self.parameter_type
    }

    fn bind(&mut self, rendered: String) {
        self.default = rendered;
        self.from_param.clear();
    }
}

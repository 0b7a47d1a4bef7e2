//! # schematic-engine
//!
//! Turns a component template plus caller-supplied parameter values into a
//! concrete, validated component.
//!
//! The pipeline has three pure, synchronous stages:
//! - **Params**: builds the resolved parameter table (defaults, required checks).
//! - **Resolver**: substitutes `fromParam` references with table values.
//! - **Validator**: collects every structural violation of the result.
//!
//! [`Engine`](engine::Engine) runs them in order.

pub mod engine;
pub mod error;
pub mod params;
pub mod resolver;
pub mod validator;

pub use engine::{Engine, Resolution};
pub use error::{ResolveError, Result};
pub use params::{ParameterTable, ResolvedValue, ValueSource};
pub use validator::{Rule, ValidationError};

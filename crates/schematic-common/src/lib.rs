//! # schematic-common
//!
//! Shared error definitions, configuration models, and constants used
//! across the schematic workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;

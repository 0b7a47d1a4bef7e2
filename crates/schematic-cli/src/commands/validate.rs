//! `schematic validate`: Check a schematic for structural problems.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::document;
use crate::output::format_violations;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the schematic document (YAML or JSON).
    pub file: PathBuf,
}

/// Executes the `validate` command.
///
/// Runs the structural validator on the document as written, without
/// substituting parameters.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or has violations.
pub fn execute(args: &ValidateArgs) -> anyhow::Result<()> {
    let schematic = document::load(&args.file)
        .with_context(|| format!("loading schematic {}", args.file.display()))?;
    let violations = schematic_engine::validator::validate(&schematic.spec);

    if violations.is_empty() {
        println!("{}: ok", args.file.display());
        return Ok(());
    }

    println!("{}: {} violation(s)", args.file.display(), violations.len());
    print!("{}", format_violations(&violations));
    anyhow::bail!("{} validation error(s)", violations.len())
}

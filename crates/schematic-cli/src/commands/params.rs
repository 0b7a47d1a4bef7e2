//! `schematic params`: List the parameters a schematic declares.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use schematic_model::{ComponentSpec, Parameter};

use crate::document;
use crate::output::format_parameters;

/// Arguments for the `params` command.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Path to the schematic document (YAML or JSON).
    pub file: PathBuf,

    /// Show only this parameter.
    #[arg(long)]
    pub name: Option<String>,
}

fn selected<'a>(spec: &'a ComponentSpec, name: Option<&str>) -> anyhow::Result<&'a [Parameter]> {
    match name {
        None => Ok(&spec.parameters),
        Some(name) => spec
            .parameter(name)
            .map(std::slice::from_ref)
            .with_context(|| format!("parameter \"{name}\" is not declared")),
    }
}

/// Executes the `params` command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or `--name` is not
/// a declared parameter.
pub fn execute(args: &ParamsArgs) -> anyhow::Result<()> {
    let schematic = document::load(&args.file)
        .with_context(|| format!("loading schematic {}", args.file.display()))?;
    let parameters = selected(&schematic.spec, args.name.as_deref())?;

    println!("Parameters of {}", schematic.metadata.name);
    println!();
    print!("{}", format_parameters(parameters));
    println!();
    println!(
        "  {} parameter(s), {} required.",
        parameters.len(),
        parameters.iter().filter(|p| p.required).count()
    );
    Ok(())
}

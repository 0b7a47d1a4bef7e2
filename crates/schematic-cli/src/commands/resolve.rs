//! `schematic resolve`: Instantiate a schematic with parameter values.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use schematic_common::config::EngineConfig;
use schematic_engine::Engine;
use schematic_model::ComponentSchematic;

use crate::document::{self, Format};
use crate::output::format_violations;

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the schematic document (YAML or JSON).
    pub file: PathBuf,

    /// Parameter value, repeatable. Overrides the params file.
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub params: Vec<(String, String)>,

    /// File holding a flat map of parameter values.
    #[arg(long)]
    pub params_file: Option<PathBuf>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,

    /// Write the resolved document to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parses a `NAME=VALUE` assignment. The value may be empty or contain `=`.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("expected NAME=VALUE, got \"{raw}\"")),
    }
}

/// Merges the params file with command-line assignments; assignments win.
fn collect_params(args: &ResolveArgs) -> anyhow::Result<BTreeMap<String, String>> {
    let mut params = match &args.params_file {
        Some(path) => document::load_params(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?,
        None => BTreeMap::new(),
    };
    for (name, value) in &args.params {
        let _ = params.insert(name.clone(), value.clone());
    }
    Ok(params)
}

/// Executes the `resolve` command.
///
/// Loads the schematic, instantiates it with the collected parameter
/// values, and writes the concrete document. Violations are printed and
/// turn into a failing exit status after the document is written.
///
/// # Errors
///
/// Returns an error if loading, resolution or writing fails, or if the
/// resolved component has validation violations.
pub fn execute(args: ResolveArgs, config: EngineConfig) -> anyhow::Result<()> {
    let template = document::load(&args.file)
        .with_context(|| format!("loading schematic {}", args.file.display()))?;
    let params = collect_params(&args)?;
    tracing::info!(
        schematic = %template.metadata.name,
        supplied = params.len(),
        "resolving schematic"
    );

    let resolution = Engine::new(config)
        .instantiate(&template.spec, &params)
        .with_context(|| format!("resolving {}", args.file.display()))?;

    let violations = resolution.violations;
    let resolved = ComponentSchematic {
        spec: resolution.spec,
        ..template
    };
    let rendered = document::render(&resolved, args.format)?;

    if let Some(ref out_path) = args.output {
        std::fs::write(out_path, &rendered)
            .with_context(|| format!("writing {}", out_path.display()))?;
        println!("Resolved {} -> {}", args.file.display(), out_path.display());
    } else {
        print!("{rendered}");
    }

    if !violations.is_empty() {
        eprintln!("Validation failed:");
        eprint!("{}", format_violations(&violations));
        anyhow::bail!("{} validation error(s)", violations.len());
    }
    Ok(())
}

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use twobody_crosscheck::bodies::Registry;
use twobody_crosscheck::casegen::{self, BatchCase};

/// Generate the deterministic batch of reference-tool validation cases:
/// for each body, 26 position directions × 26 velocity directions, with the
/// position scaled to one body radius and a unit velocity vector.
#[derive(Parser, Debug)]
#[command(author, version, about = "Batch validation-case generator")]
struct Cli {
    /// Output path; `-` writes to stdout
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Body to enumerate, case-insensitive (repeatable; defaults to the
    /// standard nine-body set)
    #[arg(long = "body")]
    bodies: Vec<String>,

    /// Body catalog overriding the builtin registry (YAML file, TOML file,
    /// or directory of TOML files)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let custom = match &cli.catalog {
        Some(path) => Some(
            Registry::from_path(path)
                .with_context(|| format!("loading body catalog from {}", path.display()))?,
        ),
        None => None,
    };
    let registry = match &custom {
        Some(registry) => registry,
        None => Registry::builtin(),
    };

    let names: Vec<String> = if cli.bodies.is_empty() {
        casegen::DEFAULT_BODY_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect()
    } else {
        cli.bodies.clone()
    };

    let mut cases: Vec<BatchCase> = Vec::new();
    for name in &names {
        let body = registry.lookup(name)?;
        cases.extend(casegen::cases_for_body(body));
    }

    let mut writer = casegen::writer_for_path(&cli.output)?;
    match cli.format {
        Format::Csv => casegen::write_cases_csv(writer.as_mut(), &cases)?,
        Format::Json => casegen::write_manifest_json(writer.as_mut(), &cases)?,
    }
    writer.flush()?;

    eprintln!("generated {} cases across {} bodies", cases.len(), names.len());
    Ok(())
}

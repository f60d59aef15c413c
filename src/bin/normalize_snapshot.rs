// src/bin/normalize_snapshot.rs
//
// Re-apply the configured field normalizers to a TSV snapshot written by an
// earlier run, without fetching anything.

use anyhow::{Context, Result};
use spectable::{config::PipelineConfig, normalize, write};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <CONFIG_YAML> <SNAPSHOT_TSV> [OUTPUT_TSV]", args[0]);
        std::process::exit(1);
    }
    let config_path = PathBuf::from(&args[1]);
    let snapshot = PathBuf::from(&args[2]);
    let output = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| snapshot.with_extension("normalized.tsv"));

    let config = PipelineConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let mut records = write::read_tsv_file(&snapshot)
        .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
    info!(rows = records.len(), columns = records.columns().len(), "snapshot loaded");

    normalize::normalize_columns(&mut records, &config.normalize)
        .context("normalizing snapshot")?;

    for column in config.normalize.keys() {
        if let Some(values) = records.column(column) {
            for value in values.iter().flatten() {
                println!("{}\t{}", column, value);
            }
        }
    }

    write::write_tsv_file(&records, &output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), "wrote normalized snapshot");
    Ok(())
}

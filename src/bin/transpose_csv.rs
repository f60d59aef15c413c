// src/bin/transpose_csv.rs
//
// Turn a parameter-per-row spec sheet (one column per item, `Parameter`
// as the row key) into one row per item, written as TSV and Parquet.

use anyhow::{Context, Result};
use spectable::{record, write};
use std::env;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const INDEX_COLUMN: &str = "Parameter";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <INPUT_CSV> <OUTPUT_TSV> [DROP_COLUMN...]\n  e.g. {} som.csv kria.tsv Area",
            args[0], args[0]
        );
        std::process::exit(1);
    }
    let input = PathBuf::from(&args[1]);
    let output = PathBuf::from(&args[2]);
    let drop: Vec<String> = args[3..].to_vec();

    let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let records = record::from_parameter_csv(file, INDEX_COLUMN, &drop)
        .with_context(|| format!("transposing {}", input.display()))?;
    info!(items = records.len(), parameters = records.columns().len() - 1, "transposed");

    write::write_tsv_file(&records, &output)
        .with_context(|| format!("writing {}", output.display()))?;
    let parquet = output.with_extension("parquet");
    write::write_parquet_file(&records, &parquet, None)
        .with_context(|| format!("writing {}", parquet.display()))?;

    info!(tsv = %output.display(), parquet = %parquet.display(), "all done");
    Ok(())
}

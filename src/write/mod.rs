// src/write/mod.rs

pub mod columnar;
pub mod tsv;

pub use columnar::{to_record_batch, write_parquet, write_parquet_file};
pub use tsv::{read_tsv, read_tsv_file, write_tsv, write_tsv_file, NULL_MARKER};

use tracing::info;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::record::RecordSet;

/// Write every output `config` names; returns how many files were written.
pub fn write_outputs(records: &RecordSet, config: &OutputConfig) -> Result<usize> {
    let mut written = 0;
    if let Some(path) = &config.tsv {
        write_tsv_file(records, path)?;
        written += 1;
    }
    if let Some(path) = &config.parquet {
        write_parquet_file(records, path, config.freeze_panes)?;
        written += 1;
    }
    if written == 0 {
        info!("no outputs configured");
    }
    Ok(written)
}

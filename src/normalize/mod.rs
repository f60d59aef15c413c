// src/normalize/mod.rs

pub mod gpu;
pub mod memory;
pub mod throughput;

pub use gpu::normalize_gpu;
pub use memory::normalize_memory;
pub use throughput::normalize_throughput;

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::record::RecordSet;

/// The free-text fields we know a grammar for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Throughput,
    Gpu,
    Memory,
}

impl FieldKind {
    pub fn normalize(self, text: &str) -> Result<String> {
        match self {
            FieldKind::Throughput => normalize_throughput(text),
            FieldKind::Gpu => normalize_gpu(text),
            FieldKind::Memory => normalize_memory(text),
        }
    }
}

/// Normalize every configured column of `records` in place.
///
/// Null cells stay null. The first unrecognized cell aborts the whole pass
/// and `records` is left exactly as it was: replacements are only written
/// once every column has normalized cleanly.
#[instrument(level = "info", skip_all, fields(columns = plan.len()))]
pub fn normalize_columns(records: &mut RecordSet, plan: &BTreeMap<String, FieldKind>) -> Result<()> {
    let mut staged = Vec::with_capacity(plan.len());

    for (column, kind) in plan {
        let values = records
            .column(column)
            .ok_or_else(|| Error::UnknownColumn(column.clone()))?;

        let mut out = Vec::with_capacity(values.len());
        for (row, cell) in values.iter().enumerate() {
            let normalized = match cell {
                Some(text) => Some(kind.normalize(text).inspect_err(|e| {
                    warn!(column = %column, row, error = %e, "normalization failed");
                })?),
                None => None,
            };
            out.push(normalized);
        }
        staged.push((column, out));
    }

    for (column, values) in staged {
        records.replace_column(column, values)?;
    }
    info!("normalized");
    Ok(())
}

// src/error.rs

//! Error kinds surfaced by the extraction pipeline.
//!
//! Every variant is fatal: the pipeline aborts on the first one it meets.
//! A row dropped by the price join is not an error and never shows up here.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document could not be fetched or the server answered with a
    /// non-success status.
    #[error("source `{source_name}` unavailable at {url}: {reason}")]
    SourceUnavailable {
        source_name: String,
        url: String,
        reason: String,
    },

    /// No element carries the configured table id.
    #[error("source `{source_name}`: no table with id `{table_id}`")]
    TableNotFound {
        source_name: String,
        table_id: String,
    },

    /// The table has no name row, or a name row without items, once the
    /// leading rows are skipped.
    #[error("source `{source_name}`: no item names after skipping {row_offset} rows")]
    EmptyTable {
        source_name: String,
        row_offset: usize,
    },

    /// A resolved row disagrees with the name row, or two rows resolve to
    /// the same label.
    #[error("source `{source_name}`, row `{label}`: {reason}")]
    MalformedRow {
        source_name: String,
        label: String,
        reason: String,
    },

    /// A normalizer's grammar did not match the cell text.
    #[error("field `{field}`: unrecognized text {text:?}: {reason}")]
    UnrecognizedField {
        field: String,
        text: String,
        reason: String,
    },

    /// A normalizer was configured for a column no source produced.
    #[error("column `{0}` is not present in the record set")]
    UnknownColumn(String),

    /// Columns of unequal length or a duplicated column name.
    #[error("record set shape: {0}")]
    Shape(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(
        source_name: &str,
        label: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedRow {
            source_name: source_name.to_string(),
            label: label.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unrecognized(field: &str, text: &str, reason: impl Into<String>) -> Self {
        Error::UnrecognizedField {
            field: field.to_string(),
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

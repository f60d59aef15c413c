// src/write/columnar.rs

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Utc;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::metadata::KeyValue;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::FreezePanes;
use crate::error::{Error, Result};
use crate::record::{Column, RecordSet};

/// Key under which the freeze region is stored, formatted `"<rows>,<columns>"`.
pub const FREEZE_PANES_KEY: &str = "freeze_panes";
pub const GENERATED_AT_KEY: &str = "generated_at";

/// Float64 when every non-null value parses as a number (and there is at
/// least one), Utf8 otherwise.
fn infer_type(col: &Column) -> DataType {
    let mut present = col.values.iter().flatten().peekable();
    if present.peek().is_some() && present.all(|v| v.trim().parse::<f64>().is_ok()) {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

fn to_array(col: &Column, ty: &DataType) -> ArrayRef {
    match ty {
        DataType::Float64 => Arc::new(
            col.values
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.trim().parse::<f64>().ok()))
                .collect::<Float64Array>(),
        ),
        _ => Arc::new(col.values.iter().map(|v| v.as_deref()).collect::<StringArray>()),
    }
}

/// Build a record batch with one nullable field per column.
pub fn to_record_batch(records: &RecordSet) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(records.columns().len());
    let mut arrays = Vec::with_capacity(records.columns().len());
    for col in records.columns() {
        let ty = infer_type(col);
        arrays.push(to_array(col, &ty));
        fields.push(Field::new(&col.name, ty, true));
    }
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

pub fn write_parquet<W: Write + Send>(
    records: &RecordSet,
    writer: W,
    freeze: Option<FreezePanes>,
) -> Result<()> {
    let batch = to_record_batch(records)?;

    let mut metadata = vec![KeyValue::new(
        GENERATED_AT_KEY.to_string(),
        Utc::now().to_rfc3339(),
    )];
    if let Some(f) = freeze {
        metadata.push(KeyValue::new(
            FREEZE_PANES_KEY.to_string(),
            format!("{},{}", f.rows, f.columns),
        ));
    }

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_key_value_metadata(Some(metadata))
        .build();
    let mut writer = ArrowWriter::try_new(writer, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[instrument(level = "info", skip(records, path, freeze), fields(path = %path.as_ref().display(), rows = records.len()))]
pub fn write_parquet_file(
    records: &RecordSet,
    path: impl AsRef<Path>,
    freeze: Option<FreezePanes>,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_parquet(records, file, freeze)?;
    debug!("wrote parquet");
    Ok(())
}

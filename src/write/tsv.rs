// src/write/tsv.rs

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::record::{RecordSet, NAME_COLUMN};

/// Field written for a null cell, so an empty string survives a reload.
pub const NULL_MARKER: &str = "\\N";

/// Write `records` tab-separated: an unnamed row-index column, then every
/// column in order. Nulls are written as [`NULL_MARKER`].
pub fn write_tsv<W: Write>(records: &RecordSet, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(records.column_names().map(str::to_string));
    wtr.write_record(&header)?;

    for row in 0..records.len() {
        let mut line = vec![row.to_string()];
        for col in records.columns() {
            line.push(
                col.values[row]
                    .clone()
                    .unwrap_or_else(|| NULL_MARKER.to_string()),
            );
        }
        wtr.write_record(&line)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[instrument(level = "info", skip(records, path), fields(path = %path.as_ref().display(), rows = records.len()))]
pub fn write_tsv_file(records: &RecordSet, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_tsv(records, file)?;
    debug!("wrote tsv");
    Ok(())
}

/// Read a snapshot written by [`write_tsv`]. A leading unnamed column is
/// taken as the row index and skipped; [`NULL_MARKER`] fields read back as
/// nulls and empty fields as empty strings.
pub fn read_tsv<R: Read>(reader: R) -> Result<RecordSet> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let skip = usize::from(headers.get(0).is_some_and(str::is_empty));
    let names: Vec<&str> = headers.iter().skip(skip).collect();
    let name_pos = names
        .iter()
        .position(|h| *h == NAME_COLUMN)
        .ok_or_else(|| Error::Shape(format!("snapshot has no `{}` column", NAME_COLUMN)))?;

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for result in rdr.records() {
        let record = result?;
        for (i, column) in columns.iter_mut().enumerate() {
            let cell = record.get(i + skip).unwrap_or_default();
            column.push((cell != NULL_MARKER).then(|| cell.to_string()));
        }
    }

    let item_names: Vec<String> = columns[name_pos]
        .iter()
        .map(|n| n.clone().unwrap_or_default())
        .collect();
    let mut records = RecordSet::with_names(item_names);
    for (i, (name, values)) in names.iter().zip(columns).enumerate() {
        if i != name_pos {
            records.push_column(*name, values)?;
        }
    }
    Ok(records)
}

pub fn read_tsv_file(path: impl AsRef<Path>) -> Result<RecordSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_tsv(file)
}

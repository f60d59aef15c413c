// src/record/transpose.rs

use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, instrument};

use super::RecordSet;
use crate::error::{Error, Result};

/// Read a parameter-per-row CSV (one column per item, `index_column` naming
/// the parameter) and transpose it so every item becomes a row.
///
/// Columns listed in `drop` are discarded before transposing; each item's
/// header becomes its `Name`. Empty cells become nulls.
#[instrument(level = "debug", skip(reader, drop))]
pub fn from_parameter_csv<R: Read>(reader: R, index_column: &str, drop: &[String]) -> Result<RecordSet> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let index = headers
        .iter()
        .position(|h| h.trim() == index_column)
        .ok_or_else(|| Error::Shape(format!("no index column `{}`", index_column)))?;

    // positions of the item columns, in file order
    let items: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != index && !drop.iter().any(|d| d == h.trim()))
        .map(|(i, _)| i)
        .collect();

    let mut records = RecordSet::with_names(items.iter().map(|&i| headers[i].trim().to_string()));
    let mut seen = HashSet::new();

    for result in rdr.records() {
        let record = result?;
        let parameter = record.get(index).unwrap_or_default().trim().to_string();
        if !seen.insert(parameter.clone()) {
            return Err(Error::malformed(
                "parameter table",
                parameter,
                "parameter appears twice",
            ));
        }
        let values = items
            .iter()
            .map(|&i| {
                record
                    .get(i)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
            .collect();
        records.push_column(parameter, values)?;
    }

    debug!(items = records.len(), parameters = seen.len(), "transposed");
    Ok(records)
}

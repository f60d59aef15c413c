// src/table/grid.rs

use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, trace};

use super::{Cell, LabelAliases, RawTable};
use crate::error::{Error, Result};
use crate::record::NAME_COLUMN;

/// How a source lays out its comparison table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Layout {
    /// Rows to skip before the name row.
    #[serde(default)]
    pub row_offset: usize,
    /// Cells to skip at the start of the name row (e.g. a spanning label).
    #[serde(default)]
    pub name_column_offset: usize,
    /// Ignore `colspan`: every cell yields exactly one value.
    #[serde(default)]
    pub single_value: bool,
}

/// A row label with one value per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledSeries {
    pub label: String,
    pub values: Vec<String>,
}

/// Rectangular view of a table: item names plus one series per row, every
/// series exactly `names.len()` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGrid {
    pub names: Vec<String>,
    pub series: Vec<LabeledSeries>,
}

/// Resolve `table` into item names and labeled value series.
///
/// - skips `layout.row_offset` rows, then reads the name row after
///   `layout.name_column_offset` cells;
/// - every later row is `label, values...`: the label is trimmed, loses any
///   trailing `*`, and is mapped through `aliases`; each value cell is
///   repeated `span` times unless `layout.single_value` is set;
/// - rows with no cells are skipped.
///
/// Fails with `EmptyTable` when there is no name row or it holds no items,
/// and with `MalformedRow` when a row's expanded width differs from the item
/// count or two rows land on the same canonical label.
pub fn resolve(
    table: &RawTable,
    source_name: &str,
    layout: &Layout,
    aliases: &LabelAliases,
) -> Result<ResolvedGrid> {
    let empty = || Error::EmptyTable {
        source_name: source_name.to_string(),
        row_offset: layout.row_offset,
    };

    let mut rows = table.rows().iter().skip(layout.row_offset);
    let name_row = rows.next().ok_or_else(empty)?;
    let names: Vec<String> = name_row
        .iter()
        .skip(layout.name_column_offset)
        .map(|c| c.text.trim().to_string())
        .collect();
    if names.is_empty() {
        return Err(empty());
    }
    let width = names.len();
    debug!(source = source_name, items = width, "name row");

    // canonical label -> raw label that first produced it; the name row
    // already owns `Name`
    let mut seen: HashMap<String, String> = HashMap::new();
    seen.insert(NAME_COLUMN.to_string(), "name row".to_string());
    let mut series = Vec::new();

    for row in rows {
        let Some((head, rest)) = row.split_first() else {
            trace!(source = source_name, "skipping empty row");
            continue;
        };

        let raw_label = head.text.trim().trim_end_matches('*');
        let label = aliases.canonical(raw_label).to_string();

        if let Some(first) = seen.get(&label) {
            return Err(Error::malformed(
                source_name,
                label.as_str(),
                format!(
                    "label `{}` resolves to the same column as earlier row `{}`",
                    raw_label, first
                ),
            ));
        }

        let values = expand(rest, layout.single_value, width)
            .filter(|v| v.len() == width)
            .ok_or_else(|| {
                Error::malformed(
                    source_name,
                    label.as_str(),
                    format!("{} values for {} items", expanded_width(rest, layout.single_value), width),
                )
            })?;

        trace!(source = source_name, label = %label, "resolved row");
        seen.insert(label.clone(), raw_label.to_string());
        series.push(LabeledSeries { label, values });
    }

    Ok(ResolvedGrid { names, series })
}

/// Expand value cells into one entry per item column. `None` once the
/// expansion would run past `width`; nothing is allocated beyond it.
fn expand(cells: &[Cell], single_value: bool, width: usize) -> Option<Vec<String>> {
    let mut out = Vec::with_capacity(width);
    for cell in cells {
        let times = if single_value { 1 } else { cell.span };
        if out.len().checked_add(times)? > width {
            return None;
        }
        let text = cell.text.trim();
        out.extend(std::iter::repeat(text.to_string()).take(times));
    }
    Some(out)
}

/// Width a row would expand to, saturating instead of overflowing.
fn expanded_width(cells: &[Cell], single_value: bool) -> usize {
    cells
        .iter()
        .map(|c| if single_value { 1 } else { c.span })
        .fold(0usize, usize::saturating_add)
}

// src/table/html.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use super::{Cell, RawTable};
use crate::error::{Error, Result};

static WITH_ID: Lazy<Selector> = Lazy::new(|| Selector::parse("[id]").expect("selector should parse"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("selector should parse"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("selector should parse"));

/// Locate the element whose `id` is `table_id` and lift its `tr`/`td`
/// structure into a [`RawTable`].
///
/// Ids are compared verbatim rather than through a `#id` selector, so ids
/// containing CSS metacharacters still resolve.
pub fn find_table(html: &str, source_name: &str, table_id: &str) -> Result<RawTable> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(&WITH_ID)
        .find(|el| el.value().id() == Some(table_id))
        .ok_or_else(|| Error::TableNotFound {
            source_name: source_name.to_string(),
            table_id: table_id.to_string(),
        })?;

    let mut rows = Vec::new();
    for tr in table.select(&ROW) {
        let mut cells = Vec::new();
        for td in tr.select(&CELL) {
            cells.push(read_cell(td, source_name, &cells)?);
        }
        trace!(cells = cells.len(), "row");
        rows.push(cells);
    }

    debug!(source = source_name, table_id, rows = rows.len(), "table located");
    Ok(RawTable::new(rows))
}

fn read_cell(td: ElementRef<'_>, source_name: &str, preceding: &[Cell]) -> Result<Cell> {
    let text: String = td.text().collect();
    let span = match td.value().attr("colspan") {
        None => 1,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                // the label cell, when we already have it, names the row best
                let label = preceding
                    .first()
                    .map(|c| c.text.trim().to_string())
                    .unwrap_or_else(|| text.trim().to_string());
                return Err(Error::malformed(
                    source_name,
                    label,
                    format!("invalid colspan {:?}", raw),
                ));
            }
        },
    };
    Ok(Cell::new(text, span))
}

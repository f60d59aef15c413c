// src/table/mod.rs

pub mod alias;
pub mod grid;
pub mod html;

pub use alias::LabelAliases;
pub use grid::{resolve, LabeledSeries, Layout, ResolvedGrid};
pub use html::find_table;

/// One `<td>` as it appeared in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Untrimmed text content of the cell and its descendants.
    pub text: String,
    /// Number of item columns the cell covers (`colspan`, default 1).
    pub span: usize,
}

impl Cell {
    pub fn new(text: impl Into<String>, span: usize) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// Rows of cells lifted out of one HTML table, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// src/record/mod.rs

pub mod extract;
pub mod merge;
pub mod transpose;

pub use extract::{extract_records, records_from_grid};
pub use merge::stack;
pub use transpose::from_parameter_csv;

use crate::error::{Error, Result};

/// Column every record set carries; the key for stacking and price joins.
pub const NAME_COLUMN: &str = "Name";

/// A named column. `None` is the explicit null marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<String>>,
}

/// Ordered columns over an implicit row index `0..len()`.
///
/// Every column holds exactly `len()` values and `Name` is always the first
/// column.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    columns: Vec<Column>,
    rows: usize,
}

impl RecordSet {
    /// A record set with one row per item name and no other columns.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Option<String>> = names.into_iter().map(|n| Some(n.into())).collect();
        let rows = values.len();
        Self {
            columns: vec![Column {
                name: NAME_COLUMN.to_string(),
                values,
            }],
            rows,
        }
    }

    /// Append a column; its length must match and its name must be new.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<String>>) -> Result<()> {
        let name = name.into();
        if values.len() != self.rows {
            return Err(Error::Shape(format!(
                "column `{}` has {} values, expected {}",
                name,
                values.len(),
                self.rows
            )));
        }
        if self.column(&name).is_some() {
            return Err(Error::Shape(format!("duplicate column `{}`", name)));
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<String>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Swap in new values for an existing column, keeping its position.
    pub fn replace_column(&mut self, name: &str, values: Vec<Option<String>>) -> Result<()> {
        if values.len() != self.rows {
            return Err(Error::Shape(format!(
                "column `{}` has {} values, expected {}",
                name,
                values.len(),
                self.rows
            )));
        }
        let col = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        col.values = values;
        Ok(())
    }

    /// Item names, row by row.
    pub fn names(&self) -> &[Option<String>] {
        &self.columns[0].values
    }

    /// Cell at (`row`, `column`); `None` for a null cell or unknown column.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        self.column(column)?.get(row)?.as_deref()
    }

    /// Keep the rows whose flag is `true`.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.rows);
        for col in &mut self.columns {
            let mut flags = keep.iter();
            col.values.retain(|_| *flags.next().unwrap_or(&false));
        }
        self.rows = keep.iter().filter(|k| **k).count();
    }
}

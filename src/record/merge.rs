// src/record/merge.rs

use tracing::debug;

use super::{Column, RecordSet, NAME_COLUMN};

/// Stack record sets vertically.
///
/// Rows keep source order, columns are the union of every input's columns
/// in first-seen order, and a row from a set lacking a column gets `None`
/// there. No two rows are ever combined.
pub fn stack<I>(sets: I) -> RecordSet
where
    I: IntoIterator<Item = RecordSet>,
{
    let sets: Vec<RecordSet> = sets.into_iter().collect();
    let total: usize = sets.iter().map(RecordSet::len).sum();

    let mut order: Vec<String> = vec![NAME_COLUMN.to_string()];
    for set in &sets {
        for name in set.column_names() {
            if !order.iter().any(|o| o == name) {
                order.push(name.to_string());
            }
        }
    }

    let mut columns: Vec<Column> = order
        .into_iter()
        .map(|name| Column {
            name,
            values: Vec::with_capacity(total),
        })
        .collect();

    for set in &sets {
        for col in &mut columns {
            match set.column(&col.name) {
                Some(values) => col.values.extend_from_slice(values),
                None => col.values.extend(std::iter::repeat(None).take(set.len())),
            }
        }
    }

    debug!(sources = sets.len(), rows = total, columns = columns.len(), "stacked");
    RecordSet {
        columns,
        rows: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(names: &[&str], cols: Vec<(&str, Vec<&str>)>) -> RecordSet {
        let mut rs = RecordSet::with_names(names.iter().copied());
        for (name, vals) in cols {
            rs.push_column(name, vals.iter().map(|v| Some(v.to_string())).collect())
                .unwrap();
        }
        rs
    }

    #[test]
    fn missing_column_becomes_null() {
        let a = set(
            &["a1", "a2", "a3", "a4"],
            vec![("Memory", vec!["8GB", "8GB", "16GB", "32GB"])],
        );
        let b = set(
            &["b1", "b2", "b3"],
            vec![
                ("Camera", vec!["2", "4", "6"]),
                ("Memory", vec!["4GB", "4GB", "2GB"]),
            ],
        );
        let merged = stack([a, b]);

        assert_eq!(merged.len(), 7);
        let camera = merged.column("Camera").unwrap();
        assert!(camera[..4].iter().all(Option::is_none));
        assert_eq!(camera[4].as_deref(), Some("2"));
        assert_eq!(merged.get(5, "Name"), Some("b2"));
        assert_eq!(merged.get(6, "Memory"), Some("2GB"));
    }

    #[test]
    fn row_count_and_column_set_laws() {
        let inputs = vec![
            set(&["a"], vec![("X", vec!["1"])]),
            set(&["b", "c"], vec![("Y", vec!["2", "3"])]),
            set(&[], vec![]),
            set(
                &["d", "e", "f"],
                vec![("X", vec!["4", "5", "6"]), ("Z", vec!["7", "8", "9"])],
            ),
        ];
        let expected_rows: usize = inputs.iter().map(RecordSet::len).sum();
        let expected_cols: BTreeSet<String> = inputs
            .iter()
            .flat_map(|s| s.column_names().map(str::to_string).collect::<Vec<_>>())
            .collect();

        let merged = stack(inputs);
        assert_eq!(merged.len(), expected_rows);
        let cols: BTreeSet<String> = merged.column_names().map(str::to_string).collect();
        assert_eq!(cols, expected_cols);
        assert!(merged.columns().iter().all(|c| c.values.len() == expected_rows));
        assert_eq!(merged.column_names().next(), Some(NAME_COLUMN));
    }

    #[test]
    fn stacking_nothing_yields_empty_names() {
        let merged = stack(Vec::new());
        assert!(merged.is_empty());
        assert_eq!(merged.column_names().collect::<Vec<_>>(), vec![NAME_COLUMN]);
    }
}

// src/record/extract.rs

use tracing::{info, instrument};

use super::RecordSet;
use crate::config::SourceConfig;
use crate::error::Result;
use crate::table::{self, LabelAliases, ResolvedGrid};

/// Turn one fetched document into a record set: locate the source's table,
/// resolve its grid, and lay the rows out as columns.
#[instrument(level = "info", skip(html, source, aliases), fields(source = %source.name))]
pub fn extract_records(html: &str, source: &SourceConfig, aliases: &LabelAliases) -> Result<RecordSet> {
    let raw = table::find_table(html, &source.name, &source.table_id)?;
    let grid = table::resolve(&raw, &source.name, &source.layout, aliases)?;
    let records = records_from_grid(grid)?;
    info!(
        rows = records.len(),
        columns = records.columns().len(),
        "extracted"
    );
    Ok(records)
}

/// `Name` from the name row, then one column per labeled series in row order.
pub fn records_from_grid(grid: ResolvedGrid) -> Result<RecordSet> {
    let mut records = RecordSet::with_names(grid.names);
    for series in grid.series {
        let values = series.values.into_iter().map(Some).collect();
        records.push_column(series.label, values)?;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::table::Layout;

    fn orin_page() -> &'static str {
        r#"
        <table id="jetson-prod-module-table">
          <tr><td colspan="5">Jetson AGX Orin Series / Jetson Orin NX Series</td></tr>
          <tr><td></td><td>Jetson AGX Orin 64GB</td><td>Jetson AGX Orin 32GB</td><td>Jetson Orin NX 16GB</td><td>Jetson Orin NX 8GB</td></tr>
          <tr><td>AI Performance</td><td>275 TOPS</td><td>200 TOPS</td><td>157 TOPS</td><td>117 TOPS</td></tr>
          <tr><td>CSI Camera*</td><td colspan="2">Up to 6 cameras</td><td colspan="2">Up to 4 cameras</td></tr>
        </table>
        "#
    }

    fn source(layout: Layout) -> SourceConfig {
        SourceConfig {
            name: "orin".into(),
            url: "https://example.com/orin".into(),
            table_id: "jetson-prod-module-table".into(),
            layout,
            aliases: None,
        }
    }

    #[test]
    fn extracts_named_columns() {
        let aliases = LabelAliases::new([("Camera", vec!["Camera", "CSI Camera"])]).unwrap();
        let src = source(Layout {
            row_offset: 1,
            name_column_offset: 1,
            single_value: false,
        });
        let rs = extract_records(orin_page(), &src, &aliases).unwrap();

        assert_eq!(rs.len(), 4);
        assert_eq!(
            rs.column_names().collect::<Vec<_>>(),
            vec!["Name", "AI Performance", "Camera"]
        );
        assert_eq!(rs.get(0, "Name"), Some("Jetson AGX Orin 64GB"));
        assert_eq!(rs.get(1, "Camera"), Some("Up to 6 cameras"));
        assert_eq!(rs.get(2, "Camera"), Some("Up to 4 cameras"));
    }

    #[test]
    fn propagates_grid_failures() {
        // without skipping the label cell the name row is one item too wide
        let src = source(Layout {
            row_offset: 1,
            name_column_offset: 0,
            single_value: false,
        });
        let err = extract_records(orin_page(), &src, &LabelAliases::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
    }

    #[test]
    fn huge_colspan_and_name_row_label_are_malformed() {
        let src = source(Layout::default());
        let huge = r#"<table id="jetson-prod-module-table">
          <tr><td>Jetson Orin NX 16GB</td><td>Jetson Orin NX 8GB</td></tr>
          <tr><td>Memory</td><td colspan="4000000000000000000">8GB</td></tr>
        </table>"#;
        let err = extract_records(huge, &src, &LabelAliases::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { ref label, .. } if label == "Memory"));

        let name_row = r#"<table id="jetson-prod-module-table">
          <tr><td>Jetson Orin NX 16GB</td><td>Jetson Orin NX 8GB</td></tr>
          <tr><td>Name</td><td>x</td><td>y</td></tr>
        </table>"#;
        let err = extract_records(name_row, &src, &LabelAliases::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRow { ref source_name, ref label, .. } if source_name == "orin" && label == "Name"
        ));
    }
}

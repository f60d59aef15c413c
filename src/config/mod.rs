// src/config/mod.rs

//! Pipeline configuration, read from a YAML file.
//!
//! ```yaml
//! sources:
//!   - name: orin
//!     url: https://www.nvidia.com/en-us/autonomous-machines/embedded-systems/jetson-orin/
//!     table_id: jetson-prod-module-table
//!     row_offset: 1
//! aliases:
//!   Camera: [Camera, CSI Camera]
//! normalize:
//!   AI Performance: throughput
//! prices:
//!   Jetson AGX Orin 64GB: 1599
//! output:
//!   tsv: jetson.tsv
//!   parquet: jetson.parquet
//!   freeze_panes: { rows: 1, columns: 1 }
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::normalize::FieldKind;
use crate::price::PriceTable;
use crate::table::{LabelAliases, Layout};

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Processed in this order; their rows are stacked in this order.
    pub sources: Vec<SourceConfig>,
    /// Label synonyms for every source that does not bring its own.
    #[serde(default)]
    pub aliases: LabelAliases,
    /// Column name → grammar its cells must follow.
    #[serde(default)]
    pub normalize: BTreeMap<String, FieldKind>,
    /// No price join when absent.
    #[serde(default)]
    pub prices: Option<PriceTable>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// One page and the table on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    /// `http(s)://` to fetch, `file://` to read a saved copy.
    pub url: String,
    /// `id` attribute of the table element.
    pub table_id: String,
    #[serde(flatten)]
    pub layout: Layout,
    /// Replaces the pipeline-wide alias table for this source.
    #[serde(default)]
    pub aliases: Option<LabelAliases>,
}

impl SourceConfig {
    pub fn aliases<'a>(&'a self, default: &'a LabelAliases) -> &'a LabelAliases {
        self.aliases.as_ref().unwrap_or(default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Tab-separated snapshot with a leading row-index column.
    #[serde(default)]
    pub tsv: Option<PathBuf>,
    #[serde(default)]
    pub parquet: Option<PathBuf>,
    /// Passed through to the Parquet file's metadata for spreadsheet
    /// viewers; no effect on the data.
    #[serde(default)]
    pub freeze_panes: Option<FreezePanes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FreezePanes {
    pub rows: u32,
    pub columns: u32,
}

impl PipelineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_yaml_str(&text)?;
        config.resolve_paths(path.parent().unwrap_or_else(|| Path::new(".")));
        debug!(path = %path.display(), sources = config.sources.len(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::Config("no sources configured".into()));
        }
        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                return Err(Error::Config(format!("duplicate source name `{}`", source.name)));
            }
            let url = Url::parse(&source.url)
                .map_err(|e| Error::Config(format!("source `{}`: bad url: {}", source.name, e)))?;
            if !matches!(url.scheme(), "http" | "https" | "file") {
                return Err(Error::Config(format!(
                    "source `{}`: unsupported scheme `{}`",
                    source.name,
                    url.scheme()
                )));
            }
            if source.table_id.trim().is_empty() {
                return Err(Error::Config(format!("source `{}`: empty table_id", source.name)));
            }
        }
        Ok(())
    }

    /// Output paths are relative to the config file, like its `file://`
    /// sources would be if written relatively.
    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.output.tsv, &mut self.output.parquet].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
sources:
  - name: orin
    url: https://www.nvidia.com/en-us/autonomous-machines/embedded-systems/jetson-orin/
    table_id: jetson-prod-module-table
    row_offset: 1
  - name: nano
    url: file:///tmp/nano.html
    table_id: jetson-tx2-table
    name_column_offset: 1
    single_value: true
    aliases:
      GPU: [GPU Architecture]
aliases:
  Camera: [Camera, CSI Camera]
normalize:
  AI Performance: throughput
prices:
  Jetson AGX Orin 64GB: 1599
  Jetson AGX Thor T5000: null
output:
  tsv: jetson.tsv
  freeze_panes: { rows: 1, columns: 1 }
"#;

    #[test]
    fn parses_sources_and_layouts() {
        let config = PipelineConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.sources.len(), 2);

        let orin = &config.sources[0];
        assert_eq!(orin.layout.row_offset, 1);
        assert_eq!(orin.layout.name_column_offset, 0);
        assert!(!orin.layout.single_value);
        assert_eq!(orin.aliases(&config.aliases).canonical("CSI Camera"), "Camera");

        let nano = &config.sources[1];
        assert!(nano.layout.single_value);
        assert_eq!(nano.aliases(&config.aliases).canonical("CSI Camera"), "CSI Camera");
        assert_eq!(nano.aliases(&config.aliases).canonical("GPU Architecture"), "GPU");

        assert_eq!(config.normalize["AI Performance"], FieldKind::Throughput);
        let prices = config.prices.unwrap();
        assert_eq!(prices.lookup("Jetson AGX Thor T5000"), Some(None));
        assert_eq!(
            config.output.freeze_panes,
            Some(FreezePanes { rows: 1, columns: 1 })
        );
    }

    #[test]
    fn rejects_duplicate_names_and_bad_urls() {
        let dup = r#"
sources:
  - { name: a, url: "https://x.test/", table_id: t }
  - { name: a, url: "https://y.test/", table_id: t }
"#;
        assert!(matches!(PipelineConfig::from_yaml_str(dup), Err(Error::Config(_))));

        let ftp = r#"
sources:
  - { name: a, url: "ftp://x.test/", table_id: t }
"#;
        assert!(matches!(PipelineConfig::from_yaml_str(ftp), Err(Error::Config(_))));

        assert!(PipelineConfig::from_yaml_str("sources: []\n").is_err());
    }

    #[test]
    fn conflicting_aliases_fail_to_load() {
        let yaml = r#"
sources:
  - { name: a, url: "https://x.test/", table_id: t }
aliases:
  A: [x]
  B: [x]
"#;
        assert!(PipelineConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn load_resolves_output_paths_next_to_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();
        let config = PipelineConfig::load(file.path()).unwrap();
        let dir = file.path().parent().unwrap();
        assert_eq!(config.output.tsv, Some(dir.join("jetson.tsv")));
        assert_eq!(config.output.parquet, None);
    }
}

// src/pipeline.rs

use reqwest::Client;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetch::fetch_document;
use crate::normalize::normalize_columns;
use crate::price::join_prices;
use crate::record::{extract_records, stack, RecordSet};

/// Final record set plus the item names the price join dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub records: RecordSet,
    pub dropped: Vec<String>,
}

/// Fetch and extract every source in declared order, then merge,
/// normalize and price. The first failure aborts the run.
#[instrument(level = "info", skip_all, fields(sources = config.sources.len()))]
pub async fn run(client: &Client, config: &PipelineConfig) -> Result<PipelineOutput> {
    let mut per_source = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let start = Instant::now();
        let html = fetch_document(client, source).await?;
        let records = extract_records(&html, source, source.aliases(&config.aliases))?;
        info!(source = %source.name, rows = records.len(), elapsed = ?start.elapsed(), "source done");
        per_source.push(records);
    }
    assemble(per_source, config)
}

/// Everything after extraction: stack, normalize configured columns, and
/// join prices when a price table is configured.
pub fn assemble(per_source: Vec<RecordSet>, config: &PipelineConfig) -> Result<PipelineOutput> {
    let mut records = stack(per_source);
    info!(rows = records.len(), columns = records.columns().len(), "merged");

    normalize_columns(&mut records, &config.normalize)?;

    match &config.prices {
        Some(prices) => {
            let joined = join_prices(records, prices)?;
            for name in &joined.dropped {
                warn!(name = %name, "no price entry; row dropped");
            }
            Ok(PipelineOutput {
                records: joined.records,
                dropped: joined.dropped,
            })
        }
        None => Ok(PipelineOutput {
            records,
            dropped: Vec::new(),
        }),
    }
}

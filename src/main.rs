// src/main.rs

use anyhow::{Context, Result};
use reqwest::Client;
use spectable::{config::PipelineConfig, pipeline, write};
use std::{env, path::PathBuf, time::Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load config ──────────────────────────────────────────────
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("jetson.yaml"));
    let config = PipelineConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    info!(
        sources = config.sources.len(),
        normalized = config.normalize.len(),
        "config loaded"
    );

    // ─── 3) fetch, extract, merge, normalize, price ──────────────────
    let start = Instant::now();
    let client = Client::new();
    let out = pipeline::run(&client, &config)
        .await
        .context("pipeline run failed")?;
    info!(
        rows = out.records.len(),
        dropped = out.dropped.len(),
        elapsed = ?start.elapsed(),
        "pipeline done"
    );

    // ─── 4) write snapshot ───────────────────────────────────────────
    let written = write::write_outputs(&out.records, &config.output).context("writing outputs")?;
    info!(files = written, "all done");
    Ok(())
}

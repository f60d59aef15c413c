// src/fetch/mod.rs

use reqwest::Client;
use tokio::fs;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SourceConfig;
use crate::error::{Error, Result};

/// Retrieve the HTML for `source`: GET for `http(s)://`, a disk read for
/// `file://`. Any failure, including a non-success status, is
/// `SourceUnavailable`; nothing is retried.
#[instrument(level = "info", skip(client, source), fields(source = %source.name, url = %source.url))]
pub async fn fetch_document(client: &Client, source: &SourceConfig) -> Result<String> {
    let unavailable = |reason: String| Error::SourceUnavailable {
        source_name: source.name.clone(),
        url: source.url.clone(),
        reason,
    };

    let url = Url::parse(&source.url).map_err(|e| unavailable(e.to_string()))?;

    let body = if url.scheme() == "file" {
        let path = url
            .to_file_path()
            .map_err(|_| unavailable("not a local file path".into()))?;
        fs::read_to_string(&path)
            .await
            .map_err(|e| unavailable(format!("reading {}: {}", path.display(), e)))?
    } else {
        get_text(client, &url).await.map_err(|e| unavailable(e.to_string()))?
    };

    debug!(bytes = body.len(), "fetched");
    Ok(body)
}

async fn get_text(client: &Client, url: &Url) -> reqwest::Result<String> {
    client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

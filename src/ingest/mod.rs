// src/ingest/mod.rs
pub mod providers;
pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use metrics::counter;

use crate::aggregate::SourceBatch;
use crate::normalize::{normalize_keyword_with, Transliterate};
use crate::ingest::types::KeywordSource;

/// Shared HTTP client for sources and the article enricher.
pub fn http_client(timeout_secs: u64, user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .user_agent(user_agent)
        .build()
        .context("building http client")
}

/// Fetch every source in order and normalize its keywords.
///
/// A failing source is logged and yields an empty batch; the run goes on.
/// Batches keep source order, which fixes the merge order downstream.
pub async fn collect_batches<T: Transliterate + ?Sized>(
    sources: &[Box<dyn KeywordSource>],
    translit: &T,
) -> Vec<SourceBatch> {
    crate::metrics::ensure_metrics_described();

    let mut batches = Vec::with_capacity(sources.len());
    for source in sources {
        let raw = match source.fetch_keywords().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = ?e, source = source.name(), "keyword source error");
                counter!("trends_source_errors_total").increment(1);
                Vec::new()
            }
        };

        let keywords: Vec<String> = raw
            .iter()
            .map(|kw| normalize_keyword_with(kw, translit))
            .collect();

        counter!("trends_keywords_fetched_total").increment(keywords.len() as u64);
        tracing::debug!(
            target: "ingest",
            source = source.name(),
            fetched = keywords.len(),
            "source fetched"
        );

        batches.push(SourceBatch::new(source.name(), source.bias(), keywords));
    }
    batches
}

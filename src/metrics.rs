// src/metrics.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration, so series show up once a recorder is installed.
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "trends_keywords_fetched_total",
            "Keywords returned by all sources."
        );
        describe_counter!(
            "trends_source_errors_total",
            "Keyword source fetch/parse errors."
        );
        describe_counter!(
            "trends_enrich_errors_total",
            "Article lookups that failed."
        );
        describe_counter!("trends_ranked_total", "Trends written to snapshots.");
        describe_counter!(
            "trends_pruned_snapshots_total",
            "Stale snapshots deleted by retention."
        );
        describe_gauge!("trends_last_run_ts", "Unix ts of the last completed run.");
    });
}

/// Install the process-wide Prometheus recorder. Fails if one is already set.
pub fn install_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("prometheus: install recorder")
}

/// Render the exposition text into `path` for a textfile collector,
/// via a sibling temp file renamed into place.
pub fn write_textfile(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let tmp = path.with_extension("prom.tmp");
    fs::write(&tmp, handle.render()).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming into {}", path.display()))
}

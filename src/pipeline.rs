// src/pipeline.rs
//! One batch cycle: fetch → aggregate → delta against baseline → enrich →
//! store new snapshot → prune stale snapshots.

use anyhow::{Context, Result};
use metrics::{counter, gauge};
use tracing::info;

use crate::aggregate::aggregate;
use crate::config::AppConfig;
use crate::delta::apply_delta;
use crate::enrich::{enrich_all, naver::NaverNewsEnricher, ArticleEnricher, NoopEnricher};
use crate::ingest::{self, providers, types::KeywordSource};
use crate::normalize::HanjaSubstitution;
use crate::retention::RetentionPlan;
use crate::store::SnapshotStore;
use crate::trend::Trend;

/// Knobs `run_once` needs from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub retention_secs: i64,
    pub max_articles: usize,
}

impl From<&AppConfig> for RunSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            retention_secs: cfg.retention_secs,
            max_articles: cfg.enrich.max_articles,
        }
    }
}

/// Outcome of one cycle.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Key of the snapshot written by this run.
    pub timestamp: i64,
    /// Ranked trends as stored.
    pub trends: Vec<Trend>,
    /// Snapshot the deltas were computed against.
    pub baseline: Option<i64>,
    /// Snapshots deleted by retention.
    pub pruned: Vec<i64>,
}

/// Run one cycle against an already loaded store. Nothing is written to disk.
pub async fn run_once(
    store: &mut SnapshotStore,
    sources: &[Box<dyn KeywordSource>],
    enricher: &dyn ArticleEnricher,
    settings: RunSettings,
    now: i64,
) -> Result<RunReport> {
    crate::metrics::ensure_metrics_described();

    let batches = ingest::collect_batches(sources, &HanjaSubstitution).await;
    let mut trends = aggregate(&batches);

    let timestamps = store.timestamps().context("reading snapshot timestamps")?;
    let plan = RetentionPlan::compute(&timestamps, now, settings.retention_secs);

    let baseline_trends = match plan.baseline {
        Some(ts) => store
            .snapshot(ts)
            .with_context(|| format!("reading baseline snapshot {ts}"))?,
        None => Vec::new(),
    };
    apply_delta(&mut trends, &baseline_trends);

    enrich_all(&mut trends, enricher, settings.max_articles).await;

    for (rank, t) in trends.iter().enumerate() {
        info!(
            target: "trends",
            rank = rank + 1,
            keyword = %t.keyword,
            score = t.score,
            delta = t.delta,
            articles = t.top_articles.len(),
            "ranked"
        );
    }

    store
        .put_snapshot(now, &trends)
        .with_context(|| format!("writing snapshot {now}"))?;
    plan.apply(store, &timestamps, now)
        .context("pruning stale snapshots")?;

    counter!("trends_ranked_total").increment(trends.len() as u64);
    counter!("trends_pruned_snapshots_total").increment(plan.stale.len() as u64);
    gauge!("trends_last_run_ts").set(now as f64);

    info!(
        timestamp = now,
        ranked = trends.len(),
        baseline = ?plan.baseline,
        pruned = plan.stale.len(),
        "trend cycle complete"
    );

    Ok(RunReport {
        timestamp: now,
        trends,
        baseline: plan.baseline,
        pruned: plan.stale,
    })
}

/// Full cycle from configuration: load the document, run once, persist.
/// The document is only written after the whole cycle succeeded.
pub async fn run_cycle(cfg: &AppConfig) -> Result<RunReport> {
    cfg.validate()?;

    let mut store = SnapshotStore::load(&cfg.data_path)
        .with_context(|| format!("loading snapshot document {}", cfg.data_path.display()))?;

    let client = ingest::http_client(cfg.http_timeout_secs, &cfg.user_agent)?;
    let sources = providers::from_config(&cfg.sources, &client)?;
    let enricher: Box<dyn ArticleEnricher> = if cfg.enrich.enabled {
        Box::new(NaverNewsEnricher::new(cfg.enrich.search_url.clone(), client))
    } else {
        Box::new(NoopEnricher)
    };

    let now = chrono::Utc::now().timestamp();
    let report = run_once(
        &mut store,
        &sources,
        enricher.as_ref(),
        RunSettings::from(cfg),
        now,
    )
    .await?;

    store
        .persist()
        .with_context(|| format!("persisting {}", store.path().display()))?;
    Ok(report)
}

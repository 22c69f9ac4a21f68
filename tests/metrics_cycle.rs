// tests/metrics_cycle.rs
// One test per binary: the Prometheus recorder is process-global.
use anyhow::{bail, Result};
use async_trait::async_trait;
use keyword_trends::enrich::ArticleEnricher;
use keyword_trends::ingest::providers::fixed::FixedSource;
use keyword_trends::ingest::types::KeywordSource;
use keyword_trends::metrics::{install_recorder, write_textfile};
use keyword_trends::{run_once, Article, RunSettings, SnapshotStore};

struct Down;

#[async_trait]
impl KeywordSource for Down {
    async fn fetch_keywords(&self) -> Result<Vec<String>> {
        bail!("status 503")
    }
    fn name(&self) -> &str {
        "down"
    }
    fn bias(&self) -> f64 {
        1.0
    }
}

struct NoArticles;

#[async_trait]
impl ArticleEnricher for NoArticles {
    async fn top_articles(&self, _keyword: &str) -> Result<Vec<Article>> {
        bail!("search unavailable")
    }
    fn name(&self) -> &str {
        "none"
    }
}

#[tokio::test]
async fn cycle_counters_are_exported() {
    let handle = install_recorder().expect("recorder");

    let dir = tempfile::tempdir().unwrap();
    let mut store = SnapshotStore::load(dir.path().join("trends.json")).unwrap();
    let sources: Vec<Box<dyn KeywordSource>> = vec![
        Box::new(Down),
        Box::new(FixedSource::new("fixed", 1.0, ["alpha", "beta"])),
    ];
    let settings = RunSettings {
        retention_secs: 600,
        max_articles: 3,
    };

    let report = run_once(&mut store, &sources, &NoArticles, settings, 1_700_000_000)
        .await
        .unwrap();
    assert_eq!(report.trends.len(), 2);

    let out = handle.render();
    assert!(out.contains("trends_source_errors_total 1"), "{out}");
    assert!(out.contains("trends_keywords_fetched_total 2"), "{out}");
    assert!(out.contains("trends_ranked_total 2"), "{out}");
    assert!(out.contains("trends_enrich_errors_total 2"), "{out}");
    assert!(out.contains("trends_last_run_ts"), "{out}");

    let prom = dir.path().join("textfile").join("trends.prom");
    write_textfile(&handle, &prom).unwrap();
    let written = std::fs::read_to_string(&prom).unwrap();
    assert!(written.contains("trends_ranked_total 2"));
    assert!(!prom.with_extension("prom.tmp").exists());
}

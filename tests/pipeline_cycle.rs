// tests/pipeline_cycle.rs
use anyhow::Result;
use async_trait::async_trait;
use keyword_trends::enrich::{ArticleEnricher, NoopEnricher};
use keyword_trends::ingest::providers::fixed::FixedSource;
use keyword_trends::ingest::types::KeywordSource;
use keyword_trends::{run_once, Article, RunSettings, SnapshotStore, DELTA_NEW};

const SETTINGS: RunSettings = RunSettings {
    retention_secs: 600,
    max_articles: 3,
};

fn sources(nate: &[&str], zum: &[&str]) -> Vec<Box<dyn KeywordSource>> {
    vec![
        Box::new(FixedSource::new("nate", 0.7, nate.iter().copied())),
        Box::new(FixedSource::new("zum", 1.0, zum.iter().copied())),
    ]
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

struct OneArticle;

#[async_trait]
impl ArticleEnricher for OneArticle {
    async fn top_articles(&self, keyword: &str) -> Result<Vec<Article>> {
        Ok(vec![Article {
            title: format!("{keyword} 속보"),
            link: "https://news.test/1".to_string(),
            content: "요약".to_string(),
            thumbnail: "https://img.test/1.jpg".to_string(),
        }])
    }
    fn name(&self) -> &str {
        "one"
    }
}

#[tokio::test]
async fn three_runs_track_deltas_and_retention() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("trends.json");

    // Run 1: no history.
    let mut store = SnapshotStore::load(&path).unwrap();
    let r1 = run_once(
        &mut store,
        &sources(&["서울역", "부산"], &["서울", "대구"]),
        &NoopEnricher,
        SETTINGS,
        1_000,
    )
    .await
    .unwrap();
    store.persist().unwrap();

    let kws: Vec<_> = r1.trends.iter().map(|t| t.keyword.as_str()).collect();
    assert_eq!(kws, vec!["서울", "대구", "부산"]);
    assert!(approx(r1.trends[0].score, 20.0 + 14.0 * 0.7));
    assert!(r1.trends.iter().all(|t| t.delta == DELTA_NEW));
    assert_eq!(r1.baseline, None);

    // Run 2: run 1 is old enough to be the baseline.
    let mut store = SnapshotStore::load(&path).unwrap();
    let r2 = run_once(
        &mut store,
        &sources(&["대구"], &["부산", "서울"]),
        &NoopEnricher,
        SETTINGS,
        1_700,
    )
    .await
    .unwrap();
    store.persist().unwrap();

    assert_eq!(r2.baseline, Some(1_000));
    assert!(r2.pruned.is_empty());
    let moves: Vec<_> = r2
        .trends
        .iter()
        .map(|t| (t.keyword.as_str(), t.delta))
        .collect();
    assert_eq!(moves, vec![("부산", 2), ("서울", -1), ("대구", -1)]);

    // Run 3: run 2 becomes the baseline, run 1 is pruned.
    let mut store = SnapshotStore::load(&path).unwrap();
    let r3 = run_once(
        &mut store,
        &sources(&[], &["부산"]),
        &NoopEnricher,
        SETTINGS,
        2_400,
    )
    .await
    .unwrap();
    store.persist().unwrap();

    assert_eq!(r3.baseline, Some(1_700));
    assert_eq!(r3.pruned, vec![1_000]);
    assert_eq!(r3.trends[0].delta, 0);

    let store = SnapshotStore::load(&path).unwrap();
    assert_eq!(store.timestamps().unwrap(), vec![1_700, 2_400]);
    assert_eq!(store.get("1000").unwrap(), None);
    assert_eq!(store.snapshot(1_700).unwrap().len(), 3);
}

#[tokio::test]
async fn recent_snapshots_are_not_a_baseline() {
    let mut store = SnapshotStore::new("unused.json");
    run_once(&mut store, &sources(&[], &["a"]), &NoopEnricher, SETTINGS, 1_000)
        .await
        .unwrap();
    let r = run_once(&mut store, &sources(&[], &["a"]), &NoopEnricher, SETTINGS, 1_300)
        .await
        .unwrap();
    assert_eq!(r.baseline, None);
    assert_eq!(r.trends[0].delta, DELTA_NEW);
    assert_eq!(store.timestamps().unwrap(), vec![1_000, 1_300]);
}

#[tokio::test]
async fn persisted_document_uses_historical_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trends.json");

    let mut store = SnapshotStore::load(&path).unwrap();
    run_once(&mut store, &sources(&["서울"], &[]), &OneArticle, SETTINGS, 5_000)
        .await
        .unwrap();
    store.persist().unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("{\n    \""));
    assert!(raw.contains("\"서울\""), "non-ascii must be written verbatim");
    assert!(raw.contains("\"hashed\""));
    assert!(raw.contains("\"topArticles\""));
    assert!(raw.contains("\"thumnail\""));
    assert!(raw.contains("\"timestamps\": [\n        5000\n    ]"));

    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &doc["5000"][0];
    assert_eq!(first["keyword"], "서울");
    assert_eq!(first["delta"], 999);
    assert_eq!(first["topArticles"][0]["title"], "서울 속보");
}

// src/enrich/mod.rs
//! Article enrichment: attach up to three complete news articles per trend.

pub mod naver;

use anyhow::Result;
use metrics::counter;

use crate::trend::{Article, Trend, MAX_TOP_ARTICLES};

#[async_trait::async_trait]
pub trait ArticleEnricher: Send + Sync {
    /// Top articles for `keyword`, best first. May return more than needed;
    /// the caller keeps complete ones and truncates.
    async fn top_articles(&self, keyword: &str) -> Result<Vec<Article>>;
    fn name(&self) -> &str;
}

/// Enricher that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

#[async_trait::async_trait]
impl ArticleEnricher for NoopEnricher {
    async fn top_articles(&self, _keyword: &str) -> Result<Vec<Article>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Enrich every trend sequentially. A failed lookup leaves that trend without
/// articles. `max_articles` is capped at three.
pub async fn enrich_all(trends: &mut [Trend], enricher: &dyn ArticleEnricher, max_articles: usize) {
    let limit = max_articles.min(MAX_TOP_ARTICLES);
    for trend in trends.iter_mut() {
        match enricher.top_articles(&trend.keyword).await {
            Ok(found) => {
                trend.top_articles = found
                    .into_iter()
                    .filter(Article::is_complete)
                    .take(limit)
                    .collect();
            }
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    enricher = enricher.name(),
                    keyword = %trend.keyword,
                    "article lookup failed"
                );
                counter!("trends_enrich_errors_total").increment(1);
                trend.top_articles.clear();
            }
        }
    }
}

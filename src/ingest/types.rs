// src/ingest/types.rs
use anyhow::Result;

/// A ranked keyword list provider (rank 1 first).
#[async_trait::async_trait]
pub trait KeywordSource: Send + Sync {
    /// Raw keyword strings, best rank first. Failures are reported as `Err`
    /// and collapsed to an empty list by the caller.
    async fn fetch_keywords(&self) -> Result<Vec<String>>;
    fn name(&self) -> &str;
    /// Multiplier applied to this source's rank weights.
    fn bias(&self) -> f64;
}

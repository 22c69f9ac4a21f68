// src/ingest/providers/fixed.rs
use anyhow::Result;
use async_trait::async_trait;

use crate::ingest::types::KeywordSource;

/// Serves a fixed keyword list. Used for offline runs and tests.
#[derive(Debug, Clone)]
pub struct FixedSource {
    name: String,
    bias: f64,
    keywords: Vec<String>,
}

impl FixedSource {
    pub fn new<I, S>(name: &str, bias: f64, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            bias,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl KeywordSource for FixedSource {
    async fn fetch_keywords(&self) -> Result<Vec<String>> {
        Ok(self.keywords.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}

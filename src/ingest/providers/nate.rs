// src/ingest/providers/nate.rs
//! Nate live keyword feed: an EUC-KR encoded JSON array of rows, where the
//! keyword is the second element of each row.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::ingest::types::KeywordSource;

pub const DEFAULT_NATE_URL: &str = "https://www.nate.com/js/data/jsonLiveKeywordDataV1.js";

pub struct NateSource {
    name: String,
    bias: f64,
    url: String,
    client: reqwest::Client,
}

impl NateSource {
    pub fn new(name: &str, bias: f64, url: String, client: reqwest::Client) -> Self {
        Self {
            name: name.to_string(),
            bias,
            url,
            client,
        }
    }
}

/// Extract keywords from the feed body. Rows without a string at index 1 are skipped.
pub fn parse_nate_keywords(body: &str) -> Result<Vec<String>> {
    let trimmed = body.trim_start_matches('\u{feff}').trim();
    let rows: Vec<Value> = serde_json::from_str(trimmed).context("parsing nate keyword json")?;
    Ok(rows
        .iter()
        .filter_map(|row| row.get(1).and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

#[async_trait]
impl KeywordSource for NateSource {
    async fn fetch_keywords(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("nate http get()")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("nate returned status {status}");
        }
        let body = resp
            .text_with_charset("euc-kr")
            .await
            .context("nate http .text()")?;
        parse_nate_keywords(&body)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}

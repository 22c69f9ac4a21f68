// src/ingest/providers/zum.rs
//! Zum search issue ranking, scraped from the `#issue_wrap` block of the
//! search landing page.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::html::{has_classes, inner_text};
use crate::ingest::types::KeywordSource;

pub const DEFAULT_ZUM_URL: &str = "https://search.zum.com/search.zum?query=";

pub struct ZumSource {
    name: String,
    bias: f64,
    url: String,
    client: reqwest::Client,
}

impl ZumSource {
    pub fn new(name: &str, bias: f64, url: String, client: reqwest::Client) -> Self {
        Self {
            name: name.to_string(),
            bias,
            url,
            client,
        }
    }
}

/// Keywords are the `span.txt` texts inside the issue list, in page order.
/// Blank entries are kept so every later keyword stays on its own rank.
pub fn parse_zum_keywords(html: &str) -> Vec<String> {
    static RE_SPAN: OnceCell<Regex> = OnceCell::new();
    let re_span = RE_SPAN
        .get_or_init(|| Regex::new(r"(?is)(<span\b[^>]*>)(.*?)</span>").expect("zum span regex"));

    let Some(start) = html.find("issue_wrap") else {
        return Vec::new();
    };
    let section = &html[start..];
    let section = section.find("</ul>").map_or(section, |end| &section[..end]);

    re_span
        .captures_iter(section)
        .filter_map(|caps| Some((caps.get(1)?, caps.get(2)?)))
        .filter(|(open, _)| has_classes(open.as_str(), &["txt"]))
        .map(|(_, body)| inner_text(body.as_str()))
        .collect()
}

#[async_trait]
impl KeywordSource for ZumSource {
    async fn fetch_keywords(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("zum http get()")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("zum returned status {status}");
        }
        let body = resp.text().await.context("zum http .text()")?;
        Ok(parse_zum_keywords(&body))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}

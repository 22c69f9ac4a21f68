// src/trend.rs
//! Ranked keyword observations and their persisted shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// `delta` value for a keyword absent from the baseline snapshot.
pub const DELTA_NEW: i64 = 999;

/// Most articles attached to one trend.
pub const MAX_TOP_ARTICLES: usize = 3;

/// A news article attached to a trend. The thumbnail is persisted under the
/// historical `thumnail` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub content: String,
    #[serde(rename = "thumnail", alias = "thumbnail")]
    pub thumbnail: String,
}

impl Article {
    /// Only articles with every field filled in are kept.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.link.is_empty()
            && !self.content.is_empty()
            && !self.thumbnail.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trend {
    pub keyword: String,
    pub score: f64,
    pub maxscore: f64,
    #[serde(rename = "hashed")]
    pub fingerprint: String,
    pub delta: i64,
    #[serde(rename = "topArticles", default)]
    pub top_articles: Vec<Article>,
}

impl Trend {
    /// Seed a trend from a single contribution.
    pub fn new(keyword: impl Into<String>, score: f64) -> Self {
        Self::with_maxscore(keyword, score, score)
    }

    pub fn with_maxscore(keyword: impl Into<String>, score: f64, maxscore: f64) -> Self {
        let keyword = keyword.into();
        let fingerprint = fingerprint(&keyword);
        Self {
            keyword,
            score,
            maxscore,
            fingerprint,
            delta: DELTA_NEW,
            top_articles: Vec::new(),
        }
    }

    /// Fold another contribution in: scores add, maxscore keeps the peak.
    pub fn add(&mut self, score: f64, maxscore: f64) {
        self.score += score;
        self.maxscore = self.maxscore.max(maxscore);
    }

    /// Rebuild a trend from a persisted record, using only keyword and scores.
    /// The fingerprint is recomputed; delta and articles start fresh.
    /// Returns `None` for nulls, non-objects and records without a usable keyword.
    pub fn from_persisted(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let keyword = obj.get("keyword")?.as_str()?;
        if keyword.is_empty() {
            return None;
        }
        let score = obj.get("score").and_then(Value::as_f64).unwrap_or(0.0);
        let maxscore = obj.get("maxscore").and_then(Value::as_f64).unwrap_or(score);
        Some(Self::with_maxscore(keyword, score, maxscore))
    }
}

/// Whitespace-insensitive short identifier of a canonical keyword:
/// the first 16 hex chars of SHA-256 over the keyword with all whitespace removed.
pub fn fingerprint(keyword: &str) -> String {
    let compact: String = keyword.chars().filter(|c| !c.is_whitespace()).collect();
    let mut hasher = Sha256::new();
    hasher.update(compact.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(16);
    for b in digest.iter().take(8) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

// src/config/mod.rs
//! Run configuration loaded from TOML.
//!
//! Resolution order:
//! 1) `$TRENDS_CONFIG_PATH` (must exist when set)
//! 2) `config/trends.toml`
//! 3) built-in defaults

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::enrich::naver::DEFAULT_SEARCH_URL;
use crate::ingest::providers::{nate::DEFAULT_NATE_URL, zum::DEFAULT_ZUM_URL};
use crate::retention::DEFAULT_RETENTION_SECS;

pub const ENV_CONFIG_PATH: &str = "TRENDS_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/trends.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Persisted snapshot document.
    pub data_path: PathBuf,
    /// Age in seconds after which a snapshot becomes a baseline candidate.
    pub retention_secs: i64,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub enrich: EnrichConfig,
    /// Source order fixes the merge order of the aggregator.
    pub sources: Vec<SourceConfig>,
    /// Prometheus text file written after each run (node_exporter textfile collector).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_textfile: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnrichConfig {
    pub enabled: bool,
    pub max_articles: usize,
    pub search_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    pub name: String,
    pub kind: SourceKind,
    #[serde(default)]
    pub url: Option<String>,
    pub bias: f64,
    /// Only used by `kind = "fixed"`.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Nate,
    Zum,
    Fixed,
}

impl SourceConfig {
    /// Configured URL, or the well-known endpoint for the source kind.
    pub fn url_or_default(&self) -> Option<String> {
        self.url.clone().or_else(|| match self.kind {
            SourceKind::Nate => Some(DEFAULT_NATE_URL.to_string()),
            SourceKind::Zum => Some(DEFAULT_ZUM_URL.to_string()),
            SourceKind::Fixed => None,
        })
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_articles: 3,
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/trends.json"),
            retention_secs: DEFAULT_RETENTION_SECS,
            http_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; keyword-trends/0.1)".to_string(),
            enrich: EnrichConfig::default(),
            sources: vec![
                SourceConfig {
                    name: "nate".to_string(),
                    kind: SourceKind::Nate,
                    url: None,
                    bias: 0.7,
                    keywords: Vec::new(),
                },
                SourceConfig {
                    name: "zum".to_string(),
                    kind: SourceKind::Zum,
                    url: None,
                    bias: 1.0,
                    keywords: Vec::new(),
                },
            ],
            metrics_textfile: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(s).context("parsing trends config toml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.retention_secs <= 0 {
            bail!("retention_secs must be positive (got {})", self.retention_secs);
        }
        let mut names = HashSet::new();
        for s in &self.sources {
            if s.name.trim().is_empty() {
                bail!("source name must not be empty");
            }
            if !names.insert(s.name.as_str()) {
                bail!("duplicate source name '{}'", s.name);
            }
            if !s.bias.is_finite() || s.bias < 0.0 {
                bail!("source '{}' has invalid bias {}", s.name, s.bias);
            }
        }
        Ok(())
    }
}

/// Load configuration from an explicit TOML file.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading trends config from {}", path.display()))?;
    AppConfig::from_toml_str(&content)
        .with_context(|| format!("loading trends config from {}", path.display()))
}

/// Load configuration using env var + fallbacks (see module docs).
pub fn load_config_default() -> Result<AppConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        }
        return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
    }
    let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_p.exists() {
        return load_config_from(&default_p);
    }
    Ok(AppConfig::default())
}

// src/ingest/providers/mod.rs
pub mod fixed;
pub mod nate;
pub mod zum;

use anyhow::Result;

use crate::config::{SourceConfig, SourceKind};
use crate::ingest::types::KeywordSource;

/// Build the configured sources, in configuration order.
pub fn from_config(
    sources: &[SourceConfig],
    client: &reqwest::Client,
) -> Result<Vec<Box<dyn KeywordSource>>> {
    let mut out: Vec<Box<dyn KeywordSource>> = Vec::with_capacity(sources.len());
    for sc in sources {
        let url = sc.url_or_default();
        let source: Box<dyn KeywordSource> = match sc.kind {
            SourceKind::Nate => Box::new(nate::NateSource::new(
                &sc.name,
                sc.bias,
                url.ok_or_else(|| anyhow::anyhow!("source '{}' has no url", sc.name))?,
                client.clone(),
            )),
            SourceKind::Zum => Box::new(zum::ZumSource::new(
                &sc.name,
                sc.bias,
                url.ok_or_else(|| anyhow::anyhow!("source '{}' has no url", sc.name))?,
                client.clone(),
            )),
            SourceKind::Fixed => Box::new(fixed::FixedSource::new(
                &sc.name,
                sc.bias,
                sc.keywords.iter().cloned(),
            )),
        };
        out.push(source);
    }
    Ok(out)
}

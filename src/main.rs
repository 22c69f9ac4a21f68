//! Trend snapshot job entrypoint.
//! Runs one full cycle (load → fetch → rank → enrich → persist) and exits.

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyword_trends::config::load_config_default;
use keyword_trends::run_cycle;

/// Compact logs; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("keyword_trends=info,trends=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = load_config_default()?;
    info!(
        data_path = %cfg.data_path.display(),
        sources = cfg.sources.len(),
        enrich = cfg.enrich.enabled,
        "starting trend cycle"
    );

    let recorder = match &cfg.metrics_textfile {
        Some(_) => Some(keyword_trends::metrics::install_recorder()?),
        None => None,
    };

    let outcome = run_cycle(&cfg).await;

    // Export counters even when the cycle failed.
    if let (Some(handle), Some(path)) = (&recorder, &cfg.metrics_textfile) {
        if let Err(e) = keyword_trends::metrics::write_textfile(handle, path) {
            warn!(error = ?e, path = %path.display(), "metrics textfile not written");
        }
    }

    let report = outcome?;
    info!(
        timestamp = report.timestamp,
        ranked = report.trends.len(),
        "snapshot persisted"
    );
    Ok(())
}

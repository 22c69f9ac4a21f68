// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod config;
pub mod delta;
pub mod enrich;
pub mod error;
pub mod html;
pub mod ingest;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod retention;
pub mod store;
pub mod trend;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, SourceBatch};
pub use crate::delta::apply_delta;
pub use crate::error::StoreError;
pub use crate::normalize::normalize_keyword;
pub use crate::pipeline::{run_cycle, run_once, RunReport, RunSettings};
pub use crate::store::SnapshotStore;
pub use crate::trend::{fingerprint, Article, Trend, DELTA_NEW};

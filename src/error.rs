// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the snapshot store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot document root must be a mapping ({path})")]
    RootNotMapping { path: PathBuf },

    /// Descending through a node that is not a mapping, or an empty write path.
    #[error("invalid path '{path}': cannot descend at segment '{segment}'")]
    InvalidPath { path: String, segment: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

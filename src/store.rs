// src/store.rs
//! Path-addressed JSON document store.
//!
//! Keys are slash-delimited (`"a/b/c"`, leading/trailing slashes ignored) and
//! address nested mappings. The document is loaded once, mutated in memory and
//! written back once; a missing file is an empty document.
//!
//! Lifecycle: `SnapshotStore::load` → `get`/`update`/`delete` → `persist`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::trend::Trend;

/// Document key holding the list of snapshot timestamps.
pub const TIMESTAMPS_KEY: &str = "timestamps";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    doc: Value,
}

impl SnapshotStore {
    /// Empty in-memory document bound to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            doc: Value::Object(Map::new()),
        }
    }

    /// Load the document at `path`. A missing file yields an empty document;
    /// unparseable content or a non-mapping root is an error.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::new(path));
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let doc: Value = serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;
        if !doc.is_object() {
            return Err(StoreError::RootNotMapping { path });
        }
        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Value {
        &self.doc
    }

    /// Value at `path`, `None` as soon as a segment is absent.
    /// An empty path returns the whole document.
    pub fn get(&self, path: &str) -> StoreResult<Option<&Value>> {
        let mut cur = &self.doc;
        for seg in segments(path) {
            match cur {
                Value::Object(map) => match map.get(seg) {
                    Some(next) => cur = next,
                    None => return Ok(None),
                },
                _ => return Err(invalid_path(path, seg)),
            }
        }
        Ok(Some(cur))
    }

    /// Like [`get`](Self::get) but falls back to `default`.
    pub fn get_or(&self, path: &str, default: Value) -> StoreResult<Value> {
        Ok(self.get(path)?.cloned().unwrap_or(default))
    }

    /// Set the value at `path`, creating missing intermediate mappings.
    pub fn update(&mut self, path: &str, value: Value) -> StoreResult<()> {
        let segs = segments(path);
        let Some((leaf, parents)) = segs.split_last() else {
            return Err(invalid_path(path, ""));
        };

        let mut cur = &mut self.doc;
        for seg in parents {
            let map = match cur {
                Value::Object(map) => map,
                _ => return Err(invalid_path(path, seg)),
            };
            cur = map
                .entry(seg.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        match cur {
            Value::Object(map) => {
                map.insert(leaf.to_string(), value);
                Ok(())
            }
            _ => Err(invalid_path(path, leaf)),
        }
    }

    /// Remove the value at `path`. Absent paths are a no-op.
    ///
    /// After a nested removal, each level checks the one child named by the next
    /// path segment and drops it if it is now an empty mapping. The top-level
    /// segment itself is never dropped this way, so deleting `a/b` leaves `a`
    /// in place even when it becomes `{}`.
    pub fn delete(&mut self, path: &str) -> StoreResult<()> {
        let segs = segments(path);
        if segs.is_empty() {
            return Ok(());
        }
        delete_in(&mut self.doc, &segs, path)
    }

    /// Write the document as 4-space indented JSON via a temp file + rename.
    pub fn persist(&self) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.doc.serialize(&mut ser)?;

        let tmp = tmp_path(&self.path);
        fs::write(&tmp, &buf).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Snapshot timestamps recorded in the document. Non-integer entries are skipped.
    pub fn timestamps(&self) -> StoreResult<Vec<i64>> {
        Ok(match self.get(TIMESTAMPS_KEY)? {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_i64).collect(),
            Some(other) => {
                tracing::warn!(value = %other, "timestamps entry is not a list; ignoring");
                Vec::new()
            }
            None => Vec::new(),
        })
    }

    pub fn set_timestamps(&mut self, timestamps: &[i64]) -> StoreResult<()> {
        self.update(TIMESTAMPS_KEY, serde_json::to_value(timestamps)?)
    }

    /// Trends stored under `timestamp`, rebuilt from keyword and scores.
    pub fn snapshot(&self, timestamp: i64) -> StoreResult<Vec<Trend>> {
        Ok(match self.get(&timestamp.to_string())? {
            Some(Value::Array(items)) => items.iter().filter_map(Trend::from_persisted).collect(),
            _ => Vec::new(),
        })
    }

    pub fn put_snapshot(&mut self, timestamp: i64, trends: &[Trend]) -> StoreResult<()> {
        self.update(&timestamp.to_string(), serde_json::to_value(trends)?)
    }
}

fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn invalid_path(path: &str, segment: &str) -> StoreError {
    StoreError::InvalidPath {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

fn delete_in(node: &mut Value, segs: &[&str], path: &str) -> StoreResult<()> {
    let first = segs[0];
    let map = match node {
        Value::Object(map) => map,
        _ => return Err(invalid_path(path, first)),
    };
    if !map.contains_key(first) {
        return Ok(());
    }
    if segs.len() == 1 {
        map.shift_remove(first);
        return Ok(());
    }

    if let Some(child) = map.get_mut(first) {
        delete_in(child, &segs[1..], path)?;
    }

    // Shallow prune: only `first/segs[1]` is inspected.
    if let Some(Value::Object(child)) = map.get_mut(first) {
        let emptied = matches!(child.get(segs[1]), Some(Value::Object(m)) if m.is_empty());
        if emptied {
            child.shift_remove(segs[1]);
        }
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".tmp");
    PathBuf::from(s)
}

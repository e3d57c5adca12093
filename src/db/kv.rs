// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value store backends.
//!
//! The core only needs `get`/`set`/`remove` of JSON values. Two backends
//! are provided:
//! - `MemoryStore` for tests and embedding hosts with their own persistence
//! - `FileStore` which mirrors the map into a single JSON file

use crate::error::{AppError, Result};
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Opaque key-value persistence.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object on disk.
///
/// Every mutation rewrites the file through a temporary sibling and a
/// rename, so a crash leaves either the old or the new document.
pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, Value>,
}

impl FileStore {
    /// Open a store, loading existing contents if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = DashMap::new();

        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                AppError::Storage(format!("Failed to read {}: {}", path.display(), e))
            })?;
            if !raw.trim().is_empty() {
                let map: BTreeMap<String, Value> = serde_json::from_str(&raw)?;
                for (k, v) in map {
                    entries.insert(k, v);
                }
            }
            tracing::info!(path = %path.display(), keys = entries.len(), "Loaded data file");
        } else {
            tracing::info!(path = %path.display(), "Data file not found, starting empty");
        }

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> BTreeMap<String, Value> {
        // Sorted keys keep the file diffable
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    /// Write `snapshot` as the new file contents.
    fn flush(&self, snapshot: &BTreeMap<String, Value>) -> Result<()> {
        let body = serde_json::to_string_pretty(snapshot)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

/// The in-memory map only changes after the file write succeeded.
impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut snapshot = self.snapshot();
        snapshot.insert(key.to_string(), value.clone());
        self.flush(&snapshot)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut snapshot = self.snapshot();
        snapshot.remove(key);
        self.flush(&snapshot)?;
        self.entries.remove(key);
        Ok(())
    }
}

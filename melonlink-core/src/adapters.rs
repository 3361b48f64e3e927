//! Default port implementations.

use crate::ports::ProjectFs;
use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Filesystem access via `fs_err::tokio`.
#[derive(Debug, Clone, Default)]
pub struct FsProjectFs;

impl ProjectFs for FsProjectFs {
    async fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs_err::tokio::read_to_string(path.as_std_path())
            .await
            .with_context(|| format!("read {}", path))
    }

    async fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        fs_err::tokio::write(path.as_std_path(), contents)
            .await
            .with_context(|| format!("write {}", path))
    }
}

/// In-memory project for embedding and testing.
///
/// Writes to paths registered with [`fail_writes_to`](Self::fail_writes_to)
/// return an error, and every successful write is logged in order.
#[derive(Debug, Default)]
pub struct MemProjectFs {
    files: Mutex<BTreeMap<Utf8PathBuf, String>>,
    failing: Mutex<BTreeSet<Utf8PathBuf>>,
    writes: Mutex<Vec<Utf8PathBuf>>,
}

impl MemProjectFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), contents.into());
        self
    }

    pub fn fail_writes_to(self, path: impl Into<Utf8PathBuf>) -> Self {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
        self
    }

    pub fn get(&self, path: &Utf8Path) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<Utf8PathBuf> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProjectFs for MemProjectFs {
    async fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.get(path)
            .ok_or_else(|| anyhow!("read {}: no such file", path))
    }

    async fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        if self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
        {
            return Err(anyhow!("write {}: injected failure", path));
        }

        debug!(path = %path, bytes = contents.len(), "in-memory write");
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), contents.to_string());
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_path_buf());
        Ok(())
    }
}

// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Payload store - where decoded upload bytes actually land
//!
//! The ingestion path depends only on this interface; the filesystem
//! implementation is one of several possible backends (relational blobs and
//! object storage being the obvious alternatives).

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::{Result, StoreError};

/// Reference to a stored payload, relative to the store root
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredRef {
    pub relative_path: String,
    pub bytes_written: u64,
}

/// Storage interface for decoded payload bytes
pub trait PayloadStore: Send + Sync {
    /// Persist `bytes` under `relative_path` (directories created as needed).
    fn write(&self, relative_path: &str, bytes: &[u8]) -> Result<StoredRef>;

    /// Read a stored payload back.
    fn read(&self, relative_path: &str) -> Result<Vec<u8>>;

    /// Remove everything stored under `prefix`. Missing prefix is a no-op.
    fn delete_prefix(&self, prefix: &str) -> Result<()>;
}

/// Filesystem-backed payload store rooted at a data directory
pub struct FsPayloadStore {
    root: PathBuf,
}

impl FsPayloadStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Resolve a relative path against the root, refusing anything that could
    /// escape it. Callers sanitize filenames, but the check here is the last
    /// line against traversal through a composed path.
    fn resolve(&self, relative_path: &str) -> Result<PathBuf> {
        let rel = Path::new(relative_path);
        let safe = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if relative_path.is_empty() || !safe {
            return Err(StoreError::UnsafePath(relative_path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

impl PayloadStore for FsPayloadStore {
    fn write(&self, relative_path: &str, bytes: &[u8]) -> Result<StoredRef> {
        let full = self.resolve(relative_path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, bytes)?;
        debug!("Stored {} bytes at {}", bytes.len(), full.display());
        Ok(StoredRef {
            relative_path: relative_path.to_string(),
            bytes_written: bytes.len() as u64,
        })
    }

    fn read(&self, relative_path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(relative_path)?;
        Ok(fs::read(full)?)
    }

    fn delete_prefix(&self, prefix: &str) -> Result<()> {
        let full = self.resolve(prefix)?;
        match fs::remove_dir_all(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

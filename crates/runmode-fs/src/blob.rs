//! Keyed durable blob storage
//!
//! Instance records (identity, persisted install options) are small named
//! blobs. [`BlobStore`] is the seam between the resolution core and the
//! medium that holds them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Error, NormalizedPath, Result, io};

/// A keyed store of durable byte records.
pub trait BlobStore: Send + Sync {
    /// Read the named record. A record that does not exist is `Ok(None)`.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the named record. Readers never observe a partial write.
    fn write(&self, name: &str, content: &[u8]) -> Result<()>;

    /// Human readable location of a record, for log messages.
    fn describe(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Validate a record name.
///
/// Names map to single files, so separators and relative components
/// are rejected.
pub fn validate_record_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else if name == "." || name == ".." {
        Some("name is a relative path component")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Blob store backed by a data directory, one file per record.
#[derive(Debug, Clone)]
pub struct DirBlobStore {
    root: NormalizedPath,
}

impl DirBlobStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// on the first write.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Path of the file backing a record.
    pub fn record_path(&self, name: &str) -> Result<NormalizedPath> {
        validate_record_name(name)?;
        Ok(self.root.join(name))
    }
}

impl BlobStore for DirBlobStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.record_path(name)?;
        io::read_if_exists(&path)
    }

    fn write(&self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.record_path(name)?;
        io::write_atomic(&path, content)
    }

    fn describe(&self, name: &str) -> String {
        self.root.join(name).to_string()
    }
}

/// In-memory blob store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(name))
            .unwrap_or(false)
    }

    /// Drop a record.
    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.records
            .write()
            .ok()
            .and_then(|mut records| records.remove(name))
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        validate_record_name(name)?;
        let records = self.records.read().map_err(|_| poisoned(name))?;
        Ok(records.get(name).cloned())
    }

    fn write(&self, name: &str, content: &[u8]) -> Result<()> {
        validate_record_name(name)?;
        let mut records = self.records.write().map_err(|_| poisoned(name))?;
        records.insert(name.to_string(), content.to_vec());
        Ok(())
    }

    fn describe(&self, name: &str) -> String {
        format!("memory:{name}")
    }
}

fn poisoned(name: &str) -> Error {
    Error::LockFailed {
        path: format!("memory:{name}").into(),
    }
}

//! Error types for runmode-core

use std::path::PathBuf;

/// Result type for runmode-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in runmode-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A durable record could not be read, decoded or written.
    ///
    /// Fatal for resolution: install option selections cannot be guessed.
    #[error("Storage error for {record}: {message}")]
    Storage { record: String, message: String },

    /// The settings file exists but cannot be used
    #[error("Invalid settings at {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    /// Filesystem error from runmode-fs
    #[error(transparent)]
    Fs(#[from] runmode_fs::Error),
}

impl Error {
    pub fn storage(record: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Storage {
            record: record.into(),
            message: message.to_string(),
        }
    }
}

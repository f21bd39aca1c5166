//! Filesystem abstraction for run mode settings
//!
//! Provides normalized paths, atomic locked writes, the keyed blob store
//! used for durable instance state, and format-agnostic settings loading.

pub mod blob;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use blob::{BlobStore, DirBlobStore, MemoryBlobStore, validate_record_name};
pub use config::ConfigStore;
pub use constants::HomePath;
pub use error::{Error, Result};
pub use path::NormalizedPath;

//! Instance identity
//!
//! Every instance carries a UUID that survives restarts. Unlike the install
//! options record, identity problems never abort startup: an unreadable or
//! corrupt record is replaced by a fresh identity.

use std::fmt;
use std::str::FromStr;

use runmode_fs::{BlobStore, HomePath};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the hyphenated UUID text stored in the record.
const ID_LENGTH: usize = 36;

/// Unique identifier of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generate a new random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Load the identity from `store`, creating and saving one if needed.
    pub fn load_or_create(store: &dyn BlobStore) -> Self {
        let name = HomePath::InstanceIdRecord.as_str();
        let location = store.describe(name);

        match store.read(name) {
            Ok(Some(bytes)) => match Self::decode(&bytes) {
                Some(id) => {
                    tracing::info!("Read instance id {} from {}", id, location);
                    return id;
                }
                None => tracing::warn!("Ignoring invalid instance id record {}", location),
            },
            Ok(None) => {}
            Err(e) => tracing::error!("Failed reading instance id from {}: {}", location, e),
        }

        let id = Self::generate();
        tracing::info!("Created new instance id {}", id);
        if let Err(e) = store.write(name, id.to_string().as_bytes()) {
            tracing::error!("Failed writing instance id to {}: {}", location, e);
        }
        id
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(&bytes[..bytes.len().min(ID_LENGTH)]);
        text.trim().parse().ok()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for InstanceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

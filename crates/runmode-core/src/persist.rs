//! Persisted install option selections
//!
//! Install option groups are saved after every resolution so that the next
//! start replays the same selections, whatever the raw mode list says then.
//! The record is versioned TOML:
//!
//! ```toml
//! version = 1
//! saved_at = "2026-01-01T00:00:00Z"
//!
//! [[groups]]
//! modes = ["a", "b", "c"]
//! selected = "a"
//! ```

use chrono::{DateTime, Utc};
use runmode_fs::{BlobStore, HomePath};
use serde::{Deserialize, Serialize};

use crate::modes::ModeSet;
use crate::options::OptionGroup;
use crate::{Error, Result};

/// Current record format version.
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct OptionsRecord {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    groups: Vec<OptionGroup>,
}

/// Store for the persisted install options record.
pub struct PersistedOptions<'a> {
    store: &'a dyn BlobStore,
    name: &'a str,
}

impl<'a> PersistedOptions<'a> {
    /// Use the default record name inside `store`.
    pub fn new(store: &'a dyn BlobStore) -> Self {
        Self {
            store,
            name: HomePath::InstallOptionsRecord.as_str(),
        }
    }

    /// Load the previously saved groups.
    ///
    /// A missing record is `Ok(None)`. A record that cannot be read or
    /// decoded is a [`Error::Storage`].
    pub fn load(&self) -> Result<Option<Vec<OptionGroup>>> {
        let location = self.store.describe(self.name);
        let Some(bytes) = self
            .store
            .read(self.name)
            .map_err(|e| Error::storage(&location, format!("unable to read options record: {e}")))?
        else {
            tracing::debug!(record = %location, "No persisted install options");
            return Ok(None);
        };

        let groups = decode(&bytes).map_err(|message| Error::storage(&location, message))?;
        tracing::debug!(record = %location, groups = groups.len(), "Loaded persisted install options");
        Ok(Some(groups))
    }

    /// Replace the record with `groups`, even when empty.
    pub fn save(&self, groups: &[OptionGroup]) -> Result<()> {
        let location = self.store.describe(self.name);
        let content = encode(groups, Utc::now()).map_err(|message| Error::storage(&location, message))?;
        self.store
            .write(self.name, content.as_bytes())
            .map_err(|e| Error::storage(&location, format!("unable to write options record: {e}")))?;
        tracing::debug!(record = %location, groups = groups.len(), "Saved install options");
        Ok(())
    }
}

/// Re-apply persisted selections to the working set.
///
/// For each group every candidate is removed, then the selected one is
/// added back. Modes outside the groups are untouched.
pub fn replay(mut active: ModeSet, groups: &[OptionGroup]) -> ModeSet {
    for group in groups {
        for mode in group.modes() {
            active.remove(mode);
        }
        active.insert(group.selected().to_string());
    }
    active
}

fn encode(groups: &[OptionGroup], saved_at: DateTime<Utc>) -> std::result::Result<String, String> {
    let record = OptionsRecord {
        version: RECORD_VERSION,
        saved_at: Some(saved_at),
        groups: groups.to_vec(),
    };
    toml::to_string_pretty(&record).map_err(|e| format!("unable to encode options record: {e}"))
}

fn decode(bytes: &[u8]) -> std::result::Result<Vec<OptionGroup>, String> {
    let content =
        std::str::from_utf8(bytes).map_err(|e| format!("options record is not UTF-8: {e}"))?;
    let record: OptionsRecord =
        toml::from_str(content).map_err(|e| format!("unable to decode options record: {e}"))?;

    if record.version != RECORD_VERSION {
        return Err(format!(
            "unsupported options record version {} (expected {RECORD_VERSION})",
            record.version
        ));
    }
    if let Some((index, _)) = record.groups.iter().enumerate().find(|(_, g)| !g.is_valid()) {
        return Err(format!(
            "options record group {index} selects a mode that is not one of its candidates"
        ));
    }
    Ok(record.groups)
}

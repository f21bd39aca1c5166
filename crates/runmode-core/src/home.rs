//! Home directory layout
//!
//! ```text
//! <home>/settings.toml                optional settings file
//! <home>/data/instance.id             instance identity record
//! <home>/data/install-options.toml    persisted install options
//! ```

use std::path::PathBuf;

use runmode_fs::{DirBlobStore, HomePath, NormalizedPath};

use crate::Result;
use crate::properties::{EnvProperties, LayeredProperties, PropertySource};
use crate::settings::{Settings, SettingsFile};

/// Directory name used below the platform data directory.
pub const APP_DIR: &str = "runmode";

/// An instance home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Home {
    root: NormalizedPath,
}

impl Home {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    /// The platform default home:
    /// - Linux: `~/.local/share/runmode/`
    /// - macOS: `~/Library/Application Support/runmode/`
    /// - Windows: `%LOCALAPPDATA%\runmode\`
    pub fn platform_default() -> Option<Self> {
        dirs::data_local_dir().map(|d| Self::new(d.join(APP_DIR)))
    }

    /// Resolve an explicit home, falling back to the platform default and
    /// finally the current directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        match explicit {
            Some(path) => Self::new(path),
            None => Self::platform_default().unwrap_or_else(|| Self::new(".")),
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn data_dir(&self) -> NormalizedPath {
        self.root.join(HomePath::DataDir.as_str())
    }

    /// Blob store over the data directory.
    pub fn data_store(&self) -> DirBlobStore {
        DirBlobStore::new(self.data_dir())
    }

    /// First settings file present in the home, if any.
    pub fn settings_path(&self) -> Option<NormalizedPath> {
        HomePath::settings_candidates()
            .iter()
            .map(|name| self.root.join(name))
            .find(NormalizedPath::is_file)
    }

    /// Load the settings file, or the empty default when there is none.
    pub fn settings_file(&self) -> Result<SettingsFile> {
        match self.settings_path() {
            Some(path) => SettingsFile::load(&path),
            None => {
                tracing::debug!(home = %self.root, "No settings file");
                Ok(SettingsFile::default())
            }
        }
    }

    /// Resolve the settings of this home.
    ///
    /// Properties come from `overrides`, then `RUNMODE_*` environment
    /// variables, then the settings file. The reported home is the
    /// canonical form of the root when it can be resolved.
    pub fn load_settings(&self, overrides: &dyn PropertySource) -> Result<Settings> {
        let file = self.settings_file()?;
        let props = LayeredProperties::new()
            .then(overrides)
            .then(EnvProperties::new())
            .then(file);
        let store = self.data_store();
        let settings = Settings::load(&store, &props)?;

        // The data directory exists once the identity is stored
        let root = self.root.canonicalize().unwrap_or_else(|e| {
            tracing::debug!(home = %self.root, error = %e, "Keeping home path as given");
            self.root.clone()
        });
        Ok(settings.with_home(root))
    }
}

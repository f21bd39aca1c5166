//! Constants and enums for the run mode home directory layout.

use std::path::Path;

/// Well-known entries below the home directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomePath {
    /// The `data` directory holding durable instance records
    DataDir,
    /// The default settings file (`settings.toml`)
    SettingsFile,
    /// The instance identity record inside the data directory
    InstanceIdRecord,
    /// The persisted install options record inside the data directory
    InstallOptionsRecord,
}

impl HomePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataDir => "data",
            Self::SettingsFile => "settings.toml",
            Self::InstanceIdRecord => "instance.id",
            Self::InstallOptionsRecord => "install-options.toml",
        }
    }

    /// Alternative settings file names, probed after `settings.toml`.
    pub fn settings_candidates() -> &'static [&'static str] {
        &["settings.toml", "settings.json", "settings.yaml", "settings.yml"]
    }
}

impl AsRef<Path> for HomePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for HomePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for HomePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

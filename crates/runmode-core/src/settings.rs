//! Instance settings
//!
//! [`Settings`] is built once at startup and handed to whoever needs it.
//! It never changes afterwards.

use std::collections::BTreeMap;

use runmode_fs::{BlobStore, ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::identity::InstanceId;
use crate::modes::RunModes;
use crate::properties::{
    INSTANCE_DESCRIPTION, INSTANCE_NAME, KNOWN_KEYS, PropertySource, RUN_MODE_INSTALL_OPTIONS,
    RUN_MODE_OPTIONS, RUN_MODES, collect_properties,
};
use crate::resolver::{Resolution, RunModeResolver};
use crate::spec;
use crate::{Error, Result};

/// `[instance]` section of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `[run-modes]` section of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunModeSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_options: Option<String>,
}

/// The optional settings file of a home directory.
///
/// ```toml
/// [instance]
/// name = "author-1"
///
/// [run-modes]
/// modes = "dev,author"
/// install-options = "crx3,crx3mongo"
///
/// [properties]
/// "http.port" = "4502"
/// ```
///
/// The `[properties]` table carries any further launch properties. Well
/// known keys are only read from their own sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub instance: InstanceSection,
    #[serde(default, rename = "run-modes")]
    pub run_modes: RunModeSection,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl SettingsFile {
    /// Load a settings file; the format follows the extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        ConfigStore::new().load(path).map_err(|e| match e {
            runmode_fs::Error::ConfigParse {
                path,
                format,
                message,
            } => Error::InvalidSettings {
                path,
                message: format!("{format}: {message}"),
            },
            other => Error::Fs(other),
        })
    }

    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        Ok(ConfigStore::new().save(path, self)?)
    }
}

impl PropertySource for SettingsFile {
    fn property(&self, key: &str) -> Option<String> {
        match key {
            RUN_MODES => self.run_modes.modes.clone(),
            RUN_MODE_OPTIONS => self.run_modes.options.clone(),
            RUN_MODE_INSTALL_OPTIONS => self.run_modes.install_options.clone(),
            INSTANCE_NAME => self.instance.name.clone(),
            INSTANCE_DESCRIPTION => self.instance.description.clone(),
            _ => self.properties.get(key).cloned(),
        }
    }

    fn keys(&self) -> Vec<String> {
        KNOWN_KEYS
            .iter()
            .filter(|key| self.property(key).is_some())
            .map(|key| key.to_string())
            .chain(
                self.properties
                    .keys()
                    .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
                    .cloned(),
            )
            .collect()
    }
}

/// Resolved settings of a running instance.
#[derive(Debug, Clone)]
pub struct Settings {
    id: InstanceId,
    home: Option<NormalizedPath>,
    name: Option<String>,
    description: Option<String>,
    properties: BTreeMap<String, String>,
    resolution: Resolution,
}

impl Settings {
    /// Resolve identity and run modes.
    ///
    /// Identity problems are logged and recovered from; persisted options
    /// problems are returned as [`Error::Storage`].
    pub fn load(store: &dyn BlobStore, props: &dyn PropertySource) -> Result<Self> {
        let id = InstanceId::load_or_create(store);
        let resolution = RunModeResolver::new(store).resolve(props)?;

        Ok(Self {
            id,
            home: None,
            name: props.property(INSTANCE_NAME),
            description: props.property(INSTANCE_DESCRIPTION),
            properties: collect_properties(props),
            resolution,
        })
    }

    pub fn with_home(mut self, home: NormalizedPath) -> Self {
        self.home = Some(home);
        self
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Configured name, or `Instance <id>`.
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Instance {}", self.id))
    }

    /// Configured description, or one built from id and run modes.
    pub fn description(&self) -> String {
        self.description.clone().unwrap_or_else(|| {
            format!(
                "Instance with id {} and run modes {}",
                self.id,
                self.run_modes()
            )
        })
    }

    pub fn home(&self) -> Option<&NormalizedPath> {
        self.home.as_ref()
    }

    /// The home directory as a `file:` URL, when the home is absolute.
    pub fn home_url(&self) -> Option<Url> {
        let home = self.home.as_ref()?;
        Url::from_directory_path(home.to_native()).ok()
    }

    /// Launch properties as seen at load time, sorted by key.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// `relative` resolved against the home directory.
    pub fn absolute_path_within_home(&self, relative: &str) -> Option<NormalizedPath> {
        self.home.as_ref().map(|home| home.join(relative))
    }

    pub fn run_modes(&self) -> &RunModes {
        &self.resolution.run_modes
    }

    /// Details of the resolution that produced the run modes.
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Strength of `spec` against the active run modes.
    pub fn best_match_count(&self, spec: &str) -> usize {
        spec::best_match_count(spec, self.run_modes())
    }

    /// Most specific of `candidates` for the active run modes.
    pub fn select_best<'s>(&self, candidates: impl IntoIterator<Item = &'s str>) -> Option<(usize, usize)> {
        spec::select_best(candidates, self.run_modes())
    }
}

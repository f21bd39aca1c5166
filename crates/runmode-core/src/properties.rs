//! Property sources
//!
//! The resolver reads its raw inputs by key from a [`PropertySource`].
//! Sources can be stacked with [`LayeredProperties`]; the first source that
//! knows a key wins. [`collect_properties`] takes a sorted snapshot of the
//! effective values for reporting.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Base run modes, comma separated.
pub const RUN_MODES: &str = "run.modes";

/// Plain option groups, resolved fresh on every start.
pub const RUN_MODE_OPTIONS: &str = "run.mode.options";

/// Install option groups, persisted across restarts.
pub const RUN_MODE_INSTALL_OPTIONS: &str = "run.mode.install.options";

/// Human readable instance name.
pub const INSTANCE_NAME: &str = "instance.name";

/// Human readable instance description.
pub const INSTANCE_DESCRIPTION: &str = "instance.description";

/// Keys every property snapshot reports when they have a value.
pub const KNOWN_KEYS: [&str; 5] = [
    RUN_MODES,
    RUN_MODE_OPTIONS,
    RUN_MODE_INSTALL_OPTIONS,
    INSTANCE_NAME,
    INSTANCE_DESCRIPTION,
];

/// Read-only keyed access to configuration properties.
pub trait PropertySource {
    fn property(&self, key: &str) -> Option<String>;

    /// Keys this source holds a value for.
    ///
    /// Sources that can only be queried, like the environment, list nothing.
    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn property(&self, key: &str) -> Option<String> {
        (**self).property(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

impl<T: PropertySource + ?Sized> PropertySource for Box<T> {
    fn property(&self, key: &str) -> Option<String> {
        (**self).property(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// Effective value of every listed and well-known key, sorted by key.
///
/// Keys are gathered from [`PropertySource::keys`] plus [`KNOWN_KEYS`];
/// each value is looked up through `source`, so a higher layer overrides
/// the value of a key that only a lower layer lists.
pub fn collect_properties(source: &dyn PropertySource) -> BTreeMap<String, String> {
    let mut keys: BTreeSet<String> = source.keys().into_iter().collect();
    keys.extend(KNOWN_KEYS.iter().map(|key| key.to_string()));

    keys.into_iter()
        .filter_map(|key| source.property(&key).map(|value| (key, value)))
        .collect()
}

/// In-memory properties.
#[derive(Debug, Clone, Default)]
pub struct MapProperties {
    values: HashMap<String, String>,
}

impl MapProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Insert only when `value` is present.
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for MapProperties {
    fn property(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Properties read from environment variables.
///
/// `run.mode.options` maps to `RUNMODE_RUN_MODE_OPTIONS` with the default
/// prefix.
#[derive(Debug, Clone)]
pub struct EnvProperties {
    prefix: String,
}

impl EnvProperties {
    pub const DEFAULT_PREFIX: &'static str = "RUNMODE_";

    pub fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The variable name consulted for `key`.
    pub fn variable_name(&self, key: &str) -> String {
        let suffix: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        format!("{}{}", self.prefix, suffix)
    }
}

impl Default for EnvProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySource for EnvProperties {
    fn property(&self, key: &str) -> Option<String> {
        std::env::var(self.variable_name(key)).ok()
    }
}

/// Stack of sources consulted in order.
#[derive(Default)]
pub struct LayeredProperties<'a> {
    layers: Vec<Box<dyn PropertySource + 'a>>,
}

impl<'a> LayeredProperties<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a source with lower precedence than the ones already added.
    pub fn then(mut self, source: impl PropertySource + 'a) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl PropertySource for LayeredProperties<'_> {
    fn property(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.property(key))
    }

    fn keys(&self) -> Vec<String> {
        self.layers.iter().flat_map(|layer| layer.keys()).collect()
    }
}

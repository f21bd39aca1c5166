//! Run mode resolution and specification matching
//!
//! Run modes are named tags describing where an instance runs (`dev`,
//! `author`, `publish`, ...). This crate resolves the active set once at
//! startup and answers specification queries against it.
//!
//! - **Parsing**: comma separated base modes ([`parse_modes`])
//! - **Option groups**: mutually exclusive choices, one selected per group
//!   ([`resolve_options`])
//! - **Install options**: option groups whose selection is persisted and
//!   replayed on every restart ([`PersistedOptions`])
//! - **Resolution**: the fixed precedence pass producing [`RunModes`]
//!   ([`RunModeResolver`])
//! - **Matching**: OR/AND/NOT specifications ranked by specificity
//!   ([`best_match_count`])
//! - **Reports**: settings and launch property printers ([`write_settings`],
//!   [`write_properties`])
//!
//! # Architecture
//!
//! ```text
//!                  runmode-cli
//!                       |
//!                 runmode-core
//!      (Settings, resolver, matcher, identity)
//!                       |
//!                  runmode-fs
//!       (BlobStore, atomic writes, ConfigStore)
//! ```
//!
//! # Example
//!
//! ```
//! use runmode_core::{MapProperties, RUN_MODES, Settings};
//! use runmode_fs::MemoryBlobStore;
//!
//! let store = MemoryBlobStore::new();
//! let props = MapProperties::new().with(RUN_MODES, "author,dev");
//! let settings = Settings::load(&store, &props).unwrap();
//!
//! assert_eq!(settings.best_match_count("author.dev,publish"), 2);
//! ```

pub mod error;
pub mod home;
pub mod identity;
pub mod modes;
pub mod options;
pub mod persist;
pub mod properties;
pub mod report;
pub mod resolver;
pub mod settings;
pub mod spec;

pub use error::{Error, Result};
pub use home::Home;
pub use identity::InstanceId;
pub use modes::{ModeLookup, ModeSet, RunModes, parse_modes};
pub use options::{OptionGroup, resolve_options};
pub use persist::{PersistedOptions, replay};
pub use properties::{
    EnvProperties, INSTANCE_DESCRIPTION, INSTANCE_NAME, KNOWN_KEYS, LayeredProperties,
    MapProperties, PropertySource, RUN_MODE_INSTALL_OPTIONS, RUN_MODE_OPTIONS, RUN_MODES,
    collect_properties,
};
pub use report::{SettingsReport, write_properties, write_run_modes, write_settings};
pub use resolver::{Resolution, RunModeInputs, RunModeResolver};
pub use settings::{Settings, SettingsFile};
pub use spec::{MatchSpec, best_match_count, select_best};

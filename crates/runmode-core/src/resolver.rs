//! Run mode resolution
//!
//! Resolution is a single linear pass with a fixed precedence:
//!
//! 1. parse the base modes
//! 2. resolve plain option groups (never persisted)
//! 3. replay persisted install option selections
//! 4. resolve install option groups on top of the replayed state
//! 5. save the install option groups, even when there are none
//! 6. freeze the working set

use runmode_fs::BlobStore;

use crate::Result;
use crate::modes::{RunModes, parse_modes};
use crate::options::{OptionGroup, resolve_options};
use crate::persist::{PersistedOptions, replay};
use crate::properties::{PropertySource, RUN_MODE_INSTALL_OPTIONS, RUN_MODE_OPTIONS, RUN_MODES};

/// Raw resolution inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunModeInputs {
    pub modes: Option<String>,
    pub options: Option<String>,
    pub install_options: Option<String>,
}

impl RunModeInputs {
    /// Read the inputs from their well-known property keys.
    pub fn from_properties(props: &dyn PropertySource) -> Self {
        Self {
            modes: props.property(RUN_MODES),
            options: props.property(RUN_MODE_OPTIONS),
            install_options: props.property(RUN_MODE_INSTALL_OPTIONS),
        }
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The frozen active set.
    pub run_modes: RunModes,
    /// Plain option groups as resolved on this start.
    pub plain_groups: Vec<OptionGroup>,
    /// Install option groups, as saved for the next start.
    pub install_groups: Vec<OptionGroup>,
    /// Install option groups replayed from the previous start.
    pub replayed_groups: Vec<OptionGroup>,
}

/// Resolves run modes against a durable store.
pub struct RunModeResolver<'a> {
    persisted: PersistedOptions<'a>,
}

impl<'a> RunModeResolver<'a> {
    pub fn new(store: &'a dyn BlobStore) -> Self {
        Self {
            persisted: PersistedOptions::new(store),
        }
    }

    /// Resolve from a property source.
    pub fn resolve(&self, props: &dyn PropertySource) -> Result<Resolution> {
        self.resolve_inputs(&RunModeInputs::from_properties(props))
    }

    /// Resolve from raw inputs.
    ///
    /// Failing to read or write the persisted options record aborts
    /// resolution with [`crate::Error::Storage`].
    pub fn resolve_inputs(&self, inputs: &RunModeInputs) -> Result<Resolution> {
        let active = parse_modes(inputs.modes.as_deref());

        let (active, plain_groups) = resolve_options(active, inputs.options.as_deref());

        let replayed_groups = self.persisted.load()?.unwrap_or_default();
        let active = replay(active, &replayed_groups);

        let (active, install_groups) = resolve_options(active, inputs.install_options.as_deref());
        self.persisted.save(&install_groups)?;

        let run_modes = RunModes::freeze(active);
        if run_modes.is_empty() {
            tracing::info!("No run modes active");
        } else {
            tracing::info!("Active run modes: {}", run_modes);
        }

        Ok(Resolution {
            run_modes,
            plain_groups,
            install_groups,
            replayed_groups,
        })
    }
}

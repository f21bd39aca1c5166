//! Command context
//!
//! Turns the global CLI options into the home directory and the property
//! overrides used to resolve settings.

use std::path::PathBuf;

use runmode_core::{
    Home, MapProperties, RUN_MODE_INSTALL_OPTIONS, RUN_MODE_OPTIONS, RUN_MODES, Settings,
};

use crate::cli::Cli;
use crate::error::Result;

/// Everything a command needs to resolve settings.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub home: Home,
    pub overrides: MapProperties,
}

impl CommandContext {
    pub fn new(
        home: Option<PathBuf>,
        modes: Option<String>,
        options: Option<String>,
        install_options: Option<String>,
    ) -> Self {
        let mut overrides = MapProperties::new();
        overrides.set_opt(RUN_MODES, modes);
        overrides.set_opt(RUN_MODE_OPTIONS, options);
        overrides.set_opt(RUN_MODE_INSTALL_OPTIONS, install_options);

        Self {
            home: Home::resolve(home),
            overrides,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(
            cli.home.clone(),
            cli.modes.clone(),
            cli.options.clone(),
            cli.install_options.clone(),
        )
    }

    /// Resolve settings once for this invocation.
    pub fn load_settings(&self) -> Result<Settings> {
        tracing::debug!(home = %self.home.root(), "Resolving settings");
        Ok(self.home.load_settings(&self.overrides)?)
    }
}

//! Plain text and structured reports of resolved settings

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::modes::RunModes;
use crate::options::OptionGroup;
use crate::settings::Settings;

/// Headline of the settings report.
pub const HEADLINE: &str = "Run Mode Settings";

/// Headline of the launch properties report.
pub const PROPERTIES_HEADLINE: &str = "Launch Properties";

/// Write the one line run mode listing.
///
/// `Current Run Modes: [author, dev]`, or `Current Run Modes: -` when none
/// are active.
pub fn write_run_modes<W: Write + ?Sized>(out: &mut W, modes: &RunModes) -> io::Result<()> {
    if modes.is_empty() {
        writeln!(out, "Current Run Modes: -")
    } else {
        writeln!(out, "Current Run Modes: {modes}")
    }
}

/// Write the full settings report.
pub fn write_settings<W: Write + ?Sized>(out: &mut W, settings: &Settings) -> io::Result<()> {
    writeln!(out, "{HEADLINE}")?;
    writeln!(out)?;
    writeln!(out, "Instance ID = {}", settings.id())?;
    writeln!(out, "Instance Name = {}", settings.name())?;
    writeln!(out, "Instance Description = {}", settings.description())?;
    match settings.home() {
        Some(home) => writeln!(out, "Home = {home}")?,
        None => writeln!(out, "Home = -")?,
    }
    match settings.home_url() {
        Some(url) => writeln!(out, "Home URL = {url}")?,
        None => writeln!(out, "Home URL = -")?,
    }
    writeln!(out, "Run Modes = {}", settings.run_modes())
}

/// Write every launch property as a sorted `key = value` line.
pub fn write_properties<W: Write + ?Sized>(
    out: &mut W,
    properties: &BTreeMap<String, String>,
) -> io::Result<()> {
    writeln!(out, "{PROPERTIES_HEADLINE}")?;
    writeln!(out)?;
    for (key, value) in properties {
        writeln!(out, "{key} = {value}")?;
    }
    Ok(())
}

/// Serializable snapshot of resolved settings.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub home: Option<String>,
    pub home_url: Option<String>,
    pub run_modes: RunModes,
    pub options: Vec<OptionGroup>,
    pub install_options: Vec<OptionGroup>,
}

impl From<&Settings> for SettingsReport {
    fn from(settings: &Settings) -> Self {
        let resolution = settings.resolution();
        Self {
            id: settings.id().to_string(),
            name: settings.name(),
            description: settings.description(),
            home: settings.home().map(ToString::to_string),
            home_url: settings.home_url().map(String::from),
            run_modes: settings.run_modes().clone(),
            options: resolution.plain_groups.clone(),
            install_options: resolution.install_groups.clone(),
        }
    }
}

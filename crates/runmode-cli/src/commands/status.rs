//! Status command implementation

use std::io::Write;

use runmode_core::{Settings, SettingsReport, write_settings};

use crate::error::Result;

/// Print the instance settings.
pub fn run_status(out: &mut dyn Write, settings: &Settings, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &SettingsReport::from(settings))?;
        writeln!(out)?;
    } else {
        write_settings(out, settings)?;
    }
    Ok(())
}

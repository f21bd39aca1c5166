//! Properties command implementation

use std::io::Write;

use runmode_core::{Settings, write_properties};

use crate::error::Result;

/// Print the launch properties the settings were resolved from.
pub fn run_properties(out: &mut dyn Write, settings: &Settings, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, settings.properties())?;
        writeln!(out)?;
    } else {
        write_properties(out, settings.properties())?;
    }
    Ok(())
}

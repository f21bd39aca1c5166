//! List command implementation

use std::io::Write;

use runmode_core::{Settings, write_run_modes};

use crate::error::Result;

/// Print the current run modes.
pub fn run_list(out: &mut dyn Write, settings: &Settings, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, settings.run_modes())?;
        writeln!(out)?;
    } else {
        write_run_modes(out, settings.run_modes())?;
    }
    Ok(())
}

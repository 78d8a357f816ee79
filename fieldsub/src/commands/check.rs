//! `check` command: build the rules and lint them.

use anyhow::Result;
use log::info;

use fieldsub_core::TransformationConfig;

use crate::cli::CheckCommand;
use crate::commands::{success_msg, warn_msg};

/// Fails only when the rules cannot be built; lint findings are printed as warnings.
pub fn run_check(cmd: &CheckCommand, quiet: bool) -> Result<()> {
    let config = TransformationConfig::load_from_file(&cmd.rules)?;
    let engine = config.build_engine()?;
    let warnings = config.lint();
    info!("Checked {} rule(s), {} warning(s).", engine.len(), warnings.len());

    if !quiet {
        for w in &warnings {
            warn_msg(w);
        }
        success_msg(format!(
            "{} rule(s) built for field(s): {}",
            engine.len(),
            engine.field_ids().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
        ));
    }
    Ok(())
}

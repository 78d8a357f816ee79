//! `apply` command: compose text from field values.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use fieldsub_core::{ApplyOutcome, SubstitutionFailure, TransformationConfig};

use crate::cli::ApplyCommand;
use crate::commands::warn_msg;

#[derive(Serialize)]
struct JsonOutcome<'a> {
    text: &'a str,
    skipped: &'a [SubstitutionFailure],
}

pub fn run_apply(cmd: &ApplyCommand) -> Result<()> {
    info!("Starting apply operation.");
    let config = TransformationConfig::load_from_file(&cmd.rules)?;
    let engine = config.build_engine()?;

    let values = collect_values(cmd.values.as_deref(), &cmd.fields)?;
    debug!("Collected {} field value(s).", values.len());

    let outcome = engine
        .apply_with_report(&values)
        .context("Failed to apply field substitutions")?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_outcome(&mut writer, &outcome, cmd.json)?;

    if cmd.report && !cmd.json {
        for failure in &outcome.failures {
            warn_msg(describe_failure(failure));
        }
    }
    info!("Apply operation completed.");
    Ok(())
}

/// Merges the optional values file with `--field` assignments; assignments win.
pub fn collect_values(
    values_file: Option<&Path>,
    fields: &[(String, String)],
) -> Result<HashMap<String, String>> {
    let mut values: HashMap<String, String> = match values_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read values file {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("Failed to parse values file {}", path.display()))?
        }
        None => HashMap::new(),
    };
    for (id, value) in fields {
        values.insert(id.clone(), value.clone());
    }
    Ok(values)
}

pub fn write_outcome<W: Write>(writer: &mut W, outcome: &ApplyOutcome, json: bool) -> Result<()> {
    if json {
        let payload = JsonOutcome {
            text: &outcome.text,
            skipped: &outcome.failures,
        };
        serde_json::to_writer_pretty(&mut *writer, &payload)?;
        writeln!(writer)?;
    } else {
        writeln!(writer, "{}", outcome.text)?;
    }
    Ok(())
}

pub fn describe_failure(failure: &SubstitutionFailure) -> String {
    format!(
        "rule #{} (field '{}') skipped: cannot apply /{}/ -> '{}': {}",
        failure.index + 1,
        failure.field_id,
        failure.pattern,
        failure.template,
        failure.message
    )
}

// fieldsub-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot use: build an engine from a config and apply it
//! to a plain map of field values in a single call.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::config::TransformationConfig;
use crate::engine::ApplyOutcome;

/// Builds the engine described by `config` and applies it to `values`.
///
/// # Arguments
///
/// * `config` - The rules, in application order.
/// * `values` - Field id to current value. A rule whose field is missing fails the call.
pub fn headless_apply(config: &TransformationConfig, values: &HashMap<String, String>) -> Result<String> {
    Ok(headless_apply_with_report(config, values)?.text)
}

/// Same as [`headless_apply`], keeping the list of skipped rules.
pub fn headless_apply_with_report(
    config: &TransformationConfig,
    values: &HashMap<String, String>,
) -> Result<ApplyOutcome> {
    let engine = config.build_engine()?;
    let outcome = engine
        .apply_with_report(values)
        .context("Failed to apply field substitutions")?;
    Ok(outcome)
}

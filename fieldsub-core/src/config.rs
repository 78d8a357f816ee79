//! Configuration management for `fieldsub-core`.
//!
//! Rule files are YAML documents listing rules in application order:
//!
//! ```yaml
//! rules:
//!   - field: cc_exp_month
//!     pattern: "^(\\d\\d)$"
//!     template: "Exp: $1"
//! ```
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::builder::EngineBuilder;
use crate::engine::SubstitutionEngine;
use crate::field::FieldId;
use crate::template;

/// A single uncompiled rule as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSpec {
    pub field: FieldId,
    pub pattern: String,
    pub template: String,
    /// Free-form note for humans; ignored by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level rule file.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransformationConfig {
    pub rules: Vec<RuleSpec>,
}

impl TransformationConfig {
    /// Loads rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: TransformationConfig = serde_yml::from_str(text)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yml::to_string(self).context("Failed to serialize rules to YAML")
    }

    /// Reconstructs a config from a built engine, e.g. after decoding a flat record.
    pub fn from_engine(engine: &SubstitutionEngine) -> Self {
        let rules = engine
            .rules()
            .iter()
            .map(|rule| RuleSpec {
                field: rule.field_id.clone(),
                pattern: rule.pattern_source().to_string(),
                template: rule.template.clone(),
                description: None,
            })
            .collect();
        Self { rules }
    }

    /// Registers every rule through the builder and freezes the result.
    pub fn build_engine(&self) -> Result<SubstitutionEngine> {
        let (first, rest) = self
            .rules
            .split_first()
            .ok_or_else(|| anyhow!("Rule configuration contains no rules."))?;

        let mut builder = EngineBuilder::new(first.field.clone(), &first.pattern, first.template.clone())
            .with_context(|| format!("Invalid rule for field '{}'", first.field))?;
        for spec in rest {
            builder
                .add_field(spec.field.clone(), &spec.pattern, spec.template.clone())
                .with_context(|| format!("Invalid rule for field '{}'", spec.field))?;
        }
        let engine = builder.build()?;
        debug!("Built engine from config: {}", engine);
        Ok(engine)
    }

    /// Non-fatal findings: things that will build but probably misbehave at apply time.
    ///
    /// Rules whose pattern does not compile are skipped here; `build_engine` reports those.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for spec in &self.rules {
            if !seen.insert(&spec.field) {
                warnings.push(format!(
                    "Field '{}' appears more than once; the last rule replaces the earlier one.",
                    spec.field
                ));
            }
            if spec.pattern.is_empty() {
                warnings.push(format!("Field '{}' has an empty `pattern`.", spec.field));
            }
            let Ok(regex) = Regex::new(&spec.pattern) else { continue };
            if let Err(e) = template::validate(&regex, &spec.template) {
                warnings.push(format!(
                    "Field '{}': template '{}' cannot be expanded ({}); the field will be skipped whenever its pattern matches.",
                    spec.field, spec.template, e
                ));
            }
        }

        debug!("Lint finished with {} warning(s).", warnings.len());
        warnings
    }
}

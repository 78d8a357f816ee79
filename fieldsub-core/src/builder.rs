//! builder.rs - Accumulates rules and freezes them into a `SubstitutionEngine`.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::collections::HashMap;

use crate::compiler::{compile_rule, SubstitutionRule};
use crate::engine::SubstitutionEngine;
use crate::errors::TransformError;
use crate::field::FieldId;

/// Whether `build()` has already been called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Open,
    Built,
}

/// Builder for [`SubstitutionEngine`].
///
/// Each rule's pattern is compiled as soon as it is added, so an invalid pattern
/// fails registration rather than a later `apply`. Registering a field that is
/// already present replaces its pattern and template but keeps its position.
///
/// ```rust
/// use fieldsub_core::EngineBuilder;
///
/// let engine = EngineBuilder::new("cc_exp_month", r"^(\d\d)$", "Exp: $1")?
///     .add_field("cc_exp_year", r"^(\d\d\d\d)$", " / $1")?
///     .build()?;
/// assert_eq!(engine.len(), 2);
/// # Ok::<(), fieldsub_core::TransformError>(())
/// ```
#[derive(Debug)]
pub struct EngineBuilder {
    rules: Vec<SubstitutionRule>,
    index: HashMap<FieldId, usize>,
    state: BuilderState,
}

impl EngineBuilder {
    /// Creates a builder seeded with its first rule.
    pub fn new(
        field_id: impl Into<FieldId>,
        pattern: &str,
        template: impl Into<String>,
    ) -> Result<Self, TransformError> {
        let mut builder = Self {
            rules: Vec::new(),
            index: HashMap::new(),
            state: BuilderState::Open,
        };
        builder.add_field(field_id, pattern, template)?;
        Ok(builder)
    }

    /// Adds the transformed contents of a field to the overall result.
    pub fn add_field(
        &mut self,
        field_id: impl Into<FieldId>,
        pattern: &str,
        template: impl Into<String>,
    ) -> Result<&mut Self, TransformError> {
        self.ensure_open()?;
        let rule = compile_rule(field_id.into(), pattern, template)?;

        match self.index.get(&rule.field_id) {
            Some(&position) => {
                debug!(
                    "Field '{}' registered again; replacing rule at position {}.",
                    rule.field_id, position
                );
                self.rules[position] = rule;
            }
            None => {
                self.index.insert(rule.field_id.clone(), self.rules.len());
                self.rules.push(rule);
            }
        }
        Ok(self)
    }

    /// Freezes the accumulated rules into an engine. Can only be called once.
    pub fn build(&mut self) -> Result<SubstitutionEngine, TransformError> {
        self.ensure_open()?;
        self.state = BuilderState::Built;

        let rules = std::mem::take(&mut self.rules);
        let index = std::mem::take(&mut self.index);
        debug!("Building substitution engine with {} rule(s).", rules.len());
        Ok(SubstitutionEngine::from_parts(rules, index))
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn is_built(&self) -> bool {
        self.state == BuilderState::Built
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn ensure_open(&self) -> Result<(), TransformError> {
        match self.state {
            BuilderState::Open => Ok(()),
            BuilderState::Built => Err(TransformError::BuilderFinalized),
        }
    }
}

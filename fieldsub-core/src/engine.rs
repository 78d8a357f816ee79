// fieldsub-core/src/engine.rs
//! The immutable substitution engine.
//!
//! An engine is produced by [`EngineBuilder::build`](crate::builder::EngineBuilder::build)
//! and never changes afterwards, so it can be shared across threads behind an `Arc`
//! and applied concurrently.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::compiler::SubstitutionRule;
use crate::diagnostics::{log_substitution_debug, log_substitution_failure, SubstitutionFailure};
use crate::errors::TransformError;
use crate::field::{FieldId, ValueFinder};

/// The result of a successful `apply`, including the rules that were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub text: String,
    pub failures: Vec<SubstitutionFailure>,
}

impl ApplyOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replaces the values of one or more fields through per-field regular expressions
/// and concatenates the results in rule order.
#[derive(Debug, Clone)]
pub struct SubstitutionEngine {
    rules: Vec<SubstitutionRule>,
    index: HashMap<FieldId, usize>,
}

impl SubstitutionEngine {
    pub(crate) fn from_parts(rules: Vec<SubstitutionRule>, index: HashMap<FieldId, usize>) -> Self {
        Self { rules, index }
    }

    /// Applies every rule and returns the composed text.
    ///
    /// Fails with [`TransformError::FieldNotFound`] as soon as one field has no value;
    /// nothing accumulated so far is returned. A rule whose template cannot be expanded
    /// is skipped and logged.
    pub fn apply<F: ValueFinder + ?Sized>(&self, finder: &F) -> Result<String, TransformError> {
        self.apply_with_report(finder).map(|outcome| outcome.text)
    }

    /// Like [`apply`](Self::apply), but also returns the skipped rules.
    pub fn apply_with_report<F: ValueFinder + ?Sized>(
        &self,
        finder: &F,
    ) -> Result<ApplyOutcome, TransformError> {
        debug!("Applying {} field rule(s).", self.rules.len());
        let mut outcome = ApplyOutcome::default();

        for (index, rule) in self.rules.iter().enumerate() {
            let value = match finder.find_by_field_id(&rule.field_id) {
                Some(value) => value,
                None => {
                    warn!("No value for field '{}'", rule.field_id);
                    return Err(TransformError::FieldNotFound(rule.field_id.clone()));
                }
            };

            match rule.substitute(&value) {
                Ok(converted) => {
                    log_substitution_debug(&rule.field_id, &value, &converted);
                    outcome.text.push_str(&converted);
                }
                Err(e) => {
                    let failure = SubstitutionFailure::new(
                        index,
                        &rule.field_id,
                        rule.pattern_source(),
                        &rule.template,
                        &e,
                        &value,
                    );
                    log_substitution_failure(&failure);
                    outcome.failures.push(failure);
                }
            }
        }

        debug!(
            "Apply finished: {} byte(s) produced, {} rule(s) skipped.",
            outcome.text.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn rule_for(&self, field_id: &FieldId) -> Option<&SubstitutionRule> {
        self.index.get(field_id).map(|&i| &self.rules[i])
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.rules.iter().map(|r| &r.field_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for SubstitutionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubstitutionEngine: [fields=")?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:/{}/->{}", rule.field_id, rule.pattern_source(), rule.template)?;
        }
        write!(f, "]")
    }
}

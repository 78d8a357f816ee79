//! errors.rs - Custom error types for the fieldsub-core library.
//!
//! `TransformError` covers everything that is fatal to a caller: rule registration,
//! builder misuse, a lookup miss during `apply`, and malformed serialized rule sets.
//! `SubstitutionError` is the recoverable, per-rule failure raised while expanding a
//! replacement template; the engine absorbs it and reports it as a diagnostic.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::field::FieldId;

/// This enum represents all fatal error types in the `fieldsub-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    #[error("Failed to compile pattern for field '{field_id}': {source}")]
    InvalidPattern {
        field_id: FieldId,
        #[source]
        source: regex::Error,
    },

    #[error("Already called build() on this builder")]
    BuilderFinalized,

    #[error("No value for field '{0}'")]
    FieldNotFound(FieldId),

    #[error("Malformed rule set: {0}")]
    MalformedRuleSet(String),

    #[error("Failed to (de)serialize rule set: {0}")]
    Serialization(String),
}

/// A failure to expand a replacement template against one match.
///
/// These never escape `SubstitutionEngine::apply`; the offending rule simply
/// contributes nothing to the output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionError {
    #[error("No group {0}")]
    NoSuchGroup(usize),

    #[error("No group with name {{{0}}}")]
    NoSuchNamedGroup(String),

    #[error("Illegal group reference: {0}")]
    InvalidGroupReference(String),

    #[error("Character to be escaped is missing")]
    DanglingEscape,
}

impl SubstitutionError {
    /// A stable, value-free label for the failure kind. Safe to put in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SubstitutionError::NoSuchGroup(_) => "no_such_group",
            SubstitutionError::NoSuchNamedGroup(_) => "no_such_named_group",
            SubstitutionError::InvalidGroupReference(_) => "invalid_group_reference",
            SubstitutionError::DanglingEscape => "dangling_escape",
        }
    }
}

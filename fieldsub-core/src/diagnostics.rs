// fieldsub-core/src/diagnostics.rs
//! Reporting for rules that were skipped during `apply`, plus log helpers that
//! keep field values out of the logs.

use serde::{Deserialize, Serialize};
use log::{debug, warn};

use lazy_static::lazy_static;
use sha2::{Sha256, Digest};

use crate::errors::SubstitutionError;
use crate::field::FieldId;

lazy_static! {
    /// A static boolean that is initialized once to determine if raw field values are allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("FIELDSUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One rule that contributed nothing to an `apply` result because its template
/// could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionFailure {
    /// Position of the rule in the engine's rule order.
    pub index: usize,
    pub field_id: FieldId,
    pub pattern: String,
    pub template: String,
    /// Stable failure label, see `SubstitutionError::kind`.
    pub kind: String,
    pub message: String,
    /// SHA-256 of the field value, so identical failures can be grouped without the value itself.
    pub value_hash: String,
}

impl SubstitutionFailure {
    pub fn new(
        index: usize,
        field_id: &FieldId,
        pattern: &str,
        template: &str,
        error: &SubstitutionError,
        value: &str,
    ) -> Self {
        Self {
            index,
            field_id: field_id.clone(),
            pattern: pattern.to_string(),
            template: template.to_string(),
            kind: error.kind().to_string(),
            message: error.to_string(),
            value_hash: value_fingerprint(field_id, value),
        }
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_substitution_debug(field_id: &FieldId, original_value: &str, substituted: &str) {
    debug!(
        "Field '{}' substituted: Original='{}', Result='{}'",
        field_id,
        get_loggable_content(original_value),
        get_loggable_content(substituted)
    );
}

/// Logs a skipped rule. Only the pattern, template and failure class are logged;
/// the value is never included.
pub fn log_substitution_failure(failure: &SubstitutionFailure) {
    warn!(
        "Cannot apply {}->{} to field '{}': {}",
        failure.pattern, failure.template, failure.field_id, failure.kind
    );
}

pub fn value_fingerprint(field_id: &FieldId, value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(field_id.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("4111111111111234"), "[REDACTED: 16 chars]".to_string());
    }

    #[test]
    fn test_fingerprint_depends_on_field_and_value() {
        let a = FieldId::from("a");
        let b = FieldId::from("b");
        assert_eq!(value_fingerprint(&a, "07"), value_fingerprint(&a, "07"));
        assert_ne!(value_fingerprint(&a, "07"), value_fingerprint(&b, "07"));
        assert_eq!(value_fingerprint(&a, "07").len(), 64);
    }

    #[test]
    fn test_failure_does_not_carry_the_value() {
        let failure = SubstitutionFailure::new(
            1,
            &FieldId::from("cc"),
            r"^(\d+)$",
            "$2",
            &SubstitutionError::NoSuchGroup(2),
            "4111111111111234",
        );
        let json = serde_json::to_string(&failure).unwrap();
        assert!(!json.contains("4111111111111234"));
        assert_eq!(failure.kind, "no_such_group");
    }
}

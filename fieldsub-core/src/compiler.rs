//! compiler.rs - Compiles field substitution rules.
//!
//! Every rule passes through `compile_rule`, whether it comes from the builder,
//! a YAML config, or a decoded flat record. A pattern that fails here never
//! reaches an engine.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::{SubstitutionError, TransformError};
use crate::field::FieldId;
use crate::template;

/// Upper bound on the compiled program size of a single pattern. A pattern that
/// compiles past this is reported as `InvalidPattern`, like any other compile error.
pub const COMPILED_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single compiled rule: the field it reads, the pattern applied to that field's
/// value, and the template each match is replaced with.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub field_id: FieldId,
    pub pattern: Regex,
    pub template: String,
}

impl SubstitutionRule {
    /// The pattern source as it was registered.
    pub fn pattern_source(&self) -> &str {
        self.pattern.as_str()
    }

    /// Number of capture groups in the pattern, not counting the implicit whole match.
    pub fn group_count(&self) -> usize {
        self.pattern.captures_len() - 1
    }

    /// Replaces all matches in `value` according to this rule's template.
    pub fn substitute(&self, value: &str) -> Result<String, SubstitutionError> {
        template::replace_all(&self.pattern, value, &self.template)
    }
}

/// Compiles one rule, failing fast on a pattern that does not compile.
pub fn compile_rule(
    field_id: FieldId,
    pattern: &str,
    template: impl Into<String>,
) -> Result<SubstitutionRule, TransformError> {
    let compiled = RegexBuilder::new(pattern)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build();

    match compiled {
        Ok(regex) => {
            debug!(
                target: "fieldsub_core::compiler",
                "Rule for field '{}' compiled successfully ({} groups).",
                field_id,
                regex.captures_len() - 1
            );
            Ok(SubstitutionRule {
                field_id,
                pattern: regex,
                template: template.into(),
            })
        }
        Err(source) => Err(TransformError::InvalidPattern { field_id, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_valid_rule() {
        let rule = compile_rule(FieldId::from("a"), r"^(\d\d)$", "Exp: $1").unwrap();
        assert_eq!(rule.pattern_source(), r"^(\d\d)$");
        assert_eq!(rule.group_count(), 1);
        assert_eq!(rule.substitute("07").unwrap(), "Exp: 07");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = compile_rule(FieldId::from("a"), "([unclosed", "$1").unwrap_err();
        match err {
            TransformError::InvalidPattern { field_id, .. } => assert_eq!(field_id.as_str(), "a"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_long_valid_pattern_is_accepted() {
        let pattern = format!("^(?:{})$", "(?:ab|cd)".repeat(60));
        assert!(pattern.len() > 500);
        let rule = compile_rule(FieldId::from("a"), &pattern, "ok").unwrap();
        assert_eq!(rule.substitute(&"ab".repeat(60)).unwrap(), "ok");
    }

    #[test]
    fn test_oversized_program_is_an_invalid_pattern() {
        let err = compile_rule(FieldId::from("big"), r"(?:\w{1000}){1000}", "").unwrap_err();
        assert!(matches!(err, TransformError::InvalidPattern { ref field_id, .. } if field_id.as_str() == "big"));
    }

    #[test]
    fn test_digit_class_is_unicode_aware() {
        // Arabic-Indic digits are `\d` unless Unicode mode is switched off.
        let unicode = compile_rule(FieldId::from("m"), r"^(\d\d)$", "Exp: $1").unwrap();
        assert_eq!(unicode.substitute("\u{660}\u{667}").unwrap(), "Exp: \u{660}\u{667}");

        let ascii = compile_rule(FieldId::from("m"), r"^((?-u:\d)(?-u:\d))$", "Exp: $1").unwrap();
        assert_eq!(ascii.substitute("\u{660}\u{667}").unwrap(), "\u{660}\u{667}");
        assert_eq!(ascii.substitute("07").unwrap(), "Exp: 07");
    }
}

//! record.rs - Flat-record serialization of an engine's rules.
//!
//! A rule set travels as three parallel, equal-length sequences: field ids, pattern
//! sources and templates. Decoding always re-registers each triple through
//! [`EngineBuilder`], so a tampered record cannot yield an engine holding a pattern
//! that would not have passed registration.
//!
//! Three encodings are provided: JSON, YAML and a compact bincode form.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use serde::{Deserialize, Serialize};

use crate::builder::EngineBuilder;
use crate::engine::SubstitutionEngine;
use crate::errors::TransformError;
use crate::field::FieldId;

/// The serialized form of a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleSetRecord {
    pub field_ids: Vec<FieldId>,
    pub patterns: Vec<String>,
    pub templates: Vec<String>,
}

impl RuleSetRecord {
    /// Checks that the three sequences line up and hold at least one rule.
    pub fn validate_shape(&self) -> Result<usize, TransformError> {
        let len = self.field_ids.len();
        if self.patterns.len() != len || self.templates.len() != len {
            return Err(TransformError::MalformedRuleSet(format!(
                "sequence lengths differ: {} field ids, {} patterns, {} templates",
                len,
                self.patterns.len(),
                self.templates.len()
            )));
        }
        if len == 0 {
            return Err(TransformError::MalformedRuleSet(
                "at least one rule is required".to_string(),
            ));
        }
        Ok(len)
    }

    pub fn to_json(&self) -> Result<String, TransformError> {
        serde_json::to_string_pretty(self).map_err(|e| TransformError::Serialization(e.to_string()))
    }

    pub fn from_json(s: &str) -> Result<Self, TransformError> {
        serde_json::from_str(s).map_err(|e| TransformError::Serialization(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, TransformError> {
        serde_yml::to_string(self).map_err(|e| TransformError::Serialization(e.to_string()))
    }

    pub fn from_yaml(s: &str) -> Result<Self, TransformError> {
        serde_yml::from_str(s).map_err(|e| TransformError::Serialization(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TransformError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| TransformError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransformError> {
        let (record, consumed): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())
                .map_err(|e| TransformError::Serialization(e.to_string()))?;
        if consumed != bytes.len() {
            return Err(TransformError::Serialization(format!(
                "{} trailing byte(s) after rule set",
                bytes.len() - consumed
            )));
        }
        Ok(record)
    }
}

impl SubstitutionEngine {
    /// Flattens the engine's rules, preserving order.
    pub fn to_record(&self) -> RuleSetRecord {
        let mut record = RuleSetRecord::default();
        for rule in self.rules() {
            record.field_ids.push(rule.field_id.clone());
            record.patterns.push(rule.pattern_source().to_string());
            record.templates.push(rule.template.clone());
        }
        record
    }

    /// Rebuilds an engine from a record through the regular builder path.
    pub fn from_record(record: RuleSetRecord) -> Result<Self, TransformError> {
        let len = record.validate_shape()?;
        debug!("Decoding rule set with {} rule(s).", len);

        let mut rules = record
            .field_ids
            .into_iter()
            .zip(record.patterns)
            .zip(record.templates)
            .map(|((id, pattern), template)| (id, pattern, template));

        let Some((id, pattern, template)) = rules.next() else {
            return Err(TransformError::MalformedRuleSet(
                "at least one rule is required".to_string(),
            ));
        };
        let mut builder = EngineBuilder::new(id, &pattern, template)?;
        for (id, pattern, template) in rules {
            builder.add_field(id, &pattern, template)?;
        }
        builder.build()
    }

    pub fn to_json(&self) -> Result<String, TransformError> {
        self.to_record().to_json()
    }

    pub fn from_json(s: &str) -> Result<Self, TransformError> {
        Self::from_record(RuleSetRecord::from_json(s)?)
    }

    pub fn to_yaml(&self) -> Result<String, TransformError> {
        self.to_record().to_yaml()
    }

    pub fn from_yaml(s: &str) -> Result<Self, TransformError> {
        Self::from_record(RuleSetRecord::from_yaml(s)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TransformError> {
        self.to_record().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransformError> {
        Self::from_record(RuleSetRecord::from_bytes(bytes)?)
    }
}

impl TryFrom<RuleSetRecord> for SubstitutionEngine {
    type Error = TransformError;

    fn try_from(record: RuleSetRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl From<&SubstitutionEngine> for RuleSetRecord {
    fn from(engine: &SubstitutionEngine) -> Self {
        engine.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ids: &[&str], patterns: &[&str], templates: &[&str]) -> RuleSetRecord {
        RuleSetRecord {
            field_ids: ids.iter().map(|s| FieldId::from(*s)).collect(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            templates: templates.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_record_is_malformed() {
        let err = SubstitutionEngine::from_record(RuleSetRecord::default()).unwrap_err();
        assert!(matches!(err, TransformError::MalformedRuleSet(_)));
    }

    #[test]
    fn test_length_mismatch_is_malformed() {
        let err = SubstitutionEngine::from_record(record(&["a", "b"], &["x", "y"], &["1"])).unwrap_err();
        assert!(matches!(err, TransformError::MalformedRuleSet(_)));
    }

    #[test]
    fn test_invalid_pattern_in_record_is_rejected() {
        let err = SubstitutionEngine::from_record(record(&["a", "b"], &["x", "(("], &["1", "2"])).unwrap_err();
        match err {
            TransformError::InvalidPattern { field_id, .. } => assert_eq!(field_id.as_str(), "b"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_record_preserves_order() {
        let engine = SubstitutionEngine::from_record(record(
            &["z", "a", "m"],
            &["1", "2", "3"],
            &["x", "y", "w"],
        ))
        .unwrap();
        assert_eq!(engine.to_record().field_ids, vec![FieldId::from("z"), FieldId::from("a"), FieldId::from("m")]);
    }

    #[test]
    fn test_bytes_reject_trailing_garbage() {
        let mut bytes = record(&["a"], &["x"], &["y"]).to_bytes().unwrap();
        bytes.push(0);
        assert!(matches!(
            RuleSetRecord::from_bytes(&bytes),
            Err(TransformError::Serialization(_))
        ));
    }

    #[test]
    fn test_json_shape_is_three_parallel_arrays() {
        let json = record(&["a"], &["x"], &["y"]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["field_ids"], serde_json::json!(["a"]));
        assert_eq!(value["patterns"], serde_json::json!(["x"]));
        assert_eq!(value["templates"], serde_json::json!(["y"]));
    }
}

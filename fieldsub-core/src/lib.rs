// fieldsub-core/src/lib.rs
//! # fieldsub Core Library
//!
//! `fieldsub-core` composes one output string out of several field values. Each field
//! has a rule: a regular expression and a replacement template. Rules are applied in
//! the order they were registered and their results are concatenated.
//!
//! ## Modules
//!
//! * `field`: `FieldId` and the `ValueFinder` lookup capability supplied by the host.
//! * `compiler`: Validates and compiles a single rule.
//! * `template`: Expands `$1` / `${name}` replacement templates.
//! * `builder`: `EngineBuilder`, the only way to create an engine.
//! * `engine`: The immutable `SubstitutionEngine` and its `apply` operation.
//! * `record`: Flat-record (ids, patterns, templates) serialization in JSON, YAML and binary.
//! * `config`: YAML rule files.
//! * `diagnostics`: Reports for skipped rules and PII-safe logging helpers.
//! * `headless`: One-shot helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use fieldsub_core::{EngineBuilder, FieldId, TransformError};
//!
//! fn main() -> Result<(), TransformError> {
//!     let engine = EngineBuilder::new("cc_exp_month", r"^(\d\d)$", "Exp: $1")?
//!         .add_field("cc_exp_year", r"^(\d\d\d\d)$", " / $1")?
//!         .build()?;
//!
//!     let mut values = HashMap::new();
//!     values.insert(FieldId::from("cc_exp_month"), "07".to_string());
//!     values.insert(FieldId::from("cc_exp_year"), "2019".to_string());
//!
//!     assert_eq!(engine.apply(&values)?, "Exp: 07 / 2019");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible library operations return `TransformError`. A field with no value aborts
//! `apply`; a template that cannot be expanded only drops that field's contribution and
//! is reported as a `SubstitutionFailure`. Config loading uses `anyhow` for context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod builder;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod field;
pub mod headless;
pub mod record;
pub mod template;

pub use builder::{BuilderState, EngineBuilder};
pub use compiler::{compile_rule, SubstitutionRule};
pub use config::{RuleSpec, TransformationConfig};
pub use diagnostics::{redact_sensitive, SubstitutionFailure};
pub use engine::{ApplyOutcome, SubstitutionEngine};
pub use errors::{SubstitutionError, TransformError};
pub use field::{finder_fn, FieldId, FinderFn, ValueFinder};
pub use headless::{headless_apply, headless_apply_with_report};
pub use record::RuleSetRecord;

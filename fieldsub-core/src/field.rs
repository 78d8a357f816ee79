//! Field identifiers and the value lookup capability consumed by the engine.
//!
//! The core never decides how a `FieldId` resolves to a value; hosts supply a
//! `ValueFinder`. Maps and closures are supported out of the box.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque handle naming one source of text value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolves a field identifier to its current value, or `None` when the field
/// is no longer available.
pub trait ValueFinder {
    fn find_by_field_id(&self, id: &FieldId) -> Option<String>;
}

impl<T: ValueFinder + ?Sized> ValueFinder for &T {
    fn find_by_field_id(&self, id: &FieldId) -> Option<String> {
        (**self).find_by_field_id(id)
    }
}

impl ValueFinder for HashMap<FieldId, String> {
    fn find_by_field_id(&self, id: &FieldId) -> Option<String> {
        self.get(id).cloned()
    }
}

impl ValueFinder for BTreeMap<FieldId, String> {
    fn find_by_field_id(&self, id: &FieldId) -> Option<String> {
        self.get(id).cloned()
    }
}

impl ValueFinder for HashMap<String, String> {
    fn find_by_field_id(&self, id: &FieldId) -> Option<String> {
        self.get(id.as_str()).cloned()
    }
}

impl ValueFinder for BTreeMap<String, String> {
    fn find_by_field_id(&self, id: &FieldId) -> Option<String> {
        self.get(id.as_str()).cloned()
    }
}

/// Adapts a closure into a `ValueFinder`. Build one with [`finder_fn`].
pub struct FinderFn<F>(F);

impl<F> ValueFinder for FinderFn<F>
where
    F: Fn(&FieldId) -> Option<String>,
{
    fn find_by_field_id(&self, id: &FieldId) -> Option<String> {
        (self.0)(id)
    }
}

/// Wraps `f` so it can be passed wherever a `ValueFinder` is expected.
pub fn finder_fn<F>(f: F) -> FinderFn<F>
where
    F: Fn(&FieldId) -> Option<String>,
{
    FinderFn(f)
}

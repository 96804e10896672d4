//! Keyed validation failures from a rejected create/update.

use crate::mapping::Mapping;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Per-property validation failure reasons, keyed by *local* property names.
///
/// Built from a 422 response body via [`from_response`](Self::from_response):
/// each remote attribute key is translated back through the declared mapping,
/// since callers only know local names. Remote keys with no declaration (and
/// the Rails `base` key) land in the catch-all base bucket rather than being
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    properties: BTreeMap<String, Vec<String>>,
    base: Vec<String>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates a validation-failure body.
    ///
    /// Accepts both the bare Rails errors object
    /// (`{"content": ["can't be blank"]}`) and the wrapped form
    /// (`{"errors": {...}}`). Reasons may be arrays of strings or a single
    /// string.
    #[must_use]
    pub fn from_response(mapping: &Mapping, body: &Value) -> Self {
        let mut errors = Self::default();
        let Some(top) = body.as_object() else {
            return errors;
        };
        let map = top
            .get("errors")
            .and_then(Value::as_object)
            .unwrap_or(top);
        for (key, value) in map {
            let reasons: Vec<String> = match value {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                Value::String(reason) => vec![reason.clone()],
                _ => continue,
            };
            if key == "base" {
                errors.base.extend(reasons);
            } else if let Some(property) = mapping.property_for_remote_key(key) {
                errors
                    .properties
                    .entry(property.name.clone())
                    .or_default()
                    .extend(reasons);
            } else {
                // Unmapped key: keep the key text so the detail isn't lost.
                errors
                    .base
                    .extend(reasons.into_iter().map(|reason| format!("{key} {reason}")));
            }
        }
        errors
    }

    /// Records a failure reason for a local property.
    pub fn add(&mut self, property: impl Into<String>, reason: impl Into<String>) {
        self.properties
            .entry(property.into())
            .or_default()
            .push(reason.into());
    }

    /// Records a failure reason not attributable to any property.
    pub fn add_base(&mut self, reason: impl Into<String>) {
        self.base.push(reason.into());
    }

    /// The reasons recorded for one local property.
    #[must_use]
    pub fn property(&self, name: &str) -> &[String] {
        self.properties.get(name).map_or(&[], Vec::as_slice)
    }

    /// The catch-all reasons.
    #[must_use]
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// Iterates `(local property name, reasons)` pairs.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.properties
            .iter()
            .map(|(name, reasons)| (name.as_str(), reasons.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.base.is_empty()
    }

    /// Total number of recorded reasons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.values().map(Vec::len).sum::<usize>() + self.base.len()
    }
}

impl fmt::Display for ValidationErrors {
    /// Aggregates every reason into one display string, property-prefixed,
    /// falling back to a generic message when no detail is available.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "the server rejected the request");
        }
        let mut parts = Vec::with_capacity(self.len());
        for (name, reasons) in &self.properties {
            for reason in reasons {
                parts.push(format!("{name} {reason}"));
            }
        }
        parts.extend(self.base.iter().cloned());
        write!(f, "{}", parts.join(", "))
    }
}

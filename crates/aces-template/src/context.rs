//! Data contexts for template rendering
//!
//! Upstream tooling delivers parameters in a two-level
//! category -> parameter -> {value, units} structure. Rendering consumes a
//! flat name -> value mapping, so the structured form is flattened first:
//! categories are discarded, units are dropped, only `value` survives.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured parameter as received from upstream tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamValue {
    /// Scalar payload used for substitution
    pub value: Value,
    /// Measurement units; dropped during flattening
    pub units: String,
}

impl ParamValue {
    /// Create a parameter with explicit units
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<Value>, units: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            units: units.into(),
        }
    }

    /// Create a unitless parameter
    #[inline]
    #[must_use]
    pub fn unitless(value: impl Into<Value>) -> Self {
        Self::new(value, "na")
    }
}

/// Two-level category -> parameter -> value structure
pub type StructuredContext = BTreeMap<String, BTreeMap<String, ParamValue>>;

/// Flat name -> value mapping used as the substitution database
///
/// Keys are unique by construction; when flattening, later categories win on
/// a parameter-name collision (categories are visited in sorted order, so the
/// outcome is deterministic).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataContext {
    values: BTreeMap<String, Value>,
}

impl DataContext {
    /// Create an empty context
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context directly from a flat mapping
    #[inline]
    #[must_use]
    pub fn from_flat(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    /// Flatten a structured context into a flat substitution mapping
    ///
    /// Categories and units are discarded; only each parameter's `value`
    /// survives. Later categories (sorted order) win on name collision.
    #[must_use]
    pub fn flatten(structured: &StructuredContext) -> Self {
        let mut values = BTreeMap::new();
        for params in structured.values() {
            for (name, param) in params {
                values.insert(name.clone(), param.value.clone());
            }
        }
        Self { values }
    }

    /// Look up a value by placeholder name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Insert a single value
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// The full flat mapping
    #[inline]
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Number of bound names
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context holds no values
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

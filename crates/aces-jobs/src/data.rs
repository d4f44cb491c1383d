//! Job data bags
//!
//! Three independent key -> value mappings: inputs, outputs, and custom data.
//! Each map is created lazily on first insert, so "never written" and
//! "written but empty" stay distinguishable at this level. Values are
//! arbitrary JSON so nested payloads (model descriptors, result sets)
//! round-trip without bespoke types. `Clone` performs a full structural deep
//! copy, which is the basis of clone isolation when jobs are duplicated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-job data payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobData {
    inputs: Option<BTreeMap<String, Value>>,
    outputs: Option<BTreeMap<String, Value>>,
    custom: Option<BTreeMap<String, Value>>,
}

impl JobData {
    /// Create a payload with no maps materialized
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an input value, materializing the inputs map on first use
    pub fn add_input(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.inputs
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// Insert an output value, materializing the outputs map on first use
    pub fn add_output(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.outputs
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// Insert a custom value, materializing the custom map on first use
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.custom
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// Look up an input value; `None` covers both absent map and absent key
    #[inline]
    #[must_use]
    pub fn input(&self, key: &str) -> Option<&Value> {
        self.inputs.as_ref().and_then(|m| m.get(key))
    }

    /// Look up an output value
    #[inline]
    #[must_use]
    pub fn output(&self, key: &str) -> Option<&Value> {
        self.outputs.as_ref().and_then(|m| m.get(key))
    }

    /// Look up a custom value
    #[inline]
    #[must_use]
    pub fn custom(&self, key: &str) -> Option<&Value> {
        self.custom.as_ref().and_then(|m| m.get(key))
    }

    /// The inputs map, if it has been materialized
    #[inline]
    #[must_use]
    pub fn inputs(&self) -> Option<&BTreeMap<String, Value>> {
        self.inputs.as_ref()
    }

    /// The outputs map, if it has been materialized
    #[inline]
    #[must_use]
    pub fn outputs(&self) -> Option<&BTreeMap<String, Value>> {
        self.outputs.as_ref()
    }

    /// The custom map, if it has been materialized
    #[inline]
    #[must_use]
    pub fn customs(&self) -> Option<&BTreeMap<String, Value>> {
        self.custom.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn maps_are_lazy() {
        let mut data = JobData::new();
        assert!(data.inputs().is_none());
        assert!(data.outputs().is_none());
        assert!(data.customs().is_none());

        data.add_input("P_T", json!(14.7));
        assert!(data.inputs().is_some());
        assert!(data.outputs().is_none());
    }

    #[test]
    fn add_output_writes_into_outputs() {
        let mut data = JobData::new();
        data.add_output("ETA", json!(0.92));

        assert_eq!(data.output("ETA"), Some(&json!(0.92)));
        assert_eq!(data.input("ETA"), None);
        assert!(data.inputs().is_none());
    }

    #[test]
    fn lookups_cover_absent_map_and_absent_key() {
        let mut data = JobData::new();
        assert_eq!(data.custom("model"), None);

        data.add_custom("model", json!({"id": "frame7"}));
        assert_eq!(data.custom("missing"), None);
        assert_eq!(data.custom("model"), Some(&json!({"id": "frame7"})));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut data = JobData::new();
        data.add_input("nested", json!({"a": [1, 2, 3]}));

        let mut copy = data.clone();
        copy.add_input("nested", json!({"a": []}));

        assert_eq!(data.input("nested"), Some(&json!({"a": [1, 2, 3]})));
        assert_ne!(data, copy);
    }
}

//! Testing utilities for the analysis-job workspace
//!
//! Shared fixtures: temp jobs roots, sample structured contexts, and job
//! data shaped the way the table view expects.

#![allow(missing_docs)]

use aces_jobs::{JobData, JobManager};
use aces_template::{ParamValue, StructuredContext};
use serde_json::json;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// A jobs root that cleans itself up when dropped
pub struct TestJobsRoot {
    dir: TempDir,
}

impl TestJobsRoot {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp jobs root"),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn manager(&self) -> JobManager {
        JobManager::new(self.path())
    }
}

impl Default for TestJobsRoot {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-category structured context covering typical boundary parameters
pub fn sample_structured_context() -> StructuredContext {
    let mut inlet = BTreeMap::new();
    inlet.insert("P_T".to_string(), ParamValue::new(json!(14.7), "bar"));
    inlet.insert("T_T".to_string(), ParamValue::new(json!(450.0), "deg C"));

    let mut shaft = BTreeMap::new();
    shaft.insert("N".to_string(), ParamValue::new(json!(3600), "RPM"));

    let mut ctx = StructuredContext::new();
    ctx.insert("inlet".to_string(), inlet);
    ctx.insert("shaft".to_string(), shaft);
    ctx
}

/// Job data carrying the nested model-id shape the table view requires
pub fn sample_model_data(model_id: &str) -> JobData {
    let mut data = JobData::new();
    data.add_custom("model", json!({ "id": model_id, "rev": 1 }));
    data
}

//! Job status values
//!
//! Five recognized lifecycle states. The conventional flow is
//! NEW -> MODIFIED -> RUNNING -> COMPLETE or ERROR, with MODIFIED reachable
//! again after a run; that adjacency is a caller convention, not an enforced
//! guard, and any status may follow any other. Validation happens once, at
//! the string boundary.

use crate::error::JobError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Freshly created, never edited or run
    New,
    /// Edited since creation or since the last run
    Modified,
    /// External analysis currently executing
    Running,
    /// Last run finished successfully
    Complete,
    /// Last run failed
    Error,
}

impl JobStatus {
    /// All recognized statuses in conventional lifecycle order
    pub const ALL: [JobStatus; 5] = [
        JobStatus::New,
        JobStatus::Modified,
        JobStatus::Running,
        JobStatus::Complete,
        JobStatus::Error,
    ];

    /// Canonical uppercase string form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::New => "NEW",
            JobStatus::Modified => "MODIFIED",
            JobStatus::Running => "RUNNING",
            JobStatus::Complete => "COMPLETE",
            JobStatus::Error => "ERROR",
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::New
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(JobStatus::New),
            "MODIFIED" => Ok(JobStatus::Modified),
            "RUNNING" => Ok(JobStatus::Running),
            "COMPLETE" => Ok(JobStatus::Complete),
            "ERROR" => Ok(JobStatus::Error),
            other => Err(JobError::InvalidStatus(other.to_string())),
        }
    }
}

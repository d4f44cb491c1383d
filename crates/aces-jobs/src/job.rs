//! Job identity and entity

use crate::data::JobData;
use crate::status::JobStatus;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Unique job identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Generate a fresh job id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of analysis work: identity, status, directory, and data payload
///
/// A job's directory lives under the jobs root and is named by its id. The
/// entity itself carries no filesystem side effects; directory lifecycle is
/// owned by the manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    status: JobStatus,
    path: PathBuf,
    data: JobData,
}

impl Job {
    /// Create a job rooted under `jobs_root`, generating an id when none is
    /// given
    #[must_use]
    pub fn new(jobs_root: impl AsRef<Path>, id: Option<JobId>) -> Self {
        let id = id.unwrap_or_default();
        Self {
            id,
            status: JobStatus::New,
            path: jobs_root.as_ref().join(id.to_string()),
            data: JobData::new(),
        }
    }

    /// Job identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Current lifecycle status
    #[inline]
    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Set the lifecycle status
    ///
    /// Any status may follow any other; invalid strings are rejected earlier,
    /// at the [`JobStatus`] parse boundary.
    #[inline]
    pub fn set_status(&mut self, status: JobStatus) {
        self.status = status;
    }

    /// The job's directory under the jobs root
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The job's data payload
    #[inline]
    #[must_use]
    pub fn data(&self) -> &JobData {
        &self.data
    }

    /// Mutable access to the data payload
    #[inline]
    pub fn data_mut(&mut self) -> &mut JobData {
        &mut self.data
    }

    /// Replace the data payload wholesale
    #[inline]
    pub fn set_data(&mut self, data: JobData) {
        self.data = data;
    }

    /// Deep-copy another job's data wholesale, replacing this job's own
    ///
    /// Used when cloning a job: the copy shares no structure with the source.
    pub fn copy_data_from(&mut self, other: &Job) {
        self.data = other.data.clone();
    }
}

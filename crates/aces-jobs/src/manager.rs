//! Job manager: the authoritative registry and jobs-root owner
//!
//! Owns the in-memory job collection and the on-disk jobs-root tree.
//! Directory creation and removal for a job id is exclusive to the manager;
//! no other component touches the jobs root directly. The collection is not
//! designed for concurrent mutation: single-process, single-threaded
//! control flow, no internal locking.

use crate::data::JobData;
use crate::error::JobError;
use crate::job::JobId;
use crate::status::JobStatus;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Marker shown in the table row for the kept job
pub const KEPT_MARKER: &str = "*";

/// Registry record for one job
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Job identity
    pub id: JobId,
    /// Materialized directory under the jobs root
    pub path: PathBuf,
    /// Current lifecycle status
    pub status: JobStatus,
    /// Data payload
    pub data: JobData,
}

/// Options for creating a job
///
/// Defaults: generated id, `NEW` status, empty data.
#[derive(Debug, Clone, Default)]
pub struct CreateJob {
    id: Option<JobId>,
    status: JobStatus,
    data: Option<JobData>,
}

impl CreateJob {
    /// Start from the defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit id instead of generating one
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: JobId) -> Self {
        self.id = Some(id);
        self
    }

    /// Start in a status other than `NEW`
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Seed the job with a data payload
    #[inline]
    #[must_use]
    pub fn with_data(mut self, data: JobData) -> Self {
        self.data = Some(data);
        self
    }
}

/// Owns the job collection and its directory tree
#[derive(Debug)]
pub struct JobManager {
    jobs: HashMap<JobId, JobRecord>,
    jobs_root: PathBuf,
    kept: Option<JobId>,
}

impl JobManager {
    /// Create a manager rooted at `jobs_root`
    ///
    /// The root itself is created lazily, on the first job creation.
    #[inline]
    #[must_use]
    pub fn new(jobs_root: impl Into<PathBuf>) -> Self {
        Self {
            jobs: HashMap::new(),
            jobs_root: jobs_root.into(),
            kept: None,
        }
    }

    /// The jobs-root directory
    #[inline]
    #[must_use]
    pub fn jobs_root(&self) -> &Path {
        &self.jobs_root
    }

    /// Number of registered jobs
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.jobs.len()
    }

    /// Whether a job id is registered
    #[inline]
    #[must_use]
    pub fn has_job(&self, id: JobId) -> bool {
        self.jobs.contains_key(&id)
    }

    /// Ids of all registered jobs, in no particular order
    #[must_use]
    pub fn job_ids(&self) -> Vec<JobId> {
        self.jobs.keys().copied().collect()
    }

    /// Create a job, materializing its directory under the jobs root
    ///
    /// A pre-existing directory for the id (stale leftover, id collision) is
    /// removed and recreated rather than treated as fatal; the anomaly is
    /// logged as recoverable.
    ///
    /// # Errors
    /// - `JobError::Io` if the directory cannot be created or a stale
    ///   leftover cannot be removed
    pub fn create_job(&mut self, options: CreateJob) -> Result<(JobId, PathBuf), JobError> {
        let id = options.id.unwrap_or_default();
        let path = self.jobs_root.join(id.to_string());

        if path.exists() {
            tracing::warn!(job = %id, path = %path.display(),
                "job path already exists; removing old directory and recreating");
            std::fs::remove_dir_all(&path).map_err(|source| JobError::Io {
                path: path.clone(),
                source,
            })?;
        }
        std::fs::create_dir_all(&path).map_err(|source| JobError::Io {
            path: path.clone(),
            source,
        })?;

        let record = JobRecord {
            id,
            path: path.clone(),
            status: options.status,
            data: options.data.unwrap_or_default(),
        };
        self.jobs.insert(id, record);
        tracing::debug!(job = %id, path = %path.display(), "job created");

        Ok((id, path))
    }

    /// Clone a job: fresh id and directory, deep-copied data, same status
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    /// - `JobError::Io` if the clone's directory cannot be created
    pub fn clone_job(&mut self, id: JobId) -> Result<(JobId, PathBuf), JobError> {
        let source = self.record(id)?;
        let data = source.data.clone();
        let status = source.status;

        let (new_id, new_path) = self.create_job(CreateJob::new().with_data(data))?;
        self.update_job(new_id, status, None)?;

        Ok((new_id, new_path))
    }

    /// Replace a job's status, and optionally its data
    ///
    /// Status strings are validated at the [`JobStatus`] parse boundary; a
    /// rejected string never reaches this call, so the stored status is
    /// untouched by an invalid update attempt.
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    pub fn update_job(
        &mut self,
        id: JobId,
        status: JobStatus,
        data: Option<JobData>,
    ) -> Result<(), JobError> {
        let record = self.record_mut(id)?;
        record.status = status;
        if let Some(data) = data {
            record.data = data;
        }
        Ok(())
    }

    /// Delete a job: registry entry and directory, recursively
    ///
    /// Directory removal is best-effort; a directory that is already gone is
    /// logged and ignored.
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    /// - `JobError::Io` if the directory exists but cannot be removed
    pub fn delete_job(&mut self, id: JobId) -> Result<(), JobError> {
        // TODO: guard against deleting a job whose external process is still
        // running (lock file under the job directory).
        let record = self
            .jobs
            .remove(&id)
            .ok_or(JobError::UnknownJob(id))?;

        if self.kept == Some(id) {
            self.kept = None;
        }

        match std::fs::remove_dir_all(&record.path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(job = %id, path = %record.path.display(),
                    "job directory already gone at delete");
                Ok(())
            }
            Err(source) => Err(JobError::Io {
                path: record.path,
                source,
            }),
        }
    }

    /// Delete every registered job, order unspecified
    ///
    /// One failed deletion does not stop the sweep; the first error is
    /// returned after every job has been attempted.
    ///
    /// # Errors
    /// - the first `JobError` encountered during the sweep, if any
    pub fn delete_all_jobs(&mut self) -> Result<(), JobError> {
        let mut first_error = None;
        for id in self.job_ids() {
            if let Err(err) = self.delete_job(id) {
                tracing::error!(job = %id, error = %err, "job deletion failed; continuing sweep");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// A job's directory
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    pub fn job_path(&self, id: JobId) -> Result<&Path, JobError> {
        Ok(&self.record(id)?.path)
    }

    /// A job's current status
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    pub fn job_status(&self, id: JobId) -> Result<JobStatus, JobError> {
        Ok(self.record(id)?.status)
    }

    /// Set a job's status without touching its data
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    pub fn set_job_status(&mut self, id: JobId, status: JobStatus) -> Result<(), JobError> {
        self.record_mut(id)?.status = status;
        Ok(())
    }

    /// A job's data payload
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    pub fn job_data(&self, id: JobId) -> Result<&JobData, JobError> {
        Ok(&self.record(id)?.data)
    }

    /// Replace a job's data payload
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    pub fn set_job_data(&mut self, id: JobId, data: JobData) -> Result<(), JobError> {
        self.record_mut(id)?.data = data;
        Ok(())
    }

    /// Mark a job as the kept one; displaces any previous marker
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    pub fn set_kept_job(&mut self, id: JobId) -> Result<(), JobError> {
        if !self.has_job(id) {
            return Err(JobError::UnknownJob(id));
        }
        self.kept = Some(id);
        Ok(())
    }

    /// The kept job, if one is marked
    #[inline]
    #[must_use]
    pub fn kept_job(&self) -> Option<JobId> {
        self.kept
    }

    /// Display tuple for the job table: [id, model-id, status, kept-marker]
    ///
    /// Precondition: the job's custom data carries a `model` object with an
    /// `id` field, the shape the single table-view caller always writes.
    ///
    /// # Errors
    /// - `JobError::UnknownJob` if `id` is not registered
    /// - `JobError::MissingModelId` if the nested model-id shape is absent
    pub fn table_row(&self, id: JobId) -> Result<[String; 4], JobError> {
        let record = self.record(id)?;

        let model_id = record
            .data
            .custom("model")
            .and_then(Value::as_object)
            .and_then(|model| model.get("id"))
            .ok_or(JobError::MissingModelId(id))?;

        let kept = if self.kept == Some(id) { KEPT_MARKER } else { "" };

        Ok([
            id.to_string(),
            display_value(model_id),
            record.status.to_string(),
            kept.to_string(),
        ])
    }

    fn record(&self, id: JobId) -> Result<&JobRecord, JobError> {
        self.jobs.get(&id).ok_or(JobError::UnknownJob(id))
    }

    fn record_mut(&mut self, id: JobId) -> Result<&mut JobRecord, JobError> {
        self.jobs.get_mut(&id).ok_or(JobError::UnknownJob(id))
    }
}

/// Display form for table cells: strings bare, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

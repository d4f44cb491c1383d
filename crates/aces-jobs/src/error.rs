//! Error types for job lifecycle management

use crate::job::JobId;
use std::path::PathBuf;

/// Errors raised by job and job-manager operations
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Status string outside the five recognized values
    #[error("invalid job status: {0}")]
    InvalidStatus(String),

    /// Operation addressed a job id that is not registered
    #[error("unknown job id: {0}")]
    UnknownJob(JobId),

    /// Table row requested for a job whose data lacks the model-id shape
    #[error("job {0} data is missing the model id required for table display")]
    MissingModelId(JobId),

    /// Filesystem operation under the jobs root failed
    #[error("job directory operation failed at {path}: {source}")]
    Io {
        /// Directory the operation targeted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

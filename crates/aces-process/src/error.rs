//! Error types for the automated-process crate

use crate::pipeline::Stage;
use aces_jobs::{JobError, JobId};
use aces_template::TemplateError;

/// Error raised by an individual stage implementation
///
/// Stage implementations carry domain-specific failures; the pipeline only
/// needs a message it can attribute to a stage, so conversions from the
/// common failure sources are provided for `?` use inside stages.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StageError(String);

impl StageError {
    /// Create a stage error from a message
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<std::io::Error> for StageError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<TemplateError> for StageError {
    fn from(err: TemplateError) -> Self {
        Self(err.to_string())
    }
}

impl From<JobError> for StageError {
    fn from(err: JobError) -> Self {
        Self(err.to_string())
    }
}

impl From<serde_json::Error> for StageError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// Pipeline failure, attributed to the stage that raised it
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A stage failed; the remaining pipeline was aborted
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Which of the seven stages failed
        stage: Stage,
        /// The stage's own failure
        #[source]
        source: StageError,
    },
}

impl PipelineError {
    /// Attribute a stage failure
    #[inline]
    #[must_use]
    pub fn stage(stage: Stage, source: StageError) -> Self {
        Self::Stage { stage, source }
    }

    /// The stage that failed
    #[inline]
    #[must_use]
    pub fn failed_stage(&self) -> Stage {
        match self {
            Self::Stage { stage, .. } => *stage,
        }
    }
}

/// Errors raised by the external-process runner
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A run for this job id is already in flight
    #[error("job {0} already has a run in flight")]
    AlreadyRunning(JobId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_names_the_stage() {
        let err = PipelineError::stage(Stage::Execute, StageError::new("exit code 2"));
        assert_eq!(err.failed_stage(), Stage::Execute);
        assert!(err.to_string().contains("execute"));
        assert!(err.to_string().contains("exit code 2"));
    }

    #[test]
    fn stage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no results file");
        let err: StageError = io.into();
        assert!(err.to_string().contains("no results file"));
    }
}

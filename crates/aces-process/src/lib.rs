//! Automated analysis processes
//!
//! Orchestration layer of the analysis-job workspace:
//! - [`AutomatedProcess`] runs the fixed seven-stage pipeline (parse input,
//!   preprocess, create execution input, execute, parse output, postprocess,
//!   create output) around an injectable [`AnalysisStages`] implementation
//! - [`ProcessRunner`] invokes the external analysis executable on a worker
//!   task with a bounded timeout, reporting completion per job id
//!
//! The pipeline itself never touches job status; the orchestrating caller
//! observes success or failure and drives the job manager accordingly.

pub mod error;
pub mod pipeline;
pub mod runner;

pub use error::{PipelineError, RunnerError, StageError};
pub use pipeline::{AnalysisStages, AutomatedProcess, Callback, ProcessData, Stage};
pub use runner::{ProcessRunner, RunContext, RunOutcome, RunStatus, DEFAULT_TIMEOUT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

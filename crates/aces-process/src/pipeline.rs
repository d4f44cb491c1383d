//! Automated-process pipeline
//!
//! A fixed seven-stage pipeline drives one analysis run: parse input,
//! preprocess, create execution input, execute, parse execution output,
//! postprocess, create output data. The five substantive stages are
//! injectable through the [`AnalysisStages`] trait; preprocess and
//! postprocess run caller-registered callback lists strictly in registration
//! order. Stages execute strictly in order with no skipping; the first
//! failure aborts the remainder with no retry. The orchestrating caller
//! observes the failure and moves the owning job to ERROR.

use crate::error::{PipelineError, StageError};
use aces_jobs::JobId;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The seven pipeline stages, in their fixed execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Upstream files/artifacts into the input mapping
    ParseInput,
    /// Ordered pre-callbacks over the input mapping
    Preprocess,
    /// Materialize files/arguments for the external tool
    CreateExecutionInput,
    /// Invoke the external process and capture its exit status
    Execute,
    /// External tool's result artifact into the output mapping
    ParseOutput,
    /// Ordered post-callbacks over the output mapping
    Postprocess,
    /// Finalize the output mapping for downstream consumption
    CreateOutput,
}

impl Stage {
    /// All stages in execution order
    pub const ORDER: [Stage; 7] = [
        Stage::ParseInput,
        Stage::Preprocess,
        Stage::CreateExecutionInput,
        Stage::Execute,
        Stage::ParseOutput,
        Stage::Postprocess,
        Stage::CreateOutput,
    ];
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::ParseInput => "parse-input",
            Stage::Preprocess => "preprocess",
            Stage::CreateExecutionInput => "create-execution-input",
            Stage::Execute => "execute",
            Stage::ParseOutput => "parse-output",
            Stage::Postprocess => "postprocess",
            Stage::CreateOutput => "create-output",
        };
        f.write_str(name)
    }
}

/// Shared state threaded through every stage of one run
#[derive(Debug)]
pub struct ProcessData {
    /// Job this run belongs to
    pub job_id: JobId,
    /// Working directory for the run (the job's directory)
    pub working_dir: PathBuf,
    /// Input mapping, filled by parse-input and shaped by preprocess
    pub input: BTreeMap<String, Value>,
    /// Output mapping, filled by parse-output and shaped by postprocess
    pub output: BTreeMap<String, Value>,
}

impl ProcessData {
    /// Create empty run state for a job
    #[inline]
    #[must_use]
    pub fn new(job_id: JobId, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_id,
            working_dir: working_dir.into(),
            input: BTreeMap::new(),
            output: BTreeMap::new(),
        }
    }
}

/// The five injectable stages of an analysis
///
/// Implementations hold whatever per-analysis state they need (templates,
/// tool paths, result parsers); the pipeline owns the ordering.
pub trait AnalysisStages {
    /// Read upstream files/artifacts into `data.input`
    fn parse_input_data(&mut self, data: &mut ProcessData) -> Result<(), StageError>;

    /// Materialize the files and arguments the external tool needs
    fn create_execution_input(&mut self, data: &mut ProcessData) -> Result<(), StageError>;

    /// Invoke the external process; must capture and propagate exit status
    fn execute(&mut self, data: &mut ProcessData) -> Result<(), StageError>;

    /// Parse the tool's result artifact into `data.output`
    fn parse_execution_output(&mut self, data: &mut ProcessData) -> Result<(), StageError>;

    /// Finalize `data.output` for downstream consumption
    fn create_output_data(&mut self, data: &mut ProcessData) -> Result<(), StageError>;
}

/// Ordered, caller-controlled hook invoked between stages
pub type Callback = Box<dyn FnMut(&mut ProcessData) + Send>;

/// Fixed seven-stage pipeline around an [`AnalysisStages`] implementation
pub struct AutomatedProcess<S: AnalysisStages> {
    stages: S,
    pre_callbacks: Vec<Callback>,
    post_callbacks: Vec<Callback>,
}

impl<S: AnalysisStages> AutomatedProcess<S> {
    /// Wrap a stage implementation with empty callback lists
    #[inline]
    #[must_use]
    pub fn new(stages: S) -> Self {
        Self {
            stages,
            pre_callbacks: Vec::new(),
            post_callbacks: Vec::new(),
        }
    }

    /// Replace the pre-callback list; executed in list order at preprocess
    pub fn set_pre_callbacks(&mut self, callbacks: Vec<Callback>) {
        self.pre_callbacks = callbacks;
    }

    /// Replace the post-callback list; executed in list order at postprocess
    pub fn set_post_callbacks(&mut self, callbacks: Vec<Callback>) {
        self.post_callbacks = callbacks;
    }

    /// The wrapped stage implementation
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &S {
        &self.stages
    }

    /// Run the seven stages strictly in order
    ///
    /// # Errors
    /// - `PipelineError::Stage` naming the first stage that failed; the
    ///   remaining stages are not attempted
    pub fn run_job(&mut self, data: &mut ProcessData) -> Result<(), PipelineError> {
        tracing::debug!(job = %data.job_id, "parsing input data");
        self.stages
            .parse_input_data(data)
            .map_err(|e| PipelineError::stage(Stage::ParseInput, e))?;

        tracing::debug!(job = %data.job_id, "preprocessing data");
        for callback in &mut self.pre_callbacks {
            callback(data);
        }

        tracing::debug!(job = %data.job_id, "creating execution input");
        self.stages
            .create_execution_input(data)
            .map_err(|e| PipelineError::stage(Stage::CreateExecutionInput, e))?;

        tracing::debug!(job = %data.job_id, "executing");
        self.stages
            .execute(data)
            .map_err(|e| PipelineError::stage(Stage::Execute, e))?;

        tracing::debug!(job = %data.job_id, "parsing execution output");
        self.stages
            .parse_execution_output(data)
            .map_err(|e| PipelineError::stage(Stage::ParseOutput, e))?;

        tracing::debug!(job = %data.job_id, "postprocessing data");
        for callback in &mut self.post_callbacks {
            callback(data);
        }

        tracing::debug!(job = %data.job_id, "creating output data");
        self.stages
            .create_output_data(data)
            .map_err(|e| PipelineError::stage(Stage::CreateOutput, e))?;

        Ok(())
    }
}

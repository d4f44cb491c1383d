//! Bounded external-process execution
//!
//! The execute stage must not block the interactive surface, so the external
//! tool runs on a dedicated tokio task with a bounded timeout. Combined
//! stdout+stderr is redirected to a file in the job directory; completion is
//! delivered on a channel carrying the originating job id so the caller can
//! re-enable the job once the run is over. A timeout reports as a failed
//! completion, never a raised error, so the caller always reaches a terminal
//! status. There is no cancel primitive; the timeout is the only bounded
//! termination. At most one run per job id may be in flight at a time.

use crate::error::RunnerError;
use aces_jobs::JobId;
use dashmap::DashSet;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::mpsc;

/// Reference timeout for an external analysis run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60 * 10);

/// Everything one external invocation needs
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Job this run belongs to
    pub job_id: JobId,
    /// Executable to invoke
    pub program: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Working directory for the process (the job's directory)
    pub working_dir: PathBuf,
    /// File receiving combined stdout+stderr
    pub output_path: PathBuf,
    /// Optional payload written to the process's standard input
    pub stdin: Option<String>,
}

/// How an invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Process exited; carries the exit code (0 is success)
    Exited(i32),
    /// Process could not be spawned or observed
    Failed(String),
    /// Timed out; forcibly treated as a failed completion
    TimedOut,
}

impl RunStatus {
    /// Whether the run completed with a zero exit code
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Exited(0))
    }
}

/// Completion report delivered to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Job the run belonged to
    pub job_id: JobId,
    /// How the run ended
    pub status: RunStatus,
}

/// Runs external tools on dedicated tasks with a bounded timeout
#[derive(Debug)]
pub struct ProcessRunner {
    timeout: Duration,
    in_flight: Arc<DashSet<JobId>>,
    outcome_tx: mpsc::Sender<RunOutcome>,
}

impl ProcessRunner {
    /// Create a runner with the reference ten-minute timeout
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<RunOutcome>) {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a runner with an explicit timeout bound
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> (Self, mpsc::Receiver<RunOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        (
            Self {
                timeout,
                in_flight: Arc::new(DashSet::new()),
                outcome_tx,
            },
            outcome_rx,
        )
    }

    /// Whether a run for this job id is currently in flight
    #[inline]
    #[must_use]
    pub fn is_running(&self, job_id: JobId) -> bool {
        self.in_flight.contains(&job_id)
    }

    /// Start an invocation on a dedicated task
    ///
    /// Completion (success, failure, or timeout) arrives on the outcome
    /// channel; the in-flight guard clears just before delivery.
    ///
    /// # Errors
    /// - `RunnerError::AlreadyRunning` if this job id already has a run in
    ///   flight
    pub fn spawn(&self, context: RunContext) -> Result<(), RunnerError> {
        let job_id = context.job_id;
        if !self.in_flight.insert(job_id) {
            return Err(RunnerError::AlreadyRunning(job_id));
        }

        let in_flight = Arc::clone(&self.in_flight);
        let outcome_tx = self.outcome_tx.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            tracing::debug!(job = %job_id, program = %context.program, "external run starting");
            let status = run_to_completion(context, timeout).await;
            tracing::debug!(job = %job_id, status = ?status, "external run finished");

            in_flight.remove(&job_id);
            let _ = outcome_tx.send(RunOutcome { job_id, status }).await;
        });

        Ok(())
    }
}

async fn run_to_completion(context: RunContext, timeout: Duration) -> RunStatus {
    let output = match std::fs::File::create(&context.output_path) {
        Ok(file) => file,
        Err(err) => {
            return RunStatus::Failed(format!(
                "cannot create output file {}: {err}",
                context.output_path.display()
            ))
        }
    };
    let errput = match output.try_clone() {
        Ok(file) => file,
        Err(err) => return RunStatus::Failed(format!("cannot share output file: {err}")),
    };

    let mut command = Command::new(&context.program);
    command
        .args(&context.args)
        .current_dir(&context.working_dir)
        .stdout(Stdio::from(output))
        .stderr(Stdio::from(errput))
        .stdin(if context.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => return RunStatus::Failed(format!("spawn failed: {err}")),
    };

    if let Some(payload) = context.stdin {
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(payload.as_bytes()).await {
                let _ = child.kill().await;
                return RunStatus::Failed(format!("writing stdin payload failed: {err}"));
            }
            // Dropping stdin closes the pipe so the tool sees EOF
        }
    }

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(exit)) => RunStatus::Exited(exit.code().unwrap_or(-1)),
        Ok(Err(err)) => RunStatus::Failed(format!("waiting on process failed: {err}")),
        Err(_elapsed) => {
            let _ = child.kill().await;
            RunStatus::TimedOut
        }
    }
}

//! Job lifecycle management
//!
//! One "job" is a unit of analysis work: an identity, a lifecycle status, a
//! directory under the jobs root, and a data payload of inputs, outputs, and
//! custom values. The [`JobManager`] owns the authoritative collection,
//! creates and clones jobs, enforces status validity at the string boundary,
//! and derives tabular summaries for the job table view.
//!
//! # Example
//!
//! ```rust,no_run
//! use aces_jobs::{CreateJob, JobManager, JobStatus};
//!
//! # fn example() -> Result<(), aces_jobs::JobError> {
//! let mut manager = JobManager::new("/var/lib/aces/jobs");
//! let (id, _path) = manager.create_job(CreateJob::new())?;
//!
//! manager.set_job_status(id, JobStatus::Running)?;
//! assert_eq!(manager.job_status(id)?, JobStatus::Running);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod job;
pub mod manager;
pub mod status;

pub use data::JobData;
pub use error::JobError;
pub use job::{Job, JobId};
pub use manager::{CreateJob, JobManager, JobRecord, KEPT_MARKER};
pub use status::JobStatus;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types for scheduler operations.

use thiserror::Error;

use crate::core::process::Pid;

/// Errors produced by scheduler components.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Admission rejected: the burst does not fit in the remaining memory budget.
    #[error("insufficient memory: requested {requested}, used {used} of {limit}")]
    InsufficientMemory {
        /// Units requested by the new process.
        requested: u64,
        /// Units reserved at the time of the request.
        used: u64,
        /// Fixed memory budget.
        limit: u64,
    },
    /// No ready process carries this PID.
    #[error("process {0} not found")]
    NotFound(Pid),
    /// A scheduling policy was invoked with nothing to run.
    #[error("no processes in the ready queue")]
    EmptyQueue,
    /// Malformed arguments rejected at the boundary.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Persistence collaborator failure.
    #[error("persistence error: {0}")]
    Persistence(String),
    /// The time source failed while simulating a burst.
    #[error("clock error: {0}")]
    Clock(String),
    /// A scheduling run stopped early; unexecuted processes were re-queued.
    #[error("run aborted after {completed} completions, {requeued} re-queued: {reason}")]
    RunAborted {
        /// Processes that completed before the fault.
        completed: usize,
        /// Processes returned to the ready queue.
        requeued: usize,
        /// Underlying cause.
        reason: String,
    },
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

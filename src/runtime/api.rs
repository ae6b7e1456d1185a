//! API-facing request/response models and command dispatch.
//!
//! Any front end (shell, test harness, service layer) drives the scheduler by
//! sending a [`Command`] and receiving a [`Response`]. Errors are carried in the
//! response, never raised.

use serde::{Deserialize, Serialize};

use crate::core::{
    CompletionEvent, Pid, ProcessScheduler, ProcessSnapshot, ProcessStore, SchedulerError,
    SchedulingPolicy, SystemStats,
};
use crate::util::clock::Clock;

/// Command accepted by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Admit a new process.
    Create {
        /// Display label.
        name: String,
        /// Requested burst (and memory reservation).
        burst_time: u32,
        /// Scheduling priority, 0 when omitted.
        #[serde(default)]
        priority: i32,
    },
    /// Cancel a ready process.
    Terminate {
        /// Target process.
        pid: Pid,
    },
    /// List ready processes in queue order.
    ListReady,
    /// Run every ready process under a policy.
    Run {
        /// Ordering discipline.
        policy: SchedulingPolicy,
    },
    /// Memory and queue figures.
    Stats,
}

/// Error category carried by [`Response::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Admission rejected.
    InsufficientMemory,
    /// Termination target absent.
    NotFound,
    /// Nothing to run.
    EmptyQueue,
    /// Malformed arguments.
    InvalidInput,
    /// Persistence collaborator failure.
    Persistence,
    /// Time source failure.
    Clock,
    /// Run stopped early and re-queued its remainder.
    RunAborted,
    /// Bad configuration.
    InvalidConfig,
}

impl From<&SchedulerError> for ErrorKind {
    fn from(err: &SchedulerError) -> Self {
        match err {
            SchedulerError::InsufficientMemory { .. } => Self::InsufficientMemory,
            SchedulerError::NotFound(_) => Self::NotFound,
            SchedulerError::EmptyQueue => Self::EmptyQueue,
            SchedulerError::InvalidInput(_) => Self::InvalidInput,
            SchedulerError::Persistence(_) => Self::Persistence,
            SchedulerError::Clock(_) => Self::Clock,
            SchedulerError::RunAborted { .. } => Self::RunAborted,
            SchedulerError::InvalidConfig(_) => Self::InvalidConfig,
        }
    }
}

/// Outcome of a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// Process admitted.
    Created {
        /// Assigned identifier.
        pid: Pid,
    },
    /// Process cancelled.
    Terminated {
        /// Final view of the cancelled process.
        process: ProcessSnapshot,
    },
    /// Ready queue contents.
    Ready {
        /// Processes in queue order.
        processes: Vec<ProcessSnapshot>,
    },
    /// Scheduling run finished.
    Completed {
        /// Policy that ran.
        policy: SchedulingPolicy,
        /// One event per completed process, in execution order.
        events: Vec<CompletionEvent>,
    },
    /// Resource figures.
    Stats {
        /// Ledger and queue snapshot.
        stats: SystemStats,
    },
    /// Command failed.
    Error {
        /// Error category.
        kind: ErrorKind,
        /// Human-readable message.
        message: String,
    },
}

impl Response {
    /// Whether this response reports a failure.
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl From<SchedulerError> for Response {
    fn from(err: SchedulerError) -> Self {
        Self::Error {
            kind: ErrorKind::from(&err),
            message: err.to_string(),
        }
    }
}

/// Execute one command against a scheduler.
pub async fn dispatch<S, C>(scheduler: &mut ProcessScheduler<S, C>, command: Command) -> Response
where
    S: ProcessStore,
    C: Clock,
{
    let result = match command {
        Command::Create {
            name,
            burst_time,
            priority,
        } => scheduler
            .create(name, burst_time, priority)
            .map(|pid| Response::Created { pid }),
        Command::Terminate { pid } => scheduler
            .terminate(pid)
            .map(|process| Response::Terminated { process }),
        Command::ListReady => Ok(Response::Ready {
            processes: scheduler.list_ready(),
        }),
        Command::Run { policy } => scheduler
            .run(policy)
            .await
            .map(|events| Response::Completed { policy, events }),
        Command::Stats => Ok(Response::Stats {
            stats: scheduler.stats(),
        }),
    };
    result.unwrap_or_else(Response::from)
}

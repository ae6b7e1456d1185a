//! Process entity and its serializable views.

use serde::{Deserialize, Serialize};

/// Process identifier. Assigned from 1 upward and never reused.
pub type Pid = u64;

/// Lifecycle state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Admitted and waiting in the ready queue.
    Ready,
    /// Selected by a scheduling run and consuming simulated time.
    Running,
    /// Cancelled or completed.
    Terminated,
}

/// A simulated process.
///
/// Identity (`pid`, `name`, `priority`, `burst_time`) is fixed at admission.
/// `remaining_work` is signed because the stepped execution mode may overshoot
/// past zero on its last quantum.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    name: String,
    burst_time: u32,
    remaining_work: i64,
    priority: i32,
    state: ProcessState,
}

impl Process {
    /// Create a ready process whose remaining work equals its burst.
    pub fn new(pid: Pid, name: impl Into<String>, burst_time: u32, priority: i32) -> Self {
        Self {
            pid,
            name: name.into(),
            burst_time,
            remaining_work: i64::from(burst_time),
            priority,
            state: ProcessState::Ready,
        }
    }

    /// Process identifier.
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Burst requested at admission; also the memory reserved for the process.
    pub const fn burst_time(&self) -> u32 {
        self.burst_time
    }

    /// Simulated work left to run.
    pub const fn remaining_work(&self) -> i64 {
        self.remaining_work
    }

    /// Caller-supplied priority; higher runs first under priority scheduling.
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> ProcessState {
        self.state
    }

    pub(crate) fn consume(&mut self, amount: i64) {
        self.remaining_work -= amount;
    }

    pub(crate) fn mark_running(&mut self) {
        self.state = ProcessState::Running;
    }

    pub(crate) fn mark_terminated(&mut self) {
        self.state = ProcessState::Terminated;
    }

    /// Put an interrupted process back to its admission shape.
    pub(crate) fn reset(&mut self) {
        self.remaining_work = i64::from(self.burst_time);
        self.state = ProcessState::Ready;
    }

    /// Read-only copy for display and API responses.
    pub fn snapshot(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            pid: self.pid,
            name: self.name.clone(),
            burst_time: self.burst_time,
            remaining_work: self.remaining_work,
            priority: self.priority,
            state: self.state,
        }
    }

    /// Row handed to the persistence collaborator.
    pub fn record(&self) -> ProcessRecord {
        ProcessRecord {
            pid: self.pid,
            name: self.name.clone(),
            remaining_work: self.remaining_work,
            priority: self.priority,
        }
    }
}

/// Point-in-time view of a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    /// Process identifier.
    pub pid: Pid,
    /// Display label.
    pub name: String,
    /// Burst requested at admission.
    pub burst_time: u32,
    /// Work left at snapshot time.
    pub remaining_work: i64,
    /// Scheduling priority.
    pub priority: i32,
    /// Lifecycle state.
    pub state: ProcessState,
}

/// Persistence row for a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process identifier (primary key).
    pub pid: Pid,
    /// Display label.
    pub name: String,
    /// Work left when the row was written.
    pub remaining_work: i64,
    /// Scheduling priority.
    pub priority: i32,
}

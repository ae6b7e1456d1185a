//! FIFO ready queue of admitted processes.

use std::collections::VecDeque;

use crate::core::process::{Pid, Process, ProcessSnapshot};

/// Insertion-ordered container of processes in the `Ready` state.
///
/// PIDs are unique within the queue; the admission controller is the only
/// writer and never enqueues a PID twice.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    processes: VecDeque<Process>,
}

impl ReadyQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a process at the tail.
    pub fn enqueue(&mut self, process: Process) {
        debug_assert!(!self.contains(process.pid()), "duplicate pid in ready queue");
        self.processes.push_back(process);
    }

    /// Drain the entire queue in insertion order, leaving it empty.
    pub fn dequeue_all(&mut self) -> Vec<Process> {
        self.processes.drain(..).collect()
    }

    /// Remove the process with `pid`, keeping the relative order of the rest.
    pub fn remove_by_id(&mut self, pid: Pid) -> Option<Process> {
        let index = self.processes.iter().position(|p| p.pid() == pid)?;
        self.processes.remove(index)
    }

    /// Non-destructive copy of the current contents, in queue order.
    pub fn snapshot(&self) -> Vec<ProcessSnapshot> {
        self.processes.iter().map(Process::snapshot).collect()
    }

    /// Whether a process with `pid` is queued.
    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.iter().any(|p| p.pid() == pid)
    }

    /// Number of queued processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the queue holds nothing.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

//! Admission control: PID allocation, memory accounting, and the persistence seam.

use serde::{Deserialize, Serialize};

use crate::core::process::{Pid, Process, ProcessRecord, ProcessSnapshot};
use crate::core::ready_queue::ReadyQueue;
use crate::core::SchedulerError;

/// Default memory budget in abstract units.
pub const DEFAULT_MEMORY_LIMIT: u64 = 100_000;

/// Abstraction for persistence backends.
///
/// The core only writes on admission and deletes on termination or completion.
/// Failures are reported back but never undo in-memory state.
pub trait ProcessStore: Send {
    /// Persist a newly admitted process.
    fn persist(&mut self, record: &ProcessRecord) -> Result<(), SchedulerError>;
    /// Delete the row for `pid`.
    fn remove(&mut self, pid: Pid) -> Result<(), SchedulerError>;
}

impl<S: ProcessStore + ?Sized> ProcessStore for Box<S> {
    fn persist(&mut self, record: &ProcessRecord) -> Result<(), SchedulerError> {
        (**self).persist(record)
    }

    fn remove(&mut self, pid: Pid) -> Result<(), SchedulerError> {
        (**self).remove(pid)
    }
}

/// Snapshot of the resource ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    /// Units currently reserved.
    pub memory_used: u64,
    /// Fixed budget.
    pub memory_limit: u64,
    /// Units still free for admission.
    pub memory_available: u64,
    /// Processes waiting in the ready queue.
    pub ready_count: usize,
}

/// Memory reservation ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLedger {
    used: u64,
    limit: u64,
}

impl MemoryLedger {
    /// Create an empty ledger with a fixed budget.
    pub const fn new(limit: u64) -> Self {
        Self { used: 0, limit }
    }

    /// Units currently reserved.
    pub const fn used(&self) -> u64 {
        self.used
    }

    /// Fixed budget.
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Units still available.
    pub const fn available(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }

    /// Whether `amount` more units fit in the budget.
    pub const fn can_reserve(&self, amount: u64) -> bool {
        match self.used.checked_add(amount) {
            Some(total) => total <= self.limit,
            None => false,
        }
    }

    /// Reserve `amount` units, rejecting without change if over budget.
    pub fn try_reserve(&mut self, amount: u64) -> Result<(), SchedulerError> {
        if !self.can_reserve(amount) {
            return Err(SchedulerError::InsufficientMemory {
                requested: amount,
                used: self.used,
                limit: self.limit,
            });
        }
        self.used += amount;
        Ok(())
    }

    /// Apply `used = max(0, used - amount)`.
    ///
    /// `amount` may be negative, in which case usage grows by its magnitude.
    pub fn release(&mut self, amount: i64) {
        let next = i128::from(self.used) - i128::from(amount);
        self.used = u64::try_from(next.max(0)).unwrap_or(u64::MAX);
    }
}

/// Gate that creates and destroys processes against the memory budget.
///
/// Owns the ready queue, the ledger, and the PID counter; every mutation of
/// those three goes through here.
pub struct AdmissionController<S> {
    ready: ReadyQueue,
    ledger: MemoryLedger,
    next_pid: Pid,
    store: S,
}

impl<S: ProcessStore> AdmissionController<S> {
    /// Create a controller with an empty queue and a fresh PID counter.
    pub fn new(memory_limit: u64, store: S) -> Self {
        Self {
            ready: ReadyQueue::new(),
            ledger: MemoryLedger::new(memory_limit),
            next_pid: 1,
            store,
        }
    }

    /// Admit a process, reserving `burst_time` units of memory.
    ///
    /// A rejected request leaves the queue, the ledger, and the PID counter untouched.
    pub fn create_process(
        &mut self,
        name: impl Into<String>,
        burst_time: u32,
        priority: i32,
    ) -> Result<Pid, SchedulerError> {
        let name = name.into();
        if let Err(e) = self.ledger.try_reserve(u64::from(burst_time)) {
            tracing::warn!(%name, burst_time, used = self.ledger.used(), "admission rejected");
            return Err(e);
        }

        let pid = self.next_pid;
        self.next_pid += 1;
        let process = Process::new(pid, name, burst_time, priority);

        if let Err(e) = self.store.persist(&process.record()) {
            tracing::warn!("failed to persist process {}: {}", pid, e);
        }
        tracing::info!(
            pid,
            name = process.name(),
            burst_time,
            priority,
            "process created"
        );
        self.ready.enqueue(process);
        Ok(pid)
    }

    /// Cancel a ready process and free its current remaining work.
    pub fn terminate_process(&mut self, pid: Pid) -> Result<ProcessSnapshot, SchedulerError> {
        let Some(mut process) = self.ready.remove_by_id(pid) else {
            tracing::warn!(pid, "terminate: process not found");
            return Err(SchedulerError::NotFound(pid));
        };

        self.ledger.release(process.remaining_work());
        process.mark_terminated();
        self.remove_from_store(pid);
        tracing::info!(pid, "process terminated");
        Ok(process.snapshot())
    }

    /// Ready queue, read-only.
    pub const fn ready(&self) -> &ReadyQueue {
        &self.ready
    }

    /// Ledger, read-only.
    pub const fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    /// PID the next successful admission will receive.
    pub const fn next_pid(&self) -> Pid {
        self.next_pid
    }

    /// Current resource figures.
    pub fn stats(&self) -> SystemStats {
        SystemStats {
            memory_used: self.ledger.used(),
            memory_limit: self.ledger.limit(),
            memory_available: self.ledger.available(),
            ready_count: self.ready.len(),
        }
    }

    /// Persistence collaborator, read-only.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Take every ready process for a scheduling run.
    pub(crate) fn drain_ready(&mut self) -> Vec<Process> {
        self.ready.dequeue_all()
    }

    /// Return interrupted processes to the ready queue in ascending PID order.
    ///
    /// Their reservations were never released, so the ledger is untouched.
    pub(crate) fn requeue(&mut self, mut processes: Vec<Process>) {
        processes.sort_by_key(Process::pid);
        for mut process in processes {
            process.reset();
            tracing::info!(pid = process.pid(), "process re-queued");
            self.ready.enqueue(process);
        }
    }

    /// Finish a process that ran to completion, releasing `release` units.
    pub(crate) fn complete(&mut self, process: &mut Process, release: i64) {
        self.ledger.release(release);
        process.mark_terminated();
        self.remove_from_store(process.pid());
    }

    fn remove_from_store(&mut self, pid: Pid) {
        if let Err(e) = self.store.remove(pid) {
            tracing::warn!("failed to remove process {} from store: {}", pid, e);
        }
    }
}

//! Scheduler context: admission, policies, and execution behind one owned value.
//!
//! A `ProcessScheduler` is the whole simulated system. It is owned by a single
//! caller and every operation takes `&mut self`, so runs are strictly
//! run-to-completion: nothing can be admitted or terminated while a policy is
//! draining the queue.

use serde::{Deserialize, Serialize};

use crate::core::admission::{AdmissionController, ProcessStore, SystemStats};
use crate::core::audit::{build_audit_event, AuditAction, AuditSink};
use crate::core::engine::{ExecutionEngine, ExecutionOutcome};
use crate::core::policy::{ExecutionMode, SchedulingPolicy};
use crate::core::process::{Pid, Process, ProcessSnapshot};
use crate::core::SchedulerError;
use crate::util::clock::Clock;

/// How much memory a completed process gives back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Release exactly the burst reserved at admission, in every mode.
    #[default]
    Reserved,
    /// Release what the execution mode computes. In stepped mode that is the
    /// final, non-positive remaining work, so `max(0, used - remaining)` keeps
    /// the reservation and adds any overshoot on top.
    SteppedRemainder,
}

/// Emitted for every process that runs to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// Process identifier.
    pub pid: Pid,
    /// Display label.
    pub name: String,
    /// Scheduling priority.
    pub priority: i32,
    /// Burst requested at admission.
    pub burst_time: u32,
    /// Mode the process ran under.
    pub mode: ExecutionMode,
    /// Clock advances performed.
    pub steps: u32,
    /// Simulated time consumed.
    pub elapsed_ms: u64,
    /// Amount passed to the ledger's release.
    pub released: i64,
    /// Simulated clock reading at completion.
    pub finished_at_ms: u64,
}

/// The simulated system: ready queue, memory ledger, PID counter, and executor.
pub struct ProcessScheduler<S, C> {
    admission: AdmissionController<S>,
    engine: ExecutionEngine<C>,
    release_policy: ReleasePolicy,
    audit: Option<Box<dyn AuditSink>>,
}

impl<S, C> ProcessScheduler<S, C>
where
    S: ProcessStore,
    C: Clock,
{
    /// Create a scheduler from its parts.
    pub fn new(
        memory_limit: u64,
        quantum_ms: u64,
        release_policy: ReleasePolicy,
        store: S,
        clock: C,
    ) -> Self {
        Self {
            admission: AdmissionController::new(memory_limit, store),
            engine: ExecutionEngine::new(clock, quantum_ms),
            release_policy,
            audit: None,
        }
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Admit a process, `InsufficientMemory` if its burst does not fit.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        burst_time: u32,
        priority: i32,
    ) -> Result<Pid, SchedulerError> {
        let name = name.into();
        match self.admission.create_process(name.clone(), burst_time, priority) {
            Ok(pid) => {
                self.record_audit(Some(pid), AuditAction::Admit, Some(name));
                Ok(pid)
            }
            Err(e) => {
                self.record_audit(None, AuditAction::Reject, Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Cancel a ready process, `NotFound` if it is not queued.
    pub fn terminate(&mut self, pid: Pid) -> Result<ProcessSnapshot, SchedulerError> {
        let snapshot = self.admission.terminate_process(pid)?;
        self.record_audit(Some(pid), AuditAction::Terminate, None);
        Ok(snapshot)
    }

    /// Ready processes in queue order.
    pub fn list_ready(&self) -> Vec<ProcessSnapshot> {
        self.admission.ready().snapshot()
    }

    /// Memory used, memory limit, and ready count.
    pub fn stats(&self) -> SystemStats {
        self.admission.stats()
    }

    /// Release policy in effect.
    pub const fn release_policy(&self) -> ReleasePolicy {
        self.release_policy
    }

    /// Persistence collaborator, read-only.
    pub const fn store(&self) -> &S {
        self.admission.store()
    }

    /// Time source, read-only.
    pub const fn clock(&self) -> &C {
        self.engine.clock()
    }

    /// First-come-first-serve in stepped mode. An empty queue completes nothing.
    pub async fn run_fcfs(&mut self) -> Result<Vec<CompletionEvent>, SchedulerError> {
        self.run(SchedulingPolicy::Fcfs).await
    }

    /// Priority order in atomic mode, `EmptyQueue` if nothing is ready.
    pub async fn run_priority(&mut self) -> Result<Vec<CompletionEvent>, SchedulerError> {
        self.run(SchedulingPolicy::Priority).await
    }

    /// Shortest job first in atomic mode, `EmptyQueue` if nothing is ready.
    pub async fn run_sjf(&mut self) -> Result<Vec<CompletionEvent>, SchedulerError> {
        self.run(SchedulingPolicy::Sjf).await
    }

    /// Drain the ready queue and run every process under `policy`.
    ///
    /// If the clock faults mid-run, the interrupted process and everything not yet
    /// started go back to the queue as `Ready` and `RunAborted` is returned.
    pub async fn run(
        &mut self,
        policy: SchedulingPolicy,
    ) -> Result<Vec<CompletionEvent>, SchedulerError> {
        if self.admission.ready().is_empty() {
            if policy.rejects_empty() {
                tracing::warn!(%policy, "no processes in the queue to execute");
                return Err(SchedulerError::EmptyQueue);
            }
            return Ok(Vec::new());
        }

        let batch = policy.order(self.admission.drain_ready());
        tracing::info!(%policy, count = batch.len(), "starting scheduling run");

        let mut events = Vec::with_capacity(batch.len());
        let mut pending = batch.into_iter();
        while let Some(mut process) = pending.next() {
            self.record_audit(Some(process.pid()), AuditAction::Start, None);
            let result = self.engine.execute(&mut process, policy.mode()).await;
            match result {
                Ok(outcome) => events.push(self.finish(&mut process, &outcome)),
                Err(e) => {
                    let mut unexecuted = vec![process];
                    unexecuted.extend(pending);
                    return Err(self.abort(events.len(), unexecuted, &e));
                }
            }
        }

        tracing::info!(%policy, completed = events.len(), "all processes executed");
        Ok(events)
    }

    fn finish(&mut self, process: &mut Process, outcome: &ExecutionOutcome) -> CompletionEvent {
        let released = match self.release_policy {
            ReleasePolicy::Reserved => i64::from(process.burst_time()),
            ReleasePolicy::SteppedRemainder => outcome.mode_release,
        };
        self.admission.complete(process, released);
        tracing::info!(
            pid = process.pid(),
            name = process.name(),
            released,
            "process completed"
        );
        self.record_audit(
            Some(process.pid()),
            AuditAction::Complete,
            Some(format!("released {released}")),
        );

        CompletionEvent {
            pid: process.pid(),
            name: process.name().to_string(),
            priority: process.priority(),
            burst_time: process.burst_time(),
            mode: outcome.mode,
            steps: outcome.steps,
            elapsed_ms: outcome.elapsed_ms,
            released,
            finished_at_ms: self.engine.clock().elapsed_ms(),
        }
    }

    fn abort(
        &mut self,
        completed: usize,
        unexecuted: Vec<Process>,
        cause: &SchedulerError,
    ) -> SchedulerError {
        let requeued = unexecuted.len();
        let pids: Vec<Pid> = unexecuted.iter().map(Process::pid).collect();
        self.admission.requeue(unexecuted);
        for pid in pids {
            self.record_audit(Some(pid), AuditAction::Requeue, Some(cause.to_string()));
        }
        tracing::error!(completed, requeued, "scheduling run aborted: {}", cause);
        SchedulerError::RunAborted {
            completed,
            requeued,
            reason: cause.to_string(),
        }
    }

    fn record_audit(&mut self, pid: Option<Pid>, action: AuditAction, detail: Option<String>) {
        if let Some(sink) = self.audit.as_mut() {
            sink.record(build_audit_event(pid, action, detail));
        }
    }
}

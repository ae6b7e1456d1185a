//! Execution engine: simulates a process consuming its work on an injected clock.
//!
//! Two modes exist and both are observable through the memory release they report:
//!
//! - **Stepped**: consume a fixed quantum per step while remaining work is positive.
//!   The last step is not clamped, so remaining work may end below zero.
//! - **Atomic**: consume the whole remaining work in one step; the amount released
//!   is the untouched remaining work, i.e. the full reservation.
//!
//! The engine only moves time and work. Ledger and persistence bookkeeping stay
//! with the admission controller.

use serde::{Deserialize, Serialize};

use crate::core::policy::ExecutionMode;
use crate::core::process::Process;
use crate::core::SchedulerError;
use crate::util::clock::Clock;

/// Default stepped-mode quantum in simulated milliseconds.
pub const DEFAULT_QUANTUM_MS: u64 = 500;

/// What happened while a process ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Mode the process ran under.
    pub mode: ExecutionMode,
    /// Clock advances performed.
    pub steps: u32,
    /// Simulated time consumed.
    pub elapsed_ms: u64,
    /// Remaining work when the engine stopped (zero or negative in stepped mode).
    pub final_remaining: i64,
    /// Release amount as the mode itself computes it.
    pub mode_release: i64,
}

/// Runs processes one at a time to completion.
pub struct ExecutionEngine<C> {
    clock: C,
    quantum_ms: u64,
}

impl<C: Clock> ExecutionEngine<C> {
    /// Create an engine with a stepped-mode quantum. A zero quantum is raised to 1.
    pub const fn new(clock: C, quantum_ms: u64) -> Self {
        let quantum_ms = if quantum_ms == 0 { 1 } else { quantum_ms };
        Self { clock, quantum_ms }
    }

    /// Time source, read-only.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Run `process` to completion under `mode`.
    ///
    /// On a clock fault the error is returned and the process is left as it was
    /// after the last successful step; the caller decides how to recover it.
    pub async fn execute(
        &self,
        process: &mut Process,
        mode: ExecutionMode,
    ) -> Result<ExecutionOutcome, SchedulerError> {
        process.mark_running();
        match mode {
            ExecutionMode::Stepped => self.run_stepped(process).await,
            ExecutionMode::Atomic => self.run_atomic(process).await,
        }
    }

    async fn run_stepped(&self, process: &mut Process) -> Result<ExecutionOutcome, SchedulerError> {
        let quantum = i64::try_from(self.quantum_ms).unwrap_or(i64::MAX);
        let mut steps = 0u32;
        let mut elapsed_ms = 0u64;

        while process.remaining_work() > 0 {
            tracing::debug!(
                pid = process.pid(),
                remaining = process.remaining_work(),
                "process running"
            );
            self.clock.advance(self.quantum_ms).await?;
            process.consume(quantum);
            steps += 1;
            elapsed_ms += self.quantum_ms;
        }

        let final_remaining = process.remaining_work();
        Ok(ExecutionOutcome {
            mode: ExecutionMode::Stepped,
            steps,
            elapsed_ms,
            final_remaining,
            mode_release: final_remaining,
        })
    }

    async fn run_atomic(&self, process: &mut Process) -> Result<ExecutionOutcome, SchedulerError> {
        let work = process.remaining_work();
        let burst = u64::try_from(work).unwrap_or(0);
        self.clock.advance(burst).await?;
        process.consume(work);

        Ok(ExecutionOutcome {
            mode: ExecutionMode::Atomic,
            steps: 1,
            elapsed_ms: burst,
            final_remaining: process.remaining_work(),
            mode_release: work,
        })
    }
}

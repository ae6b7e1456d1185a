//! Core scheduling abstractions and memory accounting.

pub mod admission;
pub mod audit;
pub mod engine;
pub mod error;
pub mod policy;
pub mod process;
pub mod ready_queue;
pub mod scheduler;

pub use admission::{
    AdmissionController, MemoryLedger, ProcessStore, SystemStats, DEFAULT_MEMORY_LIMIT,
};
pub use audit::{
    build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink,
};
#[cfg(not(target_arch = "wasm32"))]
pub use audit::ChannelAuditSink;
pub use engine::{ExecutionEngine, ExecutionOutcome, DEFAULT_QUANTUM_MS};
pub use error::{AppResult, SchedulerError};
pub use policy::{ExecutionMode, SchedulingPolicy};
pub use process::{Pid, Process, ProcessRecord, ProcessSnapshot, ProcessState};
pub use ready_queue::ReadyQueue;
pub use scheduler::{CompletionEvent, ProcessScheduler, ReleasePolicy};

//! # procsim
//!
//! A process scheduler simulator: processes are admitted against a fixed memory
//! budget, wait in a FIFO ready queue, and are executed by one of three policies
//! on an injectable clock.
//!
//! ## Key Features
//!
//! - **Memory-Budgeted Admission**: every process reserves its burst time in
//!   memory units; requests that would exceed the limit are refused without
//!   consuming a PID
//! - **Three Policies**: First-Come-First-Serve (stepped, fixed quantum),
//!   Priority and Shortest Job First (atomic)
//! - **Injectable Time**: a deterministic virtual clock for tests and instant
//!   runs, or a tokio-backed clock that really sleeps
//! - **Best-Effort Persistence**: admissions and removals are mirrored to a
//!   process table (in memory or JSON lines on disk); failures are logged only
//! - **Audit Trail**: lifecycle events can be kept in a bounded ring or
//!   forwarded over a channel
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use procsim::core::{ProcessScheduler, ReleasePolicy, DEFAULT_MEMORY_LIMIT, DEFAULT_QUANTUM_MS};
//! use procsim::infra::InMemoryProcessStore;
//! use procsim::util::VirtualClock;
//!
//! let mut scheduler = ProcessScheduler::new(
//!     DEFAULT_MEMORY_LIMIT,
//!     DEFAULT_QUANTUM_MS,
//!     ReleasePolicy::Reserved,
//!     InMemoryProcessStore::new(),
//!     VirtualClock::new(),
//! );
//!
//! scheduler.create("editor", 1200, 1)?;
//! scheduler.create("compiler", 300, 5)?;
//!
//! // compiler (priority 5) runs first
//! let events = scheduler.run_priority().await?;
//! assert_eq!(events[0].name, "compiler");
//! assert_eq!(scheduler.stats().memory_used, 0);
//! ```
//!
//! Schedulers can also be assembled from `PROCSIM_*` environment variables with
//! [`config::SchedulerConfig::from_env`] and [`builders::SchedulerBuilder`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions and memory accounting.
pub mod core;
/// Configuration models for the scheduler, its clock, and its store.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Infrastructure adapters for the persistence collaborator.
pub mod infra;
/// Command surface and text shell.
pub mod runtime;
/// Shared utilities: clocks and tracing setup.
pub mod util;

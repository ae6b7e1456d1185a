//! Configuration models for the scheduler, its clock, and its store.

pub mod scheduler;

pub use scheduler::{ClockConfig, SchedulerConfig, StoreBackendConfig, ENV_PREFIX};

//! Builder that turns a [`SchedulerConfig`] into a ready-to-use scheduler.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{ClockConfig, SchedulerConfig, StoreBackendConfig};
use crate::core::{InMemoryAuditSink, ProcessScheduler, ProcessStore, SchedulerError};
use crate::infra::store::{FileProcessStore, InMemoryProcessStore, NullProcessStore};
use crate::util::clock::{Clock, VirtualClock};

/// Scheduler whose store and clock were chosen at runtime from configuration.
pub type DynScheduler = ProcessScheduler<Box<dyn ProcessStore>, Box<dyn Clock>>;

/// Audit log shared between a scheduler and its caller.
pub type SharedAuditLog = Arc<Mutex<InMemoryAuditSink>>;

/// Builds schedulers from validated configuration.
#[derive(Debug, Clone)]
pub struct SchedulerBuilder {
    config: SchedulerConfig,
}

impl SchedulerBuilder {
    /// Start from a configuration.
    pub const fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Configuration this builder will apply.
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Build a scheduler with the configured store and clock plus an attached audit log.
    pub fn build(self) -> Result<(DynScheduler, SharedAuditLog), SchedulerError> {
        self.config.validate()?;
        let store = store_from_config(&self.config.store)?;
        let clock = clock_from_config(self.config.clock)?;
        let audit: SharedAuditLog =
            Arc::new(Mutex::new(InMemoryAuditSink::new(self.config.audit_capacity)));

        let scheduler = self
            .build_with(store, clock)?
            .with_audit(Box::new(Arc::clone(&audit)));
        Ok((scheduler, audit))
    }

    /// Build a scheduler around caller-supplied store and clock.
    pub fn build_with<S, C>(self, store: S, clock: C) -> Result<ProcessScheduler<S, C>, SchedulerError>
    where
        S: ProcessStore,
        C: Clock,
    {
        self.config.validate()?;
        tracing::info!(
            memory_limit = self.config.memory_limit,
            quantum_ms = self.config.quantum_ms,
            release_policy = ?self.config.release_policy,
            "building scheduler"
        );
        Ok(ProcessScheduler::new(
            self.config.memory_limit,
            self.config.quantum_ms,
            self.config.release_policy,
            store,
            clock,
        ))
    }
}

fn store_from_config(cfg: &StoreBackendConfig) -> Result<Box<dyn ProcessStore>, SchedulerError> {
    let store: Box<dyn ProcessStore> = match cfg {
        StoreBackendConfig::InMemory => Box::new(InMemoryProcessStore::new()),
        StoreBackendConfig::File { path } => {
            let mut store = FileProcessStore::open(path)?;
            if let Some(max_pid) = store.max_pid() {
                // The ready queue is not restored, so the table must start empty with it.
                let removed = store.clear()?;
                tracing::warn!(max_pid, removed, "discarded process rows from a previous session");
            }
            Box::new(store)
        }
        StoreBackendConfig::None => Box::new(NullProcessStore),
    };
    Ok(store)
}

fn clock_from_config(cfg: ClockConfig) -> Result<Box<dyn Clock>, SchedulerError> {
    match cfg {
        ClockConfig::Virtual => Ok(Box::new(VirtualClock::new())),
        #[cfg(feature = "tokio-runtime")]
        ClockConfig::Real => Ok(Box::new(crate::util::clock::TokioClock::new())),
        #[cfg(not(feature = "tokio-runtime"))]
        ClockConfig::Real => Err(SchedulerError::InvalidConfig(
            "real clock requires the tokio-runtime feature".into(),
        )),
    }
}

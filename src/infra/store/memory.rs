//! In-memory process stores.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{Pid, ProcessRecord, ProcessStore, SchedulerError};

/// In-memory process table for development/testing.
///
/// Clones share the same table, so a caller can hand one clone to the scheduler
/// and keep another to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProcessStore {
    records: Arc<Mutex<BTreeMap<Pid, ProcessRecord>>>,
}

impl InMemoryProcessStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the row for `pid`.
    pub fn get(&self, pid: Pid) -> Option<ProcessRecord> {
        self.records.lock().get(&pid).cloned()
    }

    /// All rows in PID order.
    pub fn records(&self) -> Vec<ProcessRecord> {
        self.records.lock().values().cloned().collect()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl ProcessStore for InMemoryProcessStore {
    fn persist(&mut self, record: &ProcessRecord) -> Result<(), SchedulerError> {
        self.records.lock().insert(record.pid, record.clone());
        Ok(())
    }

    fn remove(&mut self, pid: Pid) -> Result<(), SchedulerError> {
        self.records.lock().remove(&pid);
        Ok(())
    }
}

/// Store that accepts every write and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProcessStore;

impl ProcessStore for NullProcessStore {
    fn persist(&mut self, _record: &ProcessRecord) -> Result<(), SchedulerError> {
        Ok(())
    }

    fn remove(&mut self, _pid: Pid) -> Result<(), SchedulerError> {
        Ok(())
    }
}

//! File-backed process table using JSON lines.
//!
//! One `ProcessRecord` per line. Admissions append; removals rewrite the file
//! from the in-memory copy. The table is reloaded when the store is reopened.

use std::collections::BTreeMap;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::core::{Pid, ProcessRecord, ProcessStore, SchedulerError};

/// File name used inside the store directory.
const TABLE_FILE: &str = "processes.jsonl";

/// Durable process table.
pub struct FileProcessStore {
    path: PathBuf,
    records: BTreeMap<Pid, ProcessRecord>,
}

impl FileProcessStore {
    /// Open (or create) a table under the directory `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SchedulerError> {
        let path = path.as_ref().to_path_buf();
        create_dir_all(&path).map_err(|e| SchedulerError::Persistence(e.to_string()))?;
        let mut store = Self {
            path,
            records: BTreeMap::new(),
        };
        store.load_from_disk()?;
        Ok(store)
    }

    /// Path of the JSON-lines file.
    pub fn file_path(&self) -> PathBuf {
        self.path.join(TABLE_FILE)
    }

    /// Rows currently stored, in PID order.
    pub fn records(&self) -> Vec<ProcessRecord> {
        self.records.values().cloned().collect()
    }

    /// Highest PID present in the table, if any.
    pub fn max_pid(&self) -> Option<Pid> {
        self.records.keys().next_back().copied()
    }

    /// Drop every row, in memory and on disk. Returns how many rows were removed.
    pub fn clear(&mut self) -> Result<usize, SchedulerError> {
        let removed = self.records.len();
        self.records.clear();
        self.rewrite_disk()?;
        Ok(removed)
    }

    fn load_from_disk(&mut self) -> Result<(), SchedulerError> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .read(true)
            .open(&file_path)
            .map_err(|e| SchedulerError::Persistence(e.to_string()))?;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| SchedulerError::Persistence(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let record: ProcessRecord = serde_json::from_str(&line)
                .map_err(|e| SchedulerError::Persistence(e.to_string()))?;
            self.records.insert(record.pid, record);
        }
        tracing::debug!(
            rows = self.records.len(),
            path = %file_path.display(),
            "loaded process table"
        );
        Ok(())
    }

    fn append_to_disk(&self, record: &ProcessRecord) -> Result<(), SchedulerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_path())
            .map_err(|e| SchedulerError::Persistence(e.to_string()))?;
        let line =
            serde_json::to_string(record).map_err(|e| SchedulerError::Persistence(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| SchedulerError::Persistence(e.to_string()))
    }

    fn rewrite_disk(&self) -> Result<(), SchedulerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.file_path())
            .map_err(|e| SchedulerError::Persistence(e.to_string()))?;
        for record in self.records.values() {
            let line = serde_json::to_string(record)
                .map_err(|e| SchedulerError::Persistence(e.to_string()))?;
            writeln!(file, "{line}").map_err(|e| SchedulerError::Persistence(e.to_string()))?;
        }
        Ok(())
    }
}

impl ProcessStore for FileProcessStore {
    fn persist(&mut self, record: &ProcessRecord) -> Result<(), SchedulerError> {
        if self.records.insert(record.pid, record.clone()).is_some() {
            // Replacing a row: appending would leave the stale line behind.
            return self.rewrite_disk();
        }
        self.append_to_disk(record)
    }

    fn remove(&mut self, pid: Pid) -> Result<(), SchedulerError> {
        if self.records.remove(&pid).is_none() {
            return Ok(());
        }
        self.rewrite_disk()
    }
}

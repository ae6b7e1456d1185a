//! Persistence backends for process records.

pub mod file;
pub mod memory;

pub use file::FileProcessStore;
pub use memory::{InMemoryProcessStore, NullProcessStore};

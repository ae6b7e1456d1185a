//! Infrastructure adapters for the persistence collaborator.

pub mod store;
pub use store::{FileProcessStore, InMemoryProcessStore, NullProcessStore};

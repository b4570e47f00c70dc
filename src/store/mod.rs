//! Persistence boundary for finished runs.

pub mod memory;

pub use memory::MemoryRunStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewRun, Run};

/// Errors from a run store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store rejected the write: {0}")]
    WriteRejected(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Capability for persisting and reading back finished runs.
///
/// Implementations assign identifiers; the tracker core never invents
/// them.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Persist a run, returning the stored record with its generated id.
    async fn save_run(&self, run: &NewRun) -> Result<Run, StoreError>;

    /// Fetch a stored run by id.
    async fn get_run(&self, id: Uuid) -> Result<Option<Run>, StoreError>;

    /// All stored runs, newest first.
    async fn list_runs(&self) -> Result<Vec<Run>, StoreError>;
}

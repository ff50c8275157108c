// Queue Repository Port (Interface)

use crate::domain::{EntryId, QueueEntry};
use crate::error::Result;
use crate::port::QueueTransaction;
use async_trait::async_trait;

/// Repository interface for the waiting queue
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Entries in insertion order
    async fn snapshot(&self) -> Result<Vec<QueueEntry>>;

    /// Begin an exclusive transaction for read-validate-append
    async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>>;

    /// Remove the entry with `id`; returns false if there was none
    async fn remove(&self, id: &EntryId) -> Result<bool>;

    /// Number of entries
    async fn len(&self) -> Result<usize>;
}

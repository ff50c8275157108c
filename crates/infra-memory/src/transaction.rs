// In-Memory Queue Transaction

use async_trait::async_trait;
use slotboard_core::domain::QueueEntry;
use slotboard_core::error::Result;
use slotboard_core::port::{QueueTransaction, Transaction};
use tokio::sync::OwnedMutexGuard;

/// Holds the queue lock until committed or dropped
pub struct MemoryQueueTransaction {
    guard: OwnedMutexGuard<Vec<QueueEntry>>,
    pending: Vec<QueueEntry>,
}

impl MemoryQueueTransaction {
    pub fn new(guard: OwnedMutexGuard<Vec<QueueEntry>>) -> Self {
        Self {
            guard,
            pending: Vec::new(),
        }
    }
}

#[async_trait]
impl Transaction for MemoryQueueTransaction {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        self.guard.extend(pending);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        tracing::debug!(discarded = self.pending.len(), "Queue transaction rolled back");
        Ok(())
    }
}

impl QueueTransaction for MemoryQueueTransaction {
    fn entries(&self) -> Vec<QueueEntry> {
        self.guard.iter().chain(self.pending.iter()).cloned().collect()
    }

    fn insert(&mut self, entry: QueueEntry) {
        self.pending.push(entry);
    }
}

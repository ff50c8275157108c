// In-Memory QueueRepository Implementation

use crate::MemoryQueueTransaction;
use async_trait::async_trait;
use slotboard_core::domain::{EntryId, QueueEntry};
use slotboard_core::error::Result;
use slotboard_core::port::{QueueRepository, QueueTransaction};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Insertion-ordered queue behind a single lock
#[derive(Clone, Default)]
pub struct MemoryQueueRepository {
    entries: Arc<Mutex<Vec<QueueEntry>>>,
}

impl MemoryQueueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueRepository for MemoryQueueRepository {
    async fn snapshot(&self) -> Result<Vec<QueueEntry>> {
        Ok(self.entries.lock().await.clone())
    }

    async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>> {
        let guard = Arc::clone(&self.entries).lock_owned().await;
        Ok(Box::new(MemoryQueueTransaction::new(guard)))
    }

    async fn remove(&self, id: &EntryId) -> Result<bool> {
        let mut entries = self.entries.lock().await;
        match entries.iter().position(|entry| &entry.id == id) {
            Some(index) => {
                entries.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.lock().await.len())
    }
}

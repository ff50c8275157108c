// Queue Service - Core use cases for the waiting queue

pub mod allocate;

pub use allocate::{book_slot, BookingRequest};

use crate::domain::{
    available_slots, generate_slots, sorted_view, taken_times, EntryId, QueueEntry,
};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, QueueRepository, SettingsRepository, TimeProvider};
use serde::Serialize;
use std::sync::Arc;

/// Result of a successful booking
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub item: QueueEntry,
    pub queue: Vec<QueueEntry>,
}

/// Slot availability as seen by the admin screen
#[derive(Debug, Clone, Serialize)]
pub struct SlotOverview {
    pub slots: Vec<String>,
    pub taken: Vec<String>,
    pub available: Vec<String>,
}

/// Queue Service
pub struct QueueService {
    queue_repo: Arc<dyn QueueRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl QueueService {
    pub fn new(
        queue_repo: Arc<dyn QueueRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            queue_repo,
            settings_repo,
            id_provider,
            time_provider,
        }
    }

    /// Queue in display order
    pub async fn list(&self) -> Result<Vec<QueueEntry>> {
        let entries = self.queue_repo.snapshot().await?;
        Ok(sorted_view(&entries))
    }

    /// Book a slot and return the new entry with the updated queue
    pub async fn book(&self, req: BookingRequest) -> Result<BookingOutcome> {
        let item = allocate::execute(
            self.queue_repo.as_ref(),
            self.settings_repo.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await?;
        let queue = self.list().await?;
        Ok(BookingOutcome { item, queue })
    }

    /// Remove an entry (served or cancelled)
    pub async fn remove(&self, id: &EntryId) -> Result<Vec<QueueEntry>> {
        if !self.queue_repo.remove(id).await? {
            return Err(AppError::NotFound(format!("entry {} not found", id)));
        }
        tracing::info!(entry_id = %id, "Entry removed");
        self.list().await
    }

    /// Generated slots with the taken and still-free subsets
    pub async fn slots(&self) -> Result<SlotOverview> {
        let config = self.settings_repo.load().await?.slot_config();
        let entries = self.queue_repo.snapshot().await?;

        let slots = generate_slots(&config);
        let taken = taken_times(&entries);
        let available = available_slots(&slots, &taken);

        // BTreeSet order is lexical; for zero-padded HH:MM that is chronological
        Ok(SlotOverview {
            slots,
            taken: taken.into_iter().collect(),
            available,
        })
    }
}

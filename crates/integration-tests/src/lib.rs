//! Shared wiring for the cross-crate tests

use slotboard_core::application::{QueueService, SettingsService};
use slotboard_core::domain::SettingsPatch;
use slotboard_core::port::id_provider::SequentialIdProvider;
use slotboard_core::port::time_provider::SteppingTimeProvider;
use slotboard_core::port::{QueueRepository, SettingsRepository};
use slotboard_infra_memory::{MemoryQueueRepository, MemorySettingsRepository};
use std::sync::Arc;

/// Services over fresh in-memory state with deterministic ids and clock
pub struct TestApp {
    pub queue_repo: Arc<dyn QueueRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub queue: QueueService,
    pub settings: SettingsService,
}

impl TestApp {
    pub fn new() -> Self {
        let queue_repo: Arc<dyn QueueRepository> = Arc::new(MemoryQueueRepository::new());
        let settings_repo: Arc<dyn SettingsRepository> =
            Arc::new(MemorySettingsRepository::new());

        let queue = QueueService::new(
            queue_repo.clone(),
            settings_repo.clone(),
            Arc::new(SequentialIdProvider::default()),
            Arc::new(SteppingTimeProvider::starting_at(1_700_000_000_000)),
        );
        let settings = SettingsService::new(settings_repo.clone());

        Self {
            queue_repo,
            settings_repo,
            queue,
            settings,
        }
    }

    /// Same app with the slot window replaced
    pub async fn with_window(day_start: &str, day_end: &str, minutes: i64) -> Self {
        let app = Self::new();
        app.settings
            .update(SettingsPatch {
                day_start: Some(day_start.to_string()),
                day_end: Some(day_end.to_string()),
                slot_minutes: Some(slotboard_core::domain::SlotInterval::new(minutes)),
                ..Default::default()
            })
            .await
            .expect("settings update");
        app
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

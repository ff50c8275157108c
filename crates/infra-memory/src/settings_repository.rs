// In-Memory SettingsRepository Implementation

use async_trait::async_trait;
use slotboard_core::domain::{Settings, SettingsPatch};
use slotboard_core::error::Result;
use slotboard_core::port::SettingsRepository;
use tokio::sync::RwLock;

/// Single settings record, initialized to defaults
#[derive(Default)]
pub struct MemorySettingsRepository {
    settings: RwLock<Settings>,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn load(&self) -> Result<Settings> {
        Ok(self.settings.read().await.clone())
    }

    async fn apply(&self, patch: SettingsPatch) -> Result<Settings> {
        let mut settings = self.settings.write().await;
        settings.apply(patch);
        Ok(settings.clone())
    }
}

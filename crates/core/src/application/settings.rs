// Settings Service

use crate::domain::{Settings, SettingsPatch};
use crate::error::Result;
use crate::port::SettingsRepository;
use std::sync::Arc;

/// Settings Service
pub struct SettingsService {
    settings_repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(settings_repo: Arc<dyn SettingsRepository>) -> Self {
        Self { settings_repo }
    }

    pub async fn get(&self) -> Result<Settings> {
        self.settings_repo.load().await
    }

    /// Merge a partial update; absent fields keep their value
    pub async fn update(&self, patch: SettingsPatch) -> Result<Settings> {
        if patch.is_empty() {
            return self.settings_repo.load().await;
        }
        let changed: Vec<String> = serde_json::to_value(&patch)?
            .as_object()
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default();

        let settings = self.settings_repo.apply(patch).await?;
        tracing::info!(fields = ?changed, "Settings updated");
        Ok(settings)
    }
}

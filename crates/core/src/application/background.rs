// Background Upload Use Case

use crate::domain::{BackgroundImage, Settings, SettingsPatch};
use crate::error::Result;
use crate::port::{ImageStore, SettingsRepository};
use serde::Serialize;
use std::sync::Arc;

/// Result of a background upload
#[derive(Debug, Clone, Serialize)]
pub struct BackgroundUpload {
    pub url: String,
    pub settings: Settings,
}

/// Stores background images and points the display settings at them
pub struct BackgroundService {
    image_store: Arc<dyn ImageStore>,
    settings_repo: Arc<dyn SettingsRepository>,
    max_bytes: usize,
}

impl BackgroundService {
    pub fn new(
        image_store: Arc<dyn ImageStore>,
        settings_repo: Arc<dyn SettingsRepository>,
        max_bytes: usize,
    ) -> Self {
        Self {
            image_store,
            settings_repo,
            max_bytes,
        }
    }

    /// Validate, store, then set `viewBgImageUrl` to the stored image
    pub async fn upload(&self, content_type: &str, bytes: Vec<u8>) -> Result<BackgroundUpload> {
        let image = BackgroundImage::new(content_type, bytes, self.max_bytes)?;
        let url = self.image_store.save(&image).await?;
        let settings = self
            .settings_repo
            .apply(SettingsPatch::background(url.clone()))
            .await?;

        tracing::info!(url = %url, size = image.len(), "Background image uploaded");

        Ok(BackgroundUpload { url, settings })
    }
}

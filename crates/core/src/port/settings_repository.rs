// Settings Repository Port (Interface)

use crate::domain::{Settings, SettingsPatch};
use crate::error::Result;
use async_trait::async_trait;

/// Holder of the single settings record
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Current settings
    async fn load(&self) -> Result<Settings>;

    /// Merge `patch` atomically and return the result
    async fn apply(&self, patch: SettingsPatch) -> Result<Settings>;
}

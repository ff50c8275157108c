// Image Store Port (Interface)

use crate::domain::BackgroundImage;
use crate::error::Result;
use async_trait::async_trait;

/// Storage for uploaded background images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the image and return the public URL it is served under
    async fn save(&self, image: &BackgroundImage) -> Result<String>;
}

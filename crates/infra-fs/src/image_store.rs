// Filesystem image store
// Uploaded backgrounds are written into the upload directory and served
// under `url_prefix`.
use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use slotboard_core::domain::BackgroundImage;
use slotboard_core::error::{AppError, Result};
use slotboard_core::port::{ImageStore, TimeProvider};

const NAME_SUFFIX_LEN: usize = 6;

/// Image store backed by a local directory
pub struct FsImageStore {
    dir: PathBuf,
    url_prefix: String,
    time_provider: Arc<dyn TimeProvider>,
}

impl FsImageStore {
    /// Create the store, creating `dir` if it does not exist
    pub async fn open(
        dir: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            time_provider,
        })
    }

    fn file_name(&self, image: &BackgroundImage) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NAME_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!(
            "bg-{}-{}.{}",
            self.time_provider.now_millis(),
            suffix,
            image.kind.extension()
        )
    }
}

/// Write `bytes` to `part`, then move it to `target`; `part` never outlives a failure
async fn persist(part: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let result = match tokio::fs::write(part, bytes).await {
        Ok(()) => tokio::fs::rename(part, target).await,
        Err(e) => Err(e),
    };
    if result.is_err() {
        let _ = tokio::fs::remove_file(part).await;
    }
    result
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, image: &BackgroundImage) -> Result<String> {
        let name = self.file_name(image);
        let final_path = self.dir.join(&name);
        let part_path = self.dir.join(format!(".{}.part", name));

        // Write then rename so a partial file is never served
        if let Err(e) = persist(&part_path, &final_path, &image.bytes).await {
            return Err(AppError::Storage(format!(
                "Failed to store {}: {}",
                final_path.display(),
                e
            )));
        }

        debug!(path = %final_path.display(), bytes = image.len(), "Background image stored");

        Ok(format!("{}/{}", self.url_prefix, name))
    }
}

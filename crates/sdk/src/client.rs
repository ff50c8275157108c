//! Slotboard Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    BookRequest, BookResponse, HealthResponse, QueueResponse, RemoveRequest, SettingsResponse,
    SlotsResponse, UploadRequest, UploadResponse,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use std::time::Duration;

/// Slotboard Client
///
/// # Example
///
/// ```no_run
/// use slotboard_sdk::SlotboardClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SlotboardClient::connect("http://127.0.0.1:9979").await?;
/// # Ok(())
/// # }
/// ```
pub struct SlotboardClient {
    client: HttpClient,
}

impl SlotboardClient {
    /// Connect to a Slotboard server
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9979`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .max_request_size(16 * 1024 * 1024)
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Queue in display order
    pub async fn list_queue(&self) -> Result<QueueResponse> {
        let response: QueueResponse = self.client.request("queue.list.v1", rpc_params![]).await?;
        Ok(response)
    }

    /// Book the earliest free slot
    pub async fn book_auto(&self, name: impl Into<String>) -> Result<BookResponse> {
        self.book(BookRequest {
            name: name.into(),
            mode: "auto".to_string(),
            time: None,
        })
        .await
    }

    /// Book an exact slot
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use slotboard_sdk::SlotboardClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = SlotboardClient::connect("http://127.0.0.1:9979").await?;
    /// match client.book_manual("Alice", "09:00").await {
    ///     Ok(res) => println!("booked {}", res.item.id),
    ///     Err(e) if e.is_conflict() => println!("09:00 is taken"),
    ///     Err(e) => return Err(e.into()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn book_manual(
        &self,
        name: impl Into<String>,
        time: impl Into<String>,
    ) -> Result<BookResponse> {
        self.book(BookRequest {
            name: name.into(),
            mode: "manual".to_string(),
            time: Some(time.into()),
        })
        .await
    }

    async fn book(&self, request: BookRequest) -> Result<BookResponse> {
        let params = rpc_params![request];
        let response: BookResponse = self.client.request("queue.book.v1", params).await?;
        Ok(response)
    }

    /// Remove a served or cancelled entry
    pub async fn remove(&self, id: impl Into<String>) -> Result<QueueResponse> {
        let request = RemoveRequest { id: id.into() };
        let params = rpc_params![request];
        let response: QueueResponse = self.client.request("queue.remove.v1", params).await?;
        Ok(response)
    }

    /// Generated, taken and free slots
    pub async fn slots(&self) -> Result<SlotsResponse> {
        let response: SlotsResponse = self.client.request("slots.list.v1", rpc_params![]).await?;
        Ok(response)
    }

    /// Current settings
    pub async fn settings(&self) -> Result<SettingsResponse> {
        let response: SettingsResponse =
            self.client.request("settings.get.v1", rpc_params![]).await?;
        Ok(response)
    }

    /// Merge a partial settings object
    pub async fn update_settings(&self, patch: serde_json::Value) -> Result<SettingsResponse> {
        if !patch.is_object() {
            return Err(SdkError::InvalidRequest(
                "settings patch must be a JSON object".to_string(),
            ));
        }
        let params = rpc_params![patch];
        let response: SettingsResponse =
            self.client.request("settings.update.v1", params).await?;
        Ok(response)
    }

    /// Upload a PNG or JPEG background image
    pub async fn upload_background(
        &self,
        content_type: impl Into<String>,
        bytes: &[u8],
    ) -> Result<UploadResponse> {
        let request = UploadRequest {
            content_type: content_type.into(),
            data: STANDARD.encode(bytes),
        };
        let params = rpc_params![request];
        let response: UploadResponse = self.client.request("background.upload.v1", params).await?;
        Ok(response)
    }

    /// Server health
    pub async fn health(&self) -> Result<HealthResponse> {
        let response: HealthResponse =
            self.client.request("system.health.v1", rpc_params![]).await?;
        Ok(response)
    }
}

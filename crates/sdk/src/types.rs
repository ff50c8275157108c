//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};

/// Request to book a slot
#[derive(Debug, Clone, Serialize)]
pub struct BookRequest {
    pub name: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Slot held by a queue item
#[derive(Debug, Clone, Deserialize)]
pub struct SlotInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

/// Queue entry as returned by the server
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub slot: SlotInfo,
    pub slot_minutes: Option<u32>,
}

/// Response from book operation
#[derive(Debug, Clone, Deserialize)]
pub struct BookResponse {
    pub ok: bool,
    pub item: QueueItem,
    pub queue: Vec<QueueItem>,
}

/// Request to remove an entry
#[derive(Debug, Clone, Serialize)]
pub struct RemoveRequest {
    pub id: String,
}

/// Response from list and remove operations
#[derive(Debug, Clone, Deserialize)]
pub struct QueueResponse {
    pub ok: bool,
    pub queue: Vec<QueueItem>,
}

/// Slot availability
#[derive(Debug, Clone, Deserialize)]
pub struct SlotsResponse {
    pub ok: bool,
    pub slots: Vec<String>,
    pub taken: Vec<String>,
    pub available: Vec<String>,
}

/// Settings record, kept as raw JSON so new display fields pass through
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsResponse {
    pub ok: bool,
    pub settings: serde_json::Map<String, serde_json::Value>,
}

/// Request to upload a background image
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub content_type: String,
    /// Base64-encoded file content
    pub data: String,
}

/// Response from upload operation
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub url: String,
    pub settings: serde_json::Map<String, serde_json::Value>,
}

/// Server health
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub uptime_seconds: u64,
}

//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results. Every result carries
//! `ok: true`; failures travel as JSON-RPC errors.

use serde::{Deserialize, Serialize};
use slotboard_core::domain::{QueueEntry, Settings};

/// queue.book.v1 - Book a slot
///
/// Scalar fields are coerced to strings, so `{"name": 42}` books "42".
#[derive(Debug, Default, Deserialize)]
pub struct BookRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub ok: bool,
    pub item: QueueEntry,
    pub queue: Vec<QueueEntry>,
}

/// queue.remove.v1 - Remove an entry
#[derive(Debug, Default, Deserialize)]
pub struct RemoveRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
}

/// queue.list.v1 / queue.remove.v1
#[derive(Debug, Clone, Serialize)]
pub struct QueueResponse {
    pub ok: bool,
    pub queue: Vec<QueueEntry>,
}

/// slots.list.v1 - Slot availability
#[derive(Debug, Clone, Serialize)]
pub struct SlotsResponse {
    pub ok: bool,
    pub slots: Vec<String>,
    pub taken: Vec<String>,
    pub available: Vec<String>,
}

/// settings.get.v1 / settings.update.v1
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub ok: bool,
    pub settings: Settings,
}

/// background.upload.v1 - Upload a PNG/JPEG background
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    pub content_type: String,
    /// Base64-encoded file content
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub url: String,
    pub settings: Settings,
}

/// system.health.v1
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Scalar-to-string coercion for request fields
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(optional_string(deserializer)?.unwrap_or_default())
    }

    /// `null` and `false` read as absent; numbers and `true` are stringified
    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::Bool(true) => Ok(Some("true".to_string())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::String(s) => Ok(Some(s)),
            Value::Array(_) => Err(D::Error::custom("expected a string, got an array")),
            Value::Object(_) => Err(D::Error::custom("expected a string, got an object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_request_coerces_scalars() {
        let req: BookRequest =
            serde_json::from_value(json!({"name": 42, "mode": "manual", "time": null})).unwrap();
        assert_eq!(req.name, "42");
        assert_eq!(req.mode.as_deref(), Some("manual"));
        assert_eq!(req.time, None);

        let req: BookRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.name, "");
        assert_eq!(req.mode, None);
    }

    #[test]
    fn test_structured_values_are_rejected() {
        let err = serde_json::from_value::<BookRequest>(json!({"name": ["a"]})).unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }

    #[test]
    fn test_remove_request_accepts_numeric_id() {
        let req: RemoveRequest = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(req.id, "7");
    }
}

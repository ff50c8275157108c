//! RPC Method Handlers
//!
//! Translates RPC parameters into service calls and shapes the results.

use crate::error::{invalid_params, to_rpc_error};
use crate::types::{
    BookRequest, BookResponse, HealthResponse, QueueResponse, RemoveRequest, SettingsResponse,
    SlotsResponse, UploadRequest, UploadResponse,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonrpsee::types::ErrorObjectOwned;
use serde::de::DeserializeOwned;
use serde_json::Value;
use slotboard_core::application::{
    BackgroundService, BookingRequest, QueueService, SettingsService,
};
use slotboard_core::domain::SettingsPatch;
use std::sync::Arc;

/// Decode method params; absent params read as an empty object
fn decode<T: DeserializeOwned>(params: Value) -> Result<T, ErrorObjectOwned> {
    let params = match params {
        Value::Null => Value::Object(Default::default()),
        Value::Object(_) => params,
        _ => return Err(invalid_params("body must be an object")),
    };
    serde_json::from_value(params).map_err(|e| invalid_params(format!("invalid params: {}", e)))
}

/// RPC Handler with injected services
pub struct RpcHandler {
    queue: Arc<QueueService>,
    settings: Arc<SettingsService>,
    background: Arc<BackgroundService>,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(
        queue: Arc<QueueService>,
        settings: Arc<SettingsService>,
        background: Arc<BackgroundService>,
    ) -> Self {
        Self {
            queue,
            settings,
            background,
            start_time: std::time::Instant::now(),
        }
    }

    /// queue.list.v1
    pub async fn list_queue(&self) -> Result<QueueResponse, ErrorObjectOwned> {
        let queue = self.queue.list().await.map_err(to_rpc_error)?;
        Ok(QueueResponse { ok: true, queue })
    }

    /// queue.book.v1
    pub async fn book(&self, params: Value) -> Result<BookResponse, ErrorObjectOwned> {
        let params: BookRequest = decode(params)?;
        let req = BookingRequest {
            name: params.name,
            mode: params.mode,
            time: params.time,
        };

        let outcome = self.queue.book(req).await.map_err(to_rpc_error)?;

        Ok(BookResponse {
            ok: true,
            item: outcome.item,
            queue: outcome.queue,
        })
    }

    /// queue.remove.v1
    pub async fn remove(&self, params: Value) -> Result<QueueResponse, ErrorObjectOwned> {
        let params: RemoveRequest = decode(params)?;
        if params.id.trim().is_empty() {
            return Err(invalid_params("id required"));
        }
        let queue = self.queue.remove(&params.id).await.map_err(to_rpc_error)?;
        Ok(QueueResponse { ok: true, queue })
    }

    /// slots.list.v1
    pub async fn slots(&self) -> Result<SlotsResponse, ErrorObjectOwned> {
        let overview = self.queue.slots().await.map_err(to_rpc_error)?;
        Ok(SlotsResponse {
            ok: true,
            slots: overview.slots,
            taken: overview.taken,
            available: overview.available,
        })
    }

    /// settings.get.v1
    pub async fn get_settings(&self) -> Result<SettingsResponse, ErrorObjectOwned> {
        let settings = self.settings.get().await.map_err(to_rpc_error)?;
        Ok(SettingsResponse { ok: true, settings })
    }

    /// settings.update.v1
    ///
    /// Takes the raw params so a non-object body is reported as a
    /// validation error rather than a generic parse failure.
    pub async fn update_settings(
        &self,
        params: Value,
    ) -> Result<SettingsResponse, ErrorObjectOwned> {
        if !params.is_object() {
            return Err(invalid_params("body must be an object"));
        }
        let patch: SettingsPatch = serde_json::from_value(params)
            .map_err(|e| invalid_params(format!("invalid settings: {}", e)))?;

        let settings = self.settings.update(patch).await.map_err(to_rpc_error)?;
        Ok(SettingsResponse { ok: true, settings })
    }

    /// background.upload.v1
    pub async fn upload_background(
        &self,
        params: Value,
    ) -> Result<UploadResponse, ErrorObjectOwned> {
        let params: UploadRequest = decode(params)?;
        let bytes = STANDARD
            .decode(params.data.trim())
            .map_err(|e| invalid_params(format!("data is not valid base64: {}", e)))?;

        let upload = self
            .background
            .upload(&params.content_type, bytes)
            .await
            .map_err(to_rpc_error)?;

        Ok(UploadResponse {
            ok: true,
            url: upload.url,
            settings: upload.settings,
        })
    }

    /// system.health.v1
    pub async fn health(&self) -> Result<HealthResponse, ErrorObjectOwned> {
        Ok(HealthResponse {
            ok: true,
            version: slotboard_core::VERSION.to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        })
    }
}

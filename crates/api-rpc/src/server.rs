//! JSON-RPC Server
//!
//! Serves JSON-RPC 2.0 over HTTP on the local network. `GET /health` is
//! proxied to `system.health.v1` for plain HTTP health checks, and stored uploads
//! are served under the upload URL prefix.

use crate::error::invalid_params;
use crate::handler::RpcHandler;
use crate::uploads::ServeUploadsLayer;
use jsonrpsee::server::middleware::http::ProxyGetRequestLayer;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::{ErrorObjectOwned, Params};
use jsonrpsee::RpcModule;
use serde_json::Value;
use slotboard_core::domain::DEFAULT_MAX_UPLOAD_BYTES;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "0.0.0.0";
const DEFAULT_RPC_PORT: u16 = 9979;
const HEALTH_PATH: &str = "/health";
const HEALTH_METHOD: &str = "system.health.v1";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_UPLOAD_URL_PREFIX: &str = "/uploads";

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request; must leave room for a base64 upload
    pub max_request_body_size: u32,
    /// Directory holding stored uploads
    pub upload_dir: PathBuf,
    /// URL path the upload directory is served under
    pub upload_url_prefix: String,
}

impl RpcServerConfig {
    /// Body limit large enough for a base64 upload of `max_upload_bytes`
    pub fn body_limit_for_upload(max_upload_bytes: usize) -> u32 {
        let encoded = max_upload_bytes.div_ceil(3) * 4;
        u32::try_from(encoded + 64 * 1024).unwrap_or(u32::MAX)
    }
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
            max_request_body_size: Self::body_limit_for_upload(DEFAULT_MAX_UPLOAD_BYTES),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            upload_url_prefix: DEFAULT_UPLOAD_URL_PREFIX.to_string(),
        }
    }
}

/// Raw params as JSON
///
/// Accepts both `{...}` and `[{...}]`; missing params read as `null`.
/// Typed decoding happens in the handler so every failure maps to a
/// validation error.
fn raw_params(params: &Params<'_>) -> Result<Value, ErrorObjectOwned> {
    let Some(raw) = params.as_str() else {
        return Ok(Value::Null);
    };
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| invalid_params(format!("invalid params: {}", e)))?;
    match value {
        Value::Array(mut items) if items.len() <= 1 => Ok(items.pop().unwrap_or(Value::Null)),
        other => Ok(other),
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, handler: RpcHandler) -> Self {
        Self {
            config,
            handler: Arc::new(handler),
        }
    }

    /// Build the method table
    pub fn into_module(self) -> Result<RpcModule<()>, String> {
        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method("queue.list.v1", move |_, _, _| {
                let handler = handler.clone();
                async move { handler.list_queue().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.book.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    handler.book(raw_params(&params)?).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.remove.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    handler.remove(raw_params(&params)?).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("slots.list.v1", move |_, _, _| {
                let handler = handler.clone();
                async move { handler.slots().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("settings.get.v1", move |_, _, _| {
                let handler = handler.clone();
                async move { handler.get_settings().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("settings.update.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    handler.update_settings(raw_params(&params)?).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("background.upload.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    handler.upload_background(raw_params(&params)?).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(HEALTH_METHOD, move |_, _, _| {
                let handler = handler.clone();
                async move { handler.health().await }
            })
            .map_err(|e| e.to_string())?;

        Ok(module)
    }

    /// Start the JSON-RPC server
    ///
    /// Binds to the configured host (all interfaces by default, for LAN
    /// displays). Returns the bound address alongside the handle so callers
    /// using port 0 can discover the real port.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let health = ProxyGetRequestLayer::new(HEALTH_PATH, HEALTH_METHOD)
            .map_err(|e| format!("Invalid health route: {}", e))?;
        let uploads =
            ServeUploadsLayer::new(&self.config.upload_url_prefix, self.config.upload_dir.clone());
        let http_middleware = tower::ServiceBuilder::new().layer(uploads).layer(health);

        let server = Server::builder()
            .max_request_body_size(self.config.max_request_body_size)
            .set_http_middleware(http_middleware)
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = self.into_module()?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}

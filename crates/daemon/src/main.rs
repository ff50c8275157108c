//! Slotboard - Main Entry Point
//! JSON-RPC server for the waiting queue, slots, settings and background uploads

mod config;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DaemonConfig;
use slotboard_api_rpc::{RpcHandler, RpcServer, RpcServerConfig};
use slotboard_core::application::{BackgroundService, QueueService, SettingsService};
use slotboard_core::port::id_provider::UuidProvider;
use slotboard_core::port::time_provider::SystemTimeProvider;
use slotboard_core::port::{QueueRepository, SettingsRepository};
use slotboard_infra_fs::FsImageStore;
use slotboard_infra_memory::{MemoryQueueRepository, MemorySettingsRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

fn init_logging(format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("slotboard=info"))?;

    match format {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()?;
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .try_init()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::load()?;

    // 2. Initialize logging
    init_logging(&config.log_format)?;

    info!("Slotboard v{} starting...", VERSION);
    info!(
        upload_dir = %config.upload_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let queue_repo: Arc<dyn QueueRepository> = Arc::new(MemoryQueueRepository::new());
    let settings_repo: Arc<dyn SettingsRepository> = Arc::new(MemorySettingsRepository::new());

    let image_store = Arc::new(
        FsImageStore::open(
            &config.upload_dir,
            config.upload_url_prefix.clone(),
            time_provider.clone(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Upload directory unavailable: {}", e))?,
    );

    let queue_service = Arc::new(QueueService::new(
        queue_repo,
        settings_repo.clone(),
        id_provider,
        time_provider,
    ));
    let settings_service = Arc::new(SettingsService::new(settings_repo.clone()));
    let background_service = Arc::new(BackgroundService::new(
        image_store,
        settings_repo,
        config.max_upload_bytes,
    ));

    // 4. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.host.clone(),
        port: config.port,
        max_request_body_size: RpcServerConfig::body_limit_for_upload(config.max_upload_bytes),
        upload_dir: config.upload_dir.clone(),
        upload_url_prefix: config.upload_url_prefix.clone(),
    };
    let rpc_server = RpcServer::new(
        rpc_config,
        RpcHandler::new(queue_service, settings_service, background_service),
    );
    let (addr, rpc_handle) = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Waiting for requests...");
    info!("Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    if tokio::time::timeout(SHUTDOWN_GRACE, rpc_handle.stopped())
        .await
        .is_err()
    {
        warn!(
            grace_secs = SHUTDOWN_GRACE.as_secs(),
            "Server did not stop within the grace period"
        );
    }

    info!("Shutdown complete.");

    Ok(())
}

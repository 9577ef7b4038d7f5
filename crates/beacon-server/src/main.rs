// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Beacon fleet server binary
//!
//! Wires configuration, storage, the liveness tracker, the reaper, and the
//! HTTP router together, then serves until interrupted.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use beacon_api::{create_router, ApiState};
use beacon_config::{load_config, validate_config};
use beacon_core::{LivenessTracker, Reaper};
use beacon_services::{CommandServiceImpl, DeviceServiceImpl, IngestServiceImpl, RegistrySink};
use beacon_store::{FsPayloadStore, SqliteRegistry};

/// Minimal CLI: only `--config <path>` is supported; everything else comes
/// from the config file and environment.
fn config_path_from_args() -> Result<Option<PathBuf>> {
    parse_args(std::env::args().skip(1))
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Option<PathBuf>> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .context("--config requires a path argument")?;
                return Ok(Some(PathBuf::from(path)));
            }
            other => anyhow::bail!("Unknown argument: '{}'", other),
        }
    }
    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_from_args()?;
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    validate_config(&config)?;

    beacon_observability::init_logging(&config.logging.level)?;
    info!("Beacon fleet server v{} starting", beacon_api::VERSION);

    // Durable state
    let registry = Arc::new(
        SqliteRegistry::open(&config.storage.database_path).with_context(|| {
            format!(
                "Failed to open device database at {}",
                config.storage.database_path.display()
            )
        })?,
    );
    let payloads = Arc::new(
        FsPayloadStore::new(&config.storage.data_dir).with_context(|| {
            format!(
                "Failed to prepare data directory at {}",
                config.storage.data_dir.display()
            )
        })?,
    );

    // In-process liveness state and its background sweep
    let tracker = Arc::new(LivenessTracker::new());
    let mut reaper = Reaper::new();
    reaper.set_sweep_interval(Duration::from_secs(config.liveness.sweep_interval_secs));
    reaper.set_stale_after(Duration::from_secs(config.liveness.stale_after_secs));
    reaper.start(tracker.clone(), Arc::new(RegistrySink::new(registry.clone())));

    // Service layer
    let state = ApiState::new(
        Arc::new(DeviceServiceImpl::new(
            registry.clone(),
            tracker.clone(),
            payloads.clone(),
        )),
        Arc::new(CommandServiceImpl::new(tracker.clone())),
        Arc::new(IngestServiceImpl::new(registry, payloads)),
        &config.security.api_key,
        &config.server.base_url,
    );

    let app = create_router(state);
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Listening on {}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Shutting down");
    reaper.stop();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
    }
}

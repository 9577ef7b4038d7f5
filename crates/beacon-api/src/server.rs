// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

// HTTP router assembly (Axum)
//
// Two route groups share one state: the open agent contact paths and the
// operator paths behind the X-API-Key middleware.

use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use beacon_services::{CommandService, DeviceService, IngestService};

use crate::endpoints::{command, device, ingest};
use crate::middleware::{create_cors_layer, require_api_key};

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub device_service: Arc<dyn DeviceService>,
    pub command_service: Arc<dyn CommandService>,
    pub ingest_service: Arc<dyn IngestService>,
    /// Key required on operator routes
    pub operator_key: Arc<str>,
    /// Externally reachable base URL baked into the bootstrap script
    pub base_url: Arc<str>,
}

impl ApiState {
    pub fn new(
        device_service: Arc<dyn DeviceService>,
        command_service: Arc<dyn CommandService>,
        ingest_service: Arc<dyn IngestService>,
        operator_key: &str,
        base_url: &str,
    ) -> Self {
        Self {
            device_service,
            command_service,
            ingest_service,
            operator_key: Arc::from(operator_key),
            base_url: Arc::from(base_url),
        }
    }
}

/// Create the main HTTP router
pub fn create_router(state: ApiState) -> Router {
    // Agent contact paths - open by design, devices have no credentials
    let agent_routes = Router::new()
        .route("/poll", post(device::poll))
        .route("/heartbeat", post(device::heartbeat))
        .route("/data", post(ingest::upload))
        .route("/commands/:device_id", get(command::fetch))
        .route("/health_check", get(device::health_check));

    // Operator paths behind the API key check
    let operator_routes = Router::new()
        .route("/commands", post(command::enqueue))
        .route("/devices", get(device::list_devices))
        .route(
            "/devices/:device_id",
            get(device::device_detail).delete(device::delete_device),
        )
        .route("/files/:device_id/*path", get(ingest::download))
        .route("/fleet/clear", post(device::clear_fleet))
        .route("/stats", get(device::stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .merge(agent_routes)
        .merge(operator_routes)
        .fallback(|| async {
            tracing::warn!("Unmatched request - 404 Not Found");
            (StatusCode::NOT_FOUND, "404 Not Found")
        })
        .with_state(state)
        .layer(create_cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::span!(
                        tracing::Level::DEBUG,
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::debug!(
                            "Response: status={}, latency={:?}",
                            response.status(),
                            latency
                        );
                    },
                ),
        )
}

// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Device lifecycle handlers: poll, heartbeat, fleet views

use axum::extract::{ConnectInfo, Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Json, Response};
use std::net::SocketAddr;
use std::str::FromStr;

use beacon_core::DeviceId;

use crate::common::{ApiError, ApiResult};
use crate::dtos::{
    AckResponse, DeviceDetailResponse, DeviceListResponse, HealthCheckResponse, HeartbeatRequest,
    PollRequest, StatsResponse,
};
use crate::endpoints::client_addr;
use crate::server::ApiState;

/// Agent bootstrap script handed out on every poll. `{{device_id}}` and
/// `{{server_url}}` are substituted before the response is sent.
const BOOTSTRAP_TEMPLATE: &str = include_str!("../../templates/agent_bootstrap.js");

pub(crate) fn parse_device_id(raw: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(raw)
        .map_err(|_| ApiError::invalid_input(format!("Malformed device id: '{}'", raw)))
}

/// `POST /poll` - agent contact path.
///
/// Registers (or refreshes) the device and responds with the bootstrap
/// script, parameterized with the identity the device must present from now
/// on.
pub async fn poll(
    State(state): State<ApiState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(body): Json<PollRequest>,
) -> ApiResult<Response> {
    let source_addr = client_addr(&headers, connect_info.as_ref());

    // An explicit body field wins; otherwise the User-Agent header stands in
    // as the client description.
    let descriptor = match body.client_descriptor {
        Some(descriptor) if !descriptor.is_empty() => descriptor,
        _ => headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
    };

    let outcome = state
        .device_service
        .poll(body.device_id, source_addr, descriptor)
        .await?;

    let script = BOOTSTRAP_TEMPLATE
        .replace("{{device_id}}", &outcome.device.id.to_string())
        .replace("{{server_url}}", state.base_url.as_ref());

    Ok((
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        script,
    )
        .into_response())
}

/// `POST /heartbeat` - liveness-only signal
pub async fn heartbeat(
    State(state): State<ApiState>,
    Json(body): Json<HeartbeatRequest>,
) -> ApiResult<Json<AckResponse>> {
    let id = parse_device_id(&body.device_id)?;
    state.device_service.heartbeat(id).await?;
    Ok(Json(AckResponse::ok()))
}

/// `GET /devices` - operator fleet listing, newest first
pub async fn list_devices(State(state): State<ApiState>) -> ApiResult<Json<DeviceListResponse>> {
    let devices = state.device_service.list_devices().await?;
    Ok(Json(DeviceListResponse { devices }))
}

/// `GET /devices/:device_id` - one device with its data-record index
pub async fn device_detail(
    State(state): State<ApiState>,
    Path(device_id): Path<String>,
) -> ApiResult<Json<DeviceDetailResponse>> {
    let id = parse_device_id(&device_id)?;
    let detail = state.device_service.device_detail(id).await?;
    Ok(Json(DeviceDetailResponse { detail }))
}

/// `DELETE /devices/:device_id` - remove a device and everything it uploaded
pub async fn delete_device(
    State(state): State<ApiState>,
    Path(device_id): Path<String>,
) -> ApiResult<Json<AckResponse>> {
    let id = parse_device_id(&device_id)?;
    state.device_service.delete_device(id).await?;
    Ok(Json(AckResponse::ok()))
}

/// `POST /fleet/clear` - wipe the whole fleet
pub async fn clear_fleet(State(state): State<ApiState>) -> ApiResult<Json<AckResponse>> {
    state.device_service.clear_fleet().await?;
    Ok(Json(AckResponse::ok()))
}

/// `GET /stats` - fleet-wide counters
pub async fn stats(State(state): State<ApiState>) -> ApiResult<Json<StatsResponse>> {
    let stats = state.device_service.stats().await?;
    Ok(Json(StatsResponse { stats }))
}

/// `GET /health_check` - unauthenticated readiness probe
pub async fn health_check(State(state): State<ApiState>) -> ApiResult<Json<HealthCheckResponse>> {
    let stats = state.device_service.stats().await?;
    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        tracked_devices: stats.total,
    }))
}

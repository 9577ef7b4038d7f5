// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command dispatch handlers

use axum::extract::{Path, State};
use axum::response::Json;

use crate::common::ApiResult;
use crate::dtos::{AckResponse, CommandsResponse, EnqueueRequest};
use crate::endpoints::device::parse_device_id;
use crate::server::ApiState;

/// `POST /commands` - operator queues a command for a device.
///
/// Responds 409 when the device has never polled in, since a queued command
/// for an unknown device would never be delivered.
pub async fn enqueue(
    State(state): State<ApiState>,
    Json(body): Json<EnqueueRequest>,
) -> ApiResult<Json<AckResponse>> {
    let id = parse_device_id(&body.device_id)?;
    state.command_service.enqueue(id, body.command).await?;
    Ok(Json(AckResponse::ok()))
}

/// `GET /commands/:device_id` - agent drains its queue.
///
/// Always succeeds for a well-formed id: an unknown or idle device simply
/// gets an empty list, so agents never have to special-case their first
/// fetch.
pub async fn fetch(
    State(state): State<ApiState>,
    Path(device_id): Path<String>,
) -> ApiResult<Json<CommandsResponse>> {
    let id = parse_device_id(&device_id)?;
    let commands = state.command_service.drain(id).await?;
    Ok(Json(CommandsResponse { commands }))
}

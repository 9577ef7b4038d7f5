// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Data upload handler

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};

use crate::common::ApiResult;
use crate::dtos::{IngestRequest, IngestResponse};
use crate::endpoints::device::parse_device_id;
use crate::server::ApiState;

/// `POST /data` - agent uploads a captured payload.
///
/// The declared type tag steers category routing; the content may be a
/// base64 data URI or raw text. Malformed base64 is a 400 and nothing is
/// written.
pub async fn upload(
    State(state): State<ApiState>,
    Json(body): Json<IngestRequest>,
) -> ApiResult<Json<IngestResponse>> {
    let id = parse_device_id(&body.device_id)?;
    let stored = state
        .ingest_service
        .ingest(id, body.data_type, body.content)
        .await?;
    Ok(Json(IngestResponse {
        stored_path: stored.relative_path,
        bytes_written: stored.bytes_written,
    }))
}

/// `GET /files/:device_id/*path` - operator downloads a stored payload.
///
/// `path` is the stored path minus its leading device segment. Unknown paths
/// are a 404.
pub async fn download(
    State(state): State<ApiState>,
    Path((device_id, path)): Path<(String, String)>,
) -> ApiResult<Response> {
    let id = parse_device_id(&device_id)?;
    let bytes = state.ingest_service.fetch_payload(id, path).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    )
        .into_response())
}

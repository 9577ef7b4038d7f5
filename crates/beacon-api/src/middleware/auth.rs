// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operator authentication
//!
//! Operator routes require an `X-API-Key` header matching the configured
//! key. An empty configured key locks the operator surface entirely rather
//! than opening it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::common::ApiError;
use crate::server::ApiState;

pub async fn require_api_key(
    State(state): State<ApiState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());

    let authorized =
        !state.operator_key.is_empty() && presented == Some(&*state.operator_key);

    if !authorized {
        warn!("Rejected operator request to {}", request.uri().path());
        return ApiError::unauthorized().into_response();
    }

    next.run(request).await
}

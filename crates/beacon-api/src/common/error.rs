// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    NotFound,
    InvalidInput,
    DeviceNotActive,
    Unauthorized,
    Internal,
}

/// API error type serialized as `{"detail": ..., "code": ...}`
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error detail message
    pub detail: String,

    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ApiErrorCode>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ApiErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(format!("{} '{}' not found", resource.into(), id.into()))
            .with_code(ApiErrorCode::NotFound)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::InvalidInput)
    }

    pub fn unauthorized() -> Self {
        Self::new("Invalid or missing API key").with_code(ApiErrorCode::Unauthorized)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::Internal)
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self.code {
            Some(ApiErrorCode::NotFound) => StatusCode::NOT_FOUND,
            Some(ApiErrorCode::InvalidInput) => StatusCode::BAD_REQUEST,
            Some(ApiErrorCode::DeviceNotActive) => StatusCode::CONFLICT,
            Some(ApiErrorCode::Unauthorized) => StatusCode::UNAUTHORIZED,
            Some(ApiErrorCode::Internal) | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Convert service layer errors to API errors
impl From<beacon_services::ServiceError> for ApiError {
    fn from(err: beacon_services::ServiceError) -> Self {
        use beacon_services::ServiceError;

        match err {
            ServiceError::NotFound { resource, id } => ApiError::not_found(resource, id),
            ServiceError::InvalidIdentity(msg) => ApiError::invalid_input(msg),
            ServiceError::DecodeFailed(msg) => ApiError::invalid_input(msg),
            ServiceError::DeviceNotActive(id) => {
                ApiError::new(format!("Device not active: {}", id))
                    .with_code(ApiErrorCode::DeviceNotActive)
            }
            ServiceError::Storage(msg) => ApiError::internal(msg),
            ServiceError::Internal(msg) => ApiError::internal(msg),
        }
    }
}

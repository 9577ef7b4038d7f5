// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer error types.

Transport-agnostic errors that adapters map to HTTP status codes. Boundary
validation failures surface here before any storage is touched.
*/

use thiserror::Error;

use beacon_core::CoreError;
use beacon_store::StoreError;

/// Service layer errors (transport-agnostic)
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed device identity, rejected at the boundary (400 in HTTP)
    #[error("Invalid device identity: '{0}'")]
    InvalidIdentity(String),

    /// Command enqueue targeting a device with no live entry (409 in HTTP)
    #[error("Device not active: {0}")]
    DeviceNotActive(String),

    /// Payload claims an encoding it does not honor (400 in HTTP)
    #[error("Payload decode failed: {0}")]
    DecodeFailed(String),

    /// Identity absent from the registry (404 in HTTP)
    #[error("Not found: {resource} with id '{id}'")]
    NotFound { resource: String, id: String },

    /// Durable storage collaborator failed (500 in HTTP)
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Internal service error (500 in HTTP)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidIdentity(id) => ServiceError::InvalidIdentity(id),
            CoreError::DeviceNotActive(id) => ServiceError::DeviceNotActive(id),
            CoreError::DecodeFailed(msg) => ServiceError::DecodeFailed(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound {
                resource: "device".to_string(),
                id,
            },
            other => ServiceError::Storage(other.to_string()),
        }
    }
}

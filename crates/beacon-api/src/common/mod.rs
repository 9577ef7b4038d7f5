// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared API plumbing: error shapes and result alias

pub mod error;

pub use error::{ApiError, ApiErrorCode};

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! # beacon-api
//!
//! HTTP adapter for the Beacon fleet server, built on Axum. Routes come in
//! two groups: the agent-facing contact paths (poll, heartbeat, data upload,
//! command fetch) which are open, and the operator paths (fleet views,
//! command dispatch, deletion) which sit behind an `X-API-Key` check.
//!
//! Handlers stay thin: parse, call the service trait, map the error. All
//! fleet semantics live in `beacon-services`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod dtos;
pub mod endpoints;
pub mod middleware;
pub mod server;

pub use common::{ApiError, ApiErrorCode, ApiResult};
pub use server::{create_router, ApiState};

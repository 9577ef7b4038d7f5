// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Router middleware: operator authentication and CORS

pub mod auth;
pub mod cors;

pub use auth::require_api_key;
pub use cors::create_cors_layer;

// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! CORS configuration

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer. Agents post from arbitrary origins and the
/// operator surface is protected by its key, not by origin checks.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

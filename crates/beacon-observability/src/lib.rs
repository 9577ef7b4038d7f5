// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! # beacon-observability
//!
//! Logging initialization for the Beacon fleet server. Keeps the tracing
//! subscriber setup in one place so every binary logs the same way.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod init;

pub use init::init_logging;

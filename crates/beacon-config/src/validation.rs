// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that configuration values are consistent and within valid ranges
//! before the server starts.

use crate::{BeaconConfig, ConfigError, ConfigResult};

/// Validate the complete configuration
///
/// Checks for:
/// - A non-zero listen port
/// - A non-empty data directory and database path
/// - Liveness timings that can actually demote a device (the staleness
///   threshold must be at least one sweep interval)
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &BeaconConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push("server.port must be non-zero".to_string());
    }
    if config.server.base_url.is_empty() {
        errors.push("server.base_url must not be empty".to_string());
    }

    if config.storage.data_dir.as_os_str().is_empty() {
        errors.push("storage.data_dir must not be empty".to_string());
    }
    if config.storage.database_path.as_os_str().is_empty() {
        errors.push("storage.database_path must not be empty".to_string());
    }

    if config.liveness.sweep_interval_secs == 0 {
        errors.push("liveness.sweep_interval_secs must be non-zero".to_string());
    }
    if config.liveness.stale_after_secs < config.liveness.sweep_interval_secs {
        errors.push(format!(
            "liveness.stale_after_secs ({}) must be >= liveness.sweep_interval_secs ({})",
            config.liveness.stale_after_secs, config.liveness.sweep_interval_secs
        ));
    }

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

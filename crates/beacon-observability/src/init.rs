// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize console logging
///
/// `RUST_LOG` takes precedence when set; otherwise `default_level` (for
/// example `"info"` or `"beacon_api=debug,info"`) supplies the filter.
///
/// # Errors
///
/// Fails if the filter directive cannot be parsed or a global subscriber is
/// already installed.
pub fn init_logging(default_level: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log filter: '{}'", default_level))?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_rejected() {
        // try_from_default_env only succeeds when RUST_LOG is set, so an
        // unparseable default must surface as an error here.
        std::env::remove_var("RUST_LOG");
        let result = init_logging("this is ((( not a filter");
        assert!(result.is_err());
    }
}

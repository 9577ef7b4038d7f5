// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Loading is two-tier: the TOML file supplies the base values and
//! environment variables override them at runtime. Every field has a
//! default, so a missing config file is not fatal.

use crate::{BeaconConfig, ConfigError, ConfigResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the Beacon configuration file
///
/// Search order:
/// 1. `BEACON_CONFIG_PATH` environment variable
/// 2. Current working directory: `./beacon_configuration.toml`
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if `BEACON_CONFIG_PATH` points at a
/// file that does not exist, or if no config file is found anywhere.
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("BEACON_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by BEACON_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    if let Ok(cwd) = env::current_dir() {
        let candidate = cwd.join("beacon_configuration.toml");
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(ConfigError::FileNotFound(
        "beacon_configuration.toml not found in the current directory. \
         Set BEACON_CONFIG_PATH to specify a custom location."
            .to_string(),
    ))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, searches the
///   standard locations and falls back to defaults when nothing is found.
///
/// # Errors
///
/// Returns an error if an explicitly named file cannot be read or contains
/// invalid TOML.
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<BeaconConfig> {
    let mut config = match config_path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => match find_config_file() {
            Ok(found) => {
                let content = fs::read_to_string(&found)?;
                toml::from_str(&content)?
            }
            Err(ConfigError::FileNotFound(_)) => BeaconConfig::default(),
            Err(e) => return Err(e),
        },
    };

    apply_environment_overrides(&mut config);

    // An unset base_url means the server is reached at its own bind address.
    if config.server.base_url.is_empty() {
        config.server.base_url = format!("http://{}:{}", config.server.host, config.server.port);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `BEACON_HOST` -> `server.host`
/// - `BEACON_PORT` -> `server.port`
/// - `BEACON_BASE_URL` -> `server.base_url`
/// - `BEACON_API_KEY` -> `security.api_key`
/// - `BEACON_DATA_DIR` -> `storage.data_dir`
/// - `BEACON_DATABASE_PATH` -> `storage.database_path`
/// - `BEACON_SWEEP_INTERVAL_SECS` -> `liveness.sweep_interval_secs`
/// - `BEACON_STALE_AFTER_SECS` -> `liveness.stale_after_secs`
/// - `BEACON_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut BeaconConfig) {
    if let Ok(value) = env::var("BEACON_HOST") {
        config.server.host = value;
    }
    if let Ok(value) = env::var("BEACON_PORT") {
        if let Ok(port) = value.parse::<u16>() {
            config.server.port = port;
        }
    }
    if let Ok(value) = env::var("BEACON_BASE_URL") {
        config.server.base_url = value;
    }

    if let Ok(value) = env::var("BEACON_API_KEY") {
        config.security.api_key = value;
    }

    if let Ok(value) = env::var("BEACON_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("BEACON_DATABASE_PATH") {
        config.storage.database_path = PathBuf::from(value);
    }

    if let Ok(value) = env::var("BEACON_SWEEP_INTERVAL_SECS") {
        if let Ok(secs) = value.parse::<u64>() {
            config.liveness.sweep_interval_secs = secs;
        }
    }
    if let Ok(value) = env::var("BEACON_STALE_AFTER_SECS") {
        if let Ok(secs) = value.parse::<u64>() {
            config.liveness.stale_after_secs = secs;
        }
    }

    if let Ok(value) = env::var("BEACON_LOG_LEVEL") {
        config.logging.level = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("BEACON_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("BEACON_CONFIG_PATH");

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved_port = env::var("BEACON_PORT").ok();
        env::remove_var("BEACON_PORT");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("beacon_configuration.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 9000").unwrap();
        writeln!(file, "[liveness]").unwrap();
        writeln!(file, "stale_after_secs = 120").unwrap();

        let config = load_config(Some(&config_path)).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.liveness.stale_after_secs, 120);
        // Untouched sections keep their defaults
        assert_eq!(config.liveness.sweep_interval_secs, 30);

        if let Some(value) = saved_port {
            env::set_var("BEACON_PORT", value);
        }
    }

    #[test]
    fn test_base_url_derived_from_bind_address() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::remove_var("BEACON_BASE_URL");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("beacon_configuration.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "host = \"192.0.2.10\"").unwrap();
        writeln!(file, "port = 9000").unwrap();

        let config = load_config(Some(&config_path)).unwrap();
        assert_eq!(config.server.base_url, "http://192.0.2.10:9000");
    }

    #[test]
    fn test_explicit_base_url_is_kept() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("beacon_configuration.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "base_url = \"https://fleet.example.com\"").unwrap();

        let config = load_config(Some(&config_path)).unwrap();
        assert_eq!(config.server.base_url, "https://fleet.example.com");
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = BeaconConfig::default();

        env::set_var("BEACON_PORT", "9999");
        env::set_var("BEACON_API_KEY", "sekrit");

        apply_environment_overrides(&mut config);

        env::remove_var("BEACON_PORT");
        env::remove_var("BEACON_API_KEY");

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.security.api_key, "sekrit");
    }

    #[test]
    fn test_malformed_env_port_is_ignored() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = BeaconConfig::default();

        env::set_var("BEACON_PORT", "not-a-port");
        apply_environment_overrides(&mut config);
        env::remove_var("BEACON_PORT");

        assert_eq!(config.server.port, 8080);
    }
}

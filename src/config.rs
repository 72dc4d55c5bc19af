//! Configuration loader for the `sensorflow-fault-gbt` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Logging variables (`AXUM_LOG_LEVEL`,
//! `AXUM_SPAN_EVENTS`, `FORCE_COLOR`, `LOG_DIR`) are read by `init_tracing`
//! in `main.rs` because the subscriber must exist before this config is logged.
use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use anyhow::{anyhow, Result};

/// Parse an optional environment variable into `$ty`, falling back to a default.
macro_rules! parse_env {
    ($lookup:expr, $var_name:expr, $ty:ty, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Default model artifact, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "fault_gbt_model.json";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Path of the serialized classifier.
    pub model_path: PathBuf,

    /// Interface to bind the HTTP listener on.
    pub bind_host: IpAddr,

    /// TCP port for the HTTP listener.
    pub port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `MODEL_PATH` – classifier file (default: `fault_gbt_model.json`)
/// - `BIND_HOST` – listen address (default: `0.0.0.0`)
/// - `PORT` – listen port (default: 5000)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    load_with(|name| env::var(name).ok())
}

/// Same as [`load_from_env`] with an explicit variable source.
pub fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let model_path = lookup("MODEL_PATH")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
    let bind_host = parse_env!(lookup, "BIND_HOST", IpAddr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let port = parse_env!(lookup, "PORT", u16, 5000);

    Ok(Config {
        model_path,
        bind_host,
        port,
    })
}

impl Config {
    // ---
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  MODEL_PATH : {}", self.model_path.display());
        tracing::info!("  BIND_HOST  : {}", self.bind_host);
        tracing::info!("  PORT       : {}", self.port);
    }
}

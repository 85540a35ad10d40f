//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `PALSYNC_BASE_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PALSYNC_BASE_URL`: JSON server base URL (required)
//! - `PALSYNC_CONNECT_TIMEOUT_SECS`: Connect timeout in seconds
//! - `PALSYNC_READ_TIMEOUT_SECS`: Read timeout in seconds
//! - `PALSYNC_USER_AGENT`: User-Agent header value
//! - `PALSYNC_ATTACH_SESSION_ID`: Send `sessid` with sync fetches
//!   (true/false)
//! - `PALSYNC_LOG_LEVEL`: Tracing filter directive
//! - `PALSYNC_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./palsync.json` or `./palsync.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use palsync_domain::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS};
use palsync_domain::{
    Config, EndpointConfig, LoggingConfig, PalSyncError, Result, ServiceConfig,
};
use url::Url;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL
/// variable is missing or invalid, falls back to loading from a config file.
///
/// # Errors
/// Returns `PalSyncError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The base URL is not an absolute http(s) URL
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PalSyncError::Config` if `PALSYNC_BASE_URL` is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("PALSYNC_BASE_URL")?;
    let connect_timeout_seconds =
        env_u64("PALSYNC_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;
    let read_timeout_seconds = env_u64("PALSYNC_READ_TIMEOUT_SECS", DEFAULT_READ_TIMEOUT_SECS)?;
    let user_agent = std::env::var("PALSYNC_USER_AGENT").ok();
    let attach_session_id = env_bool("PALSYNC_ATTACH_SESSION_ID", false);

    let defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: std::env::var("PALSYNC_LOG_LEVEL").unwrap_or(defaults.level),
        json: env_bool("PALSYNC_LOG_JSON", defaults.json),
    };

    let config = Config {
        service: ServiceConfig {
            base_url,
            connect_timeout_seconds,
            read_timeout_seconds,
            user_agent,
            attach_session_id,
        },
        endpoints: EndpointConfig::default(),
        logging,
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PalSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PalSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PalSyncError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PalSyncError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Check values serde cannot check.
///
/// # Errors
/// Returns `PalSyncError::Config` when the base URL is not an absolute
/// http(s) URL or a timeout is zero.
pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.service.base_url).map_err(|e| {
        PalSyncError::Config(format!("Invalid base URL '{}': {}", config.service.base_url, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PalSyncError::Config(format!(
            "Unsupported base URL scheme: {}",
            url.scheme()
        )));
    }

    if config.service.connect_timeout_seconds == 0 || config.service.read_timeout_seconds == 0 {
        return Err(PalSyncError::Config("Timeouts must be greater than zero".to_string()));
    }

    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PalSyncError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PalSyncError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PalSyncError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let names = ["config.json", "config.toml", "palsync.json", "palsync.toml"];
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(names.iter().map(|name| cwd.join(name)));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(names.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PalSyncError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional numeric environment variable
fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| PalSyncError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

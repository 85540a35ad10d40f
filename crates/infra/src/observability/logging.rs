//! Global tracing subscriber setup

use palsync_domain::{LoggingConfig, PalSyncError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::level`] when set.
/// Output is plain text unless `config.json` is set.
///
/// # Errors
/// - `PalSyncError::Config` if the level is not a valid filter directive
/// - `PalSyncError::Internal` if a global subscriber is already installed
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let installed = if config.json {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).json().try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init()
    };

    installed.map_err(|e| PalSyncError::Internal(format!("Failed to install subscriber: {}", e)))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            PalSyncError::Config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

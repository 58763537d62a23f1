//! Server configuration.
//!
//! The configuration is a YAML file; every key is optional:
//!
//! ```yaml
//! port: 10024
//! log_level: info
//! map_path: data/maps/testmap.yaml
//! store_path: data/default_store.yaml
//! player_credit: 1000
//! connection_retries: 5
//! connection_timeout_ms: 500
//! idle_timeout_secs: 600
//! countdown_seconds: 120
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tocs_foundation::{Error, ErrorContext, Result};
use tracing::{info, warn};

/// Configuration file read when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "tocs.yaml";

/// Settings of one server instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// TCP port to listen on; 0 picks a free port.
    pub port: u16,
    /// Log filter, e.g. `info` or `tocs_engine=debug`.
    pub log_level: String,
    /// Map file loaded at startup.
    pub map_path: PathBuf,
    /// Equipment store file.
    pub store_path: PathBuf,
    /// Credit every new player starts with.
    pub player_credit: u32,
    /// Attempts made to deliver one message.
    pub connection_retries: u32,
    /// Pause between delivery attempts and write timeout, in milliseconds.
    pub connection_timeout_ms: u64,
    /// Seconds a player may stay silent before being disconnected; 0 never.
    pub idle_timeout_secs: u64,
    /// Length of the lobby countdown, in seconds.
    pub countdown_seconds: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 10024,
            log_level: "info".to_string(),
            map_path: PathBuf::from("data/maps/testmap.yaml"),
            store_path: PathBuf::from("data/default_store.yaml"),
            player_credit: 1000,
            connection_retries: 5,
            connection_timeout_ms: 500,
            idle_timeout_secs: 600,
            countdown_seconds: 120,
        }
    }
}

impl ServerConfig {
    /// Reads a configuration file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read and `Config` if it
    /// is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "configuration file not found; using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = Self::from_yaml(&text).map_err(|err| {
            err.with_context(ErrorContext::new().with_source(path.display().to_string()))
        })?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text is malformed or names unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|err| Error::config(err.to_string()))
    }

    /// Returns the pause between delivery attempts.
    #[must_use]
    pub const fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    /// Returns how long a read may wait, or `None` to wait forever.
    #[must_use]
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }
}

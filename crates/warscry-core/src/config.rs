//! Configuration loading and typed config structures for the Warscry API.
//!
//! Configuration lives in an optional `warscry-config.yaml`. Every field has
//! a default, so an empty or missing file yields a working service pointed
//! at the public dataset. A handful of environment variables override the
//! file for container deployments.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid {var}: {message}")]
    Env {
        /// The environment variable name.
        var: &'static str,
        /// Description of the problem.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WarscryConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Remote dataset locations.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Background refresh settings.
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Values reported on the index page.
    #[serde(default)]
    pub api: ApiConfig,
}

impl WarscryConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// Recognised overrides:
    /// - `WARSCRY_HOST` overrides `server.host`
    /// - `WARSCRY_PORT` overrides `server.port`
    /// - `WARSCRY_FIGHTERS_URL` overrides `sources.fighters_url`
    /// - `WARSCRY_ABILITIES_URL` overrides `sources.abilities_url`
    /// - `WARSCRY_POLL_INTERVAL_SECS` overrides `refresh.poll_interval_secs`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Env`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Env`] if an override cannot be parsed.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if an override cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse("")
    }

    /// Apply overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if a numeric override does not parse.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("WARSCRY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WARSCRY_PORT") {
            self.server.port = port.parse().map_err(|e| ConfigError::Env {
                var: "WARSCRY_PORT",
                message: format!("{port:?}: {e}"),
            })?;
        }
        if let Some(url) = lookup("WARSCRY_FIGHTERS_URL") {
            self.sources.fighters_url = url;
        }
        if let Some(url) = lookup("WARSCRY_ABILITIES_URL") {
            self.sources.abilities_url = url;
        }
        if let Some(secs) = lookup("WARSCRY_POLL_INTERVAL_SECS") {
            self.refresh.poll_interval_secs = secs.parse().map_err(|e| ConfigError::Env {
                var: "WARSCRY_POLL_INTERVAL_SECS",
                message: format!("{secs:?}: {e}"),
            })?;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Remote dataset locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourcesConfig {
    /// URL of the fighters JSON file.
    #[serde(default = "default_fighters_url")]
    pub fighters_url: String,

    /// URL of the abilities and battle traits JSON file.
    #[serde(default = "default_abilities_url")]
    pub abilities_url: String,

    /// Timeout applied to every remote request, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl SourcesConfig {
    /// Request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            fighters_url: default_fighters_url(),
            abilities_url: default_abilities_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Background refresh settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshConfig {
    /// Whether the refresh scheduler runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between change checks.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl RefreshConfig {
    /// Poll interval as a [`Duration`].
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Values reported on the index page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Version string shown to clients.
    #[serde(default = "default_version")]
    pub version: String,

    /// Link to the API documentation.
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            docs_url: default_docs_url(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    4424
}

fn default_fighters_url() -> String {
    "https://krisling049.github.io/warcry_data/fighters.json".to_owned()
}

fn default_abilities_url() -> String {
    "https://krisling049.github.io/warcry_data/abilities_battletraits.json".to_owned()
}

const fn default_request_timeout_ms() -> u64 {
    30_000
}

const fn default_poll_interval_secs() -> u64 {
    1800
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}

fn default_docs_url() -> String {
    "https://github.com/krisling049/warcry_go".to_owned()
}

const fn default_true() -> bool {
    true
}

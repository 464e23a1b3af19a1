//! Configuration module for Postboard.

use serde::Deserialize;
use std::path::Path;

use crate::post::DeletePolicy;
use crate::{PostboardError, Result};

/// Environment variable overriding `server.host`.
pub const ENV_HOST: &str = "POSTBOARD_HOST";

/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "POSTBOARD_PORT";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timezone for displaying dates (e.g., "Asia/Tokyo", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// CORS allowed origins for the JSON API.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timezone: default_timezone(),
            cors_origins: vec![],
        }
    }
}

/// Board configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Name shown in the navigation bar and page title.
    #[serde(default = "default_board_name")]
    pub name: String,
    /// Description used for the page meta tag.
    #[serde(default = "default_board_description")]
    pub description: String,
    /// Load the sample conversation at start-up.
    #[serde(default = "default_seed_sample_posts")]
    pub seed_sample_posts: bool,
    /// What happens to replies when their parent is deleted.
    #[serde(default)]
    pub delete_policy: DeletePolicy,
    /// Artificial delay before read operations, in milliseconds.
    #[serde(default)]
    pub read_latency_ms: u64,
    /// Artificial delay before write operations, in milliseconds.
    #[serde(default)]
    pub write_latency_ms: u64,
}

fn default_board_name() -> String {
    "My Posts".to_string()
}

fn default_board_description() -> String {
    "Posts with reply functionality".to_string()
}

fn default_seed_sample_posts() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: default_board_name(),
            description: default_board_description(),
            seed_sample_posts: default_seed_sample_posts(),
            delete_policy: DeletePolicy::default(),
            read_latency_ms: 0,
            write_latency_ms: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Board configuration.
    #[serde(default)]
    pub board: BoardConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PostboardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration like [`Config::load_with_env`], using the defaults
    /// when the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load_file_or_default(path.as_ref())?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_file_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(PostboardError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PostboardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `POSTBOARD_HOST`: Override the bind address
    /// - `POSTBOARD_PORT`: Override the listen port
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var(ENV_HOST) {
            if !host.is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(port) = std::env::var(ENV_PORT) {
            if !port.is_empty() {
                self.server.port = port.parse().map_err(|_| {
                    PostboardError::Config(format!("{ENV_PORT} is not a valid port: {port}"))
                })?;
            }
        }

        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the timezone is unknown or the board name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.server.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(PostboardError::Config(format!(
                "unknown timezone: {}",
                self.server.timezone
            )));
        }
        if self.board.name.trim().is_empty() {
            return Err(PostboardError::Config(
                "board.name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

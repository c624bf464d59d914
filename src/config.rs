//! Configuration loading.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or `config.toml` in the platform config dir)
//! 3. Command-line flags (`--api-url` also reads `RESIDENTS_API_URL`)

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Route the "Back to Dashboard" control points to.
pub const DEFAULT_DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin serving `/api/residents`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub dashboard_route: String,
    /// Colored terminal output.
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dashboard_route: DEFAULT_DASHBOARD_ROUTE.to_string(),
            color: true,
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file. Unlike the default location, it must exist.
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub no_color: bool,
}

/// `config.toml` inside the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "residents-admin").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AppConfig {
    /// Resolve the configuration from every source and validate it.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match &overrides.config_path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) => Self::from_optional_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply(overrides);
        config.validate()?;

        tracing::debug!(
            event = "config.loaded",
            base_url = %config.api.base_url,
            timeout_secs = config.api.timeout_secs,
        );

        Ok(config)
    }

    /// Parse a config file that must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config file, falling back to defaults when it does not exist.
    pub fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(event = "config.file_missing", path = %path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Layer command-line values on top.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            self.api.timeout_secs = secs;
        }
        if overrides.no_color {
            self.ui.color = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::Invalid {
            message: format!("api.base_url '{}': {}", self.api.base_url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                message: format!(
                    "api.base_url must use http or https, got '{}'",
                    url.scheme()
                ),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "api.timeout_secs must be greater than zero".to_string(),
            });
        }
        if !self.ui.dashboard_route.starts_with('/') {
            return Err(ConfigError::Invalid {
                message: format!(
                    "ui.dashboard_route must start with '/', got '{}'",
                    self.ui.dashboard_route
                ),
            });
        }
        Ok(())
    }
}

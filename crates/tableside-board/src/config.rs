/*
[INPUT]:  YAML configuration file plus TABLESIDE__* environment overrides
[OUTPUT]: Parsed and validated board configuration
[POS]:    Configuration layer - API, auth, board, and logging setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tableside_adapter::ClientConfig;
use thiserror::Error;
use url::Url;

const ENV_PREFIX: &str = "TABLESIDE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("failed to render configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for the order board
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub board: BoardSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Order-management API endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Session source: either a pre-issued token or staff credentials
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Board refresh and drag behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardSettings {
    /// Seconds between snapshot fetches
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Pointer travel (terminal cells) before a press becomes a drag
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            activation_distance: default_activation_distance(),
        }
    }
}

/// Optional rolling log file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_activation_distance() -> f32 {
    2.0
}

fn default_file_prefix() -> String {
    "tableside.log".to_string()
}

impl BoardConfig {
    /// Default location: `<config dir>/tableside/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tableside").join("config.yaml"))
    }

    /// Load a YAML file, apply environment overrides, and validate.
    ///
    /// `TABLESIDE__API__BASE_URL=...` overrides `api.base_url`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let loaded: Self = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse YAML without environment overrides.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let loaded: Self = serde_yaml::from_str(raw)?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write a starter file; refuses to overwrite unless `force`.
    pub fn write_template(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::Invalid(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let template = BoardConfig {
            auth: AuthConfig {
                email: Some("manager@example.com".to_string()),
                password: Some("change-me".to_string()),
                token: None,
            },
            ..BoardConfig::default()
        };
        std::fs::write(path, template.to_yaml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url_parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.board.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "board.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if !self.board.activation_distance.is_finite() || self.board.activation_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "board.activation_distance must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.board.poll_interval_secs)
    }
}

fn url_parse(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw)
        .map_err(|err| ConfigError::Invalid(format!("api.base_url is not a valid url: {err}")))
}

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use lv_records::PartisanshipThresholds;
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

use crate::congress::Chamber;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with LV_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub congress_api: CongressApiConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CongressApiConfig {
    /// Base URL of the Congress.gov v3 API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent in the `X-API-Key` header (required — no compiled-in default).
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bills requested per list page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Congress used when a request does not name one.
    #[serde(default = "default_congress")]
    pub congress: u32,

    /// Chamber used when a request does not name one.
    #[serde(default)]
    pub chamber: Chamber,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            congress: default_congress(),
            chamber: Chamber::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Yea-percentage gap above which a vote is partisan.
    #[serde(default = "default_partisan_threshold")]
    pub partisan_threshold: f64,

    /// Yea-percentage gap above which a vote is moderately partisan.
    #[serde(default = "default_moderate_threshold")]
    pub moderate_threshold: f64,
}

impl ClassifierConfig {
    #[must_use]
    pub const fn thresholds(&self) -> PartisanshipThresholds {
        PartisanshipThresholds {
            partisan: self.partisan_threshold,
            moderate: self.moderate_threshold,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            partisan_threshold: default_partisan_threshold(),
            moderate_threshold: default_moderate_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests.
    /// Use `"*"` to allow any origin.
    /// Accepts either an array or comma-separated string.
    /// Example: `["http://localhost:5173"]` or `"http://localhost:5173,https://app.example.com"`
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
}

/// Deserialize origins from comma-separated string or array, filtering empty values.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins.into_iter().filter(|s| !s.is_empty()).collect())
}

fn default_base_url() -> String {
    "https://api.congress.gov/v3".to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_page_size() -> u32 {
    50
}

#[allow(clippy::missing_const_for_fn)]
fn default_congress() -> u32 {
    117
}

#[allow(clippy::missing_const_for_fn)]
fn default_partisan_threshold() -> f64 {
    PartisanshipThresholds::DEFAULT.partisan
}

#[allow(clippy::missing_const_for_fn)]
fn default_moderate_threshold() -> f64 {
    PartisanshipThresholds::DEFAULT.moderate
}

#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_allowed_origins() -> Vec<String> {
    vec![]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            congress_api: CongressApiConfig {
                base_url: default_base_url(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
                page_size: default_page_size(),
            },
            defaults: DefaultsConfig::default(),
            classifier: ClassifierConfig::default(),
            server: ServerConfig {
                port: default_port(),
                host: default_host(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            cors: CorsConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with LV_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("LV_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.congress_api.api_key.is_empty() {
            return Err(ConfigError::Validation(
                "congress_api.api_key is required. Set LV_CONGRESS_API__API_KEY environment variable or configure in config.yaml.".into(),
            ));
        }

        let base_url = &self.congress_api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "congress_api.base_url '{base_url}' must start with http:// or https://"
            )));
        }

        if self.congress_api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "congress_api.timeout_secs cannot be 0".into(),
            ));
        }

        if self.congress_api.page_size == 0 {
            return Err(ConfigError::Validation(
                "congress_api.page_size cannot be 0".into(),
            ));
        }

        if self.defaults.congress == 0 {
            return Err(ConfigError::Validation(
                "defaults.congress cannot be 0".into(),
            ));
        }

        let ClassifierConfig {
            partisan_threshold,
            moderate_threshold,
        } = self.classifier;
        if !(0.0..=100.0).contains(&moderate_threshold)
            || !(0.0..=100.0).contains(&partisan_threshold)
            || moderate_threshold > partisan_threshold
        {
            return Err(ConfigError::Validation(format!(
                "classifier thresholds must satisfy 0 <= moderate_threshold <= partisan_threshold <= 100, got moderate={moderate_threshold}, partisan={partisan_threshold}"
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        // CORS origins must be valid URLs or "*"
        for origin in &self.cors.allowed_origins {
            if origin != "*" && !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        Ok(())
    }
}

//! Application configuration
//!
//! Loaded from defaults, an optional `enviroscope.toml` (or an explicit
//! path), then `ENVIROSCOPE_*` environment variables. Nested keys use `__`,
//! e.g. `ENVIROSCOPE_OPENWEATHERMAP__API_KEY`.

use std::fmt;
use std::path::Path;

use domain::classification::ClassificationConfig;
use integration_weather::WeatherConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ENVIROSCOPE";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "enviroscope";

/// Unit systems the domain model can represent
const SUPPORTED_UNITS: &[&str] = &["metric"];

const MAX_TIMEOUT_SECS: u64 = 120;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The effective configuration could not be rendered
    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenWeatherMap access
    #[serde(default)]
    pub openweathermap: OpenWeatherMapConfig,

    /// Threshold tables and forecast split cutoff
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// OpenWeatherMap access configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenWeatherMapConfig {
    /// API key (sensitive - never serialized or logged)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Unit system (default: metric)
    #[serde(default = "default_units")]
    pub units: String,
}

impl fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("units", &self.units)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_units() -> String {
    "metric".to_string()
}

impl Default for OpenWeatherMapConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            units: default_units(),
        }
    }
}

impl OpenWeatherMapConfig {
    /// Convert to `integration_weather`'s `WeatherConfig`
    #[must_use]
    pub fn to_weather_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            units: self.units.clone(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "enviroscope=debug,reqwest=warn"
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load from `enviroscope.toml` (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load from `path` (required to exist) or the default file, then the
    /// environment
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(path, None)
    }

    /// Shared loader; `env` replaces the process environment when given
    fn build(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        // values stay strings until deserialized so numeric-looking keys survive
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(env);

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let owm = &self.openweathermap;
        if !(owm.base_url.starts_with("http://") || owm.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "openweathermap.base_url must start with http:// or https://, got {}",
                owm.base_url
            )));
        }
        if owm.timeout_secs == 0 || owm.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "openweathermap.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                owm.timeout_secs
            )));
        }
        if !SUPPORTED_UNITS.contains(&owm.units.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "openweathermap.units must be one of {SUPPORTED_UNITS:?}, got {}",
                owm.units
            )));
        }
        if !self.classification.series_split_cutoff.is_finite() {
            return Err(ConfigError::Invalid(
                "classification.series_split_cutoff must be finite".to_string(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML, without the API key
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

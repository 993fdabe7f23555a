//! OpenWeatherMap client
//!
//! HTTP client for the current weather, forecast, direct geocoding, UV index
//! and air pollution endpoints of the OpenWeatherMap API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    AirPollutionResponse, CurrentWeatherResponse, ForecastResponse, GeocodeEntry, UvIndexResponse,
};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The service does not know the requested resource
    #[error("Not found")]
    NotFound,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Geocoding returned no match
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// No API key configured
    #[error("OpenWeatherMap API key is not configured")]
    MissingApiKey,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system sent with weather and forecast requests (default: metric)
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_units() -> String {
    "metric".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            units: default_units(),
        }
    }
}

/// Weather client trait for fetching raw OpenWeatherMap payloads
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current weather for a city name
    async fn current_weather(&self, city: &str) -> Result<CurrentWeatherResponse, WeatherError>;

    /// Forecast steps for a city name
    async fn forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError>;

    /// Best geocoding match for a city name
    async fn geocode(&self, city: &str) -> Result<GeocodeEntry, WeatherError>;

    /// UV index at a coordinate
    async fn uv_index(&self, latitude: f64, longitude: f64)
    -> Result<UvIndexResponse, WeatherError>;

    /// Air pollution at a coordinate
    ///
    /// A payload without any reading is a parse error.
    async fn air_pollution(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirPollutionResponse, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("config", &self.config)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    "[REDACTED]"
                } else {
                    "<unset>"
                },
            )
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client
    ///
    /// A missing key is accepted here; every request then fails with
    /// `MissingApiKey`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig, api_key: Option<SecretString>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// GET `path` with `params` plus the API key and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key.as_ref().ok_or(WeatherError::MissingApiKey)?;
        let url = self.url(path);
        debug!(url = %url, "Requesting OpenWeatherMap");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    WeatherError::ConnectionFailed(e.to_string())
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    fn city_params(&self, city: &str) -> [(&'static str, String); 2] {
        [("q", city.to_string()), ("units", self.config.units.clone())]
    }

    fn coordinate_params(latitude: f64, longitude: f64) -> [(&'static str, String); 2] {
        [("lat", latitude.to_string()), ("lon", longitude.to_string())]
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<CurrentWeatherResponse, WeatherError> {
        self.get_json("/data/2.5/weather", &self.city_params(city))
            .await
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError> {
        let forecast: ForecastResponse = self
            .get_json("/data/2.5/forecast", &self.city_params(city))
            .await?;
        debug!(steps = forecast.list.len(), "Fetched forecast");
        Ok(forecast)
    }

    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<GeocodeEntry, WeatherError> {
        let matches: Vec<GeocodeEntry> = self
            .get_json(
                "/geo/1.0/direct",
                &[("q", city.to_string()), ("limit", "1".to_string())],
            )
            .await?;

        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;
        debug!(name = %first.name, lat = first.lat, lon = first.lon, "Geocoded city");
        Ok(first)
    }

    #[instrument(skip(self))]
    async fn uv_index(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<UvIndexResponse, WeatherError> {
        self.get_json(
            "/data/2.5/uvi",
            &Self::coordinate_params(latitude, longitude),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn air_pollution(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirPollutionResponse, WeatherError> {
        let response: AirPollutionResponse = self
            .get_json(
                "/data/2.5/air_pollution",
                &Self::coordinate_params(latitude, longitude),
            )
            .await?;

        if response.list.is_empty() {
            return Err(WeatherError::ParseError(
                "Air pollution response contains no readings".to_string(),
            ));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.units, "metric");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = WeatherConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..WeatherConfig::default()
        };
        let client = OpenWeatherMapClient::new(config, None).unwrap();
        assert_eq!(
            client.url("/data/2.5/uvi"),
            "http://localhost:1234/data/2.5/uvi"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = OpenWeatherMapClient::new(
            WeatherConfig::default(),
            Some(SecretString::from("super-secret")),
        )
        .unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let config = WeatherConfig {
            // nothing listens here; a request would be a connection error
            base_url: "http://127.0.0.1:9".to_string(),
            ..WeatherConfig::default()
        };
        let client = OpenWeatherMapClient::new(config, None).unwrap();

        let err = client.current_weather("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn test_weather_error_display() {
        assert_eq!(WeatherError::HttpStatus(503).to_string(), "HTTP status 503");
        assert!(
            WeatherError::CityNotFound("Atlantis".to_string())
                .to_string()
                .contains("Atlantis")
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = WeatherConfig {
            base_url: "https://custom.api.com".to_string(),
            timeout_secs: 60,
            units: "metric".to_string(),
        };

        let json = serde_json::to_string(&config).expect("should serialize");
        let deserialized: WeatherConfig = serde_json::from_str(&json).expect("should deserialize");

        assert_eq!(deserialized.base_url, "https://custom.api.com");
        assert_eq!(deserialized.timeout_secs, 60);
    }
}

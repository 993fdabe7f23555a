//! Weather adapter - Implements SourceGatewayPort using integration_weather

use application::error::SourceError;
use application::ports::SourceGatewayPort;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{
    AirQualityReading, CurrentConditions, ForecastPoint, ForecastSeries, UvReading,
};
use domain::value_objects::{GeoLocation, LocationQuery};
use integration_weather::{
    AirPollutionResponse, CurrentWeatherResponse, ForecastResponse, OpenWeatherMapClient,
    UvIndexResponse, WeatherClient, WeatherConfig, WeatherError,
};
use secrecy::SecretString;
use tracing::{debug, instrument};

/// Source gateway backed by the OpenWeatherMap API
///
/// UV and air quality are looked up by coordinates, so each of those sources
/// geocodes the query on its own.
pub struct OpenWeatherMapGateway {
    client: OpenWeatherMapClient,
}

impl std::fmt::Debug for OpenWeatherMapGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapGateway")
            .field("client", &self.client)
            .finish()
    }
}

impl OpenWeatherMapGateway {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: OpenWeatherMapClient) -> Self {
        Self { client }
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(
        config: WeatherConfig,
        api_key: Option<SecretString>,
    ) -> Result<Self, SourceError> {
        let client = OpenWeatherMapClient::new(config, api_key).map_err(Self::map_error)?;
        Ok(Self::new(client))
    }

    /// Map integration weather error to source error
    fn map_error(err: WeatherError) -> SourceError {
        match err {
            WeatherError::ConnectionFailed(e) | WeatherError::RequestFailed(e) => {
                SourceError::transport(e)
            },
            WeatherError::HttpStatus(code) => SourceError::status(format!("HTTP {code}")),
            WeatherError::NotFound => SourceError::status("HTTP 404 Not Found"),
            WeatherError::RateLimitExceeded => SourceError::status("HTTP 429 rate limit exceeded"),
            WeatherError::CityNotFound(city) => {
                SourceError::status(format!("no geocoding match for {city}"))
            },
            WeatherError::ParseError(e) => SourceError::malformed(e),
            WeatherError::MissingApiKey => {
                SourceError::configuration(WeatherError::MissingApiKey.to_string())
            },
        }
    }

    fn map_current(response: CurrentWeatherResponse) -> Result<CurrentConditions, SourceError> {
        let description = response
            .primary_description()
            .ok_or_else(|| SourceError::malformed("current weather has no condition entry"))?;

        Ok(CurrentConditions::new(
            response.main.temp,
            description,
            response.main.humidity,
            response.wind.speed,
        ))
    }

    fn map_forecast(response: &ForecastResponse) -> Result<ForecastSeries, SourceError> {
        response
            .list
            .iter()
            .map(|entry| {
                Ok(ForecastPoint::new(
                    unix_instant(entry.dt)?,
                    entry.main.temp,
                    entry.main.temp_min,
                    entry.main.temp_max,
                ))
            })
            .collect::<Result<Vec<_>, SourceError>>()
            .map(ForecastSeries::new)
    }

    fn map_uv(response: &UvIndexResponse) -> Result<UvReading, SourceError> {
        let location = GeoLocation::new(response.lat, response.lon)?;
        let observed_at = match response.date_iso.as_deref() {
            Some(iso) => DateTime::parse_from_rfc3339(iso)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| SourceError::malformed(format!("invalid date_iso {iso}: {e}")))?,
            None => unix_instant(response.date)?,
        };
        Ok(UvReading::new(location, observed_at, response.value)?)
    }

    fn map_air_quality(response: AirPollutionResponse) -> Result<AirQualityReading, SourceError> {
        let location = GeoLocation::new(response.coord.lat, response.coord.lon)?;
        let entry = response
            .list
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::malformed("air pollution response has no reading"))?;

        Ok(AirQualityReading::new(
            location,
            unix_instant(entry.dt)?,
            entry.main.aqi,
            entry.components,
        )?)
    }

    async fn locate(&self, query: &LocationQuery) -> Result<GeoLocation, SourceError> {
        let place = self
            .client
            .geocode(query.as_str())
            .await
            .map_err(Self::map_error)?;
        Ok(GeoLocation::new(place.lat, place.lon)?)
    }
}

fn unix_instant(seconds: i64) -> Result<DateTime<Utc>, SourceError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| SourceError::malformed(format!("timestamp {seconds} out of range")))
}

#[async_trait]
impl SourceGatewayPort for OpenWeatherMapGateway {
    #[instrument(skip(self), fields(query = %query))]
    async fn get_current_conditions(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, SourceError> {
        let response = self
            .client
            .current_weather(query.as_str())
            .await
            .map_err(Self::map_error)?;
        let current = Self::map_current(response)?;
        debug!(temperature = current.temperature_celsius, "Current conditions fetched");
        Ok(current)
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn get_forecast(&self, query: &LocationQuery) -> Result<ForecastSeries, SourceError> {
        let response = self
            .client
            .forecast(query.as_str())
            .await
            .map_err(Self::map_error)?;
        let series = Self::map_forecast(&response)?;
        debug!(points = series.len(), "Forecast fetched");
        Ok(series)
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn get_uv_index(&self, query: &LocationQuery) -> Result<UvReading, SourceError> {
        let location = self.locate(query).await?;
        let response = self
            .client
            .uv_index(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;
        let reading = Self::map_uv(&response)?;
        debug!(value = reading.value(), "UV index fetched");
        Ok(reading)
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn get_air_quality(
        &self,
        query: &LocationQuery,
    ) -> Result<AirQualityReading, SourceError> {
        let location = self.locate(query).await?;
        let response = self
            .client
            .air_pollution(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;
        let reading = Self::map_air_quality(response)?;
        debug!(aqi = reading.aqi(), "Air quality fetched");
        Ok(reading)
    }
}

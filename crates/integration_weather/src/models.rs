//! OpenWeatherMap wire models
//!
//! Only the fields the application reads are modelled; everything else in
//! the payloads is ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response of `/data/2.5/weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Temperature and humidity block
    pub main: CurrentMain,
    /// Condition entries, the first one is the primary condition
    pub weather: Vec<WeatherDescription>,
    /// Wind block
    pub wind: Wind,
    /// Resolved city name
    #[serde(default)]
    pub name: Option<String>,
}

impl CurrentWeatherResponse {
    /// Description of the primary condition
    #[must_use]
    pub fn primary_description(&self) -> Option<&str> {
        self.weather.first().map(|w| w.description.as_str())
    }
}

/// `main` block of the current weather payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentMain {
    /// Temperature
    pub temp: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

/// One condition entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDescription {
    /// Free-text description, e.g. "light rain"
    pub description: String,
}

/// `wind` block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Wind speed
    pub speed: f64,
}

/// Response of `/data/2.5/forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Forecast steps in delivery order
    pub list: Vec<ForecastEntry>,
}

/// One forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp in seconds
    pub dt: i64,
    /// Temperature block
    pub main: ForecastMain,
    /// Same instant as text, `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub dt_txt: Option<String>,
}

/// `main` block of a forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastMain {
    /// Temperature
    pub temp: f64,
    /// Minimum temperature
    pub temp_min: f64,
    /// Maximum temperature
    pub temp_max: f64,
}

/// One match of `/geo/1.0/direct`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeEntry {
    /// Place name
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// ISO country code
    #[serde(default)]
    pub country: Option<String>,
}

/// Response of `/data/2.5/uvi`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvIndexResponse {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Observation instant as ISO 8601 text
    #[serde(default)]
    pub date_iso: Option<String>,
    /// Observation instant as Unix seconds
    pub date: i64,
    /// UV index
    pub value: f64,
}

/// Response of `/data/2.5/air_pollution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirPollutionResponse {
    /// Coordinates of the reading
    pub coord: Coord,
    /// Readings, the first one is the current reading
    pub list: Vec<AirPollutionEntry>,
}

/// Coordinate pair as used by OpenWeatherMap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

/// One air pollution reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirPollutionEntry {
    /// Unix timestamp in seconds
    pub dt: i64,
    /// Index block
    pub main: AirQualityIndex,
    /// Concentrations in μg/m³ keyed by pollutant code
    pub components: BTreeMap<String, f64>,
}

/// `main` block of an air pollution reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualityIndex {
    /// Index on the 1..=5 scale
    pub aqi: i32,
}

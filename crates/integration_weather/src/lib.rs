//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>).
//! Provides current weather, forecasts, UV index and air pollution data
//! plus direct geocoding of city names. Requires an API key.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    AirPollutionEntry, AirPollutionResponse, AirQualityIndex, Coord, CurrentMain,
    CurrentWeatherResponse, ForecastEntry, ForecastMain, ForecastResponse, GeocodeEntry,
    UvIndexResponse, WeatherDescription, Wind,
};

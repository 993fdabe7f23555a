//! Presentation-ready view of a snapshot
//!
//! Everything here is recomputed from the snapshot's raw values; the snapshot
//! itself is only read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classification::{AirQualityLevel, ClassificationConfig, TemperatureBand, UvRisk};
use crate::entities::{ConsolidatedSnapshot, pollutant_label};
use crate::series::ForecastChart;
use crate::value_objects::GeoLocation;

/// Current conditions with derived band and glyph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Source description
    pub description: String,
    /// Relative humidity percentage
    pub humidity_percent: f64,
    /// Wind speed in m/s
    pub wind_speed_mps: f64,
    /// Temperature band
    pub band: TemperatureBand,
    /// Weather glyph
    pub glyph: &'static str,
}

/// UV reading with risk tier and advice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UvView {
    /// Where the index was measured
    pub location: GeoLocation,
    /// When the index was measured
    pub observed_at: DateTime<Utc>,
    /// UV index
    pub value: f64,
    /// Risk tier
    pub risk: UvRisk,
    /// Protection advice for the tier
    pub advice: &'static str,
}

/// One pollutant line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentView {
    /// Pollutant code as reported
    pub code: String,
    /// Display label
    pub label: String,
    /// Concentration in μg/m³
    pub concentration: f64,
}

/// Air quality reading with level and labelled components
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityView {
    /// Where the reading was taken
    pub location: GeoLocation,
    /// When the reading was taken
    pub observed_at: DateTime<Utc>,
    /// Reported index
    pub aqi: i32,
    /// Classified level
    pub level: AirQualityLevel,
    /// Components in code order
    pub components: Vec<ComponentView>,
}

/// Everything the presentation layer renders for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    /// Current conditions
    pub current: CurrentView,
    /// UV index
    pub uv: UvView,
    /// Air quality
    pub air_quality: AirQualityView,
    /// Forecast chart datasets
    pub forecast: ForecastChart,
}

impl SnapshotReport {
    /// Derive the report using the given tables and cutoff
    #[must_use]
    pub fn build(snapshot: &ConsolidatedSnapshot, config: &ClassificationConfig) -> Self {
        let current = snapshot.current();
        let uv = snapshot.uv();
        let air = snapshot.air_quality();
        let risk = config.uv_risk(uv.value());

        Self {
            current: CurrentView {
                temperature_celsius: current.temperature_celsius,
                description: current.description.clone(),
                humidity_percent: current.humidity_percent,
                wind_speed_mps: current.wind_speed_mps,
                band: config.temperature_band(current.temperature_celsius),
                glyph: current.sky_glyph(),
            },
            uv: UvView {
                location: uv.location(),
                observed_at: uv.observed_at(),
                value: uv.value(),
                risk,
                advice: risk.advice(),
            },
            air_quality: AirQualityView {
                location: air.location(),
                observed_at: air.observed_at(),
                aqi: air.aqi(),
                level: config.air_quality_level(air.aqi()),
                components: air
                    .components()
                    .iter()
                    .map(|(code, &concentration)| ComponentView {
                        code: code.clone(),
                        label: pollutant_label(code).to_string(),
                        concentration,
                    })
                    .collect(),
            },
            forecast: ForecastChart::from_series(snapshot.forecast(), config.series_split_cutoff),
        }
    }
}

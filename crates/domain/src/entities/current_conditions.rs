//! Current weather conditions at the queried location

use serde::{Deserialize, Serialize};

/// Point-in-time weather observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in Celsius
    pub temperature_celsius: f64,
    /// Free-text condition description as delivered by the source
    pub description: String,
    /// Relative humidity percentage
    pub humidity_percent: f64,
    /// Wind speed in metres per second
    pub wind_speed_mps: f64,
}

impl CurrentConditions {
    /// Create a new observation
    #[must_use]
    pub fn new(
        temperature_celsius: f64,
        description: impl Into<String>,
        humidity_percent: f64,
        wind_speed_mps: f64,
    ) -> Self {
        Self {
            temperature_celsius,
            description: description.into(),
            humidity_percent,
            wind_speed_mps,
        }
    }

    /// Weather glyph matching the description
    #[must_use]
    pub fn sky_glyph(&self) -> &'static str {
        sky_glyph(&self.description)
    }
}

/// Pick a weather glyph from a free-text description
///
/// Keywords are checked in a fixed order, so "thunderstorm with rain" is rain.
#[must_use]
pub fn sky_glyph(description: &str) -> &'static str {
    const RULES: &[(&[&str], &str)] = &[
        (&["rain"], "🌧️"),
        (&["cloud"], "☁️"),
        (&["snow"], "❄️"),
        (&["clear"], "☀️"),
        (&["thunder"], "⛈️"),
        (&["fog", "mist"], "🌫️"),
    ];

    let lowered = description.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or("🌤️", |(_, glyph)| glyph)
}

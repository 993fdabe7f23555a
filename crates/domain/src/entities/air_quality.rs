//! Air quality reading and pollutant naming

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Air quality index and pollutant composition observed at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAirQualityReading")]
pub struct AirQualityReading {
    location: GeoLocation,
    observed_at: DateTime<Utc>,
    aqi: i32,
    components: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
struct RawAirQualityReading {
    location: GeoLocation,
    observed_at: DateTime<Utc>,
    aqi: i32,
    components: BTreeMap<String, f64>,
}

impl TryFrom<RawAirQualityReading> for AirQualityReading {
    type Error = DomainError;

    fn try_from(raw: RawAirQualityReading) -> Result<Self, Self::Error> {
        Self::new(raw.location, raw.observed_at, raw.aqi, raw.components)
    }
}

impl AirQualityReading {
    /// Create a reading
    ///
    /// The index is kept as reported, values outside 1..=5 are classified
    /// later rather than rejected here.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReading` if any concentration is negative
    /// or NaN.
    pub fn new(
        location: GeoLocation,
        observed_at: DateTime<Utc>,
        aqi: i32,
        components: BTreeMap<String, f64>,
    ) -> Result<Self, DomainError> {
        if let Some((code, value)) = components.iter().find(|(_, v)| v.is_nan() || **v < 0.0) {
            return Err(DomainError::invalid_reading(format!(
                "concentration of {code} must be non-negative, got {value}"
            )));
        }
        Ok(Self {
            location,
            observed_at,
            aqi,
            components,
        })
    }

    /// Where the reading was taken
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// When the reading was taken
    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Reported air quality index (1..=5 from a well-behaved source)
    #[must_use]
    pub const fn aqi(&self) -> i32 {
        self.aqi
    }

    /// Pollutant concentrations keyed by pollutant code
    #[must_use]
    pub const fn components(&self) -> &BTreeMap<String, f64> {
        &self.components
    }
}

/// Display label for a pollutant code
///
/// Unknown codes are returned unchanged.
#[must_use]
pub fn pollutant_label(code: &str) -> &str {
    match code {
        "co" => "CO",
        "no" => "NO",
        "no2" => "NO₂",
        "o3" => "O₃",
        "so2" => "SO₂",
        "pm2_5" => "PM2.5",
        "pm10" => "PM10",
        "nh3" => "NH₃",
        other => other,
    }
}

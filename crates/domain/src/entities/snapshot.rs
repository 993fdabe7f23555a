//! Consolidated snapshot of all four sources for one query

use serde::{Deserialize, Serialize};

use super::{AirQualityReading, CurrentConditions, ForecastSeries, UvReading};

/// Complete result of one aggregate fetch
///
/// The only constructor takes all four parts, so a snapshot missing any
/// source cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedSnapshot {
    current: CurrentConditions,
    forecast: ForecastSeries,
    uv: UvReading,
    air_quality: AirQualityReading,
}

impl ConsolidatedSnapshot {
    /// Assemble a snapshot from its four parts
    #[must_use]
    pub const fn new(
        current: CurrentConditions,
        forecast: ForecastSeries,
        uv: UvReading,
        air_quality: AirQualityReading,
    ) -> Self {
        Self {
            current,
            forecast,
            uv,
            air_quality,
        }
    }

    /// Current conditions
    #[must_use]
    pub const fn current(&self) -> &CurrentConditions {
        &self.current
    }

    /// Forecast series
    #[must_use]
    pub const fn forecast(&self) -> &ForecastSeries {
        &self.forecast
    }

    /// UV reading
    #[must_use]
    pub const fn uv(&self) -> &UvReading {
        &self.uv
    }

    /// Air quality reading
    #[must_use]
    pub const fn air_quality(&self) -> &AirQualityReading {
        &self.air_quality
    }
}

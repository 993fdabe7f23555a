//! Short-horizon forecast series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Instant the step refers to
    pub timestamp: DateTime<Utc>,
    /// Expected temperature in Celsius
    pub temperature_celsius: f64,
    /// Expected minimum temperature in Celsius
    pub temperature_min_celsius: f64,
    /// Expected maximum temperature in Celsius
    pub temperature_max_celsius: f64,
}

impl ForecastPoint {
    /// Create a new forecast step
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        temperature_celsius: f64,
        temperature_min_celsius: f64,
        temperature_max_celsius: f64,
    ) -> Self {
        Self {
            timestamp,
            temperature_celsius,
            temperature_min_celsius,
            temperature_max_celsius,
        }
    }
}

/// Forecast steps in the order the source delivered them
///
/// The series is never sorted; source order is kept end to end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastSeries(Vec<ForecastPoint>);

impl ForecastSeries {
    /// Wrap points as delivered
    #[must_use]
    pub const fn new(points: Vec<ForecastPoint>) -> Self {
        Self(points)
    }

    /// All points in source order
    #[must_use]
    pub fn points(&self) -> &[ForecastPoint] {
        &self.0
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over steps in source order
    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.0.iter()
    }

    /// Primary temperature values
    #[must_use]
    pub fn temperatures(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.temperature_celsius).collect()
    }

    /// Minimum temperature values
    #[must_use]
    pub fn min_temperatures(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.temperature_min_celsius).collect()
    }

    /// Maximum temperature values
    #[must_use]
    pub fn max_temperatures(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.temperature_max_celsius).collect()
    }
}

impl From<Vec<ForecastPoint>> for ForecastSeries {
    fn from(points: Vec<ForecastPoint>) -> Self {
        Self(points)
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

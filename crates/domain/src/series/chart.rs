//! Chart-ready projection of a forecast series

use serde::Serialize;

use super::thresholded::{ThresholdedSeries, partition_by_threshold};
use crate::entities::ForecastSeries;

/// Parallel datasets for a forecast line chart
///
/// All vectors have the forecast's length and keep its order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastChart {
    /// Time labels, `HH:MM` in UTC
    pub labels: Vec<String>,
    /// Primary temperature
    pub temperature: Vec<f64>,
    /// Minimum temperature
    pub temperature_min: Vec<f64>,
    /// Maximum temperature
    pub temperature_max: Vec<f64>,
    /// Cutoff used for `split`
    pub cutoff: f64,
    /// Primary temperature split at `cutoff`
    pub split: ThresholdedSeries,
}

impl ForecastChart {
    /// Derive chart datasets from a forecast
    #[must_use]
    pub fn from_series(series: &ForecastSeries, cutoff: f64) -> Self {
        let temperature = series.temperatures();
        let split = partition_by_threshold(&temperature, cutoff);
        Self {
            labels: series
                .iter()
                .map(|p| p.timestamp.format("%H:%M").to_string())
                .collect(),
            temperature,
            temperature_min: series.min_temperatures(),
            temperature_max: series.max_temperatures(),
            cutoff,
            split,
        }
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the chart has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

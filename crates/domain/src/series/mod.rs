//! Derived series for time-series charts

mod chart;
mod thresholded;

pub use chart::ForecastChart;
pub use thresholded::{ThresholdedSeries, partition_by_threshold};

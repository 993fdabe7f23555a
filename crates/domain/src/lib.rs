//! Domain layer for Enviroscope
//!
//! Readings delivered by the environmental data sources, the consolidated
//! snapshot built from them, and the pure classification and series logic
//! applied to it. Nothing here performs I/O.

pub mod classification;
pub mod entities;
pub mod errors;
pub mod report;
pub mod series;
pub mod value_objects;

pub use classification::{
    AirQualityLevel, ClassificationConfig, TemperatureBand, ThresholdBand, ThresholdTable, Tier,
    UvRisk, classify,
};
pub use entities::*;
pub use errors::DomainError;
pub use report::SnapshotReport;
pub use series::{ForecastChart, ThresholdedSeries, partition_by_threshold};
pub use value_objects::*;

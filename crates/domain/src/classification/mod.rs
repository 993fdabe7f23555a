//! Classification of numeric readings into ordered tiers

mod config;
mod threshold_table;
mod tiers;

pub use config::ClassificationConfig;
pub use threshold_table::{ThresholdBand, ThresholdTable, classify};
pub use tiers::{AirQualityLevel, TemperatureBand, Tier, UvRisk};

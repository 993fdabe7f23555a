//! Tunable classification settings

use serde::{Deserialize, Serialize};

use super::threshold_table::ThresholdTable;
use super::tiers::{AirQualityLevel, TemperatureBand, UvRisk};

/// Threshold tables and the forecast split cutoff
///
/// Every field falls back to the reference value when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Temperature in Celsius splitting the forecast into below/above series
    #[serde(default = "default_series_split_cutoff")]
    pub series_split_cutoff: f64,

    /// UV index table
    #[serde(default = "default_uv_thresholds")]
    pub uv_thresholds: ThresholdTable<UvRisk>,

    /// Air quality index table
    #[serde(default = "default_aqi_thresholds")]
    pub aqi_thresholds: ThresholdTable<AirQualityLevel>,

    /// Temperature band table
    #[serde(default = "default_temp_thresholds")]
    pub temp_thresholds: ThresholdTable<TemperatureBand>,
}

const fn default_series_split_cutoff() -> f64 {
    25.0
}

fn default_uv_thresholds() -> ThresholdTable<UvRisk> {
    ThresholdTable::uv_index()
}

fn default_aqi_thresholds() -> ThresholdTable<AirQualityLevel> {
    ThresholdTable::air_quality_index()
}

fn default_temp_thresholds() -> ThresholdTable<TemperatureBand> {
    ThresholdTable::temperature()
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            series_split_cutoff: default_series_split_cutoff(),
            uv_thresholds: default_uv_thresholds(),
            aqi_thresholds: default_aqi_thresholds(),
            temp_thresholds: default_temp_thresholds(),
        }
    }
}

impl ClassificationConfig {
    /// Risk tier for a UV index
    #[must_use]
    pub fn uv_risk(&self, value: f64) -> UvRisk {
        self.uv_thresholds.classify(value)
    }

    /// Level for an air quality index
    #[must_use]
    pub fn air_quality_level(&self, aqi: i32) -> AirQualityLevel {
        self.aqi_thresholds.classify(f64::from(aqi))
    }

    /// Band for a temperature in Celsius
    #[must_use]
    pub fn temperature_band(&self, celsius: f64) -> TemperatureBand {
        self.temp_thresholds.classify(celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tables() {
        let config = ClassificationConfig::default();
        assert!((config.series_split_cutoff - 25.0).abs() < f64::EPSILON);
        assert_eq!(config.air_quality_level(2), AirQualityLevel::Fair);
        assert_eq!(config.air_quality_level(7), AirQualityLevel::Unknown);
        assert_eq!(config.uv_risk(7.5), UvRisk::High);
        assert_eq!(config.temperature_band(-1.0), TemperatureBand::Freezing);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config: ClassificationConfig =
            serde_json::from_str(r#"{"series_split_cutoff": 18.0}"#).unwrap();
        assert!((config.series_split_cutoff - 18.0).abs() < f64::EPSILON);
        assert_eq!(config.uv_thresholds, ThresholdTable::uv_index());
    }

    #[test]
    fn custom_table_overrides_default() {
        let config: ClassificationConfig = serde_json::from_str(
            r#"{"uv_thresholds": {"bands": [{"below": 5.0, "tier": "low"}], "otherwise": "high"}}"#,
        )
        .unwrap();
        assert_eq!(config.uv_risk(4.0), UvRisk::Low);
        assert_eq!(config.uv_risk(9.0), UvRisk::High);
    }

    #[test]
    fn table_with_decreasing_tiers_is_rejected() {
        let result: Result<ClassificationConfig, _> = serde_json::from_str(
            r#"{"uv_thresholds": {"bands": [{"below": 3.0, "tier": "extreme"}, {"below": 6.0, "tier": "low"}], "otherwise": "moderate"}}"#,
        );
        assert!(result.is_err());
    }
}

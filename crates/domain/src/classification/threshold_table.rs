//! Ordered threshold tables and the generic classifier
//!
//! # Examples
//!
//! ```
//! use domain::classification::{ThresholdTable, UvRisk, classify};
//!
//! let table = ThresholdTable::uv_index();
//! assert_eq!(classify(7.5, &table), UvRisk::High);
//! assert_eq!(classify(42.0, &table), UvRisk::Extreme);
//! assert_eq!(classify(f64::NAN, &table), UvRisk::Unknown);
//! ```

use serde::{Deserialize, Serialize};

use super::tiers::{AirQualityLevel, TemperatureBand, Tier, UvRisk};
use crate::errors::DomainError;

/// One row of a threshold table: values strictly below `below` get `tier`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand<T> {
    /// Exclusive upper bound of the band
    pub below: f64,
    /// Tier assigned to values in the band
    pub tier: T,
}

impl<T> ThresholdBand<T> {
    /// Create a band
    pub const fn new(below: f64, tier: T) -> Self {
        Self { below, tier }
    }
}

/// Strictly increasing cutoffs paired with tiers, plus a catch-all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawThresholdTable<T>",
    bound(deserialize = "T: Tier + Deserialize<'de>")
)]
pub struct ThresholdTable<T> {
    bands: Vec<ThresholdBand<T>>,
    otherwise: T,
}

#[derive(Deserialize)]
struct RawThresholdTable<T> {
    bands: Vec<ThresholdBand<T>>,
    otherwise: T,
}

impl<T: Tier> TryFrom<RawThresholdTable<T>> for ThresholdTable<T> {
    type Error = DomainError;

    fn try_from(raw: RawThresholdTable<T>) -> Result<Self, Self::Error> {
        Self::new(raw.bands, raw.otherwise)
    }
}

impl<T: Tier> ThresholdTable<T> {
    /// Build a validated table
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidThresholds` when there are no bands, a
    /// cutoff is not finite, cutoffs are not strictly increasing, or a known
    /// tier is followed by a less severe one (`UNKNOWN` entries are skipped).
    pub fn new(bands: Vec<ThresholdBand<T>>, otherwise: T) -> Result<Self, DomainError> {
        if bands.is_empty() {
            return Err(DomainError::invalid_thresholds(
                "at least one band is required",
            ));
        }
        if let Some(band) = bands.iter().find(|b| !b.below.is_finite()) {
            return Err(DomainError::invalid_thresholds(format!(
                "cutoff {} is not finite",
                band.below
            )));
        }
        if let Some(pair) = bands.windows(2).find(|w| w[0].below >= w[1].below) {
            return Err(DomainError::invalid_thresholds(format!(
                "cutoffs must be strictly increasing, {} is followed by {}",
                pair[0].below, pair[1].below
            )));
        }

        let known: Vec<(T, u8)> = bands
            .iter()
            .map(|b| b.tier)
            .chain(std::iter::once(otherwise))
            .filter_map(|tier| tier.rank().map(|rank| (tier, rank)))
            .collect();
        if let Some(pair) = known.windows(2).find(|w| w[0].1 > w[1].1) {
            return Err(DomainError::invalid_thresholds(format!(
                "tiers must not decrease in severity, {} is followed by {}",
                pair[0].0.label(),
                pair[1].0.label()
            )));
        }

        Ok(Self { bands, otherwise })
    }
}

impl<T> ThresholdTable<T> {
    /// Bands in ascending cutoff order
    #[must_use]
    pub fn bands(&self) -> &[ThresholdBand<T>] {
        &self.bands
    }

    /// Tier for values at or above the last cutoff
    #[must_use]
    pub const fn otherwise(&self) -> &T {
        &self.otherwise
    }
}

impl<T: Tier> ThresholdTable<T> {
    /// Classify a value against this table
    ///
    /// Returns the tier of the first band whose cutoff exceeds `value`, or the
    /// catch-all when none does. NaN classifies as `T::UNKNOWN`.
    #[must_use]
    pub fn classify(&self, value: f64) -> T {
        if value.is_nan() {
            return T::UNKNOWN;
        }
        self.bands
            .iter()
            .find(|band| value < band.below)
            .map_or(self.otherwise, |band| band.tier)
    }
}

/// Classify `value` with `table`
///
/// Total over every `f64`: never fails and never panics.
#[must_use]
pub fn classify<T: Tier>(value: f64, table: &ThresholdTable<T>) -> T {
    table.classify(value)
}

impl ThresholdTable<UvRisk> {
    /// UV index table: 3, 6, 8, 11
    #[must_use]
    pub fn uv_index() -> Self {
        Self {
            bands: vec![
                ThresholdBand::new(3.0, UvRisk::Low),
                ThresholdBand::new(6.0, UvRisk::Moderate),
                ThresholdBand::new(8.0, UvRisk::High),
                ThresholdBand::new(11.0, UvRisk::VeryHigh),
            ],
            otherwise: UvRisk::Extreme,
        }
    }
}

impl ThresholdTable<AirQualityLevel> {
    /// Air quality index table: identity on 1..=5, unknown elsewhere
    #[must_use]
    pub fn air_quality_index() -> Self {
        Self {
            bands: vec![
                ThresholdBand::new(1.0, AirQualityLevel::Unknown),
                ThresholdBand::new(2.0, AirQualityLevel::Good),
                ThresholdBand::new(3.0, AirQualityLevel::Fair),
                ThresholdBand::new(4.0, AirQualityLevel::Moderate),
                ThresholdBand::new(5.0, AirQualityLevel::Poor),
                ThresholdBand::new(6.0, AirQualityLevel::VeryPoor),
            ],
            otherwise: AirQualityLevel::Unknown,
        }
    }
}

impl ThresholdTable<TemperatureBand> {
    /// Temperature table in Celsius: 0, 10, 20, 30
    #[must_use]
    pub fn temperature() -> Self {
        Self {
            bands: vec![
                ThresholdBand::new(0.0, TemperatureBand::Freezing),
                ThresholdBand::new(10.0, TemperatureBand::Cold),
                ThresholdBand::new(20.0, TemperatureBand::Mild),
                ThresholdBand::new(30.0, TemperatureBand::Warm),
            ],
            otherwise: TemperatureBand::Hot,
        }
    }
}

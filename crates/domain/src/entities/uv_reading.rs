//! UV index reading

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// UV index observed at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawUvReading")]
pub struct UvReading {
    location: GeoLocation,
    observed_at: DateTime<Utc>,
    value: f64,
}

#[derive(Deserialize)]
struct RawUvReading {
    location: GeoLocation,
    observed_at: DateTime<Utc>,
    value: f64,
}

impl TryFrom<RawUvReading> for UvReading {
    type Error = DomainError;

    fn try_from(raw: RawUvReading) -> Result<Self, Self::Error> {
        Self::new(raw.location, raw.observed_at, raw.value)
    }
}

impl UvReading {
    /// Create a reading
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReading` if the index is negative or NaN.
    pub fn new(
        location: GeoLocation,
        observed_at: DateTime<Utc>,
        value: f64,
    ) -> Result<Self, DomainError> {
        if value.is_nan() || value < 0.0 {
            return Err(DomainError::invalid_reading(format!(
                "UV index must be non-negative, got {value}"
            )));
        }
        Ok(Self {
            location,
            observed_at,
            value,
        })
    }

    /// Where the index was measured
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// When the index was measured
    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// The UV index
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

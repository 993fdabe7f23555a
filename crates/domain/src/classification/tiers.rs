//! Ordered tier enums produced by classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered categorical label with an explicit unknown value
///
/// `rank` orders the known tiers from least to most severe. `UNKNOWN` has no
/// rank and is what out-of-domain input classifies to.
pub trait Tier: Copy + PartialEq + fmt::Debug {
    /// Catch-all for input outside the table's domain
    const UNKNOWN: Self;

    /// Position among the known tiers, `None` for `UNKNOWN`
    fn rank(self) -> Option<u8>;

    /// Human-readable label
    fn label(self) -> &'static str;
}

/// UV exposure risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvRisk {
    /// Below 3
    Low,
    /// 3 to below 6
    Moderate,
    /// 6 to below 8
    High,
    /// 8 to below 11
    VeryHigh,
    /// 11 and above
    Extreme,
    /// Not classifiable
    Unknown,
}

impl UvRisk {
    /// Protection advice for this level of exposure
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::Low => "You can safely enjoy being outside. Wear sunglasses on bright days.",
            Self::Moderate => {
                "Take precautions - cover up and wear sunscreen. Stay in shade near midday."
            },
            Self::High => "Protection required - reduce time in the sun between 11am and 4pm.",
            Self::VeryHigh => "Extra precautions needed. Avoid being outside during midday hours.",
            Self::Extreme => "Take all precautions - unprotected skin can burn in minutes.",
            Self::Unknown => "No advice available for this reading.",
        }
    }
}

impl Tier for UvRisk {
    const UNKNOWN: Self = Self::Unknown;

    fn rank(self) -> Option<u8> {
        match self {
            Self::Low => Some(0),
            Self::Moderate => Some(1),
            Self::High => Some(2),
            Self::VeryHigh => Some(3),
            Self::Extreme => Some(4),
            Self::Unknown => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
            Self::Unknown => "Unknown",
        }
    }
}

/// Air quality level on the 1..=5 index scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQualityLevel {
    /// Index 1
    Good,
    /// Index 2
    Fair,
    /// Index 3
    Moderate,
    /// Index 4
    Poor,
    /// Index 5
    VeryPoor,
    /// Any other index
    Unknown,
}

impl Tier for AirQualityLevel {
    const UNKNOWN: Self = Self::Unknown;

    fn rank(self) -> Option<u8> {
        match self {
            Self::Good => Some(0),
            Self::Fair => Some(1),
            Self::Moderate => Some(2),
            Self::Poor => Some(3),
            Self::VeryPoor => Some(4),
            Self::Unknown => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Unknown => "Unknown",
        }
    }
}

/// Temperature band used for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    /// Below 0 °C
    Freezing,
    /// 0 to below 10 °C
    Cold,
    /// 10 to below 20 °C
    Mild,
    /// 20 to below 30 °C
    Warm,
    /// 30 °C and above
    Hot,
    /// Not classifiable
    Unknown,
}

impl Tier for TemperatureBand {
    const UNKNOWN: Self = Self::Unknown;

    fn rank(self) -> Option<u8> {
        match self {
            Self::Freezing => Some(0),
            Self::Cold => Some(1),
            Self::Mild => Some(2),
            Self::Warm => Some(3),
            Self::Hot => Some(4),
            Self::Unknown => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Freezing => "Freezing",
            Self::Cold => "Cold",
            Self::Mild => "Mild",
            Self::Warm => "Warm",
            Self::Hot => "Hot",
            Self::Unknown => "Unknown",
        }
    }
}

macro_rules! impl_display_via_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_display_via_label!(UvRisk, AirQualityLevel, TemperatureBand);

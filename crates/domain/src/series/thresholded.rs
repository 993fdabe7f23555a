//! Threshold-based split of a numeric series
//!
//! # Examples
//!
//! ```
//! use domain::series::partition_by_threshold;
//!
//! let split = partition_by_threshold(&[18.0, 25.0, 30.0, 10.0], 25.0);
//! assert_eq!(split.below(), &[Some(18.0), None, None, Some(10.0)]);
//! assert_eq!(split.above(), &[None, Some(25.0), Some(30.0), None]);
//! ```

use serde::Serialize;

/// Two index-aligned views of a series split at a cutoff
///
/// At every index exactly one side holds the source value and the other is
/// `None`. The fields are private so that invariant cannot be broken.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThresholdedSeries {
    below: Vec<Option<f64>>,
    above: Vec<Option<f64>>,
}

impl ThresholdedSeries {
    /// Values under the cutoff, `None` elsewhere
    #[must_use]
    pub fn below(&self) -> &[Option<f64>] {
        &self.below
    }

    /// Values at or over the cutoff, `None` elsewhere
    #[must_use]
    pub fn above(&self) -> &[Option<f64>] {
        &self.above
    }

    /// Length of the source series
    #[must_use]
    pub fn len(&self) -> usize {
        self.below.len()
    }

    /// Whether the source series was empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.below.is_empty()
    }

    /// Rebuild the source series by taking whichever side is present
    #[must_use]
    pub fn reconstruct(&self) -> Vec<f64> {
        self.below
            .iter()
            .zip(&self.above)
            .filter_map(|(b, a)| b.or(*a))
            .collect()
    }
}

/// Split `series` at `cutoff`
///
/// `v < cutoff` goes below, everything else goes above. NaN compares false
/// and therefore lands above.
#[must_use]
pub fn partition_by_threshold(series: &[f64], cutoff: f64) -> ThresholdedSeries {
    let (below, above) = series
        .iter()
        .map(|&v| if v < cutoff { (Some(v), None) } else { (None, Some(v)) })
        .unzip();
    ThresholdedSeries { below, above }
}

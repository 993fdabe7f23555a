//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A location query was empty or whitespace only
    #[error("Location query must not be empty")]
    EmptyQuery,

    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// A threshold table violated its ordering or finiteness rules
    #[error("Invalid threshold table: {0}")]
    InvalidThresholds(String),

    /// A reading carried a value outside its physical domain
    #[error("Invalid reading: {0}")]
    InvalidReading(String),
}

impl DomainError {
    /// Create an invalid threshold table error
    pub fn invalid_thresholds(reason: impl Into<String>) -> Self {
        Self::InvalidThresholds(reason.into())
    }

    /// Create an invalid reading error
    pub fn invalid_reading(reason: impl Into<String>) -> Self {
        Self::InvalidReading(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_message() {
        assert_eq!(
            DomainError::EmptyQuery.to_string(),
            "Location query must not be empty"
        );
    }

    #[test]
    fn invalid_thresholds_message() {
        let err = DomainError::invalid_thresholds("cutoffs must increase");
        assert_eq!(
            err.to_string(),
            "Invalid threshold table: cutoffs must increase"
        );
    }

    #[test]
    fn invalid_reading_message() {
        let err = DomainError::invalid_reading("negative UV index");
        assert_eq!(err.to_string(), "Invalid reading: negative UV index");
    }

    #[test]
    fn invalid_coordinates_mentions_ranges() {
        let msg = DomainError::InvalidCoordinates.to_string();
        assert!(msg.contains("latitude"));
        assert!(msg.contains("longitude"));
    }
}

//! Application-level errors

use std::fmt;

use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Failure of a single data source
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SourceError {
    /// The source could not be reached
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The source answered with a non-success status
    #[error("Source returned non-success status: {0}")]
    Status(String),

    /// The source answered with a payload that could not be interpreted
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// The source is not usable with the current configuration
    #[error("Source not configured: {0}")]
    Configuration(String),
}

impl SourceError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a status error
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status(message.into())
    }

    /// Create a malformed payload error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<DomainError> for SourceError {
    fn from(err: DomainError) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// The four independent sources behind one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Current weather conditions
    CurrentConditions,
    /// Forecast series
    Forecast,
    /// UV index
    UvIndex,
    /// Air quality composition
    AirQuality,
}

impl SourceKind {
    /// All kinds in reporting order
    pub const ALL: [Self; 4] = [
        Self::CurrentConditions,
        Self::Forecast,
        Self::UvIndex,
        Self::AirQuality,
    ];

    /// Human-readable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CurrentConditions => "current conditions",
            Self::Forecast => "forecast",
            Self::UvIndex => "UV index",
            Self::AirQuality => "air quality",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A source error tagged with the source it came from
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {error}")]
pub struct SourceFailure {
    /// Which source failed
    pub kind: SourceKind,
    /// What went wrong
    pub error: SourceError,
}

impl SourceFailure {
    /// Tag an error with its source
    #[must_use]
    pub const fn new(kind: SourceKind, error: SourceError) -> Self {
        Self { kind, error }
    }
}

/// One or more sources failed, so the whole batch was discarded
///
/// Holds at least one failure, ordered current conditions, forecast, UV
/// index, air quality.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Aggregate fetch failed ({}): {}", .failures.len(), join_failures(.failures))]
pub struct AggregateFetchError {
    failures: Vec<SourceFailure>,
}

fn join_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AggregateFetchError {
    /// Build from a list that the caller knows is non-empty
    pub(crate) fn new(mut failures: Vec<SourceFailure>) -> Self {
        debug_assert!(!failures.is_empty(), "aggregate error without failures");
        failures.sort_by_key(|f| f.kind);
        Self { failures }
    }

    /// Build from any collection of failures, `None` if it is empty
    #[must_use]
    pub fn from_failures(failures: impl IntoIterator<Item = SourceFailure>) -> Option<Self> {
        let failures: Vec<_> = failures.into_iter().collect();
        if failures.is_empty() {
            None
        } else {
            Some(Self::new(failures))
        }
    }

    /// Every failing source with its error
    #[must_use]
    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    /// Kinds of the failing sources
    #[must_use]
    pub fn failed_sources(&self) -> Vec<SourceKind> {
        self.failures.iter().map(|f| f.kind).collect()
    }

    /// Whether the given source is among the failures
    #[must_use]
    pub fn contains(&self, kind: SourceKind) -> bool {
        self.failures.iter().any(|f| f.kind == kind)
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The aggregate fetch failed
    #[error(transparent)]
    Fetch(#[from] AggregateFetchError),

    /// There is no snapshot to work with
    #[error("No snapshot available")]
    NoSnapshot,
}

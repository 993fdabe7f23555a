//! Source gateway port
//!
//! The four independent environmental data sources, each reachable by
//! location query and each failing on its own.

use async_trait::async_trait;
use domain::entities::{AirQualityReading, CurrentConditions, ForecastSeries, UvReading};
use domain::value_objects::LocationQuery;
#[cfg(test)]
use mockall::automock;

use crate::error::SourceError;

/// Port for fetching raw readings from the data sources
#[allow(clippy::struct_field_names)] // automock generates struct with `get_*` prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SourceGatewayPort: Send + Sync {
    /// Current weather conditions
    async fn get_current_conditions(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, SourceError>;

    /// Forecast series in source order
    async fn get_forecast(&self, query: &LocationQuery) -> Result<ForecastSeries, SourceError>;

    /// UV index reading
    async fn get_uv_index(&self, query: &LocationQuery) -> Result<UvReading, SourceError>;

    /// Air quality reading
    async fn get_air_quality(&self, query: &LocationQuery)
    -> Result<AirQualityReading, SourceError>;
}

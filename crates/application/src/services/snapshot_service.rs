//! Aggregate snapshot fetching
//!
//! Fans out to all four sources at once and fans back in to a single
//! all-or-nothing outcome.

use std::sync::Arc;

use domain::entities::ConsolidatedSnapshot;
use domain::value_objects::LocationQuery;
use tracing::{debug, instrument, warn};

use crate::error::{AggregateFetchError, SourceError, SourceFailure, SourceKind};
use crate::ports::SourceGatewayPort;

/// Coordinator producing one consolidated snapshot per query
pub struct SnapshotService {
    gateway: Arc<dyn SourceGatewayPort>,
}

impl std::fmt::Debug for SnapshotService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotService")
            .field("gateway", &"<SourceGatewayPort>")
            .finish()
    }
}

impl SnapshotService {
    /// Create a new coordinator over the given gateway
    #[must_use]
    pub fn new(gateway: Arc<dyn SourceGatewayPort>) -> Self {
        Self { gateway }
    }

    /// Fetch all four sources concurrently and consolidate them
    ///
    /// Succeeds only when every source succeeds. Any failure discards all
    /// four outcomes, including the successful ones. No retries happen here.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn fetch_snapshot(
        &self,
        query: &LocationQuery,
    ) -> Result<ConsolidatedSnapshot, AggregateFetchError> {
        let (current, forecast, uv, air_quality) = tokio::join!(
            self.gateway.get_current_conditions(query),
            self.gateway.get_forecast(query),
            self.gateway.get_uv_index(query),
            self.gateway.get_air_quality(query),
        );

        match (current, forecast, uv, air_quality) {
            (Ok(current), Ok(forecast), Ok(uv), Ok(air_quality)) => {
                debug!(forecast_points = forecast.len(), "All sources succeeded");
                Ok(ConsolidatedSnapshot::new(current, forecast, uv, air_quality))
            },
            (current, forecast, uv, air_quality) => {
                let failures: Vec<SourceFailure> = [
                    tag(SourceKind::CurrentConditions, current.err()),
                    tag(SourceKind::Forecast, forecast.err()),
                    tag(SourceKind::UvIndex, uv.err()),
                    tag(SourceKind::AirQuality, air_quality.err()),
                ]
                .into_iter()
                .flatten()
                .collect();

                for failure in &failures {
                    warn!(source = %failure.kind, error = %failure.error, "Source failed");
                }
                Err(AggregateFetchError::new(failures))
            },
        }
    }
}

fn tag(kind: SourceKind, error: Option<SourceError>) -> Option<SourceFailure> {
    error.map(|error| SourceFailure::new(kind, error))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use domain::entities::{
        AirQualityReading, CurrentConditions, ForecastPoint, ForecastSeries, UvReading,
    };
    use domain::value_objects::GeoLocation;
    use tokio::sync::Barrier;

    use super::*;
    use crate::ports::MockSourceGatewayPort;

    fn paris() -> LocationQuery {
        LocationQuery::new("Paris").unwrap()
    }

    fn current() -> CurrentConditions {
        CurrentConditions::new(21.0, "scattered clouds", 55.0, 4.1)
    }

    fn forecast() -> ForecastSeries {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        ForecastSeries::new(vec![
            ForecastPoint::new(at, 18.0, 17.0, 19.0),
            ForecastPoint::new(at + chrono::Duration::hours(3), 25.0, 24.0, 26.0),
        ])
    }

    fn uv() -> UvReading {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        UvReading::new(GeoLocation::new(48.85, 2.35).unwrap(), at, 7.5).unwrap()
    }

    fn air_quality() -> AirQualityReading {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        AirQualityReading::new(
            GeoLocation::new(48.85, 2.35).unwrap(),
            at,
            2,
            BTreeMap::from([("o3".to_string(), 68.2)]),
        )
        .unwrap()
    }

    /// Mock where each source either succeeds or fails with a transport error
    fn gateway(fail: [bool; 4]) -> MockSourceGatewayPort {
        let [fail_current, fail_forecast, fail_uv, fail_air] = fail;
        let mut mock = MockSourceGatewayPort::new();
        mock.expect_get_current_conditions().times(1).returning(move |_| {
            if fail_current {
                Err(SourceError::transport("connection reset"))
            } else {
                Ok(current())
            }
        });
        mock.expect_get_forecast().times(1).returning(move |_| {
            if fail_forecast {
                Err(SourceError::status("HTTP 500"))
            } else {
                Ok(forecast())
            }
        });
        mock.expect_get_uv_index().times(1).returning(move |_| {
            if fail_uv {
                Err(SourceError::status("HTTP 503"))
            } else {
                Ok(uv())
            }
        });
        mock.expect_get_air_quality().times(1).returning(move |_| {
            if fail_air {
                Err(SourceError::malformed("empty list"))
            } else {
                Ok(air_quality())
            }
        });
        mock
    }

    #[tokio::test]
    async fn all_sources_succeed() {
        let service = SnapshotService::new(Arc::new(gateway([false; 4])));

        let snapshot = service.fetch_snapshot(&paris()).await.unwrap();

        assert_eq!(snapshot.current(), &current());
        assert_eq!(snapshot.forecast(), &forecast());
        assert_eq!(snapshot.uv(), &uv());
        assert_eq!(snapshot.air_quality(), &air_quality());
    }

    #[tokio::test]
    async fn every_failure_combination_is_rejected() {
        for mask in 1u8..16 {
            let fail = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0];
            let service = SnapshotService::new(Arc::new(gateway(fail)));

            let err = service.fetch_snapshot(&paris()).await.unwrap_err();

            let expected: Vec<SourceKind> = SourceKind::ALL
                .into_iter()
                .zip(fail)
                .filter_map(|(kind, failed)| failed.then_some(kind))
                .collect();
            assert_eq!(err.failed_sources(), expected, "mask {mask:04b}");
        }
    }

    #[tokio::test]
    async fn uv_failure_for_paris_discards_other_results() {
        let service = SnapshotService::new(Arc::new(gateway([false, false, true, false])));

        let result = service.fetch_snapshot(&paris()).await;

        let err = result.unwrap_err();
        assert_eq!(err.failed_sources(), vec![SourceKind::UvIndex]);
        assert_eq!(err.failures()[0].error, SourceError::status("HTTP 503"));
    }

    #[tokio::test]
    async fn query_is_passed_to_every_source() {
        let mut mock = MockSourceGatewayPort::new();
        mock.expect_get_current_conditions()
            .withf(|q| q.as_str() == "Paris")
            .returning(|_| Ok(current()));
        mock.expect_get_forecast()
            .withf(|q| q.as_str() == "Paris")
            .returning(|_| Ok(forecast()));
        mock.expect_get_uv_index()
            .withf(|q| q.as_str() == "Paris")
            .returning(|_| Ok(uv()));
        mock.expect_get_air_quality()
            .withf(|q| q.as_str() == "Paris")
            .returning(|_| Ok(air_quality()));

        let service = SnapshotService::new(Arc::new(mock));
        assert!(service.fetch_snapshot(&paris()).await.is_ok());
    }

    /// Gateway whose sources each wait until all four have started
    struct RendezvousGateway {
        barrier: Barrier,
    }

    #[async_trait]
    impl SourceGatewayPort for RendezvousGateway {
        async fn get_current_conditions(
            &self,
            _query: &LocationQuery,
        ) -> Result<CurrentConditions, SourceError> {
            self.barrier.wait().await;
            Ok(current())
        }

        async fn get_forecast(&self, _query: &LocationQuery) -> Result<ForecastSeries, SourceError> {
            self.barrier.wait().await;
            Ok(forecast())
        }

        async fn get_uv_index(&self, _query: &LocationQuery) -> Result<UvReading, SourceError> {
            self.barrier.wait().await;
            Ok(uv())
        }

        async fn get_air_quality(
            &self,
            _query: &LocationQuery,
        ) -> Result<AirQualityReading, SourceError> {
            self.barrier.wait().await;
            Ok(air_quality())
        }
    }

    #[tokio::test]
    async fn sources_are_fetched_concurrently() {
        let service = SnapshotService::new(Arc::new(RendezvousGateway {
            barrier: Barrier::new(4),
        }));

        // sequential awaiting would never get past the first barrier wait
        let result =
            tokio::time::timeout(Duration::from_secs(5), service.fetch_snapshot(&paris())).await;

        assert!(result.expect("fetches did not overlap").is_ok());
    }
}

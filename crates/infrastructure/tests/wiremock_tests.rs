//! Integration tests for the OpenWeatherMap gateway
//!
//! Drives the gateway, the snapshot coordinator and the dashboard against a
//! mock OpenWeatherMap server.

use std::sync::Arc;

use application::{
    DashboardService, PublishOutcome, SlotState, SnapshotService, SourceError, SourceGatewayPort,
    SourceKind,
};
use domain::classification::{AirQualityLevel, ClassificationConfig, TemperatureBand, UvRisk};
use domain::value_objects::LocationQuery;
use infrastructure::OpenWeatherMapGateway;
use integration_weather::WeatherConfig;
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const TEST_KEY: &str = "test-key";

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 18.4, "humidity": 72},
        "wind": {"speed": 3.6},
        "name": "Paris"
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "list": [
            {"dt": 1717243200, "main": {"temp": 18.0, "temp_min": 17.0, "temp_max": 19.0}},
            {"dt": 1717254000, "main": {"temp": 25.0, "temp_min": 24.0, "temp_max": 26.0}},
            {"dt": 1717264800, "main": {"temp": 30.0, "temp_min": 29.0, "temp_max": 31.0}}
        ]
    })
}

fn geocode_body() -> serde_json::Value {
    serde_json::json!([{"name": "Paris", "lat": 48.8566, "lon": 2.3522, "country": "FR"}])
}

fn uv_body() -> serde_json::Value {
    serde_json::json!({
        "lat": 48.8566, "lon": 2.3522,
        "date_iso": "2024-06-01T12:00:00Z", "date": 1717243200,
        "value": 7.5
    })
}

fn air_body() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lat": 48.8566, "lon": 2.3522},
        "list": [{
            "dt": 1717243200,
            "main": {"aqi": 2},
            "components": {"pm2_5": 4.12, "o3": 68.66, "no2": 13.54}
        }]
    })
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mount every endpoint with a successful response
async fn mount_all(server: &MockServer) {
    mount(server, "/data/2.5/weather", ResponseTemplate::new(200).set_body_json(current_body())).await;
    mount(server, "/data/2.5/forecast", ResponseTemplate::new(200).set_body_json(forecast_body())).await;
    mount(server, "/geo/1.0/direct", ResponseTemplate::new(200).set_body_json(geocode_body())).await;
    mount(server, "/data/2.5/uvi", ResponseTemplate::new(200).set_body_json(uv_body())).await;
    mount(server, "/data/2.5/air_pollution", ResponseTemplate::new(200).set_body_json(air_body())).await;
}

fn gateway(server: &MockServer, key: Option<&str>) -> OpenWeatherMapGateway {
    let config = WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    OpenWeatherMapGateway::with_config(config, key.map(SecretString::from)).unwrap()
}

fn paris() -> LocationQuery {
    LocationQuery::new("Paris").unwrap()
}

// ============================================================================
// Gateway
// ============================================================================

#[tokio::test]
async fn current_conditions_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let current = gateway(&server, Some(TEST_KEY))
        .get_current_conditions(&paris())
        .await
        .unwrap();

    assert!((current.temperature_celsius - 18.4).abs() < f64::EPSILON);
    assert_eq!(current.description, "light rain");
    assert!((current.humidity_percent - 72.0).abs() < f64::EPSILON);
    assert!((current.wind_speed_mps - 3.6).abs() < f64::EPSILON);
}

#[tokio::test]
async fn forecast_keeps_source_order() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/forecast", ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let series = gateway(&server, Some(TEST_KEY))
        .get_forecast(&paris())
        .await
        .unwrap();

    assert_eq!(series.temperatures(), vec![18.0, 25.0, 30.0]);
    assert_eq!(series.min_temperatures(), vec![17.0, 24.0, 29.0]);
    assert_eq!(series.max_temperatures(), vec![19.0, 26.0, 31.0]);
}

#[tokio::test]
async fn uv_is_fetched_at_geocoded_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Paris"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/uvi"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(uv_body()))
        .expect(1)
        .mount(&server)
        .await;

    let reading = gateway(&server, Some(TEST_KEY))
        .get_uv_index(&paris())
        .await
        .unwrap();

    assert!((reading.value() - 7.5).abs() < f64::EPSILON);
    assert!((reading.location().latitude() - 48.8566).abs() < f64::EPSILON);
    assert_eq!(reading.observed_at().to_rfc3339(), "2024-06-01T12:00:00+00:00");
}

#[tokio::test]
async fn air_quality_is_fetched_at_geocoded_coordinates() {
    let server = MockServer::start().await;
    mount(&server, "/geo/1.0/direct", ResponseTemplate::new(200).set_body_json(geocode_body())).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_body()))
        .expect(1)
        .mount(&server)
        .await;

    let reading = gateway(&server, Some(TEST_KEY))
        .get_air_quality(&paris())
        .await
        .unwrap();

    assert_eq!(reading.aqi(), 2);
    assert_eq!(reading.components().len(), 3);
    assert!((reading.components()["pm2_5"] - 4.12).abs() < f64::EPSILON);
}

#[tokio::test]
async fn unknown_city_is_a_status_error() {
    let server = MockServer::start().await;
    mount(&server, "/geo/1.0/direct", ResponseTemplate::new(200).set_body_json(serde_json::json!([]))).await;

    let err = gateway(&server, Some(TEST_KEY))
        .get_uv_index(&LocationQuery::new("Atlantis").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Status(ref m) if m.contains("Atlantis")));
}

#[tokio::test]
async fn http_errors_map_to_status() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", ResponseTemplate::new(503)).await;
    mount(&server, "/data/2.5/forecast", ResponseTemplate::new(429)).await;

    let gw = gateway(&server, Some(TEST_KEY));
    let current = gw.get_current_conditions(&paris()).await.unwrap_err();
    let forecast = gw.get_forecast(&paris()).await.unwrap_err();

    assert_eq!(current, SourceError::status("HTTP 503"));
    assert!(matches!(forecast, SourceError::Status(ref m) if m.contains("429")));
}

#[tokio::test]
async fn malformed_body_is_malformed() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", ResponseTemplate::new(200).set_body_string("{not json")).await;

    let err = gateway(&server, Some(TEST_KEY))
        .get_current_conditions(&paris())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Malformed(_)));
}

#[tokio::test]
async fn negative_uv_is_malformed() {
    let server = MockServer::start().await;
    mount(&server, "/geo/1.0/direct", ResponseTemplate::new(200).set_body_json(geocode_body())).await;
    mount(
        &server,
        "/data/2.5/uvi",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lat": 48.8566, "lon": 2.3522, "date": 1717243200, "value": -1.0
        })),
    )
    .await;

    let err = gateway(&server, Some(TEST_KEY))
        .get_uv_index(&paris())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Malformed(_)));
}

#[tokio::test]
async fn missing_key_is_configuration_error_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = gateway(&server, None)
        .get_current_conditions(&paris())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Configuration(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let config = WeatherConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let gw = OpenWeatherMapGateway::with_config(config, Some(SecretString::from(TEST_KEY))).unwrap();

    let err = gw.get_forecast(&paris()).await.unwrap_err();

    assert!(matches!(err, SourceError::Transport(_)));
}

// ============================================================================
// Snapshot coordination over HTTP
// ============================================================================

#[tokio::test]
async fn snapshot_combines_all_four_sources() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let service = SnapshotService::new(Arc::new(gateway(&server, Some(TEST_KEY))));
    let snapshot = service.fetch_snapshot(&paris()).await.unwrap();

    assert_eq!(snapshot.current().description, "light rain");
    assert_eq!(snapshot.forecast().len(), 3);
    assert!((snapshot.uv().value() - 7.5).abs() < f64::EPSILON);
    assert_eq!(snapshot.air_quality().aqi(), 2);
}

#[tokio::test]
async fn one_failing_endpoint_fails_the_snapshot() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", ResponseTemplate::new(200).set_body_json(current_body())).await;
    mount(&server, "/data/2.5/forecast", ResponseTemplate::new(200).set_body_json(forecast_body())).await;
    mount(&server, "/geo/1.0/direct", ResponseTemplate::new(200).set_body_json(geocode_body())).await;
    mount(&server, "/data/2.5/uvi", ResponseTemplate::new(500)).await;
    mount(&server, "/data/2.5/air_pollution", ResponseTemplate::new(200).set_body_json(air_body())).await;

    let service = SnapshotService::new(Arc::new(gateway(&server, Some(TEST_KEY))));
    let err = service.fetch_snapshot(&paris()).await.unwrap_err();

    assert_eq!(err.failed_sources(), vec![SourceKind::UvIndex]);
}

#[tokio::test]
async fn geocoding_failure_fails_both_coordinate_sources() {
    let server = MockServer::start().await;
    mount(&server, "/data/2.5/weather", ResponseTemplate::new(200).set_body_json(current_body())).await;
    mount(&server, "/data/2.5/forecast", ResponseTemplate::new(200).set_body_json(forecast_body())).await;
    mount(&server, "/geo/1.0/direct", ResponseTemplate::new(200).set_body_json(serde_json::json!([]))).await;

    let service = SnapshotService::new(Arc::new(gateway(&server, Some(TEST_KEY))));
    let err = service.fetch_snapshot(&paris()).await.unwrap_err();

    assert_eq!(
        err.failed_sources(),
        vec![SourceKind::UvIndex, SourceKind::AirQuality]
    );
}

#[tokio::test]
async fn dashboard_publishes_classified_report() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let dashboard = DashboardService::new(
        Arc::new(gateway(&server, Some(TEST_KEY))),
        ClassificationConfig::default(),
    );

    let outcome = dashboard.search_text("  Paris ").await.unwrap();
    assert_eq!(outcome, PublishOutcome::Applied);
    assert!(matches!(dashboard.state(), SlotState::Ready { .. }));

    let report = dashboard.report().unwrap();
    assert_eq!(report.current.band, TemperatureBand::Mild);
    assert_eq!(report.current.glyph, "🌧️");
    assert_eq!(report.uv.risk, UvRisk::High);
    assert_eq!(report.air_quality.level, AirQualityLevel::Fair);
    assert_eq!(report.forecast.split.below(), &[Some(18.0), None, None]);
    assert_eq!(report.forecast.split.above(), &[None, Some(25.0), Some(30.0)]);
}

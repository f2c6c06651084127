//! Integration tests for OpenMeteoClient using wiremock.

use rainalert_core::{
    ForecastClient, TemperatureUnit, WeatherError, provider::open_meteo::OpenMeteoClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE: &str = include_str!("fixtures/forecast_sample.json");

fn client(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::new(&server.uri(), "rainalert-test").unwrap()
}

#[tokio::test]
async fn fetch_decodes_hourly_series() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "51.1"))
        .and(query_param("longitude", "17.03"))
        .and(query_param("hourly", "temperature_2m,rain"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let forecast = client(&mock_server).fetch(51.1, 17.03).await.unwrap();

    assert_eq!(forecast.hourly.aligned_len(), 9);
    assert_eq!(forecast.hourly_units.temperature, "°C");
    assert_eq!(forecast.hourly_units.precipitation, "mm");
    assert_eq!(forecast.hourly.time[0], "2023-04-22T00:00");
}

#[tokio::test]
async fn fetch_requests_fahrenheit_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hourly_units": {"time": "iso8601", "temperature_2m": "°F", "rain": "mm"},
            "hourly": {
                "time": ["2023-04-22T00:00"],
                "temperature_2m": [42.6],
                "rain": [0.4]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let forecast = client(&mock_server)
        .with_temperature_unit(TemperatureUnit::Fahrenheit)
        .fetch(51.1, 17.03)
        .await
        .unwrap();

    assert_eq!(forecast.hourly_units.temperature_unit(), TemperatureUnit::Fahrenheit);
}

#[tokio::test]
async fn embedded_error_in_ok_response_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Parameter 'latitude' is missing"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch(51.1, 17.03).await.unwrap_err();

    match err {
        WeatherError::RequestFailure(reason) => {
            assert!(reason.contains("latitude"), "unexpected reason: {reason}")
        }
        other => panic!("expected RequestFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_request_status_is_failure_with_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°. Given: 951.1."
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch(951.1, 17.03).await.unwrap_err();

    assert!(matches!(err, WeatherError::RequestFailure(_)));
    let msg = err.to_string();
    assert!(msg.contains("400"));
    assert!(msg.contains("Latitude must be in range"));
}

#[tokio::test]
async fn server_error_without_json_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch(51.1, 17.03).await.unwrap_err();

    assert!(err.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn malformed_payload_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 51.1
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch(51.1, 17.03).await.unwrap_err();

    assert!(matches!(err, WeatherError::RequestFailure(_)));
}

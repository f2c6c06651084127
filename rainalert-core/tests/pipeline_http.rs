//! End-to-end pipeline runs against mocked geocoding and forecast services.

use std::{io::Write, time::Duration};

use rainalert_core::{
    Config, Pipeline, Thresholds, WeatherError,
    provider::{forecast_client_from_config, geocoder_from_config},
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE: &str = include_str!("fixtures/forecast_sample.json");

async fn mock_geocoder(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "51.1", "lon": "17.03", "display_name": "Wrocław, Poland"}
        ])))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.endpoints.forecast_url = server.uri();
    cfg.endpoints.geocoder_url = server.uri();
    cfg.hours = 9;
    cfg
}

fn pipeline(cfg: &Config) -> Pipeline {
    Pipeline::new(
        geocoder_from_config(cfg).unwrap(),
        forecast_client_from_config(cfg).unwrap(),
    )
    .with_timeout(cfg.timeout())
    .with_horizon(cfg.hours)
}

#[tokio::test]
async fn run_produces_ordered_matches() {
    let server = MockServer::start().await;
    mock_geocoder(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
        .mount(&server)
        .await;

    let cfg = config_for(&server);
    let report = pipeline(&cfg)
        .run("wroclaw", &Thresholds::new(6.0, 0.2))
        .await
        .unwrap();

    assert_eq!(report.location.address, "Wrocław, Poland");
    assert_eq!(report.units.temperature, "°C");
    let stamps: Vec<&str> = report.matches.iter().map(|m| m.timestamp.as_str()).collect();
    let mut sorted = stamps.clone();
    sorted.sort();
    assert_eq!(stamps, sorted);
    assert_eq!(stamps.len(), 6);
}

#[tokio::test]
async fn slow_forecast_times_out() {
    let server = MockServer::start().await;
    mock_geocoder(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let cfg = config_for(&server);
    let err = pipeline(&cfg)
        .with_timeout(Duration::from_millis(100))
        .run("wroclaw", &Thresholds::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Timeout(_)));
}

#[tokio::test]
async fn stalled_geocoder_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(60)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = config_for(&server);
    let pipe = pipeline(&cfg).with_timeout(Duration::from_millis(100));
    let thresholds = Thresholds::default();
    let run = pipe.run("wroclaw", &thresholds);

    let err = tokio::time::timeout(Duration::from_secs(3), run)
        .await
        .expect("run must give up well before the outer bound")
        .unwrap_err();

    assert!(matches!(err, WeatherError::GeocodeFailure { .. }));
}

#[tokio::test]
async fn unknown_city_never_reaches_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = config_for(&server);
    let err = pipeline(&cfg)
        .run("atlantis", &Thresholds::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::GeocodeFailure { .. }));
}

#[test]
fn config_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
city = "gdansk"
temperature_max = 10.5
hours = 48

[endpoints]
user_agent = "custom-agent/1.0"
"#
    )
    .unwrap();

    let cfg = Config::load_from(file.path()).unwrap();

    assert_eq!(cfg.city, "gdansk");
    assert_eq!(cfg.thresholds(), Thresholds::new(10.5, 0.0));
    assert_eq!(cfg.hours, 48);
    assert_eq!(cfg.timeout(), Duration::from_secs(5));
    assert_eq!(cfg.endpoints.user_agent, "custom-agent/1.0");
}

#[test]
fn malformed_config_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "hours = \"many\"").unwrap();

    let err = Config::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

//! Provider tests against mock HTTP servers.

use std::time::Duration;

use cep_weather_core::{
    AddressProvider, Config, LookupError, TemperatureError, TemperatureService, WeatherProvider,
    provider::{ViaCepProvider, WeatherApiProvider},
};
use reqwest::Client;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn viacep_body(locality: &str) -> serde_json::Value {
    serde_json::json!({
        "cep": "01001-000",
        "logradouro": "Praça da Sé",
        "complemento": "lado ímpar",
        "bairro": "Sé",
        "localidade": locality,
        "uf": "SP"
    })
}

fn weather_body(temp_c: f64) -> serde_json::Value {
    serde_json::json!({
        "location": { "name": "Sao Paulo", "country": "Brazil" },
        "current": { "temp_c": temp_c, "condition": { "text": "Partly cloudy" } }
    })
}

fn weather_rejection() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "error": { "code": 1006, "message": "No matching location found." }
    }))
}

fn weather_provider(server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::new("TEST_KEY".into(), format!("{}/v1", server.uri()), Client::new())
}

#[tokio::test]
async fn viacep_resolves_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body("São Paulo")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ViaCepProvider::new(format!("{}/ws", server.uri()), Client::new());
    let address = provider.resolve_address("01001000").await.unwrap();

    assert_eq!(address.locality(), "São Paulo");
    assert_eq!(address.state(), "SP");
    assert_eq!(address.neighborhood(), "Sé");
}

#[tokio::test]
async fn viacep_error_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/87654321/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": "true" })))
        .mount(&server)
        .await;

    let provider = ViaCepProvider::new(format!("{}/ws", server.uri()), Client::new());
    let err = provider.resolve_address("87654321").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound(code) if code == "87654321"));
}

#[tokio::test]
async fn viacep_garbage_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<html>Bad Request</html>"))
        .mount(&server)
        .await;

    let provider = ViaCepProvider::new(format!("{}/ws", server.uri()), Client::new());
    let err = provider.resolve_address("00000000").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound(_)));
}

#[tokio::test]
async fn viacep_unreachable_is_network_error() {
    // Nothing listens on port 9 (discard) on test hosts.
    let provider = ViaCepProvider::new("http://127.0.0.1:9/ws", Client::new());
    let err = provider.resolve_address("01001000").await.unwrap_err();

    assert!(matches!(err, LookupError::Network(_)));
}

#[tokio::test]
async fn weather_network_error_does_not_expose_api_key() {
    let provider =
        WeatherApiProvider::new("SECRET_KEY_123".into(), "http://127.0.0.1:9/v1", Client::new());
    let err = provider.resolve_temperature("Recife").await.unwrap_err();

    assert!(matches!(err, LookupError::Network(_)));
    let msg = err.to_string();
    assert!(!msg.contains("SECRET_KEY_123"), "key leaked: {msg}");
    assert!(!msg.contains("current.json"), "url leaked: {msg}");
}

#[tokio::test]
async fn weather_uses_verbatim_locality_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("q", "São Paulo"))
        .and(query_param("aqi", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(22.0)))
        .expect(1)
        .mount(&server)
        .await;

    let temp = weather_provider(&server).resolve_temperature("São Paulo").await.unwrap();
    assert_eq!(temp, 22.0);
}

#[tokio::test]
async fn weather_falls_back_to_folded_locality_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "São Paulo"))
        .respond_with(weather_rejection())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "Sao Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(18.5)))
        .expect(1)
        .mount(&server)
        .await;

    let temp = weather_provider(&server).resolve_temperature("São Paulo").await.unwrap();
    assert_eq!(temp, 18.5);
}

#[tokio::test]
async fn weather_gives_up_after_folded_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "São Paulo"))
        .respond_with(weather_rejection())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "Sao Paulo"))
        .respond_with(weather_rejection())
        .expect(1)
        .mount(&server)
        .await;

    let err = weather_provider(&server).resolve_temperature("São Paulo").await.unwrap_err();
    assert!(matches!(err, LookupError::Upstream(msg) if msg.contains("400")));
}

#[tokio::test]
async fn weather_retries_once_even_without_accents() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "Curitiba"))
        .respond_with(weather_rejection())
        .expect(2)
        .mount(&server)
        .await;

    let err = weather_provider(&server).resolve_temperature("Curitiba").await.unwrap_err();
    assert!(matches!(err, LookupError::Upstream(_)));
}

#[tokio::test]
async fn weather_payload_without_temperature_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "current": { "temp_c": null } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = weather_provider(&server).resolve_temperature("Recife").await.unwrap_err();
    assert!(matches!(err, LookupError::Upstream(_)));
}

#[tokio::test]
async fn weather_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(weather_body(30.0))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let http = Client::builder().timeout(Duration::from_millis(200)).build().unwrap();
    let provider = WeatherApiProvider::new("TEST_KEY".into(), format!("{}/v1", server.uri()), http);

    let err = provider.resolve_temperature("Salvador").await.unwrap_err();
    assert!(matches!(err, LookupError::Network(msg) if msg.contains("timed out")));
}

#[tokio::test]
async fn service_from_config_runs_whole_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/12345678/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body("São Paulo")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(22.0)))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        weather_api_key: Some("TEST_KEY".into()),
        address_base_url: format!("{}/ws", server.uri()),
        weather_base_url: format!("{}/v1", server.uri()),
        request_timeout_secs: 2,
    };

    let service = TemperatureService::from_config(&config).unwrap();
    let reading = service.temperature_for("12345678").await.unwrap();

    assert_eq!(reading.celsius, 22.0);
    assert_eq!(reading.fahrenheit, 71.6);
    assert_eq!(reading.kelvin, 295.15);
}

#[tokio::test]
async fn service_reports_weather_step_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/12345678/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body("São Paulo")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(weather_rejection())
        .expect(2)
        .mount(&server)
        .await;

    let config = Config {
        weather_api_key: Some("TEST_KEY".into()),
        address_base_url: format!("{}/ws", server.uri()),
        weather_base_url: format!("{}/v1", server.uri()),
        request_timeout_secs: 2,
    };

    let service = TemperatureService::from_config(&config).unwrap();
    let err = service.temperature_for("12345678").await.unwrap_err();

    assert!(matches!(err, TemperatureError::Weather(_)));
}

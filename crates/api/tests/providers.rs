//! Provider adapter tests against a local mock server.
//!
//! Each test mounts recorded provider payloads on a `wiremock` server
//! and asserts the adapter's mapping and not-found/failure handling.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cep_clima_api::providers::{
    BrasilApiClient, CepProvider, OpenMeteoClient, ProviderError, ViaCepClient, WeatherProvider,
};
use cep_clima_core::{CepProviderId, ZipCode};

fn zip() -> ZipCode {
    ZipCode::parse("01001000").unwrap()
}

// =============================================================================
// BrasilAPI
// =============================================================================

#[tokio::test]
async fn brasil_api_maps_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01001000",
            "state": "SP",
            "city": "São Paulo",
            "neighborhood": "Sé",
            "street": "Praça da Sé",
            "service": "open-cep",
            "location": {
                "type": "Point",
                "coordinates": {
                    "longitude": "-46.633",
                    "latitude": "-23.550"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BrasilApiClient::new(reqwest::Client::new(), server.uri());
    let result = client.lookup(&zip()).await.unwrap().unwrap();

    assert_eq!(result.zip_code.as_str(), "01001000");
    assert_eq!(result.street.as_deref(), Some("Praça da Sé"));
    assert_eq!(result.district.as_deref(), Some("Sé"));
    assert_eq!(result.city, "São Paulo");
    assert_eq!(result.state, "SP");
    assert_eq!(result.provider, CepProviderId::BrasilApi);

    let location = result.location.unwrap();
    assert!((location.latitude - (-23.550)).abs() < f64::EPSILON);
    assert!((location.longitude - (-46.633)).abs() < f64::EPSILON);
}

#[tokio::test]
async fn brasil_api_missing_coordinates_yields_no_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01001000",
            "state": "SP",
            "city": "São Paulo",
            "neighborhood": "Sé",
            "street": "Praça da Sé",
            "service": "viacep"
        })))
        .mount(&server)
        .await;

    let client = BrasilApiClient::new(reqwest::Client::new(), server.uri());
    let result = client.lookup(&zip()).await.unwrap().unwrap();
    assert!(result.location.is_none());
}

#[tokio::test]
async fn brasil_api_404_is_confirmed_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Todos os serviços de CEP retornaram erro.",
            "type": "service_error"
        })))
        .mount(&server)
        .await;

    let client = BrasilApiClient::new(reqwest::Client::new(), server.uri());
    assert!(client.lookup(&zip()).await.unwrap().is_none());
}

#[tokio::test]
async fn brasil_api_server_error_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = BrasilApiClient::new(reqwest::Client::new(), server.uri());
    let result = client.lookup(&zip()).await;
    assert!(matches!(
        result,
        Err(ProviderError::Status { status: 500, .. })
    ));
}

// =============================================================================
// ViaCEP
// =============================================================================

#[tokio::test]
async fn via_cep_maps_payload_without_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "gia": "1004",
            "ddd": "11",
            "siafi": "7107"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ViaCepClient::new(reqwest::Client::new(), server.uri());
    let result = client.lookup(&zip()).await.unwrap().unwrap();

    assert_eq!(result.street.as_deref(), Some("Praça da Sé"));
    assert_eq!(result.district.as_deref(), Some("Sé"));
    assert_eq!(result.city, "São Paulo");
    assert_eq!(result.state, "SP");
    assert_eq!(result.ibge.as_deref(), Some("3550308"));
    assert_eq!(result.provider, CepProviderId::ViaCep);
    // ViaCEP never supplies coordinates
    assert!(result.location.is_none());
}

#[tokio::test]
async fn via_cep_empty_strings_become_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01001-000",
            "logradouro": "",
            "bairro": "",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": ""
        })))
        .mount(&server)
        .await;

    let client = ViaCepClient::new(reqwest::Client::new(), server.uri());
    let result = client.lookup(&zip()).await.unwrap().unwrap();
    assert!(result.street.is_none());
    assert!(result.district.is_none());
    assert!(result.ibge.is_none());
}

#[tokio::test]
async fn via_cep_erro_payload_is_confirmed_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": true })))
        .mount(&server)
        .await;

    let client = ViaCepClient::new(reqwest::Client::new(), server.uri());
    assert!(client.lookup(&zip()).await.unwrap().is_none());
}

#[tokio::test]
async fn via_cep_erro_string_payload_is_confirmed_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": "true" })))
        .mount(&server)
        .await;

    let client = ViaCepClient::new(reqwest::Client::new(), server.uri());
    assert!(client.lookup(&zip()).await.unwrap().is_none());
}

#[tokio::test]
async fn via_cep_server_error_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01001000/json/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = ViaCepClient::new(reqwest::Client::new(), server.uri());
    let result = client.lookup(&zip()).await;
    assert!(matches!(
        result,
        Err(ProviderError::Status { status: 502, .. })
    ));
}

// =============================================================================
// Open-Meteo
// =============================================================================

#[tokio::test]
async fn open_meteo_forecast_builds_query_and_maps_sections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-23.55"))
        .and(query_param("longitude", "-46.63"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature",
        ))
        .and(query_param("daily", "temperature_2m_max,temperature_2m_min"))
        .and(query_param("timezone", "America/Sao_Paulo"))
        .and(query_param("forecast_days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": -23.55,
            "longitude": -46.63,
            "current": {
                "time": "2026-08-04T12:00",
                "interval": 900,
                "temperature_2m": 22.5,
                "relative_humidity_2m": 71,
                "apparent_temperature": 23.1
            },
            "daily": {
                "time": ["2026-08-04", "2026-08-05", "2026-08-06"],
                "temperature_2m_max": [25.0, 26.4, 24.8],
                "temperature_2m_min": [14.2, 15.0, 13.9]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(
        reqwest::Client::new(),
        format!("{}/v1/forecast", server.uri()),
        format!("{}/v1/search", server.uri()),
    );
    let forecast = client.forecast(-23.55, -46.63, 3).await.unwrap();

    let current = forecast.current.unwrap();
    assert!((current.temperature_c - 22.5).abs() < f64::EPSILON);
    assert!((current.relative_humidity_pct - 71.0).abs() < f64::EPSILON);
    assert_eq!(current.time, "2026-08-04T12:00");

    let daily = forecast.daily.unwrap();
    assert_eq!(daily.time.len(), 3);
    assert!((daily.temp_max_c.first().copied().unwrap() - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn open_meteo_forecast_tolerates_missing_sections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": -23.55,
            "longitude": -46.63
        })))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(
        reqwest::Client::new(),
        format!("{}/v1/forecast", server.uri()),
        format!("{}/v1/search", server.uri()),
    );
    let forecast = client.forecast(-23.55, -46.63, 3).await.unwrap();
    assert!(forecast.current.is_none());
    assert!(forecast.daily.is_none());
}

#[tokio::test]
async fn open_meteo_geocode_takes_first_ranked_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo, SP, Brazil"))
        .and(query_param("count", "1"))
        .and(query_param("language", "pt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 3448439, "name": "São Paulo", "latitude": -23.5475, "longitude": -46.63611, "country": "Brasil", "admin1": "São Paulo" }
            ],
            "generationtime_ms": 0.7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(
        reqwest::Client::new(),
        format!("{}/v1/forecast", server.uri()),
        format!("{}/v1/search", server.uri()),
    );
    let coordinates = client.geocode("São Paulo", "SP").await.unwrap().unwrap();
    assert!((coordinates.latitude - (-23.5475)).abs() < f64::EPSILON);
    assert!((coordinates.longitude - (-46.63611)).abs() < f64::EPSILON);
}

#[tokio::test]
async fn open_meteo_geocode_no_results_is_absent() {
    let server = MockServer::start().await;
    // Open-Meteo omits the results array entirely on no match
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generationtime_ms": 0.4
        })))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(
        reqwest::Client::new(),
        format!("{}/v1/forecast", server.uri()),
        format!("{}/v1/search", server.uri()),
    );
    assert!(client.geocode("Nowhere", "XX").await.unwrap().is_none());
}

#[tokio::test]
async fn open_meteo_server_error_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(
        reqwest::Client::new(),
        format!("{}/v1/forecast", server.uri()),
        format!("{}/v1/search", server.uri()),
    );
    let result = client.forecast(-23.55, -46.63, 3).await;
    assert!(matches!(
        result,
        Err(ProviderError::Status { status: 503, .. })
    ));
}

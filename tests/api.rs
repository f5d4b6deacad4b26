//! HTTP surface, driven through the router without binding a socket.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use surf_forecast_api::build_router;
use surf_forecast_api::routes::AppState;

use common::*;

fn app(server: &MockServer) -> Router {
    build_router(AppState {
        client: client_for(server),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, body) = get(app(&server), "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_places_returns_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Sylt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                place_json(1, "Westerland", 54.9079, 8.3033),
                place_json(2, "List", 55.0167, 8.4333)
            ]
        })))
        .mount(&server)
        .await;

    let (status, body) = get(app(&server), "/api/v1/places?q=Sylt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "Sylt");
    assert_eq!(body["results"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["results"][1]["name"], "List");
    assert_eq!(body["results"][1]["country_code"], "DE");
}

#[tokio::test]
async fn test_places_short_query_is_empty() {
    let server = MockServer::start().await;
    let (status, body) = get(app(&server), "/api/v1/places?q=K").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_places_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = get(app(&server), "/api/v1/places?q=Kiel").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Geocoding failed");
}

#[tokio::test]
async fn test_forecast_ok() {
    let server = MockServer::start().await;
    mount_weather(&server, "54.9", weather_body(7), Duration::ZERO).await;
    mount_marine(
        &server,
        "54.9",
        marine_body(&[0.5, 1.0, 2.0, 2.0, 1.5, 3.0, 0.2]),
        Duration::ZERO,
    )
    .await;

    let (status, body) = get(app(&server), "/api/v1/forecasts?latitude=54.9&longitude=8.3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timezone"], "Europe/Berlin");
    assert_eq!(body["forecast_available"], true);
    assert_eq!(body["days"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["best_day_index"], 2);
    assert_eq!(body["has_standout_day"], true);

    let best = &body["window"][2];
    assert_eq!(best["date"], "2024-07-03");
    assert_eq!(best["score"], 70);
    assert_eq!(best["label"], "Good");
    assert_eq!(best["tier"], "lime");
    assert_eq!(best["is_best"], true);
    assert_eq!(body["window"][0]["label"], "Poor");
}

#[tokio::test]
async fn test_forecast_without_standout_day() {
    let server = MockServer::start().await;
    mount_weather(&server, "54.9", weather_body(5), Duration::ZERO).await;
    // Every day scores 25
    mount_marine(&server, "54.9", marine_body(&[0.5; 5]), Duration::ZERO).await;

    let (status, body) = get(app(&server), "/api/v1/forecasts?latitude=54.9&longitude=8.3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_standout_day"], false);
    assert_eq!(body["best_day_index"], Value::Null);
    assert!(body["window"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["is_best"] == false));
}

#[tokio::test]
async fn test_forecast_rejects_out_of_range_latitude() {
    let server = MockServer::start().await;
    let (status, body) = get(app(&server), "/api/v1/forecasts?latitude=95&longitude=8.3").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "latitude must be between -90 and 90");
}

#[tokio::test]
async fn test_forecast_rejects_missing_longitude() {
    let server = MockServer::start().await;
    let (status, _) = get(app(&server), "/api/v1/forecasts?latitude=54.9").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forecast_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_weather(&server, "54.9", weather_body(7), Duration::ZERO).await;
    Mock::given(method("GET"))
        .and(path("/v1/marine"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, body) = get(app(&server), "/api/v1/forecasts?latitude=54.9&longitude=8.3").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Marine fetch failed");
}

#[tokio::test]
async fn test_openapi_document_lists_endpoints() {
    let server = MockServer::start().await;
    let (status, body) = get(app(&server), "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/health"].is_object());
    assert!(body["paths"]["/api/v1/places"].is_object());
    assert!(body["paths"]["/api/v1/forecasts"].is_object());
}

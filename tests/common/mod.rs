//! Shared fixtures: Open-Meteo-shaped JSON bodies and a mock upstream.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use surf_forecast_api::config::AppConfig;
use surf_forecast_api::services::open_meteo::OpenMeteoClient;

pub fn client_for(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::new(&AppConfig::with_upstream(&server.uri()))
}

pub fn dates(n: usize) -> Vec<String> {
    (1..=n).map(|d| format!("2024-07-{:02}", d)).collect()
}

/// A weather body with `n` days at constant 10 km/h max wind.
pub fn weather_body(n: usize) -> Value {
    json!({
        "latitude": 54.9,
        "longitude": 8.3,
        "timezone": "Europe/Berlin",
        "daily_units": { "wind_speed_10m_max": "km/h" },
        "daily": {
            "time": dates(n),
            "weather_code": vec![3; n],
            "temperature_2m_max": vec![19.5; n],
            "temperature_2m_min": vec![13.0; n],
            "precipitation_sum": vec![0.4; n],
            "wind_speed_10m_max": vec![10.0; n],
        },
        "hourly": {
            "time": ["2024-07-01T00:00", "2024-07-01T01:00"],
            "wind_speed_10m": [8.2, 9.1],
            "wind_gusts_10m": [14.0, null]
        }
    })
}

/// A marine body with swell heights `heights` at a constant 9 s period.
///
/// With [`weather_body`] each day scores `h*30 + 18 - 8`.
pub fn marine_body(heights: &[f64]) -> Value {
    json!({
        "latitude": 54.9,
        "longitude": 8.2,
        "timezone": "Europe/Berlin",
        "daily": {
            "time": dates(heights.len()),
            "swell_wave_height_max": heights,
            "swell_wave_period_max": vec![9.0; heights.len()],
            "wave_height_max": vec![Value::Null; heights.len()],
        },
        "hourly": {
            "time": ["2024-07-01T00:00"],
            "wave_height": [1.1],
            "wave_period": [8.5]
        }
    })
}

pub async fn mount_weather(server: &MockServer, lat: &str, body: Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", lat))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

pub async fn mount_marine(server: &MockServer, lat: &str, body: Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/v1/marine"))
        .and(query_param("latitude", lat))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

pub fn place_json(id: i64, name: &str, lat: f64, lon: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "latitude": lat,
        "longitude": lon,
        "country_code": "DE",
        "country": "Deutschland",
        "admin1": "Schleswig-Holstein",
        "timezone": "Europe/Berlin"
    })
}

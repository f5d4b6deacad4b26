//! Open-Meteo client: geocoding, weather forecast and marine forecast.
//!
//! See: https://open-meteo.com/en/docs, https://open-meteo.com/en/docs/marine-weather-api
//! and https://open-meteo.com/en/docs/geocoding-api

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Maximum number of places returned by a search.
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Queries shorter than this (after trimming) are not sent to geocoding.
pub const MIN_QUERY_CHARS: usize = 2;

/// How many hours of hourly data to request for the short-range chart.
const FORECAST_HOURS: u32 = 24;

const WEATHER_DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "uv_index_max",
    "precipitation_sum",
    "wind_speed_10m_max",
    "wind_gusts_10m_max",
    "wind_direction_10m_dominant",
];

const WEATHER_HOURLY_FIELDS: &[&str] = &["wind_speed_10m", "wind_gusts_10m"];

const MARINE_DAILY_FIELDS: &[&str] = &[
    "wave_height_max",
    "wave_period_max",
    "wave_direction_dominant",
    "swell_wave_height_max",
    "swell_wave_period_max",
    "swell_wave_direction_dominant",
    "wind_wave_height_max",
    "wind_wave_period_max",
];

const MARINE_HOURLY_FIELDS: &[&str] = &["wave_height", "wave_period"];

// --- Open-Meteo JSON types ---

/// A place returned by the geocoding API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPlace {
    pub id: i64,
    pub name: String,
    /// Latitude in decimal degrees (WGS84)
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS84)
    pub longitude: f64,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country: String,
    /// First-level administrative region (e.g. "Schleswig-Holstein")
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub admin3: Option<String>,
    pub timezone: Option<String>,
    pub population: Option<u64>,
}

impl GeoPlace {
    /// "Name, Region", or just the name when no region is known.
    pub fn display_name(&self) -> String {
        match self.admin1.as_deref() {
            Some(region) if !region.is_empty() => format!("{}, {}", self.name, region),
            _ => self.name.clone(),
        }
    }

    /// Coordinates rounded to three decimals, e.g. "54.910, 8.313".
    pub fn coordinates_label(&self) -> String {
        format!("{:.3}, {:.3}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeoPlace>>,
}

/// Daily weather series; every array is parallel to `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyWeather {
    /// Calendar dates (YYYY-MM-DD), authoritative day axis
    #[serde(default)]
    pub time: Vec<String>,
    /// WMO weather interpretation code
    pub weather_code: Option<Vec<Option<i32>>>,
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    pub precipitation_sum: Option<Vec<Option<f64>>>,
    pub uv_index_max: Option<Vec<Option<f64>>>,
    /// Maximum wind speed in km/h
    pub wind_speed_10m_max: Option<Vec<Option<f64>>>,
    pub wind_gusts_10m_max: Option<Vec<Option<f64>>>,
    pub wind_direction_10m_dominant: Option<Vec<Option<f64>>>,
}

/// Hourly weather series for the next 24 hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourlyWeather {
    #[serde(default)]
    pub time: Vec<String>,
    pub wind_speed_10m: Option<Vec<Option<f64>>>,
    pub wind_gusts_10m: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherResponse {
    #[serde(default)]
    pub timezone: String,
    pub daily_units: Option<HashMap<String, String>>,
    pub daily: Option<DailyWeather>,
    pub hourly: Option<HourlyWeather>,
}

/// Daily marine series. Swell, wind-wave and combined variants of the same
/// quantity are reported separately and any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyMarine {
    #[serde(default)]
    pub time: Vec<String>,
    /// Combined significant wave height maximum in metres
    pub wave_height_max: Option<Vec<Option<f64>>>,
    /// Combined wave period maximum in seconds
    pub wave_period_max: Option<Vec<Option<f64>>>,
    pub wave_direction_dominant: Option<Vec<Option<f64>>>,
    pub swell_wave_height_max: Option<Vec<Option<f64>>>,
    pub swell_wave_period_max: Option<Vec<Option<f64>>>,
    pub swell_wave_direction_dominant: Option<Vec<Option<f64>>>,
    pub wind_wave_height_max: Option<Vec<Option<f64>>>,
    pub wind_wave_period_max: Option<Vec<Option<f64>>>,
}

/// Hourly marine series for the next 24 hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourlyMarine {
    #[serde(default)]
    pub time: Vec<String>,
    pub wave_height: Option<Vec<Option<f64>>>,
    pub wave_period: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarineResponse {
    #[serde(default)]
    pub timezone: String,
    pub daily_units: Option<HashMap<String, String>>,
    /// Absent for inland coordinates without a sea cell
    pub daily: Option<DailyMarine>,
    pub hourly: Option<HourlyMarine>,
}

/// Client for the Open-Meteo geocoding, forecast and marine APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
    marine_url: String,
    timezone: String,
    country_code: String,
    language: String,
}

impl OpenMeteoClient {
    pub fn new(config: &AppConfig) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, value);
        } else {
            tracing::warn!("Ignoring invalid User-Agent '{}'", config.user_agent);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            marine_url: config.marine_url.clone(),
            timezone: config.timezone.clone(),
            country_code: config.country_code.clone(),
            language: config.language.clone(),
        }
    }

    /// Search places by name, restricted to the configured country.
    ///
    /// Queries shorter than [`MIN_QUERY_CHARS`] return an empty list without
    /// contacting the API. A response without `results` means no match.
    pub async fn search_places(&self, query: &str) -> Result<Vec<GeoPlace>, AppError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/search", self.geocoding_url);
        let count = SEARCH_RESULT_LIMIT.to_string();
        let params = [
            ("name", query),
            ("count", count.as_str()),
            ("language", self.language.as_str()),
            ("countryCode", self.country_code.as_str()),
        ];

        let response: GeocodingResponse = self.get_json(&url, &params, "Geocoding failed").await?;
        let mut places = response.results.unwrap_or_default();
        places.truncate(SEARCH_RESULT_LIMIT);

        tracing::debug!("Geocoding '{}' returned {} places", query, places.len());
        Ok(places)
    }

    /// Fetch the daily weather series plus 24 hours of hourly wind.
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherResponse, AppError> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let daily = WEATHER_DAILY_FIELDS.join(",");
        let hourly = WEATHER_HOURLY_FIELDS.join(",");
        let hours = FORECAST_HOURS.to_string();
        let params = [
            ("latitude", lat.as_str()),
            ("longitude", lon.as_str()),
            ("timezone", self.timezone.as_str()),
            ("daily", daily.as_str()),
            ("hourly", hourly.as_str()),
            ("forecast_hours", hours.as_str()),
            ("wind_speed_unit", "kmh"),
        ];

        self.get_json(&url, &params, "Weather fetch failed").await
    }

    /// Fetch the daily marine series plus 24 hours of hourly waves.
    ///
    /// `cell_selection=sea` makes coastal points snap to the nearest sea cell;
    /// far inland the response simply carries no `daily` block.
    pub async fn fetch_marine(&self, lat: f64, lon: f64) -> Result<MarineResponse, AppError> {
        let url = format!("{}/v1/marine", self.marine_url);
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let daily = MARINE_DAILY_FIELDS.join(",");
        let hourly = MARINE_HOURLY_FIELDS.join(",");
        let hours = FORECAST_HOURS.to_string();
        let params = [
            ("latitude", lat.as_str()),
            ("longitude", lon.as_str()),
            ("timezone", self.timezone.as_str()),
            ("length_unit", "metric"),
            ("forecast_hours", hours.as_str()),
            ("cell_selection", "sea"),
            ("daily", daily.as_str()),
            ("hourly", hourly.as_str()),
        ];

        self.get_json(&url, &params, "Marine fetch failed").await
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Transport errors, non-success statuses and undecodable bodies all map
    /// to the same generic `failure` message; details only go to the log.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
        failure: &str,
    ) -> Result<T, AppError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", url, e);
                AppError::ExternalServiceError(failure.to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!("{} returned HTTP {}", url, response.status());
            return Err(AppError::ExternalServiceError(failure.to_string()));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!("{} JSON parse error: {}", url, e);
            AppError::ExternalServiceError(failure.to_string())
        })
    }
}

//! Surf forecast assembly.
//!
//! Fetches the weather and marine series for a location concurrently, then
//! runs the normalize → score → best-day pipeline over them. Either fetch
//! failing fails the whole forecast; no partial day records are produced.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::services::days::{
    build_display_window, normalize_days, DayRecord, DisplayDay, DISPLAY_DAYS,
};
use crate::services::open_meteo::{
    HourlyMarine, HourlyWeather, MarineResponse, OpenMeteoClient, WeatherResponse,
};

/// Raw hourly series for the 24-hour chart, passed through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct HourlySeries {
    pub weather: Option<HourlyWeather>,
    pub marine: Option<HourlyMarine>,
}

/// Derived forecast for one location.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SurfForecast {
    /// Timezone the daily series are aligned to (from the weather response)
    pub timezone: String,
    /// When the weather/marine pair was received
    pub fetched_at: DateTime<Utc>,
    /// False when the weather series has no days (e.g. no daily data)
    pub forecast_available: bool,
    /// Every day in the weather series, in date order
    pub days: Vec<DayRecord>,
    /// The first few days, annotated for display
    pub window: Vec<DisplayDay>,
    /// Index into `window` of the best day, if any cleared the threshold
    pub best_day_index: Option<usize>,
    /// Whether any day in the window earned the "best day" badge
    pub has_standout_day: bool,
    pub hourly: HourlySeries,
}

/// Build a forecast from an already fetched weather/marine pair.
///
/// Pure: the whole derived sequence is recomputed from the two responses.
pub fn build_surf_forecast(
    weather: WeatherResponse,
    marine: MarineResponse,
    fetched_at: DateTime<Utc>,
) -> SurfForecast {
    let days = normalize_days(weather.daily.as_ref(), marine.daily.as_ref());
    let window = build_display_window(&days, DISPLAY_DAYS);
    let best_day_index = window.iter().position(|d| d.is_best);

    if marine.daily.is_none() {
        tracing::debug!("No marine daily series; all {} days unscored", days.len());
    }

    SurfForecast {
        timezone: weather.timezone,
        fetched_at,
        forecast_available: !days.is_empty(),
        days,
        window,
        best_day_index,
        has_standout_day: best_day_index.is_some(),
        hourly: HourlySeries {
            weather: weather.hourly,
            marine: marine.hourly,
        },
    }
}

/// Fetch weather and marine data for a location and build its forecast.
///
/// Both requests run concurrently and are jointly awaited.
pub async fn fetch_surf_forecast(
    client: &OpenMeteoClient,
    lat: f64,
    lon: f64,
) -> Result<SurfForecast, AppError> {
    let (weather, marine) = futures::future::try_join(
        client.fetch_weather(lat, lon),
        client.fetch_marine(lat, lon),
    )
    .await?;

    let forecast = build_surf_forecast(weather, marine, Utc::now());

    tracing::info!(
        "Forecast for ({:.3}, {:.3}): {} days, best day {:?}",
        lat,
        lon,
        forecast.days.len(),
        forecast.best_day_index
    );

    Ok(forecast)
}

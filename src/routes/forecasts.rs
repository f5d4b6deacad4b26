//! Forecast HTTP endpoint.
//!
//! - GET /api/v1/forecasts?latitude=..&longitude=..

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::{AppError, ErrorResponse};
use crate::routes::AppState;
use crate::services::forecast::{fetch_surf_forecast, SurfForecast};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ForecastQuery {
    /// Latitude in decimal degrees (-90..=90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180..=180)
    pub longitude: f64,
}

/// Reject coordinates that cannot name a point on Earth.
///
/// `is_finite()` goes first because NaN passes range comparisons.
fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(AppError::BadRequest(
            "latitude and longitude must be finite numbers".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::BadRequest(
            "latitude must be between -90 and 90".to_string(),
        ));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::BadRequest(
            "longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}

/// Get the surf forecast for a location.
///
/// Fetches weather and marine data concurrently, merges them into one record
/// per day, scores every day and marks the best day within the first five.
/// If either upstream fails the whole request fails; no partial days are
/// returned.
#[utoipa::path(
    get,
    path = "/api/v1/forecasts",
    tag = "Forecasts",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Surf forecast for the location", body = SurfForecast),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse),
        (status = 502, description = "Weather or marine upstream failed", body = ErrorResponse),
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<SurfForecast>, AppError> {
    validate_coordinates(params.latitude, params.longitude)?;

    let forecast = fetch_surf_forecast(&state.client, params.latitude, params.longitude).await?;
    Ok(Json(forecast))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates_ok() {
        assert!(validate_coordinates(54.9, 8.3).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates_nan() {
        assert!(matches!(
            validate_coordinates(f64::NAN, 8.3),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_coordinates_out_of_range() {
        assert!(validate_coordinates(91.0, 8.3).is_err());
        assert!(validate_coordinates(54.0, -180.5).is_err());
    }
}

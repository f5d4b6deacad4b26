//! Place search endpoint.
//!
//! GET /api/v1/places?q=text

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, ErrorResponse};
use crate::routes::AppState;
use crate::services::open_meteo::GeoPlace;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PlaceQuery {
    /// Free-text place name; fewer than 2 characters returns no results
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceSearchResponse {
    /// The query as received
    pub query: String,
    /// Up to 8 matching places; empty when nothing matched
    pub results: Vec<GeoPlace>,
}

/// Search places in the configured country by name.
#[utoipa::path(
    get,
    path = "/api/v1/places",
    tag = "Places",
    params(PlaceQuery),
    responses(
        (status = 200, description = "Matching places (possibly empty)", body = PlaceSearchResponse),
        (status = 502, description = "Geocoding upstream failed", body = ErrorResponse),
    )
)]
pub async fn search_places(
    State(state): State<AppState>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<PlaceSearchResponse>, AppError> {
    let results = state.client.search_places(&params.q).await?;

    Ok(Json(PlaceSearchResponse {
        query: params.q,
        results,
    }))
}

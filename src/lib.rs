// Surf Forecast API v0.1
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod errors;
mod helpers;
pub mod routes;
pub mod services;

use routes::AppState;

/// Surf Forecast API: OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Surf Forecast API",
        version = "0.1.0",
        description = "Surf forecasts for places in Germany. Looks up places via \
            Open-Meteo geocoding, merges Open-Meteo weather and marine forecasts \
            into one record per day, derives a 0-100 surf score and marks the \
            best of the next five days.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Places", description = "Place search"),
        (name = "Forecasts", description = "Daily surf forecasts"),
    ),
    paths(
        routes::health::health_check,
        routes::places::search_places,
        routes::forecasts::get_forecast,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::places::PlaceSearchResponse,
            services::open_meteo::GeoPlace,
            services::open_meteo::HourlyWeather,
            services::open_meteo::HourlyMarine,
            services::days::DayRecord,
            services::days::DisplayDay,
            services::surf::ScoreLabel,
            services::surf::ScoreTier,
            services::forecast::HourlySeries,
            services::forecast::SurfForecast,
            errors::ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    // Read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/v1/places", get(routes::places::search_places))
        .route("/api/v1/forecasts", get(routes::forecasts::get_forecast))
        .with_state(state);

    let health_routes = Router::new().route("/api/v1/health", get(routes::health::health_check));

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

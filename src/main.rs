// Surf Forecast API v0.1
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use surf_forecast_api::build_router;
use surf_forecast_api::config::AppConfig;
use surf_forecast_api::routes::AppState;
use surf_forecast_api::services::open_meteo::OpenMeteoClient;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surf_forecast_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    tracing::info!(
        "Upstreams: geocoding={} forecast={} marine={} (timezone {}, country {})",
        config.geocoding_url,
        config.forecast_url,
        config.marine_url,
        config.timezone,
        config.country_code,
    );

    let app = build_router(AppState {
        client: OpenMeteoClient::new(&config),
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}

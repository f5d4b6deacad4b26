pub mod forecasts;
pub mod health;
pub mod places;

use crate::services::open_meteo::OpenMeteoClient;

/// Shared application state for the place and forecast endpoints.
#[derive(Clone)]
pub struct AppState {
    pub client: OpenMeteoClient,
}

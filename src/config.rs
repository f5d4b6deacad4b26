/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Base URL of the Open-Meteo geocoding API (no trailing path).
    pub geocoding_url: String,
    /// Base URL of the Open-Meteo weather forecast API.
    pub forecast_url: String,
    /// Base URL of the Open-Meteo marine API.
    pub marine_url: String,
    /// IANA timezone the daily series are aligned to.
    pub timezone: String,
    /// ISO country code place search is restricted to.
    pub country_code: String,
    /// Language of place names returned by geocoding.
    pub language: String,
    pub user_agent: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            geocoding_url: env_or("GEOCODING_API_URL", "https://geocoding-api.open-meteo.com"),
            forecast_url: env_or("FORECAST_API_URL", "https://api.open-meteo.com"),
            marine_url: env_or("MARINE_API_URL", "https://marine-api.open-meteo.com"),
            timezone: env_or("FORECAST_TIMEZONE", "Europe/Berlin"),
            country_code: env_or("SEARCH_COUNTRY_CODE", "DE"),
            language: env_or("SEARCH_LANGUAGE", "de"),
            user_agent: env_or(
                "HTTP_USER_AGENT",
                concat!("SurfForecast/", env!("CARGO_PKG_VERSION")),
            ),
        }
    }

    /// Configuration with every upstream pointed at a single base URL.
    ///
    /// Used to run the service against a local mock of the Open-Meteo APIs.
    pub fn with_upstream(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            port: 0,
            geocoding_url: base.clone(),
            forecast_url: base.clone(),
            marine_url: base,
            timezone: "Europe/Berlin".to_string(),
            country_code: "DE".to_string(),
            language: "de".to_string(),
            user_agent: concat!("SurfForecast/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| default.to_string())
}

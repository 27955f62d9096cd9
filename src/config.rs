use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub geocoder_url: String,
    /// Quiescence window for origin-driven refetches (marker drags, swaps)
    pub origin_debounce_ms: u32,
    /// Quiescence window for geocode search queries
    pub search_debounce_ms: u32,
    /// Queries shorter than this never reach the geocoder
    pub min_query_chars: usize,
    pub nearby_radius_m: f64,
    pub alert_poll_interval_ms: u32,
    /// Minimum time the "refreshing" indicator stays visible
    pub min_refresh_visible_ms: u32,
    pub search_bounds: SearchBounds,
}

/// Bounding box that geocode candidates must fall inside
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl SearchBounds {
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.lng >= self.min_lng
            && coord.lng <= self.max_lng
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            geocoder_url: "https://photon.komoot.io".to_string(),
            origin_debounce_ms: 400,
            search_debounce_ms: 300,
            min_query_chars: 3,
            nearby_radius_m: 900.0,
            alert_poll_interval_ms: 30_000,
            min_refresh_visible_ms: 400,
            search_bounds: SearchBounds {
                min_lat: -37.10,
                max_lat: -36.50,
                min_lng: 174.40,
                max_lng: 175.10,
            },
        }
    }
}

impl AppConfig {
    /// Loads the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .unwrap_or("http://localhost:8000").to_string(),
            geocoder_url: option_env!("GEOCODER_URL")
                .unwrap_or("https://photon.komoot.io").to_string(),
            origin_debounce_ms: option_env!("ORIGIN_DEBOUNCE_MS")
                .unwrap_or("400").parse().unwrap_or(defaults.origin_debounce_ms),
            search_debounce_ms: option_env!("SEARCH_DEBOUNCE_MS")
                .unwrap_or("300").parse().unwrap_or(defaults.search_debounce_ms),
            min_query_chars: option_env!("MIN_QUERY_CHARS")
                .unwrap_or("3").parse().unwrap_or(defaults.min_query_chars),
            nearby_radius_m: option_env!("NEARBY_RADIUS_M")
                .unwrap_or("900").parse().unwrap_or(defaults.nearby_radius_m),
            alert_poll_interval_ms: option_env!("ALERT_POLL_INTERVAL_MS")
                .unwrap_or("30000").parse().unwrap_or(defaults.alert_poll_interval_ms),
            min_refresh_visible_ms: option_env!("MIN_REFRESH_VISIBLE_MS")
                .unwrap_or("400").parse().unwrap_or(defaults.min_refresh_visible_ms),
            search_bounds: SearchBounds {
                min_lat: option_env!("SEARCH_MIN_LAT")
                    .unwrap_or("-37.10").parse().unwrap_or(defaults.search_bounds.min_lat),
                max_lat: option_env!("SEARCH_MAX_LAT")
                    .unwrap_or("-36.50").parse().unwrap_or(defaults.search_bounds.max_lat),
                min_lng: option_env!("SEARCH_MIN_LNG")
                    .unwrap_or("174.40").parse().unwrap_or(defaults.search_bounds.min_lng),
                max_lng: option_env!("SEARCH_MAX_LNG")
                    .unwrap_or("175.10").parse().unwrap_or(defaults.search_bounds.max_lng),
            },
        }
    }
}

// Global static configuration
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

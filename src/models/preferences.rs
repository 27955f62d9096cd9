use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Bus,
    Train,
    Ferry,
    Walk,
    Bike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimize {
    Fastest,
    FewestTransfers,
    LeastWalking,
    Reliable,
}

/// Traveler options sent with every planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPreferences {
    pub modes: Vec<TravelMode>,
    pub optimize: Optimize,
    pub max_walk_km: f64,
    pub avoid_stairs: bool,
    pub bike_ok: bool,
    /// "now" or an ISO-ish local timestamp like "2025-11-03T09:00"
    pub depart_at: Option<String>,
    pub arrive_by: Option<String>,
}

impl Default for TravelPreferences {
    fn default() -> Self {
        Self {
            modes: vec![TravelMode::Bus, TravelMode::Train, TravelMode::Walk],
            optimize: Optimize::Fastest,
            max_walk_km: 1.2,
            avoid_stairs: false,
            bike_ok: false,
            depart_at: Some("now".to_string()),
            arrive_by: None,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::models::preferences::TravelPreferences;
use crate::models::transit::Alert;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: String,
    #[serde(rename = "durationMin", default)]
    pub duration_min: f64,
    #[serde(default)]
    pub transfers: u32,
    #[serde(default)]
    pub legs: Vec<String>,
    #[serde(default)]
    pub reliability: f64,
    #[serde(default)]
    pub walk_km: f64,
    #[serde(default)]
    pub modes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRequest {
    pub origin: [f64; 2],
    pub destination: [f64; 2],
    pub depart_at: Option<String>,
    pub arrive_by: Option<String>,
    pub optimize: crate::models::Optimize,
    pub max_walk_km: f64,
    pub avoid_stairs: bool,
    pub bike_ok: bool,
    pub modes: Vec<crate::models::TravelMode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct PlanContext {
    #[serde(rename = "weatherAlert", default)]
    pub weather_alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanResponse {
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub context: PlanContext,
}

/// `POST /routes/suggest`: baseline itinerary plus the live context the
/// backend should route around
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestRequest {
    pub baseline: Itinerary,
    pub incidents: Vec<Alert>,
    pub preferences: TravelPreferences,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub itinerary: Option<Itinerary>,
    #[serde(default)]
    pub error: Option<String>,
}

/// How an alternative stacks up against its baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteComparison {
    pub time_delta_min: f64,
    pub transfer_delta: i32,
    pub walk_delta_km: f64,
}

impl RouteComparison {
    pub fn between(baseline: &Itinerary, alternative: &Itinerary) -> Self {
        Self {
            time_delta_min: alternative.duration_min - baseline.duration_min,
            transfer_delta: alternative.transfers as i32 - baseline.transfers as i32,
            walk_delta_km: alternative.walk_km - baseline.walk_km,
        }
    }
}

/// Comparison entry, keyed in the store by `baseline.id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryAlternative {
    pub baseline: Itinerary,
    pub alternative: Itinerary,
    pub comparison: RouteComparison,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itinerary(id: &str, duration_min: f64, transfers: u32, walk_km: f64) -> Itinerary {
        Itinerary {
            id: id.to_string(),
            duration_min,
            transfers,
            legs: vec![],
            reliability: 0.8,
            walk_km,
            modes: vec![],
        }
    }

    #[test]
    fn comparison_deltas_are_alternative_minus_baseline() {
        let baseline = itinerary("A", 22.0, 0, 0.8);
        let alternative = itinerary("A-alt", 28.0, 1, 0.3);
        let cmp = RouteComparison::between(&baseline, &alternative);
        assert_eq!(cmp.time_delta_min, 6.0);
        assert_eq!(cmp.transfer_delta, 1);
        assert!((cmp.walk_delta_km + 0.5).abs() < 1e-9);
    }

    #[test]
    fn plan_response_defaults_missing_context() {
        let resp: PlanResponse =
            serde_json::from_str(r#"{"itineraries":[{"id":"A","durationMin":22,"transfers":0,"legs":["Bus NX1","Walk"]}]}"#)
                .unwrap();
        assert_eq!(resp.itineraries.len(), 1);
        assert_eq!(resp.itineraries[0].duration_min, 22.0);
        assert!(resp.context.weather_alert.is_none());
    }
}

use serde::{Deserialize, Serialize};

/// Transit stop near the current origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: String,
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub distance_m: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyStopsResponse {
    #[serde(default)]
    pub stops: Vec<Stop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    #[serde(default)]
    pub condition: String,
    #[serde(rename = "tempC", default)]
    pub temp_c: f64,
    #[serde(rename = "windKph", default)]
    pub wind_kph: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub forecast: Option<WeatherPoint>,
}

/// Service alert or traffic incident. The backend mixes both shapes, so every
/// field defaults; `headline()` picks whatever is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

impl Alert {
    pub fn headline(&self) -> &str {
        self.title
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or(&self.id)
    }
}

/// `GET /alerts` returns service alerts and traffic incidents side by side
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlertFeed {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub traffic: Vec<Alert>,
}

impl AlertFeed {
    /// Single list the UI renders: service alerts first, then traffic
    pub fn merged(self) -> Vec<Alert> {
        let mut merged = self.alerts;
        merged.extend(self.traffic);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_feed_defaults_missing_arrays() {
        let feed: AlertFeed = serde_json::from_str("{}").unwrap();
        assert!(feed.merged().is_empty());
    }

    #[test]
    fn alert_headline_falls_back_to_summary_then_id() {
        let a: Alert = serde_json::from_str(
            r#"{"id":"INC-1","type":"Congestion","summary":"Heavy traffic near Harbour Bridge","severity":"moderate"}"#,
        )
        .unwrap();
        assert_eq!(a.headline(), "Heavy traffic near Harbour Bridge");

        let bare: Alert = serde_json::from_str(r#"{"id":"INC-2"}"#).unwrap();
        assert_eq!(bare.headline(), "INC-2");
    }
}

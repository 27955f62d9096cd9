// ============================================================================
// GEOCODER CLIENT - Third-party forward/reverse geocoding (Photon-style API)
// ============================================================================

use gloo_net::http::Request;
use serde::Deserialize;

use crate::config::CONFIG;
use crate::models::{CandidateKind, Coordinate, GeocodeCandidate};
use crate::services::api::GeocodeApi;
use crate::services::error::ApiError;

#[derive(Clone)]
pub struct GeocoderClient {
    base_url: String,
}

impl GeocoderClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.geocoder_url.clone(),
        }
    }

    async fn fetch_features(&self, url: String) -> Result<Vec<Feature>, ApiError> {
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status(),
                message: response.status_text(),
            });
        }
        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(collection.features)
    }
}

impl Default for GeocoderClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeApi for GeocoderClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeCandidate>, ApiError> {
        let url = format!(
            "{}/api?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        let features = self.fetch_features(url).await?;
        let candidates: Vec<GeocodeCandidate> =
            features.into_iter().filter_map(Feature::into_candidate).collect();
        log::info!("📍 Geocode \"{}\": {} candidates", query, candidates.len());
        Ok(candidates)
    }

    async fn reverse(&self, coord: Coordinate) -> Result<Option<String>, ApiError> {
        let url = format!(
            "{}/reverse?lat={}&lon={}",
            self.base_url, coord.lat, coord.lng
        );
        let features = self.fetch_features(url).await?;
        Ok(features
            .into_iter()
            .next()
            .and_then(|f| f.properties.display_label()))
    }
}

// ---------------------------------------------------------------------------
// Wire shapes (GeoJSON feature collection); everything optional, defaulted
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Deserialize)]
struct Geometry {
    /// `[lon, lat]` per GeoJSON
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Deserialize, Default)]
struct Properties {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    osm_key: Option<String>,
    #[serde(default)]
    osm_value: Option<String>,
}

impl Properties {
    fn display_label(&self) -> Option<String> {
        let base = self.name.clone().or_else(|| self.street.clone())?;
        match &self.city {
            Some(city) if city != &base => Some(format!("{}, {}", base, city)),
            _ => Some(base),
        }
    }
}

impl Feature {
    fn into_candidate(self) -> Option<GeocodeCandidate> {
        let geometry = self.geometry?;
        if geometry.coordinates.len() < 2 {
            return None;
        }
        let coord = Coordinate::new(geometry.coordinates[1], geometry.coordinates[0]);
        let label = self.properties.display_label()?;
        let kind = CandidateKind::from_osm(
            self.properties.osm_key.as_deref().unwrap_or(""),
            self.properties.osm_value.as_deref().unwrap_or(""),
        );
        Some(GeocodeCandidate { label, coord, kind })
    }
}

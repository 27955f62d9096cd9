use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// Classification of a geocode candidate, mapped from the geocoder's OSM tags.
/// Candidates in the priority set sort before everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Station,
    PointOfInterest,
    Building,
    Street,
    Locality,
    Other,
}

impl CandidateKind {
    pub fn is_priority(self) -> bool {
        matches!(self, Self::Station | Self::PointOfInterest | Self::Building)
    }

    /// Maps the geocoder's `osm_key`/`osm_value` pair to a classification
    pub fn from_osm(key: &str, value: &str) -> Self {
        match (key, value) {
            ("railway", _) | ("public_transport", _) => Self::Station,
            (_, "station") | (_, "bus_stop") | (_, "ferry_terminal") => Self::Station,
            ("amenity", _) | ("tourism", _) | ("leisure", _) | ("shop", _) => Self::PointOfInterest,
            ("building", _) | (_, "building") => Self::Building,
            ("highway", _) => Self::Street,
            ("place", _) | ("boundary", _) => Self::Locality,
            _ => Self::Other,
        }
    }
}

/// Ranked, filtered result of a forward geocode query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub label: String,
    pub coord: Coordinate,
    pub kind: CandidateKind,
}

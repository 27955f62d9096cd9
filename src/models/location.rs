use serde::{Deserialize, Serialize};

/// Geographic coordinate (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Wire format used by the planner: `[lat, lng]`
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Coordinate plus the human-readable label shown in the origin/destination
/// inputs. Labels come from geocode selections or reverse lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPlace {
    pub coord: Coordinate,
    pub label: String,
}

impl NamedPlace {
    pub fn new(coord: Coordinate, label: impl Into<String>) -> Self {
        Self { coord, label: label.into() }
    }
}

/// Current origin/destination of the trip being planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPair {
    pub origin: NamedPlace,
    pub destination: NamedPlace,
}

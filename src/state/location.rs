// ============================================================================
// LOCATION STORE - Origin/destination of the trip being planned
// ============================================================================

use crate::models::{Coordinate, LocationPair, NamedPlace};
use crate::state::observable::Observable;

/// Defaults from the home region: Auckland CBD → Britomart
const DEFAULT_ORIGIN: (f64, f64, &str) = (-36.8485, 174.7633, "Auckland CBD");
const DEFAULT_DESTINATION: (f64, f64, &str) = (-36.8443, 174.7676, "Britomart");

/// Owns the `LocationPair`. Origin and destination notify independently so
/// that a destination edit never triggers an origin-keyed refetch.
#[derive(Clone)]
pub struct LocationStore {
    origin: Observable<NamedPlace>,
    destination: Observable<NamedPlace>,
}

impl LocationStore {
    pub fn new() -> Self {
        let (olat, olng, olabel) = DEFAULT_ORIGIN;
        let (dlat, dlng, dlabel) = DEFAULT_DESTINATION;
        Self {
            origin: Observable::new(NamedPlace::new(Coordinate::new(olat, olng), olabel)),
            destination: Observable::new(NamedPlace::new(Coordinate::new(dlat, dlng), dlabel)),
        }
    }

    pub fn origin(&self) -> NamedPlace {
        self.origin.get()
    }

    pub fn destination(&self) -> NamedPlace {
        self.destination.get()
    }

    pub fn pair(&self) -> LocationPair {
        LocationPair {
            origin: self.origin(),
            destination: self.destination(),
        }
    }

    /// Map interaction, search selection or geolocation moved the origin
    pub fn set_origin(&self, coord: Coordinate, label: impl Into<String>) {
        self.origin.set(NamedPlace::new(coord, label));
    }

    pub fn set_destination(&self, coord: Coordinate, label: impl Into<String>) {
        self.destination.set(NamedPlace::new(coord, label));
    }

    pub fn swap(&self) {
        let origin = self.origin.get();
        let destination = self.destination.get();
        self.origin.set(destination);
        self.destination.set(origin);
    }

    pub fn subscribe_origin(&self, callback: impl Fn() + 'static) {
        self.origin.subscribe(callback);
    }

    pub fn subscribe_destination(&self, callback: impl Fn() + 'static) {
        self.destination.subscribe(callback);
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn swap_exchanges_both_halves() {
        let store = LocationStore::new();
        store.swap();
        assert_eq!(store.origin().label, "Britomart");
        assert_eq!(store.destination().label, "Auckland CBD");
    }

    #[test]
    fn destination_edits_do_not_notify_origin_subscribers() {
        let store = LocationStore::new();
        let origin_notified = Rc::new(Cell::new(0));
        let n = origin_notified.clone();
        store.subscribe_origin(move || n.set(n.get() + 1));

        store.set_destination(Coordinate::new(-36.86, 174.77), "Newmarket");
        assert_eq!(origin_notified.get(), 0);

        store.set_origin(Coordinate::new(-36.85, 174.76), "Aotea Square");
        assert_eq!(origin_notified.get(), 1);
    }
}

// ============================================================================
// LOCATION SYNC - Keeps nearby stops and weather aligned with the origin
// ============================================================================
// Origin mutations are debounced under one key; rapid marker dragging only
// fetches the coordinate at the end of the quiescence window. Completions
// are sequence-guarded, so an out-of-order response can never clobber a
// newer one.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::config::CONFIG;
use crate::models::{Coordinate, Stop, WeatherPoint};
use crate::services::api::{GeocodeApi, TransitApi};
use crate::state::debounce::Debouncer;
use crate::state::location::LocationStore;
use crate::state::observable::Observable;
use crate::state::resource::RefreshableResource;
use crate::utils::task::spawn_local;

const ORIGIN_KEY: &str = "origin";

pub struct LocationSync<A: TransitApi + Clone + 'static> {
    api: A,
    debouncer: Debouncer,
    stops: Observable<RefreshableResource<Vec<Stop>>>,
    weather: Observable<RefreshableResource<Option<WeatherPoint>>>,
    last_coord: Rc<Cell<Option<Coordinate>>>,
}

impl<A: TransitApi + Clone + 'static> Clone for LocationSync<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            debouncer: self.debouncer.clone(),
            stops: self.stops.clone(),
            weather: self.weather.clone(),
            last_coord: self.last_coord.clone(),
        }
    }
}

impl<A: TransitApi + Clone + 'static> LocationSync<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            debouncer: Debouncer::new(),
            stops: Observable::new(RefreshableResource::new(Vec::new())),
            weather: Observable::new(RefreshableResource::new(None)),
            last_coord: Rc::new(Cell::new(None)),
        }
    }

    pub fn stops(&self) -> &Observable<RefreshableResource<Vec<Stop>>> {
        &self.stops
    }

    pub fn weather(&self) -> &Observable<RefreshableResource<Option<WeatherPoint>>> {
        &self.weather
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Origin moved: schedule a refetch after the quiescence window. Only
    /// the last coordinate in a burst is fetched.
    pub fn origin_changed(&self, coord: Coordinate) {
        if self.last_coord.get() == Some(coord) {
            return; // label-only update, nothing to refetch
        }
        self.last_coord.set(Some(coord));

        let this = self.clone();
        self.debouncer
            .schedule(ORIGIN_KEY, CONFIG.origin_debounce_ms, move || {
                spawn_local(async move { this.refetch(coord).await });
            });
    }

    /// Immediate, non-debounced fetch for when the authenticated gate first
    /// opens: the initial view must not stay empty for a whole window.
    pub fn prime(&self, coord: Coordinate) {
        self.last_coord.set(Some(coord));
        let this = self.clone();
        spawn_local(async move { this.refetch(coord).await });
    }

    pub async fn refetch(&self, coord: Coordinate) {
        let mut stops_seq = 0;
        self.stops.update_silent(|r| stops_seq = r.issue());
        let mut weather_seq = 0;
        self.weather.update_silent(|r| weather_seq = r.issue());

        let (stops_result, weather_result) = futures::join!(
            self.api.nearby_stops(coord, CONFIG.nearby_radius_m),
            self.api.weather_point(coord)
        );

        match stops_result {
            Ok(stops) => self.stops.update(|r| {
                if !r.apply(stops_seq, stops) {
                    log::info!("⏭️ Discarding stale nearby-stops response");
                }
            }),
            // Background refresh: keep the last good value, no UI error
            Err(e) => log::warn!("⚠️ Nearby stops refresh failed: {}", e),
        }

        match weather_result {
            Ok(weather) => self.weather.update(|r| {
                if !r.apply(weather_seq, Some(weather)) {
                    log::info!("⏭️ Discarding stale weather response");
                }
            }),
            Err(e) => log::warn!("⚠️ Weather refresh failed: {}", e),
        }
    }

    /// Logout teardown: drop values and invalidate in-flight completions
    pub fn reset(&self) {
        self.debouncer.cancel(ORIGIN_KEY);
        self.last_coord.set(None);
        self.stops.update(|r| r.reset(Vec::new()));
        self.weather.update(|r| r.reset(None));
    }

    /// Host-side driver: simulates the origin quiescence window elapsing
    #[cfg(not(target_arch = "wasm32"))]
    pub fn fire_pending(&self) -> bool {
        self.debouncer.fire(ORIGIN_KEY)
    }
}

/// Reverse-geocodes the current origin to replace a provisional label
/// ("current location" naming). The coordinate itself is left alone.
pub async fn relabel_origin(locations: &LocationStore, geocoder: &impl GeocodeApi) {
    let place = locations.origin();
    match geocoder.reverse(place.coord).await {
        Ok(Some(label)) => {
            // Only apply if the origin has not moved again meanwhile
            if locations.origin().coord == place.coord {
                locations.set_origin(place.coord, label);
            }
        }
        Ok(None) => {}
        Err(e) => log::warn!("⚠️ Reverse geocode failed: {}", e),
    }
}

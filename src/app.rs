// ============================================================================
// APP - Wires the stores together and reacts to session transitions
// ============================================================================
// The session store is the gate: entering Authenticated arms the bearer
// token, primes location data and starts incident polling; leaving it tears
// all of that down on the same call stack, so no background work survives a
// logout.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::models::Coordinate;
use crate::services::{ApiClient, GeocoderClient};
use crate::state::location_sync::relabel_origin;
use crate::state::{
    IncidentPoller, LocationStore, LocationSync, PlanStore, ReviewStore, SearchSession,
    SessionStatus, SessionStore,
};
use crate::utils::storage::{DurableCredentialStore, EphemeralCredentialStore};
use crate::utils::task::spawn_local;

#[derive(Clone)]
pub struct App {
    pub api: ApiClient,
    pub geocoder: GeocoderClient,
    pub session: SessionStore,
    pub locations: LocationStore,
    pub location_sync: LocationSync<ApiClient>,
    pub incidents: IncidentPoller<ApiClient>,
    pub search: SearchSession<GeocoderClient>,
    pub plan: PlanStore<ApiClient>,
    pub reviews: ReviewStore<ApiClient>,
}

impl App {
    pub fn new() -> Self {
        let api = ApiClient::new();
        let geocoder = GeocoderClient::new();
        let session = SessionStore::new(
            Rc::new(DurableCredentialStore),
            Rc::new(EphemeralCredentialStore),
        );
        let locations = LocationStore::new();
        let location_sync = LocationSync::new(api.clone());
        let incidents = IncidentPoller::new(api.clone());
        let search = SearchSession::new(geocoder.clone(), locations.clone());
        let plan = PlanStore::new(api.clone(), locations.clone());
        let reviews = ReviewStore::new(api.clone());

        let app = Self {
            api,
            geocoder,
            session,
            locations,
            location_sync,
            incidents,
            search,
            plan,
            reviews,
        };
        app.wire();
        app
    }

    fn wire(&self) {
        // Origin mutations feed the debounced refetch, but only once the
        // session gate is open.
        {
            let app = self.clone();
            self.locations.subscribe_origin(move || {
                if app.session.status() == SessionStatus::Authenticated {
                    app.location_sync.origin_changed(app.locations.origin().coord);
                }
            });
        }

        let app = self.clone();
        self.session.subscribe(move || match app.session.status() {
            SessionStatus::Authenticated => app.on_authenticated(),
            SessionStatus::Unauthenticated => app.on_unauthenticated(),
            SessionStatus::Verifying => {}
        });
    }

    fn on_authenticated(&self) {
        let token = self.session.snapshot().credential.map(|c| c.token);
        self.api.set_token(token);

        self.location_sync.prime(self.locations.origin().coord);
        self.incidents.start();

        let reviews = self.reviews.clone();
        spawn_local(async move { reviews.load().await });
    }

    /// Origin chosen on the map (marker drag or geolocation): the coordinate
    /// commits immediately under a provisional label, and the label is
    /// replaced once the reverse lookup resolves.
    pub fn pick_origin(&self, coord: Coordinate, provisional_label: &str) {
        self.locations.set_origin(coord, provisional_label);
        let locations = self.locations.clone();
        let geocoder = self.geocoder.clone();
        spawn_local(async move { relabel_origin(&locations, &geocoder).await });
    }

    fn on_unauthenticated(&self) {
        self.api.set_token(None);
        self.incidents.stop();
        self.location_sync.reset();
        self.search.cancel();
        self.plan.reset();
        self.reviews.reset();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Runs `f` against the booted application
pub fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
    APP.with(|slot| slot.borrow().as_ref().map(f))
}

#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 Transit companion core starting");

    let app = App::new();
    let session = app.session.clone();
    let api = app.api.clone();
    spawn_local(async move { session.bootstrap(&api).await });

    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

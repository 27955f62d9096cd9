// ============================================================================
// SEARCH SESSION - Debounced geocode lookup for one location field
// ============================================================================
// A session is bound to either the origin or the destination input. Each
// keystroke resets the quiescence window; short queries never reach the
// geocoder. Responses are sequence-guarded, filtered to the service region
// and ranked with transit-relevant kinds first. Selecting a candidate
// commits it to the location store and ends the session.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::CONFIG;
use crate::models::GeocodeCandidate;
use crate::services::api::GeocodeApi;
use crate::state::debounce::Debouncer;
use crate::state::location::LocationStore;
use crate::state::observable::Observable;
use crate::utils::task::spawn_local;

const SEARCH_KEY: &str = "search";
const RESULT_LIMIT: usize = 8;

/// Which location input the session is bound to. There is no "unbound"
/// variant: "no active search" is `SearchState::Idle`, which both `select`
/// and `cancel` return the state to. The last binding is retained so
/// refocusing the same input needs no re-bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Origin,
    Destination,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No active query (empty input or below the minimum length)
    Idle,
    /// A query is debouncing or in flight
    Searching,
    /// Ranked candidates for the latest completed query (may be empty)
    Loaded(Vec<GeocodeCandidate>),
}

pub struct SearchSession<G: GeocodeApi + Clone + 'static> {
    geocoder: G,
    locations: LocationStore,
    debouncer: Debouncer,
    target: Observable<TargetField>,
    state: Observable<SearchState>,
    // Stamped per keystroke; a completion only lands if it still matches
    sequence: Rc<Cell<u64>>,
    query: Rc<RefCell<String>>,
}

impl<G: GeocodeApi + Clone + 'static> Clone for SearchSession<G> {
    fn clone(&self) -> Self {
        Self {
            geocoder: self.geocoder.clone(),
            locations: self.locations.clone(),
            debouncer: self.debouncer.clone(),
            target: self.target.clone(),
            state: self.state.clone(),
            sequence: self.sequence.clone(),
            query: self.query.clone(),
        }
    }
}

impl<G: GeocodeApi + Clone + 'static> SearchSession<G> {
    pub fn new(geocoder: G, locations: LocationStore) -> Self {
        Self {
            geocoder,
            locations,
            debouncer: Debouncer::new(),
            target: Observable::new(TargetField::Origin),
            state: Observable::new(SearchState::Idle),
            sequence: Rc::new(Cell::new(0)),
            query: Rc::new(RefCell::new(String::new())),
        }
    }

    pub fn state(&self) -> &Observable<SearchState> {
        &self.state
    }

    pub fn target(&self) -> TargetField {
        self.target.get()
    }

    /// Focus moved to the other input: pending work for the old field must
    /// not surface under the new one.
    pub fn set_target(&self, field: TargetField) {
        if self.target.get() == field {
            return;
        }
        self.cancel();
        self.target.set(field);
    }

    /// One keystroke. Resets the quiescence window and invalidates any
    /// in-flight lookup for the previous text.
    pub fn set_query(&self, text: &str) {
        *self.query.borrow_mut() = text.to_string();
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);

        let trimmed = text.trim();
        if trimmed.chars().count() < CONFIG.min_query_chars {
            self.debouncer.cancel(SEARCH_KEY);
            self.state.set(SearchState::Idle);
            return;
        }

        self.state.set(SearchState::Searching);
        let this = self.clone();
        let query = trimmed.to_string();
        self.debouncer
            .schedule(SEARCH_KEY, CONFIG.search_debounce_ms, move || {
                spawn_local(async move { this.run_lookup(query, sequence).await });
            });
    }

    /// The user picked a candidate: commit it to the bound field and end
    /// the session.
    pub fn select(&self, candidate: &GeocodeCandidate) {
        match self.target.get() {
            TargetField::Origin => self
                .locations
                .set_origin(candidate.coord, candidate.label.clone()),
            TargetField::Destination => self
                .locations
                .set_destination(candidate.coord, candidate.label.clone()),
        }
        self.cancel();
    }

    /// Drop the query, the pending timer and any in-flight lookup
    pub fn cancel(&self) {
        self.debouncer.cancel(SEARCH_KEY);
        self.sequence.set(self.sequence.get() + 1);
        self.query.borrow_mut().clear();
        self.state.set(SearchState::Idle);
    }

    async fn run_lookup(&self, query: String, sequence: u64) {
        let result = self.geocoder.search(&query, RESULT_LIMIT).await;
        if self.sequence.get() != sequence {
            log::info!("⏭️ Discarding stale geocode results for '{}'", query);
            return;
        }
        match result {
            Ok(candidates) => {
                self.state.set(SearchState::Loaded(rank(candidates)));
            }
            Err(e) => {
                // Lookup failure reads as "no suggestions", not a modal error
                log::warn!("⚠️ Geocode lookup failed for '{}': {}", query, e);
                self.state.set(SearchState::Loaded(Vec::new()));
            }
        }
    }

    /// Host-side driver: simulates the quiescence window elapsing
    #[cfg(not(target_arch = "wasm32"))]
    pub fn fire_pending(&self) -> bool {
        self.debouncer.fire(SEARCH_KEY)
    }
}

/// Region filter plus stable priority ordering: stations, points of interest
/// and buildings float above streets and localities, but the geocoder's
/// relevance order is preserved inside each band.
fn rank(candidates: Vec<GeocodeCandidate>) -> Vec<GeocodeCandidate> {
    let (mut priority, rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .filter(|c| CONFIG.search_bounds.contains(c.coord))
        .partition(|c| c.kind.is_priority());
    priority.extend(rest);
    priority
}

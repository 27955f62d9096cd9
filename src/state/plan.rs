// ============================================================================
// PLAN STORE - Explicit journey planning
// ============================================================================
// Planning is a user action, not a background refresh: failures surface in
// the result panel instead of being swallowed. A new plan invalidates every
// held comparison, since their baselines no longer exist.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{Itinerary, PlanRequest, TravelPreferences};
use crate::services::api::TransitApi;
use crate::state::comparison::ComparisonStore;
use crate::state::location::LocationStore;
use crate::state::observable::Observable;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlanState {
    #[default]
    Idle,
    Planning,
    Planned {
        itineraries: Vec<Itinerary>,
        /// Weather advisory attached by the backend, shown above the results
        weather_banner: Option<String>,
    },
    Failed(String),
}

pub struct PlanStore<A: TransitApi + Clone + 'static> {
    api: A,
    locations: LocationStore,
    comparisons: ComparisonStore<A>,
    preferences: Observable<TravelPreferences>,
    state: Observable<PlanState>,
    // Latest plan request wins if the user re-plans while one is in flight
    sequence: Rc<Cell<u64>>,
}

impl<A: TransitApi + Clone + 'static> Clone for PlanStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            locations: self.locations.clone(),
            comparisons: self.comparisons.clone(),
            preferences: self.preferences.clone(),
            state: self.state.clone(),
            sequence: self.sequence.clone(),
        }
    }
}

impl<A: TransitApi + Clone + 'static> PlanStore<A> {
    pub fn new(api: A, locations: LocationStore) -> Self {
        Self {
            comparisons: ComparisonStore::new(api.clone()),
            api,
            locations,
            preferences: Observable::new(TravelPreferences::default()),
            state: Observable::new(PlanState::Idle),
            sequence: Rc::new(Cell::new(0)),
        }
    }

    pub fn state(&self) -> &Observable<PlanState> {
        &self.state
    }

    pub fn preferences(&self) -> &Observable<TravelPreferences> {
        &self.preferences
    }

    pub fn comparisons(&self) -> &ComparisonStore<A> {
        &self.comparisons
    }

    pub fn set_preferences(&self, preferences: TravelPreferences) {
        self.preferences.set(preferences);
    }

    /// Plan between the current origin and destination with the current
    /// preferences.
    pub async fn plan(&self) {
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);

        self.state.set(PlanState::Planning);
        self.comparisons.clear();

        let request = self.request();
        log::info!(
            "🗺️ Planning {:?} → {:?}",
            request.origin,
            request.destination
        );
        let result = self.api.plan(&request).await;
        if self.sequence.get() != sequence {
            log::info!("⏭️ Discarding superseded plan response");
            return;
        }
        match result {
            Ok(response) => self.state.set(PlanState::Planned {
                itineraries: response.itineraries,
                weather_banner: response.context.weather_alert,
            }),
            Err(e) => self.state.set(PlanState::Failed(e.to_string())),
        }
    }

    /// Logout teardown
    pub fn reset(&self) {
        self.sequence.set(self.sequence.get() + 1);
        self.comparisons.clear();
        self.preferences.set(TravelPreferences::default());
        self.state.set(PlanState::Idle);
    }

    fn request(&self) -> PlanRequest {
        let pair = self.locations.pair();
        let prefs = self.preferences.get();
        PlanRequest {
            origin: pair.origin.coord.to_pair(),
            destination: pair.destination.coord.to_pair(),
            depart_at: prefs.depart_at,
            arrive_by: prefs.arrive_by,
            optimize: prefs.optimize,
            max_walk_km: prefs.max_walk_km,
            avoid_stairs: prefs.avoid_stairs,
            bike_ok: prefs.bike_ok,
            modes: prefs.modes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use futures::executor::block_on;

    use crate::models::{
        AlertFeed, Coordinate, NewReview, PlanContext, PlanResponse, Review, Stop, SuggestRequest,
        SuggestResponse, WeatherPoint,
    };
    use crate::services::error::ApiError;
    use crate::state::comparison::ComparisonEntry;

    #[derive(Clone, Default)]
    struct ScriptedApi {
        inner: Rc<ScriptedInner>,
    }

    #[derive(Default)]
    struct ScriptedInner {
        plans: RefCell<VecDeque<Result<PlanResponse, ApiError>>>,
        suggests: RefCell<VecDeque<Result<SuggestResponse, ApiError>>>,
        requests: RefCell<Vec<PlanRequest>>,
    }

    impl ScriptedApi {
        fn push_plan(&self, result: Result<PlanResponse, ApiError>) {
            self.inner.plans.borrow_mut().push_back(result);
        }

        fn push_suggest(&self, result: Result<SuggestResponse, ApiError>) {
            self.inner.suggests.borrow_mut().push_back(result);
        }
    }

    impl TransitApi for ScriptedApi {
        async fn nearby_stops(&self, _c: Coordinate, _r: f64) -> Result<Vec<Stop>, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn weather_point(&self, _c: Coordinate) -> Result<WeatherPoint, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn alerts(&self) -> Result<AlertFeed, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn plan(&self, req: &PlanRequest) -> Result<PlanResponse, ApiError> {
            self.inner.requests.borrow_mut().push(req.clone());
            self.inner
                .plans
                .borrow_mut()
                .pop_front()
                .expect("unscripted plan call")
        }

        async fn suggest_route(&self, _req: &SuggestRequest) -> Result<SuggestResponse, ApiError> {
            self.inner
                .suggests
                .borrow_mut()
                .pop_front()
                .expect("unscripted suggest_route call")
        }

        async fn reviews(&self) -> Result<Vec<Review>, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn submit_review(&self, _review: &NewReview) -> Result<(), ApiError> {
            unimplemented!("not exercised here")
        }
    }

    fn itinerary(id: &str) -> Itinerary {
        Itinerary {
            id: id.to_string(),
            duration_min: 22.0,
            transfers: 0,
            legs: vec!["Bus NX1".to_string()],
            reliability: 0.8,
            walk_km: 0.5,
            modes: vec!["bus".to_string()],
        }
    }

    fn planned(itineraries: Vec<Itinerary>, banner: Option<&str>) -> PlanResponse {
        PlanResponse {
            itineraries,
            context: PlanContext {
                weather_alert: banner.map(String::from),
            },
        }
    }

    #[test]
    fn plan_sends_locations_and_preferences_and_surfaces_the_banner() {
        let api = ScriptedApi::default();
        api.push_plan(Ok(planned(vec![itinerary("A")], Some("Heavy rain expected"))));
        let store = PlanStore::new(api.clone(), LocationStore::new());

        block_on(store.plan());

        let requests = api.inner.requests.borrow();
        assert_eq!(requests[0].origin, [-36.8485, 174.7633]);
        assert_eq!(requests[0].destination, [-36.8443, 174.7676]);
        assert_eq!(requests[0].max_walk_km, 1.2);

        match store.state().get() {
            PlanState::Planned {
                itineraries,
                weather_banner,
            } => {
                assert_eq!(itineraries.len(), 1);
                assert_eq!(weather_banner.as_deref(), Some("Heavy rain expected"));
            }
            other => panic!("expected planned state, got {:?}", other),
        }
    }

    #[test]
    fn plan_failure_is_surfaced_not_swallowed() {
        let api = ScriptedApi::default();
        api.push_plan(Err(ApiError::Http {
            status: 503,
            message: "planner unavailable".to_string(),
        }));
        let store = PlanStore::new(api, LocationStore::new());

        block_on(store.plan());

        match store.state().get() {
            PlanState::Failed(message) => assert!(message.contains("planner unavailable")),
            other => panic!("expected failed state, got {:?}", other),
        }
    }

    #[test]
    fn replanning_clears_held_comparisons() {
        let api = ScriptedApi::default();
        api.push_plan(Ok(planned(vec![itinerary("A")], None)));
        api.push_suggest(Ok(SuggestResponse {
            success: true,
            itinerary: Some(itinerary("A-alt")),
            error: None,
        }));
        api.push_plan(Ok(planned(vec![itinerary("B")], None)));
        let store = PlanStore::new(api, LocationStore::new());

        block_on(store.plan());
        block_on(store.comparisons().request_alternative(
            itinerary("A"),
            vec![],
            TravelPreferences::default(),
        ));
        assert!(matches!(
            store.comparisons().entry("A"),
            Some(ComparisonEntry::Ready(_))
        ));

        block_on(store.plan());
        assert!(store.comparisons().entry("A").is_none());
    }

    #[test]
    fn reset_returns_to_idle_defaults() {
        let api = ScriptedApi::default();
        api.push_plan(Ok(planned(vec![itinerary("A")], None)));
        let store = PlanStore::new(api, LocationStore::new());

        store.set_preferences(TravelPreferences {
            max_walk_km: 3.0,
            ..TravelPreferences::default()
        });
        block_on(store.plan());
        store.reset();

        assert_eq!(store.state().get(), PlanState::Idle);
        assert_eq!(store.preferences().get(), TravelPreferences::default());
    }
}

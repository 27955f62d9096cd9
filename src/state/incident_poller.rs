// ============================================================================
// INCIDENT POLLER - Periodic alert feed with single-flight manual refresh
// ============================================================================
// One interval drives a background refresh; the user can also pull manually.
// Concurrent refresh requests coalesce into the in-flight fetch instead of
// stacking network calls. The refresh indicator stays visible for a minimum
// duration so a fast response does not render as a flicker.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::Utc;
use futures::channel::oneshot;

use crate::config::CONFIG;
use crate::models::Alert;
use crate::services::api::TransitApi;
use crate::state::observable::Observable;
use crate::state::resource::RefreshableResource;
use crate::utils::task::spawn_local;
use crate::utils::timer::{sleep, Interval};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshIndicator {
    #[default]
    Idle,
    Refreshing,
}

pub struct IncidentPoller<A: TransitApi + Clone + 'static> {
    api: A,
    alerts: Observable<RefreshableResource<Vec<Alert>>>,
    indicator: Observable<RefreshIndicator>,
    // Bumped on start/stop so callbacks from a torn-down cycle are inert
    generation: Rc<Cell<u64>>,
    interval: Rc<RefCell<Option<Interval>>>,
    in_flight: Rc<Cell<bool>>,
    waiters: Rc<RefCell<Vec<oneshot::Sender<()>>>>,
}

impl<A: TransitApi + Clone + 'static> Clone for IncidentPoller<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            alerts: self.alerts.clone(),
            indicator: self.indicator.clone(),
            generation: self.generation.clone(),
            interval: self.interval.clone(),
            in_flight: self.in_flight.clone(),
            waiters: self.waiters.clone(),
        }
    }
}

impl<A: TransitApi + Clone + 'static> IncidentPoller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            alerts: Observable::new(RefreshableResource::new(Vec::new())),
            indicator: Observable::new(RefreshIndicator::Idle),
            generation: Rc::new(Cell::new(0)),
            interval: Rc::new(RefCell::new(None)),
            in_flight: Rc::new(Cell::new(false)),
            waiters: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn alerts(&self) -> &Observable<RefreshableResource<Vec<Alert>>> {
        &self.alerts
    }

    pub fn indicator(&self) -> &Observable<RefreshIndicator> {
        &self.indicator
    }

    pub fn is_running(&self) -> bool {
        self.interval.borrow().is_some()
    }

    /// Begin polling: one immediate fetch, then one every poll interval
    pub fn start(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let this = self.clone();
        let tick = move || {
            if this.generation.get() != generation {
                return;
            }
            let this = this.clone();
            spawn_local(async move { this.refresh().await });
        };
        *self.interval.borrow_mut() = Some(Interval::new(CONFIG.alert_poll_interval_ms, tick));
        log::info!("📡 Incident polling started");

        let this = self.clone();
        spawn_local(async move { this.refresh().await });
    }

    /// Logout teardown: cancel the interval, drop the feed, and make any
    /// still-running refresh inert.
    pub fn stop(&self) {
        self.generation.set(self.generation.get() + 1);
        *self.interval.borrow_mut() = None;
        self.alerts.update(|r| r.reset(Vec::new()));
        self.indicator.set(RefreshIndicator::Idle);
        log::info!("📡 Incident polling stopped");
    }

    /// Fetch the alert feed. If a fetch is already in flight this joins it
    /// rather than issuing a second network call.
    pub async fn refresh(&self) {
        if self.in_flight.get() {
            let (tx, rx) = oneshot::channel();
            self.waiters.borrow_mut().push(tx);
            let _ = rx.await;
            return;
        }
        self.in_flight.set(true);
        let generation = self.generation.get();
        let started = Utc::now();
        self.indicator.set(RefreshIndicator::Refreshing);

        let mut sequence = 0;
        self.alerts.update_silent(|r| sequence = r.issue());

        match self.api.alerts().await {
            Ok(feed) => self.alerts.update(|r| {
                if !r.apply(sequence, feed.merged()) {
                    log::info!("⏭️ Discarding stale alert feed");
                }
            }),
            // Transient poll failure: keep showing the last feed
            Err(e) => log::warn!("⚠️ Alert refresh failed: {}", e),
        }

        // Hold the spinner long enough to read as an action, not a glitch
        let elapsed = (Utc::now() - started).num_milliseconds().max(0) as u64;
        let min_visible = u64::from(CONFIG.min_refresh_visible_ms);
        if elapsed < min_visible {
            sleep((min_visible - elapsed) as u32).await;
        }

        if self.generation.get() == generation {
            self.indicator.set(RefreshIndicator::Idle);
        }
        self.in_flight.set(false);
        for waiter in self.waiters.take() {
            let _ = waiter.send(());
        }
    }

    /// Host-side driver: simulates one poll interval elapsing
    #[cfg(not(target_arch = "wasm32"))]
    pub fn fire_tick(&self) -> bool {
        let interval = self.interval.borrow();
        match &*interval {
            Some(interval) => {
                interval.fire();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    use crate::models::{
        AlertFeed, Coordinate, NewReview, PlanRequest, PlanResponse, Review, Stop, SuggestRequest,
        SuggestResponse, WeatherPoint,
    };
    use crate::services::error::ApiError;

    type AlertsResult = Result<AlertFeed, ApiError>;

    #[derive(Clone, Default)]
    struct ScriptedApi {
        inner: Rc<ScriptedInner>,
    }

    #[derive(Default)]
    struct ScriptedInner {
        ready: RefCell<VecDeque<AlertsResult>>,
        pending: RefCell<VecDeque<oneshot::Receiver<AlertsResult>>>,
        calls: Cell<usize>,
    }

    impl ScriptedApi {
        fn push_ready(&self, result: AlertsResult) {
            self.inner.ready.borrow_mut().push_back(result);
        }

        fn push_pending(&self) -> oneshot::Sender<AlertsResult> {
            let (tx, rx) = oneshot::channel();
            self.inner.pending.borrow_mut().push_back(rx);
            tx
        }

        fn calls(&self) -> usize {
            self.inner.calls.get()
        }
    }

    impl TransitApi for ScriptedApi {
        async fn nearby_stops(&self, _c: Coordinate, _r: f64) -> Result<Vec<Stop>, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn weather_point(&self, _c: Coordinate) -> Result<WeatherPoint, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn alerts(&self) -> AlertsResult {
            self.inner.calls.set(self.inner.calls.get() + 1);
            if let Some(ready) = self.inner.ready.borrow_mut().pop_front() {
                return ready;
            }
            let rx = self
                .inner
                .pending
                .borrow_mut()
                .pop_front()
                .expect("unscripted alerts call");
            rx.await.expect("test dropped the response sender")
        }

        async fn plan(&self, _req: &PlanRequest) -> Result<PlanResponse, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn suggest_route(&self, _req: &SuggestRequest) -> Result<SuggestResponse, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn reviews(&self) -> Result<Vec<Review>, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn submit_review(&self, _review: &NewReview) -> Result<(), ApiError> {
            unimplemented!("not exercised here")
        }
    }

    fn feed(ids: &[&str]) -> AlertFeed {
        serde_json::from_value(serde_json::json!({
            "alerts": ids.iter().map(|id| serde_json::json!({"id": id})).collect::<Vec<_>>(),
            "traffic": [],
        }))
        .unwrap()
    }

    #[test]
    fn refresh_applies_the_merged_feed_and_settles_idle() {
        let api = ScriptedApi::default();
        api.push_ready(Ok(feed(&["SVC-1", "SVC-2"])));
        let poller = IncidentPoller::new(api);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let indicator = poller.indicator().clone();
        poller
            .indicator()
            .subscribe(move || seen2.borrow_mut().push(indicator.get()));

        block_on(poller.refresh());

        poller.alerts().with(|r| assert_eq!(r.value().len(), 2));
        assert_eq!(
            *seen.borrow(),
            vec![RefreshIndicator::Refreshing, RefreshIndicator::Idle]
        );
    }

    #[test]
    fn a_fast_refresh_pads_the_indicator_to_its_minimum_visible_time() {
        let api = ScriptedApi::default();
        api.push_ready(Ok(feed(&["SVC-1"])));
        let poller = IncidentPoller::new(api);

        crate::utils::timer::take_requested_sleeps();
        block_on(poller.refresh());

        let pads = crate::utils::timer::take_requested_sleeps();
        assert_eq!(pads.len(), 1);
        // The scripted fetch resolves in well under the window, so nearly
        // all of it must be made up by the pad
        assert!(pads[0] <= CONFIG.min_refresh_visible_ms);
        assert!(u64::from(pads[0]) + 100 >= u64::from(CONFIG.min_refresh_visible_ms));
    }

    #[test]
    fn concurrent_refreshes_share_one_network_call() {
        let api = ScriptedApi::default();
        let tx = api.push_pending();
        let poller = IncidentPoller::new(api.clone());

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let done = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let poller = poller.clone();
            let done = done.clone();
            spawner
                .spawn_local(async move {
                    poller.refresh().await;
                    done.set(done.get() + 1);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(api.calls(), 1);
        assert_eq!(done.get(), 0);

        tx.send(Ok(feed(&["SVC-1"]))).unwrap();
        pool.run_until_stalled();

        // Every caller resolved off the single shared fetch
        assert_eq!(done.get(), 3);
        assert_eq!(api.calls(), 1);
        poller.alerts().with(|r| assert_eq!(r.value().len(), 1));
    }

    #[test]
    fn failed_poll_keeps_the_previous_feed() {
        let api = ScriptedApi::default();
        api.push_ready(Ok(feed(&["SVC-1"])));
        api.push_ready(Err(ApiError::Network("connection reset".to_string())));
        let poller = IncidentPoller::new(api);

        block_on(poller.refresh());
        block_on(poller.refresh());

        poller.alerts().with(|r| {
            assert_eq!(r.value().len(), 1);
            assert_eq!(r.value()[0].id, "SVC-1");
        });
        assert_eq!(poller.indicator().get(), RefreshIndicator::Idle);
    }

    #[test]
    fn start_fetches_immediately_and_ticks_refetch() {
        let api = ScriptedApi::default();
        api.push_ready(Ok(feed(&["SVC-1"])));
        api.push_ready(Ok(feed(&["SVC-1", "SVC-2"])));
        let poller = IncidentPoller::new(api.clone());

        poller.start();
        assert!(poller.is_running());
        assert_eq!(api.calls(), 1);

        assert!(poller.fire_tick());
        assert_eq!(api.calls(), 2);
        poller.alerts().with(|r| assert_eq!(r.value().len(), 2));
    }

    #[test]
    fn stop_tears_down_and_discards_a_late_completion() {
        let api = ScriptedApi::default();
        let tx = api.push_pending();
        let poller = IncidentPoller::new(api.clone());

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        {
            let poller = poller.clone();
            spawner
                .spawn_local(async move { poller.refresh().await })
                .unwrap();
        }
        pool.run_until_stalled();

        poller.stop();
        assert!(!poller.is_running());
        assert!(!poller.fire_tick());

        tx.send(Ok(feed(&["LATE"]))).unwrap();
        pool.run_until_stalled();

        poller.alerts().with(|r| assert!(r.value().is_empty()));
        assert_eq!(poller.indicator().get(), RefreshIndicator::Idle);
    }
}

// ============================================================================
// TIMERS - gloo timers on wasm, manually-fired shims on the host
// ============================================================================
// Dropping a Timeout or Interval cancels it on both targets. The host shims
// exist so the debounce/polling stores can be driven deterministically from
// plain `cargo test`.
// ============================================================================

/// One-shot cancellable timer
#[cfg(target_arch = "wasm32")]
pub struct Timeout {
    // Dropping the gloo timeout cancels the pending callback
    _inner: gloo_timers::callback::Timeout,
}

#[cfg(target_arch = "wasm32")]
impl Timeout {
    pub fn new(delay_ms: u32, callback: impl FnOnce() + 'static) -> Self {
        Self {
            _inner: gloo_timers::callback::Timeout::new(delay_ms, callback),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub struct Timeout {
    callback: std::cell::RefCell<Option<Box<dyn FnOnce()>>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Timeout {
    pub fn new(_delay_ms: u32, callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: std::cell::RefCell::new(Some(Box::new(callback))),
        }
    }

    /// Simulates the quiescence window elapsing
    pub fn fire(&self) {
        if let Some(callback) = self.callback.borrow_mut().take() {
            callback();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

/// Repeating cancellable timer
#[cfg(target_arch = "wasm32")]
pub struct Interval {
    _inner: gloo_timers::callback::Interval,
}

#[cfg(target_arch = "wasm32")]
impl Interval {
    pub fn new(period_ms: u32, callback: impl FnMut() + 'static) -> Self {
        Self {
            _inner: gloo_timers::callback::Interval::new(period_ms, callback),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub struct Interval {
    callback: std::cell::RefCell<Box<dyn FnMut()>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Interval {
    pub fn new(_period_ms: u32, callback: impl FnMut() + 'static) -> Self {
        Self {
            callback: std::cell::RefCell::new(Box::new(callback)),
        }
    }

    /// Simulates one timer tick
    pub fn fire(&self) {
        (self.callback.borrow_mut())();
    }
}

/// Suspends for `delay_ms` on wasm; resolves immediately on the host so
/// tests never wait on wall-clock time.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(delay_ms: u32) {
    gloo_timers::future::TimeoutFuture::new(delay_ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
std::thread_local! {
    static REQUESTED_SLEEPS: std::cell::RefCell<Vec<u32>> =
        const { std::cell::RefCell::new(Vec::new()) };
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(delay_ms: u32) {
    REQUESTED_SLEEPS.with(|sleeps| sleeps.borrow_mut().push(delay_ms));
}

/// Host-side driver: drains the durations this thread has passed to `sleep`,
/// so tests can assert on timing behaviour that never actually waits.
#[cfg(not(target_arch = "wasm32"))]
pub fn take_requested_sleeps() -> Vec<u32> {
    REQUESTED_SLEEPS.with(|sleeps| sleeps.borrow_mut().drain(..).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn timeout_fires_once_and_drop_cancels() {
        let fired = Rc::new(Cell::new(0));
        let fired2 = fired.clone();
        let timeout = Timeout::new(100, move || fired2.set(fired2.get() + 1));
        assert!(timeout.is_pending());

        timeout.fire();
        timeout.fire();
        assert_eq!(fired.get(), 1);
        assert!(!timeout.is_pending());

        let never = Rc::new(Cell::new(false));
        let never2 = never.clone();
        drop(Timeout::new(100, move || never2.set(true)));
        assert!(!never.get());
    }

    #[test]
    fn sleep_records_the_requested_duration() {
        take_requested_sleeps();
        futures::executor::block_on(async {
            sleep(250).await;
            sleep(50).await;
        });
        assert_eq!(take_requested_sleeps(), vec![250, 50]);
        assert!(take_requested_sleeps().is_empty());
    }

    #[test]
    fn interval_fires_repeatedly() {
        let ticks = Rc::new(Cell::new(0));
        let ticks2 = ticks.clone();
        let interval = Interval::new(1000, move || ticks2.set(ticks2.get() + 1));
        interval.fire();
        interval.fire();
        assert_eq!(ticks.get(), 2);
    }
}

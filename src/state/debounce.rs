// ============================================================================
// DEBOUNCER - Per-key cancellable delayed effects
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::utils::timer::Timeout;

/// Schedules one delayed effect per key. Scheduling again under the same key
/// within the delay window cancels the earlier effect, so only the last call
/// in a burst fires.
#[derive(Clone, Default)]
pub struct Debouncer {
    pending: Rc<RefCell<HashMap<&'static str, Timeout>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self, key: &'static str, delay_ms: u32, effect: impl FnOnce() + 'static) {
        let pending = self.pending.clone();
        let timeout = Timeout::new(delay_ms, move || {
            pending.borrow_mut().remove(key);
            effect();
        });
        // Inserting drops the superseded timer, which cancels it
        self.pending.borrow_mut().insert(key, timeout);
    }

    pub fn cancel(&self, key: &'static str) {
        self.pending.borrow_mut().remove(key);
    }

    pub fn has_pending(&self, key: &'static str) -> bool {
        self.pending.borrow().contains_key(key)
    }

    /// Host-side driver: simulates the quiescence window elapsing for `key`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn fire(&self, key: &'static str) -> bool {
        let timeout = self.pending.borrow_mut().remove(key);
        match timeout {
            Some(timeout) => {
                timeout.fire();
                true
            }
            None => false,
        }
    }
}

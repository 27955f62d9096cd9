// ============================================================================
// OBSERVABLE - Subscriber-notifying state cell
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Subscriber = Box<dyn Fn()>;

/// Reactive state cell. Clones share both the value and the subscriber list,
/// so a notification reaches every observer no matter which clone mutated.
/// Subscribers run synchronously, on the mutating call stack.
pub struct Observable<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Read through a closure without cloning the value
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutate in place and notify subscribers
    pub fn update(&self, updater: impl FnOnce(&mut T)) {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Mutate bookkeeping (sequence counters) without waking the UI
    pub fn update_silent(&self, updater: impl FnOnce(&mut T)) {
        updater(&mut self.value.borrow_mut());
    }

    /// Subscribe to changes; runs for the lifetime of the store
    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.subscribers.borrow_mut().push(Box::new(callback));
    }

    fn notify(&self) {
        for callback in self.subscribers.borrow().iter() {
            callback();
        }
    }
}

impl<T: Clone> Observable<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_value_and_subscribers() {
        let original = Observable::new(1);
        let clone = original.clone();

        let seen = Rc::new(Cell::new(0));
        let seen2 = seen.clone();
        let reader = original.clone();
        original.subscribe(move || seen2.set(reader.get()));

        clone.set(7);
        assert_eq!(original.get(), 7);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn update_silent_skips_notification() {
        let state = Observable::new(0);
        let notified = Rc::new(Cell::new(false));
        let notified2 = notified.clone();
        state.subscribe(move || notified2.set(true));

        state.update_silent(|v| *v = 5);
        assert_eq!(state.get(), 5);
        assert!(!notified.get());
    }
}

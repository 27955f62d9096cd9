// ============================================================================
// REFRESHABLE RESOURCE - Sequence-guarded value wrapper
// ============================================================================
// Issuance order of network calls may not match completion order. Every
// request takes a sequence number from `issue()`; `apply()` only accepts the
// highest-issued one, so a slow early response can never overwrite the result
// of a newer request.
// ============================================================================

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshableResource<T> {
    value: T,
    last_updated_at: Option<DateTime<Utc>>,
    fetch_sequence: u64,
}

impl<T> RefreshableResource<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            last_updated_at: None,
            fetch_sequence: 0,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// `None` until the first successful apply, and again after `reset`
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated_at
    }

    /// Stamp a new request. The returned number must be handed back to
    /// `apply` with the completion.
    pub fn issue(&mut self) -> u64 {
        self.fetch_sequence += 1;
        self.fetch_sequence
    }

    /// Apply a completion. Returns false (value untouched) unless `sequence`
    /// is the highest issued so far.
    pub fn apply(&mut self, sequence: u64, value: T) -> bool {
        if sequence != self.fetch_sequence {
            return false;
        }
        self.value = value;
        self.last_updated_at = Some(Utc::now());
        true
    }

    /// Restore the initial value and invalidate every in-flight request
    pub fn reset(&mut self, initial: T) {
        self.value = initial;
        self.last_updated_at = None;
        // Bumping the sequence makes any outstanding completion stale
        self.fetch_sequence += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_completion_is_discarded() {
        let mut resource = RefreshableResource::new(0);
        let first = resource.issue();
        let second = resource.issue();

        // Second request completes first
        assert!(resource.apply(second, 20));
        assert_eq!(*resource.value(), 20);

        // The earlier, slower response must not overwrite the newer value
        assert!(!resource.apply(first, 10));
        assert_eq!(*resource.value(), 20);
        assert!(resource.last_updated_at().is_some());
    }

    #[test]
    fn reset_invalidates_in_flight_requests() {
        let mut resource = RefreshableResource::new(Vec::<i32>::new());
        let seq = resource.issue();
        resource.reset(Vec::new());

        assert!(!resource.apply(seq, vec![1, 2, 3]));
        assert!(resource.value().is_empty());
        assert!(resource.last_updated_at().is_none());
    }
}

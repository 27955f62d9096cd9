// ============================================================================
// COMPARISON STORE - Backend-suggested alternatives, keyed by baseline
// ============================================================================
// Each itinerary card can ask for an incident-aware alternative. Entries are
// independent: requesting one for itinerary Y never disturbs the entry held
// for itinerary X. Re-requesting the same baseline replaces its entry.
// ============================================================================

use std::collections::HashMap;

use crate::models::{
    Alert, Itinerary, ItineraryAlternative, RouteComparison, SuggestRequest, TravelPreferences,
};
use crate::services::api::TransitApi;
use crate::state::observable::Observable;

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonEntry {
    /// A suggest request for this baseline is in flight
    Pending,
    Ready(ItineraryAlternative),
    /// Shown inline on the requesting card
    Failed(String),
}

pub struct ComparisonStore<A: TransitApi + Clone + 'static> {
    api: A,
    entries: Observable<HashMap<String, ComparisonEntry>>,
}

impl<A: TransitApi + Clone + 'static> Clone for ComparisonStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<A: TransitApi + Clone + 'static> ComparisonStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            entries: Observable::new(HashMap::new()),
        }
    }

    pub fn entries(&self) -> &Observable<HashMap<String, ComparisonEntry>> {
        &self.entries
    }

    pub fn entry(&self, baseline_id: &str) -> Option<ComparisonEntry> {
        self.entries.with(|e| e.get(baseline_id).cloned())
    }

    /// Ask the backend for an alternative to `baseline` that routes around
    /// the given incidents. Only this baseline's entry is touched.
    pub async fn request_alternative(
        &self,
        baseline: Itinerary,
        incidents: Vec<Alert>,
        preferences: TravelPreferences,
    ) {
        let id = baseline.id.clone();
        self.entries
            .update(|e| {
                e.insert(id.clone(), ComparisonEntry::Pending);
            });

        let request = SuggestRequest {
            baseline: baseline.clone(),
            incidents,
            preferences,
        };
        let entry = match self.api.suggest_route(&request).await {
            Ok(response) => match response.itinerary {
                Some(alternative) if response.success => {
                    let comparison = RouteComparison::between(&baseline, &alternative);
                    ComparisonEntry::Ready(ItineraryAlternative {
                        baseline,
                        alternative,
                        comparison,
                    })
                }
                _ => ComparisonEntry::Failed(
                    response
                        .error
                        .unwrap_or_else(|| "no alternative found".to_string()),
                ),
            },
            Err(e) => {
                log::warn!("⚠️ Alternative request for '{}' failed: {}", id, e);
                ComparisonEntry::Failed(e.to_string())
            }
        };
        self.entries.update(|e| {
            e.insert(id, entry);
        });
    }

    pub fn dismiss(&self, baseline_id: &str) {
        self.entries.update(|e| {
            e.remove(baseline_id);
        });
    }

    /// A new plan invalidates every comparison: the baselines are gone
    pub fn clear(&self) {
        self.entries.update(HashMap::clear);
    }
}

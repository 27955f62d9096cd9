// ============================================================================
// REVIEW STORE - Stop and station reviews
// ============================================================================

use crate::models::{NewReview, Review};
use crate::services::api::TransitApi;
use crate::services::error::ActionError;
use crate::state::observable::Observable;
use crate::state::resource::RefreshableResource;

pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

pub struct ReviewStore<A: TransitApi + Clone + 'static> {
    api: A,
    reviews: Observable<RefreshableResource<Vec<Review>>>,
}

impl<A: TransitApi + Clone + 'static> Clone for ReviewStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            reviews: self.reviews.clone(),
        }
    }
}

impl<A: TransitApi + Clone + 'static> ReviewStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            reviews: Observable::new(RefreshableResource::new(Vec::new())),
        }
    }

    pub fn reviews(&self) -> &Observable<RefreshableResource<Vec<Review>>> {
        &self.reviews
    }

    pub async fn load(&self) {
        let mut sequence = 0;
        self.reviews.update_silent(|r| sequence = r.issue());
        match self.api.reviews().await {
            Ok(reviews) => self.reviews.update(|r| {
                if !r.apply(sequence, reviews) {
                    log::info!("⏭️ Discarding stale review list");
                }
            }),
            Err(e) => log::warn!("⚠️ Review load failed: {}", e),
        }
    }

    /// Validates the draft, posts it, and appends it to the visible list
    /// once the backend has accepted it.
    pub async fn submit(&self, draft: NewReview) -> Result<(), ActionError> {
        let draft = validated(draft)?;
        self.api.submit_review(&draft).await?;
        self.reviews.update(|r| {
            let mut reviews = r.value().clone();
            reviews.push(Review {
                location: draft.location.clone(),
                rating: draft.rating,
                comment: draft.comment.clone(),
            });
            let sequence = r.issue();
            r.apply(sequence, reviews);
        });
        Ok(())
    }

    pub fn reset(&self) {
        self.reviews.update(|r| r.reset(Vec::new()));
    }
}

fn validated(draft: NewReview) -> Result<NewReview, ActionError> {
    let location = draft.location.trim();
    if location.is_empty() {
        return Err(ActionError::Validation(
            "Pick a stop or station to review".to_string(),
        ));
    }
    if !RATING_RANGE.contains(&draft.rating) {
        return Err(ActionError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    let comment = draft.comment.trim();
    if comment.is_empty() {
        return Err(ActionError::Validation(
            "A short comment is required".to_string(),
        ));
    }
    Ok(NewReview {
        location: location.to_string(),
        rating: draft.rating,
        comment: comment.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use futures::executor::block_on;

    use crate::models::{
        AlertFeed, Coordinate, PlanRequest, PlanResponse, Stop, SuggestRequest, SuggestResponse,
        WeatherPoint,
    };
    use crate::services::error::ApiError;

    #[derive(Clone, Default)]
    struct ScriptedApi {
        inner: Rc<ScriptedInner>,
    }

    #[derive(Default)]
    struct ScriptedInner {
        listing: RefCell<Option<Result<Vec<Review>, ApiError>>>,
        submit: RefCell<Option<Result<(), ApiError>>>,
        submitted: RefCell<Vec<NewReview>>,
        submit_calls: Cell<usize>,
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

        async fn plan(&self, _req: &PlanRequest) -> Result<PlanResponse, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn suggest_route(&self, _req: &SuggestRequest) -> Result<SuggestResponse, ApiError> {
            unimplemented!("not exercised here")
        }

        async fn reviews(&self) -> Result<Vec<Review>, ApiError> {
            self.inner
                .listing
                .borrow_mut()
                .take()
                .expect("unscripted reviews call")
        }

        async fn submit_review(&self, review: &NewReview) -> Result<(), ApiError> {
            self.inner.submit_calls.set(self.inner.submit_calls.get() + 1);
            self.inner.submitted.borrow_mut().push(review.clone());
            self.inner
                .submit
                .borrow_mut()
                .take()
                .expect("unscripted submit_review call")
        }
    }

    fn review(location: &str) -> Review {
        Review {
            location: location.to_string(),
            rating: 4,
            comment: "Sheltered and well lit".to_string(),
        }
    }

    #[test]
    fn load_replaces_the_list() {
        let api = ScriptedApi::default();
        *api.inner.listing.borrow_mut() = Some(Ok(vec![review("Britomart")]));
        let store = ReviewStore::new(api);

        block_on(store.load());
        store.reviews().with(|r| {
            assert_eq!(r.value().len(), 1);
            assert_eq!(r.value()[0].location, "Britomart");
        });
    }

    #[test]
    fn accepted_submission_is_appended() {
        let api = ScriptedApi::default();
        *api.inner.submit.borrow_mut() = Some(Ok(()));
        let store = ReviewStore::new(api.clone());

        let result = block_on(store.submit(NewReview {
            location: "  Britomart  ".to_string(),
            rating: 5,
            comment: "Easy transfer to the ferry".to_string(),
        }));

        assert!(result.is_ok());
        // Trimmed before it went on the wire
        assert_eq!(api.inner.submitted.borrow()[0].location, "Britomart");
        store
            .reviews()
            .with(|r| assert_eq!(r.value()[0].location, "Britomart"));
    }

    #[test]
    fn invalid_drafts_never_reach_the_network() {
        let api = ScriptedApi::default();
        let store = ReviewStore::new(api.clone());

        let out_of_range = block_on(store.submit(NewReview {
            location: "Britomart".to_string(),
            rating: 6,
            comment: "ok".to_string(),
        }));
        assert!(matches!(out_of_range, Err(ActionError::Validation(_))));

        let no_location = block_on(store.submit(NewReview {
            location: "   ".to_string(),
            rating: 3,
            comment: "ok".to_string(),
        }));
        assert!(matches!(no_location, Err(ActionError::Validation(_))));

        assert_eq!(api.inner.submit_calls.get(), 0);
    }

    #[test]
    fn rejected_submission_leaves_the_list_alone() {
        let api = ScriptedApi::default();
        *api.inner.submit.borrow_mut() = Some(Err(ApiError::Http {
            status: 401,
            message: "unauthorized".to_string(),
        }));
        let store = ReviewStore::new(api);

        let result = block_on(store.submit(NewReview {
            location: "Britomart".to_string(),
            rating: 4,
            comment: "Fine".to_string(),
        }));

        assert!(matches!(result, Err(ActionError::Api(_))));
        store.reviews().with(|r| assert!(r.value().is_empty()));
    }
}

// ============================================================================
// API CLIENT - HTTP communication with the backend (no business logic)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::CONFIG;
use crate::models::{
    AlertFeed, Coordinate, LoginRequest, LoginResponse, NearbyStopsResponse, NewReview,
    PlanRequest, PlanResponse, RegisterRequest, RegisterResponse, Review, ReviewsResponse, Stop,
    SuggestRequest, SuggestResponse, VerifyRequest, VerifyResponse, WeatherPoint, WeatherResponse,
};
use crate::services::api::{AuthApi, TransitApi};
use crate::services::error::ApiError;

/// HTTP client for the transit backend. Clones share the bearer token slot.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Rc<RefCell<Option<String>>>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url.clone(),
            token: Rc::new(RefCell::new(None)),
        }
    }

    /// Bearer token attached to subsequent requests. The app sets it on
    /// session transitions and clears it on logout.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.borrow().as_deref() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| response.status_text());
            return Err(ApiError::Http { status, message });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self
            .authorized(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorized(Request::post(&url))
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::parse(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 Logging in user: {}", req.username);
        self.post_json("/auth/login", req).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        log::info!("📝 Registering user: {}", req.username);
        self.post_json("/auth/register", req).await
    }

    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError> {
        log::info!("🔍 Verifying stored credential...");
        self.post_json(
            "/auth/verify",
            &VerifyRequest {
                token: token.to_string(),
            },
        )
        .await
    }
}

impl TransitApi for ApiClient {
    async fn nearby_stops(&self, coord: Coordinate, radius_m: f64) -> Result<Vec<Stop>, ApiError> {
        let response: NearbyStopsResponse = self
            .get_json(&format!(
                "/stops/nearby?lat={}&lng={}&radius={}",
                coord.lat, coord.lng, radius_m
            ))
            .await?;
        log::info!("🚏 Nearby stops fetched: {}", response.stops.len());
        Ok(response.stops)
    }

    async fn weather_point(&self, coord: Coordinate) -> Result<WeatherPoint, ApiError> {
        let response: WeatherResponse = self
            .get_json(&format!(
                "/weather/point?lat={}&lng={}",
                coord.lat, coord.lng
            ))
            .await?;
        response
            .forecast
            .ok_or_else(|| ApiError::Parse("weather response missing forecast".to_string()))
    }

    async fn alerts(&self) -> Result<AlertFeed, ApiError> {
        self.get_json("/alerts").await
    }

    async fn plan(&self, req: &PlanRequest) -> Result<PlanResponse, ApiError> {
        log::info!(
            "🗺️ Planning trip ({:.4},{:.4}) → ({:.4},{:.4})",
            req.origin[0],
            req.origin[1],
            req.destination[0],
            req.destination[1]
        );
        self.post_json("/plan", req).await
    }

    async fn suggest_route(&self, req: &SuggestRequest) -> Result<SuggestResponse, ApiError> {
        log::info!("🔀 Requesting alternative for itinerary: {}", req.baseline.id);
        self.post_json("/routes/suggest", req).await
    }

    async fn reviews(&self) -> Result<Vec<Review>, ApiError> {
        let response: ReviewsResponse = self.get_json("/reviews").await?;
        Ok(response.reviews)
    }

    async fn submit_review(&self, review: &NewReview) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post_json("/reviews", review).await?;
        log::info!("⭐ Review posted for: {}", review.location);
        Ok(())
    }
}

// ============================================================================
// API TRAITS - The interfaces the stores consume
// ============================================================================
// Implemented by the gloo-net clients on wasm and by scripted mocks in tests.
// Futures are !Send on purpose: everything runs on the single browser thread.
// ============================================================================

use crate::models::{
    AlertFeed, Coordinate, GeocodeCandidate, LoginRequest, LoginResponse, NewReview, PlanRequest,
    PlanResponse, RegisterRequest, RegisterResponse, Review, Stop, SuggestRequest, SuggestResponse,
    VerifyResponse, WeatherPoint,
};
use crate::services::error::ApiError;

#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError>;
    /// Checks a stored bearer token. A network failure is reported as an
    /// error; the session store treats it the same as an invalid token.
    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait TransitApi {
    async fn nearby_stops(&self, coord: Coordinate, radius_m: f64) -> Result<Vec<Stop>, ApiError>;
    async fn weather_point(&self, coord: Coordinate) -> Result<WeatherPoint, ApiError>;
    async fn alerts(&self) -> Result<AlertFeed, ApiError>;
    async fn plan(&self, req: &PlanRequest) -> Result<PlanResponse, ApiError>;
    async fn suggest_route(&self, req: &SuggestRequest) -> Result<SuggestResponse, ApiError>;
    async fn reviews(&self) -> Result<Vec<Review>, ApiError>;
    async fn submit_review(&self, review: &NewReview) -> Result<(), ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait GeocodeApi {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeCandidate>, ApiError>;
    /// "Current location" labeling: nearest display name for a coordinate
    async fn reverse(&self, coord: Coordinate) -> Result<Option<String>, ApiError>;
}

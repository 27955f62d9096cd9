pub mod auth;
pub mod geocode;
pub mod itinerary;
pub mod location;
pub mod preferences;
pub mod review;
pub mod transit;

pub use auth::{Credential, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, VerifyRequest, VerifyResponse};
pub use geocode::{CandidateKind, GeocodeCandidate};
pub use itinerary::{Itinerary, ItineraryAlternative, PlanContext, PlanRequest, PlanResponse, RouteComparison, SuggestRequest, SuggestResponse};
pub use location::{Coordinate, LocationPair, NamedPlace};
pub use preferences::{Optimize, TravelMode, TravelPreferences};
pub use review::{NewReview, Review, ReviewsResponse};
pub use transit::{Alert, AlertFeed, NearbyStopsResponse, Stop, WeatherPoint, WeatherResponse};

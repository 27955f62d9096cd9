use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Review draft; validated before it is allowed near the network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub location: String,
    pub rating: u8,
    pub comment: String,
}

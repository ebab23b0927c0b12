use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Outbound boundary to the places search/detail service
#[async_trait]
pub trait PlacesPort: Send + Sync {
    async fn find_place(&self, query: &str) -> Result<FindPlaceResponse>;
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse>;
}

/// Body of a "find place from text" response. `candidates` is required; a
/// body without it is malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindPlaceResponse {
    pub candidates: Vec<PlaceCandidate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default)]
    pub place_id: Option<String>,
}

impl FindPlaceResponse {
    /// Identifier of the first candidate, if the service returned one.
    pub fn first_place_id(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.place_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

// Requested alongside the rating but not persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

use serde::{Deserialize, Serialize};
use crate::models::domain::{ClassifiedCandidate, Coordinate};

/// Response for the classify endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub candidates: Vec<ClassifiedCandidate>,
    #[serde(rename = "inCircleCount")]
    pub in_circle_count: usize,
    #[serde(rename = "totalVenues")]
    pub total_venues: usize,
}

/// Response for the fuzz endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzResponse {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for FuzzResponse {
    fn from(c: Coordinate) -> Self {
        Self { lat: c.lat, lng: c.lng }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

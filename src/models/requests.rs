use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Circle, Coordinate, SortBy};

/// Coordinate as received over the wire, range-checked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct CoordinateInput {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl From<CoordinateInput> for Coordinate {
    fn from(input: CoordinateInput) -> Self {
        Coordinate::new(input.lat, input.lng)
    }
}

/// Request to plan a search area
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchAreaRequest {
    #[validate(length(min = 1), nested)]
    pub participants: Vec<CoordinateInput>,
    #[serde(default)]
    #[serde(alias = "custom_center", rename = "customCenter")]
    #[validate(nested)]
    pub custom_center: Option<CoordinateInput>,
    #[serde(default = "default_radius_multiplier")]
    #[serde(alias = "radius_multiplier", rename = "radiusMultiplier")]
    #[validate(range(min = 1.0))]
    pub radius_multiplier: f64,
}

fn default_radius_multiplier() -> f64 {
    1.0
}

impl SearchAreaRequest {
    pub fn participant_coordinates(&self) -> Vec<Coordinate> {
        self.participants.iter().map(|p| Coordinate::from(*p)).collect()
    }
}

/// Request to classify venues against a circle
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClassifyRequest {
    #[validate(nested)]
    pub center: CoordinateInput,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    #[validate(range(min = 0.0))]
    pub radius_km: f64,
    #[validate(nested)]
    pub venues: Vec<CoordinateInput>,
    #[serde(default = "default_true")]
    #[serde(alias = "only_in_circle", rename = "onlyInCircle")]
    pub only_in_circle: bool,
    #[serde(default)]
    #[serde(alias = "sort_by", rename = "sortBy")]
    pub sort_by: SortBy,
}

fn default_true() -> bool {
    true
}

impl ClassifyRequest {
    pub fn circle(&self) -> Circle {
        Circle::new(self.center.into(), self.radius_km)
    }

    pub fn venue_coordinates(&self) -> Vec<Coordinate> {
        self.venues.iter().map(|v| Coordinate::from(*v)).collect()
    }
}

/// Request to blur a participant location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FuzzRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[serde(default)]
    #[serde(alias = "radius_km", rename = "radiusKm")]
    #[validate(range(min = 0.01, max = 50.0))]
    pub radius_km: Option<f64>,
}

/// Request for a participant circle summary
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(nested)]
    pub participants: Vec<CoordinateInput>,
}

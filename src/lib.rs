//! Meetpoint - spatial decision engine for group meeting locations
//!
//! Given participant coordinates, this library computes a fair search circle,
//! keeps its center on land, classifies candidate venues against it and blurs
//! participant locations for privacy.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    apply_fuzzing, classify_candidates, compute_centroid, compute_mec, haversine_distance, resolve_search_center,
    LandResolver, LocationClassifier, SearchPlanner,
};
pub use crate::models::{Circle, ClassifiedCandidate, Coordinate, LocationClassification, SearchArea};

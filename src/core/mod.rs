// Spatial decision engine
pub mod centroid;
pub mod classify;
pub mod distance;
pub mod fuzz;
pub mod land;
pub mod mec;
pub mod planner;

pub use centroid::compute_centroid;
pub use classify::{classify_candidates, rank_candidates, retain_in_circle};
pub use distance::{haversine_distance, calculate_bounding_box};
pub use fuzz::{apply_fuzzing, apply_fuzzing_with_rng, DEFAULT_FUZZ_RADIUS_KM};
pub use land::{resolve_search_center, ClassifierError, LandResolver, LocationClassifier, ResolvedCenter};
pub use mec::{compute_mec, compute_mec_with_rng, MIN_RADIUS_KM};
pub use planner::{analyze, PlanError, PlannerOptions, SearchPlanner};

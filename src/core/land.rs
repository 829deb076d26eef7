use async_trait::async_trait;
use thiserror::Error;

use crate::core::distance::{km_to_lat_degrees, km_to_lng_degrees, normalize_lng};
use crate::models::{Coordinate, LocationClassification};

/// Probe distances from the candidate center, nearest first, in kilometers
pub const DEFAULT_PROBE_RADII_KM: [f64; 5] = [0.5, 1.0, 2.0, 3.0, 5.0];

/// Largest snap distance used when the caller has no preference
pub const DEFAULT_MAX_SNAP_RADIUS_KM: f64 = 5.0;

/// Centers closer than this (in degrees on either axis) count as unchanged
pub const DEFAULT_ADJUST_EPSILON_DEG: f64 = 1e-4;

/// Probe bearings in degrees, clockwise from north: N, NE, E, SE, S, SW, W, NW
const COMPASS_BEARINGS_DEG: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// Errors reported by a location oracle for a single query
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Location oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Location oracle timed out")]
    Timeout,

    #[error("Invalid oracle response: {0}")]
    InvalidResponse(String),
}

/// Capability that tells whether a coordinate is addressable (on land)
#[async_trait]
pub trait LocationClassifier: Send + Sync {
    async fn classify(&self, point: Coordinate) -> Result<LocationClassification, ClassifierError>;
}

/// Outcome of a land resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCenter {
    pub center: Coordinate,
    pub original: Coordinate,
    /// True when `center` moved away from `original`
    pub was_adjusted: bool,
    /// False when every query came back unaddressable or failed
    pub found_addressable: bool,
    pub formatted_address: Option<String>,
    /// Oracle queries issued, including the candidate itself
    pub probes: usize,
    /// Queries that errored and were counted as not addressable
    pub failed_probes: usize,
}

impl ResolvedCenter {
    /// True when no addressable point was found and the original was kept
    pub fn is_fallback(&self) -> bool {
        !self.found_addressable
    }
}

/// Snaps a candidate center onto the nearest addressable point
#[derive(Debug, Clone)]
pub struct LandResolver {
    probe_radii_km: Vec<f64>,
    adjust_epsilon_deg: f64,
}

impl Default for LandResolver {
    fn default() -> Self {
        Self {
            probe_radii_km: DEFAULT_PROBE_RADII_KM.to_vec(),
            adjust_epsilon_deg: DEFAULT_ADJUST_EPSILON_DEG,
        }
    }
}

impl LandResolver {
    pub fn new(probe_radii_km: Vec<f64>, adjust_epsilon_deg: f64) -> Self {
        Self {
            probe_radii_km,
            adjust_epsilon_deg,
        }
    }

    pub fn with_adjust_epsilon(adjust_epsilon_deg: f64) -> Self {
        Self {
            adjust_epsilon_deg,
            ..Self::default()
        }
    }

    /// Probe points around `center` no farther than `max_radius_km`, in query order
    pub fn probe_points(&self, center: Coordinate, max_radius_km: f64) -> Vec<Coordinate> {
        self.probe_radii_km
            .iter()
            .filter(|r| **r <= max_radius_km)
            .flat_map(|&radius_km| {
                COMPASS_BEARINGS_DEG
                    .iter()
                    .map(move |bearing| offset(center, radius_km, *bearing))
            })
            .collect()
    }

    /// Resolve `candidate` to an addressable point
    ///
    /// The candidate itself is tried first, then the probe ring at each
    /// radius in compass order. The first addressable point wins. Oracle
    /// errors count as "not addressable" and never abort the search. If
    /// nothing within `max_radius_km` is addressable the candidate is
    /// returned unchanged.
    ///
    /// Holds no state between probes, so the future may be dropped at any
    /// await point.
    pub async fn resolve<C>(&self, candidate: Coordinate, classifier: &C, max_radius_km: f64) -> ResolvedCenter
    where
        C: LocationClassifier + ?Sized,
    {
        let mut probes = 0;
        let mut failed_probes = 0;

        let points = std::iter::once(candidate).chain(self.probe_points(candidate, max_radius_km));
        for point in points {
            probes += 1;
            match classifier.classify(point).await {
                Ok(result) if result.is_addressable => {
                    return ResolvedCenter {
                        center: point,
                        original: candidate,
                        was_adjusted: self.was_adjusted(candidate, point),
                        found_addressable: true,
                        formatted_address: result.formatted_address,
                        probes,
                        failed_probes,
                    };
                }
                Ok(_) => {}
                Err(_) => failed_probes += 1,
            }
        }

        ResolvedCenter {
            center: candidate,
            original: candidate,
            was_adjusted: false,
            found_addressable: false,
            formatted_address: None,
            probes,
            failed_probes,
        }
    }

    /// Whether `resolved` differs materially from `original`
    pub fn was_adjusted(&self, original: Coordinate, resolved: Coordinate) -> bool {
        (original.lat - resolved.lat).abs() > self.adjust_epsilon_deg
            || (original.lng - resolved.lng).abs() > self.adjust_epsilon_deg
    }
}

/// Resolve a search center with the default probe schedule
///
/// Returns the first addressable point found, or `point` itself when none is.
pub async fn resolve_search_center<C>(point: Coordinate, classifier: &C, max_radius_km: f64) -> Coordinate
where
    C: LocationClassifier + ?Sized,
{
    LandResolver::default()
        .resolve(point, classifier, max_radius_km)
        .await
        .center
}

fn offset(center: Coordinate, radius_km: f64, bearing_deg: f64) -> Coordinate {
    let bearing = bearing_deg.to_radians();
    let north_km = radius_km * bearing.cos();
    let east_km = radius_km * bearing.sin();

    Coordinate::new(
        (center.lat + km_to_lat_degrees(north_km)).clamp(-90.0, 90.0),
        normalize_lng(center.lng + km_to_lng_degrees(east_km, center.lat)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::haversine_distance;
    use std::sync::Mutex;

    /// Answers from a fixed script, one entry per query
    struct ScriptedClassifier {
        answers: Mutex<Vec<Result<bool, ()>>>,
        calls: Mutex<Vec<Coordinate>>,
    }

    impl ScriptedClassifier {
        fn new(mut answers: Vec<Result<bool, ()>>) -> Self {
            answers.reverse();
            Self {
                answers: Mutex::new(answers),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Coordinate> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LocationClassifier for ScriptedClassifier {
        async fn classify(&self, point: Coordinate) -> Result<LocationClassification, ClassifierError> {
            self.calls.lock().unwrap().push(point);
            match self.answers.lock().unwrap().pop() {
                Some(Ok(true)) => Ok(LocationClassification::addressable("1 Harbour St")),
                Some(Ok(false)) | None => Ok(LocationClassification::unaddressable()),
                Some(Err(())) => Err(ClassifierError::Timeout),
            }
        }
    }

    #[test]
    fn test_addressable_center_is_kept() {
        let classifier = ScriptedClassifier::new(vec![Ok(true)]);
        let center = Coordinate::new(51.5, -0.12);

        let resolved = tokio_test::block_on(LandResolver::default().resolve(center, &classifier, 5.0));

        assert_eq!(resolved.center, center);
        assert!(!resolved.was_adjusted);
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.probes, 1);
        assert_eq!(resolved.formatted_address.as_deref(), Some("1 Harbour St"));
    }

    #[test]
    fn test_first_addressable_probe_wins() {
        // Center and north are water, north-east is land
        let classifier = ScriptedClassifier::new(vec![Ok(false), Ok(false), Ok(true)]);
        let center = Coordinate::new(0.0, 0.0);

        let resolved = tokio_test::block_on(LandResolver::default().resolve(center, &classifier, 5.0));

        assert!(resolved.was_adjusted);
        assert_eq!(resolved.probes, 3);
        let d = haversine_distance(center, resolved.center);
        assert!((d - 0.5).abs() < 0.01, "NE probe should be 0.5km out, got {}", d);
        assert!(resolved.center.lat > 0.0 && resolved.center.lng > 0.0);
    }

    #[test]
    fn test_oracle_errors_do_not_abort() {
        let classifier = ScriptedClassifier::new(vec![Err(()), Err(()), Ok(false), Ok(true)]);
        let center = Coordinate::new(10.0, 10.0);

        let resolved = tokio_test::block_on(LandResolver::default().resolve(center, &classifier, 5.0));

        assert!(resolved.was_adjusted);
        assert_eq!(resolved.failed_probes, 2);
        assert_eq!(resolved.probes, 4);
    }

    #[test]
    fn test_fallback_to_original() {
        let classifier = ScriptedClassifier::new(vec![]);
        let center = Coordinate::new(-30.0, -140.0);

        let resolved = tokio_test::block_on(LandResolver::default().resolve(center, &classifier, 5.0));

        assert_eq!(resolved.center, center);
        assert!(!resolved.was_adjusted);
        assert!(resolved.is_fallback());
        // Candidate plus 8 bearings at 5 radii
        assert_eq!(resolved.probes, 41);
    }

    #[test]
    fn test_max_radius_limits_probes() {
        let classifier = ScriptedClassifier::new(vec![]);
        let center = Coordinate::new(-30.0, -140.0);

        let resolved = tokio_test::block_on(LandResolver::default().resolve(center, &classifier, 1.0));

        assert_eq!(resolved.probes, 1 + 16);
        for p in classifier.calls() {
            assert!(haversine_distance(center, p) <= 1.01);
        }
    }

    #[test]
    fn test_probe_order_is_compass_then_radius() {
        let center = Coordinate::new(45.0, 7.0);
        let probes = LandResolver::default().probe_points(center, 5.0);

        assert_eq!(probes.len(), 40);
        // First ring: north, then east two steps later
        assert!(probes[0].lat > center.lat && (probes[0].lng - center.lng).abs() < 1e-12);
        assert!(probes[2].lng > center.lng && (probes[2].lat - center.lat).abs() < 1e-12);
        // Each ring is farther out than the last
        let first = haversine_distance(center, probes[0]);
        let last = haversine_distance(center, probes[39]);
        assert!(first < last);
    }

    #[test]
    fn test_longitude_offset_corrected_for_latitude() {
        let center = Coordinate::new(60.0, 0.0);
        let probes = LandResolver::default().probe_points(center, 0.5);
        let east = probes[2];
        assert!((haversine_distance(center, east) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_adjust_epsilon() {
        let resolver = LandResolver::default();
        let a = Coordinate::new(10.0, 10.0);
        assert!(!resolver.was_adjusted(a, Coordinate::new(10.00005, 10.0)));
        assert!(resolver.was_adjusted(a, Coordinate::new(10.001, 10.0)));
    }

    #[test]
    fn test_free_function_returns_coordinate() {
        let classifier = ScriptedClassifier::new(vec![Ok(false), Ok(true)]);
        let center = Coordinate::new(0.0, 0.0);
        let resolved = tokio_test::block_on(resolve_search_center(center, &classifier, 5.0));
        assert!(resolved.lat > 0.0);
    }
}

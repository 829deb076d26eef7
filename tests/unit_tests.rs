// Unit tests for Meetpoint

use geo::HaversineDistance;
use meetpoint::core::{
    centroid::compute_centroid,
    classify::classify_candidates,
    distance::{haversine_distance, EARTH_RADIUS_KM},
    fuzz::{apply_fuzzing, apply_fuzzing_with_rng},
    mec::{compute_mec, compute_mec_with_rng, is_covered, MIN_RADIUS_KM},
};
use meetpoint::models::{Circle, Coordinate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);
const LOS_ANGELES: Coordinate = Coordinate::new(34.0522, -118.2437);

#[test]
fn test_haversine_distance_zero() {
    assert!(haversine_distance(NEW_YORK, NEW_YORK) < 1e-9);
}

#[test]
fn test_haversine_new_york_to_los_angeles() {
    let distance = haversine_distance(NEW_YORK, LOS_ANGELES);
    assert!((distance - 3936.0).abs() < 39.36, "Expected ~3936km, got {}", distance);
}

#[test]
fn test_haversine_symmetric() {
    let pairs = [
        (NEW_YORK, LOS_ANGELES),
        (Coordinate::new(-33.9, 18.4), Coordinate::new(64.1, -21.9)),
        (Coordinate::new(0.0, 179.9), Coordinate::new(0.0, -179.9)),
    ];
    for (a, b) in pairs {
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-9);
    }
}

#[test]
fn test_haversine_triangle_inequality() {
    let a = Coordinate::new(48.8566, 2.3522);
    let b = Coordinate::new(41.9028, 12.4964);
    let c = Coordinate::new(52.5200, 13.4050);
    assert!(haversine_distance(a, c) <= haversine_distance(a, b) + haversine_distance(b, c) + 1e-9);
}

#[test]
fn test_haversine_agrees_with_geo() {
    // geo uses the mean radius 6371.0088 km, so scale before comparing
    let ours = haversine_distance(NEW_YORK, LOS_ANGELES);
    let theirs_m = geo::Point::from(NEW_YORK).haversine_distance(&geo::Point::from(LOS_ANGELES));
    let theirs = theirs_m / 1000.0 * (EARTH_RADIUS_KM / 6371.0088);
    assert!((ours - theirs).abs() < 0.01, "ours {} vs geo {}", ours, theirs);
}

#[test]
fn test_centroid_of_square_is_center() {
    let points = [
        Coordinate::new(1.0, 1.0),
        Coordinate::new(1.0, -1.0),
        Coordinate::new(-1.0, 1.0),
        Coordinate::new(-1.0, -1.0),
    ];
    let c = compute_centroid(&points).unwrap();
    assert!(c.lat.abs() < 1e-9 && c.lng.abs() < 1e-9);
}

#[test]
fn test_mec_single_point() {
    let p = Coordinate::new(35.6762, 139.6503);
    assert_eq!(compute_mec(&[p]), Some(Circle::new(p, 1.0)));
}

#[test]
fn test_mec_two_points() {
    let circle = compute_mec(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)]).unwrap();
    assert!((circle.radius_km - 55.6).abs() < 0.1);
    assert!(circle.center.lat.abs() < 1e-9);
    assert!((circle.center.lng - 0.5).abs() < 1e-9);
}

#[test]
fn test_mec_order_independence_of_coverage() {
    let mut points: Vec<Coordinate> = (0..30)
        .map(|i| {
            let t = i as f64;
            Coordinate::new(-33.87 + (t * 1.3).sin() * 0.4, 151.21 + (t * 0.7).cos() * 0.5)
        })
        .collect();

    let mut shuffler = StdRng::seed_from_u64(99);
    for round in 0..20 {
        points.shuffle(&mut shuffler);
        let circle = compute_mec_with_rng(&points, &mut StdRng::seed_from_u64(round)).unwrap();
        assert!(circle.radius_km >= MIN_RADIUS_KM);
        for p in &points {
            assert!(is_covered(&circle, *p), "round {}: {:?} not covered", round, p);
        }
    }
}

#[test]
fn test_mec_spread_over_continent() {
    let points = [
        NEW_YORK,
        LOS_ANGELES,
        Coordinate::new(41.8781, -87.6298),
        Coordinate::new(29.7604, -95.3698),
        Coordinate::new(47.6062, -122.3321),
    ];
    let circle = compute_mec(&points).unwrap();
    for p in &points {
        assert!(haversine_distance(circle.center, *p) <= circle.radius_km * 1.001);
    }
    // Never smaller than half the widest pair
    assert!(circle.radius_km >= haversine_distance(NEW_YORK, Coordinate::new(47.6062, -122.3321)) / 2.0 - 1e-6);
}

#[test]
fn test_fuzzing_bound() {
    let p = NEW_YORK;
    for _ in 0..200 {
        let fuzzed = apply_fuzzing(p, 0.5);
        assert_ne!(fuzzed, p);
        // Box corners reach 0.5 * sqrt(2)
        assert!(haversine_distance(p, fuzzed) <= 0.72);
    }
}

#[test]
fn test_fuzzing_seeded_is_reproducible() {
    let a = apply_fuzzing_with_rng(NEW_YORK, 0.5, &mut StdRng::seed_from_u64(5));
    let b = apply_fuzzing_with_rng(NEW_YORK, 0.5, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}

#[test]
fn test_classification_boundary_inclusive() {
    let center = Coordinate::new(0.0, 0.0);
    let venue = Coordinate::new(0.0, 0.1);
    let exact = haversine_distance(center, venue);

    let on_boundary = classify_candidates(&Circle::new(center, exact), &[venue]);
    assert!(on_boundary[0].in_circle);

    let shrunk = classify_candidates(&Circle::new(center, exact - 1e-9), &[venue]);
    assert!(!shrunk[0].in_circle);
}

#[test]
fn test_classification_has_no_covering_slack() {
    let center = Coordinate::new(0.0, 0.0);
    let circle = Circle::new(center, 10.0);
    // 10.005 km is within the 0.1% covering tolerance but outside the circle
    let venue = Coordinate::new(10.005 / 111.19492664455873, 0.0);
    let classified = classify_candidates(&circle, &[venue]);
    assert!(classified[0].distance_from_center_km > 10.0);
    assert!(!classified[0].in_circle);
}

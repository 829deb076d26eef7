use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::core::distance::{haversine_distance, normalize_lng, unwrap_lng};
use crate::models::{Circle, Coordinate};

/// Smallest radius a search circle may have, in kilometers
pub const MIN_RADIUS_KM: f64 = 1.0;

/// Relative slack allowed when testing whether a point is covered
pub const COVERING_TOLERANCE: f64 = 1.001;

/// Compute a covering circle for a set of participant locations
///
/// Randomized incremental (Welzl-style) construction on great-circle
/// distance. The circle is approximate: two-point circles are centred on the
/// lat/lng midpoint and three-point circles on the lat/lng mean of the three
/// boundary points rather than on a true circumcenter. Every input point is
/// still guaranteed to lie inside the returned circle and the radius is never
/// below [`MIN_RADIUS_KM`].
///
/// Randomness comes from a generator seeded for this call only. Returns
/// `None` for an empty slice.
pub fn compute_mec(points: &[Coordinate]) -> Option<Circle> {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    compute_mec_with_rng(points, &mut rng)
}

/// Same as [`compute_mec`] with a caller-supplied generator
///
/// Pass a seeded `StdRng` for reproducible output.
pub fn compute_mec_with_rng<R: Rng + ?Sized>(points: &[Coordinate], rng: &mut R) -> Option<Circle> {
    match points {
        [] => None,
        [only] => Some(circle_from_one(*only)),
        _ => {
            let mut shuffled = points.to_vec();
            shuffled.shuffle(rng);
            Some(enclose(&shuffled))
        }
    }
}

/// Compute the circle without shuffling, in the given point order
pub fn compute_mec_ordered(points: &[Coordinate]) -> Option<Circle> {
    match points {
        [] => None,
        [only] => Some(circle_from_one(*only)),
        _ => Some(enclose(points)),
    }
}

/// Whether `point` lies within `circle`, allowing [`COVERING_TOLERANCE`] slack
#[inline]
pub fn is_covered(circle: &Circle, point: Coordinate) -> bool {
    haversine_distance(circle.center, point) <= circle.radius_km * COVERING_TOLERANCE
}

fn enclose(points: &[Coordinate]) -> Circle {
    let mut circle = circle_from_one(points[0]);

    for i in 1..points.len() {
        let p = points[i];
        if !is_covered(&circle, p) {
            circle = enclose_with_one(&points[..i], p);
        }
    }

    // The boundary constructions are not exact circumcircles, so a point
    // accepted early can fall outside a later circle. Grow to cover it.
    let farthest = points
        .iter()
        .map(|p| haversine_distance(circle.center, *p))
        .fold(0.0_f64, f64::max);
    if farthest > circle.radius_km {
        circle.radius_km = farthest;
    }

    circle
}

fn enclose_with_one(points: &[Coordinate], b1: Coordinate) -> Circle {
    let mut circle = circle_from_one(b1);

    for j in 0..points.len() {
        let p = points[j];
        if !is_covered(&circle, p) {
            circle = enclose_with_two(&points[..j], b1, p);
        }
    }

    circle
}

fn enclose_with_two(points: &[Coordinate], b1: Coordinate, b2: Coordinate) -> Circle {
    let mut circle = circle_from_two(b1, b2);

    for &p in points {
        if !is_covered(&circle, p) {
            circle = circle_from_three(b1, b2, p);
        }
    }

    circle
}

fn circle_from_one(p: Coordinate) -> Circle {
    Circle::new(p, MIN_RADIUS_KM)
}

fn circle_from_two(p1: Coordinate, p2: Coordinate) -> Circle {
    let center = mean_position(&[p1, p2]);
    let radius = haversine_distance(p1, p2) / 2.0;
    Circle::new(center, radius.max(MIN_RADIUS_KM))
}

fn circle_from_three(p1: Coordinate, p2: Coordinate, p3: Coordinate) -> Circle {
    let center = mean_position(&[p1, p2, p3]);
    let radius = [p1, p2, p3]
        .iter()
        .map(|p| haversine_distance(center, *p))
        .fold(0.0_f64, f64::max);
    Circle::new(center, radius.max(MIN_RADIUS_KM))
}

/// Plain lat/lng mean, with longitudes unwrapped around the first point
fn mean_position(points: &[Coordinate]) -> Coordinate {
    let reference = points[0].lng;
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| unwrap_lng(p.lng, reference)).sum::<f64>() / n;
    Coordinate::new(lat, normalize_lng(lng))
}

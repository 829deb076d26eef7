use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::distance::{calculate_bounding_box, normalize_lng};
use crate::models::Coordinate;

/// Default blur radius for participant locations, in kilometers
pub const DEFAULT_FUZZ_RADIUS_KM: f64 = 0.5;

/// Blur a coordinate by a random offset within `radius_km`
///
/// The offset is drawn uniformly from the lat/lng box spanning
/// `±radius_km / 111` degrees of latitude and `±radius_km / (111 * cos(lat))`
/// degrees of longitude, so the corners reach `radius_km * √2`. Intended for
/// casual obfuscation only; the generator is not cryptographically secure.
///
/// The result never equals the input for a positive radius.
pub fn apply_fuzzing(point: Coordinate, radius_km: f64) -> Coordinate {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    apply_fuzzing_with_rng(point, radius_km, &mut rng)
}

/// Resampling budget before falling back to a one-ulp latitude step
const MAX_DRAWS: usize = 16;

/// Same as [`apply_fuzzing`] with a caller-supplied generator
pub fn apply_fuzzing_with_rng<R: Rng + ?Sized>(point: Coordinate, radius_km: f64, rng: &mut R) -> Coordinate {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return point;
    }

    let bbox = calculate_bounding_box(point, radius_km);
    let lat_delta = bbox.max_lat - point.lat;
    let lng_delta = bbox.max_lng - point.lng;

    for _ in 0..MAX_DRAWS {
        let lat_offset = rng.random_range(-1.0..=1.0) * lat_delta;
        let lng_offset = rng.random_range(-1.0..=1.0) * lng_delta;

        let fuzzed = Coordinate::new(
            (point.lat + lat_offset).clamp(-90.0, 90.0),
            normalize_lng(point.lng + lng_offset),
        );
        if fuzzed != point {
            return fuzzed;
        }
    }

    // Offsets below float resolution at this coordinate
    Coordinate::new(step_toward_equator(point.lat), point.lng)
}

/// Smallest representable move of `lat` that stays in range
fn step_toward_equator(lat: f64) -> f64 {
    if lat == 0.0 {
        f64::from_bits(1)
    } else {
        f64::from_bits(lat.to_bits() - 1)
    }
}

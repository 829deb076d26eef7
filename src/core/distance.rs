use crate::models::{BoundingBox, Coordinate};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate kilometers per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;

// Keeps longitude spans finite at the poles.
const MIN_COS_LAT: f64 = 1e-6;

/// Calculate the Haversine distance between two points in kilometers
///
/// Symmetric in its arguments and zero for identical points. Inputs are
/// assumed to be range-checked by the caller.
#[inline]
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Degrees of longitude spanned by `km` at the given latitude
#[inline]
pub fn km_to_lng_degrees(km: f64, lat: f64) -> f64 {
    km / (KM_PER_DEGREE * lat.to_radians().cos().abs().max(MIN_COS_LAT))
}

/// Degrees of latitude spanned by `km`
#[inline]
pub fn km_to_lat_degrees(km: f64) -> f64 {
    km / KM_PER_DEGREE
}

/// Calculate a bounding box around a center point
///
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn calculate_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let lat_delta = km_to_lat_degrees(radius_km);
    let lng_delta = km_to_lng_degrees(radius_km, center.lat);

    BoundingBox {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lng: center.lng - lng_delta,
        max_lng: center.lng + lng_delta,
    }
}

/// Wrap a longitude into [-180, 180]
#[inline]
pub fn normalize_lng(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lng > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Shift `lng` by whole turns so it lies within 180° of `reference`
#[inline]
pub fn unwrap_lng(lng: f64, reference: f64) -> f64 {
    let delta = lng - reference;
    if (-180.0..=180.0).contains(&delta) {
        return lng;
    }
    reference + (delta + 180.0).rem_euclid(360.0) - 180.0
}

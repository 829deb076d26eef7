use crate::models::Coordinate;

/// Compute the spherical centroid of a set of coordinates
///
/// Each point is lifted to a unit vector, the vectors are averaged and the
/// mean direction is projected back to latitude/longitude. This keeps the
/// result sensible across the antimeridian and near the poles.
///
/// A single point is returned unchanged. Returns `None` for an empty slice.
pub fn compute_centroid(points: &[Coordinate]) -> Option<Coordinate> {
    match points {
        [] => None,
        [only] => Some(*only),
        _ => {
            let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
            for p in points {
                let lat = p.lat.to_radians();
                let lng = p.lng.to_radians();
                x += lat.cos() * lng.cos();
                y += lat.cos() * lng.sin();
                z += lat.sin();
            }

            let n = points.len() as f64;
            let (x, y, z) = (x / n, y / n, z / n);

            let lng = y.atan2(x);
            let lat = z.atan2((x * x + y * y).sqrt());

            Some(Coordinate::new(lat.to_degrees(), lng.to_degrees()))
        }
    }
}

use crate::core::distance::haversine_distance;
use crate::models::{Circle, ClassifiedCandidate, Coordinate, SortBy};

/// Classify venues against a search circle
///
/// A venue is in the circle when its distance from the center is at most
/// `circle.radius_km`. The boundary is inclusive and carries no tolerance.
/// Output order matches input order.
pub fn classify_candidates(circle: &Circle, venues: &[Coordinate]) -> Vec<ClassifiedCandidate> {
    venues.iter().map(|venue| classify_one(circle, *venue)).collect()
}

#[inline]
pub fn classify_one(circle: &Circle, venue: Coordinate) -> ClassifiedCandidate {
    let distance_from_center_km = haversine_distance(circle.center, venue);
    ClassifiedCandidate {
        coordinate: venue,
        distance_from_center_km,
        in_circle: distance_from_center_km <= circle.radius_km,
    }
}

/// Order classified candidates for display
///
/// Distance ordering is ascending and stable, so ties keep input order.
pub fn rank_candidates(mut candidates: Vec<ClassifiedCandidate>, sort_by: SortBy) -> Vec<ClassifiedCandidate> {
    if sort_by == SortBy::Distance {
        candidates.sort_by(|a, b| {
            a.distance_from_center_km
                .partial_cmp(&b.distance_from_center_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    candidates
}

/// Drop candidates outside the circle
pub fn retain_in_circle(mut candidates: Vec<ClassifiedCandidate>) -> Vec<ClassifiedCandidate> {
    candidates.retain(|c| c.in_circle);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle() -> Circle {
        Circle::new(Coordinate::new(40.7128, -74.0060), 5.0)
    }

    #[test]
    fn test_order_preserved() {
        let venues = vec![
            Coordinate::new(41.0, -74.0),
            Coordinate::new(40.72, -74.01),
            Coordinate::new(40.7128, -74.0060),
        ];
        let classified = classify_candidates(&circle(), &venues);

        assert_eq!(classified.len(), 3);
        for (c, v) in classified.iter().zip(&venues) {
            assert_eq!(c.coordinate, *v);
        }
        assert!(!classified[0].in_circle);
        assert!(classified[1].in_circle);
        assert!(classified[2].in_circle);
        assert!(classified[2].distance_from_center_km < 1e-9);
    }

    #[test]
    fn test_empty_venues() {
        assert!(classify_candidates(&circle(), &[]).is_empty());
    }

    #[test]
    fn test_rank_by_distance() {
        let venues = vec![
            Coordinate::new(40.80, -74.0060),
            Coordinate::new(40.72, -74.0060),
            Coordinate::new(40.75, -74.0060),
        ];
        let ranked = rank_candidates(classify_candidates(&circle(), &venues), SortBy::Distance);
        let distances: Vec<f64> = ranked.iter().map(|c| c.distance_from_center_km).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_rank_input_keeps_order() {
        let venues = vec![Coordinate::new(40.80, -74.0060), Coordinate::new(40.72, -74.0060)];
        let ranked = rank_candidates(classify_candidates(&circle(), &venues), SortBy::Input);
        assert_eq!(ranked[0].coordinate, venues[0]);
    }

    #[test]
    fn test_retain_in_circle() {
        let venues = vec![Coordinate::new(41.5, -74.0), Coordinate::new(40.713, -74.006)];
        let kept = retain_in_circle(classify_candidates(&circle(), &venues));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].coordinate, venues[1]);
    }
}

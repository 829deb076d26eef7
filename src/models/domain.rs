use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

// geo uses (x, y) = (lng, lat)
impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Self { lat: p.y(), lng: p.x() }
    }
}

/// Search circle on the Earth's surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Coordinate,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
}

impl Circle {
    pub const fn new(center: Coordinate, radius_km: f64) -> Self {
        Self { center, radius_km }
    }
}

/// Result of asking a location oracle about a single coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationClassification {
    #[serde(rename = "isAddressable")]
    pub is_addressable: bool,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: Option<String>,
}

impl LocationClassification {
    pub fn addressable(formatted_address: impl Into<String>) -> Self {
        Self {
            is_addressable: true,
            formatted_address: Some(formatted_address.into()),
        }
    }

    pub fn unaddressable() -> Self {
        Self {
            is_addressable: false,
            formatted_address: None,
        }
    }
}

/// Venue annotated with its position relative to a search circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCandidate {
    pub coordinate: Coordinate,
    #[serde(rename = "distanceFromCenterKm")]
    pub distance_from_center_km: f64,
    #[serde(rename = "inCircle")]
    pub in_circle: bool,
}

/// Resolved search area handed to the venue lookup layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchArea {
    pub center: Coordinate,
    /// Radius used for in-circle classification
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    /// Radius used for the external venue search (`radius_km * multiplier`)
    #[serde(rename = "searchRadiusKm")]
    pub search_radius_km: f64,
    #[serde(rename = "wasSnapped")]
    pub was_snapped: bool,
    /// False when no addressable center was found and the computed one is a fallback
    #[serde(rename = "centerResolved")]
    pub center_resolved: bool,
    #[serde(rename = "originalCenter")]
    pub original_center: Coordinate,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: Option<String>,
    #[serde(rename = "participantCentroid")]
    pub participant_centroid: Coordinate,
    #[serde(rename = "participantCount")]
    pub participant_count: usize,
}

impl SearchArea {
    /// Circle used for classifying venues
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius_km)
    }
}

/// Summary of a participant set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleAnalysis {
    #[serde(rename = "participantCount")]
    pub participant_count: usize,
    pub circle: Option<Circle>,
    pub centroid: Option<Coordinate>,
}

/// Ordering applied to classified candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Distance,
    Input,
}

/// Lat/lng-aligned box around a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

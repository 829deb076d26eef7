// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Circle, CircleAnalysis, ClassifiedCandidate, Coordinate, LocationClassification, SearchArea,
    SortBy,
};
pub use requests::{AnalysisRequest, ClassifyRequest, CoordinateInput, FuzzRequest, SearchAreaRequest};
pub use responses::{ClassifyResponse, ErrorResponse, FuzzResponse, HealthResponse};

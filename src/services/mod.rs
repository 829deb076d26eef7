// Service exports
pub mod geocoding;

pub use geocoding::{GeocodingError, GoogleGeocoder};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::core::land::{ClassifierError, LocationClassifier};
use crate::models::{Coordinate, LocationClassification};

/// Result types that mark a point as open water or an unaddressed plot
const NON_ADDRESSABLE_TYPES: [&str; 2] = ["natural_feature", "plus_code"];

/// Errors that can occur when calling the geocoding API
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<GeocodingError> for ClassifierError {
    fn from(err: GeocodingError) -> Self {
        match err {
            GeocodingError::RequestError(e) if e.is_timeout() => ClassifierError::Timeout,
            GeocodingError::RequestError(e) => ClassifierError::Unavailable(e.to_string()),
            GeocodingError::ApiError(msg) => ClassifierError::Unavailable(msg),
            GeocodingError::InvalidResponse(msg) => ClassifierError::InvalidResponse(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

impl GeocodeResult {
    fn is_addressable(&self) -> bool {
        !self.types.is_empty()
            && self
                .types
                .iter()
                .any(|t| !NON_ADDRESSABLE_TYPES.contains(&t.as_str()))
    }
}

/// Reverse-geocoding client used as the land oracle
///
/// A point is addressable when the API returns at least one result that is
/// not just a natural feature (sea, lake) or a bare plus code.
pub struct GoogleGeocoder {
    base_url: String,
    api_key: String,
    language: Option<String>,
    client: Client,
}

impl GoogleGeocoder {
    /// Create a new geocoding client
    pub fn new(
        base_url: String,
        api_key: String,
        language: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GeocodingError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            language,
            client,
        })
    }

    fn reverse_url(&self, point: Coordinate) -> String {
        let mut url = format!(
            "{}/geocode/json?latlng={},{}&key={}",
            self.base_url.trim_end_matches('/'),
            point.lat,
            point.lng,
            urlencoding::encode(&self.api_key)
        );
        if let Some(language) = &self.language {
            url.push_str("&language=");
            url.push_str(&urlencoding::encode(language));
        }
        url
    }

    /// Reverse-geocode a coordinate
    pub async fn reverse_geocode(&self, point: Coordinate) -> Result<LocationClassification, GeocodingError> {
        let url = self.reverse_url(point);

        tracing::debug!("Reverse geocoding ({}, {})", point.lat, point.lng);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodingError::ApiError(format!(
                "Reverse geocoding failed: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidResponse(format!("Failed to parse geocode response: {}", e)))?;

        match body.status.as_str() {
            "OK" => Ok(body
                .results
                .into_iter()
                .find(GeocodeResult::is_addressable)
                .map(|r| LocationClassification {
                    is_addressable: true,
                    formatted_address: r.formatted_address,
                })
                .unwrap_or_else(LocationClassification::unaddressable)),
            "ZERO_RESULTS" => Ok(LocationClassification::unaddressable()),
            other => Err(GeocodingError::ApiError(match body.error_message {
                Some(message) => format!("{}: {}", other, message),
                None => other.to_string(),
            })),
        }
    }
}

#[async_trait]
impl LocationClassifier for GoogleGeocoder {
    async fn classify(&self, point: Coordinate) -> Result<LocationClassification, ClassifierError> {
        self.reverse_geocode(point).await.map_err(|e| {
            tracing::warn!("Land classification failed for ({}, {}): {}", point.lat, point.lng, e);
            ClassifierError::from(e)
        })
    }
}

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{
    analyze, apply_fuzzing, classify_candidates, rank_candidates, retain_in_circle, LocationClassifier, SearchPlanner,
};
use crate::models::{
    AnalysisRequest, ClassifyRequest, ClassifyResponse, Coordinate, ErrorResponse, FuzzRequest, FuzzResponse,
    HealthResponse, SearchAreaRequest,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn LocationClassifier>,
    pub planner: SearchPlanner,
    pub fuzz_radius_km: f64,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search-area", web::post().to(search_area))
        .route("/candidates/classify", web::post().to(classify))
        .route("/participants/fuzz", web::post().to(fuzz))
        .route("/analysis", web::post().to(analysis));
}

fn validation_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Plan a search area
///
/// POST /api/v1/search-area
///
/// Request body:
/// ```json
/// {
///   "participants": [{"lat": 0.0, "lng": 0.0}],
///   "customCenter": {"lat": 0.0, "lng": 0.0},
///   "radiusMultiplier": 1.0
/// }
/// ```
async fn search_area(state: web::Data<AppState>, req: web::Json<SearchAreaRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search-area request: field_errors={:?}", errors);
        return validation_error(errors.to_string());
    }

    let participants = req.participant_coordinates();
    let custom_center = req.custom_center.map(Coordinate::from);

    tracing::info!(
        "Planning search area for {} participants (custom center: {})",
        participants.len(),
        custom_center.is_some()
    );

    // Dropping this future on client disconnect abandons the land probes
    let result = state
        .planner
        .plan(&participants, custom_center, req.radius_multiplier, state.classifier.as_ref())
        .await;

    match result {
        Ok(area) => {
            if area.was_snapped {
                tracing::info!(
                    "Search center snapped from ({}, {}) to ({}, {})",
                    area.original_center.lat,
                    area.original_center.lng,
                    area.center.lat,
                    area.center.lng
                );
            } else if !area.center_resolved {
                tracing::warn!(
                    "No addressable center found near ({}, {}), using computed center",
                    area.center.lat,
                    area.center.lng
                );
            }
            HttpResponse::Ok().json(area)
        }
        Err(e) => validation_error(e.to_string()),
    }
}

/// Classify venues against a search circle
///
/// POST /api/v1/candidates/classify
async fn classify(req: web::Json<ClassifyRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    let classified = classify_candidates(&req.circle(), &req.venue_coordinates());
    let total_venues = classified.len();
    let in_circle_count = classified.iter().filter(|c| c.in_circle).count();

    let candidates = if req.only_in_circle {
        retain_in_circle(classified)
    } else {
        classified
    };
    let candidates = rank_candidates(candidates, req.sort_by);

    tracing::debug!("Classified {} venues, {} in circle", total_venues, in_circle_count);

    HttpResponse::Ok().json(ClassifyResponse {
        candidates,
        in_circle_count,
        total_venues,
    })
}

/// Blur a participant location
///
/// POST /api/v1/participants/fuzz
async fn fuzz(state: web::Data<AppState>, req: web::Json<FuzzRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    let radius_km = req.radius_km.unwrap_or(state.fuzz_radius_km);
    let fuzzed = apply_fuzzing(Coordinate::new(req.lat, req.lng), radius_km);

    HttpResponse::Ok().json(FuzzResponse::from(fuzzed))
}

/// Summarize a participant set
///
/// POST /api/v1/analysis
async fn analysis(req: web::Json<AnalysisRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    let participants: Vec<Coordinate> = req.participants.iter().map(|p| Coordinate::from(*p)).collect();
    HttpResponse::Ok().json(analyze(&participants))
}

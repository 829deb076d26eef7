use thiserror::Error;

use crate::core::{
    centroid::compute_centroid,
    land::{LandResolver, LocationClassifier, DEFAULT_ADJUST_EPSILON_DEG, DEFAULT_MAX_SNAP_RADIUS_KM},
    mec::compute_mec,
};
use crate::models::{CircleAnalysis, Coordinate, SearchArea};

/// Errors from search planning
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("At least one participant location is required")]
    NoParticipants,

    #[error("Radius multiplier {0} is outside the allowed range")]
    InvalidRadiusMultiplier(f64),
}

/// Tunables for [`SearchPlanner`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerOptions {
    pub snap_max_radius_km: f64,
    pub max_radius_multiplier: f64,
    pub adjust_epsilon_deg: f64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            snap_max_radius_km: DEFAULT_MAX_SNAP_RADIUS_KM,
            max_radius_multiplier: 2.0,
            adjust_epsilon_deg: DEFAULT_ADJUST_EPSILON_DEG,
        }
    }
}

/// Search area orchestrator
///
/// # Pipeline Stages
/// 1. Covering circle over participant locations
/// 2. Optional custom center override
/// 3. Land snapping of the computed center
/// 4. Search radius scaling
#[derive(Debug, Clone)]
pub struct SearchPlanner {
    options: PlannerOptions,
    resolver: LandResolver,
}

impl SearchPlanner {
    pub fn new(options: PlannerOptions) -> Self {
        Self {
            resolver: LandResolver::with_adjust_epsilon(options.adjust_epsilon_deg),
            options,
        }
    }

    pub fn with_default_options() -> Self {
        Self::new(PlannerOptions::default())
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    /// Plan the search area for a group of participants
    ///
    /// A caller-supplied `custom_center` replaces the computed center and is
    /// used as given, without land snapping. The circle radius always comes
    /// from the participant circle; `radius_multiplier` only widens the
    /// radius handed to the venue search.
    ///
    /// # Arguments
    /// * `participants` - Participant locations, must be non-empty
    /// * `custom_center` - Organizer-chosen center, if any
    /// * `radius_multiplier` - Search radius scale, in `[1.0, max_radius_multiplier]`
    /// * `classifier` - Land oracle used for snapping
    pub async fn plan<C>(
        &self,
        participants: &[Coordinate],
        custom_center: Option<Coordinate>,
        radius_multiplier: f64,
        classifier: &C,
    ) -> Result<SearchArea, PlanError>
    where
        C: LocationClassifier + ?Sized,
    {
        if !(1.0..=self.options.max_radius_multiplier).contains(&radius_multiplier) {
            return Err(PlanError::InvalidRadiusMultiplier(radius_multiplier));
        }

        let circle = compute_mec(participants).ok_or(PlanError::NoParticipants)?;
        let participant_centroid = compute_centroid(participants).ok_or(PlanError::NoParticipants)?;

        let (center, original_center, was_snapped, center_resolved, formatted_address) = match custom_center {
            Some(custom) => (custom, custom, false, true, None),
            None => {
                let resolved = self
                    .resolver
                    .resolve(circle.center, classifier, self.options.snap_max_radius_km)
                    .await;
                (
                    resolved.center,
                    resolved.original,
                    resolved.was_adjusted,
                    resolved.found_addressable,
                    resolved.formatted_address,
                )
            }
        };

        Ok(SearchArea {
            center,
            radius_km: circle.radius_km,
            search_radius_km: circle.radius_km * radius_multiplier,
            was_snapped,
            center_resolved,
            original_center,
            formatted_address,
            participant_centroid,
            participant_count: participants.len(),
        })
    }
}

/// Summarize a participant set without contacting any oracle
pub fn analyze(participants: &[Coordinate]) -> CircleAnalysis {
    CircleAnalysis {
        participant_count: participants.len(),
        circle: compute_mec(participants),
        centroid: compute_centroid(participants),
    }
}

//! Task-responder compatibility scoring.
//!
//! [`score`] maps one (task, responder) pair to `0.0..=100.0`. Capability
//! coverage is a hard constraint: a responder missing any required tag
//! scores exactly 0. Capable responders are ranked by capability breadth,
//! proximity, fatigue and current load (see [`ScoringWeights`]).
//!
//! Scoring is pure, so candidates for one task can be scored on any number
//! of threads without coordination.

mod weights;

pub use weights::ScoringWeights;

use thiserror::Error;

use crate::models::{CapabilityProvider, ResponderState, TaskOrder};

/// Upper bound of the score range.
pub const MAX_SCORE: f64 = 100.0;

/// Unexpected input shape encountered while scoring a pair.
///
/// Aborts the whole pass: silently scoring a viable responder as 0 would be
/// indistinguishable from a legitimate capability mismatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A capability tag is empty or whitespace.
    #[error("'{owner}' has malformed capability tag {tag:?}")]
    MalformedCapability { owner: String, tag: String },
    /// Fatigue is negative, NaN, or infinite.
    #[error("responder '{unit_id}' has invalid fatigue {value}")]
    InvalidFatigue { unit_id: String, value: f64 },
    /// `max_concurrent_tasks` is zero, so utilization is undefined.
    #[error("responder '{unit_id}' has zero task capacity")]
    ZeroCapacity { unit_id: String },
    /// A location has non-finite coordinates.
    #[error("'{owner}' has a location with non-finite coordinates")]
    InvalidLocation { owner: String },
    /// The weights produced a non-finite score.
    #[error("score for task '{task_id}' and responder '{unit_id}' is not finite")]
    NonFiniteScore { task_id: String, unit_id: String },
    /// Weights are out of range.
    #[error("invalid scoring weights: {reason}")]
    InvalidWeights { reason: String },
}

/// Number of required capabilities covered by `offered`, or `None` if any
/// required tag is missing.
///
/// Works on anything exposing a capability set, so tasks and responders
/// from different sources are matched the same way.
pub fn capability_overlap<R, O>(required: &R, offered: &O) -> Option<usize>
where
    R: CapabilityProvider + ?Sized,
    O: CapabilityProvider + ?Sized,
{
    let required = required.capabilities();
    let offered = offered.capabilities();
    if required.is_subset_of(offered) {
        Some(required.len())
    } else {
        None
    }
}

/// Scores a responder against a task.
///
/// # Algorithm
/// 1. Hard constraint: missing any required capability → 0.
/// 2. `base + breadth_bonus × min(matched, breadth_cap)`.
/// 3. `+ location_bonus × (1 − d / threshold)` when both locations are
///    known and within the threshold.
/// 4. `− fatigue_penalty_max × f / (1 + f)`.
/// 5. `− load_penalty_max × held / max_concurrent`.
/// 6. Clamp to `0..=100`.
///
/// # Errors
/// Returns [`ScoringError`] for malformed capability tags, invalid fatigue,
/// zero capacity, non-finite coordinates, or invalid weights.
pub fn score(
    task: &TaskOrder,
    responder: &ResponderState,
    weights: &ScoringWeights,
) -> Result<f64, ScoringError> {
    check_shape(task, responder)?;

    let Some(matched) = capability_overlap(task, responder) else {
        return Ok(0.0);
    };

    let breadth = weights.breadth_bonus * matched.min(weights.breadth_cap) as f64;
    let mut total = weights.base_score + breadth;

    if let (Some(here), Some(there)) = (&task.location, &responder.location) {
        if let Some(distance) = here.distance_to(there) {
            if distance <= weights.proximity_threshold {
                total += weights.location_bonus * (1.0 - distance / weights.proximity_threshold);
            }
        }
    }

    let fatigue = responder.fatigue;
    total -= weights.fatigue_penalty_max * (fatigue / (1.0 + fatigue));
    total -= weights.load_penalty_max * responder.utilization();

    if !total.is_finite() {
        return Err(ScoringError::NonFiniteScore {
            task_id: task.task_id.clone(),
            unit_id: responder.unit_id.clone(),
        });
    }

    Ok(total.clamp(0.0, MAX_SCORE))
}

fn check_shape(task: &TaskOrder, responder: &ResponderState) -> Result<(), ScoringError> {
    if let Some(tag) = task.capabilities_required.first_malformed() {
        return Err(ScoringError::MalformedCapability {
            owner: task.task_id.clone(),
            tag: tag.to_string(),
        });
    }
    if let Some(tag) = responder.capabilities.first_malformed() {
        return Err(ScoringError::MalformedCapability {
            owner: responder.unit_id.clone(),
            tag: tag.to_string(),
        });
    }
    if !responder.fatigue.is_finite() || responder.fatigue < 0.0 {
        return Err(ScoringError::InvalidFatigue {
            unit_id: responder.unit_id.clone(),
            value: responder.fatigue,
        });
    }
    if responder.max_concurrent_tasks == 0 {
        return Err(ScoringError::ZeroCapacity {
            unit_id: responder.unit_id.clone(),
        });
    }
    if task.location.as_ref().is_some_and(|l| !l.is_finite()) {
        return Err(ScoringError::InvalidLocation {
            owner: task.task_id.clone(),
        });
    }
    if responder.location.as_ref().is_some_and(|l| !l.is_finite()) {
        return Err(ScoringError::InvalidLocation {
            owner: responder.unit_id.clone(),
        });
    }
    Ok(())
}

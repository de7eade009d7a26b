//! Scoring weights.
//!
//! # Terms
//!
//! | Term | Effect | Default |
//! |------|--------|---------|
//! | Base | Any capable responder | +50 |
//! | Breadth | Per required tag matched, up to 4 tags | +5 each |
//! | Proximity | Linear falloff to 0 at the threshold distance | up to +15 |
//! | Fatigue | `max × f / (1 + f)` | up to −30 |
//! | Load | `max × held / max_concurrent` | up to −10 |
//!
//! The defaults keep the worst case for a capable responder at
//! 50 − 30 − 10 = 10, so a zero score always means a hard mismatch.

use serde::{Deserialize, Serialize};

use super::ScoringError;

/// Tunable coefficients for [`score`](super::score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Score of a capable responder before bonuses and penalties.
    pub base_score: f64,
    /// Bonus per matched required capability.
    pub breadth_bonus: f64,
    /// Matched capabilities beyond this count earn nothing extra.
    pub breadth_cap: usize,
    /// Bonus for co-located responders.
    pub location_bonus: f64,
    /// Distance at which the proximity bonus reaches zero.
    pub proximity_threshold: f64,
    /// Asymptotic fatigue penalty.
    pub fatigue_penalty_max: f64,
    /// Penalty at full utilization.
    pub load_penalty_max: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_score: 50.0,
            breadth_bonus: 5.0,
            breadth_cap: 4,
            location_bonus: 15.0,
            proximity_threshold: 10.0,
            fatigue_penalty_max: 30.0,
            load_penalty_max: 10.0,
        }
    }
}

impl ScoringWeights {
    /// Sets the proximity threshold.
    pub fn with_proximity_threshold(mut self, threshold: f64) -> Self {
        self.proximity_threshold = threshold;
        self
    }

    /// Checks that every coefficient is finite and non-negative, the
    /// proximity threshold is positive, and penalties cannot drive a
    /// capable responder down to zero.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let terms = [
            ("base_score", self.base_score),
            ("breadth_bonus", self.breadth_bonus),
            ("location_bonus", self.location_bonus),
            ("proximity_threshold", self.proximity_threshold),
            ("fatigue_penalty_max", self.fatigue_penalty_max),
            ("load_penalty_max", self.load_penalty_max),
        ];
        for (name, value) in terms {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidWeights {
                    reason: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }

        if self.proximity_threshold == 0.0 {
            return Err(ScoringError::InvalidWeights {
                reason: "proximity_threshold must be positive".into(),
            });
        }

        let floor = self.base_score - self.fatigue_penalty_max - self.load_penalty_max;
        if floor <= 0.0 {
            return Err(ScoringError::InvalidWeights {
                reason: format!(
                    "base_score must exceed the combined penalties, worst case is {floor}"
                ),
            });
        }

        Ok(())
    }
}

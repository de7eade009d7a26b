//! Escalation and deferral policy.
//!
//! Decides what happens to a task once its candidates are selected:
//!
//! | Selected vs. `min_units` | Priority | Decision |
//! |--------------------------|----------|----------|
//! | ≥ min | any | Commit |
//! | < min | ≥ escalation priority | Escalate, keep partial selection |
//! | < min | < escalation priority | Defer, release selection |
//!
//! Escalation and deferral are expected outcomes, not errors.

use crate::models::TaskOutcome;

/// Default priority at or above which understaffed tasks are escalated.
pub const ESCALATION_PRIORITY: i32 = 4;

/// What the allocator does with a task's tentative selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffingDecision {
    /// Commit the full selection.
    Commit,
    /// Commit the partial selection and surface the task for supervisors.
    EscalatePartial,
    /// Discard the selection; the caller resubmits the task later.
    Defer,
}

impl StaffingDecision {
    /// Whether the tentative selection is kept.
    pub fn commits_selection(self) -> bool {
        matches!(self, Self::Commit | Self::EscalatePartial)
    }

    /// The task outcome this decision produces.
    pub fn outcome(self) -> TaskOutcome {
        match self {
            Self::Commit => TaskOutcome::Assigned,
            Self::EscalatePartial => TaskOutcome::Escalated,
            Self::Defer => TaskOutcome::Deferred,
        }
    }
}

/// Applies the staffing policy.
pub fn decide(
    selected: usize,
    min_units: u32,
    priority: i32,
    escalation_priority: i32,
) -> StaffingDecision {
    if selected >= min_units as usize {
        StaffingDecision::Commit
    } else if priority >= escalation_priority {
        StaffingDecision::EscalatePartial
    } else {
        StaffingDecision::Defer
    }
}

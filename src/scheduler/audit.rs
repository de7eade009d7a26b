//! Per-run audit record.
//!
//! Summarizes one allocation pass for the external compliance store. The
//! engine only builds the record; persisting it is someone else's job.
//!
//! # Counters
//!
//! | Counter | Definition |
//! |---------|-----------|
//! | tasks_processed | Task orders in the snapshot |
//! | units_considered | Responders eligible at the start of the pass |
//! | assignments_made | Committed (task, unit) pairs |
//! | deferred_tasks | Tasks deferred |
//! | escalated_tasks | Tasks escalated |
//! | candidate_evaluations | Score computations performed |
//! | parallel_scoring | Whether any task was scored on worker threads |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Run-level counters accompanying a [`ScheduleResult`](crate::models::ScheduleResult).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the pass ran.
    pub generated_at: DateTime<Utc>,
    /// Task orders processed.
    pub tasks_processed: usize,
    /// Eligible responders at the start of the pass.
    pub units_considered: usize,
    /// Committed assignments.
    pub assignments_made: usize,
    /// Deferred tasks.
    pub deferred_tasks: usize,
    /// Escalated tasks.
    pub escalated_tasks: usize,
    /// Score computations performed.
    pub candidate_evaluations: usize,
    /// Whether parallel scoring was used.
    pub parallel_scoring: bool,
}

impl AuditRecord {
    /// Whether two records agree on every counter, ignoring the timestamp.
    pub fn same_counters(&self, other: &AuditRecord) -> bool {
        Self {
            generated_at: other.generated_at,
            ..self.clone()
        } == *other
    }
}

/// Accumulates counters while a pass runs.
#[derive(Debug, Clone, Default)]
pub struct AuditBuilder {
    tasks_processed: usize,
    units_considered: usize,
    assignments_made: usize,
    deferred_tasks: usize,
    escalated_tasks: usize,
    candidate_evaluations: usize,
    parallel_scoring: bool,
}

impl AuditBuilder {
    /// Starts a record for a pass with `units_considered` eligible responders.
    pub fn new(units_considered: usize) -> Self {
        Self {
            units_considered,
            ..Self::default()
        }
    }

    /// Records a scoring round for one task.
    pub fn record_scoring(&mut self, evaluations: usize, parallel: bool) {
        self.candidate_evaluations += evaluations;
        self.parallel_scoring |= parallel;
    }

    /// Records a task that committed `assignments` pairs.
    pub fn record_assigned(&mut self, assignments: usize) {
        self.tasks_processed += 1;
        self.assignments_made += assignments;
    }

    /// Records an escalated task with its partial coverage.
    pub fn record_escalated(&mut self, assignments: usize) {
        self.record_assigned(assignments);
        self.escalated_tasks += 1;
    }

    /// Records a deferred task.
    pub fn record_deferred(&mut self) {
        self.tasks_processed += 1;
        self.deferred_tasks += 1;
    }

    /// Stamps and returns the record.
    pub fn finish(self, generated_at: DateTime<Utc>) -> AuditRecord {
        AuditRecord {
            generated_at,
            tasks_processed: self.tasks_processed,
            units_considered: self.units_considered,
            assignments_made: self.assignments_made,
            deferred_tasks: self.deferred_tasks,
            escalated_tasks: self.escalated_tasks,
            candidate_evaluations: self.candidate_evaluations,
            parallel_scoring: self.parallel_scoring,
        }
    }
}

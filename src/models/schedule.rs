//! Scheduling result model.
//!
//! A [`ScheduleResult`] is the proposed outcome of one allocation pass:
//! task-responder assignments, tasks held back for a later pass, and tasks
//! surfaced for supervisory action. It is a set of deltas; applying them to
//! the live roster is the caller's job (see [`crate::roster`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scheduler::AuditRecord;

/// A committed task-responder pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned task ID.
    pub task_id: String,
    /// Selected responder ID.
    pub unit_id: String,
    /// Compatibility score at selection time (0..=100).
    pub score: f64,
    /// Task priority (denormalized for downstream routing).
    pub priority: i32,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        task_id: impl Into<String>,
        unit_id: impl Into<String>,
        score: f64,
        priority: i32,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            unit_id: unit_id.into(),
            score,
            priority,
        }
    }
}

/// Final state of a task after one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// Staffed within `min_units..=max_units`.
    Assigned,
    /// Understaffed high-priority task; partial coverage kept.
    Escalated,
    /// Understaffed low-priority task; no coverage, resubmit later.
    Deferred,
}

/// Overall pass status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// No task needed escalation.
    Complete,
    /// At least one task was escalated.
    Escalated,
}

/// Output of one allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Committed assignments, in processing order.
    pub assignments: Vec<Assignment>,
    /// Deferred task IDs, in processing order.
    pub deferred: Vec<String>,
    /// Escalated task IDs, in processing order.
    pub escalated: Vec<String>,
    /// Outcome of every task in the pass.
    pub outcomes: BTreeMap<String, TaskOutcome>,
    /// Pass status.
    pub status: ScheduleStatus,
    /// Run-level counters for the external audit store.
    pub audit: AuditRecord,
}

impl ScheduleResult {
    /// Number of committed assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Unit IDs assigned to a task, in selection order.
    pub fn units_for(&self, task_id: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.task_id == task_id)
            .map(|a| a.unit_id.as_str())
            .collect()
    }

    /// Outcome of a task, if it was part of the pass.
    pub fn outcome_of(&self, task_id: &str) -> Option<TaskOutcome> {
        self.outcomes.get(task_id).copied()
    }

    /// Assignments grouped by task.
    pub fn assignments_by_task(&self) -> BTreeMap<&str, Vec<&Assignment>> {
        let mut grouped: BTreeMap<&str, Vec<&Assignment>> = BTreeMap::new();
        for a in &self.assignments {
            grouped.entry(a.task_id.as_str()).or_default().push(a);
        }
        grouped
    }

    /// Assignments grouped by responder, the shape the delivery layer
    /// needs to build one outbound message per unit.
    pub fn assignments_by_unit(&self) -> BTreeMap<&str, Vec<&Assignment>> {
        let mut grouped: BTreeMap<&str, Vec<&Assignment>> = BTreeMap::new();
        for a in &self.assignments {
            grouped.entry(a.unit_id.as_str()).or_default().push(a);
        }
        grouped
    }

    /// Drops assignments rejected by an operator before commit.
    ///
    /// Outcomes and audit counters are left as computed by the engine; they
    /// describe the proposal, not the override.
    pub fn retain_assignments<F>(&mut self, keep: F)
    where
        F: FnMut(&Assignment) -> bool,
    {
        self.assignments.retain(keep);
    }
}

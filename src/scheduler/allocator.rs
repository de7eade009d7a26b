//! Priority-first greedy allocator.
//!
//! # Algorithm
//!
//! 1. Validate the snapshot; reject the whole pass on any error.
//! 2. Build the eligible pool (available, spare capacity) and a private
//!    copy of each responder's remaining capacity.
//! 3. Sort tasks by `(priority desc, task_id asc)`.
//! 4. For each task, score every responder with capacity left, drop zero
//!    scores, sort by `(score desc, unit_id asc)` and take up to `max_units`.
//! 5. Apply the staffing policy: commit, escalate with partial coverage, or
//!    defer. Only committed selections consume capacity.
//!
//! # Complexity
//! O(n · (m + m log m)) where n = tasks, m = eligible responders.
//!
//! # Determinism
//! Candidate scoring for one task may run on several threads, but results
//! are gathered in pool order and re-sorted with a total order before
//! selection, and capacity is only mutated on the calling thread.

use std::collections::BTreeMap;
use std::panic;
use std::thread;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::audit::AuditBuilder;
use super::policy::{decide, StaffingDecision};
use crate::config::EngineConfig;
use crate::error::SchedulingError;
use crate::models::{Assignment, ResponderState, ScheduleResult, ScheduleStatus, TaskOrder};
use crate::scoring::{score, ScoringError};
use crate::validation::validate_input;

/// A scored candidate: index into the responder slice and its score.
type Candidate = (usize, f64);

/// Allocation engine.
///
/// Reads a snapshot and returns proposed deltas; never mutates its inputs
/// and holds no state between passes.
///
/// # Example
///
/// ```
/// use u_tasking::models::{ResponderState, TaskOrder};
/// use u_tasking::scheduler::TaskingEngine;
///
/// let tasks = vec![TaskOrder::new("T1").with_priority(5).with_capability("medical")];
/// let responders = vec![ResponderState::new("R1").with_capability("medical")];
///
/// let result = TaskingEngine::new().schedule(&tasks, &responders).unwrap();
/// assert_eq!(result.units_for("T1"), vec!["R1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskingEngine {
    config: EngineConfig,
}

impl TaskingEngine {
    /// Creates an engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one allocation pass, stamping the audit record with the current time.
    pub fn schedule(
        &self,
        tasks: &[TaskOrder],
        responders: &[ResponderState],
    ) -> Result<ScheduleResult, SchedulingError> {
        self.schedule_at(tasks, responders, Utc::now())
    }

    /// Runs one allocation pass with an explicit audit timestamp.
    ///
    /// # Errors
    /// [`SchedulingError::Validation`] if the snapshot is malformed,
    /// [`SchedulingError::Scoring`] if a pair cannot be scored. Either way no
    /// partial result is returned.
    pub fn schedule_at(
        &self,
        tasks: &[TaskOrder],
        responders: &[ResponderState],
        generated_at: DateTime<Utc>,
    ) -> Result<ScheduleResult, SchedulingError> {
        self.config.weights.validate()?;
        if let Err(errors) = validate_input(tasks, responders) {
            warn!(errors = errors.len(), "snapshot rejected by validation");
            return Err(SchedulingError::Validation(errors));
        }

        let mut remaining: Vec<u32> = responders
            .iter()
            .map(ResponderState::available_capacity)
            .collect();
        let eligible = remaining.iter().filter(|&&slots| slots > 0).count();

        let mut audit = AuditBuilder::new(eligible);
        let mut assignments = Vec::new();
        let mut deferred = Vec::new();
        let mut escalated = Vec::new();
        let mut outcomes = BTreeMap::new();

        for task_idx in sort_tasks(tasks) {
            let task = &tasks[task_idx];

            let pool: Vec<usize> = (0..responders.len())
                .filter(|&i| remaining[i] > 0)
                .collect();
            let (scored, parallel) = self.score_candidates(task, responders, &pool)?;
            audit.record_scoring(pool.len(), parallel);

            let selected = select(scored, task.max_units as usize, responders);
            let decision = decide(
                selected.len(),
                task.min_units,
                task.priority,
                self.config.escalation_priority,
            );

            if decision.commits_selection() {
                for &(i, s) in &selected {
                    remaining[i] -= 1;
                    assignments.push(Assignment::new(
                        &task.task_id,
                        &responders[i].unit_id,
                        s,
                        task.priority,
                    ));
                }
            }

            match decision {
                StaffingDecision::Commit => audit.record_assigned(selected.len()),
                StaffingDecision::EscalatePartial => {
                    audit.record_escalated(selected.len());
                    escalated.push(task.task_id.clone());
                }
                StaffingDecision::Defer => {
                    audit.record_deferred();
                    deferred.push(task.task_id.clone());
                }
            }

            debug!(
                task_id = %task.task_id,
                priority = task.priority,
                candidates = pool.len(),
                selected = selected.len(),
                outcome = ?decision.outcome(),
                "task processed"
            );
            outcomes.insert(task.task_id.clone(), decision.outcome());
        }

        let status = if escalated.is_empty() {
            ScheduleStatus::Complete
        } else {
            ScheduleStatus::Escalated
        };

        let audit = audit.finish(generated_at);
        debug!(
            tasks = audit.tasks_processed,
            assignments = audit.assignments_made,
            deferred = audit.deferred_tasks,
            escalated = audit.escalated_tasks,
            "allocation pass complete"
        );

        Ok(ScheduleResult {
            assignments,
            deferred,
            escalated,
            outcomes,
            status,
            audit,
        })
    }

    /// Scores `pool` against `task`, on worker threads once the pool reaches
    /// the parallel threshold. Returns results in pool order and whether
    /// threads were used.
    fn score_candidates(
        &self,
        task: &TaskOrder,
        responders: &[ResponderState],
        pool: &[usize],
    ) -> Result<(Vec<Candidate>, bool), ScoringError> {
        let weights = &self.config.weights;
        let score_chunk = |chunk: &[usize]| -> Result<Vec<Candidate>, ScoringError> {
            chunk
                .iter()
                .map(|&i| score(task, &responders[i], weights).map(|s| (i, s)))
                .collect()
        };

        let workers = self.config.worker_count().min(pool.len());
        if pool.len() < self.config.parallel_threshold || workers <= 1 {
            return score_chunk(pool).map(|scored| (scored, false));
        }

        let chunk_size = pool.len().div_ceil(workers);
        let scored = thread::scope(|scope| {
            let handles: Vec<_> = pool
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || score_chunk(chunk)))
                .collect();

            let mut scored = Vec::with_capacity(pool.len());
            for handle in handles {
                let part = handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))?;
                scored.extend(part);
            }
            Ok::<_, ScoringError>(scored)
        })?;

        Ok((scored, true))
    }
}

/// Task indices in processing order: priority descending, then ID ascending.
fn sort_tasks(tasks: &[TaskOrder]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..tasks.len()).collect();
    indices.sort_by(|&a, &b| {
        tasks[b]
            .priority
            .cmp(&tasks[a].priority)
            .then_with(|| tasks[a].task_id.cmp(&tasks[b].task_id))
    });
    indices
}

/// Drops hard mismatches, ranks by `(score desc, unit_id asc)` and keeps
/// the best `max_units`.
fn select(
    mut scored: Vec<Candidate>,
    max_units: usize,
    responders: &[ResponderState],
) -> Vec<Candidate> {
    scored.retain(|&(_, s)| s > 0.0);
    scored.sort_by(|&(a, sa), &(b, sb)| {
        sb.total_cmp(&sa)
            .then_with(|| responders[a].unit_id.cmp(&responders[b].unit_id))
    });
    scored.truncate(max_units);
    scored
}

/// Schedules with the default engine configuration.
pub fn schedule_tasks_for_field_units(
    tasks: &[TaskOrder],
    responders: &[ResponderState],
) -> Result<ScheduleResult, SchedulingError> {
    TaskingEngine::new().schedule(tasks, responders)
}

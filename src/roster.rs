//! Live roster with single-writer commit.
//!
//! The engine only proposes deltas. Two passes scheduled from the same
//! snapshot could each believe a responder has a free slot, so applying a
//! result must be serialized and re-checked against the roster as it is
//! now. [`SharedRoster::commit`] does both under one lock and applies all
//! of a result's assignments or none of them.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::info;

use crate::models::{ResponderState, ResponderStatus, ScheduleResult};

/// Why a result could not be applied to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("responder '{unit_id}' is not on the roster")]
    UnknownUnit { unit_id: String },
    #[error("responder '{unit_id}' is {status}, not available")]
    Unavailable {
        unit_id: String,
        status: ResponderStatus,
    },
    #[error("responder '{unit_id}' has {available} free slot(s) but {requested} were assigned")]
    OverCapacity {
        unit_id: String,
        requested: usize,
        available: u32,
    },
    #[error("responder '{unit_id}' already holds task '{task_id}'")]
    AlreadyHeld { unit_id: String, task_id: String },
}

/// Summary of an applied result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReport {
    /// Assignments appended to responders' current tasks.
    pub assignments_applied: usize,
    /// Distinct responders touched.
    pub units_updated: usize,
}

/// Authoritative roster shared between schedulers and operators.
#[derive(Debug, Default)]
pub struct SharedRoster {
    units: Mutex<BTreeMap<String, ResponderState>>,
}

impl SharedRoster {
    /// Creates a roster from responder states. Later duplicates replace
    /// earlier ones.
    pub fn new(responders: impl IntoIterator<Item = ResponderState>) -> Self {
        let units = responders
            .into_iter()
            .map(|r| (r.unit_id.clone(), r))
            .collect();
        Self {
            units: Mutex::new(units),
        }
    }

    // Commits validate before mutating, so a poisoned lock still guards a
    // consistent map.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, ResponderState>> {
        self.units.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the roster, ordered by unit ID, to schedule against.
    pub fn snapshot(&self) -> Vec<ResponderState> {
        self.lock().values().cloned().collect()
    }

    /// Current state of one responder.
    pub fn get(&self, unit_id: &str) -> Option<ResponderState> {
        self.lock().get(unit_id).cloned()
    }

    /// Inserts or replaces a responder (roster feed update).
    pub fn upsert(&self, responder: ResponderState) {
        self.lock().insert(responder.unit_id.clone(), responder);
    }

    /// Removes a finished task from a responder. Returns whether it was held.
    pub fn release(&self, unit_id: &str, task_id: &str) -> bool {
        let mut units = self.lock();
        let Some(unit) = units.get_mut(unit_id) else {
            return false;
        };
        let before = unit.current_tasks.len();
        unit.current_tasks.retain(|t| t != task_id);
        unit.current_tasks.len() != before
    }

    /// Applies a result's assignments to the roster.
    ///
    /// Every assignment is checked against the roster as it stands under the
    /// lock; if any fails, nothing is applied.
    pub fn commit(&self, result: &ScheduleResult) -> Result<CommitReport, CommitError> {
        let mut units = self.lock();

        let mut requested: HashMap<&str, usize> = HashMap::new();
        for a in &result.assignments {
            let unit = units
                .get(&a.unit_id)
                .ok_or_else(|| CommitError::UnknownUnit {
                    unit_id: a.unit_id.clone(),
                })?;
            if unit.status != ResponderStatus::Available {
                return Err(CommitError::Unavailable {
                    unit_id: a.unit_id.clone(),
                    status: unit.status,
                });
            }
            if unit.current_tasks.iter().any(|t| *t == a.task_id) {
                return Err(CommitError::AlreadyHeld {
                    unit_id: a.unit_id.clone(),
                    task_id: a.task_id.clone(),
                });
            }
            *requested.entry(a.unit_id.as_str()).or_default() += 1;
        }

        for (&unit_id, &count) in &requested {
            let available = units[unit_id].available_capacity();
            if count > available as usize {
                return Err(CommitError::OverCapacity {
                    unit_id: unit_id.to_string(),
                    requested: count,
                    available,
                });
            }
        }

        for a in &result.assignments {
            if let Some(unit) = units.get_mut(&a.unit_id) {
                unit.current_tasks.push(a.task_id.clone());
            }
        }

        let report = CommitReport {
            assignments_applied: result.assignments.len(),
            units_updated: requested.len(),
        };
        info!(
            assignments = report.assignments_applied,
            units = report.units_updated,
            "schedule committed to roster"
        );
        Ok(report)
    }
}

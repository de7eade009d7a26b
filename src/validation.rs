//! Input validation for tasking snapshots.
//!
//! Checks structural integrity of task orders and responder states before
//! any scheduling work begins. Detects:
//! - Empty and duplicate IDs
//! - Negative priorities and inverted staffing bounds
//! - Blank capability tags
//! - Zero concurrency limits and over-committed responders
//! - Negative or non-finite fatigue, non-finite coordinates
//!
//! All problems are collected so an operator sees the full list at once.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Location, ResponderState, TaskOrder};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A task or responder has an empty identifier.
    EmptyId,
    /// Two tasks or two responders share the same ID.
    DuplicateId,
    /// A task has a negative priority.
    NegativePriority,
    /// A task has `min_units > max_units`.
    InvalidStaffing,
    /// A capability tag is empty or whitespace.
    MalformedCapability,
    /// A responder has `max_concurrent_tasks == 0`.
    InvalidCapacity,
    /// A responder holds more tasks than it may.
    CapacityExceeded,
    /// Fatigue is negative, NaN, or infinite.
    InvalidFatigue,
    /// A location has non-finite coordinates.
    InvalidLocation,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input snapshot for an allocation pass.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[TaskOrder], responders: &[ResponderState]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in tasks {
        validate_task(task, &mut errors);
        if !task.task_id.is_empty() && !task_ids.insert(task.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.task_id),
            ));
        }
    }

    let mut unit_ids = HashSet::new();
    for responder in responders {
        validate_responder(responder, &mut errors);
        if !responder.unit_id.is_empty() && !unit_ids.insert(responder.unit_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate responder ID: {}", responder.unit_id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_task(task: &TaskOrder, errors: &mut Vec<ValidationError>) {
    if task.task_id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "Task order is missing a task_id",
        ));
    }

    if task.priority < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativePriority,
            format!("Task '{}' has negative priority {}", task.task_id, task.priority),
        ));
    }

    if task.min_units > task.max_units {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidStaffing,
            format!(
                "Task '{}' has min_units {} > max_units {}",
                task.task_id, task.min_units, task.max_units
            ),
        ));
    }

    if let Some(tag) = task.capabilities_required.first_malformed() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedCapability,
            format!("Task '{}' requires malformed capability {tag:?}", task.task_id),
        ));
    }

    check_location(&task.task_id, task.location.as_ref(), errors);
}

fn validate_responder(responder: &ResponderState, errors: &mut Vec<ValidationError>) {
    let id = &responder.unit_id;

    if id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "Responder state is missing a unit_id",
        ));
    }

    if let Some(tag) = responder.capabilities.first_malformed() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedCapability,
            format!("Responder '{id}' offers malformed capability {tag:?}"),
        ));
    }

    if responder.max_concurrent_tasks == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidCapacity,
            format!("Responder '{id}' has max_concurrent_tasks of 0"),
        ));
    } else if responder.current_tasks.len() > responder.max_concurrent_tasks as usize {
        errors.push(ValidationError::new(
            ValidationErrorKind::CapacityExceeded,
            format!(
                "Responder '{id}' holds {} tasks but may hold {}",
                responder.current_tasks.len(),
                responder.max_concurrent_tasks
            ),
        ));
    }

    if !responder.fatigue.is_finite() || responder.fatigue < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFatigue,
            format!("Responder '{id}' has invalid fatigue {}", responder.fatigue),
        ));
    }

    check_location(id, responder.location.as_ref(), errors);
}

fn check_location(owner: &str, location: Option<&Location>, errors: &mut Vec<ValidationError>) {
    if let Some(loc) = location {
        if !loc.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLocation,
                format!("'{owner}' has a location with non-finite coordinates"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CapabilitySet, Location};

    fn sample_tasks() -> Vec<TaskOrder> {
        vec![
            TaskOrder::new("T1").with_priority(5).with_capability("medic"),
            TaskOrder::new("T2").with_priority(1).with_units(0, 2),
        ]
    }

    fn sample_responders() -> Vec<ResponderState> {
        vec![
            ResponderState::new("R1").with_capability("medic"),
            ResponderState::new("R2")
                .with_max_concurrent(2)
                .with_current_task("patrol")
                .with_fatigue(1.5),
        ]
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_tasks(), &sample_responders()).is_ok());
        assert!(validate_input(&[], &[]).is_ok());
    }

    #[test]
    fn test_missing_task_id() {
        let tasks = vec![TaskOrder::new("").with_priority(3).with_capability("medic")];
        let errors = validate_input(&tasks, &sample_responders()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::EmptyId]);
    }

    #[test]
    fn test_duplicate_ids() {
        let tasks = vec![TaskOrder::new("T1"), TaskOrder::new("T1")];
        let responders = vec![ResponderState::new("R1"), ResponderState::new("R1")];

        let errors = validate_input(&tasks, &responders).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("responder")));
    }

    #[test]
    fn test_negative_priority_and_inverted_bounds() {
        let tasks = vec![
            TaskOrder::new("neg").with_priority(-1),
            TaskOrder::new("inv").with_units(3, 2),
        ];
        let errors = validate_input(&tasks, &[]).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::NegativePriority,
                ValidationErrorKind::InvalidStaffing
            ]
        );
    }

    #[test]
    fn test_malformed_capabilities() {
        let tasks = vec![TaskOrder::new("T1").with_capability("")];
        let responders = vec![ResponderState::new("R1")
            .with_capabilities(CapabilitySet::new().with("medic").with(" "))];

        let errors = validate_input(&tasks, &responders).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MalformedCapability));
    }

    #[test]
    fn test_responder_capacity_checks() {
        let responders = vec![
            ResponderState::new("zero").with_max_concurrent(0),
            ResponderState::new("over")
                .with_current_task("a")
                .with_current_task("b"),
        ];
        let errors = validate_input(&[], &responders).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::InvalidCapacity,
                ValidationErrorKind::CapacityExceeded
            ]
        );
    }

    #[test]
    fn test_invalid_fatigue_and_location() {
        let responders = vec![
            ResponderState::new("neg").with_fatigue(-0.1),
            ResponderState::new("nan").with_fatigue(f64::NAN),
            ResponderState::new("far").with_location(Location::point(f64::INFINITY, 0.0)),
        ];
        let errors = validate_input(&[], &responders).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::InvalidFatigue,
                ValidationErrorKind::InvalidFatigue,
                ValidationErrorKind::InvalidLocation
            ]
        );
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![TaskOrder::new("").with_priority(-2).with_units(2, 1)];
        let errors = validate_input(&tasks, &[]).unwrap_err();
        assert!(errors.len() >= 3);
    }
}

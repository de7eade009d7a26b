//! JSON snapshot loading.
//!
//! Intake and roster feeds hand the engine a document of the form
//!
//! ```json
//! {
//!   "tasks": [{"task_id": "med-evac", "priority": 5, "capabilities_required": ["medic"]}],
//!   "responders": [{"unit_id": "alpha-1", "capabilities": ["medic"], "status": "available"}]
//! }
//! ```
//!
//! `priority` is required; other omitted fields take their model defaults.
//! Missing IDs load as empty strings and are reported by validation rather
//! than by the parser, so the operator gets every problem in one message.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;
use crate::models::{ResponderState, ScheduleResult, TaskOrder};
use crate::scheduler::TaskingEngine;

/// One scheduling input: task orders plus the roster as of now.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<TaskOrder>,
    #[serde(default)]
    pub responders: Vec<ResponderState>,
}

impl Snapshot {
    /// Creates a snapshot.
    pub fn new(tasks: Vec<TaskOrder>, responders: Vec<ResponderState>) -> Self {
        Self { tasks, responders }
    }

    /// Parses a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SchedulingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchedulingError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SchedulingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Runs one pass of `engine` over this snapshot.
    pub fn schedule(&self, engine: &TaskingEngine) -> Result<ScheduleResult, SchedulingError> {
        engine.schedule(&self.tasks, &self.responders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponderStatus;

    #[test]
    fn test_parse_minimal_payload() {
        let snapshot = Snapshot::from_json_str(
            r#"{
                "tasks": [{"task_id": "a", "priority": 2}],
                "responders": [{"unit_id": "unit", "capabilities": ["general"], "status": "available"}]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.responders[0].status, ResponderStatus::Available);

        let result = snapshot.schedule(&TaskingEngine::new()).unwrap();
        assert_eq!(result.units_for("a"), vec!["unit"]);
    }

    #[test]
    fn test_missing_id_reported_by_validation() {
        let snapshot = Snapshot::from_json_str(
            r#"{"tasks": [{"priority": 3, "capabilities_required": ["medic"]}],
                "responders": [{"unit_id": "alpha", "capabilities": ["medic"]}]}"#,
        )
        .unwrap();
        let err = snapshot.schedule(&TaskingEngine::new()).unwrap_err();
        assert!(matches!(err, SchedulingError::Validation(_)));
    }

    #[test]
    fn test_missing_priority_rejects_snapshot() {
        let err = Snapshot::from_json_str(
            r#"{"tasks": [{"task_id": "no-prio", "capabilities_required": ["medic"]}],
                "responders": [{"unit_id": "alpha", "capabilities": ["medic"]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchedulingError::Payload(_)));
        assert!(err.to_string().contains("priority"));
    }

    #[test]
    fn test_malformed_json() {
        let err = Snapshot::from_json_str(r#"{"tasks": [{"task_id": 7}]}"#).unwrap_err();
        assert!(matches!(err, SchedulingError::Payload(_)));

        let err = Snapshot::from_json_str(r#"{"tasks": [{"task_id": "a", "priority": 1, "min_units": -1}]}"#)
            .unwrap_err();
        assert!(matches!(err, SchedulingError::Payload(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Snapshot::from_path("/nonexistent/u-tasking/snapshot.json").unwrap_err();
        assert!(matches!(err, SchedulingError::Io { .. }));
    }

    #[test]
    fn test_metadata_passes_through() {
        let snapshot = Snapshot::from_json_str(
            r#"{"tasks": [{"task_id": "a", "priority": 1, "metadata": {"details": {"casualties": 3}}}]}"#,
        )
        .unwrap();
        let back = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(back["tasks"][0]["metadata"]["details"]["casualties"], 3);
    }
}

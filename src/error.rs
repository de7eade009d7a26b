//! Crate-level error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::roster::CommitError;
use crate::scoring::ScoringError;
use crate::telemetry::TelemetryError;
use crate::validation::ValidationError;

/// Why an allocation pass was rejected.
///
/// A rejected pass produces no partial output.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The snapshot failed validation before any scheduling work began.
    #[error("snapshot rejected: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
    /// A pair could not be scored.
    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
    /// A JSON snapshot could not be parsed.
    #[error("invalid snapshot payload: {0}")]
    Payload(#[from] serde_json::Error),
    /// A snapshot file could not be read.
    #[error("failed to read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SchedulingError {
    /// Validation errors, if the pass was rejected for invalid input.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            SchedulingError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<Vec<ValidationError>> for SchedulingError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced by the command-line binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),
    #[error("commit error: {0}")]
    Commit(#[from] CommitError),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

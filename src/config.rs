//! Runtime configuration.
//!
//! Read from `TASKING_*` environment variables (a `.env` file is honoured).
//! Every setting has a default, so an empty environment yields a working
//! engine.

use std::env;
use std::num::NonZeroUsize;
use std::thread;

use thiserror::Error;

use crate::scheduler::ESCALATION_PRIORITY;
use crate::scoring::{ScoringError, ScoringWeights};

/// Candidate count at which scoring moves onto worker threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16;

/// Settings controlling allocation behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Priority at or above which understaffed tasks are escalated.
    pub escalation_priority: i32,
    /// Candidate count at which scoring is parallelized.
    pub parallel_threshold: usize,
    /// Worker thread cap for parallel scoring. `None` = available parallelism.
    pub max_workers: Option<NonZeroUsize>,
    /// Scoring coefficients.
    pub weights: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            escalation_priority: ESCALATION_PRIORITY,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_workers: None,
            weights: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the escalation priority.
    pub fn with_escalation_priority(mut self, priority: i32) -> Self {
        self.escalation_priority = priority;
        self
    }

    /// Sets the parallel scoring threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Caps the number of scoring threads.
    pub fn with_max_workers(mut self, workers: NonZeroUsize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Sets the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Threads to use for parallel scoring.
    pub fn worker_count(&self) -> usize {
        self.max_workers
            .or_else(|| thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}

/// Log output controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Top-level configuration for the binary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskingConfig {
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl TaskingConfig {
    /// Loads configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut engine = EngineConfig::default();

        if let Some(value) = read_var("TASKING_ESCALATION_PRIORITY") {
            engine.escalation_priority = value.parse().map_err(|_| ConfigError::Invalid {
                key: "TASKING_ESCALATION_PRIORITY",
                value,
            })?;
        }

        if let Some(value) = read_var("TASKING_PARALLEL_THRESHOLD") {
            engine.parallel_threshold = value.parse().map_err(|_| ConfigError::Invalid {
                key: "TASKING_PARALLEL_THRESHOLD",
                value,
            })?;
        }

        if let Some(value) = read_var("TASKING_MAX_WORKERS") {
            let workers = value.parse::<NonZeroUsize>().map_err(|_| ConfigError::Invalid {
                key: "TASKING_MAX_WORKERS",
                value,
            })?;
            engine.max_workers = Some(workers);
        }

        if let Some(value) = read_var("TASKING_PROXIMITY_THRESHOLD") {
            let threshold = value.parse::<f64>().map_err(|_| ConfigError::Invalid {
                key: "TASKING_PROXIMITY_THRESHOLD",
                value,
            })?;
            engine.weights.proximity_threshold = threshold;
        }

        engine.weights.validate()?;

        let log_level = read_var("TASKING_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            engine,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn read_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error(transparent)]
    Weights(#[from] ScoringError),
}

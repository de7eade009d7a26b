//! Responder state model.
//!
//! A responder is a field unit (crew, vehicle, specialist) with a set of
//! capabilities, a concurrency limit, current workload and fatigue.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CapabilityProvider, CapabilitySet, Location, Metadata};

/// Roster status of a responder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderStatus {
    /// Ready to take new work.
    #[default]
    Available,
    /// On task; not offered new work this pass.
    Busy,
    /// Out of contact.
    Offline,
}

impl fmt::Display for ResponderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResponderStatus::Available => "available",
            ResponderStatus::Busy => "busy",
            ResponderStatus::Offline => "offline",
        };
        f.write_str(label)
    }
}

/// Snapshot of one field unit's eligibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderState {
    /// Unique unit identifier.
    #[serde(default)]
    pub unit_id: String,
    /// Capability tags offered.
    #[serde(default)]
    pub capabilities: CapabilitySet,
    /// Roster status.
    #[serde(default)]
    pub status: ResponderStatus,
    /// Tasks the unit may hold at once (≥ 1).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_tasks: u32,
    /// Task IDs already held, oldest first.
    #[serde(default)]
    pub current_tasks: Vec<String>,
    /// Accumulated fatigue (≥ 0, higher = more tired).
    #[serde(default)]
    pub fatigue: f64,
    /// Current position.
    #[serde(default)]
    pub location: Option<Location>,
    /// Upstream data passed through untouched.
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_max_concurrent() -> u32 {
    1
}

impl ResponderState {
    /// Creates an available, rested responder with capacity for one task.
    pub fn new(unit_id: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            capabilities: CapabilitySet::new(),
            status: ResponderStatus::Available,
            max_concurrent_tasks: 1,
            current_tasks: Vec::new(),
            fatigue: 0.0,
            location: None,
            metadata: Metadata::new(),
        }
    }

    /// Adds a capability.
    pub fn with_capability(mut self, tag: impl Into<String>) -> Self {
        self.capabilities.insert(tag);
        self
    }

    /// Replaces the capability set.
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the roster status.
    pub fn with_status(mut self, status: ResponderStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the concurrency limit.
    pub fn with_max_concurrent(mut self, max_concurrent_tasks: u32) -> Self {
        self.max_concurrent_tasks = max_concurrent_tasks;
        self
    }

    /// Adds an already-held task.
    pub fn with_current_task(mut self, task_id: impl Into<String>) -> Self {
        self.current_tasks.push(task_id.into());
        self
    }

    /// Sets fatigue.
    pub fn with_fatigue(mut self, fatigue: f64) -> Self {
        self.fatigue = fatigue;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Free task slots (0 unless the unit is available).
    pub fn available_capacity(&self) -> u32 {
        if self.status != ResponderStatus::Available {
            return 0;
        }
        let held = u32::try_from(self.current_tasks.len()).unwrap_or(u32::MAX);
        self.max_concurrent_tasks.saturating_sub(held)
    }

    /// Whether the unit may receive new work this pass.
    pub fn is_eligible(&self) -> bool {
        self.available_capacity() > 0
    }

    /// Fraction of slots in use (0.0..=1.0). Zero capacity reads as fully loaded.
    pub fn utilization(&self) -> f64 {
        if self.max_concurrent_tasks == 0 {
            return 1.0;
        }
        (self.current_tasks.len() as f64 / self.max_concurrent_tasks as f64).min(1.0)
    }
}

impl CapabilityProvider for ResponderState {
    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }
}

//! Task order model.
//!
//! A task order is one unit of field work: a priority, the capabilities a
//! responder must hold to take it, and how many responders it needs.
//!
//! # Staffing Bounds
//! `min_units..=max_units` responders may be selected per pass. A task that
//! cannot reach `min_units` is escalated or deferred by the allocation policy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CapabilityProvider, CapabilitySet};

/// Opaque key-value bag carried through scheduling untouched.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Where a task is located or a responder is positioned.
///
/// Serialized untagged: a bare string is a named sector, an object with
/// `x`/`y` is a planar point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// Named operational sector (e.g., "ao-west").
    Sector(String),
    /// Planar coordinates in the operator's grid units.
    Point {
        /// Easting.
        x: f64,
        /// Northing.
        y: f64,
    },
}

impl Location {
    /// Creates a named sector location.
    pub fn sector(name: impl Into<String>) -> Self {
        Self::Sector(name.into())
    }

    /// Creates a point location.
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point { x, y }
    }

    /// Distance to another location, if the two are comparable.
    ///
    /// Equal sectors are 0 apart; different sectors, or a sector compared to
    /// a point, have no meaningful distance and return `None`.
    pub fn distance_to(&self, other: &Location) -> Option<f64> {
        match (self, other) {
            (Location::Sector(a), Location::Sector(b)) => (a == b).then_some(0.0),
            (Location::Point { x: x1, y: y1 }, Location::Point { x: x2, y: y2 }) => {
                Some((x1 - x2).hypot(y1 - y2))
            }
            _ => None,
        }
    }

    /// Whether all coordinates are finite (always true for sectors).
    pub fn is_finite(&self) -> bool {
        match self {
            Location::Sector(_) => true,
            Location::Point { x, y } => x.is_finite() && y.is_finite(),
        }
    }
}

/// A work order requiring one or more field responders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOrder {
    /// Unique task identifier.
    #[serde(default)]
    pub task_id: String,
    /// Urgency (higher = more urgent). Must be non-negative. Required in
    /// payloads.
    pub priority: i32,
    /// Capabilities every selected responder must hold.
    #[serde(default)]
    pub capabilities_required: CapabilitySet,
    /// Fewest responders that make the task viable.
    #[serde(default = "default_units")]
    pub min_units: u32,
    /// Most responders the task may take.
    #[serde(default = "default_units")]
    pub max_units: u32,
    /// Task location, used for proximity scoring.
    #[serde(default)]
    pub location: Option<Location>,
    /// Upstream data passed through untouched.
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_units() -> u32 {
    1
}

impl TaskOrder {
    /// Creates a task with priority 0, no required capabilities, and
    /// staffing bounds of exactly one unit.
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            priority: 0,
            capabilities_required: CapabilitySet::new(),
            min_units: 1,
            max_units: 1,
            location: None,
            metadata: Metadata::new(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a required capability.
    pub fn with_capability(mut self, tag: impl Into<String>) -> Self {
        self.capabilities_required.insert(tag);
        self
    }

    /// Replaces the required capability set.
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities_required = capabilities;
        self
    }

    /// Sets the staffing bounds.
    pub fn with_units(mut self, min_units: u32, max_units: u32) -> Self {
        self.min_units = min_units;
        self.max_units = max_units;
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
}

impl CapabilityProvider for TaskOrder {
    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities_required
    }
}

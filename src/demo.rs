//! Built-in field scenario for demonstrations and smoke tests.

use serde_json::json;

use crate::models::{Location, ResponderState, ResponderStatus, TaskOrder};
use crate::payload::Snapshot;

/// A small western/eastern sector scenario: an evacuation that cannot be
/// fully staffed, a repair that can, and a supply run with no free driver.
pub fn demo_snapshot() -> Snapshot {
    let tasks = vec![
        TaskOrder::new("med-evac")
            .with_priority(5)
            .with_capability("medic")
            .with_capability("driver")
            .with_units(2, 2)
            .with_location(Location::sector("ao-west"))
            .with_metadata("category", json!("medical"))
            .with_metadata("details", json!("Evacuate injured unit")),
        TaskOrder::new("sensor-repair")
            .with_priority(3)
            .with_capability("engineer")
            .with_location(Location::sector("ao-west"))
            .with_metadata("category", json!("maintenance")),
        TaskOrder::new("supply-run")
            .with_priority(2)
            .with_capability("driver")
            .with_location(Location::sector("ao-east"))
            .with_metadata("category", json!("logistics")),
    ];

    let responders = vec![
        ResponderState::new("alpha-1")
            .with_capability("medic")
            .with_capability("driver")
            .with_location(Location::sector("ao-west")),
        ResponderState::new("bravo-2")
            .with_capability("medic")
            .with_location(Location::sector("ao-west")),
        ResponderState::new("charlie-5")
            .with_capability("engineer")
            .with_location(Location::sector("ao-west")),
        ResponderState::new("delta-7")
            .with_capability("driver")
            .with_location(Location::sector("ao-east"))
            .with_status(ResponderStatus::Busy)
            .with_current_task("long-haul"),
    ];

    Snapshot::new(tasks, responders)
}

//! Field tasking engine for the U-Engine ecosystem.
//!
//! Matches task orders to field responders: capability requirements are
//! hard constraints, staffing bounds decide whether a task is committed,
//! escalated or deferred, and a fatigue-, proximity- and load-aware score
//! ranks the remaining candidates.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TaskOrder`, `ResponderState`, `CapabilitySet`,
//!   `Location`, `Assignment`, `ScheduleResult`
//! - **`validation`**: Input integrity checks (IDs, staffing bounds, capacity, fatigue)
//! - **`scoring`**: Pure task-responder compatibility score
//! - **`scheduler`**: `TaskingEngine`, escalation/deferral policy, audit record
//! - **`roster`**: Single-writer commit of results into a live roster
//! - **`payload`**: JSON snapshot loading
//!
//! # Architecture
//!
//! The engine reads an immutable snapshot and returns proposed deltas. It
//! performs no I/O and keeps no state between passes; committing a result to
//! the authoritative roster goes through [`roster::SharedRoster`].
//!
//! # Example
//!
//! ```
//! use u_tasking::models::{ResponderState, TaskOrder};
//! use u_tasking::schedule_tasks_for_field_units;
//!
//! let tasks = vec![TaskOrder::new("T1").with_priority(5).with_capability("medical").with_units(1, 2)];
//! let responders = vec![
//!     ResponderState::new("R1").with_capability("medical").with_capability("transport"),
//! ];
//!
//! let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();
//! assert_eq!(result.units_for("T1"), vec!["R1"]);
//! assert!(result.escalated.is_empty());
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod payload;
pub mod roster;
pub mod scheduler;
pub mod scoring;
pub mod telemetry;
pub mod validation;

pub use error::SchedulingError;
pub use scheduler::{schedule_tasks_for_field_units, TaskingEngine};

//! Tasking domain models.
//!
//! Immutable value types for one scheduling snapshot and its outcome.
//!
//! # Domain Mappings
//!
//! | u-tasking | Emergency response | Utilities | Security |
//! |-----------|--------------------|-----------|----------|
//! | TaskOrder | Incident | Work order | Patrol request |
//! | ResponderState | Crew/Ambulance | Field technician | Guard team |
//! | CapabilitySet | Certifications | Trade skills | Clearances |
//! | ScheduleResult | Dispatch plan | Crew plan | Post roster |

mod capability;
mod responder;
mod schedule;
mod task;

pub use capability::{CapabilityProvider, CapabilitySet};
pub use responder::{ResponderState, ResponderStatus};
pub use schedule::{Assignment, ScheduleResult, ScheduleStatus, TaskOutcome};
pub use task::{Location, Metadata, TaskOrder};

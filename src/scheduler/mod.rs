//! Allocation engine, staffing policy and audit record.
//!
//! # Algorithm
//!
//! `TaskingEngine` is a priority-first greedy matcher: tasks are processed
//! most urgent first, and each takes the best-scoring responders still
//! holding capacity. It is not optimal, but it is fast, explainable and
//! reproducible, which an operator reviewing a dispatch plan needs.
//!
//! # Policy
//!
//! Understaffed tasks are escalated (priority ≥ 4, partial coverage kept) or
//! deferred (no coverage). See [`policy`].
//!
//! # Audit
//!
//! Every pass returns an [`AuditRecord`] of run-level counters.

mod allocator;
mod audit;
pub mod policy;

pub use allocator::{schedule_tasks_for_field_units, TaskingEngine};
pub use audit::{AuditBuilder, AuditRecord};
pub use policy::{StaffingDecision, ESCALATION_PRIORITY};

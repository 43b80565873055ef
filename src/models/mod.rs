//! Job-shop domain models.
//!
//! Core data types consumed by every other module: the static
//! [`Instance`] (jobs × machines × operations) and the transient
//! [`MachineStatusMap`] applied during makespan evaluation.
//!
//! # Lifecycle
//!
//! An `Instance` is built once (by the caller or [`crate::loader`]) and
//! mutated in place only by scenario application or the rescheduling
//! engine: jobs are appended, never removed; durations are perturbed at
//! most once (processing-time noise).

mod instance;
mod status;

pub use instance::{Instance, Operation};
pub use status::{MachineStatus, MachineStatusMap};

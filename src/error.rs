//! Crate error taxonomy.
//!
//! All errors are pre-flight: an optimizer validates its instance and
//! configuration before entering the budgeted loop, and no further
//! validation happens per generation or iteration. A replay over a
//! validated operation sequence is total — it always yields a makespan.

use thiserror::Error;

/// Errors reported by optimizers, the loader, and pre-flight validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A chromosome's job-id multiset does not match the instance's
    /// per-job operation counts. Should not occur when operators are
    /// implemented correctly; surfaced by test-build checks.
    #[error("invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// Structurally broken instance: empty job list, empty job,
    /// machine id out of range, or zero duration.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// Non-sensical parameter combination (zero population size,
    /// rate outside `0.0..=1.0`, zero budget).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

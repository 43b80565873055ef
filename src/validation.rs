//! Pre-flight instance validation.
//!
//! Checks structural integrity of an instance before optimization.
//! Detects:
//! - Empty job list
//! - Jobs with no operations
//! - Machine ids out of range
//! - Zero durations
//!
//! Validation runs once at optimizer pre-flight; the budgeted loop
//! performs no further checks.

use crate::error::Error;
use crate::models::Instance;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no jobs.
    EmptyInstance,
    /// A job has no operations.
    EmptyJob,
    /// An operation references a machine `>= num_machines`.
    MachineOutOfRange,
    /// An operation has zero duration.
    NonPositiveDuration,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an instance.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.jobs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            format!("Instance '{}' has no jobs", instance.name),
        ));
    }

    for (job, ops) in instance.jobs.iter().enumerate() {
        if ops.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("Job {job} has no operations"),
            ));
        }
        for (idx, op) in ops.iter().enumerate() {
            if op.machine >= instance.num_machines {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOutOfRange,
                    format!(
                        "Job {job} operation {idx} references machine {} \
                         (instance has {})",
                        op.machine, instance.num_machines
                    ),
                ));
            }
            if op.duration == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveDuration,
                    format!("Job {job} operation {idx} has zero duration"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Maps validation failures into the crate error type.
///
/// Optimizers call this once before their budgeted loop; the run aborts
/// immediately, reporting every precondition that failed.
pub fn preflight(instance: &Instance) -> Result<(), Error> {
    validate_instance(instance).map_err(|errors| {
        let joined = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Error::InvalidInstance(joined)
    })
}

//! Job-shop instance model.
//!
//! An instance is a fixed set of jobs, each an ordered sequence of
//! operations bound to a specific machine with a fixed duration.
//! Operation order within a job is a hard precedence constraint that
//! every schedule must respect.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7

use serde::{Deserialize, Serialize};

/// A single operation: a (machine, duration) pair.
///
/// Routing is fixed by the instance — only sequencing varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Machine index (0-based, `< Instance::num_machines`).
    pub machine: usize,
    /// Base processing time.
    pub duration: u64,
}

impl Operation {
    /// Creates an operation.
    pub fn new(machine: usize, duration: u64) -> Self {
        Self { machine, duration }
    }
}

/// A job-shop instance.
///
/// Built once (typically by [`crate::loader`]), then mutated in place
/// only by scenario application or the rescheduling engine: a job may
/// be appended, never removed; durations may be perturbed once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Instance name (e.g. "ft06").
    pub name: String,
    /// Number of machines.
    pub num_machines: usize,
    /// Per-job operation sequences, in fixed precedence order.
    pub jobs: Vec<Vec<Operation>>,
}

impl Instance {
    /// Creates an empty instance with the given machine count.
    pub fn new(name: impl Into<String>, num_machines: usize) -> Self {
        Self {
            name: name.into(),
            num_machines,
            jobs: Vec::new(),
        }
    }

    /// Adds a job (builder style).
    pub fn with_job(mut self, operations: Vec<Operation>) -> Self {
        self.jobs.push(operations);
        self
    }

    /// Appends a job in place (dynamic arrival).
    pub fn push_job(&mut self, operations: Vec<Operation>) {
        self.jobs.push(operations);
    }

    /// Number of jobs.
    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Total operation count across all jobs — the chromosome length.
    pub fn total_operations(&self) -> usize {
        self.jobs.iter().map(|ops| ops.len()).sum()
    }

    /// Total processing time of one job.
    pub fn job_duration(&self, job: usize) -> u64 {
        self.jobs[job].iter().map(|op| op.duration).sum()
    }

    /// Total processing time routed to each machine.
    ///
    /// `max` over this vector is a classic makespan lower bound.
    pub fn machine_loads(&self) -> Vec<u64> {
        let mut loads = vec![0u64; self.num_machines];
        for ops in &self.jobs {
            for op in ops {
                if op.machine < loads.len() {
                    loads[op.machine] += op.duration;
                }
            }
        }
        loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_job_instance() -> Instance {
        Instance::new("toy", 2)
            .with_job(vec![Operation::new(0, 3), Operation::new(1, 2)])
            .with_job(vec![Operation::new(1, 4)])
    }

    #[test]
    fn test_counts() {
        let inst = two_job_instance();
        assert_eq!(inst.num_jobs(), 2);
        assert_eq!(inst.total_operations(), 3);
        assert_eq!(inst.job_duration(0), 5);
        assert_eq!(inst.job_duration(1), 4);
    }

    #[test]
    fn test_machine_loads() {
        let inst = two_job_instance();
        assert_eq!(inst.machine_loads(), vec![3, 6]);
    }

    #[test]
    fn test_push_job_appends() {
        let mut inst = two_job_instance();
        inst.push_job(vec![Operation::new(0, 1)]);
        assert_eq!(inst.num_jobs(), 3);
        assert_eq!(inst.jobs[2], vec![Operation::new(0, 1)]);
    }

    #[test]
    fn test_serde_round_trip() {
        let inst = two_job_instance();
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "toy");
        assert_eq!(back.jobs, inst.jobs);
    }
}

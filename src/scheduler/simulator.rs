//! Makespan simulator.
//!
//! Replays a decoded operation sequence in the order given. For each
//! operation, the start time is `max(machine_ready, job_last_finish)`
//! and both are advanced to the finish time. Routing is fixed by the
//! instance, so this is list scheduling with no machine-choice step:
//! only sequencing (the chromosome) varies.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 7.1: Disjunctive Programming

use std::collections::HashMap;

use crate::encoding::ScheduledOp;
use crate::models::{MachineStatus, MachineStatusMap};

/// Flat delay added to every operation on a broken machine.
pub const DEFAULT_BREAKDOWN_PENALTY: u64 = 1_000_000;

/// Deterministic forward simulator producing the makespan of a decoded
/// operation sequence.
///
/// Stateless between calls: timing vectors are rebuilt on every
/// evaluation, so a replay of the same sequence with the same status
/// map always yields the same makespan. Memoization lives in
/// [`FitnessCache`], owned by the optimizer run — never in the
/// simulator, so a status or instance change can't serve stale values.
#[derive(Debug, Clone)]
pub struct Scheduler {
    num_machines: usize,
    breakdown_penalty: u64,
}

impl Scheduler {
    /// Creates a simulator for the given machine count.
    pub fn new(num_machines: usize) -> Self {
        Self {
            num_machines,
            breakdown_penalty: DEFAULT_BREAKDOWN_PENALTY,
        }
    }

    /// Sets the flat penalty applied per operation on broken machines.
    pub fn with_breakdown_penalty(mut self, penalty: u64) -> Self {
        self.breakdown_penalty = penalty;
        self
    }

    /// Number of machines this simulator replays over.
    pub fn num_machines(&self) -> usize {
        self.num_machines
    }

    /// Replays the sequence and returns the makespan.
    ///
    /// `machine_status` modifies effective durations:
    /// - [`MachineStatus::Broken`] — `duration + breakdown_penalty`
    /// - [`MachineStatus::Slowdown(f)`] — `floor(duration × f)`, clamped
    ///   to at least 1 so a small factor can never drop an operation to
    ///   zero length
    pub fn calculate_makespan(
        &self,
        sequence: &[ScheduledOp],
        machine_status: Option<&MachineStatusMap>,
    ) -> u64 {
        let mut machine_ready = vec![0u64; self.num_machines];
        let mut job_last_finish: HashMap<usize, u64> = HashMap::new();

        for op in sequence {
            debug_assert!(op.machine < self.num_machines, "machine out of range");

            let duration = match machine_status.and_then(|m| m.get(&op.machine)) {
                Some(MachineStatus::Broken) => op.duration + self.breakdown_penalty,
                Some(MachineStatus::Slowdown(factor)) => {
                    ((op.duration as f64 * factor).floor() as u64).max(1)
                }
                None => op.duration,
            };

            let start = machine_ready[op.machine]
                .max(job_last_finish.get(&op.job).copied().unwrap_or(0));
            let finish = start + duration;
            machine_ready[op.machine] = finish;
            job_last_finish.insert(op.job, finish);
        }

        machine_ready.iter().copied().max().unwrap_or(0)
    }
}

/// Memoized makespans keyed by chromosome genes.
///
/// Valid only while instance and machine status are held fixed. Each
/// optimizer run owns a fresh cache for exactly one such epoch; caches
/// are never carried across rescheduling ticks.
#[derive(Debug, Default)]
pub struct FitnessCache {
    entries: HashMap<Vec<usize>, u64>,
    hits: usize,
}

impl FitnessCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a previously computed makespan.
    pub fn get(&mut self, genes: &[usize]) -> Option<u64> {
        let hit = self.entries.get(genes).copied();
        if hit.is_some() {
            self.hits += 1;
        }
        hit
    }

    /// Records a computed makespan.
    pub fn insert(&mut self, genes: &[usize], makespan: u64) {
        self.entries.insert(genes.to_vec(), makespan);
    }

    /// Number of cache hits served so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of distinct chromosomes cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

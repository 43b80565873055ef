//! Makespan simulation and fitness memoization.
//!
//! `Scheduler` deterministically replays a decoded operation sequence
//! and reports the makespan, with optional per-evaluation machine
//! status modifiers (breakdown penalty, slowdown factor).
//!
//! Fitness evaluation is the dominant cost of both optimizers — it runs
//! O(population × generations) times — so the replay is a single linear
//! pass over the sequence with two timing vectors and no allocation
//! beyond them. `FitnessCache` short-circuits repeated evaluation of
//! identical chromosomes within one instance+status epoch.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7
//! - Blazewicz et al. (2019), "Handbook on Scheduling"

mod simulator;

pub use simulator::{FitnessCache, Scheduler, DEFAULT_BREAKDOWN_PENALTY};

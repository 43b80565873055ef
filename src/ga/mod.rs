//! Genetic optimization of operation sequencing.
//!
//! Evolves a population of job-permutation chromosomes against the
//! makespan simulator. Selection is tournament (k=3), crossover is a
//! position-subset operator that preserves per-job operation counts by
//! construction, mutation is a position swap, and the elite fraction
//! survives each generation after a bounded improving-swap local
//! search.
//!
//! # Submodules
//!
//! - [`operators`]: crossover and mutation over chromosomes
//!
//! # References
//! - Cheng et al. (1996), "A Tutorial Survey of JSSP using GA"
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"

mod engine;
pub mod operators;

pub use engine::{GaConfig, GaResult, GeneticAlgorithm};

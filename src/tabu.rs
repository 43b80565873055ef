//! Tabu search over the chromosome space.
//!
//! Local-search alternative to the genetic optimizer. Each iteration
//! generates a fixed number of neighbours by random 2-position swaps,
//! sorts them by makespan, and accepts the best whose move is not on
//! the tabu list. The accepted move need not improve on the current
//! solution — there is no aspiration criterion. That is a deliberate
//! (if debatable) policy choice kept for behavioural fidelity with the
//! reference configuration; it lets the search wander out of basins at
//! the cost of occasionally cycling near them.
//!
//! # Reference
//! Glover (1989), "Tabu Search — Part I"

use std::collections::VecDeque;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::encoding::Chromosome;
use crate::error::{Error, Result};
use crate::models::{Instance, MachineStatusMap};
use crate::scheduler::Scheduler;
use crate::validation::preflight;

/// An unordered swap-index pair; the tabu list stores recent moves.
type Move = (usize, usize);

/// Tabu search parameters.
///
/// Defaults follow the dynamic-benchmark configuration: 250 iterations,
/// tabu list of 15, 10 neighbours per iteration.
#[derive(Debug, Clone)]
pub struct TabuConfig {
    /// Iteration budget.
    pub max_iterations: usize,
    /// Bound on the FIFO tabu list.
    pub tabu_size: usize,
    /// Neighbours generated per iteration.
    pub neighbours: usize,
    /// RNG seed. `None` = seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 250,
            tabu_size: 15,
            neighbours: 10,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the tabu list bound.
    pub fn with_tabu_size(mut self, size: usize) -> Self {
        self.tabu_size = size;
        self
    }

    /// Sets the neighbours generated per iteration.
    pub fn with_neighbours(mut self, neighbours: usize) -> Self {
        self.neighbours = neighbours;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter sanity.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig("iteration budget must be > 0".into()));
        }
        if self.tabu_size == 0 {
            return Err(Error::InvalidConfig("tabu list size must be > 0".into()));
        }
        if self.neighbours == 0 {
            return Err(Error::InvalidConfig(
                "neighbour count per iteration must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a tabu-search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best chromosome found.
    pub best: Chromosome,
    /// Its makespan.
    pub makespan: u64,
}

/// Tabu-search engine over job-permutation chromosomes.
#[derive(Debug)]
pub struct TabuSearch {
    config: TabuConfig,
    rng: SmallRng,
}

impl TabuSearch {
    /// Creates an engine with validated configuration.
    pub fn new(config: TabuConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self { config, rng })
    }

    /// Runs tabu search against the instance.
    pub fn run(
        &mut self,
        instance: &Instance,
        scheduler: &Scheduler,
        machine_status: Option<&MachineStatusMap>,
    ) -> Result<TabuResult> {
        preflight(instance)?;

        let evaluate = |ch: &Chromosome| {
            scheduler.calculate_makespan(&ch.decode(instance), machine_status)
        };

        let mut current = Chromosome::random(instance, &mut self.rng);
        let mut best = current.clone();
        let mut best_makespan = evaluate(&best);

        let mut tabu: VecDeque<Move> = VecDeque::with_capacity(self.config.tabu_size + 1);

        for _ in 0..self.config.max_iterations {
            // Random 2-swap neighbours, each tagged with its move.
            let mut neighbours: Vec<(Chromosome, Move, u64)> = (0..self.config.neighbours)
                .map(|_| {
                    let mut neighbour = current.clone();
                    let (i, j) = self.random_swap_pair(neighbour.len());
                    neighbour.genes.swap(i, j);
                    let makespan = evaluate(&neighbour);
                    (neighbour, (i.min(j), i.max(j)), makespan)
                })
                .collect();
            neighbours.sort_by_key(|&(_, _, makespan)| makespan);

            // First admissible: best-ranked non-tabu move, improving or not.
            if let Some((neighbour, mv, makespan)) = neighbours
                .into_iter()
                .find(|(_, mv, _)| !tabu.contains(mv))
            {
                current = neighbour;
                tabu.push_back(mv);
                if tabu.len() > self.config.tabu_size {
                    tabu.pop_front();
                }
                if makespan < best_makespan {
                    best_makespan = makespan;
                    best = current.clone();
                }
            }
        }

        debug!(
            "Tabu search finished on '{}': makespan {}",
            instance.name, best_makespan
        );

        Ok(TabuResult {
            best,
            makespan: best_makespan,
        })
    }

    /// Two distinct random positions.
    fn random_swap_pair(&mut self, len: usize) -> (usize, usize) {
        let i = self.rng.random_range(0..len);
        let mut j = self.rng.random_range(0..len);
        while len > 1 && j == i {
            j = self.rng.random_range(0..len);
        }
        (i, j)
    }
}

//! Generational genetic algorithm for makespan minimization.
//!
//! # Algorithm
//!
//! 1. Initialize `P` individuals: random chromosomes, or (with the
//!    configured seed ratio) heuristic-seeded ones perturbed by two
//!    swaps to diversify clones.
//! 2. Each generation: score everyone, carry the elite fraction forward
//!    (each refined by a bounded improving-swap local search), then
//!    fill the remainder with tournament-selected, crossed-over,
//!    mutated offspring.
//! 3. After a fixed generation budget, return the best individual.
//!
//! Lower fitness = better (minimization). Comparisons are strict `<`
//! throughout: equal-fitness individuals are never preferred over each
//! other beyond selection order.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::encoding::Chromosome;
use crate::error::{Error, Result};
use crate::ga::operators::{subset_crossover, swap_mutation};
use crate::heuristics::SeedHeuristic;
use crate::models::{Instance, MachineStatusMap};
use crate::scheduler::{FitnessCache, Scheduler};
use crate::validation::preflight;

/// Number of perturbation swaps applied to heuristic-seeded individuals.
const SEED_PERTURBATION_SWAPS: usize = 2;

/// Tournament size for parent selection.
const TOURNAMENT_SIZE: usize = 3;

/// Genetic algorithm parameters.
///
/// Defaults follow the dynamic-benchmark configuration: population 60,
/// 120 generations, crossover 0.95, mutation 0.05, elitism 0.10,
/// 15 local-search swaps, seed ratio 0.25.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Population size `P`.
    pub population_size: usize,
    /// Generation budget.
    pub generations: usize,
    /// Probability that a parent pair is crossed over.
    pub crossover_rate: f64,
    /// Per-child probability of a single swap mutation.
    pub mutation_rate: f64,
    /// Fraction of the population carried forward as elites.
    pub elitism_rate: f64,
    /// Improving-swap budget for elite local search.
    pub local_search_swaps: usize,
    /// Fraction of initial individuals drawn from the seeding heuristic.
    pub seed_ratio: f64,
    /// RNG seed. `None` = seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 60,
            generations: 120,
            crossover_rate: 0.95,
            mutation_rate: 0.05,
            elitism_rate: 0.10,
            local_search_swaps: 15,
            seed_ratio: 0.25,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elitism rate.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    /// Sets the elite local-search swap budget.
    pub fn with_local_search_swaps(mut self, swaps: usize) -> Self {
        self.local_search_swaps = swaps;
        self
    }

    /// Sets the heuristic seed ratio.
    pub fn with_seed_ratio(mut self, ratio: f64) -> Self {
        self.seed_ratio = ratio;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter sanity.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig("population size must be > 0".into()));
        }
        if self.generations == 0 {
            return Err(Error::InvalidConfig("generation budget must be > 0".into()));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("elitism_rate", self.elitism_rate),
            ("seed_ratio", self.seed_ratio),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within 0.0..=1.0, got {rate}"
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best chromosome found.
    pub best: Chromosome,
    /// Its makespan.
    pub makespan: u64,
    /// Best population fitness observed at each generation, plus the
    /// final population. Non-increasing thanks to elitism.
    pub best_per_generation: Vec<u64>,
}

/// Generational GA over job-permutation chromosomes.
///
/// Owns its RNG and an optional seeding heuristic. Each [`run`] call
/// creates a fresh [`FitnessCache`] scoped to that call's instance and
/// machine status — caches are never reused across calls, so a dynamic
/// rescheduling loop cannot observe stale makespans.
///
/// [`run`]: GeneticAlgorithm::run
#[derive(Debug)]
pub struct GeneticAlgorithm {
    config: GaConfig,
    heuristic: Option<Box<dyn SeedHeuristic>>,
    rng: SmallRng,
}

impl GeneticAlgorithm {
    /// Creates an engine with validated configuration.
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self {
            config,
            heuristic: None,
            rng,
        })
    }

    /// Attaches a seeding heuristic used during initialization.
    pub fn with_heuristic(mut self, heuristic: Box<dyn SeedHeuristic>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    /// Runs the GA against the instance and returns the best solution.
    ///
    /// `machine_status` is held fixed for the entire run; the caller
    /// (e.g. the rescheduling engine) supplies the map current at its
    /// simulation tick.
    pub fn run(
        &mut self,
        instance: &Instance,
        scheduler: &Scheduler,
        machine_status: Option<&MachineStatusMap>,
    ) -> Result<GaResult> {
        preflight(instance)?;

        let mut cache = FitnessCache::new();
        let mut population = self.initialize_population(instance);
        #[cfg(debug_assertions)]
        for individual in &population {
            individual.validate(instance)?;
        }

        let p = self.config.population_size;
        let elite_n = (self.config.elitism_rate * p as f64) as usize;
        let mut best_per_generation = Vec::with_capacity(self.config.generations + 1);

        for _ in 0..self.config.generations {
            let fitness: Vec<u64> = population
                .iter()
                .map(|ind| evaluate(ind, instance, scheduler, machine_status, &mut cache))
                .collect();
            best_per_generation.push(fitness.iter().copied().min().unwrap_or(u64::MAX));

            // Elites, each refined by bounded local search.
            let mut order: Vec<usize> = (0..p).collect();
            order.sort_by_key(|&i| fitness[i]);
            let mut next: Vec<Chromosome> = order[..elite_n]
                .iter()
                .map(|&i| {
                    self.local_search(
                        population[i].clone(),
                        instance,
                        scheduler,
                        machine_status,
                        &mut cache,
                    )
                })
                .collect();

            // Offspring fill the remainder.
            while next.len() < p {
                let p1 = population[self.tournament(&fitness)].clone();
                let p2 = population[self.tournament(&fitness)].clone();

                let (mut c1, mut c2) = if self.rng.random::<f64>() < self.config.crossover_rate {
                    subset_crossover(&p1, &p2, &mut self.rng)
                } else {
                    (p1, p2)
                };
                #[cfg(debug_assertions)]
                {
                    c1.validate(instance)?;
                    c2.validate(instance)?;
                }

                if self.rng.random::<f64>() < self.config.mutation_rate {
                    swap_mutation(&mut c1, 1, &mut self.rng);
                }
                if self.rng.random::<f64>() < self.config.mutation_rate {
                    swap_mutation(&mut c2, 1, &mut self.rng);
                }
                next.push(c1);
                next.push(c2);
            }
            next.truncate(p);
            population = next;
        }

        // Final scoring pass; first-seen wins on ties.
        let mut best_idx = 0;
        let mut best_fitness = u64::MAX;
        for (i, individual) in population.iter().enumerate() {
            let f = evaluate(individual, instance, scheduler, machine_status, &mut cache);
            if f < best_fitness {
                best_fitness = f;
                best_idx = i;
            }
        }
        best_per_generation.push(best_fitness);

        debug!(
            "GA finished on '{}': makespan {} ({} cached evaluations)",
            instance.name,
            best_fitness,
            cache.hits()
        );

        Ok(GaResult {
            best: population[best_idx].clone(),
            makespan: best_fitness,
            best_per_generation,
        })
    }

    fn initialize_population(&mut self, instance: &Instance) -> Vec<Chromosome> {
        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let individual = match &self.heuristic {
                Some(heuristic) if self.rng.random::<f64>() < self.config.seed_ratio => {
                    let mut seeded =
                        heuristic.generate(instance, &mut self.rng as &mut dyn RngCore);
                    swap_mutation(&mut seeded, SEED_PERTURBATION_SWAPS, &mut self.rng);
                    seeded
                }
                _ => Chromosome::random(instance, &mut self.rng),
            };
            population.push(individual);
        }
        population
    }

    /// Tournament selection, k=3, first-seen wins on ties.
    fn tournament(&mut self, fitness: &[u64]) -> usize {
        let mut best = self.rng.random_range(0..fitness.len());
        for _ in 1..TOURNAMENT_SIZE {
            let challenger = self.rng.random_range(0..fitness.len());
            if fitness[challenger] < fitness[best] {
                best = challenger;
            }
        }
        best
    }

    /// Repeated random swap, accept if improving, for a fixed budget.
    fn local_search(
        &mut self,
        individual: Chromosome,
        instance: &Instance,
        scheduler: &Scheduler,
        machine_status: Option<&MachineStatusMap>,
        cache: &mut FitnessCache,
    ) -> Chromosome {
        let mut best = individual;
        let mut best_fitness = evaluate(&best, instance, scheduler, machine_status, cache);

        for _ in 0..self.config.local_search_swaps {
            let mut candidate = best.clone();
            swap_mutation(&mut candidate, 1, &mut self.rng);
            let f = evaluate(&candidate, instance, scheduler, machine_status, cache);
            if f < best_fitness {
                best = candidate;
                best_fitness = f;
            }
        }
        best
    }
}

/// Cache-aware fitness evaluation: decode + replay.
fn evaluate(
    individual: &Chromosome,
    instance: &Instance,
    scheduler: &Scheduler,
    machine_status: Option<&MachineStatusMap>,
    cache: &mut FitnessCache,
) -> u64 {
    if let Some(hit) = cache.get(&individual.genes) {
        return hit;
    }
    let makespan = scheduler.calculate_makespan(&individual.decode(instance), machine_status);
    cache.insert(&individual.genes, makespan);
    makespan
}

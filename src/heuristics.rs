//! Seeding heuristics for population initialization.
//!
//! A seeding heuristic is an opaque capability `instance → chromosome`
//! whose output satisfies the job-count invariant. The genetic
//! optimizer treats it as a black box: seeded individuals are lightly
//! perturbed after generation to diversify heuristic clones.
//!
//! All strategies here emit block-ordered sequences — every operation
//! of the first-ranked job, then the second, and so on — which the
//! decoder turns into a priority-list schedule.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::fmt::Debug;

use rand::prelude::IndexedRandom;
use rand::RngCore;

use crate::encoding::Chromosome;
use crate::models::Instance;

/// A seeding strategy supplying initial chromosomes to the optimizer.
///
/// Implementations must uphold the chromosome invariant: job `j`
/// appears exactly `jobs[j].len()` times in the output.
pub trait SeedHeuristic: Send + Sync + Debug {
    /// Strategy name (e.g. "SPT", "LPT").
    fn name(&self) -> &'static str;

    /// Generates one feasible chromosome for the instance.
    fn generate(&self, instance: &Instance, rng: &mut dyn RngCore) -> Chromosome;
}

/// Emits the jobs in `order`, block by block.
fn block_order(instance: &Instance, order: impl Iterator<Item = usize>) -> Chromosome {
    let mut genes = Vec::with_capacity(instance.total_operations());
    for job in order {
        genes.extend(std::iter::repeat(job).take(instance.jobs[job].len()));
    }
    Chromosome::from_genes(genes)
}

/// Uniformly shuffled feasible chromosome.
#[derive(Debug, Clone, Copy)]
pub struct RandomSeed;

impl SeedHeuristic for RandomSeed {
    fn name(&self) -> &'static str {
        "RANDOM"
    }

    fn generate(&self, instance: &Instance, rng: &mut dyn RngCore) -> Chromosome {
        Chromosome::random(instance, rng)
    }
}

/// Jobs ordered by the duration of their first operation, ascending.
#[derive(Debug, Clone, Copy)]
pub struct FirstOpShortest;

impl SeedHeuristic for FirstOpShortest {
    fn name(&self) -> &'static str {
        "KK"
    }

    fn generate(&self, instance: &Instance, _rng: &mut dyn RngCore) -> Chromosome {
        let mut jobs: Vec<usize> = (0..instance.num_jobs()).collect();
        jobs.sort_by_key(|&j| instance.jobs[j].first().map_or(0, |op| op.duration));
        block_order(instance, jobs.into_iter())
    }
}

/// Shortest total processing time first.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl SeedHeuristic for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn generate(&self, instance: &Instance, _rng: &mut dyn RngCore) -> Chromosome {
        let mut jobs: Vec<usize> = (0..instance.num_jobs()).collect();
        jobs.sort_by_key(|&j| instance.job_duration(j));
        block_order(instance, jobs.into_iter())
    }
}

/// Longest total processing time first.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl SeedHeuristic for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn generate(&self, instance: &Instance, _rng: &mut dyn RngCore) -> Chromosome {
        let mut jobs: Vec<usize> = (0..instance.num_jobs()).collect();
        jobs.sort_by_key(|&j| std::cmp::Reverse(instance.job_duration(j)));
        block_order(instance, jobs.into_iter())
    }
}

/// Composite strategy: picks one member uniformly per call.
#[derive(Debug)]
pub struct Mixed {
    members: Vec<Box<dyn SeedHeuristic>>,
}

impl Mixed {
    /// Creates a composite over the given member strategies.
    pub fn new(members: Vec<Box<dyn SeedHeuristic>>) -> Self {
        Self { members }
    }

    /// The standard pool: KK, SPT, and LPT.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(FirstOpShortest),
            Box::new(Spt),
            Box::new(Lpt),
        ])
    }
}

impl SeedHeuristic for Mixed {
    fn name(&self) -> &'static str {
        "MIXED"
    }

    fn generate(&self, instance: &Instance, rng: &mut dyn RngCore) -> Chromosome {
        match self.members.as_slice().choose(rng) {
            Some(member) => member.generate(instance, rng),
            None => Chromosome::random(instance, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_instance() -> Instance {
        // Totals: J0 = 5, J1 = 9, J2 = 2
        Instance::new("h", 3)
            .with_job(vec![Operation::new(0, 3), Operation::new(1, 2)])
            .with_job(vec![Operation::new(2, 9)])
            .with_job(vec![Operation::new(1, 1), Operation::new(0, 1)])
    }

    #[test]
    fn test_spt_orders_ascending() {
        let inst = sample_instance();
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = Spt.generate(&inst, &mut rng);
        assert_eq!(ch.genes, vec![2, 2, 0, 0, 1]);
        assert!(ch.is_valid(&inst));
    }

    #[test]
    fn test_lpt_orders_descending() {
        let inst = sample_instance();
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = Lpt.generate(&inst, &mut rng);
        assert_eq!(ch.genes, vec![1, 0, 0, 2, 2]);
    }

    #[test]
    fn test_first_op_shortest() {
        let inst = sample_instance();
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = FirstOpShortest.generate(&inst, &mut rng);
        // First-op durations: J0 = 3, J1 = 9, J2 = 1
        assert_eq!(ch.genes, vec![2, 2, 0, 0, 1]);
    }

    #[test]
    fn test_all_outputs_valid() {
        let inst = sample_instance();
        let mut rng = SmallRng::seed_from_u64(7);
        let strategies: Vec<Box<dyn SeedHeuristic>> = vec![
            Box::new(RandomSeed),
            Box::new(FirstOpShortest),
            Box::new(Spt),
            Box::new(Lpt),
            Box::new(Mixed::standard()),
        ];
        for strategy in &strategies {
            for _ in 0..10 {
                let ch = strategy.generate(&inst, &mut rng);
                assert!(ch.is_valid(&inst), "{} produced invalid output", strategy.name());
            }
        }
    }

    #[test]
    fn test_mixed_draws_from_members() {
        let inst = sample_instance();
        let mut rng = SmallRng::seed_from_u64(42);
        let mixed = Mixed::standard();
        // Over many draws both SPT and LPT orderings should appear.
        let mut seen_first_genes = std::collections::HashSet::new();
        for _ in 0..50 {
            seen_first_genes.insert(mixed.generate(&inst, &mut rng).genes[0]);
        }
        assert!(seen_first_genes.len() > 1);
    }
}

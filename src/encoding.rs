//! Permutation chromosome encoding and decoding.
//!
//! # Encoding
//!
//! A chromosome is a sequence of job ids of length equal to the total
//! operation count; job `j` appears exactly `jobs[j].len()` times. The
//! k-th occurrence of job `j` denotes j's k-th operation, so any
//! permutation of the multiset decodes to a precedence-respecting
//! operation sequence — no repair step is ever needed.
//!
//! # Reference
//! Bierwirth (1995), "A generalized permutation approach to JSSP"

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Instance;

/// One decoded operation, ready for replay by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledOp {
    /// Job id.
    pub job: usize,
    /// Operation index within the job (0-based).
    pub op_index: usize,
    /// Machine the operation runs on.
    pub machine: usize,
    /// Base processing time.
    pub duration: u64,
}

/// A job-id permutation encoding a candidate operation sequencing.
///
/// Owned exclusively by the optimizer that created it; mutated in place
/// by mutation and local-search operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    /// Job ids in execution order.
    pub genes: Vec<usize>,
}

impl Chromosome {
    /// Creates a chromosome from raw genes.
    pub fn from_genes(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// Creates a random feasible chromosome for the instance.
    pub fn random<R: Rng + ?Sized>(instance: &Instance, rng: &mut R) -> Self {
        let mut genes = block_sequence(instance);
        genes.shuffle(rng);
        Self { genes }
    }

    /// Chromosome length (total operation count).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome is empty.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Checks the job-count invariant against the instance.
    pub fn is_valid(&self, instance: &Instance) -> bool {
        if self.genes.len() != instance.total_operations() {
            return false;
        }
        let mut counts = vec![0usize; instance.num_jobs()];
        for &job in &self.genes {
            match counts.get_mut(job) {
                Some(c) => *c += 1,
                None => return false,
            }
        }
        counts
            .iter()
            .zip(&instance.jobs)
            .all(|(&c, ops)| c == ops.len())
    }

    /// Checks the invariant, reporting a diagnostic on failure.
    pub fn validate(&self, instance: &Instance) -> Result<()> {
        if self.is_valid(instance) {
            Ok(())
        } else {
            Err(Error::InvalidChromosome(format!(
                "job-id multiset does not match operation counts of '{}' \
                 (len {}, expected {})",
                instance.name,
                self.genes.len(),
                instance.total_operations(),
            )))
        }
    }

    /// Decodes the chromosome into a concrete operation sequence.
    ///
    /// Single linear pass maintaining a per-job next-operation counter.
    /// Deterministic and pure. Callers guarantee validity; the invariant
    /// is asserted in debug builds only (hot path).
    pub fn decode(&self, instance: &Instance) -> Vec<ScheduledOp> {
        debug_assert!(self.is_valid(instance), "chromosome violates job counts");

        let mut next_op = vec![0usize; instance.num_jobs()];
        let mut sequence = Vec::with_capacity(self.genes.len());
        for &job in &self.genes {
            let op_index = next_op[job];
            let op = instance.jobs[job][op_index];
            sequence.push(ScheduledOp {
                job,
                op_index,
                machine: op.machine,
                duration: op.duration,
            });
            next_op[job] += 1;
        }
        sequence
    }
}

/// Job ids in block order: `[0, 0, .., 1, 1, .., n-1]` with one entry
/// per operation. The unshuffled base for random and heuristic seeds.
pub fn block_sequence(instance: &Instance) -> Vec<usize> {
    let mut seq = Vec::with_capacity(instance.total_operations());
    for (job, ops) in instance.jobs.iter().enumerate() {
        seq.extend(std::iter::repeat(job).take(ops.len()));
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sample_instance() -> Instance {
        Instance::new("enc", 3)
            .with_job(vec![Operation::new(0, 3), Operation::new(1, 2)])
            .with_job(vec![Operation::new(2, 5)])
            .with_job(vec![Operation::new(1, 4), Operation::new(0, 1)])
    }

    #[test]
    fn test_random_is_valid() {
        let inst = sample_instance();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let ch = Chromosome::random(&inst, &mut rng);
            assert_eq!(ch.len(), 5);
            assert!(ch.is_valid(&inst));
        }
    }

    #[test]
    fn test_decode_respects_precedence() {
        let inst = sample_instance();
        let ch = Chromosome::from_genes(vec![2, 0, 2, 1, 0]);
        let seq = ch.decode(&inst);

        assert_eq!(seq.len(), 5);
        // Occurrence order maps to op_index order per job.
        assert_eq!((seq[0].job, seq[0].op_index), (2, 0));
        assert_eq!((seq[2].job, seq[2].op_index), (2, 1));
        assert_eq!((seq[1].job, seq[1].op_index), (0, 0));
        assert_eq!((seq[4].job, seq[4].op_index), (0, 1));
        // Routing and durations come straight from the instance.
        assert_eq!(seq[3].machine, 2);
        assert_eq!(seq[3].duration, 5);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let inst = sample_instance();
        let ch = Chromosome::from_genes(vec![0, 1, 2, 2, 0]);
        assert_eq!(ch.decode(&inst), ch.decode(&inst));
    }

    #[test]
    fn test_invalid_wrong_length() {
        let inst = sample_instance();
        let ch = Chromosome::from_genes(vec![0, 1, 2]);
        assert!(!ch.is_valid(&inst));
        assert!(ch.validate(&inst).is_err());
    }

    #[test]
    fn test_invalid_wrong_counts() {
        let inst = sample_instance();
        // Right length, but job 1 appears twice and job 0 once.
        let ch = Chromosome::from_genes(vec![1, 1, 2, 2, 0]);
        assert!(!ch.is_valid(&inst));
    }

    #[test]
    fn test_invalid_unknown_job() {
        let inst = sample_instance();
        let ch = Chromosome::from_genes(vec![0, 0, 1, 2, 9]);
        assert!(!ch.is_valid(&inst));
    }

    #[test]
    fn test_block_sequence() {
        let inst = sample_instance();
        assert_eq!(block_sequence(&inst), vec![0, 0, 1, 2, 2]);
    }
}

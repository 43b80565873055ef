//! Genetic operators over job-permutation chromosomes.
//!
//! Both operators are closed over the encoding: they permute job ids
//! without changing per-job occurrence counts, so every output is a
//! valid chromosome and no repair step exists anywhere in the GA.
//!
//! # Reference
//! Cheng et al. (1996), "A Tutorial Survey of JSSP using GA, Part II"

use rand::seq::index::sample;
use rand::Rng;

use crate::encoding::Chromosome;

/// Precedence-preserving, job-count-preserving crossover.
///
/// A random subset of roughly half the gene positions is copied from
/// each parent into its child; every remaining position is filled by
/// scanning the *other* parent left to right and placing the next job
/// id whose required occurrence count is not yet met. Children are
/// valid permutations by construction.
pub fn subset_crossover<R: Rng + ?Sized>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let size = p1.len();
    if size < 2 {
        return (p1.clone(), p2.clone());
    }

    // Required occurrence count per job id (identical for both parents).
    let max_job = p1.genes.iter().copied().max().unwrap_or(0);
    let mut required = vec![0usize; max_job + 1];
    for &job in &p1.genes {
        required[job] += 1;
    }

    let mut c1: Vec<Option<usize>> = vec![None; size];
    let mut c2: Vec<Option<usize>> = vec![None; size];
    for i in sample(rng, size, size / 2) {
        c1[i] = Some(p1.genes[i]);
        c2[i] = Some(p2.genes[i]);
    }

    fill_remaining(&mut c1, &p2.genes, &required);
    fill_remaining(&mut c2, &p1.genes, &required);

    let collect = |slots: Vec<Option<usize>>| {
        Chromosome::from_genes(slots.into_iter().flatten().collect())
    };
    (collect(c1), collect(c2))
}

/// Fills empty slots with the donor's next not-yet-exhausted job id.
fn fill_remaining(child: &mut [Option<usize>], donor: &[usize], required: &[usize]) {
    let mut have = vec![0usize; required.len()];
    for &job in child.iter().flatten() {
        have[job] += 1;
    }
    for slot in child.iter_mut() {
        if slot.is_none() {
            for &job in donor {
                if have[job] < required[job] {
                    *slot = Some(job);
                    have[job] += 1;
                    break;
                }
            }
        }
    }
}

/// Swap mutation: exchanges `swaps` random position pairs in place.
///
/// Positions are drawn independently, so a swap may be a no-op.
pub fn swap_mutation<R: Rng + ?Sized>(chromosome: &mut Chromosome, swaps: usize, rng: &mut R) {
    let len = chromosome.len();
    if len < 2 {
        return;
    }
    for _ in 0..swaps {
        let i = rng.random_range(0..len);
        let j = rng.random_range(0..len);
        chromosome.genes.swap(i, j);
    }
}

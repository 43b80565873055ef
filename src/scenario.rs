//! Exogenous perturbation scenarios.
//!
//! A scenario is deterministic configuration expansion: it deep-copies
//! an instance and attaches the perturbations the rescheduling engine
//! will replay — a future job arrival, machine breakdown windows, and
//! one-shot processing-time noise. The expansion itself never touches
//! the simulation clock; [`crate::rescheduler`] consumes its output.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::models::{Instance, Operation};

/// Simulated clock time at which the synthetic job arrives.
pub const DEFAULT_ARRIVAL_TIME: u64 = 20;

/// Relative standard deviation of processing-time noise.
pub const DEFAULT_NOISE_STD: f64 = 0.05;

/// Named perturbation configurations applied to a static instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// No perturbation.
    Static,
    /// One synthetic job arrives mid-horizon.
    JobArrival,
    /// Machines break down for fixed windows.
    MachineBreakdown,
    /// Every operation duration is perturbed once by Gaussian noise.
    ProcessingNoise,
    /// All three perturbations combined.
    Combined,
}

/// A machine breakdown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Machine that breaks down.
    pub machine: usize,
    /// Clock time the window opens.
    pub start: u64,
    /// Window length. `None` = the machine never recovers and stays
    /// degraded for the remainder of the horizon.
    pub duration: Option<u64>,
}

/// A job arrival: the job definition and when it lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobArrival {
    /// Clock time of the arrival.
    pub time: u64,
    /// Operations of the arriving job.
    pub operations: Vec<Operation>,
}

/// Expanded scenario: the (possibly noise-perturbed) instance plus the
/// perturbations still pending on the timeline.
#[derive(Debug, Clone)]
pub struct ScenarioEffects {
    /// Deep copy of the input instance, noise already applied.
    pub instance: Instance,
    /// Pending job arrival, if any.
    pub arrival: Option<JobArrival>,
    /// Pending breakdown windows.
    pub breakdowns: Vec<Breakdown>,
}

/// The synthetic 3-operation job injected by arrival scenarios.
fn synthetic_job() -> Vec<Operation> {
    vec![
        Operation::new(0, 3),
        Operation::new(2, 5),
        Operation::new(1, 4),
    ]
}

/// Default breakdown windows; machines out of range for the instance
/// are skipped.
fn default_breakdowns(instance: &Instance) -> Vec<Breakdown> {
    [
        Breakdown {
            machine: 2,
            start: 15,
            duration: Some(5),
        },
        Breakdown {
            machine: 4,
            start: 35,
            duration: Some(10),
        },
    ]
    .into_iter()
    .filter(|b| b.machine < instance.num_machines)
    .collect()
}

/// Expands a scenario against an instance.
///
/// Processing noise is applied here, exactly once: each duration is
/// redrawn from `N(duration, noise_std × duration)` and floored at 1.
/// Arrival and breakdowns are returned as pending effects for the
/// rescheduling engine to replay chronologically.
pub fn apply_scenario<R: Rng + ?Sized>(
    instance: &Instance,
    scenario: Scenario,
    noise_std: f64,
    rng: &mut R,
) -> ScenarioEffects {
    let mut effects = ScenarioEffects {
        instance: instance.clone(),
        arrival: None,
        breakdowns: Vec::new(),
    };

    let with_arrival = matches!(scenario, Scenario::JobArrival | Scenario::Combined);
    let with_breakdowns = matches!(scenario, Scenario::MachineBreakdown | Scenario::Combined);
    let with_noise = matches!(scenario, Scenario::ProcessingNoise | Scenario::Combined);

    if with_arrival {
        effects.arrival = Some(JobArrival {
            time: DEFAULT_ARRIVAL_TIME,
            operations: synthetic_job(),
        });
    }
    if with_breakdowns {
        effects.breakdowns = default_breakdowns(instance);
    }
    if with_noise {
        perturb_durations(&mut effects.instance, noise_std, rng);
    }

    effects
}

/// Redraws every duration once from a Gaussian around its base value.
fn perturb_durations<R: Rng + ?Sized>(instance: &mut Instance, noise_std: f64, rng: &mut R) {
    for ops in &mut instance.jobs {
        for op in ops.iter_mut() {
            let base = op.duration as f64;
            let noisy = match Normal::new(base, noise_std * base) {
                Ok(dist) => dist.sample(rng),
                Err(_) => base,
            };
            op.duration = (noisy.round() as i64).max(1) as u64;
        }
    }
}

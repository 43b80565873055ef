//! Event-driven rescheduling engine.
//!
//! Drives a simulated clock over a scenario's event agenda: at clock 0
//! the chosen optimizer runs once against the pristine instance; after
//! each event (job arrival, breakdown start, breakdown end) it runs
//! again against the mutated state; a final run closes the horizon.
//! The output is the time-ordered history of best makespans — the last
//! entry is the reported result for the scenario.
//!
//! # Ownership
//!
//! The engine owns the canonical mutable instance and machine-status
//! map. Each optimizer invocation receives read-only views for that
//! tick, so no optimizer can alias state across ticks.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::encoding::Chromosome;
use crate::error::{Error, Result};
use crate::ga::GeneticAlgorithm;
use crate::models::{Instance, MachineStatus, MachineStatusMap, Operation};
use crate::scenario::{apply_scenario, Scenario, DEFAULT_NOISE_STD};
use crate::scheduler::Scheduler;
use crate::tabu::TabuSearch;

/// State mutation carried by an agenda entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Append the job to the instance.
    JobArrival(Vec<Operation>),
    /// Mark the machine broken.
    BreakdownStart(usize),
    /// Clear the machine's status.
    BreakdownEnd(usize),
}

/// One agenda entry. Immutable once placed on the agenda.
#[derive(Debug, Clone)]
pub struct Event {
    /// Clock time the event fires.
    pub time: u64,
    /// The mutation to apply.
    pub kind: EventKind,
    /// Label recorded in the history.
    pub label: String,
}

/// One history record: the best makespan found after the named event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReschedulePoint {
    /// Simulation clock.
    pub time: u64,
    /// Best makespan at this tick.
    pub makespan: u64,
    /// Event label ("initial", "job_arrival", "breakdown_m2", ...).
    pub event: String,
}

/// Best solution of one re-optimization.
#[derive(Debug, Clone)]
pub struct Incumbent {
    /// Best chromosome found.
    pub chromosome: Chromosome,
    /// Its makespan.
    pub makespan: u64,
}

/// An optimizer the rescheduling engine can re-invoke at each tick.
///
/// Implemented by [`GeneticAlgorithm`] and [`TabuSearch`]; any other
/// strategy over the same chromosome space can plug in.
pub trait Optimizer {
    /// Optimizer name for logs and result labelling.
    fn name(&self) -> &'static str;

    /// Runs one full optimization against the given tick's state.
    fn optimize(
        &mut self,
        instance: &Instance,
        scheduler: &Scheduler,
        machine_status: Option<&MachineStatusMap>,
    ) -> Result<Incumbent>;
}

impl Optimizer for GeneticAlgorithm {
    fn name(&self) -> &'static str {
        "GA"
    }

    fn optimize(
        &mut self,
        instance: &Instance,
        scheduler: &Scheduler,
        machine_status: Option<&MachineStatusMap>,
    ) -> Result<Incumbent> {
        let result = self.run(instance, scheduler, machine_status)?;
        Ok(Incumbent {
            chromosome: result.best,
            makespan: result.makespan,
        })
    }
}

impl Optimizer for TabuSearch {
    fn name(&self) -> &'static str {
        "TS"
    }

    fn optimize(
        &mut self,
        instance: &Instance,
        scheduler: &Scheduler,
        machine_status: Option<&MachineStatusMap>,
    ) -> Result<Incumbent> {
        let result = self.run(instance, scheduler, machine_status)?;
        Ok(Incumbent {
            chromosome: result.best,
            makespan: result.makespan,
        })
    }
}

/// Rescheduling parameters.
#[derive(Debug, Clone)]
pub struct RescheduleConfig {
    /// Simulation horizon.
    pub max_time: u64,
    /// Relative std of one-shot processing noise.
    pub noise_std: f64,
}

impl Default for RescheduleConfig {
    fn default() -> Self {
        Self {
            max_time: 100,
            noise_std: DEFAULT_NOISE_STD,
        }
    }
}

impl RescheduleConfig {
    /// Sets the simulation horizon.
    pub fn with_max_time(mut self, max_time: u64) -> Self {
        self.max_time = max_time;
        self
    }

    /// Sets the processing-noise std.
    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Checks parameter sanity.
    pub fn validate(&self) -> Result<()> {
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "noise std must be finite and >= 0, got {}",
                self.noise_std
            )));
        }
        Ok(())
    }
}

/// Event-driven rescheduling engine.
pub struct Rescheduler {
    config: RescheduleConfig,
}

impl Rescheduler {
    /// Creates an engine with validated configuration.
    pub fn new(config: RescheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs a scenario to the horizon, re-optimizing after each event.
    ///
    /// `rng` drives scenario expansion (processing noise); the
    /// optimizer carries its own RNG.
    pub fn run<R: rand::Rng + ?Sized>(
        &self,
        instance: &Instance,
        scenario: Scenario,
        optimizer: &mut dyn Optimizer,
        rng: &mut R,
    ) -> Result<Vec<ReschedulePoint>> {
        let effects = apply_scenario(instance, scenario, self.config.noise_std, rng);
        let agenda = build_agenda(&effects);

        // Canonical mutable state for the whole run; optimizers only
        // ever see borrowed views of it.
        let mut instance = effects.instance;
        let mut machine_status = MachineStatusMap::new();
        let scheduler = Scheduler::new(instance.num_machines);

        let mut history = Vec::with_capacity(agenda.len() + 2);
        let incumbent = optimizer.optimize(&instance, &scheduler, Some(&machine_status))?;
        history.push(ReschedulePoint {
            time: 0,
            makespan: incumbent.makespan,
            event: "initial".into(),
        });

        let mut clock = 0;
        for event in agenda {
            if event.time > self.config.max_time {
                break;
            }
            clock = event.time;
            match event.kind {
                EventKind::JobArrival(operations) => instance.push_job(operations),
                EventKind::BreakdownStart(machine) => {
                    machine_status.insert(machine, MachineStatus::Broken);
                }
                EventKind::BreakdownEnd(machine) => {
                    machine_status.remove(&machine);
                }
            }
            debug!(
                "t={clock}: {} on '{}', re-optimizing with {}",
                event.label,
                instance.name,
                optimizer.name()
            );

            let incumbent = optimizer.optimize(&instance, &scheduler, Some(&machine_status))?;
            history.push(ReschedulePoint {
                time: clock,
                makespan: incumbent.makespan,
                event: event.label,
            });
        }

        if clock < self.config.max_time {
            let incumbent = optimizer.optimize(&instance, &scheduler, Some(&machine_status))?;
            history.push(ReschedulePoint {
                time: self.config.max_time,
                makespan: incumbent.makespan,
                event: "finish".into(),
            });
        }

        Ok(history)
    }
}

/// Expands scenario effects into a chronologically sorted agenda.
///
/// A breakdown window contributes a start event and, when it has a
/// duration, an end event at `start + duration`. A window without a
/// duration leaves the machine degraded for the rest of the horizon.
fn build_agenda(effects: &crate::scenario::ScenarioEffects) -> Vec<Event> {
    let mut agenda = Vec::new();

    if let Some(arrival) = &effects.arrival {
        agenda.push(Event {
            time: arrival.time,
            kind: EventKind::JobArrival(arrival.operations.clone()),
            label: "job_arrival".into(),
        });
    }
    for breakdown in &effects.breakdowns {
        agenda.push(Event {
            time: breakdown.start,
            kind: EventKind::BreakdownStart(breakdown.machine),
            label: format!("breakdown_m{}", breakdown.machine),
        });
        if let Some(duration) = breakdown.duration {
            agenda.push(Event {
                time: breakdown.start + duration,
                kind: EventKind::BreakdownEnd(breakdown.machine),
                label: format!("recovery_m{}", breakdown.machine),
            });
        }
    }

    // Stable sort: a start pushed before its own zero-length end stays
    // ahead of it.
    agenda.sort_by_key(|event| event.time);
    agenda
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GaConfig;
    use crate::tabu::TabuConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn two_job_instance() -> Instance {
        Instance::new("resc", 6)
            .with_job(vec![Operation::new(0, 3), Operation::new(1, 2)])
            .with_job(vec![Operation::new(2, 4), Operation::new(3, 1)])
    }

    /// Records what each re-optimization call observed.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<(usize, Vec<usize>)>, // (num_jobs, broken machines)
        last_jobs: Vec<Vec<Operation>>,  // last job of the instance, per call
    }

    impl Optimizer for Recorder {
        fn name(&self) -> &'static str {
            "RECORDER"
        }

        fn optimize(
            &mut self,
            instance: &Instance,
            _scheduler: &Scheduler,
            machine_status: Option<&MachineStatusMap>,
        ) -> Result<Incumbent> {
            let mut broken: Vec<usize> = machine_status
                .map(|status| status.keys().copied().collect())
                .unwrap_or_default();
            broken.sort_unstable();
            self.calls.push((instance.num_jobs(), broken));
            self.last_jobs
                .push(instance.jobs.last().cloned().unwrap_or_default());
            Ok(Incumbent {
                chromosome: Chromosome::from_genes(vec![]),
                makespan: self.calls.len() as u64,
            })
        }
    }

    #[test]
    fn test_static_scenario_only_initial_and_final() {
        let inst = two_job_instance();
        let engine = Rescheduler::new(RescheduleConfig::default()).unwrap();
        let mut recorder = Recorder::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let history = engine
            .run(&inst, Scenario::Static, &mut recorder, &mut rng)
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].time, 0);
        assert_eq!(history[0].event, "initial");
        assert_eq!(history[1].time, 100);
        assert_eq!(history[1].event, "finish");
        assert_eq!(recorder.calls.len(), 2);
    }

    #[test]
    fn test_job_arrival_timing_and_growth() {
        let inst = two_job_instance();
        let engine = Rescheduler::new(RescheduleConfig::default()).unwrap();
        let mut recorder = Recorder::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let history = engine
            .run(&inst, Scenario::JobArrival, &mut recorder, &mut rng)
            .unwrap();

        // Second entry fires exactly at the arrival time.
        assert_eq!(history[1].time, 20);
        assert_eq!(history[1].event, "job_arrival");

        // The optimizer saw 2 jobs initially, then exactly 3, and the
        // appended job is the synthetic arrival, operation for operation.
        assert_eq!(recorder.calls[0].0, 2);
        assert_eq!(recorder.calls[1].0, 3);
        assert_eq!(recorder.calls.last().unwrap().0, 3);
        assert_eq!(
            recorder.last_jobs[1],
            vec![
                Operation::new(0, 3),
                Operation::new(2, 5),
                Operation::new(1, 4),
            ]
        );
    }

    #[test]
    fn test_breakdown_start_and_recovery() {
        let inst = two_job_instance();
        let engine = Rescheduler::new(RescheduleConfig::default()).unwrap();
        let mut recorder = Recorder::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let history = engine
            .run(&inst, Scenario::MachineBreakdown, &mut recorder, &mut rng)
            .unwrap();

        // Windows: m2 at [15, 20), m4 at [35, 45), then the finish run.
        let times: Vec<u64> = history.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![0, 15, 20, 35, 45, 100]);

        let broken: Vec<&Vec<usize>> = recorder.calls.iter().map(|(_, b)| b).collect();
        assert!(broken[0].is_empty());
        assert_eq!(broken[1], &vec![2]);
        assert!(broken[2].is_empty());
        assert_eq!(broken[3], &vec![4]);
        assert!(broken[4].is_empty());
        assert!(broken[5].is_empty());
    }

    #[test]
    fn test_events_beyond_horizon_ignored() {
        let inst = two_job_instance();
        let engine = Rescheduler::new(RescheduleConfig::default().with_max_time(10)).unwrap();
        let mut recorder = Recorder::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let history = engine
            .run(&inst, Scenario::MachineBreakdown, &mut recorder, &mut rng)
            .unwrap();

        // All breakdowns start after t=10: only initial + finish.
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].time, 10);
    }

    #[test]
    fn test_unending_breakdown_has_no_recovery_event() {
        let effects = crate::scenario::ScenarioEffects {
            instance: two_job_instance(),
            arrival: None,
            breakdowns: vec![crate::scenario::Breakdown {
                machine: 1,
                start: 30,
                duration: None,
            }],
        };
        let agenda = build_agenda(&effects);
        assert_eq!(agenda.len(), 1);
        assert!(matches!(agenda[0].kind, EventKind::BreakdownStart(1)));
    }

    #[test]
    fn test_combined_history_is_chronological() {
        let inst = two_job_instance();
        let engine = Rescheduler::new(RescheduleConfig::default()).unwrap();
        let mut recorder = Recorder::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let history = engine
            .run(&inst, Scenario::Combined, &mut recorder, &mut rng)
            .unwrap();

        for pair in history.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        assert_eq!(history.last().unwrap().time, 100);
    }

    #[test]
    fn test_ga_end_to_end() {
        let inst = two_job_instance();
        let engine = Rescheduler::new(RescheduleConfig::default()).unwrap();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(10)
            .with_seed(42);
        let mut ga = GeneticAlgorithm::new(config).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        let history = engine
            .run(&inst, Scenario::JobArrival, &mut ga, &mut rng)
            .unwrap();

        assert_eq!(history[0].time, 0);
        assert_eq!(history[1].time, 20);
        assert_eq!(history.last().unwrap().time, 100);
        for point in &history {
            assert!(point.makespan > 0);
        }
    }

    #[test]
    fn test_tabu_end_to_end() {
        let inst = two_job_instance();
        let engine = Rescheduler::new(RescheduleConfig::default()).unwrap();
        let config = TabuConfig::default().with_max_iterations(30).with_seed(42);
        let mut ts = TabuSearch::new(config).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        let history = engine
            .run(&inst, Scenario::Static, &mut ts, &mut rng)
            .unwrap();

        assert_eq!(history.len(), 2);
        assert!(history[0].makespan > 0);
        assert!(history[1].makespan > 0);
    }

    #[test]
    fn test_config_validation() {
        assert!(RescheduleConfig::default().validate().is_ok());
        assert!(RescheduleConfig::default()
            .with_noise_std(-0.1)
            .validate()
            .is_err());
        assert!(Rescheduler::new(RescheduleConfig::default().with_noise_std(f64::NAN)).is_err());
    }
}

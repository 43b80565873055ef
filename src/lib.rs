//! Dynamic job-shop scheduling optimization.
//!
//! Minimizes the makespan of job-shop instances with a genetic
//! algorithm or tabu search over a job-permutation encoding, and
//! supports dynamic variants — job arrivals, machine breakdowns,
//! processing-time noise — through an event-driven rescheduling loop.
//!
//! # Modules
//!
//! - **`models`**: `Instance`, `Operation`, machine status modifiers
//! - **`encoding`**: permutation chromosome + decoding contract
//! - **`scheduler`**: deterministic makespan simulator, fitness cache
//! - **`heuristics`**: seeding strategies (SPT, LPT, KK, mixed)
//! - **`ga`** / **`tabu`**: the two optimizers
//! - **`scenario`**: perturbation scenarios applied to an instance
//! - **`rescheduler`**: simulated clock, event agenda, re-optimization
//! - **`loader`**: benchmark text-format parsing
//! - **`validation`**: pre-flight instance integrity checks
//!
//! # Concurrency
//!
//! Everything here is single-threaded and blocking. Run repetitions in
//! parallel by giving each worker its own deep copy of the instance
//! and scenario — nothing in this crate shares mutable state.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"
//! - Glover (1989), "Tabu Search — Part I"

pub mod encoding;
pub mod error;
pub mod ga;
pub mod heuristics;
pub mod loader;
pub mod models;
pub mod rescheduler;
pub mod scenario;
pub mod scheduler;
pub mod tabu;
pub mod validation;

pub use encoding::{Chromosome, ScheduledOp};
pub use error::{Error, Result};
pub use ga::{GaConfig, GaResult, GeneticAlgorithm};
pub use models::{Instance, MachineStatus, MachineStatusMap, Operation};
pub use rescheduler::{Optimizer, ReschedulePoint, RescheduleConfig, Rescheduler};
pub use scenario::{apply_scenario, Scenario};
pub use scheduler::{FitnessCache, Scheduler};
pub use tabu::{TabuConfig, TabuResult, TabuSearch};

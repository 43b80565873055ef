//! Machine status modifiers.
//!
//! A status map describes transient machine degradation for one
//! makespan evaluation. It is supplied per call and never persisted —
//! the rescheduling engine owns the canonical map and mutates it as
//! breakdown events start and end.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Transient condition of a machine during simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Every operation on the machine incurs a flat breakdown penalty.
    Broken,
    /// Every operation duration is multiplied by this factor
    /// (floored, clamped to at least 1).
    Slowdown(f64),
}

/// Machine index → status. Machines absent from the map run nominally.
pub type MachineStatusMap = HashMap<usize, MachineStatus>;

// core/state.rs

// High-level homing mode and the observable controller state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pose::Pose;

// Homing modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Roaming,   // Driven by another actor, controller silent
    Returning, // Steering toward home until arrival
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Roaming => write!(f, "ROAMING"),
            Mode::Returning => write!(f, "RETURNING"),
        }
    }
}

/// Snapshot of everything the controller owns across cycles
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ControllerState {
    /// Previous pose sample, `None` before the first sample
    pub last_pose: Option<Pose>,
    /// Odometer since the last recharge (meters)
    pub distance_traveled: f64,
    /// Remaining charge (percent)
    pub battery: f64,
    /// Current homing mode
    pub mode: Mode,
}

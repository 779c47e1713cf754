// core/mod.rs

// Pose tracking, the energy model and the homing mode. Everything here is
// plain owned state with no transport or clock dependencies.

pub mod energy;
pub mod pose;
pub mod state;

pub use energy::{EnergyModel, EnergyReport, FULL_BATTERY};
pub use pose::{LastPose, Pose, PoseTracker};
pub use state::{ControllerState, Mode};

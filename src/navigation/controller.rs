// src/navigation/controller.rs
// Battery-aware homing state machine. Consumes one pose sample per call and
// decides whether to stay silent, steer home, or stop at the dock.

use log::{debug, info, warn};
use serde::Serialize;

use super::{HomePoint, SteeringLaw, VelocityCommand};
use crate::core::{ControllerState, EnergyModel, Mode, Pose, PoseTracker};
use crate::HomingConfig;

/// Outcome of one controller step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// First sample: stored as the reference pose, nothing else happened
    Bootstrap,
    /// A full cycle ran
    Cycle(CycleReport),
}

impl Step {
    /// Command to send this cycle, if any
    pub fn command(&self) -> Option<VelocityCommand> {
        match self {
            Step::Bootstrap => None,
            Step::Cycle(report) => report.command,
        }
    }

    pub fn report(&self) -> Option<&CycleReport> {
        match self {
            Step::Bootstrap => None,
            Step::Cycle(report) => Some(report),
        }
    }
}

/// Per-cycle telemetry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// Odometer after this cycle (zero on arrival)
    pub distance_traveled: f64,
    /// Charge after this cycle (full on arrival)
    pub battery: f64,
    /// Mode at the end of the cycle
    pub mode: Mode,
    /// Distance from this sample to home
    pub distance_to_home: f64,
    /// Charge needed to get home from this sample
    pub min_battery_needed: f64,
    /// Robot reached home this cycle
    pub arrived: bool,
    /// Heading within the alignment tolerance while returning
    pub aligned: bool,
    /// Heading error used for steering, when returning
    pub heading_error: Option<f64>,
    /// Command emitted this cycle
    pub command: Option<VelocityCommand>,
}

/// Homing controller: pose tracker, energy model and steering law driven by
/// a two-mode state machine.
pub struct HomingController {
    home: HomePoint,
    arrival_threshold: f64,
    steering: SteeringLaw,
    tracker: PoseTracker,
    energy: EnergyModel,
    mode: Mode,
}

impl HomingController {
    /// Creates a controller in `Roaming` with a full battery
    pub fn new(config: &HomingConfig) -> Self {
        HomingController {
            home: config.home,
            arrival_threshold: config.arrival_threshold,
            steering: SteeringLaw {
                kp: config.kp,
                cruise_speed: config.cruise_speed,
                alignment_tolerance: config.alignment_tolerance,
                normalize: config.normalize_heading_error,
            },
            tracker: PoseTracker::new(),
            energy: EnergyModel::new(config.drain_per_meter, config.return_cost_factor),
            mode: Mode::Roaming,
        }
    }

    /// Processes one pose sample. Samples must arrive in order and be finite.
    pub fn step(&mut self, pose: Pose) -> Step {
        let Some(displacement) = self.tracker.update(&pose) else {
            return Step::Bootstrap;
        };

        let energy = self.energy.apply(displacement, &pose, &self.home);
        let arrived = energy.distance_to_home < self.arrival_threshold;

        let mut heading_error = None;
        let mut aligned = false;

        let command = if arrived {
            // Arrival beats steering: stop, recharge and go back to roaming
            info!("AT HOME");
            self.mode = Mode::Roaming;
            self.energy.recharge();
            Some(VelocityCommand::stop())
        } else {
            if !energy.feasible && self.mode == Mode::Roaming {
                self.mode = Mode::Returning;
                warn!(
                    "Battery {:.1}% <= {:.1}% needed for {:.2}m home, returning",
                    energy.battery, energy.min_battery_needed, energy.distance_to_home
                );
            }

            match self.mode {
                Mode::Returning => {
                    let error = self.steering.heading_error(&pose, &self.home);
                    aligned = self.steering.is_aligned(error);
                    if aligned {
                        info!("DRIVING HOME");
                    }
                    heading_error = Some(error);
                    Some(self.steering.command(error))
                }
                Mode::Roaming => None,
            }
        };

        self.tracker.record(pose);

        info!(
            "Distance: {:.2} | Battery: {:.1}% ",
            self.energy.distance_traveled(),
            self.energy.battery()
        );
        if let Some(cmd) = &command {
            debug!("Command: linear={}, angular={}", cmd.linear, cmd.angular);
        }

        Step::Cycle(CycleReport {
            distance_traveled: self.energy.distance_traveled(),
            battery: self.energy.battery(),
            mode: self.mode,
            distance_to_home: energy.distance_to_home,
            min_battery_needed: energy.min_battery_needed,
            arrived,
            aligned,
            heading_error,
            command,
        })
    }

    /// Returns the current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn home(&self) -> HomePoint {
        self.home
    }

    /// Snapshot of the state carried between cycles
    pub fn state(&self) -> ControllerState {
        ControllerState {
            last_pose: self.tracker.last_pose(),
            distance_traveled: self.energy.distance_traveled(),
            battery: self.energy.battery(),
            mode: self.mode,
        }
    }
}

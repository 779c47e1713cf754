//! Homeward - battery-aware return-to-home for a single mobile robot
//!
//! This library tracks a simulated battery that drains with distance traveled
//! and takes over steering when the remaining charge only just covers the
//! trip home. It is transport-agnostic: poses go in through
//! [`HomingNode::handle_pose`] and velocity commands come out through a
//! [`VelocitySink`].

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[allow(missing_docs)]
pub mod core;
pub mod navigation;
pub mod ros_interface;

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

// Re-export commonly used items for easier access
pub use crate::core::{ControllerState, Mode, Pose};
pub use navigation::{CycleReport, HomePoint, HomingController, Step, VelocityCommand};
pub use ros_interface::{ChannelSink, LogSink, TransportError, VelocitySink};

/// Main configuration structure for Homeward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomingConfig {
    /// Docking location
    pub home: HomePoint,
    /// Battery percent consumed per meter traveled
    pub drain_per_meter: f64,
    /// Battery percent per meter the trip home is assumed to cost
    pub return_cost_factor: f64,
    /// Proportional gain of the heading controller
    pub kp: f64,
    /// Distance to home below which the robot counts as docked
    pub arrival_threshold: f64,
    /// Heading error (rad) under which the robot is reported as aligned
    pub alignment_tolerance: f64,
    /// Forward velocity while returning
    pub cruise_speed: f64,
    /// Wrap heading error into [-pi, pi] before steering
    pub normalize_heading_error: bool,
    /// ROS 2 settings, used by the `ros` feature
    pub ros: RosConfig,
}

/// ROS 2 specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosConfig {
    /// Node name
    pub node_name: String,
    /// Pose subscription topic
    pub pose_topic: String,
    /// Velocity command topic
    pub cmd_vel_topic: String,
}

impl Default for HomingConfig {
    fn default() -> Self {
        HomingConfig {
            home: HomePoint::default(),
            drain_per_meter: 2.0,
            return_cost_factor: 2.0,
            kp: 2.0,
            arrival_threshold: 0.1,
            alignment_tolerance: 0.05,
            cruise_speed: 1.0,
            normalize_heading_error: false,
            ros: RosConfig::default(),
        }
    }
}

impl Default for RosConfig {
    fn default() -> Self {
        RosConfig {
            node_name: "battery_monitor".to_string(),
            pose_topic: "/turtle1/pose".to_string(),
            cmd_vel_topic: "/turtle1/cmd_vel".to_string(),
        }
    }
}

impl HomingConfig {
    /// Load and validate a YAML configuration file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, HomingError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| HomingError::ConfigError(format!("{}: {}", path.display(), e)))?;
        let config: HomingConfig = serde_yaml::from_reader(file)
            .map_err(|e| HomingError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, HomingError> {
        let config: HomingConfig =
            serde_yaml::from_str(text).map_err(|e| HomingError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<(), HomingError> {
        if !self.home.x.is_finite() || !self.home.y.is_finite() {
            return Err(HomingError::ConfigError(format!(
                "home must be finite, got ({}, {})",
                self.home.x, self.home.y
            )));
        }

        let positive = [
            ("drain_per_meter", self.drain_per_meter),
            ("return_cost_factor", self.return_cost_factor),
            ("kp", self.kp),
            ("arrival_threshold", self.arrival_threshold),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(HomingError::ConfigError(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("alignment_tolerance", self.alignment_tolerance),
            ("cruise_speed", self.cruise_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(HomingError::ConfigError(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Homing node: a controller wired to a velocity sink
pub struct HomingNode<S: VelocitySink> {
    controller: HomingController,
    sink: S,
}

impl<S: VelocitySink> HomingNode<S> {
    /// Create a node from a validated configuration
    pub fn new(config: HomingConfig, sink: S) -> Result<Self, HomingError> {
        config.validate()?;
        log::info!(
            "Homing node started, home at ({:.3}, {:.3})",
            config.home.x,
            config.home.y
        );

        Ok(HomingNode {
            controller: HomingController::new(&config),
            sink,
        })
    }

    /// Run one pose sample through the controller and publish its command.
    ///
    /// Non-finite samples are rejected before they reach the state machine.
    /// A failed publish is returned as-is; the controller has already
    /// advanced and the command is not retried.
    pub fn handle_pose(&mut self, pose: Pose) -> Result<Step, HomingError> {
        if !pose.is_finite() {
            return Err(HomingError::InvalidPose(pose));
        }

        let step = self.controller.step(pose);
        if let Some(command) = step.command() {
            self.sink.publish(&command)?;
        }

        Ok(step)
    }

    /// Feed an ordered stream of poses. Invalid samples are logged and
    /// skipped; the first transport failure stops the run.
    pub fn run<I>(&mut self, poses: I) -> Result<usize, HomingError>
    where
        I: IntoIterator<Item = Pose>,
    {
        let mut commands = 0;
        for pose in poses {
            match self.handle_pose(pose) {
                Ok(step) => {
                    if step.command().is_some() {
                        commands += 1;
                    }
                }
                Err(HomingError::InvalidPose(pose)) => {
                    log::warn!("Skipping non-finite pose {:?}", pose);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(commands)
    }

    /// Get current controller status
    pub fn get_status(&self) -> ControllerState {
        self.controller.state()
    }

    /// Borrow the controller
    pub fn controller(&self) -> &HomingController {
        &self.controller
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Homeward error types
#[derive(Debug, Clone, PartialEq)]
pub enum HomingError {
    /// Configuration error
    ConfigError(String),
    /// Pose sample with a non-finite component
    InvalidPose(Pose),
    /// Velocity sink failure
    Transport(TransportError),
    /// ROS 2 setup error
    RosError(String),
}

impl std::fmt::Display for HomingError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HomingError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            HomingError::InvalidPose(pose) => write!(
                f,
                "Invalid pose: x={}, y={}, theta={}",
                pose.x, pose.y, pose.theta
            ),
            HomingError::Transport(e) => write!(f, "Transport error: {}", e),
            HomingError::RosError(msg) => write!(f, "ROS error: {}", msg),
        }
    }
}

impl std::error::Error for HomingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HomingError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for HomingError {
    fn from(e: TransportError) -> Self {
        HomingError::Transport(e)
    }
}

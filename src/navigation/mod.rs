//! Navigation for Homeward
//!
//! This module holds the home point, the velocity command sent to the base,
//! and the proportional steering law used while returning home. The homing
//! state machine itself lives in [`controller`].

#[allow(missing_docs)]
pub mod controller;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::Pose;

pub use controller::{CycleReport, HomingController, Step};

/// Fixed docking location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomePoint {
    /// X coordinate (meters)
    pub x: f64,
    /// Y coordinate (meters)
    pub y: f64,
}

impl HomePoint {
    /// Create a home point at `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        HomePoint { x, y }
    }

    /// Home as a nalgebra point
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Straight-line distance from `pose` to home
    pub fn distance_from(&self, pose: &Pose) -> f64 {
        nalgebra::distance(&pose.position(), &self.position())
    }

    /// Bearing from `pose` to home in the world frame (radians)
    pub fn bearing_from(&self, pose: &Pose) -> f64 {
        let offset = self.position() - pose.position();
        offset.y.atan2(offset.x)
    }
}

impl Default for HomePoint {
    /// Center of the default turtlesim window
    fn default() -> Self {
        HomePoint::new(5.544445, 5.544445)
    }
}

/// Velocity command for the robot base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    /// Forward velocity (m/s)
    pub linear: f64,
    /// Yaw rate (rad/s)
    pub angular: f64,
}

impl VelocityCommand {
    /// Zero velocity on both axes
    pub fn stop() -> Self {
        VelocityCommand {
            linear: 0.0,
            angular: 0.0,
        }
    }
}

/// Proportional heading controller toward a fixed point
#[derive(Debug, Clone)]
pub struct SteeringLaw {
    /// Proportional gain on heading error
    pub kp: f64,
    /// Forward speed while steering
    pub cruise_speed: f64,
    /// |error| at or below which the robot counts as aligned
    pub alignment_tolerance: f64,
    /// Wrap the error into [-pi, pi] before applying the gain
    pub normalize: bool,
}

impl SteeringLaw {
    /// Heading error toward `home`: bearing minus current heading.
    ///
    /// Left unwrapped unless `normalize` is set, so a robot facing 3.0 rad
    /// with home at -3.0 rad sees an error of -6.0 rather than ~0.28.
    pub fn heading_error(&self, pose: &Pose, home: &HomePoint) -> f64 {
        let error = home.bearing_from(pose) - pose.theta;
        if self.normalize {
            normalize_angle(error)
        } else {
            error
        }
    }

    /// Command for a given heading error
    pub fn command(&self, heading_error: f64) -> VelocityCommand {
        VelocityCommand {
            linear: self.cruise_speed,
            angular: self.kp * heading_error,
        }
    }

    /// Within the alignment tolerance
    pub fn is_aligned(&self, heading_error: f64) -> bool {
        heading_error.abs() <= self.alignment_tolerance
    }
}

/// Wrap an angle into [-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    // rem_euclid maps +pi onto -pi; keep the sign of the input at the boundary
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

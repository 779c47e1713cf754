// core/pose.rs

// Tracks the robot's pose stream and turns consecutive samples into incremental
// displacement for the energy model.

use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

// Pose: Robot position (x, y) and heading at a sensing instant
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,     // X position (meters)
    pub y: f64,     // Y position (meters)
    pub theta: f64, // Heading (radians)
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// Planar position of the sample
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

/// Last sample seen by the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LastPose {
    /// No sample received yet
    Uninitialized,
    /// Holding the immediately preceding sample
    Tracking(Pose),
}

/// Accumulates nothing itself; it only remembers the previous sample and
/// measures how far the robot moved since then.
#[derive(Clone, Debug)]
pub struct PoseTracker {
    last: LastPose,
}

impl PoseTracker {
    pub fn new() -> Self {
        PoseTracker {
            last: LastPose::Uninitialized,
        }
    }

    /// Euclidean displacement from the previous sample, or `None` on the
    /// bootstrap sample. The bootstrap sample is stored immediately; later
    /// samples must be committed with [`PoseTracker::record`] at the end of
    /// the cycle.
    pub fn update(&mut self, sample: &Pose) -> Option<f64> {
        match self.last {
            LastPose::Uninitialized => {
                debug!("Bootstrap pose: x={:.3}, y={:.3}", sample.x, sample.y);
                self.last = LastPose::Tracking(*sample);
                None
            }
            LastPose::Tracking(prev) => Some(nalgebra::distance(&prev.position(), &sample.position())),
        }
    }

    /// Commits `sample` as the previous pose for the next cycle
    pub fn record(&mut self, sample: Pose) {
        self.last = LastPose::Tracking(sample);
    }

    pub fn last(&self) -> LastPose {
        self.last
    }

    /// Previous sample, if any
    pub fn last_pose(&self) -> Option<Pose> {
        match self.last {
            LastPose::Uninitialized => None,
            LastPose::Tracking(pose) => Some(pose),
        }
    }
}

impl Default for PoseTracker {
    fn default() -> Self {
        Self::new()
    }
}

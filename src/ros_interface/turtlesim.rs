// src/ros_interface/turtlesim.rs
// ROS 2 bridge for turtlesim: pose samples in from the pose topic, Twist
// commands out on cmd_vel. The node is spun on the calling thread so samples
// reach the controller one at a time, in arrival order.

use futures::executor::LocalPool;
use futures::future;
use futures::stream::StreamExt;
use futures::task::LocalSpawnExt;
use log::{error, info, warn};
use r2r::geometry_msgs::msg::{Twist, Vector3};
use r2r::QosProfile;
use std::time::Duration;

use super::{TransportError, VelocitySink};
use crate::core::Pose;
use crate::navigation::VelocityCommand;
use crate::{HomingConfig, HomingError, HomingNode};

/// Sink publishing `geometry_msgs/Twist` on cmd_vel
pub struct TwistSink {
    publisher: r2r::Publisher<Twist>,
}

impl VelocitySink for TwistSink {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), TransportError> {
        self.publisher
            .publish(&to_twist(command))
            .map_err(|e| TransportError::PublishError(e.to_string()))
    }
}

/// Convert a command into a planar Twist (linear.x, angular.z)
pub fn to_twist(command: &VelocityCommand) -> Twist {
    Twist {
        linear: Vector3 {
            x: command.linear,
            y: 0.0,
            z: 0.0,
        },
        angular: Vector3 {
            x: 0.0,
            y: 0.0,
            z: command.angular,
        },
    }
}

fn from_turtlesim(msg: &r2r::turtlesim::msg::Pose) -> Pose {
    Pose::new(msg.x as f64, msg.y as f64, msg.theta as f64)
}

/// Runs the homing node against turtlesim until the process is stopped
pub fn run(config: &HomingConfig) -> Result<(), HomingError> {
    let ctx = r2r::Context::create().map_err(|e| HomingError::RosError(e.to_string()))?;
    let mut node = r2r::Node::create(ctx, &config.ros.node_name, "")
        .map_err(|e| HomingError::RosError(e.to_string()))?;

    let poses = node
        .subscribe::<r2r::turtlesim::msg::Pose>(&config.ros.pose_topic, QosProfile::default())
        .map_err(|e| HomingError::RosError(e.to_string()))?;
    let publisher = node
        .create_publisher::<Twist>(&config.ros.cmd_vel_topic, QosProfile::default())
        .map_err(|e| HomingError::RosError(e.to_string()))?;

    let mut homing = HomingNode::new(config.clone(), TwistSink { publisher })?;

    let mut pool = LocalPool::new();
    pool.spawner()
        .spawn_local(async move {
            poses
                .for_each(|msg| {
                    match homing.handle_pose(from_turtlesim(&msg)) {
                        Ok(_) => {}
                        Err(HomingError::InvalidPose(pose)) => {
                            warn!("Dropping non-finite pose {:?}", pose)
                        }
                        Err(e) => error!("Failed to handle pose: {}", e),
                    }
                    future::ready(())
                })
                .await
        })
        .map_err(|e| HomingError::RosError(e.to_string()))?;

    info!("Battery Monitor has been started.");

    loop {
        node.spin_once(Duration::from_millis(100));
        pool.run_until_stalled();
    }
}

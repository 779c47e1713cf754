// src/main.rs
// Entry point for Homeward. With the `ros` feature the node drives turtlesim
// live; otherwise it replays a recorded trajectory and logs the commands.
//
// Usage: homeward [config.yaml] [trajectory.yaml]

use homeward::HomingConfig;
use log::{error, info};
use std::error::Error;

fn load_config(path: Option<&String>) -> Result<HomingConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Ok(HomingConfig::from_yaml_file(path)?)
        }
        None => Ok(HomingConfig::default()),
    }
}

#[cfg(feature = "ros")]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(args.get(1))?;

    homeward::ros_interface::turtlesim::run(&config).map_err(|e| {
        error!("Homing node failed: {}", e);
        e.into()
    })
}

#[cfg(not(feature = "ros"))]
fn main() -> Result<(), Box<dyn Error>> {
    use homeward::{HomingNode, LogSink, Pose};

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(args.get(1))?;

    let Some(trajectory_path) = args.get(2) else {
        error!("No trajectory given; build with --features ros for live turtlesim");
        return Err("usage: homeward [config.yaml] <trajectory.yaml>".into());
    };

    let file = std::fs::File::open(trajectory_path)?;
    let poses: Vec<Pose> = serde_yaml::from_reader(file)?;
    info!("Replaying {} poses from {}", poses.len(), trajectory_path);

    let mut node = HomingNode::new(config, LogSink)?;
    let commands = node.run(poses)?;

    let status = node.get_status();
    info!(
        "Replay done: {} commands, mode={}, battery={:.1}%, distance={:.2}",
        commands, status.mode, status.battery, status.distance_traveled
    );
    Ok(())
}

// src/ros_interface/publisher.rs
// In-process velocity sinks: one that only logs, one that forwards over a
// std channel to whatever drives the base.

use log::info;
use std::sync::mpsc::Sender;

use super::{TransportError, VelocitySink};
use crate::navigation::VelocityCommand;

/// Sink that logs each command and drops it (offline replays)
#[derive(Debug, Default)]
pub struct LogSink;

impl VelocitySink for LogSink {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), TransportError> {
        info!(
            "Executing command: linear={}, angular={}",
            command.linear, command.angular
        );
        Ok(())
    }
}

/// Sink that forwards commands over an unbounded channel; never blocks
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<VelocityCommand>,
}

impl ChannelSink {
    /// Wrap the sending half of a command channel
    pub fn new(sender: Sender<VelocityCommand>) -> Self {
        ChannelSink { sender }
    }
}

impl VelocitySink for ChannelSink {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), TransportError> {
        self.sender
            .send(*command)
            .map_err(|_| TransportError::Disconnected)
    }
}

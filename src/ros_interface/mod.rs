//! Transport boundary for Homeward
//!
//! The controller only sees an ordered stream of poses and a sink for
//! velocity commands. This module defines that sink and its errors, plus:
//! - In-process sinks (logging, channel)
//! - A turtlesim bridge over ROS 2 (feature `ros`)

mod publisher;
#[cfg(feature = "ros")]
#[allow(missing_docs)]
pub mod turtlesim;

pub use publisher::*;

use crate::navigation::VelocityCommand;

/// Output port for velocity commands.
///
/// Implementations must not block the controller; queueing or dropping when
/// the far side is slow is their own business.
pub trait VelocitySink {
    /// Hand one command to the transport
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), TransportError>;
}

/// Transport error types
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Publishing failed
    PublishError(String),
    /// Receiving side has gone away
    Disconnected,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TransportError::PublishError(msg) => write!(f, "Publish error: {}", msg),
            TransportError::Disconnected => write!(f, "Command receiver disconnected"),
        }
    }
}

impl std::error::Error for TransportError {}

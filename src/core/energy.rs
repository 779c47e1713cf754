// core/energy.rs

// Simulated battery: drains linearly with distance traveled and decides whether
// the robot can still afford the trip home from where it stands.

use super::pose::Pose;
use crate::navigation::HomePoint;

/// Charge of a full battery (percent)
pub const FULL_BATTERY: f64 = 100.0;

/// Result of feeding one displacement into the energy model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyReport {
    /// Remaining charge after this cycle's drain
    pub battery: f64,
    /// Straight-line distance from the current sample to home
    pub distance_to_home: f64,
    /// Charge the trip home would consume
    pub min_battery_needed: f64,
    /// `battery > min_battery_needed`
    pub feasible: bool,
}

#[derive(Clone, Debug)]
pub struct EnergyModel {
    drain_per_meter: f64,
    return_cost_factor: f64,
    distance_traveled: f64,
    battery: f64,
}

impl EnergyModel {
    pub fn new(drain_per_meter: f64, return_cost_factor: f64) -> Self {
        EnergyModel {
            drain_per_meter,
            return_cost_factor,
            distance_traveled: 0.0,
            battery: FULL_BATTERY,
        }
    }

    /// Accumulates `displacement` and re-evaluates feasibility against the
    /// current sample.
    pub fn apply(&mut self, displacement: f64, current: &Pose, home: &HomePoint) -> EnergyReport {
        self.distance_traveled += displacement;
        self.battery = self.charge_after(self.distance_traveled);

        let distance_to_home = home.distance_from(current);
        let min_battery_needed = distance_to_home * self.return_cost_factor;

        EnergyReport {
            battery: self.battery,
            distance_to_home,
            min_battery_needed,
            feasible: self.battery > min_battery_needed,
        }
    }

    /// Charge remaining after `distance` meters, floored at zero
    pub fn charge_after(&self, distance: f64) -> f64 {
        (FULL_BATTERY - self.drain_per_meter * distance).max(0.0)
    }

    /// Full recharge on docking; odometer and battery reset together
    pub fn recharge(&mut self) {
        self.distance_traveled = 0.0;
        self.battery = FULL_BATTERY;
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn battery(&self) -> f64 {
        self.battery
    }
}

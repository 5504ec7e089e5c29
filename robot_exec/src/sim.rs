//! # Simulated equipment
//!
//! Simple plant models standing in for the robot's sensors when running the
//! executable away from the hardware. Both models are stepped once per cycle
//! with the demands the control modules produced.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use util::maths::{clamp, wrap_2pi};

use crate::{
    drive_ctrl::{WheelDems, NUM_WHEELS},
    eqpt::{ImuSensor, LiftEncoder}
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulated plant.
#[derive(Debug, Clone, Deserialize)]
pub struct SimParams {
    /// Yaw rate of the robot when every wheel is at full positive power.
    ///
    /// Units: degrees/second
    pub imu_max_rate_dps: f64,

    /// Speed of the lift at full power.
    ///
    /// Units: inches/second
    pub lift_max_speed_in_s: f64,

    /// Time constant of the lift's response to a change in power.
    ///
    /// Units: seconds
    pub lift_time_const_s: f64,

    /// Encoder ticks per inch of lift travel.
    pub lift_ticks_per_in: f64,

    /// Total travel of the lift from the bottom stop.
    ///
    /// Units: inches
    pub lift_travel_in: f64,
}

/// Simulated IMU, integrating the rotation commanded to the drivebase.
#[derive(Debug, Clone)]
pub struct SimImu {
    max_rate_dps: f64,

    /// True yaw of the robot, positive clockwise
    yaw_deg: f64,

    /// Yaw which reads as zero
    zero_deg: f64,
}

/// Simulated lift, a first-order response from power to lift velocity.
///
/// Positive power lowers the lift.
#[derive(Debug, Clone)]
pub struct SimLift {
    params: SimParams,

    /// Position of the lift above the bottom stop, in encoder ticks
    position_ticks: f64,

    /// Position which reads as zero ticks
    zero_ticks: f64,

    /// Units: inches/second, positive up
    velocity_in_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            imu_max_rate_dps: 180.0,
            lift_max_speed_in_s: 24.0,
            lift_time_const_s: 0.1,
            lift_ticks_per_in: 256.0,
            lift_travel_in: 40.0,
        }
    }
}

impl SimImu {
    pub fn new(params: &SimParams) -> Self {
        Self {
            max_rate_dps: params.imu_max_rate_dps,
            yaw_deg: 0.0,
            zero_deg: 0.0,
        }
    }

    /// Advance the robot's rotation by one step of `dt_s` seconds under the
    /// given wheel demands.
    ///
    /// Translation drives the two sides in opposite senses, so only rotation
    /// survives the average across the wheels.
    pub fn step(&mut self, dems: &WheelDems, dt_s: f64) {
        let mean: f64 = dems.to_array().iter().sum::<f64>() / NUM_WHEELS as f64;
        self.yaw_deg += mean * self.max_rate_dps * dt_s;
    }
}

impl ImuSensor for SimImu {
    fn yaw_deg(&self) -> f64 {
        // Report in (-180, 180]
        let wrapped = wrap_2pi((self.yaw_deg - self.zero_deg).to_radians()).to_degrees();
        if wrapped > 180.0 {
            wrapped - 360.0
        }
        else {
            wrapped
        }
    }

    fn zero_yaw(&mut self) {
        self.zero_deg = self.yaw_deg;
    }
}

impl SimLift {
    /// A new lift resting `start_in` inches above the bottom stop, with the
    /// encoder zeroed at the bottom stop.
    pub fn new(params: &SimParams, start_in: f64) -> Self {
        let start_in = clamp(&start_in, &0.0, &params.lift_travel_in);

        Self {
            position_ticks: start_in * params.lift_ticks_per_in,
            zero_ticks: 0.0,
            velocity_in_s: 0.0,
            params: params.clone(),
        }
    }

    /// Advance the lift by one step of `dt_s` seconds at the given power.
    pub fn step(&mut self, power: f64, dt_s: f64) {
        let target_in_s = -clamp(&power, &-1.0, &1.0) * self.params.lift_max_speed_in_s;

        // Exact discretisation of the first-order lag
        let alpha = 1.0 - (-dt_s / self.params.lift_time_const_s).exp();
        self.velocity_in_s += alpha * (target_in_s - self.velocity_in_s);

        let max_ticks = self.params.lift_travel_in * self.params.lift_ticks_per_in;
        let new_pos = self.position_ticks 
            + self.velocity_in_s * dt_s * self.params.lift_ticks_per_in;

        // Hard stops
        if new_pos <= 0.0 || new_pos >= max_ticks {
            self.velocity_in_s = 0.0;
        }
        self.position_ticks = clamp(&new_pos, &0.0, &max_ticks);
    }

    /// Height of the lift above the bottom stop.
    ///
    /// Units: inches
    pub fn position_in(&self) -> f64 {
        self.position_ticks / self.params.lift_ticks_per_in
    }
}

impl LiftEncoder for SimLift {
    fn raw_ticks(&self) -> i64 {
        (self.position_ticks - self.zero_ticks).round() as i64
    }

    fn reset(&mut self) {
        self.zero_ticks = self.position_ticks;
    }
}

//! # Equipment interfaces
//!
//! Narrow interfaces to the hardware collaborators of the control modules.
//! Sensors are read through the traits below, actuator demands are plain data
//! returned from each module's processing and handed to the hardware layer.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Heading source, typically an IMU.
pub trait ImuSensor {
    /// Current yaw in degrees, positive clockwise when viewed from above.
    fn yaw_deg(&self) -> f64;

    /// Make the current heading the zero heading.
    fn zero_yaw(&mut self);
}

/// Quadrature encoder on the lift.
pub trait LiftEncoder {
    /// Raw encoder count.
    fn raw_ticks(&self) -> i64;

    /// Make the current position the zero count.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Demand for a double-acting pneumatic solenoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolenoidDem {
    /// Extend the cylinder
    Forward,
    /// Retract the cylinder
    Reverse,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SolenoidDem {
    /// Forward when `extended` is true, otherwise reverse.
    pub fn from_extended(extended: bool) -> Self {
        if extended {
            SolenoidDem::Forward
        }
        else {
            SolenoidDem::Reverse
        }
    }
}

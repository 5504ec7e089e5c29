//! Operator stick input

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Normalised deflection of one operator joystick.
///
/// `x` is positive to the right and `y` positive forward (away from the
/// operator), both in [-1, 1]. `angle_rad` is the direction of the deflection
/// measured anticlockwise from forward, in [-pi, pi].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StickVector {
    pub x: f64,
    pub y: f64,
    pub throttle: f64,
    pub angle_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StickVector {
    /// Build a stick vector from its axes, deriving the deflection angle.
    pub fn new(x: f64, y: f64, throttle: f64) -> Self {
        Self {
            x,
            y,
            throttle,
            angle_rad: (-x).atan2(y),
        }
    }

    /// A centred stick with the throttle at `throttle`.
    pub fn centred(throttle: f64) -> Self {
        Self::new(0.0, 0.0, throttle)
    }

    /// Squared magnitude of the deflection.
    pub fn magnitude_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_angle() {
        assert_eq!(StickVector::new(0.0, 1.0, 0.0).angle_rad, 0.0);
        assert!((StickVector::new(-1.0, 0.0, 0.0).angle_rad - FRAC_PI_2).abs() < 1e-12);
        assert!((StickVector::new(1.0, 0.0, 0.0).angle_rad + FRAC_PI_2).abs() < 1e-12);
    }
}

//! Field-centric drive calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use nalgebra::Vector2;
use std::f64::consts::FRAC_PI_2;

// Internal imports
use super::*;
use util::maths::{clamp, group_normalise, unit_circle_clamp, wrap_2pi};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCtrl {

    /// Perform the field-centric mixing.
    ///
    /// The direction of the left stick is rotated by the robot heading so
    /// that stick-forward is always the same direction on the field. The
    /// translation speed is the squared stick deflection, normalised by the
    /// largest deflection available in that direction. The four demands are
    /// then scaled together so that no wheel exceeds unit power.
    pub(crate) fn calc_field_centric(&mut self, input: &InputData) -> WheelDems {
        let left = &input.left;

        // The IMU's yaw is clockwise positive, the stick angle anticlockwise
        let gyro_rad = (-input.heading_deg).to_radians();

        let desired_rad = left.angle_rad;
        let relative_rad = wrap_2pi(-gyro_rad + desired_rad + FRAC_PI_2);

        let forward = relative_rad.sin();
        let strafe = relative_rad.cos();

        // Largest deflection reachable in the desired direction
        let max_joy = unit_circle_clamp(Vector2::new(desired_rad.sin(), desired_rad.cos()));
        let scalar = clamp(
            &(left.magnitude_sq() / max_joy.norm_squared()),
            &-1.0, 
            &1.0
        );

        let rotate = input.right.x * self.params.rotate_scale;

        let raw = WheelDems {
            front_left: (forward + strafe) * scalar + rotate,
            front_right: (-forward + strafe) * scalar + rotate,
            back_left: (forward - strafe) * scalar + rotate,
            back_right: (-forward - strafe) * scalar + rotate,
        };

        let scaled = group_normalise(raw.to_vector());
        self.report.group_scaled = scaled != raw.to_vector();

        WheelDems::from_vector(scaled)
    }
}

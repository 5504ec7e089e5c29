//! Robot-centric drive calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use util::maths::group_normalise;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCtrl {

    /// Perform the robot-centric mixing.
    ///
    /// The left stick translates the robot relative to the chassis and the
    /// right stick's x axis rotates it. Demands may exceed unit power unless
    /// `normalise_robot_centric` is set.
    pub(crate) fn calc_robot_centric(&mut self, input: &InputData) -> WheelDems {
        let strafe = input.left.x;
        let forward = input.left.y;
        let rotate = input.right.x * self.params.rotate_scale;

        let raw = WheelDems {
            front_left: forward + strafe + rotate,
            front_right: -forward + strafe + rotate,
            back_left: forward - strafe + rotate,
            back_right: -forward - strafe + rotate,
        };

        if self.params.normalise_robot_centric {
            let scaled = group_normalise(raw.to_vector());
            self.report.group_scaled = scaled != raw.to_vector();
            WheelDems::from_vector(scaled)
        }
        else {
            raw
        }
    }
}

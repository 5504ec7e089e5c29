//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Drive control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    /// Factor applied to the rotation stick before it is mixed into the
    /// wheel demands.
    pub rotate_scale: f64,

    /// If true the robot-centric wheel demands are scaled as a group so that
    /// no wheel exceeds unit power, as in field-centric mode. If false any
    /// saturation is left to the drivebase's per-wheel clamp, which can
    /// distort the ratio of translation to rotation.
    pub normalise_robot_centric: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rotate_scale: 0.5,
            normalise_robot_centric: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let p: Params = util::params::parse(
            "rotate_scale = 0.5\nnormalise_robot_centric = true\n"
        ).unwrap();

        assert_eq!(p.rotate_scale, 0.5);
        assert!(p.normalise_robot_centric);
    }
}

//! Parameters structure for LiftCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::{SeqKind, Stage};
use crate::eqpt::SolenoidDem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Lift control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- CONTROLLER ----

    /// Height controller proportional gain
    pub k_p: f64,

    /// Height controller integral gain
    pub k_i: f64,

    /// Height controller derivative gain
    pub k_d: f64,

    // ---- GEOMETRY ----

    /// Number of encoder ticks per inch of lift travel.
    pub ticks_per_in: f64,

    /// Height of the lift when the encoder reads zero.
    ///
    /// Units: inches
    pub height_offset_in: f64,

    // ---- SEQUENCES ----

    /// Distance from the target inside which Command mode considers the
    /// target reached.
    ///
    /// Units: inches
    pub command_tolerance_in: f64,

    /// Time the carriage is given to settle after extending during a
    /// sequence.
    ///
    /// Units: seconds
    pub pause_s: f64,

    /// Stacking sequence, ends at the stacking height.
    pub auto_stack: StackProfile,

    /// Stacking sequence ending at the driving height.
    pub auto_drive: StackProfile,
}

/// Heights and tolerance for one automated stacking sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct StackProfile {
    /// Pick-up height, set-down height and final height.
    ///
    /// Units: inches
    pub heights_in: [f64; 3],

    /// Distance from a target inside which it is considered reached.
    ///
    /// Units: inches
    pub tolerance_in: f64,

    /// If true the carriage is left open (for manual mode) once it has been
    /// re-extended during the sequence.
    pub open_carriage_on_release: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            k_p: 0.05,
            k_i: 0.004,
            k_d: 1.0,
            ticks_per_in: 256.0,
            height_offset_in: 8.0,
            command_tolerance_in: 0.1,
            pause_s: 0.5,
            auto_stack: StackProfile {
                heights_in: [20.0, 8.0, 26.0],
                tolerance_in: 1.0,
                open_carriage_on_release: true,
            },
            auto_drive: StackProfile {
                heights_in: [32.0, 18.0, 38.0],
                tolerance_in: 0.1,
                open_carriage_on_release: false,
            },
        }
    }
}

impl Params {
    /// Get the profile used by the given sequence.
    pub fn profile(&self, kind: SeqKind) -> &StackProfile {
        match kind {
            SeqKind::AutoStack => &self.auto_stack,
            SeqKind::AutoDrive => &self.auto_drive,
        }
    }

    /// Convert a raw encoder count into a lift height in inches.
    pub fn ticks_to_height_in(&self, raw_ticks: i64) -> f64 {
        raw_ticks as f64 / self.ticks_per_in + self.height_offset_in
    }
}

impl StackProfile {
    /// Build the stage table for this profile.
    ///
    /// The lift rises to the pick-up height, releases the carriage, lowers
    /// to the set-down height, re-grips with the carriage and waits for it to
    /// settle, then rises to the final height.
    pub fn stage_table(&self, pause_s: f64) -> Vec<Stage> {
        vec![
            Stage::Track {
                target_in: self.heights_in[0],
                tolerance_in: self.tolerance_in,
                zero_on_arrival: false,
            },
            Stage::Actuate {
                carriage: SolenoidDem::Reverse,
            },
            Stage::Track {
                target_in: self.heights_in[1],
                tolerance_in: self.tolerance_in,
                zero_on_arrival: true,
            },
            Stage::ActuateDwell {
                carriage: SolenoidDem::Forward,
                dwell_s: pause_s,
                open_carriage: self.open_carriage_on_release,
            },
            Stage::Track {
                target_in: self.heights_in[2],
                tolerance_in: self.tolerance_in,
                zero_on_arrival: false,
            },
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let p: Params = util::params::parse(r#"
            k_p = 0.05
            k_i = 0.004
            k_d = 1.0
            ticks_per_in = 256.0
            height_offset_in = 8.0
            command_tolerance_in = 0.1
            pause_s = 0.5

            [auto_stack]
            heights_in = [20.0, 8.0, 26.0]
            tolerance_in = 1.0
            open_carriage_on_release = true

            [auto_drive]
            heights_in = [32.0, 18.0, 38.0]
            tolerance_in = 0.1
            open_carriage_on_release = false
        "#).unwrap();

        assert_eq!(p.profile(SeqKind::AutoDrive).heights_in, [32.0, 18.0, 38.0]);
        assert_eq!(p.profile(SeqKind::AutoStack).tolerance_in, 1.0);
    }

    #[test]
    fn test_height() {
        let p = Params::default();

        assert_eq!(p.ticks_to_height_in(0), 8.0);
        assert_eq!(p.ticks_to_height_in(3072), 20.0);
        assert_eq!(p.ticks_to_height_in(128), 8.5);
        assert_eq!(p.ticks_to_height_in(-256), 7.0);
    }

    #[test]
    fn test_stage_table() {
        let p = Params::default();
        let table = p.auto_drive.stage_table(p.pause_s);

        assert_eq!(table.len(), 5);
        assert_eq!(table[1], Stage::Actuate { carriage: SolenoidDem::Reverse });
        assert_eq!(table[3], Stage::ActuateDwell {
            carriage: SolenoidDem::Forward,
            dwell_s: 0.5,
            open_carriage: false,
        });
        assert_eq!(table[4], Stage::Track {
            target_in: 38.0,
            tolerance_in: 0.1,
            zero_on_arrival: false,
        });
    }
}

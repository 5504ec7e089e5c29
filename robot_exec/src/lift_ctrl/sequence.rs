//! Automated stacking sequences
//!
//! A sequence is a fixed table of stages, walked one stage at a time by
//! `LiftCtrl::proc_sequence`. The position within the table is carried inside
//! the `LiftMode` variant so that leaving the automated mode discards it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, warn};
use serde::Serialize;

use super::{LiftCtrl, LiftMode};
use crate::eqpt::SolenoidDem;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Position within a sequence's stage table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SeqProgress {
    /// Index of the active stage
    pub stage: usize,

    /// Time at which the active dwell stage was entered, if the active stage
    /// is a dwell and it has been entered.
    ///
    /// Units: milliseconds
    pub dwell_start_ms: Option<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The available automated sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeqKind {
    /// Stack and finish at the stacking height
    AutoStack,
    /// Stack and finish at the driving height
    AutoDrive,
}

/// A single step of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Stage {
    /// Drive the lift to `target_in` with the height controller, advancing
    /// once within `tolerance_in`.
    Track {
        target_in: f64,
        tolerance_in: f64,

        /// Send zero power on the cycle the target is reached.
        zero_on_arrival: bool,
    },

    /// Demand a carriage position and advance on the same cycle.
    Actuate {
        carriage: SolenoidDem,
    },

    /// Demand a carriage position, then hold the lift unpowered for
    /// `dwell_s` before advancing.
    ActuateDwell {
        carriage: SolenoidDem,
        dwell_s: f64,

        /// Set the manual carriage-open flag once the dwell completes.
        open_carriage: bool,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SeqProgress {
    /// Progress pointing at the start of the given stage.
    pub fn at(stage: usize) -> Self {
        Self {
            stage,
            dwell_start_ms: None,
        }
    }
}

impl SeqKind {
    /// The lift mode running this sequence at the given progress.
    pub fn mode(self, progress: SeqProgress) -> LiftMode {
        match self {
            SeqKind::AutoStack => LiftMode::AutoStack(progress),
            SeqKind::AutoDrive => LiftMode::AutoDrive(progress),
        }
    }
}

impl LiftCtrl {

    /// Process one cycle of an automated sequence, returning the unscaled lift
    /// power.
    ///
    /// Leaves `self.mode` either at the updated progress or in Manual if the
    /// sequence has completed.
    pub(crate) fn proc_sequence(
        &mut self, 
        kind: SeqKind, 
        mut progress: SeqProgress, 
        now_ms: f64
    ) -> f64 {
        let table = self.params.profile(kind).stage_table(self.params.pause_s);
        let mut power = 0.0;

        let stage = match table.get(progress.stage) {
            Some(s) => *s,
            None => {
                warn!(
                    "{:?} stage {} is outside the sequence, returning to manual", 
                    kind, progress.stage
                );
                self.manual();
                return power;
            }
        };

        let mut advance = false;

        match stage {
            Stage::Track { target_in, tolerance_in, zero_on_arrival } => {
                power = self.pid
                    .set_desired(target_in)
                    .calculate_at(self.height_in, now_ms);

                if (self.height_in - target_in).abs() < tolerance_in {
                    self.report.on_target = true;
                    advance = true;

                    if zero_on_arrival {
                        power = 0.0;
                    }
                }
            },
            Stage::Actuate { carriage } => {
                self.output.carriage = Some(carriage);
                advance = true;
            },
            Stage::ActuateDwell { carriage, dwell_s, open_carriage } => {
                let start_ms = match progress.dwell_start_ms {
                    Some(t) => t,
                    None => {
                        self.output.carriage = Some(carriage);
                        progress.dwell_start_ms = Some(now_ms);
                        now_ms
                    }
                };

                if now_ms - start_ms >= dwell_s * 1000.0 {
                    if open_carriage {
                        self.carriage_open = true;
                    }
                    advance = true;
                }
            }
        }

        if !advance {
            self.mode = kind.mode(progress);
        }
        else if progress.stage + 1 >= table.len() {
            debug!("{:?} complete", kind);
            self.manual();
        }
        else {
            debug!("{:?} stage {} -> {}", kind, progress.stage, progress.stage + 1);
            self.pid.reset();
            self.mode = kind.mode(SeqProgress::at(progress.stage + 1));
        }

        power
    }
}

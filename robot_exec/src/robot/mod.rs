//! # Robot
//!
//! The robot aggregates the drive, lift and intake control modules, tracks
//! which phase of the match the robot is in, and maps operator commands onto
//! the modules. Modules are only processed during the teleoperated phase, in
//! every other phase all demands are zero.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd_processor;
mod op_cmd;
mod tm;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::fmt;
use log::info;
use serde::Serialize;

// Internal
pub use op_cmd::*;
pub use tm::*;

use crate::{
    drive_ctrl::{self, DriveCtrl, StickVector, WheelDems},
    eqpt::ImuSensor,
    intake_ctrl::{self, IntakeCtrl},
    lift_ctrl::{self, LiftCtrl},
};
use util::{
    archive::{Archived, Archiver, ArchiveError},
    module::State,
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The whole robot.
///
/// Modules are public so that the executable can initialise them from their
/// parameter files.
#[derive(Default)]
pub struct Robot {
    pub drive_ctrl: DriveCtrl,
    pub lift_ctrl: LiftCtrl,
    pub intake_ctrl: IntakeCtrl,

    /// Latest operator stick positions
    pub sticks: Sticks,

    pub(crate) phase: RobotPhase,

    /// Intake toggles, at most one is set
    pub(crate) in_toggle: bool,
    pub(crate) out_toggle: bool,

    pub(crate) output: RobotOutput,
    pub(crate) drive_rpt: drive_ctrl::StatusReport,
    pub(crate) lift_rpt: lift_ctrl::StatusReport,

    /// Telemetry archive, one record per cycle
    pub(crate) tm_archiver: Archiver,
}

/// Positions of the operator's sticks.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Sticks {
    /// Drive translation
    pub left: StickVector,

    /// Drive rotation
    pub right: StickVector,

    /// Lift, only `y` and the throttle are used
    pub artic: StickVector,
}

/// Sensor data for one cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobotInput {
    /// Units: degrees
    pub heading_deg: f64,

    /// Raw lift encoder count
    pub raw_ticks: i64,

    /// Units: milliseconds
    pub time_ms: f64,
}

/// All actuator demands for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RobotOutput {
    pub wheels: WheelDems,
    pub lift: lift_ctrl::OutputData,
    pub intake: intake_ctrl::OutputData,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Phase of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RobotPhase {
    Initialising,
    Disabled,
    Autonomous,
    Teleop,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RobotPhase {
    fn default() -> Self {
        RobotPhase::Initialising
    }
}

impl fmt::Display for RobotPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotPhase::Initialising => write!(f, "Initializing"),
            RobotPhase::Disabled => write!(f, "Disabled"),
            RobotPhase::Autonomous => write!(f, "Autonomous Mode"),
            RobotPhase::Teleop => write!(f, "Teleoperated Mode"),
        }
    }
}

impl Archived for Robot {
    fn write(&mut self) -> Result<(), ArchiveError> {
        let tm = self.tm();
        self.tm_archiver.serialise(tm)
    }
}

impl Robot {

    /// Start archiving telemetry into the session's `robot_tm.csv`.
    pub fn init_archive(&mut self, session: &Session) -> Result<(), ArchiveError> {
        self.tm_archiver = Archiver::from_path(session, "robot_tm.csv")?;
        Ok(())
    }

    pub fn phase(&self) -> RobotPhase {
        self.phase
    }

    /// Demands from the last call to `proc`.
    pub fn output(&self) -> RobotOutput {
        self.output
    }

    // ---- LIFECYCLE ----

    /// Enter the disabled phase, zeroing the drive heading. The robot should
    /// be facing field-forward.
    pub fn disabled_init(&mut self, imu: &mut dyn ImuSensor) {
        self.drive_ctrl.calibrate(imu);
        self.set_phase(RobotPhase::Disabled);
    }

    pub fn autonomous_init(&mut self) {
        self.set_phase(RobotPhase::Autonomous);
    }

    pub fn teleop_init(&mut self) {
        self.set_phase(RobotPhase::Teleop);
    }

    // ---- INTAKE ----

    /// Start intaking, or idle the intake if it was already toggled on.
    pub fn intake_toggle(&mut self) {
        if self.in_toggle {
            self.intake_ctrl.idle();
            self.in_toggle = false;
        }
        else {
            self.intake_ctrl.intake();
            self.out_toggle = false;
            self.in_toggle = true;
        }
    }

    /// Start outaking, or idle the intake if it was already toggled on.
    pub fn outake_toggle(&mut self) {
        if self.out_toggle {
            self.intake_ctrl.idle();
            self.out_toggle = false;
        }
        else {
            self.intake_ctrl.outake();
            self.in_toggle = false;
            self.out_toggle = true;
        }
    }

    // ---- ARTICULATION ----

    pub fn enable_artic(&mut self) {
        self.lift_ctrl.enable();
        self.intake_ctrl.enable();
    }

    pub fn disable_artic(&mut self) {
        self.lift_ctrl.disable();
        self.intake_ctrl.disable();
    }

    // ---- PROCESSING ----

    /// Process all modules once.
    pub fn proc(&mut self, input: &RobotInput) -> RobotOutput {
        if self.phase != RobotPhase::Teleop {
            self.output = RobotOutput::default();
            return self.output;
        }

        let drive_input = drive_ctrl::InputData {
            left: self.sticks.left,
            right: self.sticks.right,
            heading_deg: input.heading_deg,
        };
        let (wheels, drive_rpt) = self.drive_ctrl
            .proc(&drive_input)
            .unwrap_or_else(|e| match e {});

        let lift_input = lift_ctrl::InputData {
            raw_ticks: input.raw_ticks,
            stick_y: self.sticks.artic.y,
            throttle: self.sticks.artic.throttle,
            time_ms: input.time_ms,
        };
        let (lift, lift_rpt) = self.lift_ctrl
            .proc(&lift_input)
            .unwrap_or_else(|e| match e {});

        let (intake, _) = self.intake_ctrl
            .proc(&())
            .unwrap_or_else(|e| match e {});

        self.drive_rpt = drive_rpt;
        self.lift_rpt = lift_rpt;
        self.output = RobotOutput { wheels, lift, intake };

        self.output
    }

    fn set_phase(&mut self, phase: RobotPhase) {
        if self.phase != phase {
            info!("Robot phase {} -> {}", self.phase, phase);
        }
        self.phase = phase;
    }
}

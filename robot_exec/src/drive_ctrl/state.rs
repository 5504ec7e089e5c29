//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::{convert::Infallible, fmt};
use log::{info, trace};
use nalgebra::Vector4;
use serde::Serialize;

// Internal
use super::{Drivebase, Params, StickVector, NUM_WHEELS};
use crate::eqpt::ImuSensor;
use util::{
    params, 
    module::State,
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state
#[derive(Default)]
pub struct DriveCtrl {

    pub(crate) params: Params,

    pub(crate) mode: DriveMode,

    pub(crate) drivebase: Drivebase,

    pub(crate) report: StatusReport,

    pub(crate) output: Option<WheelDems>,
}

/// Input data to Drive Control.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputData {
    /// Translation stick
    pub left: StickVector,

    /// Rotation stick, only the x axis is used
    pub right: StickVector,

    /// Current robot heading.
    ///
    /// Units: degrees
    pub heading_deg: f64,
}

/// Power demands for each wheel of the drivebase.
///
/// Units: normalised power, in [-1, 1] once passed through the drivebase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WheelDems {
    pub front_left: f64,
    pub front_right: f64,
    pub back_left: f64,
    pub back_right: f64,
}

/// Status report for DriveCtrl processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// Wheel demands as calculated, before the drivebase limits them.
    pub raw_dems: WheelDems,

    /// True if the group of demands had to be scaled down to keep all wheels
    /// within unit power.
    pub group_scaled: bool,

    /// Wheels whose demands were clamped by the drivebase.
    pub wheel_limited: [bool; NUM_WHEELS],
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reference frame in which the operator's sticks are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriveMode {
    /// Drive is disabled, all wheels stopped.
    Off,
    /// Forward on the stick is the chassis' forward direction.
    RobotCentric,
    /// Forward on the stick is a fixed direction on the field, compensated by
    /// the robot's heading.
    FieldCentric,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for DriveMode {
    fn default() -> Self {
        DriveMode::FieldCentric
    }
}

impl fmt::Display for DriveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveMode::Off => write!(f, "Off"),
            DriveMode::RobotCentric => write!(f, "Robot Centric Mode"),
            DriveMode::FieldCentric => write!(f, "Field Centric Mode"),
        }
    }
}

impl WheelDems {
    pub fn from_array(a: [f64; NUM_WHEELS]) -> Self {
        Self {
            front_left: a[0],
            front_right: a[1],
            back_left: a[2],
            back_right: a[3],
        }
    }

    pub fn to_array(&self) -> [f64; NUM_WHEELS] {
        [self.front_left, self.front_right, self.back_left, self.back_right]
    }

    pub(crate) fn from_vector(v: Vector4<f64>) -> Self {
        Self::from_array([v[0], v[1], v[2], v[3]])
    }

    pub(crate) fn to_vector(&self) -> Vector4<f64> {
        Vector4::new(self.front_left, self.front_right, self.back_left, self.back_right)
    }
}

impl State for DriveCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;
    
    type InputData = InputData;
    type OutputData = WheelDems;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) 
        -> Result<(), Self::InitError> 
    {
        self.params = params::load(init_data)?;
        self.enable();

        Ok(())
    }

    /// Perform cyclic processing of Drive Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        // Clear the status report
        self.report = StatusReport::default();

        let raw = match self.mode {
            DriveMode::Off => WheelDems::default(),
            DriveMode::RobotCentric => self.calc_robot_centric(input_data),
            DriveMode::FieldCentric => self.calc_field_centric(input_data),
        };
        self.report.raw_dems = raw;

        // Pass through the drivebase which enforces the motor limits
        let (output, limited) = self.drivebase.drive(&raw);
        self.report.wheel_limited = limited;

        trace!("DriveCtrl {} output: {:?}", self.mode, output.to_array());

        self.output = Some(output);

        Ok((output, self.report))
    }
}

impl DriveCtrl {

    /// Create a new DriveCtrl with the given parameters, in field-centric
    /// mode.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// The currently active mode.
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// The output from the last processing cycle, if any.
    pub fn output(&self) -> Option<WheelDems> {
        self.output
    }

    /// Stop driving and disable the drivebase.
    pub fn disable(&mut self) {
        self.set_mode(DriveMode::Off);
        self.drivebase.disable();
    }

    /// Enable driving in the default field-centric mode.
    pub fn enable(&mut self) {
        self.field_centric();
    }

    /// Drive in the robot-centric frame.
    pub fn robot_centric(&mut self) {
        self.set_mode(DriveMode::RobotCentric);
        self.drivebase.enable();
    }

    /// Drive in the field-centric frame.
    pub fn field_centric(&mut self) {
        self.set_mode(DriveMode::FieldCentric);
        self.drivebase.enable();
    }

    /// Switch between the robot- and field-centric frames. Does nothing when
    /// the drive is off.
    pub fn toggle_mode(&mut self) {
        match self.mode {
            DriveMode::FieldCentric => self.robot_centric(),
            DriveMode::RobotCentric => self.field_centric(),
            DriveMode::Off => (),
        }
    }

    /// Zero the heading source so that the robot's current heading becomes
    /// field-forward.
    pub fn calibrate(&self, imu: &mut dyn ImuSensor) {
        info!("Zeroing drive heading (was {:.2} deg)", imu.yaw_deg());
        imu.zero_yaw();
    }

    fn set_mode(&mut self, mode: DriveMode) {
        if self.mode != mode {
            info!("DriveCtrl mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn proc(dc: &mut DriveCtrl, left: StickVector, right: StickVector, heading_deg: f64) 
        -> WheelDems 
    {
        let input = InputData { left, right, heading_deg };
        dc.proc(&input).unwrap().0
    }

    fn assert_dems(dems: WheelDems, expected: [f64; NUM_WHEELS]) {
        for (a, e) in dems.to_array().iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-9, "got {:?}, expected {:?}", dems.to_array(), expected);
        }
    }

    #[test]
    fn test_off_is_zero() {
        let mut dc = DriveCtrl::new(Params::default());
        dc.disable();

        for &(x, y, r, h) in [(0.0, 1.0, 0.0, 0.0), (1.0, -1.0, 1.0, 45.0), (-0.3, 0.2, -1.0, -170.0)].iter() {
            let out = proc(&mut dc, StickVector::new(x, y, 0.0), StickVector::new(r, 0.0, 0.0), h);
            assert_eq!(out, WheelDems::default());
            assert_eq!(dc.report.raw_dems, WheelDems::default());
        }
    }

    #[test]
    fn test_field_centric_forward() {
        let mut dc = DriveCtrl::new(Params::default());
        assert_eq!(dc.mode(), DriveMode::FieldCentric);

        let out = proc(&mut dc, StickVector::new(0.0, 1.0, 0.0), StickVector::centred(0.0), 0.0);

        // Straight forward: equal magnitudes, right side motors mirrored
        assert_dems(out, [1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_field_centric_heading_compensation() {
        let mut dc = DriveCtrl::new(Params::default());

        // Robot turned 90 deg clockwise, pushing the stick field-forward must
        // strafe the robot to its own left
        let field = proc(&mut dc, StickVector::new(0.0, 1.0, 0.0), StickVector::centred(0.0), 90.0);

        dc.robot_centric();
        let robot = proc(&mut dc, StickVector::new(-1.0, 0.0, 0.0), StickVector::centred(0.0), 90.0);

        assert_dems(field, robot.to_array());
        assert_dems(field, [-1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_field_centric_group_scaling() {
        let mut dc = DriveCtrl::new(Params::default());

        // Full forward plus full rotation: raw demands are 1.5 and -0.5, which
        // get scaled together rather than clamped individually
        let out = proc(&mut dc, StickVector::new(0.0, 1.0, 0.0), StickVector::new(1.0, 0.0, 0.0), 0.0);

        assert_dems(out, [1.0, -1.0 / 3.0, 1.0, -1.0 / 3.0]);
        assert!(dc.report.group_scaled);
        assert_eq!(dc.report.wheel_limited, [false; NUM_WHEELS]);
    }

    #[test]
    fn test_field_centric_partial_deflection() {
        let mut dc = DriveCtrl::new(Params::default());

        // Half deflection forward gives a quarter power (squared response)
        let out = proc(&mut dc, StickVector::new(0.0, 0.5, 0.0), StickVector::centred(0.0), 0.0);
        assert_dems(out, [0.25, -0.25, 0.25, -0.25]);

        // Centred sticks give no motion whatever the heading
        let out = proc(&mut dc, StickVector::centred(0.0), StickVector::centred(0.0), 123.0);
        assert_dems(out, [0.0; NUM_WHEELS]);
    }

    #[test]
    fn test_robot_centric_spin() {
        let mut dc = DriveCtrl::new(Params::default());
        dc.robot_centric();

        let out = proc(&mut dc, StickVector::centred(0.0), StickVector::new(1.0, 0.0, 0.0), 0.0);

        assert_dems(out, [0.5; NUM_WHEELS]);
    }

    #[test]
    fn test_robot_centric_saturation() {
        let mut dc = DriveCtrl::new(Params::default());
        dc.robot_centric();

        // Without group normalisation the drivebase clamps each wheel
        let out = proc(&mut dc, StickVector::new(0.0, 1.0, 0.0), StickVector::new(1.0, 0.0, 0.0), 0.0);
        assert_dems(dc.report.raw_dems, [1.5, -0.5, 1.5, -0.5]);
        assert_dems(out, [1.0, -0.5, 1.0, -0.5]);
        assert_eq!(dc.report.wheel_limited, [true, false, true, false]);

        // With it the ratios are preserved
        let mut dc = DriveCtrl::new(Params {
            normalise_robot_centric: true,
            ..Default::default()
        });
        dc.robot_centric();
        let out = proc(&mut dc, StickVector::new(0.0, 1.0, 0.0), StickVector::new(1.0, 0.0, 0.0), 0.0);
        assert_dems(out, [1.0, -1.0 / 3.0, 1.0, -1.0 / 3.0]);
        assert!(dc.report.group_scaled);
    }

    #[test]
    fn test_mode_changes() {
        let mut dc = DriveCtrl::new(Params::default());

        dc.toggle_mode();
        assert_eq!(dc.mode(), DriveMode::RobotCentric);
        dc.toggle_mode();
        assert_eq!(dc.mode(), DriveMode::FieldCentric);

        dc.disable();
        dc.toggle_mode();
        assert_eq!(dc.mode(), DriveMode::Off);
        assert!(!dc.drivebase.is_enabled());

        dc.enable();
        assert_eq!(dc.mode(), DriveMode::FieldCentric);
        assert!(dc.drivebase.is_enabled());
    }
}

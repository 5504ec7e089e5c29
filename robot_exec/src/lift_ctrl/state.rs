//! Implementations for the LiftCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::{convert::Infallible, fmt, mem};
use log::{info, trace};
use serde::Serialize;

// Internal
use super::{Params, SeqKind, SeqProgress};
use crate::{
    eqpt::{LiftEncoder, SolenoidDem},
    pid::PidController
};
use util::{
    maths::{clamp, lin_map},
    params, 
    module::State,
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Lift control module state
pub struct LiftCtrl {

    pub(crate) params: Params,

    pub(crate) mode: LiftMode,

    /// Height controller, shared between the automated and command modes.
    pub(crate) pid: PidController,

    /// Lift height computed on the last cycle.
    ///
    /// Units: inches
    pub(crate) height_in: f64,

    /// Carriage position requested in manual mode.
    pub(crate) carriage_open: bool,

    /// Claw position requested in manual mode.
    pub(crate) claw_open: bool,

    pub(crate) report: StatusReport,

    pub(crate) output: OutputData,
}

/// Input data to Lift Control.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputData {
    /// Raw lift encoder count
    pub raw_ticks: i64,

    /// Operator's lift stick, in [-1, 1]
    pub stick_y: f64,

    /// Operator's throttle, in [-1, 1]
    pub throttle: f64,

    /// Time of this cycle.
    ///
    /// Units: milliseconds
    pub time_ms: f64,
}

/// Output demands from Lift Control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutputData {
    /// Lift motor power, in [-1, 1]
    pub lift_power: f64,

    /// Carriage solenoid demand, `None` if the solenoid should be left as is
    pub carriage: Option<SolenoidDem>,

    /// Claw solenoid demand, `None` if the solenoid should be left as is
    pub claw: Option<SolenoidDem>,
}

/// Status report for LiftCtrl processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// Lift height this cycle.
    ///
    /// Units: inches
    pub height_in: f64,

    /// Power before the throttle gain and limits were applied
    pub raw_power: f64,

    /// True if the raw power was outside [-1, 1]
    pub power_limited: bool,

    /// True if the active height target was reached this cycle
    pub on_target: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Lift control modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LiftMode {
    /// No power and no solenoid demands.
    Off,
    /// Operator control through the stick and open/close requests.
    Manual,
    /// Running the stacking sequence.
    AutoStack(SeqProgress),
    /// Running the stacking sequence ending at the driving height.
    AutoDrive(SeqProgress),
    /// Holding a commanded height.
    Command {
        target_in: f64
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl fmt::Display for LiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiftMode::Off => write!(f, "Off"),
            LiftMode::Manual => write!(f, "Manual Mode"),
            LiftMode::AutoStack(_) | LiftMode::AutoDrive(_) => write!(f, "Automatic Mode"),
            LiftMode::Command { .. } => write!(f, "Command Mode"),
        }
    }
}

impl LiftMode {
    /// Index of the active sequence stage, `None` when no sequence is running.
    pub fn stage_index(&self) -> Option<usize> {
        match self {
            LiftMode::AutoStack(p) | LiftMode::AutoDrive(p) => Some(p.stage),
            _ => None,
        }
    }
}

impl Default for LiftCtrl {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl State for LiftCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;
    
    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the LiftCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) 
        -> Result<(), Self::InitError> 
    {
        *self = Self::new(params::load(init_data)?);

        Ok(())
    }

    /// Perform cyclic processing of Lift Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        self.report = StatusReport::default();
        self.output = OutputData::default();

        self.height_in = self.params.ticks_to_height_in(input_data.raw_ticks);
        self.report.height_in = self.height_in;

        let power = match self.mode {
            LiftMode::Off => 0.0,
            LiftMode::Manual => input_data.stick_y,
            LiftMode::AutoStack(p) => 
                self.proc_sequence(SeqKind::AutoStack, p, input_data.time_ms),
            LiftMode::AutoDrive(p) => 
                self.proc_sequence(SeqKind::AutoDrive, p, input_data.time_ms),
            LiftMode::Command { target_in } => 
                self.proc_command(target_in, input_data.time_ms),
        };

        // Manual solenoid demands are sent every cycle, including the cycle
        // an automated sequence hands back to manual
        if self.mode == LiftMode::Manual {
            self.output.carriage = Some(SolenoidDem::from_extended(self.carriage_open));
            self.output.claw = Some(SolenoidDem::from_extended(self.claw_open));
        }

        self.report.raw_power = power;
        self.report.power_limited = power.abs() > 1.0;

        let throttle_gain = clamp(
            &lin_map((-1.0, 1.0), (0.0, 1.0), input_data.throttle), 
            &0.0, 
            &1.0
        );

        self.output.lift_power = match self.mode {
            LiftMode::Off => 0.0,
            _ => throttle_gain * clamp(&power, &-1.0, &1.0)
        };

        trace!("LiftCtrl {} output: {:?}", self.mode, self.output);

        Ok((self.output, self.report))
    }
}

impl LiftCtrl {

    /// Create a new LiftCtrl with the given parameters, in manual mode with
    /// the carriage open and the claw closed.
    pub fn new(params: Params) -> Self {
        Self {
            pid: PidController::new(params.k_p, params.k_i, params.k_d),
            params,
            mode: LiftMode::Manual,
            height_in: 0.0,
            carriage_open: true,
            claw_open: false,
            report: StatusReport::default(),
            output: OutputData::default(),
        }
    }

    /// The currently active mode.
    pub fn mode(&self) -> LiftMode {
        self.mode
    }

    /// Height of the lift on the last cycle.
    ///
    /// Units: inches
    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    /// Read-only access to the height controller.
    pub fn pid(&self) -> &PidController {
        &self.pid
    }

    pub fn disable(&mut self) {
        self.set_mode(LiftMode::Off);
    }

    pub fn enable(&mut self) {
        self.set_mode(LiftMode::Manual);
    }

    pub fn manual(&mut self) {
        self.set_mode(LiftMode::Manual);
    }

    /// Start the stacking sequence from its first stage.
    pub fn stack_to_stack(&mut self) {
        self.set_mode(SeqKind::AutoStack.mode(SeqProgress::at(0)));
    }

    /// Start the stacking sequence which finishes at the driving height.
    pub fn stack_to_stack_2(&mut self) {
        self.set_mode(SeqKind::AutoDrive.mode(SeqProgress::at(0)));
    }

    /// Hold the lift at the given height.
    ///
    /// Units: inches
    pub fn command(&mut self, target_in: f64) {
        self.set_mode(LiftMode::Command { target_in });
        self.pid.set_desired(target_in);
    }

    pub fn open(&mut self) {
        self.carriage_open = true;
    }

    pub fn close(&mut self) {
        self.carriage_open = false;
    }

    pub fn open_claw(&mut self) {
        self.claw_open = true;
    }

    pub fn close_claw(&mut self) {
        self.claw_open = false;
    }

    pub fn carriage_open(&self) -> bool {
        self.carriage_open
    }

    pub fn claw_open(&self) -> bool {
        self.claw_open
    }

    /// Make the lift's current position the encoder zero.
    pub fn calibrate(&self, encoder: &mut dyn LiftEncoder) {
        info!("Zeroing lift encoder (was {} ticks)", encoder.raw_ticks());
        encoder.reset();
    }

    fn proc_command(&mut self, target_in: f64, now_ms: f64) -> f64 {
        let power = self.pid
            .set_desired(target_in)
            .calculate_at(self.height_in, now_ms);

        if (self.height_in - target_in).abs() < self.params.command_tolerance_in {
            self.report.on_target = true;
            self.pid.reset();
        }

        power
    }

    /// Change mode, resetting the height controller. Entering the mode that
    /// is already active restarts it.
    fn set_mode(&mut self, mode: LiftMode) {
        if mem::discriminant(&self.mode) != mem::discriminant(&mode) {
            info!("LiftCtrl mode {} -> {}", self.mode, mode);
        }
        self.pid.reset();
        self.mode = mode;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Raw ticks for a given height under the default parameters
    fn ticks(height_in: f64) -> i64 {
        ((height_in - 8.0) * 256.0).round() as i64
    }

    fn proc(lc: &mut LiftCtrl, height_in: f64, time_ms: f64) -> OutputData {
        let input = InputData {
            raw_ticks: ticks(height_in),
            stick_y: 0.0,
            throttle: 1.0,
            time_ms,
        };
        lc.proc(&input).unwrap().0
    }

    #[test]
    fn test_initial_state() {
        let lc = LiftCtrl::default();

        assert_eq!(lc.mode(), LiftMode::Manual);
        assert_eq!(lc.mode().stage_index(), None);
        assert!(lc.carriage_open());
        assert!(!lc.claw_open());
    }

    #[test]
    fn test_auto_stack() {
        let mut lc = LiftCtrl::default();
        lc.close();
        lc.stack_to_stack();
        assert_eq!(lc.mode().stage_index(), Some(0));
        assert_eq!(lc.mode().to_string(), "Automatic Mode");

        // Rising toward the pick-up height
        let out = proc(&mut lc, 15.0, 0.0);
        assert!(out.lift_power != 0.0);
        assert_eq!(out.carriage, None);
        assert_eq!(lc.mode().stage_index(), Some(0));

        // Arrival, still driven by the controller
        let out = proc(&mut lc, 19.5, 20.0);
        assert!(out.lift_power != 0.0);
        assert_eq!(lc.mode().stage_index(), Some(1));

        // Carriage released with exactly zero power
        let out = proc(&mut lc, 19.5, 40.0);
        assert_eq!(out.lift_power, 0.0);
        assert_eq!(out.carriage, Some(SolenoidDem::Reverse));
        assert_eq!(lc.mode().stage_index(), Some(2));

        // Lowering toward the set-down height
        let out = proc(&mut lc, 19.5, 60.0);
        assert!(out.lift_power != 0.0);
        assert_eq!(out.carriage, None);
        assert_eq!(lc.pid().desired(), 8.0);

        // Arrival at the set-down height is unpowered
        let out = proc(&mut lc, 8.2, 80.0);
        assert_eq!(out.lift_power, 0.0);
        assert_eq!(lc.mode().stage_index(), Some(3));

        // Dwell: carriage demanded once on entry, lift unpowered throughout
        let out = proc(&mut lc, 8.2, 100.0);
        assert_eq!(out.lift_power, 0.0);
        assert_eq!(out.carriage, Some(SolenoidDem::Forward));
        assert_eq!(lc.mode().stage_index(), Some(3));

        let out = proc(&mut lc, 8.2, 350.0);
        assert_eq!(out.lift_power, 0.0);
        assert_eq!(out.carriage, None);
        assert_eq!(lc.mode().stage_index(), Some(3));
        assert!(!lc.carriage_open());

        let out = proc(&mut lc, 8.2, 600.0);
        assert_eq!(out.lift_power, 0.0);
        assert_eq!(lc.mode().stage_index(), Some(4));
        assert!(lc.carriage_open());

        // Rise to the final height, then hand back to manual
        let out = proc(&mut lc, 20.0, 620.0);
        assert!(out.lift_power != 0.0);
        assert_eq!(lc.mode().stage_index(), Some(4));

        proc(&mut lc, 25.5, 640.0);
        assert_eq!(lc.mode(), LiftMode::Manual);
        assert_eq!(lc.mode().stage_index(), None);
        assert_eq!(lc.pid().integral(), 0.0);

        let out = proc(&mut lc, 25.5, 660.0);
        assert_eq!(out.lift_power, 0.0);
        assert_eq!(out.carriage, Some(SolenoidDem::Forward));
        assert_eq!(out.claw, Some(SolenoidDem::Reverse));
    }

    #[test]
    fn test_auto_drive() {
        let mut lc = LiftCtrl::default();
        lc.close();
        lc.stack_to_stack_2();

        // Tighter tolerance than the stacking sequence
        proc(&mut lc, 31.8, 0.0);
        assert_eq!(lc.mode().stage_index(), Some(0));
        proc(&mut lc, 31.95, 20.0);
        assert_eq!(lc.mode().stage_index(), Some(1));

        proc(&mut lc, 31.95, 40.0);
        proc(&mut lc, 18.05, 60.0);
        assert_eq!(lc.mode().stage_index(), Some(3));

        proc(&mut lc, 18.05, 80.0);
        proc(&mut lc, 18.05, 580.0);
        assert_eq!(lc.mode().stage_index(), Some(4));
        assert_eq!(lc.pid().desired(), 18.0);

        proc(&mut lc, 30.0, 600.0);
        assert_eq!(lc.pid().desired(), 38.0);
        proc(&mut lc, 38.0, 620.0);
        assert_eq!(lc.mode(), LiftMode::Manual);

        // The carriage is left closed for manual
        let out = proc(&mut lc, 38.0, 640.0);
        assert_eq!(out.carriage, Some(SolenoidDem::Reverse));
    }

    #[test]
    fn test_stage_outside_table() {
        let mut lc = LiftCtrl::default();
        lc.mode = LiftMode::AutoStack(SeqProgress::at(7));

        let out = proc(&mut lc, 10.0, 0.0);
        assert_eq!(lc.mode(), LiftMode::Manual);
        assert_eq!(out.lift_power, 0.0);
    }

    #[test]
    fn test_abandon_sequence() {
        let mut lc = LiftCtrl::default();
        lc.stack_to_stack();
        proc(&mut lc, 19.5, 0.0);
        proc(&mut lc, 19.5, 20.0);
        assert_eq!(lc.mode().stage_index(), Some(2));

        lc.manual();
        assert_eq!(lc.mode().stage_index(), None);

        // Restarting begins at the first stage
        lc.stack_to_stack();
        assert_eq!(lc.mode().stage_index(), Some(0));
    }

    #[test]
    fn test_command() {
        let mut lc = LiftCtrl::default();
        lc.command(30.0);
        assert_eq!(lc.mode(), LiftMode::Command { target_in: 30.0 });
        assert_eq!(lc.mode().to_string(), "Command Mode");

        for i in 0..5 {
            let out = proc(&mut lc, 25.0, i as f64 * 20.0);
            assert!(out.lift_power != 0.0);
        }
        assert!(lc.pid().integral() != 0.0);

        proc(&mut lc, 30.0, 100.0);
        assert_eq!(lc.pid().error(), 0.0);
        assert_eq!(lc.pid().integral(), 0.0);
        assert_eq!(lc.mode(), LiftMode::Command { target_in: 30.0 });
        assert_eq!(lc.pid().desired(), 30.0);
    }

    #[test]
    fn test_manual() {
        let mut lc = LiftCtrl::default();
        lc.open_claw();
        lc.close();

        let input = InputData {
            raw_ticks: 0,
            stick_y: 0.8,
            throttle: 0.0,
            time_ms: 0.0,
        };
        let (out, report) = lc.proc(&input).unwrap();

        // Half throttle gain
        assert!((out.lift_power - 0.4).abs() < 1e-12);
        assert_eq!(out.carriage, Some(SolenoidDem::Reverse));
        assert_eq!(out.claw, Some(SolenoidDem::Forward));
        assert_eq!(report.height_in, 8.0);

        // Full throttle, limited stick
        let input = InputData { stick_y: -1.5, throttle: 1.0, ..input };
        let (out, report) = lc.proc(&input).unwrap();
        assert_eq!(out.lift_power, -1.0);
        assert!(report.power_limited);
    }

    #[test]
    fn test_off() {
        let mut lc = LiftCtrl::default();
        lc.disable();
        assert_eq!(lc.mode().to_string(), "Off");

        let input = InputData {
            raw_ticks: 512,
            stick_y: 1.0,
            throttle: 1.0,
            time_ms: 0.0,
        };
        let (out, report) = lc.proc(&input).unwrap();

        assert_eq!(out, OutputData::default());
        assert_eq!(report.height_in, 10.0);
        assert_eq!(lc.height_in(), 10.0);
    }
}

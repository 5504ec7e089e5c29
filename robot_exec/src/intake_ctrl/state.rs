//! Implementations for the IntakeCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::{convert::Infallible, fmt};
use log::{info, trace};
use serde::Serialize;

// Internal
use super::Params;
use crate::eqpt::SolenoidDem;
use util::{
    params, 
    module::State,
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Intake control module state
pub struct IntakeCtrl {

    pub(crate) params: Params,

    pub(crate) mode: IntakeMode,

    pub(crate) spin: IntakeSpin,

    /// Requested position of the intake arms
    pub(crate) solenoid_open: bool,
}

/// Output demands from Intake Control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutputData {
    /// Left roller power, in [-1, 1]
    pub left_roller: f64,

    /// Right roller power, in [-1, 1]
    pub right_roller: f64,

    /// Intake arm solenoid demand, `None` if the solenoid should be left as is
    pub solenoid: Option<SolenoidDem>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Intake control modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntakeMode {
    Off,
    On,
}

/// Roller direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntakeSpin {
    /// Pull a tote in
    Intake,
    /// Push a tote out
    Outake,
    /// Rollers stopped
    Idle,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for IntakeCtrl {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl Default for IntakeMode {
    fn default() -> Self {
        IntakeMode::On
    }
}

impl Default for IntakeSpin {
    fn default() -> Self {
        IntakeSpin::Idle
    }
}

impl fmt::Display for IntakeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeMode::Off => write!(f, "Off"),
            IntakeMode::On => write!(f, "On"),
        }
    }
}

impl State for IntakeCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;
    
    type InputData = ();
    type OutputData = OutputData;
    type StatusReport = IntakeSpin;
    type ProcError = Infallible;

    /// Initialise the IntakeCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) 
        -> Result<(), Self::InitError> 
    {
        *self = Self::new(params::load(init_data)?);

        Ok(())
    }

    /// Perform cyclic processing of Intake Control.
    fn proc(&mut self, _input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        let mut output = OutputData::default();

        if self.mode == IntakeMode::On {
            let p = self.params.roller_power;

            let (left, right) = match self.spin {
                IntakeSpin::Intake => (p, -p),
                IntakeSpin::Outake => (-p, p),
                IntakeSpin::Idle => (0.0, 0.0),
            };
            output.left_roller = left;
            output.right_roller = right;

            output.solenoid = Some(SolenoidDem::from_extended(self.solenoid_open));
        }

        trace!("IntakeCtrl {} ({:?}) output: {:?}", self.mode, self.spin, output);

        Ok((output, self.spin))
    }
}

impl IntakeCtrl {

    /// Create a new IntakeCtrl, enabled and idle with the arms open.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            mode: IntakeMode::On,
            spin: IntakeSpin::Idle,
            solenoid_open: true,
        }
    }

    pub fn mode(&self) -> IntakeMode {
        self.mode
    }

    pub fn spin(&self) -> IntakeSpin {
        self.spin
    }

    pub fn is_open(&self) -> bool {
        self.solenoid_open
    }

    pub fn disable(&mut self) {
        self.set_mode(IntakeMode::Off);
    }

    pub fn enable(&mut self) {
        self.set_mode(IntakeMode::On);
    }

    pub fn intake(&mut self) {
        self.spin = IntakeSpin::Intake;
    }

    pub fn outake(&mut self) {
        self.spin = IntakeSpin::Outake;
    }

    pub fn idle(&mut self) {
        self.spin = IntakeSpin::Idle;
    }

    pub fn open(&mut self) {
        self.solenoid_open = true;
    }

    pub fn close(&mut self) {
        self.solenoid_open = false;
    }

    fn set_mode(&mut self, mode: IntakeMode) {
        if self.mode != mode {
            info!("IntakeCtrl mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_spin() {
        let mut ic = IntakeCtrl::new(Params::default());

        let (out, spin) = ic.proc(&()).unwrap();
        assert_eq!(spin, IntakeSpin::Idle);
        assert_eq!(out.left_roller, 0.0);
        assert_eq!(out.right_roller, 0.0);
        assert_eq!(out.solenoid, Some(SolenoidDem::Forward));

        ic.intake();
        let (out, _) = ic.proc(&()).unwrap();
        assert_eq!((out.left_roller, out.right_roller), (0.75, -0.75));

        ic.outake();
        ic.close();
        let (out, _) = ic.proc(&()).unwrap();
        assert_eq!((out.left_roller, out.right_roller), (-0.75, 0.75));
        assert_eq!(out.solenoid, Some(SolenoidDem::Reverse));
    }

    #[test]
    fn test_off() {
        let mut ic = IntakeCtrl::new(Params { roller_power: 0.5 });
        ic.intake();
        ic.disable();
        assert_eq!(ic.mode().to_string(), "Off");

        let (out, spin) = ic.proc(&()).unwrap();
        assert_eq!(out, OutputData::default());
        assert_eq!(spin, IntakeSpin::Intake);

        // Spin selection is remembered while off
        ic.enable();
        let (out, _) = ic.proc(&()).unwrap();
        assert_eq!((out.left_roller, out.right_roller), (0.5, -0.5));
    }
}

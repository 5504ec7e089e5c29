//! # Operator commands
//!
//! Every action the operator can request of the robot. Commands are
//! serialised as JSON objects tagged by their `type`, for example
//!
//! ```text
//! {"type": "command_lift", "height_in": 30.0}
//! {"type": "stick", "stick": "left", "x": 0.0, "y": 1.0, "throttle": 0.0}
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An operator command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpCmd {

    // ---- PHASE ----

    DisabledInit,
    AutonomousInit,
    TeleopInit,

    // ---- DRIVE ----

    /// Switch between robot- and field-centric driving
    ToggleDriveMode,
    EnableDrive,
    DisableDrive,
    RobotCentric,
    FieldCentric,
    /// Make the current heading field-forward
    CalibrateDrive,

    // ---- LIFT ----

    OpenLift,
    CloseLift,
    OpenClaw,
    CloseClaw,
    StackToStack,
    #[serde(rename = "stack_to_stack_2")]
    StackToStack2,
    CommandLift {
        height_in: f64
    },
    ManualLift,
    EnableLift,
    DisableLift,
    /// Make the current lift position the encoder zero
    CalibrateLift,

    // ---- INTAKE ----

    OpenIntake,
    CloseIntake,
    Intake,
    Outake,
    IdleIntake,
    IntakeToggle,
    OutakeToggle,
    EnableIntake,
    DisableIntake,

    // ---- ARTICULATION ----

    /// Return both the lift and intake to their enabled modes
    ArticOverride,
    DisableArtic,

    // ---- STICKS ----

    /// Update the position of one of the operator's sticks
    Stick {
        stick: StickId,
        x: f64,
        y: f64,
        throttle: f64,
    },
}

/// The operator's sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickId {
    /// Drive translation
    Left,
    /// Drive rotation
    Right,
    /// Lift
    Artic,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum OpCmdParseError {
    #[error("Command contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl OpCmd {
    /// Parse a command from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, OpCmdParseError> {
        serde_json::from_str(json_str).map_err(OpCmdParseError::InvalidJson)
    }

    /// True if this command changes the robot's phase.
    pub fn is_phase_change(&self) -> bool {
        matches!(
            self, 
            OpCmd::DisabledInit | OpCmd::AutonomousInit | OpCmd::TeleopInit
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_json() {
        assert_eq!(
            OpCmd::from_json(r#"{"type": "stack_to_stack_2"}"#).unwrap(),
            OpCmd::StackToStack2
        );
        assert_eq!(
            OpCmd::from_json(r#"{"type": "command_lift", "height_in": 30.0}"#).unwrap(),
            OpCmd::CommandLift { height_in: 30.0 }
        );
        assert_eq!(
            OpCmd::from_json(
                r#"{"type": "stick", "stick": "artic", "x": 0.0, "y": -0.5, "throttle": 1.0}"#
            ).unwrap(),
            OpCmd::Stick { stick: StickId::Artic, x: 0.0, y: -0.5, throttle: 1.0 }
        );

        assert!(OpCmd::from_json(r#"{"type": "self_destruct"}"#).is_err());
        assert!(OpCmd::from_json(r#"{"type": "command_lift"}"#).is_err());
    }
}

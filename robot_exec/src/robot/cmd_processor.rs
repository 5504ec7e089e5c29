//! # Command processor
//!
//! Maps operator commands onto the robot and its modules.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use super::{OpCmd, Robot, RobotPhase, StickId};
use crate::{
    drive_ctrl::StickVector,
    eqpt::{ImuSensor, LiftEncoder}
};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Robot {

    /// Execute an operator command.
    ///
    /// Stick updates and phase changes are always accepted, all other
    /// commands are only acted on in the teleoperated phase. The sensors are
    /// needed by the calibration commands.
    pub fn exec(
        &mut self, 
        cmd: &OpCmd, 
        imu: &mut dyn ImuSensor, 
        lift_encoder: &mut dyn LiftEncoder
    ) {
        debug!("Executing {:?}", cmd);

        let always_accepted = cmd.is_phase_change() || matches!(cmd, OpCmd::Stick { .. });

        if self.phase != RobotPhase::Teleop && !always_accepted {
            warn!("{:?} ignored while the robot is in the {} phase", cmd, self.phase);
            return;
        }

        match *cmd {
            OpCmd::DisabledInit => self.disabled_init(imu),
            OpCmd::AutonomousInit => self.autonomous_init(),
            OpCmd::TeleopInit => self.teleop_init(),

            OpCmd::ToggleDriveMode => self.drive_ctrl.toggle_mode(),
            OpCmd::EnableDrive => self.drive_ctrl.enable(),
            OpCmd::DisableDrive => self.drive_ctrl.disable(),
            OpCmd::RobotCentric => self.drive_ctrl.robot_centric(),
            OpCmd::FieldCentric => self.drive_ctrl.field_centric(),
            OpCmd::CalibrateDrive => self.drive_ctrl.calibrate(imu),

            OpCmd::OpenLift => self.lift_ctrl.open(),
            OpCmd::CloseLift => self.lift_ctrl.close(),
            OpCmd::OpenClaw => self.lift_ctrl.open_claw(),
            OpCmd::CloseClaw => self.lift_ctrl.close_claw(),
            OpCmd::StackToStack => self.lift_ctrl.stack_to_stack(),
            OpCmd::StackToStack2 => self.lift_ctrl.stack_to_stack_2(),
            OpCmd::CommandLift { height_in } => self.lift_ctrl.command(height_in),
            OpCmd::ManualLift => self.lift_ctrl.manual(),
            OpCmd::EnableLift => self.lift_ctrl.enable(),
            OpCmd::DisableLift => self.lift_ctrl.disable(),
            OpCmd::CalibrateLift => self.lift_ctrl.calibrate(lift_encoder),

            OpCmd::OpenIntake => self.intake_ctrl.open(),
            OpCmd::CloseIntake => self.intake_ctrl.close(),
            OpCmd::Intake => self.intake_ctrl.intake(),
            OpCmd::Outake => self.intake_ctrl.outake(),
            OpCmd::IdleIntake => self.intake_ctrl.idle(),
            OpCmd::IntakeToggle => self.intake_toggle(),
            OpCmd::OutakeToggle => self.outake_toggle(),
            OpCmd::EnableIntake => self.intake_ctrl.enable(),
            OpCmd::DisableIntake => self.intake_ctrl.disable(),

            OpCmd::ArticOverride => self.enable_artic(),
            OpCmd::DisableArtic => self.disable_artic(),

            OpCmd::Stick { stick, x, y, throttle } => {
                let v = StickVector::new(x, y, throttle);
                match stick {
                    StickId::Left => self.sticks.left = v,
                    StickId::Right => self.sticks.right = v,
                    StickId::Artic => self.sticks.artic = v,
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        drive_ctrl::DriveMode,
        intake_ctrl::IntakeSpin,
        lift_ctrl::LiftMode,
        sim::{SimImu, SimLift, SimParams},
    };
    use util::script_interpreter::ScriptInterpreter;

    struct Eqpt {
        imu: SimImu,
        lift: SimLift,
    }

    impl Eqpt {
        fn new() -> Self {
            let params = SimParams::default();
            Self {
                imu: SimImu::new(&params),
                lift: SimLift::new(&params, 5.0),
            }
        }
    }

    fn exec(robot: &mut Robot, eqpt: &mut Eqpt, json: &str) {
        let cmd = OpCmd::from_json(json).unwrap();
        robot.exec(&cmd, &mut eqpt.imu, &mut eqpt.lift);
    }

    #[test]
    fn test_gating() {
        let mut robot = Robot::default();
        let mut eqpt = Eqpt::new();

        // Ignored before teleop
        exec(&mut robot, &mut eqpt, r#"{"type": "stack_to_stack"}"#);
        assert_eq!(robot.lift_ctrl.mode(), LiftMode::Manual);

        // Sticks are always tracked
        exec(
            &mut robot, 
            &mut eqpt, 
            r#"{"type": "stick", "stick": "right", "x": 0.5, "y": 0.0, "throttle": -1.0}"#
        );
        assert_eq!(robot.sticks.right, StickVector::new(0.5, 0.0, -1.0));

        exec(&mut robot, &mut eqpt, r#"{"type": "teleop_init"}"#);
        exec(&mut robot, &mut eqpt, r#"{"type": "stack_to_stack"}"#);
        assert_eq!(robot.lift_ctrl.mode().stage_index(), Some(0));
    }

    #[test]
    fn test_stack_commands() {
        let mut robot = Robot::default();
        let mut eqpt = Eqpt::new();
        exec(&mut robot, &mut eqpt, r#"{"type": "teleop_init"}"#);

        exec(&mut robot, &mut eqpt, r#"{"type": "stack_to_stack_2"}"#);
        match robot.lift_ctrl.mode() {
            LiftMode::AutoDrive(p) => assert_eq!(p.stage, 0),
            m => panic!("Expected AutoDrive, got {:?}", m),
        }

        exec(&mut robot, &mut eqpt, r#"{"type": "stack_to_stack"}"#);
        match robot.lift_ctrl.mode() {
            LiftMode::AutoStack(p) => assert_eq!(p.stage, 0),
            m => panic!("Expected AutoStack, got {:?}", m),
        }
    }

    #[test]
    fn test_demo_script_loads() {
        let si = ScriptInterpreter::<OpCmd>::from_script(
            include_str!("../../../scripts/stack_demo.txt")
        ).unwrap();

        assert!(si.get_num_cmds() > 0);
    }

    #[test]
    fn test_mapping() {
        let mut robot = Robot::default();
        let mut eqpt = Eqpt::new();
        exec(&mut robot, &mut eqpt, r#"{"type": "teleop_init"}"#);

        exec(&mut robot, &mut eqpt, r#"{"type": "toggle_drive_mode"}"#);
        assert_eq!(robot.drive_ctrl.mode(), DriveMode::RobotCentric);

        exec(&mut robot, &mut eqpt, r#"{"type": "command_lift", "height_in": 30.0}"#);
        assert_eq!(robot.lift_ctrl.mode(), LiftMode::Command { target_in: 30.0 });

        exec(&mut robot, &mut eqpt, r#"{"type": "outake_toggle"}"#);
        assert_eq!(robot.intake_ctrl.spin(), IntakeSpin::Outake);

        exec(&mut robot, &mut eqpt, r#"{"type": "close_intake"}"#);
        assert!(!robot.intake_ctrl.is_open());

        exec(&mut robot, &mut eqpt, r#"{"type": "open_claw"}"#);
        assert!(robot.lift_ctrl.claw_open());

        assert!(eqpt.lift.raw_ticks() > 0);
        exec(&mut robot, &mut eqpt, r#"{"type": "calibrate_lift"}"#);
        assert_eq!(eqpt.lift.raw_ticks(), 0);

        exec(&mut robot, &mut eqpt, r#"{"type": "disable_artic"}"#);
        assert_eq!(robot.lift_ctrl.mode(), LiftMode::Off);
        exec(&mut robot, &mut eqpt, r#"{"type": "artic_override"}"#);
        assert_eq!(robot.lift_ctrl.mode(), LiftMode::Manual);
    }
}

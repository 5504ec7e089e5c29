//! # Robot telemetry
//!
//! A flat snapshot of the robot, polled once per cycle. Flat so that it can
//! be archived as a CSV record as well as serialised to JSON.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::Robot;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Robot telemetry packet.
#[derive(Debug, Clone, Serialize)]
pub struct RobotTm {
    /// Robot phase label
    pub robot: String,

    /// Drive mode label
    pub drive: String,

    /// Lift mode label
    pub lift: String,

    /// Intake mode label
    pub intake: String,

    /// Active lift sequence stage, empty when no sequence is running
    pub lift_stage: Option<usize>,

    pub lift_height_in: f64,
    pub lift_power: f64,
    pub lift_on_target: bool,

    pub carriage_open: bool,
    pub claw_open: bool,

    pub wheel_front_left: f64,
    pub wheel_front_right: f64,
    pub wheel_back_left: f64,
    pub wheel_back_right: f64,
    pub wheels_group_scaled: bool,

    pub intake_left_roller: f64,
    pub intake_right_roller: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Robot {
    /// Build the telemetry packet for the current state.
    pub fn tm(&self) -> RobotTm {
        let lift_mode = self.lift_ctrl.mode();
        let wheels = self.output.wheels;

        RobotTm {
            robot: self.phase.to_string(),
            drive: self.drive_ctrl.mode().to_string(),
            lift: lift_mode.to_string(),
            intake: self.intake_ctrl.mode().to_string(),
            lift_stage: lift_mode.stage_index(),
            lift_height_in: self.lift_ctrl.height_in(),
            lift_power: self.output.lift.lift_power,
            lift_on_target: self.lift_rpt.on_target,
            carriage_open: self.lift_ctrl.carriage_open(),
            claw_open: self.lift_ctrl.claw_open(),
            wheel_front_left: wheels.front_left,
            wheel_front_right: wheels.front_right,
            wheel_back_left: wheels.back_left,
            wheel_back_right: wheels.back_right,
            wheels_group_scaled: self.drive_rpt.group_scaled,
            intake_left_roller: self.output.intake.left_roller,
            intake_right_roller: self.output.intake.right_roller,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        robot::{Robot, RobotInput},
        sim::{SimImu, SimParams},
    };

    #[test]
    fn test_labels() {
        let mut robot = Robot::default();

        let tm = robot.tm();
        assert_eq!(tm.robot, "Initializing");
        assert_eq!(tm.drive, "Field Centric Mode");
        assert_eq!(tm.lift, "Manual Mode");
        assert_eq!(tm.intake, "On");
        assert_eq!(tm.lift_stage, None);

        let mut imu = SimImu::new(&SimParams::default());
        robot.disabled_init(&mut imu);
        robot.teleop_init();
        robot.lift_ctrl.stack_to_stack_2();
        robot.drive_ctrl.robot_centric();
        robot.proc(&RobotInput { heading_deg: 0.0, raw_ticks: 1024, time_ms: 0.0 });

        let tm = robot.tm();
        assert_eq!(tm.robot, "Teleoperated Mode");
        assert_eq!(tm.drive, "Robot Centric Mode");
        assert_eq!(tm.lift, "Automatic Mode");
        assert_eq!(tm.lift_stage, Some(0));
        assert_eq!(tm.lift_height_in, 12.0);
    }
}

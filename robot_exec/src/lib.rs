//! # Robot library.
//!
//! This library allows other crates in the workspace to access items defined inside the robot 
//! crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Drive control module - converts the operator's sticks into mecanum wheel demands
pub mod drive_ctrl;

/// Equipment interfaces - sensor traits and actuator demand types
pub mod eqpt;

/// Intake control module - runs the intake rollers and arms
pub mod intake_ctrl;

/// Lift control module - manual, commanded and sequenced control of the lift
pub mod lift_ctrl;

/// Executable parameters
pub mod params;

/// PID controller and its integrator
pub mod pid;

/// Robot aggregate - match phases, operator commands and telemetry
pub mod robot;

/// Simulated equipment
pub mod sim;

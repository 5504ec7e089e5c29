//! Drive control module
//!
//! Converts operator stick input and the robot heading into power demands for
//! the four wheels of a mecanum drivebase, in either a robot-centric or a
//! field-centric reference frame.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_field_centric;
mod calc_robot_centric;
mod drivebase;
mod params;
mod state;
mod stick;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use drivebase::*;
pub use params::*;
pub use state::*;
pub use stick::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of driven wheels on the robot.
pub const NUM_WHEELS: usize = 4;

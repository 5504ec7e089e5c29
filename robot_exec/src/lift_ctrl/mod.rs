//! # Lift control module
//!
//! Drives the vertical lift and its pneumatic carriage and claw. The lift is
//! always in exactly one of the following modes:
//!
//! - `Off` - No power is sent to the lift and no solenoid demands are made.
//! - `Manual` - The operator's stick drives the lift directly, and the
//!   carriage and claw follow the operator's open/close requests.
//! - `AutoStack` / `AutoDrive` - The lift runs through a fixed stage table of
//!   height targets and carriage actuations, returning to `Manual` at the end.
//! - `Command` - The lift holds an externally commanded height.
//!
//! Output power is always scaled by the operator's throttle gain and limited
//! to [-1, 1].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod sequence;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use sequence::*;
pub use state::*;

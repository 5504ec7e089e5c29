//! # Intake control module
//!
//! Runs the pair of intake rollers and the intake arm solenoid. Roller
//! direction is selected with `intake()`, `outake()` and `idle()`, and the
//! arms with `open()` and `close()`. While the module is `Off` no demands are
//! made and the rollers are held at zero.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

//! # PID control module
//!
//! Provides the [`PidController`] used by the lift, along with the
//! trapezoidal [`Integrator`] it uses for its integral term.
//!
//! Both items are time-aware and read the monotonic clock themselves. Each
//! also provides an `*_at` variant accepting an explicit timestamp in
//! milliseconds, which is used when a caller samples the clock once per cycle
//! (and by the tests).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod controller;
mod integrator;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use controller::*;
pub use integrator::*;

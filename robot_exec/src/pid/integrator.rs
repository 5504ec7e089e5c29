//! Trapezoidal integrator

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use util::time::monotonic_ms;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Accumulates the trapezoidal time-integral of a scalar signal.
///
/// Time is measured in milliseconds, so the integral of a constant `v` held
/// for `T` ms is `v * T`.
///
/// Construction is not a sample: the interval between creating the integrator
/// and its first sample is never integrated. The first sample only primes it,
/// so the integral starts from the first real measurement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Integrator {
    /// Time of the last sample, `None` until the first sample arrives.
    last_sample_time_ms: Option<f64>,

    /// Value of the last sample
    last_value: f64,

    /// The integral accumulation
    accumulated: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Integrator {
    /// Create a new integrator with an empty accumulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample to the integral, timestamped with the monotonic clock.
    pub fn integrate(&mut self, value: f64) {
        self.integrate_at(value, monotonic_ms())
    }

    /// Add a sample taken at `now_ms` to the integral.
    ///
    /// The area of the trapezoid between the previous sample and this one is
    /// added to the accumulation. The first sample only primes the
    /// integrator, since there is no interval for it to cover yet.
    pub fn integrate_at(&mut self, value: f64, now_ms: f64) {
        if let Some(last_time_ms) = self.last_sample_time_ms {
            let dt_ms = now_ms - last_time_ms;
            self.accumulated += (value + self.last_value) / 2.0 * dt_ms;
        }

        self.last_sample_time_ms = Some(now_ms);
        self.last_value = value;
    }

    /// Get the total integrated value.
    pub fn get(&self) -> f64 {
        self.accumulated
    }

    /// Clear the accumulation.
    ///
    /// The last sample is kept so that the next interval is still measured
    /// from it.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

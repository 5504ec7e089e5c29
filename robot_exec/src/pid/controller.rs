//! PID controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use util::time::monotonic_ms;

use super::Integrator;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller
///
/// The error is defined as `measurement - setpoint`, and the derivative term
/// is subtracted from the output. Gains are tuned against this convention so
/// neither sign may be flipped. The output is unbounded, callers must clamp
/// it to their actuator's range.
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Derivative gain
    k_d: f64,

    /// The value the measurement is driven towards
    setpoint: f64,

    /// Error on the most recent calculation
    error: f64,

    /// Error on the calculation before that
    prev_error: f64,

    /// Integral of the error over time
    integrator: Integrator,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {

    /// Create a new controller with the given gains.
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self {
            k_p, k_i, k_d,
            setpoint: 0.0,
            error: 0.0,
            prev_error: 0.0,
            integrator: Integrator::new(),
        }
    }

    /// Set the desired value, returning the controller so a calculation can
    /// be chained on.
    pub fn set_desired(&mut self, setpoint: f64) -> &mut Self {
        self.setpoint = setpoint;
        self
    }

    /// The current setpoint.
    pub fn desired(&self) -> f64 {
        self.setpoint
    }

    /// The error from the most recent calculation.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// The accumulated error integral (before the integral gain is applied).
    pub fn integral(&self) -> f64 {
        self.integrator.get()
    }

    /// Clear the integral and both error terms.
    pub fn reset(&mut self) {
        self.integrator.reset();
        self.error = 0.0;
        self.prev_error = 0.0;
    }

    /// Calculate the output for the given measurement, using the monotonic
    /// clock for the integral term.
    pub fn calculate(&mut self, measurement: f64) -> f64 {
        self.calculate_at(measurement, monotonic_ms())
    }

    /// Calculate the output for a measurement taken at `now_ms`.
    pub fn calculate_at(&mut self, measurement: f64, now_ms: f64) -> f64 {
        self.prev_error = self.error;
        self.error = measurement - self.setpoint;

        let p = self.error * self.k_p;

        self.integrator.integrate_at(self.error, now_ms);
        let i = self.integrator.get() * self.k_i;

        let d = self.k_d * (self.error - self.prev_error);

        p + i - d
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_proportional_sign() {
        let mut pid = PidController::new(0.5, 0.0, 0.0);

        // Measurement above the setpoint gives a positive error and output
        let out = pid.set_desired(10.0).calculate_at(14.0, 0.0);
        assert_eq!(pid.error(), 4.0);
        assert_eq!(out, 2.0);
    }

    #[test]
    fn test_derivative_subtracted() {
        let mut pid = PidController::new(0.0, 0.0, 2.0);
        pid.set_desired(0.0);

        // First calc: error 0 -> 1, d = 2 * 1, output = -2
        assert_eq!(pid.calculate_at(1.0, 0.0), -2.0);

        // Error held at 1, derivative is zero
        assert_eq!(pid.calculate_at(1.0, 20.0), 0.0);
    }

    #[test]
    fn test_zero_error_holds_integral() {
        let mut pid = PidController::new(1.0, 0.01, 1.0);
        pid.set_desired(5.0);

        // Build up some integral
        pid.calculate_at(7.0, 0.0);
        pid.calculate_at(7.0, 20.0);
        pid.calculate_at(5.0, 40.0);

        // Two consecutive zero error calculations
        let out_1 = pid.calculate_at(5.0, 60.0);
        let integral = pid.integral();
        let out_2 = pid.calculate_at(5.0, 80.0);

        // No more growth in the integral and no derivative contribution, so
        // the output is just the held integral term
        assert_eq!(pid.integral(), integral);
        assert_eq!(out_2, integral * 0.01);
        assert_eq!(out_1, out_2);
    }

    #[test]
    fn test_reset() {
        let mut pid = PidController::new(1.0, 1.0, 1.0);
        pid.set_desired(0.0);
        pid.calculate_at(3.0, 0.0);
        pid.calculate_at(3.0, 10.0);
        assert!(pid.integral() > 0.0);

        pid.reset();

        assert_eq!(pid.integral(), 0.0);
        assert_eq!(pid.error(), 0.0);

        // Setpoint survives a reset
        assert_eq!(pid.desired(), 0.0);

        // After reset the derivative is measured from a zero error
        let out = pid.calculate_at(3.0, 20.0);
        let expected_i = (3.0 + 3.0) / 2.0 * 10.0;
        assert!((out - (3.0 + expected_i - 3.0)).abs() < 1e-9);
    }
}

//! Parameters structure for IntakeCtrl

use serde::Deserialize;

/// Parameters for Intake control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Magnitude of the power sent to each roller while spinning.
    pub roller_power: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            roller_power: 0.75
        }
    }
}

//! Drivebase actuation boundary

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::Serialize;
use util::maths::clamp;

use super::{WheelDems, NUM_WHEELS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The four wheel motors of the drivebase.
///
/// Every demand passing through the drivebase is limited to the motor range,
/// regardless of what the caller has already done.
#[derive(Debug, Clone, Serialize)]
pub struct Drivebase {
    enabled: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Drivebase {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Drivebase {
    pub fn enable(&mut self) {
        if !self.enabled {
            debug!("Drivebase enabled");
        }
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        if self.enabled {
            debug!("Drivebase disabled");
        }
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the demands to send to the motors.
    ///
    /// When enabled each wheel is clamped to [-1, 1] independently and the
    /// second element of the return flags which wheels were limited. When
    /// disabled all wheels are stopped.
    pub fn drive(&self, dems: &WheelDems) -> (WheelDems, [bool; NUM_WHEELS]) {
        let mut limited = [false; NUM_WHEELS];

        if !self.enabled {
            return (WheelDems::default(), limited);
        }

        let mut out = dems.to_array();
        for (i, w) in out.iter_mut().enumerate() {
            let c = clamp(w, &-1.0, &1.0);
            limited[i] = c != *w;
            *w = c;
        }

        (WheelDems::from_array(out), limited)
    }
}

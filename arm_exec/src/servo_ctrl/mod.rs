//! Servo arm joint module
//!
//! A [`ServoArm`] owns one joint of the arm: its physical segment length, the
//! calibration map between abstract joint angles and physical servo angles,
//! and the joint's current angle state. It is the only path through which a
//! servo write can be issued, and it refuses any command outside the joint's
//! allowed range.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while constructing a ServoArm.
#[derive(Debug, thiserror::Error)]
pub enum ServoCtrlError {
    #[error(
        "Allowed angle range is invalid: minimum {min_deg} deg is greater than \
         maximum {max_deg} deg"
    )]
    InvalidAllowedRange { min_deg: f64, max_deg: f64 },

    #[error("Calibration angles must be distinct, both are {0} deg")]
    DegenerateCalibration(f64),

    #[error("Joint segment length must be positive, got {0} cm")]
    NonPositiveLength(f64),
}

//! Arm control module
//!
//! Converts desired end effector motion - a cartesian displacement in the
//! arm's working plane and/or a change of hand orientation - into joint angle
//! commands for the three servo joints. Two inverse kinematics strategies are
//! available: the closed-form EXACT solution and the Jacobian-based
//! DERIVATIVE linearisation. Every candidate pose is checked against all
//! three joints' ranges before any joint moves, so a request either commits
//! completely or leaves the arm untouched.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_derivative;
mod calc_exact;
mod frames;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use frames::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Jacobian determinant magnitude below which a pose is treated as singular.
///
/// At a singular pose small cartesian displacements demand unbounded joint
/// angle changes, so the differential method refuses to move into (or out of)
/// any pose whose determinant is below this threshold.
pub const DIFFERENTIAL_STABILITY_THRESHOLD: f64 = 1e-3;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while constructing the ArmCtrl module.
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Forearm length must be positive, got {0} cm")]
    NonPositiveForearmLength(f64),
}

//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::AngularCoordinates;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// The fixed length of the forearm offset between the elbow joint and the
    /// hand pivot.
    ///
    /// Units: centimeters
    pub forearm_length_cm: f64,

    // ---- START-UP ----
    /// Pose the arm is driven to on start-up. This establishes the initial
    /// joint angles, without which no relative motion is possible.
    pub initial_pose: AngularCoordinates,
}

//! Parameters structure for the Joystick

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the joystick input.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Largest cartesian displacement a single cycle may request along each
    /// axis, reached at full stick deflection.
    ///
    /// Units: centimeters
    pub max_displacement_per_cycle_cm: f64,

    /// Largest hand rotation a single cycle may request, reached at full
    /// deflection of the rotation channel.
    ///
    /// Units: degrees
    pub max_rotation_per_cycle_deg: f64,

    /// Mapped inputs with a magnitude below this produce no motion, so a
    /// resting stick never drifts the arm.
    ///
    /// Units: millis (of the `[-1000, 1000]` mapped range)
    pub dead_zone_millis: f64,
}

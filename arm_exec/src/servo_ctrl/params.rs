//! Parameters structures for ServoCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::ServoCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Calibration map for one servo arm joint.
///
/// Defines both the legal range of abstract joint angles and a two point
/// affine correspondence between abstract joint angles and physical servo
/// angles. The calibration points need not coincide with the allowed range -
/// the affine map is valid for extrapolation outside them as well.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapRange {
    /// Minimum allowed joint angle.
    ///
    /// Units: degrees
    pub min_allowed_deg: f64,

    /// Maximum allowed joint angle.
    ///
    /// Units: degrees
    pub max_allowed_deg: f64,

    /// Joint angle of the first calibration point.
    ///
    /// Units: degrees
    pub first_cal_deg: f64,

    /// Joint angle of the second calibration point.
    ///
    /// Units: degrees
    pub second_cal_deg: f64,

    /// Physical servo angle measured at the first calibration point.
    ///
    /// Units: degrees
    pub servo_at_first_cal_deg: f64,

    /// Physical servo angle measured at the second calibration point.
    ///
    /// Units: degrees
    pub servo_at_second_cal_deg: f64,
}

/// Parameters for a single servo arm joint.
#[derive(Debug, Clone, Deserialize)]
pub struct ServoParams {
    /// Physical length of the arm segment driven by this joint.
    ///
    /// Units: centimeters
    pub length_cm: f64,

    /// Driver board channel index this joint's servo is wired to.
    pub channel: u8,

    /// Calibration map for this joint.
    pub map_range: MapRange,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MapRange {
    /// Check that this map describes a usable joint.
    pub(crate) fn validate(&self) -> Result<(), ServoCtrlError> {
        if self.min_allowed_deg > self.max_allowed_deg {
            return Err(ServoCtrlError::InvalidAllowedRange {
                min_deg: self.min_allowed_deg,
                max_deg: self.max_allowed_deg,
            });
        }

        if self.first_cal_deg == self.second_cal_deg {
            return Err(ServoCtrlError::DegenerateCalibration(self.first_cal_deg));
        }

        Ok(())
    }

    /// Transform an abstract joint angle into the physical servo angle.
    ///
    /// Affine interpolation between the two calibration points, which also
    /// extrapolates linearly outside them.
    ///
    /// Units: degrees
    pub(crate) fn arm_to_servo_deg(&self, angle_deg: f64) -> f64 {
        let alpha =
            (self.second_cal_deg - angle_deg) / (self.second_cal_deg - self.first_cal_deg);

        alpha * self.servo_at_first_cal_deg + (1.0 - alpha) * self.servo_at_second_cal_deg
    }
}

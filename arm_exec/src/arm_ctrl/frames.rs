//! Coordinate and pose types for the arm
//!
//! All of these are ephemeral values - recomputed on every control step and
//! never cached across steps.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// End effector position in the arm's working plane.
///
/// The shoulder pivot is the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneCartesianCoordinates {
    /// Units: centimeters
    pub x_cm: f64,

    /// Units: centimeters
    pub y_cm: f64,
}

/// A joint-space pose of the arm.
///
/// `hand_reference_deg` is the *absolute* orientation of the hand in the
/// world frame, not the wrist servo's raw mechanical angle. It relates to
/// the raw joint angles by
/// `hand_reference = shoulder + elbow - hand_raw - 90`, which lets the hand
/// hold its orientation while the shoulder and elbow move, and rotate
/// independently of arm translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularCoordinates {
    /// Units: degrees
    pub shoulder_deg: f64,

    /// Units: degrees
    pub elbow_deg: f64,

    /// Units: degrees
    pub hand_reference_deg: f64,
}

/// The 2x2 Jacobian of end effector position with respect to the shoulder
/// and elbow angles, evaluated at one pose.
///
/// The hand term does not appear: the hand's orientation is tracked
/// independently of the shoulder/elbow pair.
#[derive(Debug, Clone, Copy)]
pub struct AngularDerivatives {
    /// Units: centimeters/degree
    pub x_by_shoulder: f64,

    /// Units: centimeters/degree
    pub x_by_elbow: f64,

    /// Units: centimeters/degree
    pub y_by_shoulder: f64,

    /// Units: centimeters/degree
    pub y_by_elbow: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl std::ops::Add for PlaneCartesianCoordinates {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x_cm: self.x_cm + other.x_cm,
            y_cm: self.y_cm + other.y_cm,
        }
    }
}

impl fmt::Display for PlaneCartesianCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x: {:.3} cm, y: {:.3} cm)", self.x_cm, self.y_cm)
    }
}

impl AngularCoordinates {
    /// True if any angle of the pose failed to solve.
    pub fn has_nan(&self) -> bool {
        self.shoulder_deg.is_nan() || self.elbow_deg.is_nan() || self.hand_reference_deg.is_nan()
    }
}

impl fmt::Display for AngularCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "(shoulder: {:.2} deg, elbow: {:.2} deg, hand reference: {:.2} deg)",
            self.shoulder_deg, self.elbow_deg, self.hand_reference_deg
        )
    }
}

impl AngularDerivatives {
    /// Determinant of the Jacobian, measuring local invertibility.
    pub fn determinant(&self) -> f64 {
        self.x_by_shoulder * self.y_by_elbow - self.x_by_elbow * self.y_by_shoulder
    }
}

//! Derivative method relative motion calculations
//!
//! The derivative method linearises the forward kinematics around the
//! current pose and solves the resulting 2x2 system for the shoulder and
//! elbow deltas. The Jacobian determinant is checked twice: at the current
//! pose before solving (a near-zero determinant makes the solve meaningless)
//! and again at the projected pose after solving, so the arm never commits a
//! step that lands in a singular configuration.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use log::{debug, error, warn};
use util::maths::{cos_deg_derivative, sin_deg_derivative};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Perform a relative motion request with the derivative method.
    ///
    /// A simultaneous hand rotation folds the displacement of the hand
    /// offset into the cartesian delta the shoulder/elbow pair must produce,
    /// so the end effector still moves by exactly the requested delta to
    /// first order.
    pub(crate) fn move_by_with_derivative_method(
        &mut self,
        delta: PlaneCartesianCoordinates,
        delta_hand_deg: f64,
    ) {
        let current_pose = match self.current_angular_coordinates() {
            Some(p) => p,
            None => {
                error!("Arm has no established pose, ignoring the relative move request");
                return;
            }
        };

        let current_cartesian = self.calculate_cartesian(current_pose);
        let derivatives = self.calculate_angular_derivatives(current_pose);
        let determinant = derivatives.determinant();

        if determinant.abs() < DIFFERENTIAL_STABILITY_THRESHOLD {
            error!(
                "FATAL: arm is currently in an unstable position {}, refusing to move",
                current_cartesian
            );
            return;
        }

        // The tangential displacement the hand offset undergoes when the
        // hand reference angle changes, to first order
        let d = self.hand.length_cm();
        let delta_x_cm = delta.x_cm
            - d * cos_deg_derivative(current_pose.hand_reference_deg) * delta_hand_deg;
        let delta_y_cm = delta.y_cm
            - d * sin_deg_derivative(current_pose.hand_reference_deg) * delta_hand_deg;

        let delta_shoulder_deg =
            (delta_x_cm * derivatives.y_by_elbow - delta_y_cm * derivatives.x_by_elbow)
                / determinant;
        let delta_elbow_deg =
            (delta_y_cm * derivatives.x_by_shoulder - delta_x_cm * derivatives.y_by_shoulder)
                / determinant;

        let projected_pose = AngularCoordinates {
            shoulder_deg: current_pose.shoulder_deg + delta_shoulder_deg,
            elbow_deg: current_pose.elbow_deg + delta_elbow_deg,
            hand_reference_deg: current_pose.hand_reference_deg + delta_hand_deg,
        };

        let projected_cartesian = self.calculate_cartesian(projected_pose);
        debug!(
            "Differential step requested {}, linearised solution reaches {}",
            current_cartesian + delta,
            projected_cartesian
        );

        // Look-ahead guard: refuse the step if it would land on a singular
        // pose, even though the linear solve succeeded
        let projected_derivatives = self.calculate_angular_derivatives(projected_pose);
        if projected_derivatives.determinant().abs() < DIFFERENTIAL_STABILITY_THRESHOLD {
            warn!(
                "Dropping arm move towards the unstable position {}",
                projected_cartesian
            );
            return;
        }

        let delta_hand_raw_deg = delta_shoulder_deg + delta_elbow_deg - delta_hand_deg;

        // Same all-or-nothing range gate as the exact method
        let shoulder_ok = self.shoulder.can_move_by(delta_shoulder_deg);
        let elbow_ok = self.elbow.can_move_by(delta_elbow_deg);
        let hand_ok = self.hand.can_move_by(delta_hand_raw_deg);

        if !(shoulder_ok && elbow_ok && hand_ok) {
            warn!("Dropping differential arm move: a joint limit would be exceeded");
            return;
        }

        self.shoulder.move_by(delta_shoulder_deg);
        self.elbow.move_by(delta_elbow_deg);
        self.hand.move_by(delta_hand_raw_deg);
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};

// Internal
use super::{AngularCoordinates, AngularDerivatives, ArmCtrlError, Params, PlaneCartesianCoordinates};
use crate::servo_ctrl::ServoArm;
use util::maths::{cos_deg, cos_deg_derivative, sin_deg, sin_deg_derivative};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state.
///
/// Owns the three servo joints outright - no other component may touch their
/// angle state - plus the fixed forearm geometry and the active inverse
/// kinematics method.
pub struct ArmCtrl {
    pub(crate) params: Params,

    pub(crate) shoulder: ServoArm,

    pub(crate) elbow: ServoArm,

    pub(crate) hand: ServoArm,

    pub(crate) method: Method,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The inverse kinematics strategy used by relative motion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Closed-form analytic inverse kinematics.
    Exact,

    /// Jacobian-based differential linearisation around the current pose.
    Derivative,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Create a new arm controller owning the three given joints.
    ///
    /// The joints carry no initial angle yet - establish a pose with
    /// [`Self::move_arms_to`] before requesting relative motion.
    pub fn new(
        params: Params,
        shoulder: ServoArm,
        elbow: ServoArm,
        hand: ServoArm,
    ) -> Result<Self, ArmCtrlError> {
        if params.forearm_length_cm <= 0.0 {
            return Err(ArmCtrlError::NonPositiveForearmLength(
                params.forearm_length_cm,
            ));
        }

        Ok(Self {
            params,
            shoulder,
            elbow,
            hand,
            method: Method::Exact,
        })
    }

    /// The current pose of the arm, or `None` if any joint has no angle yet.
    ///
    /// The hand reference angle is derived from the three committed joint
    /// angles rather than stored, so it is always consistent with the
    /// physical arm even after rejected requests.
    pub fn current_angular_coordinates(&self) -> Option<AngularCoordinates> {
        let shoulder_deg = self.shoulder.current_angle_deg()?;
        let elbow_deg = self.elbow.current_angle_deg()?;
        let hand_deg = self.hand.current_angle_deg()?;

        Some(AngularCoordinates {
            shoulder_deg,
            elbow_deg,
            hand_reference_deg: shoulder_deg + elbow_deg - hand_deg - 90.0,
        })
    }

    /// The current end effector position, or `None` if any joint has no
    /// angle yet.
    pub fn current_cartesian_coordinates(&self) -> Option<PlaneCartesianCoordinates> {
        Some(self.calculate_cartesian(self.current_angular_coordinates()?))
    }

    /// Drive all three joints to the given pose.
    ///
    /// Subject to the same all-or-nothing feasibility gate as every other
    /// motion request.
    pub fn move_arms_to(&mut self, pose: AngularCoordinates) {
        self.commit_pose(pose);
    }

    /// Move the end effector by the given cartesian displacement, holding
    /// the hand's orientation constant.
    ///
    /// Units: centimeters
    pub fn move_by(&mut self, delta_x_cm: f64, delta_y_cm: f64) {
        let delta = PlaneCartesianCoordinates {
            x_cm: delta_x_cm,
            y_cm: delta_y_cm,
        };

        match self.method {
            Method::Exact => self.move_by_with_exact_method(delta, 0.0),
            Method::Derivative => self.move_by_with_derivative_method(delta, 0.0),
        }
    }

    /// Rotate the hand by the given angle, holding the end effector position
    /// as commanded by a zero cartesian displacement.
    ///
    /// Units: degrees
    pub fn rotate_hand_by(&mut self, delta_deg: f64) {
        let delta = PlaneCartesianCoordinates { x_cm: 0.0, y_cm: 0.0 };

        match self.method {
            Method::Exact => self.move_by_with_exact_method(delta, delta_deg),
            Method::Derivative => self.move_by_with_derivative_method(delta, delta_deg),
        }
    }

    /// Select the closed-form inverse kinematics for relative motion.
    pub fn set_method_to_exact(&mut self) {
        self.method = Method::Exact;
        info!("Arm inverse kinematics method set to EXACT");
    }

    /// Select the Jacobian differential method for relative motion.
    pub fn set_method_to_derivative(&mut self) {
        self.method = Method::Derivative;
        info!("Arm inverse kinematics method set to DERIVATIVE");
    }

    /// Forward kinematics: the end effector position at the given pose.
    ///
    /// The shoulder pivot is the origin. Segment lengths A (shoulder) and
    /// B (elbow) come from the joints, the forearm offset C from the
    /// parameters and the hand length D from the hand joint.
    pub(crate) fn calculate_cartesian(&self, pose: AngularCoordinates) -> PlaneCartesianCoordinates {
        let a = self.shoulder.length_cm();
        let b = self.elbow.length_cm();
        let c = self.params.forearm_length_cm;
        let d = self.hand.length_cm();

        let x_cm = a * cos_deg(pose.shoulder_deg)
            - b * cos_deg(pose.elbow_deg + pose.shoulder_deg)
            - c * sin_deg(pose.elbow_deg + pose.shoulder_deg)
            + d * cos_deg(pose.hand_reference_deg);
        let y_cm = a * sin_deg(pose.shoulder_deg)
            - b * sin_deg(pose.elbow_deg + pose.shoulder_deg)
            + c * cos_deg(pose.elbow_deg + pose.shoulder_deg)
            + d * sin_deg(pose.hand_reference_deg);

        PlaneCartesianCoordinates { x_cm, y_cm }
    }

    /// Closed-form inverse kinematics: the pose placing the end effector at
    /// the given target with the given hand orientation.
    ///
    /// The hand offset is subtracted first to obtain the forearm tip, then
    /// the classic two-link solution follows from the law of cosines. For
    /// targets outside the arm's reach the inverse cosines produce NaN,
    /// which is returned as-is for the caller to detect.
    pub(crate) fn calculate_angular(
        &self,
        target: PlaneCartesianCoordinates,
        hand_reference_deg: f64,
    ) -> AngularCoordinates {
        let a = self.shoulder.length_cm();
        let b = self.elbow.length_cm();
        let c = self.params.forearm_length_cm;
        let d = self.hand.length_cm();

        // Forearm tip, with the hand offset removed at the desired
        // orientation
        let x_cm = target.x_cm - d * cos_deg(hand_reference_deg);
        let y_cm = target.y_cm - d * sin_deg(hand_reference_deg);

        let r = (x_cm.powi(2) + y_cm.powi(2)).sqrt();
        let s = (b.powi(2) + c.powi(2)).sqrt();

        let shoulder_deg = util::maths::acos_deg(x_cm / r)
            + util::maths::acos_deg((a.powi(2) + r.powi(2) - s.powi(2)) / (2.0 * a * r));
        let elbow_deg = util::maths::acos_deg(b / s)
            + util::maths::acos_deg((s.powi(2) + a.powi(2) - r.powi(2)) / (2.0 * a * s));

        AngularCoordinates {
            shoulder_deg,
            elbow_deg,
            hand_reference_deg,
        }
    }

    /// The Jacobian of end effector position with respect to the shoulder
    /// and elbow angles, evaluated at the given pose.
    pub(crate) fn calculate_angular_derivatives(
        &self,
        pose: AngularCoordinates,
    ) -> AngularDerivatives {
        let a = self.shoulder.length_cm();
        let b = self.elbow.length_cm();
        let c = self.params.forearm_length_cm;

        let x_by_shoulder = a * cos_deg_derivative(pose.shoulder_deg)
            - b * cos_deg_derivative(pose.elbow_deg + pose.shoulder_deg)
            - c * sin_deg_derivative(pose.elbow_deg + pose.shoulder_deg);
        let x_by_elbow = -b * cos_deg_derivative(pose.elbow_deg + pose.shoulder_deg)
            - c * sin_deg_derivative(pose.elbow_deg + pose.shoulder_deg);
        let y_by_shoulder = a * sin_deg_derivative(pose.shoulder_deg)
            - b * sin_deg_derivative(pose.elbow_deg + pose.shoulder_deg)
            + c * cos_deg_derivative(pose.elbow_deg + pose.shoulder_deg);
        let y_by_elbow = -b * sin_deg_derivative(pose.elbow_deg + pose.shoulder_deg)
            + c * cos_deg_derivative(pose.elbow_deg + pose.shoulder_deg);

        AngularDerivatives {
            x_by_shoulder,
            x_by_elbow,
            y_by_shoulder,
            y_by_elbow,
        }
    }

    /// The raw hand joint angle realising the given pose.
    ///
    /// Inverse of the hand reference relation
    /// `hand_reference = shoulder + elbow - hand_raw - 90`.
    ///
    /// Units: degrees
    pub(crate) fn calculate_hand_angle(&self, pose: AngularCoordinates) -> f64 {
        pose.shoulder_deg + pose.elbow_deg - pose.hand_reference_deg - 90.0
    }

    /// Commit a full pose to the three joints.
    ///
    /// All three joints are queried for feasibility before any joint moves.
    /// If any joint rejects its candidate angle the whole pose is dropped
    /// and no joint state (or hardware) changes.
    pub(crate) fn commit_pose(&mut self, pose: AngularCoordinates) -> bool {
        let hand_deg = self.calculate_hand_angle(pose);

        // Query every joint so each infeasible angle gets its own log event
        let shoulder_ok = self.shoulder.can_move_to(pose.shoulder_deg);
        let elbow_ok = self.elbow.can_move_to(pose.elbow_deg);
        let hand_ok = self.hand.can_move_to(hand_deg);

        if !(shoulder_ok && elbow_ok && hand_ok) {
            warn!("Dropping arm move: pose {} is not feasible for all joints", pose);
            return false;
        }

        self.shoulder.move_to(pose.shoulder_deg);
        self.elbow.move_to(pose.elbow_deg);
        self.hand.move_to(hand_deg);

        true
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use crate::hw::mock::RecordingServo;
    use crate::servo_ctrl::MapRange;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub(crate) type WriteLog = Rc<RefCell<Vec<i32>>>;

    /// A map range whose calibration is the identity (joint angle == servo
    /// angle), covering the given allowed range.
    pub(crate) fn identity_map_range(min_deg: f64, max_deg: f64) -> MapRange {
        MapRange {
            min_allowed_deg: min_deg,
            max_allowed_deg: max_deg,
            first_cal_deg: 0.0,
            second_cal_deg: 180.0,
            servo_at_first_cal_deg: 0.0,
            servo_at_second_cal_deg: 180.0,
        }
    }

    fn joint(name: &str, length_cm: f64, min_deg: f64, max_deg: f64) -> (ServoArm, WriteLog) {
        let (servo, writes) = RecordingServo::new();
        let arm = ServoArm::new(
            name,
            length_cm,
            identity_map_range(min_deg, max_deg),
            Box::new(servo),
        )
        .unwrap();
        (arm, writes)
    }

    /// The physical prototype's pose used as a start point in tests: well
    /// away from both workspace edges and singularities.
    pub(crate) fn start_pose() -> AngularCoordinates {
        AngularCoordinates {
            shoulder_deg: 90.0,
            elbow_deg: 150.0,
            hand_reference_deg: 0.0,
        }
    }

    /// An arm with the physical prototype's geometry (A=18.7, B=6.7, C=15.0,
    /// D=6.0 cm) and the hand joint's allowed range narrowed as given.
    pub(crate) fn arm_with_hand_range(
        hand_min_deg: f64,
        hand_max_deg: f64,
    ) -> (ArmCtrl, [WriteLog; 3]) {
        let (shoulder, shoulder_writes) = joint("shoulder", 18.7, -360.0, 360.0);
        let (elbow, elbow_writes) = joint("elbow", 6.7, -360.0, 360.0);
        let (hand, hand_writes) = joint("hand", 6.0, hand_min_deg, hand_max_deg);

        let params = Params {
            forearm_length_cm: 15.0,
            initial_pose: start_pose(),
        };

        let arm = ArmCtrl::new(params, shoulder, elbow, hand).unwrap();
        (arm, [shoulder_writes, elbow_writes, hand_writes])
    }

    /// An arm with the prototype geometry and wide-open joint ranges.
    pub(crate) fn wide_open_arm() -> (ArmCtrl, [WriteLog; 3]) {
        arm_with_hand_range(-360.0, 360.0)
    }
}

#[cfg(test)]
mod test {
    use super::test_util::*;
    use super::*;

    #[test]
    fn test_forward_inverse_round_trip() {
        let (arm, _) = wide_open_arm();

        // Solve for a known-reachable target first so the pose sits on the
        // solver's own elbow branch, then round trip it both ways
        let target = PlaneCartesianCoordinates { x_cm: 20.0, y_cm: 10.0 };
        let pose = arm.calculate_angular(target, 0.0);
        assert!(!pose.has_nan());

        let cartesian = arm.calculate_cartesian(pose);
        assert!((cartesian.x_cm - target.x_cm).abs() < 1e-9);
        assert!((cartesian.y_cm - target.y_cm).abs() < 1e-9);

        let pose_again = arm.calculate_angular(cartesian, 0.0);
        assert!((pose_again.shoulder_deg - pose.shoulder_deg).abs() < 1e-6);
        assert!((pose_again.elbow_deg - pose.elbow_deg).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_with_rotated_hand() {
        let (arm, _) = wide_open_arm();

        let target = PlaneCartesianCoordinates { x_cm: 15.0, y_cm: 18.0 };
        let pose = arm.calculate_angular(target, 30.0);
        assert!(!pose.has_nan());

        let cartesian = arm.calculate_cartesian(pose);
        assert!((cartesian.x_cm - target.x_cm).abs() < 1e-9);
        assert!((cartesian.y_cm - target.y_cm).abs() < 1e-9);
    }

    #[test]
    fn test_hand_reference_angle_derivation() {
        let (mut arm, _) = wide_open_arm();

        arm.move_arms_to(start_pose());

        let pose = arm.current_angular_coordinates().unwrap();
        assert!((pose.shoulder_deg - 90.0).abs() < 1e-9);
        assert!((pose.elbow_deg - 150.0).abs() < 1e-9);
        // hand_raw = 90 + 150 - 0 - 90 = 150, and the derivation inverts it
        assert!(pose.hand_reference_deg.abs() < 1e-9);
    }

    #[test]
    fn test_uninitialised_arm_reads_none() {
        let (arm, _) = wide_open_arm();

        assert!(arm.current_angular_coordinates().is_none());
        assert!(arm.current_cartesian_coordinates().is_none());
    }

    #[test]
    fn test_atomic_commit_on_range_violation() {
        // Narrow the hand joint so the candidate hand angle (150 deg for the
        // start pose) is infeasible while shoulder and elbow are fine
        let (mut arm, writes) = arm_with_hand_range(0.0, 100.0);

        arm.move_arms_to(start_pose());

        // No joint may have moved, no servo write may have been issued
        assert!(arm.current_angular_coordinates().is_none());
        for write_log in writes.iter() {
            assert!(write_log.borrow().is_empty());
        }
    }

    #[test]
    fn test_move_arms_to_commits_all_joints() {
        let (mut arm, writes) = wide_open_arm();

        arm.move_arms_to(start_pose());

        for write_log in writes.iter() {
            assert_eq!(write_log.borrow().len(), 1);
        }

        let cartesian = arm.current_cartesian_coordinates().unwrap();
        let expected = arm.calculate_cartesian(start_pose());
        assert!((cartesian.x_cm - expected.x_cm).abs() < 1e-9);
        assert!((cartesian.y_cm - expected.y_cm).abs() < 1e-9);
    }

    #[test]
    fn test_method_switching() {
        let (mut arm, _) = wide_open_arm();

        assert_eq!(arm.method, Method::Exact);
        arm.set_method_to_derivative();
        assert_eq!(arm.method, Method::Derivative);
        arm.set_method_to_exact();
        assert_eq!(arm.method, Method::Exact);
    }
}

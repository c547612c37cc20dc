//! Exact method relative motion calculations
//!
//! The exact method re-solves the closed-form inverse kinematics at the
//! projected end effector position each step. Unreachable targets surface as
//! NaN angles from the inverse cosines and are dropped before any joint is
//! touched.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use log::{error, warn};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Perform a relative motion request with the exact method.
    ///
    /// The projected target is the current end effector position plus the
    /// cartesian delta, and the projected hand orientation is the current
    /// hand reference angle plus the rotation delta. Both are solved in one
    /// pass so a simultaneous displacement and rotation commits atomically.
    pub(crate) fn move_by_with_exact_method(
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
        let target = current_cartesian + delta;
        let target_hand_reference_deg = current_pose.hand_reference_deg + delta_hand_deg;

        let projected_pose = self.calculate_angular(target, target_hand_reference_deg);

        if projected_pose.has_nan() {
            warn!("Can't move the arm to the impossible position {}", target);
            return;
        }

        self.commit_pose(projected_pose);
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::super::state::test_util::*;
    use super::*;

    #[test]
    fn test_exact_move_reaches_target() {
        let (mut arm, _) = wide_open_arm();
        arm.move_arms_to(start_pose());

        let before = arm.current_cartesian_coordinates().unwrap();
        arm.move_by(1.0, -2.0);
        let after = arm.current_cartesian_coordinates().unwrap();

        assert!((after.x_cm - before.x_cm - 1.0).abs() < 1e-9);
        assert!((after.y_cm - before.y_cm + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hand_orientation_invariant_under_move_by() {
        let (mut arm, _) = wide_open_arm();
        arm.move_arms_to(start_pose());

        for _ in 0..10 {
            arm.move_by(0.5, 0.25);

            let pose = arm.current_angular_coordinates().unwrap();
            assert!(pose.hand_reference_deg.abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotate_hand_by_holds_position() {
        let (mut arm, _) = wide_open_arm();
        arm.move_arms_to(start_pose());

        let before = arm.current_cartesian_coordinates().unwrap();
        arm.rotate_hand_by(15.0);
        let after = arm.current_cartesian_coordinates().unwrap();
        let pose = arm.current_angular_coordinates().unwrap();

        assert!((pose.hand_reference_deg - 15.0).abs() < 1e-9);
        assert!((after.x_cm - before.x_cm).abs() < 1e-9);
        assert!((after.y_cm - before.y_cm).abs() < 1e-9);
    }

    #[test]
    fn test_unreachable_target_dropped() {
        let (mut arm, writes) = wide_open_arm();
        arm.move_arms_to(start_pose());

        let pose_before = arm.current_angular_coordinates().unwrap();
        let writes_before: Vec<usize> = writes.iter().map(|w| w.borrow().len()).collect();

        // Far outside the arm's reach - the inverse cosines go NaN
        arm.move_by(100.0, 100.0);

        let pose_after = arm.current_angular_coordinates().unwrap();
        assert_eq!(pose_before, pose_after);

        let writes_after: Vec<usize> = writes.iter().map(|w| w.borrow().len()).collect();
        assert_eq!(writes_before, writes_after);
    }

    #[test]
    fn test_relative_move_before_initial_pose_is_dropped() {
        let (mut arm, writes) = wide_open_arm();

        arm.move_by(1.0, 1.0);

        assert!(arm.current_angular_coordinates().is_none());
        for write_log in writes.iter() {
            assert!(write_log.borrow().is_empty());
        }
    }
}

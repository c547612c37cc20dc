//! Implementations for the ServoArm state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, error, info};

// Internal
use super::{MapRange, ServoCtrlError, ServoParams};
use crate::hw::ServoOutput;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One joint of the arm, wrapping a physical servo.
///
/// The joint's current angle is owned exclusively by this struct - it only
/// changes through [`ServoArm::move_to`], which is also the sole path by
/// which a physical servo write is issued.
pub struct ServoArm {
    name: String,

    /// Units: centimeters
    length_cm: f64,

    map_range: MapRange,

    output: Box<dyn ServoOutput>,

    /// The joint's angle, `None` until the first successful move establishes
    /// it. Relative motion and angle reads are refused while `None`.
    ///
    /// Units: degrees
    current_angle_deg: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ServoArm {
    /// Create a new servo arm joint.
    ///
    /// The joint starts with no current angle - a successful [`Self::move_to`]
    /// must establish one before relative motion is possible.
    pub fn new(
        name: &str,
        length_cm: f64,
        map_range: MapRange,
        output: Box<dyn ServoOutput>,
    ) -> Result<Self, ServoCtrlError> {
        if length_cm <= 0.0 {
            return Err(ServoCtrlError::NonPositiveLength(length_cm));
        }

        map_range.validate()?;

        Ok(Self {
            name: String::from(name),
            length_cm,
            map_range,
            output,
            current_angle_deg: None,
        })
    }

    /// Create a new servo arm joint from a loaded parameter set.
    pub fn from_params(
        name: &str,
        params: &ServoParams,
        output: Box<dyn ServoOutput>,
    ) -> Result<Self, ServoCtrlError> {
        Self::new(name, params.length_cm, params.map_range, output)
    }

    /// True if the given angle is within the joint's allowed range.
    pub fn is_angle_allowed(&self, angle_deg: f64) -> bool {
        angle_deg >= self.map_range.min_allowed_deg && angle_deg <= self.map_range.max_allowed_deg
    }

    /// Check whether the joint could move to the given angle.
    ///
    /// Side-effect-free apart from an informational log event when the angle
    /// is out of range.
    pub fn can_move_to(&self, angle_deg: f64) -> bool {
        if self.is_angle_allowed(angle_deg) {
            return true;
        }

        info!(
            "Servo arm {}: can't move to {:.2} deg, outside the allowed range \
             [{:.2}, {:.2}] deg",
            self.name, angle_deg, self.map_range.min_allowed_deg, self.map_range.max_allowed_deg
        );

        false
    }

    /// Check whether the joint could move by the given relative angle.
    ///
    /// Always false before an initial angle has been established.
    pub fn can_move_by(&self, delta_deg: f64) -> bool {
        match self.current_angle_deg {
            Some(current) => self.can_move_to(current + delta_deg),
            None => {
                info!(
                    "Servo arm {}: can't check a relative move without an initial angle",
                    self.name
                );
                false
            }
        }
    }

    /// Move the joint to the given angle.
    ///
    /// No-op if the angle is outside the allowed range. Otherwise the angle
    /// becomes the joint's current angle and is translated through the
    /// calibration map into an integer servo command.
    pub fn move_to(&mut self, angle_deg: f64) {
        if !self.can_move_to(angle_deg) {
            return;
        }

        if self.current_angle_deg.is_none() {
            info!(
                "Servo arm {}: initial angle set to {:.2} deg",
                self.name, angle_deg
            );
        }

        self.current_angle_deg = Some(angle_deg);

        let servo_deg = nearest_integer_deg(self.map_range.arm_to_servo_deg(angle_deg));

        debug!(
            "Servo arm {}: moving to {:.2} deg (servo write {} deg)",
            self.name, angle_deg, servo_deg
        );

        self.output.write_angle(servo_deg);
    }

    /// Move the joint by the given relative angle.
    ///
    /// No-op with an error log if no initial angle has been established yet.
    pub fn move_by(&mut self, delta_deg: f64) {
        let current = match self.current_angle_deg {
            Some(a) => a,
            None => {
                error!(
                    "Servo arm {}: can't apply a relative move without an initial angle",
                    self.name
                );
                return;
            }
        };

        self.move_to(current + delta_deg);
    }

    /// The joint's current angle, or `None` (with an error log) if no initial
    /// angle has been established.
    ///
    /// Units: degrees
    pub fn current_angle_deg(&self) -> Option<f64> {
        if self.current_angle_deg.is_none() {
            error!(
                "Servo arm {}: current angle read before an initial angle was set",
                self.name
            );
        }

        self.current_angle_deg
    }

    /// The physical length of the arm segment driven by this joint.
    ///
    /// Units: centimeters
    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    /// The joint's minimum allowed angle.
    ///
    /// Units: degrees
    pub fn min_angle_deg(&self) -> f64 {
        self.map_range.min_allowed_deg
    }

    /// The joint's maximum allowed angle.
    ///
    /// Units: degrees
    pub fn max_angle_deg(&self) -> f64 {
        self.map_range.max_allowed_deg
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Round a servo command to the nearest integer degree.
fn nearest_integer_deg(angle_deg: f64) -> i32 {
    (angle_deg + 0.5).floor() as i32
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::hw::mock::RecordingServo;

    /// The shoulder joint's calibration from the physical arm: 0 deg maps to
    /// a servo angle of 141 deg, 180 deg to 5 deg.
    fn shoulder_map_range() -> MapRange {
        MapRange {
            min_allowed_deg: 0.0,
            max_allowed_deg: 180.0,
            first_cal_deg: 0.0,
            second_cal_deg: 180.0,
            servo_at_first_cal_deg: 141.0,
            servo_at_second_cal_deg: 5.0,
        }
    }

    fn shoulder_arm() -> (ServoArm, std::rc::Rc<std::cell::RefCell<Vec<i32>>>) {
        let (servo, writes) = RecordingServo::new();
        let arm = ServoArm::new("shoulder", 18.7, shoulder_map_range(), Box::new(servo)).unwrap();
        (arm, writes)
    }

    #[test]
    fn test_calibration_transform() {
        let (mut arm, writes) = shoulder_arm();

        // Calibration points map exactly, the midpoint lands between them
        arm.move_to(0.0);
        arm.move_to(180.0);
        arm.move_to(90.0);

        assert_eq!(*writes.borrow(), vec![141, 5, 73]);
    }

    #[test]
    fn test_range_enforcement() {
        let (mut arm, writes) = shoulder_arm();

        arm.move_to(90.0);
        assert_eq!(arm.current_angle_deg(), Some(90.0));

        // Out of range commands change nothing and issue no write
        arm.move_to(-0.1);
        arm.move_to(180.1);
        assert_eq!(arm.current_angle_deg(), Some(90.0));
        assert_eq!(writes.borrow().len(), 1);
    }

    #[test]
    fn test_relative_motion_requires_initial_angle() {
        let (mut arm, writes) = shoulder_arm();

        assert!(!arm.can_move_by(10.0));
        arm.move_by(10.0);
        assert_eq!(arm.current_angle_deg(), None);
        assert!(writes.borrow().is_empty());

        arm.move_to(45.0);
        assert!(arm.can_move_by(10.0));
        arm.move_by(10.0);
        assert_eq!(arm.current_angle_deg(), Some(55.0));
        assert_eq!(writes.borrow().len(), 2);
    }

    #[test]
    fn test_can_move_by_at_range_edge() {
        let (mut arm, _writes) = shoulder_arm();

        arm.move_to(175.0);
        assert!(arm.can_move_by(5.0));
        assert!(!arm.can_move_by(5.1));
    }

    #[test]
    fn test_invalid_construction() {
        let mut map_range = shoulder_map_range();
        map_range.min_allowed_deg = 200.0;

        let (servo, _) = RecordingServo::new();
        assert!(ServoArm::new("shoulder", 18.7, map_range, Box::new(servo)).is_err());

        let mut map_range = shoulder_map_range();
        map_range.second_cal_deg = map_range.first_cal_deg;

        let (servo, _) = RecordingServo::new();
        assert!(ServoArm::new("shoulder", 18.7, map_range, Box::new(servo)).is_err());

        let (servo, _) = RecordingServo::new();
        assert!(ServoArm::new("shoulder", 0.0, shoulder_map_range(), Box::new(servo)).is_err());
    }
}

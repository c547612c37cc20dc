//! # Arm library.
//!
//! This library allows the arm control executable (and its tests) to access
//! the items defined inside the arm crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Arm control module - converts end effector motion requests into joint commands
pub mod arm_ctrl;

/// Hardware interfaces - servo output and analog input contracts plus their implementations
pub mod hw;

/// Joystick input module - maps raw analog samples into per-cycle motion requests
pub mod joystick;

/// Parameters for the arm control executable
pub mod params;

/// Servo arm joint module - per-joint calibration, range checking and servo writes
pub mod servo_ctrl;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Frequency of the main control loop cycle.
///
/// Units: hertz
pub const CYCLE_FREQUENCY_HZ: f64 = 50.0;

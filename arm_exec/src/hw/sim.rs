//! Simulation implementations of the hardware interfaces
//!
//! These stand in for the PCA9685 and the joystick ADC when the executable
//! runs on a development host. Servo writes are logged rather than actuated
//! and analog channels read as a centred stick.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;

use super::{AnalogInput, ServoOutput};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Raw sample of an analog channel resting at its centre position.
pub const CENTRE_RAW_INPUT: u16 = 512;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A servo output which logs writes instead of actuating hardware.
pub struct SimServo {
    name: String,
}

/// An analog input which always reads the same raw sample.
pub struct SimAnalogInput {
    value: u16,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimServo {
    /// Create a new simulated servo, named for log output.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
        }
    }
}

impl ServoOutput for SimServo {
    fn write_angle(&mut self, angle_deg: i32) {
        debug!("[sim] servo {} write: {} deg", self.name, angle_deg);
    }
}

impl SimAnalogInput {
    /// Create a simulated analog channel which always reads `value`.
    pub fn new(value: u16) -> Self {
        Self { value }
    }

    /// Create a simulated analog channel resting at the stick centre.
    pub fn centred() -> Self {
        Self::new(CENTRE_RAW_INPUT)
    }
}

impl AnalogInput for SimAnalogInput {
    fn read_raw(&mut self) -> u16 {
        self.value
    }
}

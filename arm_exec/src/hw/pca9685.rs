//! [`ServoOutput`] implementation for the PCA9685 driver
//!
//! One board drives all three arm servos, so each [`Pca9685Servo`] holds a
//! shared handle to the driver plus its own channel. The control flow is
//! single threaded (one control step runs to completion before the next is
//! accepted) so `Rc<RefCell<_>>` is sufficient.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use embedded_hal::blocking::i2c::{Write, WriteRead};
use log::warn;
use pwm_pca9685::{Channel, Pca9685};
use std::cell::RefCell;
use std::rc::Rc;

use super::{HwError, ServoOutput};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of counts in one full PWM period of the PCA9685.
const MAX_PWM: u16 = 4096;

/// PWM period for standard hobby servos (50 Hz).
///
/// Units: microseconds
const SERVO_PERIOD_US: f64 = 20000.0;

/// Pulse width commanding the servo's 0 degree position.
///
/// Units: microseconds
const SERVO_MIN_PULSE_US: f64 = 500.0;

/// Pulse width commanding the servo's 180 degree position.
///
/// Units: microseconds
const SERVO_MAX_PULSE_US: f64 = 2500.0;

/// The highest angle the physical servos accept.
///
/// Units: degrees
const SERVO_MAX_ANGLE_DEG: i32 = 180;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single servo channel on a shared PCA9685 board.
pub struct Pca9685Servo<I2C> {
    driver: Rc<RefCell<Pca9685<I2C>>>,
    channel: Channel,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<I2C, E> Pca9685Servo<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Create a new servo output on the given channel of a shared board.
    pub fn new(driver: Rc<RefCell<Pca9685<I2C>>>, channel: Channel) -> Self {
        Self { driver, channel }
    }

    fn try_write(&mut self, angle_deg: i32) -> Result<(), HwError> {
        if !(0..=SERVO_MAX_ANGLE_DEG).contains(&angle_deg) {
            return Err(HwError::AngleOutOfRange(angle_deg));
        }

        let off_counts = angle_to_counts(angle_deg);

        match self
            .driver
            .borrow_mut()
            .set_channel_on_off(self.channel, 0, off_counts)
        {
            Ok(_) => Ok(()),
            Err(pwm_pca9685::Error::I2C(_)) => Err(HwError::I2c),
            Err(pwm_pca9685::Error::InvalidInputData) => Err(HwError::InvalidOutput),
        }
    }
}

impl<I2C, E> ServoOutput for Pca9685Servo<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn write_angle(&mut self, angle_deg: i32) {
        if let Err(e) = self.try_write(angle_deg) {
            warn!(
                "Couldn't write {} deg to PCA9685 channel {:?}: {}",
                angle_deg, self.channel, e
            );
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Convert a servo angle into the PWM off-count for that angle's pulse width.
fn angle_to_counts(angle_deg: i32) -> u16 {
    let pulse_us = util::maths::lin_map(
        (0.0, SERVO_MAX_ANGLE_DEG as f64),
        (SERVO_MIN_PULSE_US, SERVO_MAX_PULSE_US),
        angle_deg as f64,
    );

    ((pulse_us / SERVO_PERIOD_US) * (MAX_PWM as f64)) as u16
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_angle_to_counts() {
        // 0 deg -> 500 us of a 20000 us period -> 2.5% of 4096
        assert_eq!(angle_to_counts(0), 102);
        // 90 deg -> 1500 us -> 7.5% of 4096
        assert_eq!(angle_to_counts(90), 307);
        // 180 deg -> 2500 us -> 12.5% of 4096
        assert_eq!(angle_to_counts(180), 512);
    }
}

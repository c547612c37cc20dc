//! # Hardware Interface Module
//!
//! This module defines the capability traits through which the arm software
//! touches physical hardware, along with their implementations:
//! - [`ServoOutput`] - the write primitive for one servo channel
//! - [`AnalogInput`] - the read primitive for one analog channel
//!
//! Implementations are injected into the joints and the joystick at
//! construction, keeping all motion logic hardware-agnostic.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// [`ServoOutput`] implementation for the Adafruit PCA9685 16 channel servo driver board.
pub mod pca9685;

/// Simulation implementations used when running off the real hardware.
pub mod sim;

#[cfg(test)]
pub(crate) mod mock;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors raised inside hardware implementations.
///
/// These never cross into motion logic - [`ServoOutput::write_angle`] is
/// fire-and-forget and implementations log their own failures.
#[derive(thiserror::Error, Debug)]
pub enum HwError {
    #[error("An I2C error occured")]
    I2c,

    #[error("Servo angle {0} deg is outside the physical range [0, 180] deg")]
    AngleOutOfRange(i32),

    #[error("The driver rejected the commanded output as invalid")]
    InvalidOutput,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The physical actuator write primitive for a single servo channel.
pub trait ServoOutput {
    /// Command the physical servo to the given integer angle.
    ///
    /// Fire-and-forget: the servo acts asynchronously in hardware and no
    /// acknowledgement is awaited. Implementations must not block beyond the
    /// write itself and must not panic - failures are logged and absorbed.
    ///
    /// Units: degrees
    fn write_angle(&mut self, angle_deg: i32);
}

/// The raw sample read primitive for a single analog channel.
pub trait AnalogInput {
    /// Read the current raw sample for this channel.
    ///
    /// Range: `[0, 1023]`
    fn read_raw(&mut self) -> u16;
}

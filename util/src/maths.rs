//! Utility maths functions
//!
//! All arm kinematics work in degrees since the servo hardware and
//! calibration data are expressed in degrees. The trigonometric functions in
//! this module convert to radians internally, and the derivative variants
//! carry the chain-rule pi/180 factor so that they are derivatives with
//! respect to a *degree* argument.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Cosine of an angle given in degrees.
pub fn cos_deg<T>(angle_deg: T) -> T
where
    T: Float,
{
    (angle_deg * deg_to_rad()).cos()
}

/// Derivative of [`cos_deg`] with respect to its degree argument.
pub fn cos_deg_derivative<T>(angle_deg: T) -> T
where
    T: Float,
{
    -deg_to_rad::<T>() * (angle_deg * deg_to_rad()).sin()
}

/// Sine of an angle given in degrees.
pub fn sin_deg<T>(angle_deg: T) -> T
where
    T: Float,
{
    (angle_deg * deg_to_rad()).sin()
}

/// Derivative of [`sin_deg`] with respect to its degree argument.
pub fn sin_deg_derivative<T>(angle_deg: T) -> T
where
    T: Float,
{
    deg_to_rad::<T>() * (angle_deg * deg_to_rad()).cos()
}

/// Inverse cosine returning degrees.
///
/// For arguments outside `[-1, 1]` the result is NaN. This is deliberately
/// not hidden, as callers use the NaN to detect unreachable arm poses.
pub fn acos_deg<T>(value: T) -> T
where
    T: Float,
{
    value.acos() / deg_to_rad()
}

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// The degrees-to-radians conversion factor in the caller's float type.
fn deg_to_rad<T>() -> T
where
    T: Float,
{
    T::from(std::f64::consts::PI / 180.0).unwrap()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

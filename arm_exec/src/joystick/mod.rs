//! Joystick input module
//!
//! Samples two (optionally three) analog channels once per control cycle and
//! turns them into a motion request: a cartesian displacement of the end
//! effector plus a hand rotation. Raw samples are mapped into a signed
//! millis range, dead-zoned around the stick centre, and scaled to the
//! configured per-cycle maxima.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Lowest raw sample an analog channel can produce.
pub const MIN_RAW_INPUT: f64 = 0.0;

/// Highest raw sample an analog channel can produce.
pub const MAX_RAW_INPUT: f64 = 1023.0;

/// Half-width of the signed millis range raw samples are mapped into.
pub const MILLIS_RANGE: f64 = 1000.0;

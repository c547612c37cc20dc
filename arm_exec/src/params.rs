//! Parameters structure for the arm control executable

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::{arm_ctrl, joystick, servo_ctrl::ServoParams};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the arm control executable, loaded from `arm_exec.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// The shoulder joint.
    pub shoulder: ServoParams,

    /// The elbow joint.
    pub elbow: ServoParams,

    /// The hand (wrist) joint.
    pub hand: ServoParams,

    /// Arm control parameters.
    pub arm_ctrl: arm_ctrl::Params,

    /// Joystick input parameters.
    pub joystick: joystick::Params,
}

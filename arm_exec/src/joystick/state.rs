//! Implementations for the Joystick state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{Params, MAX_RAW_INPUT, MILLIS_RANGE, MIN_RAW_INPUT};
use crate::arm_ctrl::PlaneCartesianCoordinates;
use crate::hw::AnalogInput;
use util::maths::lin_map;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single cycle's motion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDelta {
    /// Requested end effector displacement for this cycle.
    pub delta: PlaneCartesianCoordinates,

    /// Requested hand rotation for this cycle.
    ///
    /// Units: degrees
    pub rotation_deg: f64,
}

/// Joystick input state.
///
/// Owns the analog channels it samples. The rotation channel is optional -
/// two axis sticks simply never request hand rotation.
pub struct Joystick {
    params: Params,

    horizontal_input: Box<dyn AnalogInput>,

    vertical_input: Box<dyn AnalogInput>,

    rotation_input: Option<Box<dyn AnalogInput>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotionDelta {
    /// True if this cycle requests no motion at all.
    pub fn is_zero(&self) -> bool {
        self.delta.x_cm == 0.0 && self.delta.y_cm == 0.0 && self.rotation_deg == 0.0
    }
}

impl Joystick {
    /// Create a new joystick reading the given analog channels.
    pub fn new(
        params: Params,
        horizontal_input: Box<dyn AnalogInput>,
        vertical_input: Box<dyn AnalogInput>,
        rotation_input: Option<Box<dyn AnalogInput>>,
    ) -> Self {
        Self {
            params,
            horizontal_input,
            vertical_input,
            rotation_input,
        }
    }

    /// Sample all channels and produce this cycle's motion request.
    pub fn get_delta(&mut self) -> MotionDelta {
        // The horizontal axis is wired inverted on the stick, so its target
        // range is flipped
        let horizontal_millis = map_raw_to_millis(self.horizontal_input.read_raw(), true);
        let vertical_millis = map_raw_to_millis(self.vertical_input.read_raw(), false);

        let delta = PlaneCartesianCoordinates {
            x_cm: self.scale(horizontal_millis, self.params.max_displacement_per_cycle_cm),
            y_cm: self.scale(vertical_millis, self.params.max_displacement_per_cycle_cm),
        };

        let rotation_deg = match self.rotation_input {
            Some(ref mut input) => {
                let rotation_millis = map_raw_to_millis(input.read_raw(), false);
                self.scale(rotation_millis, self.params.max_rotation_per_cycle_deg)
            }
            None => 0.0,
        };

        MotionDelta {
            delta,
            rotation_deg,
        }
    }

    /// Scale a mapped millis value to the given per-cycle maximum, applying
    /// the dead zone.
    fn scale(&self, millis: f64, max_per_cycle: f64) -> f64 {
        if millis.abs() >= self.params.dead_zone_millis {
            max_per_cycle * millis / MILLIS_RANGE
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Map a raw analog sample into the signed millis range.
fn map_raw_to_millis(raw: u16, inverted: bool) -> f64 {
    let target_range = if inverted {
        (MILLIS_RANGE, -MILLIS_RANGE)
    } else {
        (-MILLIS_RANGE, MILLIS_RANGE)
    };

    lin_map((MIN_RAW_INPUT, MAX_RAW_INPUT), target_range, raw as f64)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::hw::mock::ScriptedAnalogInput;

    fn test_params() -> Params {
        Params {
            max_displacement_per_cycle_cm: 0.5,
            max_rotation_per_cycle_deg: 1.0,
            dead_zone_millis: 100.0,
        }
    }

    fn joystick_reading(
        horizontal_raw: u16,
        vertical_raw: u16,
        rotation_raw: Option<u16>,
    ) -> MotionDelta {
        let mut joystick = Joystick::new(
            test_params(),
            Box::new(ScriptedAnalogInput::new(&[], horizontal_raw)),
            Box::new(ScriptedAnalogInput::new(&[], vertical_raw)),
            rotation_raw
                .map(|r| Box::new(ScriptedAnalogInput::new(&[], r)) as Box<dyn crate::hw::AnalogInput>),
        );

        joystick.get_delta()
    }

    #[test]
    fn test_dead_zone() {
        // A centred stick maps to under 2 millis on both axes, far inside
        // the 100 millis dead zone
        let delta = joystick_reading(512, 512, Some(512));
        assert!(delta.is_zero());

        // Just inside the dead zone on the vertical axis: 1023 * 0.55 = 562
        // maps to roughly +99 millis
        let delta = joystick_reading(512, 562, None);
        assert!(delta.is_zero());
    }

    #[test]
    fn test_full_deflection() {
        // Horizontal axis is inverted: raw 0 is full positive x
        let delta = joystick_reading(0, 1023, None);
        assert!((delta.delta.x_cm - 0.5).abs() < 1e-9);
        assert!((delta.delta.y_cm - 0.5).abs() < 1e-9);
        assert_eq!(delta.rotation_deg, 0.0);

        let delta = joystick_reading(1023, 0, None);
        assert!((delta.delta.x_cm + 0.5).abs() < 1e-9);
        assert!((delta.delta.y_cm + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_partial_deflection_scales_linearly() {
        // Raw 767.25 maps to +500 millis on the vertical axis, i.e. half of
        // the per-cycle maximum. Raw 767 is within a millis of that.
        let delta = joystick_reading(512, 767, None);
        assert!(delta.delta.x_cm == 0.0);
        assert!((delta.delta.y_cm - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_channel() {
        let delta = joystick_reading(512, 512, Some(1023));
        assert!(delta.delta.x_cm == 0.0 && delta.delta.y_cm == 0.0);
        assert!((delta.rotation_deg - 1.0).abs() < 1e-9);

        // Two axis sticks never request rotation
        let delta = joystick_reading(512, 512, None);
        assert_eq!(delta.rotation_deg, 0.0);
    }
}

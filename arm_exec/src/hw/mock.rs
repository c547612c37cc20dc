//! Recording mock implementations of the hardware interfaces for unit tests

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{AnalogInput, ServoOutput};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A servo output which records every angle written to it.
pub(crate) struct RecordingServo {
    writes: Rc<RefCell<Vec<i32>>>,
}

/// An analog input which replays a scripted sequence of raw samples,
/// repeating the last sample once the script is exhausted.
pub(crate) struct ScriptedAnalogInput {
    samples: VecDeque<u16>,
    last: u16,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RecordingServo {
    /// Create a mock servo along with a shared handle to its write log.
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<i32>>>) {
        let writes = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                writes: writes.clone(),
            },
            writes,
        )
    }
}

impl ServoOutput for RecordingServo {
    fn write_angle(&mut self, angle_deg: i32) {
        self.writes.borrow_mut().push(angle_deg);
    }
}

impl ScriptedAnalogInput {
    pub(crate) fn new(samples: &[u16], last: u16) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            last,
        }
    }
}

impl AnalogInput for ScriptedAnalogInput {
    fn read_raw(&mut self) -> u16 {
        match self.samples.pop_front() {
            Some(s) => s,
            None => self.last,
        }
    }
}

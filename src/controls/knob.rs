use serde::{Deserialize, Serialize};

use crate::errors::{ApexError, Result};

/// A single live-editable number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knob {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Knob {
    /// Creates a knob, clamping `value` into range. `min <= max` and a
    /// positive, finite `step` are required.
    pub fn new(name: &str, value: f32, min: f32, max: f32, step: f32) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(ApexError::InvalidKnob {
                name: name.to_string(),
                reason: format!("range [{min}, {max}] is empty"),
            });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(ApexError::InvalidKnob {
                name: name.to_string(),
                reason: format!("step {step} must be positive"),
            });
        }
        Ok(Self {
            value: value.clamp(min, max),
            min,
            max,
            step,
        })
    }

    /// Sets a new value, clamped into range. NaN is ignored. Returns
    /// whether the stored value changed.
    pub fn set(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let next = value.clamp(self.min, self.max);
        if next == self.value {
            return false;
        }
        self.value = next;
        true
    }

    /// Moves the value by `steps` increments of `step` (negative moves down),
    /// the way a drag or arrow key on the control would.
    pub fn nudge(&mut self, steps: i32) -> bool {
        self.set(self.value + steps as f32 * self.step)
    }
}

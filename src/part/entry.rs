use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;

/// Timing of the fly-in shared by every part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySettings {
    pub duration: f32,
    pub easing: Easing,
    /// Pause between the fly-in landing and baseline capture.
    pub settle_delay: f32,
}

impl Default for EntrySettings {
    fn default() -> Self {
        Self {
            duration: 1.0,
            easing: Easing::BackOut(1.7),
            settle_delay: 0.1,
        }
    }
}

/// Where a part starts its fly-in and how long it waits before moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryPose {
    pub start: Vec3,
    pub delay: f32,
}

impl EntryPose {
    /// Start pose for the part called `name` landing at `rest`.
    ///
    /// Each known part comes in from a different side so they visibly
    /// converge: `Part2` from the left, `Part1` from above, everything else
    /// from the right.
    #[must_use]
    pub fn for_part(name: &str, rest: Vec3) -> Self {
        match name {
            "Part2" => Self {
                start: Vec3::new(-10.0, rest.y, rest.z),
                delay: 0.2,
            },
            "Part1" => Self {
                start: Vec3::new(rest.x, 15.0, rest.z),
                delay: 0.4,
            },
            _ => Self {
                start: Vec3::new(12.0, rest.y, rest.z),
                delay: 0.6,
            },
        }
    }
}

//! Tunable Parameters
//!
//! Named groups of numeric knobs (`value`, `min`, `max`, `step`) that a
//! designer edits live. The panel records which groups changed so the frame
//! loop can push only those values into the scene.

pub mod knob;
pub mod panel;

pub use knob::Knob;
pub use panel::{ControlGroup, ControlPanel, Preset};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::part::proximity::{DEFAULT_MAX_COUNT, DEFAULT_MAX_DISTANCE};

/// Numeric tuning of the hover float and its ripple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverSettings {
    /// Horizontal float spread at full intensity.
    pub float_distance: f32,
    /// Minimum lift at full intensity; the float never sinks.
    pub lift_bias: f32,
    /// Rotation spread (radians per axis) at full intensity.
    pub rotation_amount: f32,
    pub float_duration: f32,
    pub float_easing: Easing,
    pub return_duration: f32,
    pub return_easing: Easing,
    /// Delay between successive neighbours floating.
    pub enter_stagger: f32,
    /// Delay between successive neighbours returning.
    pub leave_stagger: f32,
    pub neighbor_radius: f32,
    pub max_neighbors: usize,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            float_distance: 0.5,
            lift_bias: 0.05,
            rotation_amount: 0.3,
            float_duration: 0.6,
            float_easing: Easing::BackOut(1.4),
            return_duration: 0.5,
            return_easing: Easing::BackOut(1.2),
            enter_stagger: 0.05,
            leave_stagger: 0.03,
            neighbor_radius: DEFAULT_MAX_DISTANCE,
            max_neighbors: DEFAULT_MAX_COUNT,
        }
    }
}

/// Offset from a leaf's baseline while it floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatOffset {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl FloatOffset {
    /// Draws a random float offset scaled by `intensity`.
    ///
    /// Six uniform draws in `[0, 1)`, in order: x, y, z of the position then
    /// x, y, z of the rotation. With `f = float_distance * intensity`:
    /// x and z lie in `[-f/2, f/2)`, y in `[lift, lift + f/2)` where
    /// `lift = lift_bias * intensity`, and each rotation axis in
    /// `[-r/2, r/2)` with `r = rotation_amount * intensity`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, intensity: f32, settings: &HoverSettings) -> Self {
        let spread = settings.float_distance * intensity;
        let lift = settings.lift_bias * intensity;

        let px = (rng.random::<f32>() - 0.5) * spread;
        let py = rng.random::<f32>() * spread * 0.5 + lift;
        let pz = (rng.random::<f32>() - 0.5) * spread;

        let turn = settings.rotation_amount * intensity;
        let rx = (rng.random::<f32>() - 0.5) * turn;
        let ry = (rng.random::<f32>() - 0.5) * turn;
        let rz = (rng.random::<f32>() - 0.5) * turn;

        Self {
            position: Vec3::new(px, py, pz),
            rotation: Vec3::new(rx, ry, rz),
        }
    }
}

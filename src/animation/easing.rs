use serde::{Deserialize, Serialize};

/// Easing curve applied to linear tween progress.
///
/// Names follow the usual tweening vocabulary: `BackOut(1.7)` is
/// `back.out(1.7)`, `PowerOut(2)` is `power2.out`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "param", rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Decelerates past the end value by an amount set by the overshoot
    /// parameter, then settles back.
    BackOut(f32),
    /// `1 - (1 - t)^(n + 1)`.
    PowerOut(u8),
}

impl Easing {
    /// Maps progress `t` in `[0, 1]` to eased progress.
    ///
    /// Input outside the unit range is clamped. Every curve maps `0.0` to
    /// `0.0` and `1.0` to exactly `1.0`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Easing::PowerOut(power) => 1.0 - (1.0 - t).powi(i32::from(power) + 1),
        }
    }
}

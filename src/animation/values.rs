use glam::Vec3;

/// Values a tween can move between.
///
/// `t` is the eased progress. Overshooting curves push it slightly past
/// `1.0`, so implementations must extrapolate rather than clamp.
pub trait Interpolatable: Copy {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}
